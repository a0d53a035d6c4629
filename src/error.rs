use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Failed to load {}: {source}", path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid record in {} at line {line}: {reason}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDateFormat {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl WeatherError {
    pub fn data_load(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::DataLoad {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_record(path: impl Into<PathBuf>, line: u64, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// HTTP status for a failed request. Load errors only occur before the
    /// router is built, so clients only ever see `InvalidDateFormat`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DataLoad { .. } | Self::InvalidRecord { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::InvalidDateFormat { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn invalid_date_is_a_client_error() {
        let source = NaiveDate::parse_from_str("2017-13-45", "%Y-%m-%d").unwrap_err();
        let err = WeatherError::InvalidDateFormat {
            value: "2017-13-45".to_string(),
            source,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Invalid date '2017-13-45', expected YYYY-MM-DD"
        );
    }

    #[test]
    fn data_load_names_the_file() {
        let source = csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let err = WeatherError::data_load("Resources/hawaii_stations.csv", source);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Failed to load Resources/hawaii_stations.csv"));
    }

    #[test]
    fn invalid_record_names_file_and_line() {
        let err = WeatherError::invalid_record(
            "Resources/hawaii_measurements.csv",
            3,
            "prcp must be a non-negative number, got -3",
        );
        assert_eq!(
            err.to_string(),
            "Invalid record in Resources/hawaii_measurements.csv at line 3: prcp must be a non-negative number, got -3"
        );
    }
}
