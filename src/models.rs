use chrono::NaiveDate;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

// ============================================================================
// Source Table Records
// ============================================================================

/// One row of `hawaii_measurements.csv`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Measurement {
    pub station: String,
    pub date: NaiveDate,
    #[serde(rename = "prcp")]
    pub precipitation: Option<f64>,
    #[serde(rename = "tobs")]
    pub temperature_observation: f64,
}

/// One row of `hawaii_stations.csv`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Station {
    #[serde(rename = "station")]
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// Value-domain check applied to every row after deserialization
pub trait ValidateRecord {
    fn validate(&self) -> Result<(), String>;
}

impl ValidateRecord for Measurement {
    fn validate(&self) -> Result<(), String> {
        if !self.temperature_observation.is_finite() {
            return Err(format!(
                "tobs must be a finite number, got {}",
                self.temperature_observation
            ));
        }
        match self.precipitation {
            Some(prcp) if !prcp.is_finite() || prcp < 0.0 => Err(format!(
                "prcp must be a non-negative number, got {}",
                prcp
            )),
            _ => Ok(()),
        }
    }
}

impl ValidateRecord for Station {
    fn validate(&self) -> Result<(), String> {
        if [self.latitude, self.longitude, self.elevation]
            .iter()
            .all(|v| v.is_finite())
        {
            Ok(())
        } else {
            Err("latitude, longitude and elevation must be finite numbers".to_string())
        }
    }
}

// ============================================================================
// Response Models
// ============================================================================

/// Values grouped under their measurement date, serialized as `{"YYYY-MM-DD": [..]}`
pub type DateSeries = BTreeMap<NaiveDate, Vec<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationList {
    pub station: Vec<String>,
}

/// Min/avg/max of temperature observations over a date range.
///
/// Every field is `None` when no measurement falls in the range. Serialized
/// as a bare `[min, avg, max]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl Serialize for TemperatureStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.min)?;
        tuple.serialize_element(&self.avg)?;
        tuple.serialize_element(&self.max)?;
        tuple.end()
    }
}
