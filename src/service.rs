use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::constants::API_PREFIX;
use crate::dataset::{parse_date, WeatherDataset};
use crate::error::WeatherError;
use crate::formatters::format_welcome;
use crate::models::{DateSeries, StationList, TemperatureStats};

/// Main weather service answering the read-only HTTP queries
#[derive(Clone)]
pub struct Weather {
    dataset: Arc<WeatherDataset>,
}

impl Weather {
    /// Creates a new Weather service over an already loaded dataset
    pub fn new(dataset: WeatherDataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }

    /// Builds the router exposing every endpoint
    pub fn router(self) -> Router {
        Router::new()
            .route("/", get(welcome))
            .route(&format!("{API_PREFIX}/precipitation"), get(precipitation))
            .route(&format!("{API_PREFIX}/stations"), get(stations))
            .route(&format!("{API_PREFIX}/tobs"), get(tobs))
            .route(&format!("{API_PREFIX}/{{start}}"), get(temperature_stats_from))
            .route(
                &format!("{API_PREFIX}/{{start}}/{{end}}"),
                get(temperature_stats_between),
            )
            .with_state(self)
    }

    fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<Json<Vec<TemperatureStats>>, WeatherError> {
        let start = parse_date(start).inspect_err(|e| tracing::warn!("{}", e))?;
        let end = end
            .map(parse_date)
            .transpose()
            .inspect_err(|e| tracing::warn!("{}", e))?;

        Ok(Json(vec![self.dataset.temperature_stats(start, end)]))
    }
}

/// Lists the available routes
async fn welcome() -> Html<String> {
    tracing::info!("Serving route listing");
    Html(format_welcome())
}

/// Gets every recorded precipitation value grouped by date
async fn precipitation(State(weather): State<Weather>) -> Json<DateSeries> {
    tracing::info!("Getting precipitation by date");
    Json(weather.dataset.precipitation_by_date())
}

/// Gets the distinct station identifiers
async fn stations(State(weather): State<Weather>) -> Json<StationList> {
    tracing::info!("Getting station list");
    Json(StationList {
        station: weather.dataset.station_ids(),
    })
}

/// Gets temperature observations for the year before the newest measurement
async fn tobs(State(weather): State<Weather>) -> Json<DateSeries> {
    tracing::info!(
        "Getting temperature observations after {:?}",
        weather.dataset.recent_cutoff()
    );
    Json(weather.dataset.recent_temperatures())
}

/// Gets min/avg/max temperature from a start date to the newest measurement
async fn temperature_stats_from(
    State(weather): State<Weather>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStats>>, WeatherError> {
    tracing::info!("Getting temperature stats from {}", start);
    weather.temperature_stats(&start, None)
}

/// Gets min/avg/max temperature between two dates, inclusive
async fn temperature_stats_between(
    State(weather): State<Weather>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStats>>, WeatherError> {
    tracing::info!("Getting temperature stats from {} to {}", start, end);
    weather.temperature_stats(&start, Some(&end))
}
