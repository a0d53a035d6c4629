use chrono::{Days, NaiveDate};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;

use crate::constants::{DATE_FORMAT, RECENT_WINDOW_DAYS};
use crate::error::WeatherError;
use crate::models::{DateSeries, Measurement, Station, TemperatureStats, ValidateRecord};

/// Read-only measurement and station tables, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct WeatherDataset {
    measurements: Vec<Measurement>,
    stations: Vec<Station>,
    max_date: Option<NaiveDate>,
}

impl WeatherDataset {
    pub fn new(measurements: Vec<Measurement>, stations: Vec<Station>) -> Self {
        let max_date = measurements.iter().map(|m| m.date).max();
        Self {
            measurements,
            stations,
            max_date,
        }
    }

    /// Loads both CSV tables, failing on the first unreadable file or on a row
    /// that is malformed or holds an out-of-domain value
    pub fn load(measurements_path: &Path, stations_path: &Path) -> Result<Self, WeatherError> {
        let measurements = read_table::<Measurement>(measurements_path)?;
        let stations = read_table::<Station>(stations_path)?;
        let dataset = Self::new(measurements, stations);

        for station in dataset.stations() {
            tracing::debug!(
                "Station {} '{}' at {:.4}, {:.4} ({} m)",
                station.station_id,
                station.name,
                station.latitude,
                station.longitude,
                station.elevation
            );
        }

        let reporting: HashSet<&str> = dataset
            .measurements()
            .iter()
            .map(|m| m.station.as_str())
            .collect();

        tracing::info!(
            "Loaded {} measurements from {} reporting stations and {} station records (dates {} to {})",
            dataset.measurements().len(),
            reporting.len(),
            dataset.stations().len(),
            dataset
                .min_date()
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            dataset
                .max_date
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
        );

        Ok(dataset)
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Most recent measurement date, `None` for an empty table
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.max_date
    }

    fn min_date(&self) -> Option<NaiveDate> {
        self.measurements.iter().map(|m| m.date).min()
    }

    /// Precipitation values keyed by date, skipping measurements without one
    pub fn precipitation_by_date(&self) -> DateSeries {
        let mut series = DateSeries::new();
        for m in &self.measurements {
            if let Some(prcp) = m.precipitation {
                series.entry(m.date).or_default().push(prcp);
            }
        }
        series
    }

    /// Distinct station identifiers in table order
    pub fn station_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for station in &self.stations {
            if seen.insert(station.station_id.as_str()) {
                ids.push(station.station_id.clone());
            }
        }
        ids
    }

    /// Start of the recent window; measurements on this date are outside it.
    ///
    /// `None` when the table is empty or when the window reaches past the
    /// earliest representable date, in which case every measurement is recent.
    pub fn recent_cutoff(&self) -> Option<NaiveDate> {
        self.max_date
            .and_then(|max| max.checked_sub_days(Days::new(RECENT_WINDOW_DAYS)))
    }

    /// Temperature observations keyed by date for the year before the newest measurement
    pub fn recent_temperatures(&self) -> DateSeries {
        let cutoff = self.recent_cutoff();
        let mut series = DateSeries::new();

        for m in self
            .measurements
            .iter()
            .filter(|m| cutoff.map_or(true, |cutoff| m.date > cutoff))
        {
            series
                .entry(m.date)
                .or_default()
                .push(m.temperature_observation);
        }
        series
    }

    /// Min/avg/max temperature over `start..=end`, where a missing `end`
    /// means the newest measurement date
    pub fn temperature_stats(&self, start: NaiveDate, end: Option<NaiveDate>) -> TemperatureStats {
        let Some(end) = end.or(self.max_date) else {
            return TemperatureStats::default();
        };

        let mut stats = TemperatureStats::default();
        let mut sum = 0.0;
        let mut count = 0usize;

        for tobs in self
            .measurements
            .iter()
            .filter(|m| m.date >= start && m.date <= end)
            .map(|m| m.temperature_observation)
        {
            stats.min = Some(stats.min.map_or(tobs, |min: f64| min.min(tobs)));
            stats.max = Some(stats.max.map_or(tobs, |max: f64| max.max(tobs)));
            sum += tobs;
            count += 1;
        }

        if count > 0 {
            stats.avg = Some(sum / count as f64);
        }

        tracing::debug!("Aggregated {} observations between {} and {}", count, start, end);
        stats
    }
}

/// Parses a `YYYY-MM-DD` request parameter
pub fn parse_date(value: &str) -> Result<NaiveDate, WeatherError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| {
        WeatherError::InvalidDateFormat {
            value: value.to_string(),
            source,
        }
    })
}

fn read_table<T>(path: &Path) -> Result<Vec<T>, WeatherError>
where
    T: DeserializeOwned + ValidateRecord,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| WeatherError::data_load(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| WeatherError::data_load(path, e))?
        .clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| WeatherError::data_load(path, e))?;
        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|e| WeatherError::data_load(path, e))?;

        if let Err(reason) = row.validate() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(WeatherError::invalid_record(path, line, reason));
        }
        rows.push(row);
    }
    Ok(rows)
}
