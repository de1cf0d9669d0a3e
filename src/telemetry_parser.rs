//! Parser module for avionics telemetry CSV recordings.
//!
//! Reads the CSV format written by the avionics simulator's telemetry
//! logger. Columns are resolved by name from the header line rather than
//! by position, so reordered or extended logs still parse. A required
//! column missing from the header, or a required value missing from a
//! data row, is a hard error — no best-effort substitution.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::models::{FlightPhase, TelemetrySample, TelemetrySeries};

/// Columns every telemetry recording must carry
const REQUIRED_COLUMNS: [&str; 13] = [
    "simulationtime",
    "altitude",
    "airspeed",
    "verticalspeed",
    "flightphase",
    "elevator",
    "aileron",
    "rudder",
    "throttle",
    "pressure",
    "temperature",
    "activefaults",
    "sensorvalid",
];

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Telemetry file is empty")]
    EmptyFile,

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Line {line}: missing or unparseable value for '{field}'")]
    MissingField { line: usize, field: String },

    #[error("No telemetry samples found in file")]
    NoTelemetryData,
}

/// Header-name to column-index mapping, case-insensitive
struct ColumnMap {
    indices: HashMap<String, usize>,
}

impl ColumnMap {
    fn new(headers: &[String]) -> Self {
        let indices = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();
        Self { indices }
    }

    /// Verify every required column is present in the header
    fn check_required(&self) -> Result<(), ParserError> {
        for column in REQUIRED_COLUMNS {
            if !self.indices.contains_key(column) {
                return Err(ParserError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }

    fn get_raw<'a>(&self, row: &'a [&str], field: &str) -> Option<&'a str> {
        let idx = *self.indices.get(field)?;
        row.get(idx).map(|s| s.trim()).filter(|s| !s.is_empty())
    }

    fn get_f64(&self, row: &[&str], field: &str, line: usize) -> Result<f64, ParserError> {
        self.get_raw(row, field)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ParserError::MissingField { line, field: field.to_string() })
    }

    fn get_u32(&self, row: &[&str], field: &str, line: usize) -> Result<u32, ParserError> {
        self.get_raw(row, field)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| ParserError::MissingField { line, field: field.to_string() })
    }

    fn get_bool(&self, row: &[&str], field: &str, line: usize) -> Result<bool, ParserError> {
        let raw = self
            .get_raw(row, field)
            .ok_or_else(|| ParserError::MissingField { line, field: field.to_string() })?;
        match raw.to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ParserError::MissingField { line, field: field.to_string() }),
        }
    }

    fn get_str(&self, row: &[&str], field: &str, line: usize) -> Result<String, ParserError> {
        self.get_raw(row, field)
            .map(str::to_string)
            .ok_or_else(|| ParserError::MissingField { line, field: field.to_string() })
    }
}

/// Avionics telemetry CSV parser
pub struct TelemetryParser;

impl TelemetryParser {
    /// Parse a telemetry CSV file into a [`TelemetrySeries`].
    ///
    /// Blank lines are skipped. The optional wall-clock `Timestamp`
    /// column of the first data row, when parseable, becomes the
    /// recording's start time.
    pub fn parse_file(path: &Path) -> Result<TelemetrySeries, ParserError> {
        let parse_start = std::time::Instant::now();
        log::info!("Parsing telemetry file: {:?}", path);

        let file = File::open(path)?;
        let mut series = Self::parse_reader(BufReader::new(file))?;

        series.source_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("telemetry")
            .to_string();

        log::info!(
            "Parse complete in {:.3}s: {} samples, span={:.1}s, started_at={:?}",
            parse_start.elapsed().as_secs_f64(),
            series.len(),
            series.duration(),
            series.started_at
        );

        Ok(series)
    }

    /// Parse telemetry CSV from any buffered reader
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<TelemetrySeries, ParserError> {
        let mut lines = reader.lines();

        let header_line = match lines.next() {
            Some(line) => line?,
            None => return Err(ParserError::EmptyFile),
        };
        let headers: Vec<String> = header_line.split(',').map(|s| s.trim().to_string()).collect();
        let col_map = ColumnMap::new(&headers);
        col_map.check_required()?;

        let mut samples = Vec::new();
        let mut started_at: Option<DateTime<Utc>> = None;
        let mut non_monotonic: usize = 0;
        let mut prev_time = f64::NEG_INFINITY;

        for (i, line_result) in lines.enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }
            // 1-based, counting the header
            let line_no = i + 2;
            let fields: Vec<&str> = line.split(',').collect();

            let sample = Self::parse_row(&col_map, &fields, line_no)?;

            if started_at.is_none() {
                started_at = col_map.get_raw(&fields, "timestamp").and_then(|ts| {
                    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S%.f")
                        .ok()
                        .map(|ndt| DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc))
                });
            }

            if sample.time < prev_time {
                non_monotonic += 1;
            }
            prev_time = sample.time;

            samples.push(sample);
        }

        if samples.is_empty() {
            return Err(ParserError::NoTelemetryData);
        }

        if non_monotonic > 0 {
            log::warn!(
                "Telemetry time decreases at {} row(s) — downstream analysis of mis-ordered samples is undefined",
                non_monotonic
            );
        }

        Ok(TelemetrySeries { samples, started_at, source_name: String::new() })
    }

    /// Parse a single CSV row into a sample
    fn parse_row(
        col_map: &ColumnMap,
        row: &[&str],
        line: usize,
    ) -> Result<TelemetrySample, ParserError> {
        Ok(TelemetrySample {
            time: col_map.get_f64(row, "simulationtime", line)?,
            altitude: col_map.get_f64(row, "altitude", line)?,
            airspeed: col_map.get_f64(row, "airspeed", line)?,
            vertical_speed: col_map.get_f64(row, "verticalspeed", line)?,
            elevator: col_map.get_f64(row, "elevator", line)?,
            aileron: col_map.get_f64(row, "aileron", line)?,
            rudder: col_map.get_f64(row, "rudder", line)?,
            throttle: col_map.get_f64(row, "throttle", line)?,
            pressure: col_map.get_f64(row, "pressure", line)?,
            temperature: col_map.get_f64(row, "temperature", line)?,
            active_faults: col_map.get_u32(row, "activefaults", line)?,
            sensor_valid: col_map.get_bool(row, "sensorvalid", line)?,
            flight_phase: FlightPhase::from_label(&col_map.get_str(row, "flightphase", line)?),
        })
    }
}
