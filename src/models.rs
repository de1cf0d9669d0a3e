//! Data models for the Flight Analyzer.
//!
//! Core domain types (samples, series, phase intervals, statistics) plus
//! the renderer-facing chart payload structs. Payload structs serialize
//! to camelCase JSON so a charting frontend can consume them directly.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flight phase label recorded with each telemetry sample.
///
/// The eight phases mirror the avionics state machine that produced the
/// recording. Labels outside the known set are preserved verbatim in
/// `Other` rather than rejected — a log written by a newer controller
/// build must still be analyzable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlightPhase {
    Preflight,
    Takeoff,
    Climb,
    Cruise,
    Descent,
    Approach,
    Landing,
    Emergency,
    /// Unrecognized label, kept as recorded
    Other(String),
}

impl FlightPhase {
    /// Parse a phase label as it appears in the telemetry log
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "PREFLIGHT" => FlightPhase::Preflight,
            "TAKEOFF" => FlightPhase::Takeoff,
            "CLIMB" => FlightPhase::Climb,
            "CRUISE" => FlightPhase::Cruise,
            "DESCENT" => FlightPhase::Descent,
            "APPROACH" => FlightPhase::Approach,
            "LANDING" => FlightPhase::Landing,
            "EMERGENCY" => FlightPhase::Emergency,
            other => FlightPhase::Other(other.to_string()),
        }
    }

    /// Phase label as recorded in the log
    pub fn as_str(&self) -> &str {
        match self {
            FlightPhase::Preflight => "PREFLIGHT",
            FlightPhase::Takeoff => "TAKEOFF",
            FlightPhase::Climb => "CLIMB",
            FlightPhase::Cruise => "CRUISE",
            FlightPhase::Descent => "DESCENT",
            FlightPhase::Approach => "APPROACH",
            FlightPhase::Landing => "LANDING",
            FlightPhase::Emergency => "EMERGENCY",
            FlightPhase::Other(label) => label,
        }
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded telemetry instant
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    /// Simulation time in seconds, non-decreasing across a series
    pub time: f64,
    /// Altitude in meters
    pub altitude: f64,
    /// Airspeed in m/s
    pub airspeed: f64,
    /// Vertical speed in m/s (positive = climb)
    pub vertical_speed: f64,
    /// Elevator position, -1.0..=1.0
    pub elevator: f64,
    /// Aileron position, -1.0..=1.0
    pub aileron: f64,
    /// Rudder position, -1.0..=1.0
    pub rudder: f64,
    /// Throttle position, 0.0..=1.0
    pub throttle: f64,
    /// Static pressure in hPa
    pub pressure: f64,
    /// Outside air temperature in °C
    pub temperature: f64,
    /// Number of concurrently active system faults
    pub active_faults: u32,
    /// Whether the sensor suite reported valid data at this instant
    pub sensor_valid: bool,
    /// Flight phase reported by the flight controller
    pub flight_phase: FlightPhase,
}

/// A complete recorded flight: samples in time order plus recording
/// metadata used for report headers.
///
/// Ingestion is responsible for the non-decreasing `time` invariant; the
/// analysis core tolerates violations (see segmenter) but the interval a
/// mis-ordered sample lands in is undefined.
#[derive(Debug, Clone, Default)]
pub struct TelemetrySeries {
    pub samples: Vec<TelemetrySample>,
    /// Wall-clock start of the recording, when the log carried one
    pub started_at: Option<DateTime<Utc>>,
    /// Display name of the recording (input file stem)
    pub source_name: String,
}

impl TelemetrySeries {
    pub fn new(samples: Vec<TelemetrySample>) -> Self {
        Self { samples, started_at: None, source_name: String::new() }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Recording duration in seconds: last sample time minus first.
    /// Zero for a series with fewer than two samples.
    pub fn duration(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }
}

/// A maximal contiguous run of samples sharing one flight phase.
///
/// The segmenter guarantees intervals are non-overlapping and partition
/// `[first.time, last.time]` with no gaps. A phase that recurs
/// non-contiguously yields one interval per run.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseInterval {
    pub phase: FlightPhase,
    pub start_time: f64,
    pub end_time: f64,
    pub sample_count: usize,
}

impl PhaseInterval {
    /// Interval duration in seconds; zero for a single-sample interval
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Descriptive aggregates over one recorded flight.
///
/// Built once per analysis run and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightStatistics {
    /// Flight duration in seconds
    pub duration_secs: f64,
    pub max_altitude_m: f64,
    pub min_altitude_m: f64,
    pub max_airspeed_ms: f64,
    pub avg_airspeed_ms: f64,
    /// Largest positive vertical speed observed
    pub max_climb_rate_ms: f64,
    /// Most negative vertical speed observed
    pub max_descent_rate_ms: f64,
    /// Total duration per phase label in first-appearance order.
    /// A recurring phase has all of its intervals summed.
    pub phase_durations: Vec<(String, f64)>,
    /// Sum of per-sample active fault counts. An approximation of fault
    /// exposure that is only a true time integral when samples are
    /// uniformly spaced.
    pub total_fault_seconds: u64,
    pub max_concurrent_faults: u32,
    /// Percentage of samples with valid sensor data, 0.0..=100.0
    pub sensor_valid_pct: f64,
}

/// One plottable series: x/y point pairs plus label and style hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub label: String,
    /// Renderer style hint, e.g. a color or line style token
    pub style_hint: String,
}

/// Fixed display range hint for a chart axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// Shaded background span marking one phase interval behind a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseBand {
    pub start_time: f64,
    pub end_time: f64,
    pub phase: String,
    pub color: String,
}

/// Flight profile payload: altitude, airspeed and vertical speed traces
/// stacked over a shared time axis, with phase-colored background bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightProfileChart {
    pub altitude: ChartSeries,
    pub airspeed: ChartSeries,
    pub vertical_speed: ChartSeries,
    pub phase_bands: Vec<PhaseBand>,
}

/// One control surface trace with its fixed display range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSurfaceChannel {
    pub series: ChartSeries,
    pub axis_range: AxisRange,
    /// Draw a dashed zero reference line behind the trace
    pub zero_line: bool,
}

/// Control surfaces payload: four independent single-series panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlSurfacesChart {
    pub elevator: ControlSurfaceChannel,
    pub aileron: ControlSurfaceChannel,
    pub rudder: ControlSurfaceChannel,
    pub throttle: ControlSurfaceChannel,
}

/// Region filled from zero up to `upper` at each time point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillRegion {
    pub x: Vec<f64>,
    pub upper: Vec<f64>,
    pub label: String,
    pub color: String,
}

/// Sensor data payload: raw sensor traces plus a filled fault region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDataChart {
    pub altitude: ChartSeries,
    pub pressure: ChartSeries,
    pub temperature: ChartSeries,
    pub faults: FillRegion,
}

/// One horizontal bar on the phase timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseBar {
    pub start_time: f64,
    pub duration: f64,
    pub phase: String,
    pub color: String,
    /// Text drawn on the bar; omitted for bars too short to label
    pub text_label: Option<String>,
}

/// Phase timeline payload: one bar per phase interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTimelineChart {
    pub bars: Vec<PhaseBar>,
    /// Overall time extent of the recording, for axis limits
    pub time_range: AxisRange,
}

/// The four chart payloads produced by one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBundle {
    pub flight_profile: FlightProfileChart,
    pub control_surfaces: ControlSurfacesChart,
    pub sensor_data: SensorDataChart,
    pub phase_timeline: PhaseTimelineChart,
}
