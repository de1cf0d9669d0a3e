//! Chart data preparation for the rendering frontend.
//!
//! Builds four renderer-agnostic payloads from a series and its phase
//! intervals: flight profile, control surfaces, sensor data, and the
//! phase timeline. Each payload is pure derived data — series, bands,
//! bars — so the renderer never receives stateful drawing commands and
//! the builders are testable without a display.

use std::collections::HashMap;

use crate::models::{
    AxisRange, ChartBundle, ChartSeries, ControlSurfaceChannel, ControlSurfacesChart, FillRegion,
    FlightProfileChart, PhaseBand, PhaseBar, PhaseInterval, PhaseTimelineChart, SensorDataChart,
    TelemetrySeries,
};
use crate::pipeline::AnalysisError;

/// Timeline bar colors for the known flight phases.
///
/// The recorder's original table shipped a malformed entry for PREFLIGHT;
/// it is fixed to a well-formed gray here.
const PHASE_COLORS: [(&str, &str); 8] = [
    ("PREFLIGHT", "#808080"),
    ("TAKEOFF", "#ff6b6b"),
    ("CLIMB", "#4ecdc4"),
    ("CRUISE", "#45b7d1"),
    ("DESCENT", "#f9ca24"),
    ("APPROACH", "#f0932b"),
    ("LANDING", "#6ab04c"),
    ("EMERGENCY", "#eb4d4b"),
];

/// Bar color for any phase label outside the known set
const FALLBACK_PHASE_COLOR: &str = "#95a5a6";

/// Pastel palette for profile background bands, cycled over the distinct
/// phase labels in first-appearance order
const BAND_PALETTE: [&str; 8] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
];

/// Resolve the timeline color for a phase label, falling back for
/// unknown labels rather than failing.
fn phase_color(label: &str) -> &'static str {
    PHASE_COLORS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_PHASE_COLOR)
}

/// Builds the four chart payloads from one analysis run
pub struct ChartDataBuilder;

impl ChartDataBuilder {
    /// Build all four payloads.
    ///
    /// The payloads are independent of each other; only the series and
    /// interval list feed them.
    pub fn build(
        series: &TelemetrySeries,
        intervals: &[PhaseInterval],
    ) -> Result<ChartBundle, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }

        let bundle = ChartBundle {
            flight_profile: Self::build_flight_profile(series, intervals),
            control_surfaces: Self::build_control_surfaces(series),
            sensor_data: Self::build_sensor_data(series),
            phase_timeline: Self::build_phase_timeline(series, intervals),
        };

        log::debug!(
            "Built chart payloads: {} profile bands, {} timeline bars, {} points per series",
            bundle.flight_profile.phase_bands.len(),
            bundle.phase_timeline.bars.len(),
            series.len()
        );

        Ok(bundle)
    }

    /// Altitude, airspeed and vertical speed traces over a shared time
    /// axis, with one shaded band per phase interval behind the altitude
    /// trace. Bands of the same phase share one palette color.
    fn build_flight_profile(
        series: &TelemetrySeries,
        intervals: &[PhaseInterval],
    ) -> FlightProfileChart {
        let time: Vec<f64> = series.samples.iter().map(|s| s.time).collect();

        // Stable color per distinct label, assigned in first-appearance
        // order and cycling the palette if labels outnumber it
        let mut band_colors: HashMap<&str, &str> = HashMap::new();
        let mut next_color = 0usize;
        let mut phase_bands = Vec::with_capacity(intervals.len());
        for interval in intervals {
            let label = interval.phase.as_str();
            let color = *band_colors.entry(label).or_insert_with(|| {
                let color = BAND_PALETTE[next_color % BAND_PALETTE.len()];
                next_color += 1;
                color
            });
            phase_bands.push(PhaseBand {
                start_time: interval.start_time,
                end_time: interval.end_time,
                phase: label.to_string(),
                color: color.to_string(),
            });
        }

        FlightProfileChart {
            altitude: ChartSeries {
                x: time.clone(),
                y: series.samples.iter().map(|s| s.altitude).collect(),
                label: "Altitude".to_string(),
                style_hint: "blue".to_string(),
            },
            airspeed: ChartSeries {
                x: time.clone(),
                y: series.samples.iter().map(|s| s.airspeed).collect(),
                label: "Airspeed".to_string(),
                style_hint: "red".to_string(),
            },
            vertical_speed: ChartSeries {
                x: time,
                y: series.samples.iter().map(|s| s.vertical_speed).collect(),
                label: "Vertical Speed".to_string(),
                style_hint: "green".to_string(),
            },
            phase_bands,
        }
    }

    /// Four independent control surface panels with fixed display
    /// ranges. Deflection surfaces get a zero reference line; throttle
    /// does not, since it only moves in 0..1.
    fn build_control_surfaces(series: &TelemetrySeries) -> ControlSurfacesChart {
        let time: Vec<f64> = series.samples.iter().map(|s| s.time).collect();
        let deflection_range = AxisRange { min: -1.1, max: 1.1 };

        let channel = |y: Vec<f64>, label: &str, style: &str, range: AxisRange, zero: bool| {
            ControlSurfaceChannel {
                series: ChartSeries {
                    x: time.clone(),
                    y,
                    label: label.to_string(),
                    style_hint: style.to_string(),
                },
                axis_range: range,
                zero_line: zero,
            }
        };

        ControlSurfacesChart {
            elevator: channel(
                series.samples.iter().map(|s| s.elevator).collect(),
                "Elevator",
                "blue",
                deflection_range,
                true,
            ),
            aileron: channel(
                series.samples.iter().map(|s| s.aileron).collect(),
                "Aileron",
                "red",
                deflection_range,
                true,
            ),
            rudder: channel(
                series.samples.iter().map(|s| s.rudder).collect(),
                "Rudder",
                "green",
                deflection_range,
                true,
            ),
            throttle: channel(
                series.samples.iter().map(|s| s.throttle).collect(),
                "Throttle",
                "magenta",
                AxisRange { min: -0.1, max: 1.1 },
                false,
            ),
        }
    }

    /// Raw sensor traces plus the fault count rendered as a region
    /// filled from zero
    fn build_sensor_data(series: &TelemetrySeries) -> SensorDataChart {
        let time: Vec<f64> = series.samples.iter().map(|s| s.time).collect();

        SensorDataChart {
            altitude: ChartSeries {
                x: time.clone(),
                y: series.samples.iter().map(|s| s.altitude).collect(),
                label: "Altitude".to_string(),
                style_hint: "blue".to_string(),
            },
            pressure: ChartSeries {
                x: time.clone(),
                y: series.samples.iter().map(|s| s.pressure).collect(),
                label: "Pressure".to_string(),
                style_hint: "red".to_string(),
            },
            temperature: ChartSeries {
                x: time.clone(),
                y: series.samples.iter().map(|s| s.temperature).collect(),
                label: "Temperature".to_string(),
                style_hint: "green".to_string(),
            },
            faults: FillRegion {
                x: time,
                upper: series.samples.iter().map(|s| f64::from(s.active_faults)).collect(),
                label: "Fault Periods".to_string(),
                color: "red".to_string(),
            },
        }
    }

    /// One bar per interval, colored from the fixed phase table. Bars
    /// shorter than the label threshold render without text to avoid
    /// clutter.
    fn build_phase_timeline(
        series: &TelemetrySeries,
        intervals: &[PhaseInterval],
    ) -> PhaseTimelineChart {
        // Minimum bar duration (seconds) for an on-bar text label
        const LABEL_MIN_DURATION: f64 = 5.0;

        let bars = intervals
            .iter()
            .map(|interval| {
                let label = interval.phase.as_str();
                let duration = interval.duration();
                PhaseBar {
                    start_time: interval.start_time,
                    duration,
                    phase: label.to_string(),
                    color: phase_color(label).to_string(),
                    text_label: (duration > LABEL_MIN_DURATION).then(|| label.to_string()),
                }
            })
            .collect();

        let first = series.samples.first().map(|s| s.time).unwrap_or(0.0);
        let last = series.samples.last().map(|s| s.time).unwrap_or(0.0);

        PhaseTimelineChart { bars, time_range: AxisRange { min: first, max: last } }
    }
}
