//! Statistics aggregation and the textual flight report.
//!
//! All sample-level aggregates are computed in a single pass. Per-phase
//! durations come from the segmenter's interval list so that recurring
//! phases sum their contiguous runs instead of measuring first-to-last
//! span.

use crate::models::{FlightStatistics, PhaseInterval, TelemetrySeries};
use crate::pipeline::AnalysisError;

/// Computes descriptive aggregates for one recorded flight
pub struct StatisticsAggregator;

impl StatisticsAggregator {
    /// Aggregate a series and its phase intervals into [`FlightStatistics`].
    ///
    /// Mean airspeed is an arithmetic average over sample count, not a
    /// time-weighted integral. Fault-seconds is likewise a plain sum of
    /// per-sample fault counts; both match the recorder's near-uniform
    /// sample spacing.
    pub fn aggregate(
        series: &TelemetrySeries,
        intervals: &[PhaseInterval],
    ) -> Result<FlightStatistics, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::EmptySeries);
        }

        let mut max_altitude = f64::NEG_INFINITY;
        let mut min_altitude = f64::INFINITY;
        let mut max_airspeed = f64::NEG_INFINITY;
        let mut airspeed_sum = 0.0;
        let mut max_climb = f64::NEG_INFINITY;
        let mut max_descent = f64::INFINITY;
        let mut fault_seconds: u64 = 0;
        let mut max_faults: u32 = 0;
        let mut valid_count: usize = 0;

        for sample in &series.samples {
            max_altitude = max_altitude.max(sample.altitude);
            min_altitude = min_altitude.min(sample.altitude);
            max_airspeed = max_airspeed.max(sample.airspeed);
            airspeed_sum += sample.airspeed;
            max_climb = max_climb.max(sample.vertical_speed);
            max_descent = max_descent.min(sample.vertical_speed);
            fault_seconds += u64::from(sample.active_faults);
            max_faults = max_faults.max(sample.active_faults);
            if sample.sensor_valid {
                valid_count += 1;
            }
        }

        // Sum interval durations per label, keyed in first-appearance order
        let mut phase_durations: Vec<(String, f64)> = Vec::new();
        for interval in intervals {
            let label = interval.phase.as_str();
            match phase_durations.iter_mut().find(|(l, _)| l == label) {
                Some((_, total)) => *total += interval.duration(),
                None => phase_durations.push((label.to_string(), interval.duration())),
            }
        }

        let sample_count = series.len();
        let stats = FlightStatistics {
            duration_secs: series.duration(),
            max_altitude_m: max_altitude,
            min_altitude_m: min_altitude,
            max_airspeed_ms: max_airspeed,
            avg_airspeed_ms: airspeed_sum / sample_count as f64,
            max_climb_rate_ms: max_climb,
            max_descent_rate_ms: max_descent,
            phase_durations,
            total_fault_seconds: fault_seconds,
            max_concurrent_faults: max_faults,
            sensor_valid_pct: valid_count as f64 / sample_count as f64 * 100.0,
        };

        log::debug!(
            "Aggregated {} samples: duration={:.1}s, alt=[{:.1}, {:.1}]m, faults={}",
            sample_count,
            stats.duration_secs,
            stats.min_altitude_m,
            stats.max_altitude_m,
            stats.total_fault_seconds
        );

        Ok(stats)
    }
}

impl FlightStatistics {
    /// Render the statistics as a deterministic human-readable report.
    ///
    /// Field order and formatting are a stable output contract; callers
    /// may print or diff this text without further computation.
    pub fn render_report(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();

        out.push_str(&format!("{rule}\nFLIGHT STATISTICS\n{rule}\n"));
        out.push_str(&format!("\nDuration: {:.1} seconds\n", self.duration_secs));

        out.push_str("\nAltitude:\n");
        out.push_str(&format!("  Maximum: {:.1} m\n", self.max_altitude_m));
        out.push_str(&format!("  Minimum: {:.1} m\n", self.min_altitude_m));

        out.push_str("\nAirspeed:\n");
        out.push_str(&format!("  Maximum: {:.1} m/s\n", self.max_airspeed_ms));
        out.push_str(&format!("  Average: {:.1} m/s\n", self.avg_airspeed_ms));

        out.push_str("\nVertical Speed:\n");
        out.push_str(&format!("  Maximum climb: {:.1} m/s\n", self.max_climb_rate_ms));
        out.push_str(&format!("  Maximum descent: {:.1} m/s\n", self.max_descent_rate_ms));

        out.push_str("\nFlight Phases:\n");
        for (phase, duration) in &self.phase_durations {
            out.push_str(&format!("  {phase}: {duration:.1} seconds\n"));
        }

        out.push_str("\nFaults:\n");
        out.push_str(&format!("  Total fault-seconds: {}\n", self.total_fault_seconds));
        out.push_str(&format!(
            "  Maximum concurrent faults: {}\n",
            self.max_concurrent_faults
        ));

        out.push_str("\nSensor Health:\n");
        out.push_str(&format!("  Valid readings: {:.1}%\n", self.sensor_valid_pct));

        out.push_str(&format!("\n{rule}\n"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlightPhase, TelemetrySample};
    use crate::segmenter::PhaseSegmenter;

    fn sample(time: f64, phase: FlightPhase) -> TelemetrySample {
        TelemetrySample {
            time,
            altitude: 100.0,
            airspeed: 50.0,
            vertical_speed: 0.0,
            elevator: 0.0,
            aileron: 0.0,
            rudder: 0.0,
            throttle: 0.5,
            pressure: 1013.25,
            temperature: 15.0,
            active_faults: 0,
            sensor_valid: true,
            flight_phase: phase,
        }
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let result = StatisticsAggregator::aggregate(&TelemetrySeries::default(), &[]);
        assert_eq!(result.unwrap_err(), AnalysisError::EmptySeries);
    }

    #[test]
    fn test_altitude_extremes() {
        let mut samples = vec![
            sample(0.0, FlightPhase::Climb),
            sample(1.0, FlightPhase::Climb),
            sample(2.0, FlightPhase::Descent),
        ];
        samples[0].altitude = 100.0;
        samples[1].altitude = 250.0;
        samples[2].altitude = 80.0;
        let series = TelemetrySeries::new(samples);

        let intervals = PhaseSegmenter::segment(&series).unwrap();
        let stats = StatisticsAggregator::aggregate(&series, &intervals).unwrap();

        assert_eq!(stats.max_altitude_m, 250.0);
        assert_eq!(stats.min_altitude_m, 80.0);
    }

    #[test]
    fn test_airspeed_mean_is_arithmetic_over_samples() {
        let mut samples = vec![
            sample(0.0, FlightPhase::Cruise),
            sample(1.0, FlightPhase::Cruise),
            sample(5.0, FlightPhase::Cruise),
        ];
        samples[0].airspeed = 10.0;
        samples[1].airspeed = 20.0;
        samples[2].airspeed = 60.0;
        let series = TelemetrySeries::new(samples);

        let intervals = PhaseSegmenter::segment(&series).unwrap();
        let stats = StatisticsAggregator::aggregate(&series, &intervals).unwrap();

        // Plain average over sample count, regardless of spacing
        assert_eq!(stats.avg_airspeed_ms, 30.0);
        assert_eq!(stats.max_airspeed_ms, 60.0);
    }

    #[test]
    fn test_recurring_phase_duration_sums_its_runs() {
        // A,A,B,A at t=0..3: A's total is (1-0) + (3-3) = 1, not 3-0
        let a = FlightPhase::Cruise;
        let b = FlightPhase::Emergency;
        let series = TelemetrySeries::new(vec![
            sample(0.0, a.clone()),
            sample(1.0, a.clone()),
            sample(2.0, b),
            sample(3.0, a),
        ]);

        let intervals = PhaseSegmenter::segment(&series).unwrap();
        let stats = StatisticsAggregator::aggregate(&series, &intervals).unwrap();

        assert_eq!(
            stats.phase_durations,
            vec![("CRUISE".to_string(), 1.0), ("EMERGENCY".to_string(), 0.0)]
        );
    }

    #[test]
    fn test_fault_and_sensor_aggregates() {
        let mut samples = vec![
            sample(0.0, FlightPhase::Cruise),
            sample(1.0, FlightPhase::Cruise),
            sample(2.0, FlightPhase::Cruise),
            sample(3.0, FlightPhase::Cruise),
        ];
        samples[1].active_faults = 2;
        samples[2].active_faults = 3;
        samples[2].sensor_valid = false;
        let series = TelemetrySeries::new(samples);

        let intervals = PhaseSegmenter::segment(&series).unwrap();
        let stats = StatisticsAggregator::aggregate(&series, &intervals).unwrap();

        assert_eq!(stats.total_fault_seconds, 5);
        assert_eq!(stats.max_concurrent_faults, 3);
        assert_eq!(stats.sensor_valid_pct, 75.0);
    }

    #[test]
    fn test_single_sample_series() {
        let series = TelemetrySeries::new(vec![sample(7.0, FlightPhase::Preflight)]);
        let intervals = PhaseSegmenter::segment(&series).unwrap();
        let stats = StatisticsAggregator::aggregate(&series, &intervals).unwrap();

        assert_eq!(stats.duration_secs, 0.0);
        assert_eq!(stats.phase_durations, vec![("PREFLIGHT".to_string(), 0.0)]);
        assert_eq!(stats.sensor_valid_pct, 100.0);
    }

    #[test]
    fn test_vertical_speed_extremes() {
        let mut samples = vec![
            sample(0.0, FlightPhase::Climb),
            sample(1.0, FlightPhase::Cruise),
            sample(2.0, FlightPhase::Descent),
        ];
        samples[0].vertical_speed = 8.5;
        samples[1].vertical_speed = 0.2;
        samples[2].vertical_speed = -6.0;
        let series = TelemetrySeries::new(samples);

        let intervals = PhaseSegmenter::segment(&series).unwrap();
        let stats = StatisticsAggregator::aggregate(&series, &intervals).unwrap();

        assert_eq!(stats.max_climb_rate_ms, 8.5);
        assert_eq!(stats.max_descent_rate_ms, -6.0);
    }

    #[test]
    fn test_report_format_is_stable() {
        let stats = FlightStatistics {
            duration_secs: 120.0,
            max_altitude_m: 250.0,
            min_altitude_m: 80.0,
            max_airspeed_ms: 62.5,
            avg_airspeed_ms: 41.0,
            max_climb_rate_ms: 8.0,
            max_descent_rate_ms: -5.5,
            phase_durations: vec![
                ("TAKEOFF".to_string(), 10.0),
                ("CRUISE".to_string(), 110.0),
            ],
            total_fault_seconds: 3,
            max_concurrent_faults: 2,
            sensor_valid_pct: 99.5,
        };

        let report = stats.render_report();
        let expected = "\
============================================================
FLIGHT STATISTICS
============================================================

Duration: 120.0 seconds

Altitude:
  Maximum: 250.0 m
  Minimum: 80.0 m

Airspeed:
  Maximum: 62.5 m/s
  Average: 41.0 m/s

Vertical Speed:
  Maximum climb: 8.0 m/s
  Maximum descent: -5.5 m/s

Flight Phases:
  TAKEOFF: 10.0 seconds
  CRUISE: 110.0 seconds

Faults:
  Total fault-seconds: 3
  Maximum concurrent faults: 2

Sensor Health:
  Valid readings: 99.5%

============================================================
";
        assert_eq!(report, expected);
    }
}
