//! Phase segmentation: run-length encoding of the flight phase column.
//!
//! Walks the series once in time order and emits one interval per
//! maximal contiguous run of samples sharing a phase label. This is
//! deliberately not a group-by on the label value: a phase that recurs
//! later in the flight (CRUISE → EMERGENCY → CRUISE) must produce a
//! separate interval per run, otherwise its duration is mis-measured.

use crate::models::{PhaseInterval, TelemetrySeries};
use crate::pipeline::AnalysisError;

/// Single-pass contiguous-interval detector
pub struct PhaseSegmenter;

impl PhaseSegmenter {
    /// Partition a series into contiguous phase intervals.
    ///
    /// The returned list is ordered by start time, non-overlapping, and
    /// covers `[first.time, last.time]` with no gaps. A single-sample
    /// series yields one zero-duration interval.
    pub fn segment(series: &TelemetrySeries) -> Result<Vec<PhaseInterval>, AnalysisError> {
        let first = series.samples.first().ok_or(AnalysisError::EmptySeries)?;

        let mut intervals: Vec<PhaseInterval> = Vec::new();
        let mut open = PhaseInterval {
            phase: first.flight_phase.clone(),
            start_time: first.time,
            end_time: first.time,
            sample_count: 1,
        };

        let mut time_violations: usize = 0;
        let mut prev_time = first.time;

        for sample in &series.samples[1..] {
            if sample.time < prev_time {
                time_violations += 1;
            }

            if sample.flight_phase == open.phase {
                open.end_time = sample.time;
                open.sample_count += 1;
            } else {
                // Close the run at the previous sample and open a new one
                intervals.push(open);
                open = PhaseInterval {
                    phase: sample.flight_phase.clone(),
                    start_time: sample.time,
                    end_time: sample.time,
                    sample_count: 1,
                };
            }
            prev_time = sample.time;
        }
        intervals.push(open);

        if time_violations > 0 {
            log::warn!(
                "Series time is not monotonic ({} decreasing steps) — interval assignment for mis-ordered samples is undefined",
                time_violations
            );
        }

        log::debug!(
            "Segmentation produced {} intervals over [{:.2}, {:.2}]",
            intervals.len(),
            intervals.first().map(|i| i.start_time).unwrap_or(0.0),
            intervals.last().map(|i| i.end_time).unwrap_or(0.0)
        );

        Ok(intervals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlightPhase, TelemetrySample};

    fn sample(time: f64, phase: FlightPhase) -> TelemetrySample {
        TelemetrySample {
            time,
            altitude: 0.0,
            airspeed: 0.0,
            vertical_speed: 0.0,
            elevator: 0.0,
            aileron: 0.0,
            rudder: 0.0,
            throttle: 0.0,
            pressure: 1013.25,
            temperature: 15.0,
            active_faults: 0,
            sensor_valid: true,
            flight_phase: phase,
        }
    }

    fn series(samples: Vec<TelemetrySample>) -> TelemetrySeries {
        TelemetrySeries::new(samples)
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let result = PhaseSegmenter::segment(&series(vec![]));
        assert_eq!(result.unwrap_err(), AnalysisError::EmptySeries);
    }

    #[test]
    fn test_single_sample_yields_one_zero_width_interval() {
        let intervals =
            PhaseSegmenter::segment(&series(vec![sample(4.2, FlightPhase::Preflight)])).unwrap();

        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].start_time, 4.2);
        assert_eq!(intervals[0].end_time, 4.2);
        assert_eq!(intervals[0].sample_count, 1);
        assert_eq!(intervals[0].duration(), 0.0);
    }

    #[test]
    fn test_recurring_phase_is_not_merged() {
        // A,A,B,A at t=0..3 must yield three intervals, two labeled A
        let a = FlightPhase::Cruise;
        let b = FlightPhase::Emergency;
        let intervals = PhaseSegmenter::segment(&series(vec![
            sample(0.0, a.clone()),
            sample(1.0, a.clone()),
            sample(2.0, b.clone()),
            sample(3.0, a.clone()),
        ]))
        .unwrap();

        assert_eq!(intervals.len(), 3);

        assert_eq!(intervals[0].phase, a);
        assert_eq!((intervals[0].start_time, intervals[0].end_time), (0.0, 1.0));
        assert_eq!(intervals[0].sample_count, 2);

        assert_eq!(intervals[1].phase, b);
        assert_eq!((intervals[1].start_time, intervals[1].end_time), (2.0, 2.0));
        assert_eq!(intervals[1].sample_count, 1);

        assert_eq!(intervals[2].phase, a);
        assert_eq!((intervals[2].start_time, intervals[2].end_time), (3.0, 3.0));
        assert_eq!(intervals[2].sample_count, 1);
    }

    #[test]
    fn test_intervals_cover_series_without_gaps_or_overlap() {
        let phases = [
            FlightPhase::Preflight,
            FlightPhase::Preflight,
            FlightPhase::Takeoff,
            FlightPhase::Climb,
            FlightPhase::Climb,
            FlightPhase::Cruise,
        ];
        let samples: Vec<_> = phases
            .iter()
            .enumerate()
            .map(|(i, p)| sample(i as f64 * 0.5, p.clone()))
            .collect();
        let s = series(samples);

        let intervals = PhaseSegmenter::segment(&s).unwrap();

        assert_eq!(intervals.first().unwrap().start_time, s.samples.first().unwrap().time);
        assert_eq!(intervals.last().unwrap().end_time, s.samples.last().unwrap().time);
        for pair in intervals.windows(2) {
            assert!(pair[0].end_time < pair[1].start_time);
        }
    }

    #[test]
    fn test_sample_counts_sum_to_series_length() {
        let s = series(vec![
            sample(0.0, FlightPhase::Takeoff),
            sample(1.0, FlightPhase::Climb),
            sample(2.0, FlightPhase::Climb),
            sample(3.0, FlightPhase::Cruise),
            sample(4.0, FlightPhase::Cruise),
            sample(5.0, FlightPhase::Cruise),
        ]);

        let intervals = PhaseSegmenter::segment(&s).unwrap();
        let total: usize = intervals.iter().map(|i| i.sample_count).sum();
        assert_eq!(total, s.len());
    }

    #[test]
    fn test_non_monotonic_time_still_produces_a_result() {
        let intervals = PhaseSegmenter::segment(&series(vec![
            sample(0.0, FlightPhase::Climb),
            sample(5.0, FlightPhase::Climb),
            sample(3.0, FlightPhase::Cruise),
        ]))
        .unwrap();

        // Recoverable: a result is produced even with a decreasing step
        assert_eq!(intervals.len(), 2);
    }

    #[test]
    fn test_unknown_phase_labels_segment_normally() {
        let intervals = PhaseSegmenter::segment(&series(vec![
            sample(0.0, FlightPhase::Other("GO_AROUND".into())),
            sample(1.0, FlightPhase::Other("GO_AROUND".into())),
            sample(2.0, FlightPhase::Landing),
        ]))
        .unwrap();

        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].sample_count, 2);
    }
}
