//! Analysis pipeline orchestration.
//!
//! Runs the three core stages in their required order — phase
//! segmentation, statistics aggregation, chart building — and bundles
//! their outputs. Segmentation must run first because both downstream
//! stages consume its interval list.

use thiserror::Error;

use crate::charts::ChartDataBuilder;
use crate::models::{ChartBundle, FlightStatistics, PhaseInterval, TelemetrySeries};
use crate::segmenter::PhaseSegmenter;
use crate::stats::StatisticsAggregator;

#[derive(Error, Debug, PartialEq)]
pub enum AnalysisError {
    #[error("Telemetry series contains no samples")]
    EmptySeries,
}

/// Everything one analysis run derives from a telemetry series
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub intervals: Vec<PhaseInterval>,
    pub statistics: FlightStatistics,
    pub charts: ChartBundle,
}

/// Run the full analysis pipeline on a recorded series.
///
/// Fails fast with [`AnalysisError::EmptySeries`] on a zero-sample
/// series; no partial results are produced.
pub fn analyze(series: &TelemetrySeries) -> Result<AnalysisReport, AnalysisError> {
    let run_start = std::time::Instant::now();

    let intervals = PhaseSegmenter::segment(series)?;
    log::info!(
        "Segmented {} samples into {} phase intervals",
        series.len(),
        intervals.len()
    );

    let statistics = StatisticsAggregator::aggregate(series, &intervals)?;
    let charts = ChartDataBuilder::build(series, &intervals)?;

    log::info!(
        "Analysis complete in {:.3}s: duration={:.1}s, phases={}, max_alt={:.1}m",
        run_start.elapsed().as_secs_f64(),
        statistics.duration_secs,
        statistics.phase_durations.len(),
        statistics.max_altitude_m
    );

    Ok(AnalysisReport { intervals, statistics, charts })
}
