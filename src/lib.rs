pub mod charts;
pub mod models;
pub mod pipeline;
pub mod segmenter;
pub mod stats;
pub mod telemetry_parser;

pub use charts::ChartDataBuilder;
pub use models::*;
pub use pipeline::{analyze, AnalysisError, AnalysisReport};
pub use segmenter::PhaseSegmenter;
pub use stats::StatisticsAggregator;
pub use telemetry_parser::{ParserError, TelemetryParser};
