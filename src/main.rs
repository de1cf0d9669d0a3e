//! Flight Analyzer - CLI
//!
//! Loads a recorded telemetry CSV, prints the flight statistics report,
//! and writes the four chart payloads as JSON files for a charting
//! frontend to render.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use flight_analyzer_lib::{analyze, AnalysisReport, TelemetryParser};

#[derive(Parser)]
#[command(name = "flight-analyzer")]
#[command(about = "Post-flight analysis of recorded avionics telemetry")]
#[command(version)]
struct Cli {
    /// Path to the telemetry CSV recording
    telemetry_file: PathBuf,

    /// Directory for the chart payload JSON files
    #[arg(long, default_value = "plots")]
    output: PathBuf,

    /// Print the statistics report only, without writing chart payloads
    #[arg(long)]
    report_only: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let series = TelemetryParser::parse_file(&cli.telemetry_file)
        .with_context(|| format!("Failed to load {:?}", cli.telemetry_file))?;
    println!("Loaded {} data points from {:?}", series.len(), cli.telemetry_file);

    let report = analyze(&series).context("Analysis failed")?;

    print!("{}", report.statistics.render_report());

    if !cli.report_only {
        write_chart_payloads(&report, &cli.output)?;
        println!("Chart payloads written to {:?}", cli.output);
    }

    Ok(())
}

/// Serialize the four chart payloads as pretty-printed JSON files
fn write_chart_payloads(report: &AnalysisReport, output_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {output_dir:?}"))?;

    write_json(&output_dir.join("flight_profile.json"), &report.charts.flight_profile)?;
    write_json(&output_dir.join("control_surfaces.json"), &report.charts.control_surfaces)?;
    write_json(&output_dir.join("sensor_data.json"), &report.charts.sensor_data)?;
    write_json(&output_dir.join("phase_timeline.json"), &report.charts.phase_timeline)?;

    Ok(())
}

fn write_json<T: Serialize>(path: &Path, payload: &T) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {path:?}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), payload)
        .with_context(|| format!("Failed to write {path:?}"))?;
    log::debug!("Wrote {:?}", path);
    Ok(())
}
