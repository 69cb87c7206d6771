use crate::reports;
use crate::DataArgs;
use clap::Args;
use gbmad::config::DetectorConfig;
use gbmad::granulation::SplittingGranulator;
use gbmad::metrics::roc_auc;
use gbmad::{Detector, GbResult, Report};
use std::fs::File;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub config: DetectorConfig,

    /// Number of top-ranked samples to print
    #[arg(short = 'K', long, default_value_t = 10)]
    pub top: usize,

    /// Write every sample score to this CSV file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Print the full report as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &ScoreArgs, config: &DetectorConfig) -> GbResult<()> {
    let data = args.data.load()?;
    let granulator = SplittingGranulator::new(config.granulation.clone());
    let detector = Detector::new(config.walk.clone());
    let report = detector.detect(&data, &granulator)?;

    if let Some(path) = &args.output {
        write_scores(path, &report)?;
        info!("💾 Wrote {} scores to {}", report.sample_scores.len(), path);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let auc = data
        .labels
        .as_deref()
        .and_then(|labels| roc_auc(&report.sample_scores, labels));

    reports::print_top_samples(&report, args.top, data.labels.as_deref());
    reports::print_walk_summary(&report, auc);
    Ok(())
}

fn write_scores(path: &str, report: &Report) -> GbResult<()> {
    let mut wtr = csv::Writer::from_writer(File::create(path)?);
    wtr.write_record(["sample", "score", "ball"])?;
    for (sample, (score, ball)) in report
        .sample_scores
        .iter()
        .zip(&report.sample_balls)
        .enumerate()
    {
        wtr.write_record([sample.to_string(), score.to_string(), ball.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
