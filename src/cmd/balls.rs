use crate::reports;
use crate::DataArgs;
use clap::Args;
use gbmad::config::DetectorConfig;
use gbmad::granulation::SplittingGranulator;
use gbmad::{Detector, GbResult};

#[derive(Args, Debug, Clone)]
pub struct BallsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub config: DetectorConfig,
}

pub fn run(args: &BallsArgs, config: &DetectorConfig) -> GbResult<()> {
    let data = args.data.load()?;
    let granulator = SplittingGranulator::new(config.granulation.clone());
    let report = Detector::new(config.walk.clone()).detect(&data, &granulator)?;

    reports::print_balls(&report);
    reports::print_walk_summary(&report, None);
    Ok(())
}
