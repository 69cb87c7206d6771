use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use gbmad::config::DetectorConfig;
use gbmad::dataset::{Dataset, LoadOptions};
use gbmad::GbResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with walk/granulation parameters. Explicit flags win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every sample and rank the outliers
    Score(cmd::score::ScoreArgs),
    /// Show the granular balls and their anomaly degrees
    Balls(cmd::balls::BallsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    #[arg(short, long)]
    pub data: String,

    #[arg(long, default_value_t = false)]
    pub no_header: bool,

    /// The last column is a 0/1 outlier label
    #[arg(long, default_value_t = false)]
    pub labels: bool,

    #[arg(long, default_value_t = false)]
    pub no_scale: bool,
}

impl DataArgs {
    pub fn load(&self) -> GbResult<Dataset> {
        Dataset::load_csv(
            &self.data,
            LoadOptions {
                has_header: !self.no_header,
                label_column: self.labels,
                scale: !self.no_scale,
            },
        )
    }
}

fn resolve_config(
    cli: &Cli,
    cli_config: &DetectorConfig,
    sub_matches: &clap::ArgMatches,
) -> GbResult<DetectorConfig> {
    let config = match &cli.config {
        Some(path) => {
            info!("⚖️  Loading config from: {}", path);
            let mut file_config = DetectorConfig::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let (cli_config, sub_name) = match &cli.command {
        Commands::Score(args) => (&args.config, "score"),
        Commands::Balls(args) => (&args.config, "balls"),
    };
    let Some(sub_matches) = matches.subcommand_matches(sub_name) else {
        error!("❌ Missing subcommand arguments for '{}'", sub_name);
        process::exit(1);
    };

    let outcome = resolve_config(&cli, cli_config, sub_matches).and_then(|config| {
        match &cli.command {
            Commands::Score(args) => cmd::score::run(args, &config),
            Commands::Balls(args) => cmd::balls::run(args, &config),
        }
    });

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
