use clap::{Args, Parser, Subcommand};
use spritematch::ProjectLayout;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod pipeline;
mod render;

use config::{Config, FormatConfig, LayoutConfig, MetricConfig, Settings, SuppressionConfig};

const SCHEMA_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Locate sprites in level images and write level-editor annotations"
)]
struct Cli {
    /// Log per-scale and per-sprite details.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match every sprite against every level.
    Run(RunArgs),
    /// Create the Levels/Sprites/Data directory skeleton.
    Setup(SetupArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Directory of level images.
    #[arg(value_name = "LEVELS")]
    levels: Option<PathBuf>,
    /// Directory of sprite images.
    #[arg(value_name = "SPRITES")]
    sprites: Option<PathBuf>,
    /// Directory for annotation text files.
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,
    /// Optional JSON configuration file; flags override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory skeleton used for unset paths.
    #[arg(long, value_enum)]
    layout: Option<LayoutConfig>,
    /// Retry sprites not found at native size with the width sweep.
    #[arg(long)]
    multiscale: bool,
    /// Minimum correlation score for a match.
    #[arg(long)]
    threshold: Option<f32>,
    /// Similarity metric.
    #[arg(long, value_enum)]
    metric: Option<MetricConfig>,
    /// Overlap suppression policy.
    #[arg(long, value_enum)]
    suppression: Option<SuppressionConfig>,
    /// Annotation line format.
    #[arg(long, value_enum)]
    format: Option<FormatConfig>,
    /// Skip writing annotated level copies.
    #[arg(long)]
    no_overlay: bool,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
}

#[derive(Args, Debug)]
struct SetupArgs {
    /// Directory skeleton to create.
    #[arg(long, value_enum, default_value_t = LayoutConfig::Unity)]
    layout: LayoutConfig,
    /// Directory to create the skeleton in.
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,
}

impl RunArgs {
    fn into_config(self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
            None => Config::default(),
        };
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if self.levels.is_some() {
            config.levels_path = self.levels;
        }
        if self.sprites.is_some() {
            config.sprites_path = self.sprites;
        }
        if self.data.is_some() {
            config.data_path = self.data;
        }
        config.multiscale |= self.multiscale;
        if let Some(threshold) = self.threshold {
            config.match_cfg.threshold = threshold;
        }
        if let Some(metric) = self.metric {
            config.match_cfg.metric = metric;
        }
        if let Some(suppression) = self.suppression {
            config.match_cfg.suppression = suppression;
        }
        if let Some(format) = self.format {
            config.annotation.format = format;
        }
        if self.no_overlay {
            config.overlay.enabled = false;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(format!("spritematch={level}").parse()?),
        )
        .with_target(false)
        .init();

    match cli.command {
        Command::Run(args) => {
            if args.print_schema {
                println!("{SCHEMA_JSON}");
                return Ok(());
            }
            if args.print_example {
                println!("{EXAMPLE_JSON}");
                return Ok(());
            }
            let settings = Settings::resolve(args.into_config()?, &PathBuf::from("."));
            let summary = pipeline::run(&settings)?;
            info!(
                levels = summary.levels,
                sprites = summary.sprites,
                matches = summary.matches,
                "run complete"
            );
        }
        Command::Setup(args) => {
            let layout = ProjectLayout::new(&args.root, args.layout.into());
            layout.ensure()?;
            info!(
                levels = %layout.levels.display(),
                sprites = %layout.sprites.display(),
                data = %layout.data.display(),
                "directory skeleton ready"
            );
        }
    }

    Ok(())
}
