use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kisan", version, about = "Farmer advisory CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run interactive setup
    Init,
    /// Validate config and test data source connections
    Check,
    /// Fetch weather and print today's advisory (the default)
    Advise(AdviseArgs),
}

#[derive(Debug, clap::Args, Default)]
pub struct AdviseArgs {
    /// Location to advise for (falls back to the configured default)
    pub location: Option<String>,

    /// Crop name, free text (e.g. "Rice")
    #[arg(long)]
    pub crop: Option<String>,

    /// Crop growth stage: sowing, vegetative, flowering, maturity, harvest,
    /// preparation
    #[arg(long)]
    pub stage: Option<String>,

    /// Print the advisory as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Add a natural-language explanation (requires enrichment config)
    #[arg(long)]
    pub explain: bool,
}
