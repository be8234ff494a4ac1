pub mod anonymize;
pub mod deanonymize;
pub mod detect;
pub mod output;
pub mod patterns;
pub mod presets;
pub mod session;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::logging;

/// Reversible anonymization of sensitive values in log files
#[derive(Debug, Parser)]
#[command(name = "logveil")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replace sensitive values with placeholders
    Anonymize(anonymize::AnonymizeArgs),

    /// Restore original values from a saved mapping file
    Deanonymize(deanonymize::DeanonymizeArgs),

    /// Show what would be replaced, without replacing anything
    Detect(detect::DetectArgs),

    /// List detection patterns in priority order
    Patterns(patterns::PatternsArgs),

    /// List available presets
    Presets(presets::PresetsArgs),
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Anonymize(args) => anonymize::run(args),
        Commands::Deanonymize(args) => deanonymize::run(args),
        Commands::Detect(args) => detect::run(args),
        Commands::Patterns(args) => patterns::run(args),
        Commands::Presets(args) => presets::run(args),
    }
}
