use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::output::{format_result, format_summary, OutputFormat};
use super::session::SessionArgs;

/// Anonymize command arguments
#[derive(Debug, Args)]
pub struct AnonymizeArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Write the session mappings here (needed to deanonymize later)
    #[arg(long)]
    pub mappings_out: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Run the anonymize command
pub fn run(args: AnonymizeArgs) -> Result<()> {
    let input = args.session.input.read()?;
    let mut anonymizer = args.session.build()?;

    let result = anonymizer.anonymize(&input);
    let rendered = format_result(&result, args.format)?;
    print!("{}", rendered);

    if let Some(path) = &args.mappings_out {
        let export = anonymizer
            .mappings()
            .export_json()
            .context("Failed to serialize mappings")?;
        std::fs::write(path, export)
            .with_context(|| format!("Failed to write mappings: {}", path.display()))?;
    }

    if args.format == OutputFormat::Pretty {
        eprint!("{}", format_summary(&result));
        match &args.mappings_out {
            Some(path) => eprintln!("  Mappings saved to {}", path.display().to_string().cyan()),
            None if !result.replacements.is_empty() => eprintln!(
                "  {} pass --mappings-out to be able to restore the originals",
                "Note:".yellow()
            ),
            None => {}
        }
    }

    Ok(())
}
