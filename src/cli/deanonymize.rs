use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::session::InputArgs;
use crate::core::mapping::MappingStore;

/// Deanonymize command arguments
#[derive(Debug, Args)]
pub struct DeanonymizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Mapping file written by `anonymize --mappings-out`
    #[arg(long)]
    pub mappings: PathBuf,
}

/// Run the deanonymize command
pub fn run(args: DeanonymizeArgs) -> Result<()> {
    let data = std::fs::read_to_string(&args.mappings)
        .with_context(|| format!("Failed to read mappings: {}", args.mappings.display()))?;
    let store = MappingStore::import_json(&data)
        .with_context(|| format!("Invalid mapping file: {}", args.mappings.display()))?;

    let input = args.input.read()?;
    print!("{}", store.restore(&input));

    Ok(())
}
