use anyhow::Result;
use clap::Args;

use super::output::{format_spans, OutputFormat};
use super::session::SessionArgs;

/// Detect command arguments
#[derive(Debug, Args)]
pub struct DetectArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Run the detect command
pub fn run(args: DetectArgs) -> Result<()> {
    let input = args.session.input.read()?;
    let anonymizer = args.session.build()?;

    let spans = anonymizer.detect(&input);
    println!("{}", format_spans(&spans, args.format)?);

    Ok(())
}
