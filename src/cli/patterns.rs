use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::output::MACHINE_OUTPUT_SCHEMA_VERSION;
use crate::core::models::BuiltinPattern;
use crate::enhancers::{EnhancerRegistry, EnhancerStatus};
use crate::patterns::{PatternCatalog, CUSTOM_PRIORITY};
use crate::utils::truncate_or_pad;

/// Patterns command arguments
#[derive(Debug, Args)]
pub struct PatternsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PatternRow {
    priority: u32,
    id: &'static str,
    prefix: &'static str,
    description: &'static str,
}

fn pattern_rows() -> Vec<PatternRow> {
    PatternCatalog::builtin()
        .definitions()
        .iter()
        .filter_map(|d| d.builtin_kind())
        .map(|kind: BuiltinPattern| PatternRow {
            priority: kind.priority(),
            id: kind.id(),
            prefix: kind.prefix(),
            description: kind.description(),
        })
        .collect()
}

/// Run the patterns command
pub fn run(args: PatternsArgs) -> Result<()> {
    let rows = pattern_rows();
    let enhancers = EnhancerRegistry::with_defaults().statuses();

    if args.json {
        let doc = serde_json::json!({
            "schema_version": MACHINE_OUTPUT_SCHEMA_VERSION,
            "patterns": rows,
            "enhancers": enhancers,
            "custom_default_priority": CUSTOM_PRIORITY,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print!("{}", format_pretty(&rows, &enhancers));
    Ok(())
}

fn format_pretty(rows: &[PatternRow], enhancers: &[EnhancerStatus]) -> String {
    let mut output = format!(
        "\n {} │ {} │ {} │ {}\n",
        "PRIO".dimmed(),
        truncate_or_pad("PATTERN", 18).dimmed(),
        truncate_or_pad("PLACEHOLDER", 14).dimmed(),
        "DESCRIPTION".dimmed()
    );
    output.push_str(&format!("{}\n", "─".repeat(85).dimmed()));

    for row in rows {
        output.push_str(&format!(
            " {:>4} │ {} │ {} │ {}\n",
            row.priority,
            truncate_or_pad(row.id, 18).yellow(),
            truncate_or_pad(&format!("[{}_001]", row.prefix), 14).cyan(),
            row.description
        ));
    }
    for status in enhancers {
        output.push_str(&format!(
            " {:>4} │ {} │ {} │ {}\n",
            status.priority,
            truncate_or_pad(&status.name, 18).magenta(),
            truncate_or_pad("(label)", 14).dimmed(),
            "Enhancer, off unless enabled".dimmed()
        ));
    }
    output.push_str(&format!(
        " {:>4} │ {} │ {} │ {}\n",
        CUSTOM_PRIORITY,
        truncate_or_pad("custom", 18).magenta(),
        truncate_or_pad("(prefix)", 14).dimmed(),
        "Custom patterns, unless a priority is pinned".dimmed()
    ));

    output
}
