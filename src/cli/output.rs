use clap::ValueEnum;
use colored::Colorize;

use crate::core::models::{AnonymizationResult, Span};
use crate::utils::{single_line, truncate, truncate_or_pad, VALUE_PREVIEW_LEN};

/// Version of the JSON documents the CLI prints
pub const MACHINE_OUTPUT_SCHEMA_VERSION: u32 = 1;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Anonymized text on stdout, colored summary on stderr
    #[default]
    Pretty,
    /// JSON document with text, mappings and stats
    Json,
    /// Anonymized text followed by the plain-text mapping list
    Text,
}

/// Format an anonymization result for stdout
pub fn format_result(result: &AnonymizationResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Pretty => Ok(result.text.clone()),
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "schema_version": MACHINE_OUTPUT_SCHEMA_VERSION,
                "session_id": result.session_id,
                "exported_at": chrono::Utc::now().to_rfc3339(),
                "text": result.text,
                "mappings": result.mapping_entries(),
                "stats": result.stats,
            });
            let mut out = serde_json::to_string_pretty(&doc)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Text => {
            let mut out = result.text.clone();
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&result.to_text());
            Ok(out)
        }
    }
}

/// Colored one-block summary of what was replaced
pub fn format_summary(result: &AnonymizationResult) -> String {
    if result.replacements.is_empty() {
        return format!("{}", "No sensitive values found.".dimmed());
    }

    let mut output = format!(
        "{} {} value(s) replaced\n",
        "✓".green().bold(),
        result.replacements.len().to_string().bold()
    );
    for (kind, count) in &result.stats {
        output.push_str(&format!("  {} {}\n", truncate_or_pad(kind, 20).cyan(), count));
    }
    output
}

/// Format detected spans
pub fn format_spans(spans: &[Span], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "schema_version": MACHINE_OUTPUT_SCHEMA_VERSION,
                "count": spans.len(),
                "spans": spans,
            });
            Ok(serde_json::to_string_pretty(&doc)?)
        }
        OutputFormat::Text => Ok(spans
            .iter()
            .map(|s| format!("{}\t{}\t{}\t{}", s.start, s.end, s.pattern_type, s.value))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Pretty => Ok(format_spans_pretty(spans)),
    }
}

fn format_spans_pretty(spans: &[Span]) -> String {
    if spans.is_empty() {
        return format!("{}", "No sensitive values found.".dimmed());
    }

    let mut output = format!(
        "\n {} │ {} │ {}\n",
        "   OFFSET".dimmed(),
        truncate_or_pad("TYPE", 20).dimmed(),
        "VALUE".dimmed()
    );
    output.push_str(&format!("{}\n", "─".repeat(80).dimmed()));

    for span in spans {
        let offset = format!("{:>9}", span.start);
        let kind = truncate_or_pad(&span.pattern_type.to_string(), 20);
        let kind = if span.pattern_type.is_builtin() {
            kind.yellow()
        } else {
            kind.magenta()
        };
        output.push_str(&format!(
            " {} │ {} │ {}\n",
            offset.dimmed(),
            kind,
            truncate(&single_line(&span.value), VALUE_PREVIEW_LEN)
        ));
    }

    output.push_str(&format!("{}\n", "─".repeat(80).dimmed()));
    output.push_str(&format!("{} span(s)\n", spans.len().to_string().bold()));
    output
}
