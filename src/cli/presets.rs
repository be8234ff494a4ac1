use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::output::MACHINE_OUTPUT_SCHEMA_VERSION;
use super::session::SessionArgs;
use crate::config::preset::BUILTIN_PRESET_IDS;
use crate::config::Preset;
use crate::utils::truncate_or_pad;

/// Presets command arguments
#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Show a single preset in full
    pub id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Config file to use instead of .logveil.toml / the global config
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}

/// Run the presets command
pub fn run(args: PresetsArgs) -> Result<()> {
    let session = SessionArgs {
        config: args.config.clone(),
        ..SessionArgs::default()
    };
    let config = session.load_config()?;

    if let Some(id) = &args.id {
        let preset = config.preset(id)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&preset)?);
        } else {
            print!("{}", format_detail(&preset));
        }
        return Ok(());
    }

    let presets = config.all_presets();
    if args.json {
        let doc = serde_json::json!({
            "schema_version": MACHINE_OUTPUT_SCHEMA_VERSION,
            "default_preset": config.default_preset,
            "presets": presets,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print!("{}", format_list(&presets, &config.default_preset));
    Ok(())
}

fn format_list(presets: &[Preset], default_id: &str) -> String {
    let mut output = String::from("\n");
    for preset in presets {
        let marker = if preset.id == default_id {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        let origin = if BUILTIN_PRESET_IDS.contains(&preset.id.as_str()) {
            truncate_or_pad("built-in", 8).dimmed()
        } else {
            truncate_or_pad("config", 8).cyan()
        };
        output.push_str(&format!(
            " {} {} {} {} patterns  {}\n",
            marker,
            truncate_or_pad(&preset.id, 12).yellow(),
            origin,
            format!("{:>2}", preset.patterns.len()).bold(),
            preset.description.as_deref().unwrap_or("")
        ));
    }
    output
}

fn format_detail(preset: &Preset) -> String {
    let mut output = format!("{} {}\n", preset.id.yellow().bold(), preset.name.dimmed());
    if let Some(description) = &preset.description {
        output.push_str(&format!("  {}\n", description));
    }
    output.push_str(&format!("  Patterns: {}\n", preset.patterns.join(", ")));
    if !preset.preserve.is_empty() {
        output.push_str(&format!("  Preserve: {}\n", preset.preserve.join(", ")));
    }
    for custom in &preset.custom_patterns {
        output.push_str(&format!(
            "  Custom:   {} {}\n",
            format!("[{}_NNN]", custom.prefix.to_ascii_uppercase()).cyan(),
            custom.regex
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::preset;

    #[test]
    fn test_list_marks_default() {
        colored::control::set_override(false);
        let text = format_list(&preset::builtin_presets(), "ansible");
        let ansible = text.lines().find(|l| l.contains("ansible")).unwrap();
        assert!(ansible.trim_start().starts_with('*'));
        assert!(text.contains("kubernetes"));
    }

    #[test]
    fn test_detail_shows_custom_patterns() {
        colored::control::set_override(false);
        let aws = preset::builtin("aws").unwrap();
        let text = format_detail(&aws);
        assert!(text.contains("[AWS_KEY_NNN]"));
        assert!(text.contains("Patterns: ipv4"));
    }
}
