//! Arguments shared by the commands that scan text, and the session they build.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::config::{LogveilConfig, Preset};
use crate::core::anonymizer::{Anonymizer, PresetReport};

/// Where the text comes from
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Text to process
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File to process (stdin is read when neither --text nor --file is given)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    pub fn read(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file: {}", path.display()));
        }

        if atty::is(atty::Stream::Stdin) {
            anyhow::bail!("No input: pass --text, --file, or pipe text on stdin");
        }

        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    }
}

/// How to configure the anonymization session
#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Preset id (built-in or from the config file)
    #[arg(long, conflicts_with = "preset_file")]
    pub preset: Option<String>,

    /// Preset definition file (JSON or TOML)
    #[arg(long)]
    pub preset_file: Option<PathBuf>,

    /// Value to leave untouched (repeatable)
    #[arg(long = "preserve", value_name = "VALUE")]
    pub preserve: Vec<String>,

    /// Enable an enhancer by name (repeatable)
    #[arg(long = "enhancer", value_name = "NAME")]
    pub enhancers: Vec<String>,

    /// Config file to use instead of .logveil.toml / the global config
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SessionArgs {
    pub fn load_config(&self) -> Result<LogveilConfig> {
        match &self.config {
            Some(path) => LogveilConfig::load_from_file(path),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                LogveilConfig::load(&cwd)
            }
        }
    }

    fn resolve_preset(&self, config: &LogveilConfig) -> Result<Preset> {
        if let Some(path) = &self.preset_file {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read preset file: {}", path.display()))?;
            return Preset::parse(&data)
                .with_context(|| format!("Invalid preset file: {}", path.display()));
        }

        let id = self.preset.as_deref().unwrap_or(&config.default_preset);
        Ok(config.preset(id)?)
    }

    /// Build the session described by the config file and these arguments
    pub fn build(&self) -> Result<Anonymizer> {
        let config = self.load_config()?;
        let preset = self.resolve_preset(&config)?;

        let (mut anonymizer, report) = Anonymizer::with_preset(&preset);
        print_report_warnings(&preset, &report);

        for (name, enhancer_config) in &config.enhancers {
            anonymizer.set_enhancer_enabled(
                name,
                enhancer_config.enabled,
                Some(enhancer_config.clone()),
            );
        }
        for name in &self.enhancers {
            let enhancer_config = config.enhancers.get(name).cloned();
            anonymizer.set_enhancer_enabled(name, true, enhancer_config);
        }
        for value in &self.preserve {
            anonymizer.add_preserve_value(value.clone());
        }

        Ok(anonymizer)
    }
}

fn print_report_warnings(preset: &Preset, report: &PresetReport) {
    for id in &report.unknown_patterns {
        eprintln!(
            "{} preset '{}' names unknown pattern '{}' (ignored)",
            "Warning:".yellow(),
            preset.id,
            id
        );
    }
    for err in &report.rejected {
        eprintln!("{} {}", "Warning:".yellow(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_input() {
        let input = InputArgs {
            text: Some("hello".to_string()),
            file: None,
        };
        assert_eq!(input.read().unwrap(), "hello");
    }

    #[test]
    fn test_read_file_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "line one\n").unwrap();

        let input = InputArgs {
            text: None,
            file: Some(path),
        };
        assert_eq!(input.read().unwrap(), "line one\n");
    }

    #[test]
    fn test_missing_file_has_context() {
        let input = InputArgs {
            text: None,
            file: Some(PathBuf::from("/nonexistent/logveil/input.log")),
        };
        let err = input.read().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read input file"));
    }

    #[test]
    fn test_build_from_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
default_preset = "net"

[[presets]]
id = "net"
patterns = ["ipv4"]
preserve = ["10.0.0.1"]

[enhancers.dictionary]
enabled = true
settings = { terms = ["Alice"], label = "PERSON" }
"#,
        )
        .unwrap();

        let args = SessionArgs {
            config: Some(config_path),
            preserve: vec!["10.0.0.2".to_string()],
            ..SessionArgs::default()
        };
        let mut anonymizer = args.build().unwrap();
        let result = anonymizer.anonymize("Alice: 10.0.0.1 10.0.0.2 10.0.0.3 a@b.io");
        assert_eq!(result.text, "[PERSON_001]: 10.0.0.1 10.0.0.2 [IP_001] a@b.io");
    }

    #[test]
    fn test_build_with_preset_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();
        let preset_path = dir.path().join("preset.json");
        std::fs::write(&preset_path, r#"{"id": "mail", "patterns": ["email"]}"#).unwrap();

        let args = SessionArgs {
            config: Some(config_path),
            preset_file: Some(preset_path),
            ..SessionArgs::default()
        };
        let mut anonymizer = args.build().unwrap();
        assert_eq!(
            anonymizer.anonymize("a@b.io 10.0.0.1").text,
            "[EMAIL_001] 10.0.0.1"
        );
    }

    #[test]
    fn test_unknown_preset_is_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let args = SessionArgs {
            config: Some(config_path),
            preset: Some("does-not-exist".to_string()),
            ..SessionArgs::default()
        };
        let err = args.build().unwrap_err();
        assert!(err.to_string().contains("does-not-exist"));
    }
}
