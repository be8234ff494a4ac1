//! Named bundles of enabled patterns, preserve values and custom patterns

use serde::{Deserialize, Serialize};

use crate::core::models::BuiltinPattern;
use crate::error::PresetError;
use crate::patterns::CustomPattern;

/// A preset definition.
///
/// `patterns` is required; everything else defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Pattern identifiers to enable; unknown ids are ignored with a warning
    pub patterns: Vec<String>,
    /// Literal values that are never replaced
    #[serde(default)]
    pub preserve: Vec<String>,
    #[serde(default)]
    pub custom_patterns: Vec<CustomPattern>,
}

impl Preset {
    pub fn new(id: impl Into<String>, patterns: &[BuiltinPattern]) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: None,
            patterns: patterns.iter().map(|p| p.id().to_string()).collect(),
            preserve: Vec::new(),
            custom_patterns: Vec::new(),
        }
    }

    pub fn from_json(data: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn from_toml(data: &str) -> Result<Self, PresetError> {
        Ok(toml::from_str(data)?)
    }

    /// Parse by content: JSON if it starts with `{`, TOML otherwise
    pub fn parse(data: &str) -> Result<Self, PresetError> {
        if data.trim_start().starts_with('{') {
            Self::from_json(data)
        } else {
            Self::from_toml(data)
        }
    }

    /// Split `patterns` into recognised built-ins and unknown identifiers
    pub fn resolve_patterns(&self) -> (Vec<BuiltinPattern>, Vec<String>) {
        let mut known = Vec::new();
        let mut unknown = Vec::new();
        for id in &self.patterns {
            match BuiltinPattern::from_id(id) {
                Some(kind) => {
                    if !known.contains(&kind) {
                        known.push(kind);
                    }
                }
                None => unknown.push(id.clone()),
            }
        }
        (known, unknown)
    }

    fn describe(mut self, name: &str, description: &str) -> Self {
        self.name = name.to_string();
        self.description = Some(description.to_string());
        self
    }

    fn preserving(mut self, values: &[&str]) -> Self {
        self.preserve = values.iter().map(|v| v.to_string()).collect();
        self
    }

    fn with_custom(mut self, regex: &str, prefix: &str) -> Self {
        self.custom_patterns.push(CustomPattern::new(regex, prefix));
        self
    }
}

/// Identifiers of the presets shipped with the crate
pub const BUILTIN_PRESET_IDS: [&str; 8] = [
    "default",
    "minimal",
    "ansible",
    "apache",
    "kubernetes",
    "aws",
    "database",
    "security",
];

/// Look up a shipped preset by id
pub fn builtin(id: &str) -> Option<Preset> {
    use BuiltinPattern::*;

    let preset = match id {
        "default" => Preset::new(id, &BuiltinPattern::ALL)
            .describe("Default", "Every built-in pattern"),
        "minimal" => Preset::new(id, &[Ipv4, Ipv6, Email, Hostname])
            .describe("Minimal", "Network identities and e-mail only"),
        "ansible" => Preset::new(
            id,
            &[
                Ipv4, Ipv6, Hostname, ServerName, Username, Path, Email, ApiKey, PrivateKey,
            ],
        )
        .describe("Ansible", "Playbook output: hosts, users, paths and secrets")
        .preserving(&["localhost", "127.0.0.1"]),
        "apache" => Preset::new(id, &[Ipv4, Ipv6, Hostname, Url, Email, Path, Username, Date])
            .describe("Apache", "Access and error logs"),
        "kubernetes" => Preset::new(
            id,
            &[
                Ipv4, Ipv6, Hostname, Url, Uuid, Jwt, ApiKey, PrivateKey, ServerName,
            ],
        )
        .describe("Kubernetes", "Pod logs and cluster events")
        .with_custom(r"\b([a-z0-9]+(?:-[a-z0-9]+)*-[a-f0-9]{8,10}-[a-z0-9]{5})\b", "POD")
        .with_custom(r"\bnamespace[=:]\s*([a-z0-9-]+)", "NAMESPACE"),
        "aws" => Preset::new(id, &[Ipv4, Hostname, Url, ApiKey, Uuid, Email])
            .describe("AWS", "CloudTrail and service logs")
            .with_custom(r"\b((?:AKIA|ASIA)[0-9A-Z]{16})\b", "AWS_KEY")
            .with_custom(r"\barn:aws[a-z-]*:[a-z0-9-]+:[a-z0-9-]*:[0-9]{12}:[^\s]+", "ARN")
            .with_custom(r"\b(i-[0-9a-f]{8,17})\b", "INSTANCE"),
        "database" => Preset::new(
            id,
            &[
                ConnectionString, Ipv4, Hostname, Email, Username, ApiKey, CreditCard, Iban,
                Ssn, Phone,
            ],
        )
        .describe("Database", "Query logs and connection errors"),
        "security" => Preset::new(
            id,
            &[
                PrivateKey, Jwt, ApiKey, ConnectionString, CreditCard, Iban, Ssn, Email, Ipv4,
                Ipv6,
            ],
        )
        .describe("Security", "Credentials and personal data"),
        _ => return None,
    };

    Some(preset)
}

/// Every shipped preset, in listing order
pub fn builtin_presets() -> Vec<Preset> {
    BUILTIN_PRESET_IDS.iter().filter_map(|id| builtin(id)).collect()
}
