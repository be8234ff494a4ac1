//! Data model shared by detection, resolution and substitution

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Built-in categories of sensitive data.
///
/// Declaration order is priority order: earlier variants win ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinPattern {
    PrivateKey,
    Jwt,
    ConnectionString,
    ApiKey,
    Url,
    Email,
    Ipv6,
    Ipv4,
    Hostname,
    Path,
    Mac,
    Uuid,
    Phone,
    CreditCard,
    Iban,
    Ssn,
    Username,
    ServerName,
    Date,
}

impl BuiltinPattern {
    /// Every built-in pattern, highest priority first
    pub const ALL: [BuiltinPattern; 19] = [
        BuiltinPattern::PrivateKey,
        BuiltinPattern::Jwt,
        BuiltinPattern::ConnectionString,
        BuiltinPattern::ApiKey,
        BuiltinPattern::Url,
        BuiltinPattern::Email,
        BuiltinPattern::Ipv6,
        BuiltinPattern::Ipv4,
        BuiltinPattern::Hostname,
        BuiltinPattern::Path,
        BuiltinPattern::Mac,
        BuiltinPattern::Uuid,
        BuiltinPattern::Phone,
        BuiltinPattern::CreditCard,
        BuiltinPattern::Iban,
        BuiltinPattern::Ssn,
        BuiltinPattern::Username,
        BuiltinPattern::ServerName,
        BuiltinPattern::Date,
    ];

    /// Stable identifier used in presets and exports
    pub fn id(self) -> &'static str {
        match self {
            BuiltinPattern::PrivateKey => "private_key",
            BuiltinPattern::Jwt => "jwt",
            BuiltinPattern::ConnectionString => "connection_string",
            BuiltinPattern::ApiKey => "api_key",
            BuiltinPattern::Url => "url",
            BuiltinPattern::Email => "email",
            BuiltinPattern::Ipv6 => "ipv6",
            BuiltinPattern::Ipv4 => "ipv4",
            BuiltinPattern::Hostname => "hostname",
            BuiltinPattern::Path => "path",
            BuiltinPattern::Mac => "mac",
            BuiltinPattern::Uuid => "uuid",
            BuiltinPattern::Phone => "phone",
            BuiltinPattern::CreditCard => "credit_card",
            BuiltinPattern::Iban => "iban",
            BuiltinPattern::Ssn => "ssn",
            BuiltinPattern::Username => "username",
            BuiltinPattern::ServerName => "server_name",
            BuiltinPattern::Date => "date",
        }
    }

    /// Placeholder prefix, e.g. `IP` in `[IP_001]`
    pub fn prefix(self) -> &'static str {
        match self {
            BuiltinPattern::PrivateKey => "PRIVKEY",
            BuiltinPattern::Jwt => "TOKEN",
            BuiltinPattern::ConnectionString => "CONNSTR",
            BuiltinPattern::ApiKey => "KEY",
            BuiltinPattern::Url => "URL",
            BuiltinPattern::Email => "EMAIL",
            BuiltinPattern::Ipv6 => "IPV6",
            BuiltinPattern::Ipv4 => "IP",
            BuiltinPattern::Hostname => "HOST",
            BuiltinPattern::Path => "PATH",
            BuiltinPattern::Mac => "MAC",
            BuiltinPattern::Uuid => "UUID",
            BuiltinPattern::Phone => "PHONE",
            BuiltinPattern::CreditCard => "CC",
            BuiltinPattern::Iban => "IBAN",
            BuiltinPattern::Ssn => "SSN",
            BuiltinPattern::Username => "USER",
            BuiltinPattern::ServerName => "SERVER",
            BuiltinPattern::Date => "DATE",
        }
    }

    /// Priority rank, 1 is the highest. No two built-ins share a rank.
    pub fn priority(self) -> u32 {
        self as u32 + 1
    }

    /// Human description for pattern listings
    pub fn description(self) -> &'static str {
        match self {
            BuiltinPattern::PrivateKey => "PEM private key blocks",
            BuiltinPattern::Jwt => "JSON Web Tokens",
            BuiltinPattern::ConnectionString => "Database connection strings (ADO, JDBC, URI)",
            BuiltinPattern::ApiKey => "API keys, tokens and password assignments",
            BuiltinPattern::Url => "http(s) URLs",
            BuiltinPattern::Email => "Email addresses",
            BuiltinPattern::Ipv6 => "IPv6 addresses",
            BuiltinPattern::Ipv4 => "IPv4 addresses and CIDR blocks",
            BuiltinPattern::Hostname => "Fully qualified hostnames",
            BuiltinPattern::Path => "Unix and Windows file paths",
            BuiltinPattern::Mac => "MAC addresses",
            BuiltinPattern::Uuid => "UUIDs",
            BuiltinPattern::Phone => "Phone numbers (international, FR, US)",
            BuiltinPattern::CreditCard => "Credit card numbers (Luhn checked)",
            BuiltinPattern::Iban => "IBAN account numbers (checksum verified)",
            BuiltinPattern::Ssn => "Social security numbers (US, FR)",
            BuiltinPattern::Username => "Usernames in log lines",
            BuiltinPattern::ServerName => "Server and machine names",
            BuiltinPattern::Date => "Calendar dates",
        }
    }

    /// Parse a preset identifier, accepting legacy aliases
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_ascii_lowercase();
        let found = match id.as_str() {
            "path_unix" | "path_windows" => BuiltinPattern::Path,
            "mac_address" => BuiltinPattern::Mac,
            "ip" => BuiltinPattern::Ipv4,
            "host" => BuiltinPattern::Hostname,
            other => return Self::ALL.iter().copied().find(|p| p.id() == other),
        };
        Some(found)
    }
}

impl fmt::Display for BuiltinPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The category a span was detected as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PatternType {
    Builtin(BuiltinPattern),
    /// Caller-defined pattern, identified by its placeholder prefix
    Custom(String),
    /// Span contributed by an enhancer, identified by its label
    Entity(String),
}

impl PatternType {
    /// Placeholder prefix for this type
    pub fn prefix(&self) -> String {
        match self {
            PatternType::Builtin(b) => b.prefix().to_string(),
            PatternType::Custom(prefix) => prefix.clone(),
            PatternType::Entity(label) => entity_prefix(label),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, PatternType::Builtin(_))
    }
}

impl From<BuiltinPattern> for PatternType {
    fn from(b: BuiltinPattern) -> Self {
        PatternType::Builtin(b)
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternType::Builtin(b) => f.write_str(b.id()),
            PatternType::Custom(prefix) => write!(f, "custom:{}", prefix),
            PatternType::Entity(label) => write!(f, "entity:{}", label),
        }
    }
}

impl From<PatternType> for String {
    fn from(t: PatternType) -> Self {
        t.to_string()
    }
}

impl TryFrom<String> for PatternType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if let Some(prefix) = s.strip_prefix("custom:") {
            return Ok(PatternType::Custom(prefix.to_string()));
        }
        if let Some(label) = s.strip_prefix("entity:") {
            return Ok(PatternType::Entity(label.to_string()));
        }
        BuiltinPattern::from_id(&s)
            .map(PatternType::Builtin)
            .ok_or_else(|| format!("unknown pattern type '{}'", s))
    }
}

/// Map an enhancer label onto a placeholder prefix
pub fn entity_prefix(label: &str) -> String {
    match label.to_ascii_uppercase().as_str() {
        "PERSON" | "PER" => "PERSON".to_string(),
        "ORGANIZATION" | "ORGANISATION" | "ORG" => "ORG".to_string(),
        "LOCATION" | "LOC" | "GPE" => "LOC".to_string(),
        other => {
            let cleaned: String = other
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect();
            let cleaned = cleaned.trim_matches('_');
            if cleaned.is_empty() {
                "ENTITY".to_string()
            } else {
                cleaned.to_string()
            }
        }
    }
}

/// A detected region of text.
///
/// `start..end` are byte offsets of the extracted value, which may be a
/// sub-capture of the full match kept in `matched`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub pattern_type: PatternType,
    /// Rank used for tie-breaking, lower wins
    pub priority: u32,
    pub matched: String,
    pub value: String,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True if this span covers all of `other`
    pub fn encloses(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

/// One applied substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub span: Span,
    pub placeholder: String,
}

/// Exportable view of a substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub pattern_type: PatternType,
    pub original: String,
    pub placeholder: String,
}

/// Outcome of one `anonymize` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// Session the placeholders belong to
    pub session_id: String,
    pub text: String,
    /// Applied substitutions, in original left-to-right order
    pub replacements: Vec<Replacement>,
    /// Replacement count per pattern type
    pub stats: BTreeMap<String, usize>,
}

impl AnonymizationResult {
    /// Ordered {pattern type, original, placeholder} list, one per span
    pub fn mapping_entries(&self) -> Vec<MappingEntry> {
        self.replacements
            .iter()
            .map(|r| MappingEntry {
                pattern_type: r.span.pattern_type.clone(),
                original: r.span.value.clone(),
                placeholder: r.placeholder.clone(),
            })
            .collect()
    }

    /// JSON export of the mapping list
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&serde_json::json!({
            "session_id": self.session_id,
            "exported_at": chrono::Utc::now().to_rfc3339(),
            "replacement_count": self.replacements.len(),
            "mappings": self.mapping_entries(),
            "stats": self.stats,
        }))
    }

    /// Plain-text export of the mapping list
    pub fn to_text(&self) -> String {
        let mut out = String::from("# Mapping list (placeholder -> original)\n");
        for entry in self.mapping_entries() {
            out.push_str(&format!(
                "{}\t{}\t{}\n",
                entry.placeholder, entry.pattern_type, entry.original
            ));
        }
        out
    }
}
