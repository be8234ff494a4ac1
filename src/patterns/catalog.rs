//! Pattern catalog: compiled matchers, priorities and placeholder prefixes.
//!
//! A catalog is immutable once built. Adding a custom pattern produces a new
//! catalog value; sessions never share mutable pattern state.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::builtin;
use super::validators::{self, Validator};
use crate::core::models::{BuiltinPattern, PatternType};
use crate::error::PatternError;

/// Default priority for custom patterns: below every built-in and enhancer
pub const CUSTOM_PRIORITY: u32 = 1000;

/// Caller-supplied pattern, as found in presets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    pub regex: String,
    pub prefix: String,
    /// Pin a priority instead of ranking below all built-ins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Capture group holding the value; defaults to the first non-empty group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<usize>,
}

impl CustomPattern {
    pub fn new(regex: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            prefix: prefix.into(),
            priority: None,
            group: None,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// A compiled pattern ready for scanning
#[derive(Debug, Clone)]
pub struct PatternDefinition {
    pub pattern_type: PatternType,
    pub regex: Regex,
    pub priority: u32,
    pub validator: Option<Validator>,
    /// Capture group holding the value; `None` picks the first non-empty group
    pub group: Option<usize>,
}

impl PatternDefinition {
    /// Compile a built-in definition
    pub fn builtin(kind: BuiltinPattern) -> Result<Self, PatternError> {
        let regex = compile(builtin::expression(kind))?;
        Ok(Self {
            pattern_type: PatternType::Builtin(kind),
            regex,
            priority: kind.priority(),
            validator: validators::for_pattern(kind),
            group: None,
        })
    }

    /// Validate and compile a caller-defined pattern
    pub fn custom(pattern: &CustomPattern) -> Result<Self, PatternError> {
        let prefix = normalize_prefix(&pattern.prefix)?;
        let regex = compile(&pattern.regex)?;
        Ok(Self {
            pattern_type: PatternType::Custom(prefix),
            regex,
            priority: pattern.priority.unwrap_or(CUSTOM_PRIORITY),
            validator: None,
            group: pattern.group,
        })
    }

    pub fn prefix(&self) -> String {
        self.pattern_type.prefix()
    }

    /// The built-in kind, if this is not a custom pattern
    pub fn builtin_kind(&self) -> Option<BuiltinPattern> {
        match self.pattern_type {
            PatternType::Builtin(kind) => Some(kind),
            _ => None,
        }
    }
}

fn compile(expression: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(expression)
        .case_insensitive(true)
        .build()
        .map_err(|e| PatternError::InvalidRegex {
            expression: expression.to_string(),
            reason: e.to_string(),
        })
}

/// Upper-case a prefix and check it only holds `[A-Z0-9_]`
pub fn normalize_prefix(prefix: &str) -> Result<String, PatternError> {
    let upper = prefix.trim().to_ascii_uppercase();
    let valid = !upper.is_empty()
        && upper
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(upper)
    } else {
        Err(PatternError::InvalidPrefix {
            prefix: prefix.to_string(),
        })
    }
}

/// Immutable, priority-ordered set of compiled patterns
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    definitions: Vec<PatternDefinition>,
}

impl PatternCatalog {
    /// Catalog holding every built-in pattern
    pub fn builtin() -> Self {
        CatalogBuilder::new().with_builtins().build()
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// A new catalog with `definition` added
    pub fn with_definition(&self, definition: PatternDefinition) -> Self {
        let mut definitions = self.definitions.clone();
        definitions.push(definition);
        Self::from_definitions(definitions)
    }

    fn from_definitions(mut definitions: Vec<PatternDefinition>) -> Self {
        // Stable: equal priorities keep registration order
        definitions.sort_by_key(|d| d.priority);
        Self { definitions }
    }

    /// Every definition, highest priority first
    pub fn definitions(&self) -> &[PatternDefinition] {
        &self.definitions
    }

    /// Definitions to scan with: the enabled built-ins plus every custom pattern
    pub fn enabled_patterns<'a>(
        &'a self,
        enabled: &'a BTreeSet<BuiltinPattern>,
    ) -> impl Iterator<Item = &'a PatternDefinition> + 'a {
        self.definitions.iter().filter(move |d| match d.builtin_kind() {
            Some(kind) => enabled.contains(&kind),
            None => true,
        })
    }

    pub fn get(&self, kind: BuiltinPattern) -> Option<&PatternDefinition> {
        self.definitions
            .iter()
            .find(|d| d.builtin_kind() == Some(kind))
    }

    pub fn custom_patterns(&self) -> impl Iterator<Item = &PatternDefinition> {
        self.definitions
            .iter()
            .filter(|d| matches!(d.pattern_type, PatternType::Custom(_)))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Builder validating each pattern before it can enter a catalog.
///
/// A rejected custom pattern is recorded and skipped; it never aborts the build.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    definitions: Vec<PatternDefinition>,
    rejected: Vec<PatternError>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins(mut self) -> Self {
        for kind in BuiltinPattern::ALL {
            match PatternDefinition::builtin(kind) {
                Ok(def) => self.definitions.push(def),
                Err(e) => {
                    tracing::error!(pattern = %kind, error = %e, "built-in pattern failed to compile");
                    self.rejected.push(e);
                }
            }
        }
        self
    }

    /// Add a custom pattern, returning the rejection if it is invalid
    pub fn try_custom(&mut self, pattern: &CustomPattern) -> Result<(), PatternError> {
        let def = PatternDefinition::custom(pattern)?;
        self.definitions.push(def);
        Ok(())
    }

    /// Add a custom pattern, recording (and logging) a rejection
    pub fn custom(mut self, pattern: &CustomPattern) -> Self {
        if let Err(e) = self.try_custom(pattern) {
            tracing::warn!(error = %e, "custom pattern rejected");
            self.rejected.push(e);
        }
        self
    }

    pub fn rejected(&self) -> &[PatternError] {
        &self.rejected
    }

    pub fn build(self) -> PatternCatalog {
        PatternCatalog::from_definitions(self.definitions)
    }

    /// Build, handing back the rejections alongside the catalog
    pub fn build_with_rejections(self) -> (PatternCatalog, Vec<PatternError>) {
        let rejected = self.rejected;
        (PatternCatalog::from_definitions(self.definitions), rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtins_compile() {
        for kind in BuiltinPattern::ALL {
            assert!(
                PatternDefinition::builtin(kind).is_ok(),
                "built-in {} failed to compile",
                kind
            );
        }
        assert_eq!(PatternCatalog::builtin().len(), BuiltinPattern::ALL.len());
    }

    #[test]
    fn test_priority_order_is_fixed() {
        let catalog = PatternCatalog::builtin();
        let order: Vec<&str> = catalog
            .definitions()
            .iter()
            .filter_map(|d| d.builtin_kind())
            .map(|k| k.id())
            .collect();

        assert_eq!(
            order,
            vec![
                "private_key",
                "jwt",
                "connection_string",
                "api_key",
                "url",
                "email",
                "ipv6",
                "ipv4",
                "hostname",
                "path",
                "mac",
                "uuid",
                "phone",
                "credit_card",
                "iban",
                "ssn",
                "username",
                "server_name",
                "date",
            ]
        );
    }

    #[test]
    fn test_structured_credentials_outrank_url_and_url_outranks_host() {
        let p = |k: BuiltinPattern| k.priority();
        for cred in [
            BuiltinPattern::ApiKey,
            BuiltinPattern::Jwt,
            BuiltinPattern::PrivateKey,
            BuiltinPattern::ConnectionString,
        ] {
            assert!(p(cred) < p(BuiltinPattern::Url));
        }
        assert!(p(BuiltinPattern::Url) < p(BuiltinPattern::Email));
        assert!(p(BuiltinPattern::Email) < p(BuiltinPattern::Ipv6));
        assert!(p(BuiltinPattern::Ipv6) < p(BuiltinPattern::Ipv4));
        assert!(p(BuiltinPattern::Ipv4) < p(BuiltinPattern::Hostname));
        assert!(p(BuiltinPattern::Hostname) < p(BuiltinPattern::Path));
        assert!(p(BuiltinPattern::ServerName) < p(BuiltinPattern::Date));
    }

    #[test]
    fn test_custom_ranks_below_builtins_by_default() {
        let def = PatternDefinition::custom(&CustomPattern::new(r"TICKET-\d+", "ticket")).unwrap();
        assert_eq!(def.pattern_type, PatternType::Custom("TICKET".to_string()));
        assert_eq!(def.priority, CUSTOM_PRIORITY);

        let catalog = PatternCatalog::builtin().with_definition(def);
        let last = catalog.definitions().last().unwrap();
        assert_eq!(last.prefix(), "TICKET");
    }

    #[test]
    fn test_custom_pinned_priority() {
        let pattern = CustomPattern::new(r"TICKET-\d+", "TICKET").with_priority(0);
        let def = PatternDefinition::custom(&pattern).unwrap();
        let catalog = PatternCatalog::builtin().with_definition(def);
        assert_eq!(catalog.definitions()[0].prefix(), "TICKET");
    }

    #[test]
    fn test_invalid_custom_regex_is_rejected_alone() {
        let builder = CatalogBuilder::new()
            .with_builtins()
            .custom(&CustomPattern::new(r"[invalid(", "BAD"))
            .custom(&CustomPattern::new(r"ID-\d{6}", "ID"));

        assert_eq!(builder.rejected().len(), 1);
        assert_eq!(builder.rejected()[0].expression(), "[invalid(");

        let catalog = builder.build();
        assert_eq!(catalog.custom_patterns().count(), 1);
        assert_eq!(catalog.len(), BuiltinPattern::ALL.len() + 1);
    }

    #[test]
    fn test_invalid_prefix_is_rejected() {
        let err = PatternDefinition::custom(&CustomPattern::new(r"\d+", "bad prefix!")).unwrap_err();
        assert!(matches!(err, PatternError::InvalidPrefix { .. }));
        assert_eq!(normalize_prefix("custom_server").unwrap(), "CUSTOM_SERVER");
    }

    #[test]
    fn test_enabled_patterns_filters_builtins_only() {
        let catalog = PatternCatalog::builtin()
            .with_definition(PatternDefinition::custom(&CustomPattern::new("x", "X")).unwrap());
        let enabled: BTreeSet<_> = [BuiltinPattern::Email].into_iter().collect();

        let types: Vec<_> = catalog
            .enabled_patterns(&enabled)
            .map(|d| d.pattern_type.clone())
            .collect();
        assert_eq!(
            types,
            vec![
                PatternType::Builtin(BuiltinPattern::Email),
                PatternType::Custom("X".to_string()),
            ]
        );
    }
}
