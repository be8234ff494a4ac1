//! Error types for the anonymization engine

/// A pattern could not be registered.
///
/// Only the offending pattern is rejected; the rest of the catalog is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("invalid regex '{expression}': {reason}")]
    InvalidRegex { expression: String, reason: String },

    #[error("invalid placeholder prefix '{prefix}' (expected letters, digits or '_')")]
    InvalidPrefix { prefix: String },
}

impl PatternError {
    /// The expression (or prefix) that caused the rejection
    pub fn expression(&self) -> &str {
        match self {
            PatternError::InvalidRegex { expression, .. } => expression,
            PatternError::InvalidPrefix { prefix } => prefix,
        }
    }
}

/// A preset is structurally malformed and cannot configure an anonymizer.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("malformed preset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed preset TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown preset '{0}'")]
    Unknown(String),
}

/// An enhancer could not contribute spans for the current call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnhancerError {
    #[error("enhancer '{name}' is not available")]
    Unavailable { name: String },

    #[error("enhancer '{name}' failed: {reason}")]
    Failed { name: String, reason: String },

    #[error("enhancer '{name}' returned span {start}..{end}, which does not fit the text")]
    InvalidSpan {
        name: String,
        start: usize,
        end: usize,
    },

    #[error("enhancer '{name}' exceeded its {budget_ms}ms budget ({elapsed_ms}ms)")]
    TimedOut {
        name: String,
        budget_ms: u64,
        elapsed_ms: u64,
    },
}

/// A mapping export could not be imported.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("malformed mapping export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("placeholder {placeholder} is mapped to more than one value")]
    DuplicatePlaceholder { placeholder: String },

    #[error("'{placeholder}' is not a valid placeholder")]
    InvalidPlaceholder { placeholder: String },
}
