//! Optional span contributors merged into detection.
//!
//! An enhancer is anything that can look at text and return labelled byte
//! ranges. Whether an implementation exists is a configuration state: a
//! configured-but-missing, unavailable, failing or slow enhancer contributes
//! nothing and the anonymization carries on with the built-in patterns.

pub mod dictionary;
pub mod domains;

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::core::models::{PatternType, Span};
use crate::error::EnhancerError;

pub use dictionary::DictionaryEnhancer;
pub use domains::DomainEnhancer;

/// Default enhancer priority: below every built-in, above custom patterns
pub const ENHANCER_PRIORITY: u32 = 100;

/// Per-enhancer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    pub enabled: bool,
    /// Spans below this confidence are discarded
    pub confidence_threshold: f64,
    /// Priority given to this enhancer's spans during overlap resolution
    pub priority: u32,
    /// Wall-clock budget per call; an overrun discards the contribution
    pub timeout_ms: Option<u64>,
    /// Implementation-specific settings
    pub settings: BTreeMap<String, serde_json::Value>,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            confidence_threshold: 0.7,
            priority: ENHANCER_PRIORITY,
            timeout_ms: None,
            settings: BTreeMap::new(),
        }
    }
}

impl EnhancerConfig {
    /// String list setting, ignoring non-string entries
    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.settings
            .get(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(|v| v.as_str())
    }
}

/// A labelled byte range reported by an enhancer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancerSpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub confidence: f64,
    pub value: String,
}

/// Capability interface for span contributors
pub trait Enhancer: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the backing resources are present
    fn is_available(&self) -> bool {
        true
    }

    fn detect(&self, text: &str, config: &EnhancerConfig)
        -> Result<Vec<EnhancerSpan>, EnhancerError>;
}

/// Snapshot of one enhancer's state, for listings
#[derive(Debug, Clone, Serialize)]
pub struct EnhancerStatus {
    pub name: String,
    pub registered: bool,
    pub available: bool,
    pub enabled: bool,
    pub confidence_threshold: f64,
    pub priority: u32,
}

/// Named enhancer implementations plus their enablement
#[derive(Default)]
pub struct EnhancerRegistry {
    enhancers: Vec<Box<dyn Enhancer>>,
    configs: BTreeMap<String, EnhancerConfig>,
}

impl std::fmt::Debug for EnhancerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnhancerRegistry")
            .field("enhancers", &self.names())
            .field("configs", &self.configs)
            .finish()
    }
}

impl EnhancerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the in-crate enhancers, all disabled
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DomainEnhancer::new()));
        registry.register(Box::new(DictionaryEnhancer));
        registry
    }

    /// Add (or replace) an implementation. Registration order breaks ties.
    pub fn register(&mut self, enhancer: Box<dyn Enhancer>) {
        let name = enhancer.name().to_string();
        self.enhancers.retain(|e| e.name() != name);
        self.enhancers.push(enhancer);
    }

    /// Enable or disable an enhancer, optionally replacing its config.
    ///
    /// Names without an implementation are recorded all the same.
    pub fn set_enabled(&mut self, name: &str, enabled: bool, config: Option<EnhancerConfig>) {
        let entry = self.configs.entry(name.to_string()).or_default();
        if let Some(config) = config {
            *entry = config;
        }
        entry.enabled = enabled;
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.configs.get(name).map(|c| c.enabled).unwrap_or(false)
    }

    pub fn config(&self, name: &str) -> Option<&EnhancerConfig> {
        self.configs.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.enhancers.iter().map(|e| e.name()).collect()
    }

    pub fn statuses(&self) -> Vec<EnhancerStatus> {
        let mut statuses: Vec<EnhancerStatus> = self
            .enhancers
            .iter()
            .map(|e| {
                let config = self.configs.get(e.name()).cloned().unwrap_or(EnhancerConfig {
                    enabled: false,
                    ..EnhancerConfig::default()
                });
                EnhancerStatus {
                    name: e.name().to_string(),
                    registered: true,
                    available: e.is_available(),
                    enabled: config.enabled,
                    confidence_threshold: config.confidence_threshold,
                    priority: config.priority,
                }
            })
            .collect();

        for (name, config) in &self.configs {
            if !self.enhancers.iter().any(|e| e.name() == name) {
                statuses.push(EnhancerStatus {
                    name: name.clone(),
                    registered: false,
                    available: false,
                    enabled: config.enabled,
                    confidence_threshold: config.confidence_threshold,
                    priority: config.priority,
                });
            }
        }

        statuses
    }

    /// Spans from every enabled enhancer, in registration order.
    ///
    /// Failures are logged and yield nothing for that enhancer.
    pub fn collect_spans(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();

        for (name, config) in self.configs.iter().filter(|(_, c)| c.enabled) {
            if !self.enhancers.iter().any(|e| e.name() == name) {
                let err = EnhancerError::Unavailable { name: name.clone() };
                tracing::warn!(error = %err, "enhancer skipped");
            }
        }

        for enhancer in &self.enhancers {
            let Some(config) = self.configs.get(enhancer.name()).filter(|c| c.enabled) else {
                continue;
            };

            match run_enhancer(enhancer.as_ref(), text, config) {
                Ok(found) => {
                    let before = spans.len();
                    for span in found {
                        if !fits(text, &span) {
                            let err = EnhancerError::InvalidSpan {
                                name: enhancer.name().to_string(),
                                start: span.start,
                                end: span.end,
                            };
                            tracing::warn!(error = %err, "enhancer span dropped");
                            continue;
                        }
                        if span.confidence >= config.confidence_threshold {
                            spans.push(to_span(span, config.priority));
                        }
                    }
                    tracing::debug!(
                        enhancer = enhancer.name(),
                        spans = spans.len() - before,
                        "enhancer contributed spans"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "enhancer contribution discarded");
                }
            }
        }

        spans
    }
}

fn run_enhancer(
    enhancer: &dyn Enhancer,
    text: &str,
    config: &EnhancerConfig,
) -> Result<Vec<EnhancerSpan>, EnhancerError> {
    if !enhancer.is_available() {
        return Err(EnhancerError::Unavailable {
            name: enhancer.name().to_string(),
        });
    }

    let started = Instant::now();
    let spans = enhancer.detect(text, config)?;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if let Some(budget_ms) = config.timeout_ms {
        if elapsed_ms > budget_ms {
            return Err(EnhancerError::TimedOut {
                name: enhancer.name().to_string(),
                budget_ms,
                elapsed_ms,
            });
        }
    }

    Ok(spans)
}

/// Non-empty, on char boundaries, and covering exactly `span.value`
fn fits(text: &str, span: &EnhancerSpan) -> bool {
    span.start < span.end
        && span.end <= text.len()
        && text.is_char_boundary(span.start)
        && text.is_char_boundary(span.end)
        && text[span.start..span.end] == span.value
}

fn to_span(span: EnhancerSpan, priority: u32) -> Span {
    Span {
        start: span.start,
        end: span.end,
        pattern_type: PatternType::Entity(span.label.to_ascii_uppercase()),
        priority,
        matched: span.value.clone(),
        value: span.value,
    }
}
