pub mod cli;
pub mod config;
pub mod core;
pub mod enhancers;
pub mod error;
pub mod logging;
pub mod patterns;
pub mod utils;

pub use crate::config::{LogveilConfig, Preset};
pub use crate::core::anonymizer::{Anonymizer, PresetReport};
pub use crate::core::mapping::MappingStore;
pub use crate::core::models::*;
pub use crate::enhancers::{Enhancer, EnhancerConfig, EnhancerRegistry, EnhancerSpan};
pub use crate::error::{EnhancerError, MappingError, PatternError, PresetError};
pub use crate::patterns::{CustomPattern, PatternCatalog, PatternDefinition};
