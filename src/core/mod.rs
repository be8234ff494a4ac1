pub mod anonymizer;
pub mod detector;
pub mod mapping;
pub mod models;
pub mod overlap;

pub use anonymizer::{Anonymizer, PresetReport};
pub use mapping::MappingStore;
pub use models::*;
