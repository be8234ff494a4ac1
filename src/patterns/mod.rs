pub mod builtin;
pub mod catalog;
pub mod validators;

pub use catalog::{
    CatalogBuilder, CustomPattern, PatternCatalog, PatternDefinition, CUSTOM_PRIORITY,
};
pub use validators::{iban_valid, luhn_valid};
