//! tycompat_core: Core utilities for the tycompat type-compatibility engine.
//!
//! Provides name interning for property and enum-member names, and the
//! error returned when a type cannot be constructed.

pub mod error;
pub mod intern;

// Re-export commonly used types
pub use error::ConstructionError;
pub use intern::{InternedString, StringInterner};
