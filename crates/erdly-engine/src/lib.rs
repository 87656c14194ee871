//! erdly engine - attribute classification
//!
//! This crate turns schema metadata into diagram-ready attributes:
//! - Primary key, foreign key, mandatory and timestamp classification
//! - Type descriptions with non-default limits
//! - Per-model attribute selection and ordering

pub mod attribute;
pub mod introspect;

pub use attribute::{Attribute, AttributeError, AttributeKind, AttributeSummary, MANDATORY_MARKER, TIMESTAMP_NAMES};
pub use introspect::{EntitySummary, ModelIntrospector};
