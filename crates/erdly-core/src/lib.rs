//! erdly core
//!
//! Schema metadata model, domain diagnostics and configuration shared by the
//! catalog and engine crates.
//! Never rename diagnostic codes - they are part of the public API.

pub mod diagnostic;
pub mod schema;
pub mod config;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity, Location};
pub use schema::{
    Association, AssociationKind, Column, ColumnType, Domain, DomainError, Model, Validation,
    ValidationKind,
};
pub use config::{AttributeKindConfig, AttributeRules, Config, ConfigError, DialectConfig};
