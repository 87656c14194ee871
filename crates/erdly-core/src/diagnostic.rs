//! Diagnostic codes for domain metadata problems
//!
//! IMPORTANT: Diagnostic codes are stable.
//! NEVER rename or remove codes - they are part of the public API.
//! Add new codes with new names only.

use serde::{Deserialize, Serialize};

/// Diagnostic code registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    // Associations
    /// An association targets a model that is not part of the domain
    AssociationUnknownTarget,

    /// An association's foreign key is not a column of the model carrying it
    AssociationMissingForeignKey,

    // Models
    /// A declared primary key is not a column of its model
    PrimaryKeyUnknownColumn,

    /// A validation names something that is not a column
    ValidationUnknownColumn,

    /// Two models share a name
    DuplicateModel,

    /// Two columns of one model share a name
    DuplicateColumn,
}

impl DiagnosticCode {
    /// Get the diagnostic code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssociationUnknownTarget => "ASSOCIATION_UNKNOWN_TARGET",
            Self::AssociationMissingForeignKey => "ASSOCIATION_MISSING_FOREIGN_KEY",
            Self::PrimaryKeyUnknownColumn => "PRIMARY_KEY_UNKNOWN_COLUMN",
            Self::ValidationUnknownColumn => "VALIDATION_UNKNOWN_COLUMN",
            Self::DuplicateModel => "DUPLICATE_MODEL",
            Self::DuplicateColumn => "DUPLICATE_COLUMN",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Metadata will be partially ignored
    Warn,

    /// The domain is inconsistent
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where in the domain a diagnostic points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Model name
    pub model: String,

    /// Column name, when the problem is column-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl Location {
    /// Point at a whole model
    pub fn model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            column: None,
        }
    }

    /// Point at one column of a model
    pub fn column(model: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            column: Some(column.into()),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.column {
            Some(column) => write!(f, "{}.{}", self.model, column),
            None => write!(f, "{}", self.model),
        }
    }
}

/// A diagnostic message with structured metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable diagnostic code
    pub code: DiagnosticCode,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Location in the domain
    pub location: Option<Location>,
}

impl Diagnostic {
    /// Create a new diagnostic with minimal fields
    pub fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}
