//! Attribute classification
//!
//! An [`Attribute`] is one column of one model, seen through the eyes of an
//! entity-relationship diagram: is it the primary key, a foreign key, a
//! required field, a timestamp, and how should its type read.
//!
//! Every predicate is derived from borrowed schema metadata on demand. A
//! missing piece of metadata (no primary key, no association, no native
//! limit) answers `false`/`None`, never an error.

use erdly_catalog::{NativeLimits, NoNativeLimits};
use erdly_core::{AttributeKindConfig, Column, ColumnType, Domain, Model};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Column names treated as creation/update timestamps, whatever their type
pub const TIMESTAMP_NAMES: [&str; 4] = ["created_at", "updated_at", "created_on", "updated_on"];

/// Appended to the type description of mandatory attributes
pub const MANDATORY_MARKER: &str = " \u{2217}";

pub(crate) static NO_NATIVE_LIMITS: NoNativeLimits = NoNativeLimits;

/// Errors raised when an attribute cannot be located
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeError {
    #[error("Invalid column '{column}' on model '{model}'")]
    InvalidColumn { model: String, column: String },

    #[error("Unknown model: {0}")]
    UnknownModel(String),
}

/// Category an attribute falls in for filtering
pub type AttributeKind = AttributeKindConfig;

/// One classified column of one model
#[derive(Clone, Copy)]
pub struct Attribute<'a> {
    domain: &'a Domain,
    model: &'a Model,
    column: &'a Column,
    native_limits: &'a dyn NativeLimits,
}

impl<'a> Attribute<'a> {
    /// Wrap a column of `model`
    ///
    /// Native limits default to [`NoNativeLimits`]; use
    /// [`Attribute::with_native_limits`] to compare against an engine.
    pub fn new(domain: &'a Domain, model: &'a Model, column: &'a Column) -> Self {
        Self {
            domain,
            model,
            column,
            native_limits: &NO_NATIVE_LIMITS,
        }
    }

    /// Locate a column by name and wrap it
    pub fn for_column(
        domain: &'a Domain,
        model: &'a Model,
        column: &str,
    ) -> Result<Self, AttributeError> {
        let invalid = || AttributeError::InvalidColumn {
            model: model.name.clone(),
            column: column.to_string(),
        };

        if column.is_empty() {
            return Err(invalid());
        }

        model
            .find_column(column)
            .map(|c| Self::new(domain, model, c))
            .ok_or_else(invalid)
    }

    /// Use a native limit catalog for [`Attribute::limit`] and descriptions
    pub fn with_native_limits(mut self, native_limits: &'a dyn NativeLimits) -> Self {
        self.native_limits = native_limits;
        self
    }

    /// Column name
    pub fn name(&self) -> &'a str {
        &self.column.name
    }

    /// Declared column type, unchanged
    pub fn column_type(&self) -> &'a ColumnType {
        &self.column.column_type
    }

    /// Underlying column
    pub fn column(&self) -> &'a Column {
        self.column
    }

    /// Owning model
    pub fn model(&self) -> &'a Model {
        self.model
    }

    /// Domain the model belongs to
    pub fn domain(&self) -> &'a Domain {
        self.domain
    }

    /// True if this column is the model's declared primary key
    pub fn primary_key(&self) -> bool {
        self.model.primary_key.as_deref() == Some(self.name())
    }

    /// True if this column holds a reference to another model
    ///
    /// Either the owning model declares a `belongs_to` with this foreign
    /// key, or some model in the domain (the owner included) declares a
    /// `has_one`/`has_many` onto the owner through it.
    pub fn foreign_key(&self) -> bool {
        let name = self.name();

        let local = self
            .model
            .associations
            .iter()
            .any(|a| a.kind.is_belongs_to() && a.foreign_key == name);

        local
            || self
                .domain
                .associations_targeting(&self.model.name)
                .any(|(_, a)| a.kind.is_has() && a.foreign_key == name)
    }

    /// True if a value is required, by validation or by NOT NULL
    pub fn mandatory(&self) -> bool {
        self.model.has_presence_validation(self.name()) || !self.column.null_allowed
    }

    /// True for conventional created/updated column names
    pub fn timestamp(&self) -> bool {
        TIMESTAMP_NAMES.contains(&self.name())
    }

    /// True if this column is the model's inheritance discriminator
    pub fn inheritance(&self) -> bool {
        self.model.inheritance_column.as_deref() == Some(self.name())
    }

    /// True for plain data columns
    pub fn content(&self) -> bool {
        !self.primary_key() && !self.foreign_key() && !self.timestamp() && !self.inheritance()
    }

    /// Category used for filtering
    ///
    /// Checked in order: primary key, foreign key, timestamp, inheritance.
    pub fn kind(&self) -> AttributeKind {
        if self.primary_key() {
            AttributeKind::PrimaryKeys
        } else if self.foreign_key() {
            AttributeKind::ForeignKeys
        } else if self.timestamp() {
            AttributeKind::Timestamps
        } else if self.inheritance() {
            AttributeKind::Inheritance
        } else {
            AttributeKind::Content
        }
    }

    /// Declared limit, unless the type has no limit concept or it equals
    /// the engine's native default
    pub fn limit(&self) -> Option<u32> {
        let column_type = self.column_type();
        if !column_type.supports_limit() {
            return None;
        }

        let declared = self.column.limit?;
        match self.native_limits.native_limit(column_type) {
            Some(native) if native == declared => None,
            _ => Some(declared),
        }
    }

    /// Decimal precision
    pub fn precision(&self) -> Option<u32> {
        match self.column_type() {
            ColumnType::Decimal => self.column.precision,
            _ => None,
        }
    }

    /// Decimal scale, only alongside a precision
    pub fn scale(&self) -> Option<u32> {
        self.precision().and(self.column.scale)
    }

    fn limit_description(&self) -> Option<String> {
        match (self.precision(), self.scale()) {
            (Some(p), Some(s)) => Some(format!("({},{})", p, s)),
            (Some(p), None) => Some(format!("({})", p)),
            _ => self.limit().map(|l| format!("({})", l)),
        }
    }

    /// Human-readable type: base type, non-default limit, mandatory marker
    ///
    /// `"string (255) ∗"`, `"integer"`, `"decimal (15,2)"`.
    pub fn type_description(&self) -> String {
        let mut description = self.column_type().as_str().to_string();

        if let Some(limit) = self.limit_description() {
            description.push(' ');
            description.push_str(&limit);
        }

        if self.mandatory() {
            description.push_str(MANDATORY_MARKER);
        }

        description
    }

    /// Serializable snapshot of every classification
    pub fn summary(&self) -> AttributeSummary {
        AttributeSummary {
            name: self.name().to_string(),
            column_type: self.column_type().clone(),
            type_description: self.type_description(),
            limit: self.limit(),
            primary_key: self.primary_key(),
            foreign_key: self.foreign_key(),
            mandatory: self.mandatory(),
            timestamp: self.timestamp(),
            inheritance: self.inheritance(),
        }
    }
}

impl fmt::Debug for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("model", &self.model.name)
            .field("column", &self.column.name)
            .field("type", &self.column.column_type)
            .field("native_limits", &self.native_limits.name())
            .finish()
    }
}

impl fmt::Display for Attribute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.type_description())
    }
}

// Equality and ordering look at the column name only.
impl PartialEq for Attribute<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Attribute<'_> {}

impl PartialOrd for Attribute<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Attribute<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name().cmp(other.name())
    }
}

/// Owned, serializable view of an [`Attribute`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSummary {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: ColumnType,

    pub type_description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    pub primary_key: bool,
    pub foreign_key: bool,
    pub mandatory: bool,
    pub timestamp: bool,
    pub inheritance: bool,
}
