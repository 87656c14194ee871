//! Schema metadata: column types, columns, associations, validations, models
//!
//! These are the inputs attribute classification reads from. A [`Domain`]
//! owns every [`Model`] of one diagram run and doubles as the registry used
//! for cross-model association lookups.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::diagnostic::{Diagnostic, DiagnosticCode, Location, Severity};

/// Declared column type
///
/// Mirrors the abstract types a schema layer reports, independent of the
/// database engine. Engine-specific types land in [`ColumnType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    String,
    Text,
    Integer,
    Float,
    Decimal,
    Datetime,
    Date,
    Time,
    Timestamp,
    Boolean,
    Binary,
    References,
    Json,
    Uuid,

    /// Any type outside the closed set (e.g. `geometry`, `inet`)
    Other(String),
}

impl ColumnType {
    /// Short lowercase name, as shown in type descriptions
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Datetime => "datetime",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
            Self::Binary => "binary",
            Self::References => "references",
            Self::Json => "json",
            Self::Uuid => "uuid",
            Self::Other(name) => name,
        }
    }

    /// Whether a declared size limit is meaningful for this type
    pub fn supports_limit(&self) -> bool {
        matches!(self, Self::String | Self::Binary | Self::Integer | Self::Float)
    }
}

impl From<&str> for ColumnType {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "text" => Self::Text,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "decimal" => Self::Decimal,
            "datetime" => Self::Datetime,
            "date" => Self::Date,
            "time" => Self::Time,
            "timestamp" => Self::Timestamp,
            "boolean" => Self::Boolean,
            "binary" => Self::Binary,
            "references" => Self::References,
            "json" => Self::Json,
            "uuid" => Self::Uuid,
            _ => Self::Other(name.to_string()),
        }
    }
}

impl From<String> for ColumnType {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        column_type.as_str().to_string()
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// A column of a model's table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Declared size limit
    #[serde(default)]
    pub limit: Option<u32>,

    /// Decimal precision
    #[serde(default)]
    pub precision: Option<u32>,

    /// Decimal scale
    #[serde(default)]
    pub scale: Option<u32>,

    /// False when the database enforces NOT NULL
    #[serde(default = "default_true")]
    pub null_allowed: bool,

    /// Database default value, if any
    #[serde(default)]
    pub default: Option<String>,
}

impl Column {
    /// Create a nullable column with no limit
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            limit: None,
            precision: None,
            scale: None,
            null_allowed: true,
            default: None,
        }
    }

    /// Set the declared limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set decimal precision and scale
    pub fn with_precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    /// Mark the column NOT NULL
    pub fn not_null(mut self) -> Self {
        self.null_allowed = false;
        self
    }

    /// Set the database default
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Direction of an association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// The declaring model carries the foreign key
    BelongsTo,

    /// The target model carries the foreign key (single record)
    HasOne,

    /// The target model carries the foreign key (many records)
    HasMany,
}

impl AssociationKind {
    /// True when the foreign key lives on the declaring model
    pub fn is_belongs_to(&self) -> bool {
        matches!(self, Self::BelongsTo)
    }

    /// True when the foreign key lives on the target model
    pub fn is_has(&self) -> bool {
        matches!(self, Self::HasOne | Self::HasMany)
    }
}

/// An association declared on a model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Association {
    /// Association name (e.g. `author`)
    pub name: String,

    /// Direction
    pub kind: AssociationKind,

    /// Name of the target model
    pub target: String,

    /// Foreign key column name
    pub foreign_key: String,
}

impl Association {
    /// Create an association with an explicit foreign key
    pub fn new(
        name: impl Into<String>,
        kind: AssociationKind,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            target: target.into(),
            foreign_key: foreign_key.into(),
        }
    }

    /// `belongs_to` with the conventional `<name>_id` foreign key
    pub fn belongs_to(name: impl Into<String>, target: impl Into<String>) -> Self {
        let name = name.into();
        let foreign_key = format!("{}_id", name);
        Self::new(name, AssociationKind::BelongsTo, target, foreign_key)
    }

    /// `has_many` with an explicit foreign key on the target
    pub fn has_many(
        name: impl Into<String>,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self::new(name, AssociationKind::HasMany, target, foreign_key)
    }

    /// `has_one` with an explicit foreign key on the target
    pub fn has_one(
        name: impl Into<String>,
        target: impl Into<String>,
        foreign_key: impl Into<String>,
    ) -> Self {
        Self::new(name, AssociationKind::HasOne, target, foreign_key)
    }
}

/// Kind of a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Presence,
    Uniqueness,
    Length,
    Format,
    Inclusion,
    Numericality,
}

/// A validation rule declared on a model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Validation {
    /// Rule kind
    pub kind: ValidationKind,

    /// Column names the rule applies to
    pub attributes: Vec<String>,
}

impl Validation {
    /// Create a validation rule
    pub fn new<I, S>(kind: ValidationKind, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for a presence rule
    pub fn presence<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ValidationKind::Presence, attributes)
    }

    /// Whether the rule names the given column
    pub fn applies_to(&self, column: &str) -> bool {
        self.attributes.iter().any(|a| a == column)
    }
}

/// A model (entity) with its schema-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model name
    pub name: String,

    /// Primary key column, if the model declares one
    #[serde(default)]
    pub primary_key: Option<String>,

    /// Single-table inheritance discriminator column
    #[serde(default)]
    pub inheritance_column: Option<String>,

    /// Columns in schema order
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Declared associations
    #[serde(default)]
    pub associations: Vec<Association>,

    /// Declared validation rules
    #[serde(default)]
    pub validations: Vec<Validation>,
}

impl Model {
    /// Create a model with an `id` primary key and no columns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primary_key: Some("id".to_string()),
            inheritance_column: None,
            columns: Vec::new(),
            associations: Vec::new(),
            validations: Vec::new(),
        }
    }

    /// Override (or clear) the primary key
    pub fn with_primary_key(mut self, primary_key: Option<&str>) -> Self {
        self.primary_key = primary_key.map(str::to_string);
        self
    }

    /// Set the inheritance column
    pub fn with_inheritance_column(mut self, column: impl Into<String>) -> Self {
        self.inheritance_column = Some(column.into());
        self
    }

    /// Append a column
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Append an association
    pub fn with_association(mut self, association: Association) -> Self {
        self.associations.push(association);
        self
    }

    /// Append a validation rule
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validations.push(validation);
        self
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Whether a presence validation names the column
    pub fn has_presence_validation(&self, column: &str) -> bool {
        self.validations
            .iter()
            .any(|v| v.kind == ValidationKind::Presence && v.applies_to(column))
    }
}

/// All models of one diagram run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain (application) name
    #[serde(default)]
    pub name: String,

    /// Models in declaration order
    #[serde(default)]
    pub models: Vec<Model>,
}

impl Domain {
    /// Create an empty domain
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models: Vec::new(),
        }
    }

    /// Create a domain from models
    pub fn from_models(name: impl Into<String>, models: Vec<Model>) -> Self {
        Self {
            name: name.into(),
            models,
        }
    }

    /// Load a domain from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DomainError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse a domain from a JSON string
    pub fn from_str(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::ParseError(e.to_string()))
    }

    /// Find a model by name
    pub fn find_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Every association in the domain that targets `model`, with its declaring model
    pub fn associations_targeting<'a>(
        &'a self,
        model: &'a str,
    ) -> impl Iterator<Item = (&'a Model, &'a Association)> + 'a {
        self.models.iter().flat_map(move |owner| {
            owner
                .associations
                .iter()
                .filter(move |a| a.target == model)
                .map(move |a| (owner, a))
        })
    }

    /// Report inconsistencies in the declared metadata
    ///
    /// Never fails: classification still works on an imperfect domain, these
    /// only tell the user what will be ignored.
    pub fn validate(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut seen_models = HashSet::new();

        for model in &self.models {
            if !seen_models.insert(model.name.as_str()) {
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::DuplicateModel,
                    Severity::Error,
                    format!("Model '{}' is declared more than once", model.name),
                ).with_location(Location::model(&model.name)));
            }

            let mut seen_columns = HashSet::new();
            for column in &model.columns {
                if !seen_columns.insert(column.name.as_str()) {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticCode::DuplicateColumn,
                        Severity::Error,
                        format!("Column '{}' appears more than once on '{}'", column.name, model.name),
                    ).with_location(Location::column(&model.name, &column.name)));
                }
            }

            if let Some(pk) = &model.primary_key {
                if model.find_column(pk).is_none() {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticCode::PrimaryKeyUnknownColumn,
                        Severity::Warn,
                        format!("Primary key '{}' of '{}' is not a column", pk, model.name),
                    ).with_location(Location::column(&model.name, pk)));
                }
            }

            for validation in &model.validations {
                for attribute in &validation.attributes {
                    if model.find_column(attribute).is_none() {
                        diagnostics.push(Diagnostic::new(
                            DiagnosticCode::ValidationUnknownColumn,
                            Severity::Info,
                            format!(
                                "Validation on '{}' names '{}', which is not a column",
                                model.name, attribute
                            ),
                        ).with_location(Location::column(&model.name, attribute)));
                    }
                }
            }

            for association in &model.associations {
                self.validate_association(model, association, &mut diagnostics);
            }
        }

        diagnostics
    }

    fn validate_association(
        &self,
        owner: &Model,
        association: &Association,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(target) = self.find_model(&association.target) else {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::AssociationUnknownTarget,
                Severity::Warn,
                format!(
                    "Ignoring association '{}' on '{}': model '{}' does not exist",
                    association.name, owner.name, association.target
                ),
            ).with_location(Location::model(&owner.name)));
            return;
        };

        let carrier = if association.kind.is_belongs_to() { owner } else { target };
        if carrier.find_column(&association.foreign_key).is_none() {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::AssociationMissingForeignKey,
                Severity::Warn,
                format!(
                    "Association '{}' on '{}' uses foreign key '{}', which is not a column of '{}'",
                    association.name, owner.name, association.foreign_key, carrier.name
                ),
            )
            .with_location(Location::column(&carrier.name, &association.foreign_key)));
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::new("")
    }
}

/// Domain loading errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Failed to read domain file {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse domain: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog() -> Domain {
        Domain::from_models("blog", vec![
            Model::new("User")
                .with_column(Column::new("id", ColumnType::Integer))
                .with_column(Column::new("email", ColumnType::String))
                .with_association(Association::has_many("posts", "Post", "author_id")),
            Model::new("Post")
                .with_column(Column::new("id", ColumnType::Integer))
                .with_column(Column::new("author_id", ColumnType::Integer))
                .with_association(Association::new(
                    "author",
                    AssociationKind::BelongsTo,
                    "User",
                    "author_id",
                ))
                .with_validation(Validation::presence(["title"])),
        ])
    }

    #[test]
    fn column_type_names() {
        assert_eq!(ColumnType::from("string"), ColumnType::String);
        assert_eq!(ColumnType::from("DateTime"), ColumnType::Datetime);
        assert_eq!(ColumnType::from("geometry"), ColumnType::Other("geometry".to_string()));
        assert_eq!(ColumnType::Other("inet".to_string()).to_string(), "inet");
        assert!(ColumnType::String.supports_limit());
        assert!(!ColumnType::Text.supports_limit());
    }

    #[test]
    fn column_deserialization_defaults() {
        let column: Column = serde_json::from_str(r#"{"name": "title", "type": "string"}"#).unwrap();
        assert_eq!(column.column_type, ColumnType::String);
        assert!(column.null_allowed);
        assert_eq!(column.limit, None);
    }

    #[test]
    fn belongs_to_default_foreign_key() {
        let association = Association::belongs_to("author", "User");
        assert_eq!(association.foreign_key, "author_id");
        assert!(association.kind.is_belongs_to());
        assert!(!association.kind.is_has());
    }

    #[test]
    fn associations_targeting_scans_every_model() {
        let domain = blog();
        let to_user: Vec<_> = domain
            .associations_targeting("User")
            .map(|(owner, a)| (owner.name.as_str(), a.name.as_str()))
            .collect();
        assert_eq!(to_user, vec![("Post", "author")]);

        let to_post: Vec<_> = domain.associations_targeting("Post").collect();
        assert_eq!(to_post.len(), 1);
        assert_eq!(to_post[0].0.name, "User");
    }

    #[test]
    fn presence_lookup() {
        let domain = blog();
        let post = domain.find_model("Post").unwrap();
        assert!(post.has_presence_validation("title"));
        assert!(!post.has_presence_validation("author_id"));
    }

    #[test]
    fn validate_reports_unknown_validation_column() {
        let diagnostics = blog().validate();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::ValidationUnknownColumn);
    }

    #[test]
    fn validate_reports_bad_associations() {
        let domain = Domain::from_models("shop", vec![
            Model::new("Order")
                .with_column(Column::new("id", ColumnType::Integer))
                .with_association(Association::belongs_to("customer", "Customer"))
                .with_association(Association::has_many("lines", "Order", "order_id")),
        ]);

        let codes: Vec<_> = domain.validate().into_iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![
            DiagnosticCode::AssociationUnknownTarget,
            DiagnosticCode::AssociationMissingForeignKey,
        ]);
    }

    #[test]
    fn validate_reports_duplicates_and_missing_primary_key() {
        let domain = Domain::from_models("dup", vec![
            Model::new("Tag").with_column(Column::new("name", ColumnType::String)),
            Model::new("Tag")
                .with_primary_key(None)
                .with_column(Column::new("name", ColumnType::String))
                .with_column(Column::new("name", ColumnType::Text)),
        ]);

        let codes: Vec<_> = domain.validate().into_iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![
            DiagnosticCode::PrimaryKeyUnknownColumn,
            DiagnosticCode::DuplicateModel,
            DiagnosticCode::DuplicateColumn,
        ]);
    }

    #[test]
    fn domain_from_json() {
        let json = r#"{
            "name": "blog",
            "models": [{
                "name": "Post",
                "primary_key": "id",
                "columns": [
                    {"name": "id", "type": "integer", "null_allowed": false},
                    {"name": "title", "type": "string", "limit": 255}
                ],
                "associations": [
                    {"name": "author", "kind": "belongs_to", "target": "User", "foreign_key": "author_id"}
                ],
                "validations": [{"kind": "presence", "attributes": ["title"]}]
            }]
        }"#;

        let domain = Domain::from_str(json).unwrap();
        let post = domain.find_model("Post").unwrap();
        assert_eq!(post.column_names(), vec!["id", "title"]);
        assert!(!post.columns[0].null_allowed);
        assert_eq!(post.columns[1].limit, Some(255));
        assert_eq!(post.associations[0].kind, AssociationKind::BelongsTo);
        assert!(matches!(Domain::from_str("{"), Err(DomainError::ParseError(_))));
    }
}
