//! Configuration schema (erdly.toml)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Database dialect whose native type limits apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectConfig {
    /// PostgreSQL
    Postgres,

    /// MySQL / MariaDB
    Mysql,

    /// SQLite
    Sqlite,

    /// No engine-specific defaults
    Generic,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::Generic
    }
}

impl std::str::FromStr for DialectConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::Mysql),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "generic" => Ok(Self::Generic),
            other => Err(ConfigError::ParseError(format!("unknown dialect '{}'", other))),
        }
    }
}

/// Attribute categories that may be shown or hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKindConfig {
    /// Regular data columns
    Content,

    /// Primary key columns
    PrimaryKeys,

    /// Foreign key columns
    ForeignKeys,

    /// created_at / updated_at style columns
    Timestamps,

    /// Single-table inheritance discriminators
    Inheritance,
}

impl AttributeKindConfig {
    /// Every kind, in display order
    pub const ALL: [AttributeKindConfig; 5] = [
        Self::Content,
        Self::PrimaryKeys,
        Self::ForeignKeys,
        Self::Timestamps,
        Self::Inheritance,
    ];
}

fn default_kinds() -> Vec<AttributeKindConfig> {
    AttributeKindConfig::ALL.to_vec()
}

fn default_true() -> bool {
    true
}

/// Which attributes surface and in what order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeRules {
    /// Sort attributes by name
    #[serde(default = "default_true")]
    pub sort: bool,

    /// Move the primary key to the front after sorting
    #[serde(default)]
    pub prepend_primary: bool,

    /// Columns never shown (glob patterns, matched against `column` and `Model.column`)
    #[serde(default)]
    pub skip_columns: Vec<String>,

    /// Models whose attributes are never shown (glob patterns)
    #[serde(default)]
    pub skip_models: Vec<String>,

    /// Attribute kinds to show
    #[serde(default = "default_kinds")]
    pub kinds: Vec<AttributeKindConfig>,
}

impl Default for AttributeRules {
    fn default() -> Self {
        Self {
            sort: true,
            prepend_primary: false,
            skip_columns: Vec::new(),
            skip_models: Vec::new(),
            kinds: default_kinds(),
        }
    }
}

impl AttributeRules {
    /// Check if a value matches any pattern in the list
    fn matches_pattern(value: &str, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, value)
            } else {
                pattern == value
            }
        })
    }

    /// Check if a column of a model should be skipped
    pub fn is_column_skipped(&self, model: &str, column: &str) -> bool {
        Self::matches_pattern(column, &self.skip_columns)
            || Self::matches_pattern(&format!("{}.{}", model, column), &self.skip_columns)
    }

    /// Check if a model should be skipped
    pub fn is_model_skipped(&self, model: &str) -> bool {
        Self::matches_pattern(model, &self.skip_models)
    }

    /// Check if an attribute kind is shown
    pub fn shows(&self, kind: AttributeKindConfig) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database dialect for native limit lookups
    #[serde(default)]
    pub dialect: DialectConfig,

    /// Report domain diagnostics
    #[serde(default = "default_true")]
    pub warn: bool,

    /// Native limit overrides keyed by type name (`string = 191`)
    #[serde(default)]
    pub native_limits: BTreeMap<String, u32>,

    /// Attribute selection rules
    #[serde(default)]
    pub attributes: AttributeRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: DialectConfig::default(),
            warn: true,
            native_limits: BTreeMap::new(),
            attributes: AttributeRules::default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }
}

/// Simple glob matching (`*` matches any run of characters)
fn glob_match(pattern: &str, text: &str) -> bool {
    let mut segments = pattern.split('*');
    let prefix = segments.next().unwrap_or_default();
    let mut middle: Vec<&str> = segments.collect();

    // No wildcard at all
    let Some(suffix) = middle.pop() else {
        return pattern == text;
    };

    let Some(mut remaining) = text.strip_prefix(prefix) else {
        return false;
    };

    for segment in middle {
        match remaining.find(segment) {
            Some(pos) => remaining = &remaining[pos + segment.len()..],
            None => return false,
        }
    }

    remaining.ends_with(suffix)
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
