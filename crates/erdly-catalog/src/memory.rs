//! In-memory native limit catalog
//!
//! Holds an explicit `type -> limit` map. Used to layer configuration
//! overrides on top of an engine table, and in tests to simulate any engine
//! without touching global state.
//!
//! ## Usage
//!
//! ```rust
//! use erdly_catalog::{NativeLimits, StaticLimits};
//! use erdly_core::ColumnType;
//!
//! let catalog = StaticLimits::new().with_limit(ColumnType::String, 456);
//! assert_eq!(catalog.native_limit(&ColumnType::String), Some(456));
//! assert_eq!(catalog.native_limit(&ColumnType::Integer), None);
//! ```

use crate::adapter::NativeLimits;
use crate::engines::EngineCatalog;
use erdly_core::{ColumnType, Config};
use std::collections::HashMap;

/// Native limits stored in a map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLimits {
    limits: HashMap<ColumnType, u32>,
    catalog_name: String,
}

impl StaticLimits {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            limits: HashMap::new(),
            catalog_name: "Static".to_string(),
        }
    }

    /// Copy an engine table
    pub fn from_engine(engine: EngineCatalog) -> Self {
        Self {
            limits: engine.entries().iter().cloned().collect(),
            catalog_name: engine.name().to_string(),
        }
    }

    /// Build the catalog a configuration asks for
    ///
    /// Starts from the dialect's engine table and applies `[native_limits]`
    /// overrides. Overrides naming a type without a limit concept are
    /// skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut catalog = Self::from_engine(EngineCatalog::for_dialect(config.dialect));

        for (type_name, limit) in &config.native_limits {
            let column_type = ColumnType::from(type_name.as_str());
            if !column_type.supports_limit() {
                tracing::warn!(
                    type_name = %type_name,
                    "ignoring native limit override for a type without size limits"
                );
                continue;
            }
            catalog.limits.insert(column_type, *limit);
        }

        catalog
    }

    /// Set the native limit for a type
    pub fn with_limit(mut self, column_type: ColumnType, limit: u32) -> Self {
        self.limits.insert(column_type, limit);
        self
    }

    /// Set a custom catalog name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.catalog_name = name.into();
        self
    }

    /// Number of types with a native limit
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    /// Whether no type has a native limit
    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

impl Default for StaticLimits {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeLimits for StaticLimits {
    fn name(&self) -> &str {
        &self.catalog_name
    }

    fn native_limit(&self, column_type: &ColumnType) -> Option<u32> {
        self.limits.get(column_type).copied()
    }
}
