//! Built-in native limit tables for common database engines

use crate::adapter::NativeLimits;
use erdly_core::{ColumnType, DialectConfig};

const POSTGRES_LIMITS: &[(ColumnType, u32)] = &[(ColumnType::Integer, 4)];

const MYSQL_LIMITS: &[(ColumnType, u32)] = &[(ColumnType::String, 255), (ColumnType::Integer, 4)];

const NO_LIMITS: &[(ColumnType, u32)] = &[];

/// Native limit table of a known database engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineCatalog {
    Postgres,
    Mysql,
    Sqlite,

    /// No engine defaults at all
    Generic,
}

impl EngineCatalog {
    /// Pick the catalog for a configured dialect
    pub fn for_dialect(dialect: DialectConfig) -> Self {
        match dialect {
            DialectConfig::Postgres => Self::Postgres,
            DialectConfig::Mysql => Self::Mysql,
            DialectConfig::Sqlite => Self::Sqlite,
            DialectConfig::Generic => Self::Generic,
        }
    }

    /// Every `(type, limit)` pair this engine defines
    pub fn entries(&self) -> &'static [(ColumnType, u32)] {
        match self {
            Self::Postgres => POSTGRES_LIMITS,
            Self::Mysql => MYSQL_LIMITS,
            Self::Sqlite | Self::Generic => NO_LIMITS,
        }
    }
}

impl NativeLimits for EngineCatalog {
    fn name(&self) -> &str {
        match self {
            Self::Postgres => "PostgreSQL",
            Self::Mysql => "MySQL",
            Self::Sqlite => "SQLite",
            Self::Generic => "Generic",
        }
    }

    fn native_limit(&self, column_type: &ColumnType) -> Option<u32> {
        self.entries()
            .iter()
            .find(|(t, _)| t == column_type)
            .map(|(_, limit)| *limit)
    }
}
