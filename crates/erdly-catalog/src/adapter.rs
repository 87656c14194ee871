//! Native limit lookup trait
//!
//! Database engines apply a default size to some types when a column does
//! not declare one. Attribute descriptions only surface limits that differ
//! from that default, so classification needs a way to ask for it.

use erdly_core::ColumnType;

/// Source of native default limits, keyed by column type
pub trait NativeLimits: Send + Sync {
    /// Name of the catalog (e.g. "MySQL")
    fn name(&self) -> &str;

    /// Default limit the engine applies to `column_type`, if any
    fn native_limit(&self, column_type: &ColumnType) -> Option<u32>;
}

/// Plain functions and closures work as catalogs
impl<F> NativeLimits for F
where
    F: Fn(&ColumnType) -> Option<u32> + Send + Sync,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn native_limit(&self, column_type: &ColumnType) -> Option<u32> {
        self(column_type)
    }
}

/// Catalog used when no engine information is available
///
/// Every lookup answers "no default", so declared limits are never suppressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoNativeLimits;

impl NativeLimits for NoNativeLimits {
    fn name(&self) -> &str {
        "none"
    }

    fn native_limit(&self, _column_type: &ColumnType) -> Option<u32> {
        None
    }
}
