//! Native type limit catalogs
//!
//! Attribute type descriptions hide size limits that merely repeat the
//! database engine's default for the type. This crate answers "what is the
//! default?" through the [`NativeLimits`] trait:
//!
//! - [`NoNativeLimits`] - no engine information, nothing is suppressed
//! - [`EngineCatalog`] - built-in tables for PostgreSQL, MySQL and SQLite
//! - [`StaticLimits`] - an explicit map, usually built from `erdly.toml`
//! - any `Fn(&ColumnType) -> Option<u32>` closure
//!
//! ## Example
//!
//! ```rust
//! use erdly_catalog::{EngineCatalog, NativeLimits};
//! use erdly_core::ColumnType;
//!
//! let mysql = EngineCatalog::Mysql;
//! assert_eq!(mysql.native_limit(&ColumnType::String), Some(255));
//! ```

pub mod adapter;
pub mod engines;
pub mod memory;

pub use adapter::{NativeLimits, NoNativeLimits};
pub use engines::EngineCatalog;
pub use memory::StaticLimits;
