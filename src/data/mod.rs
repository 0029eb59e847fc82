//! Data module - CSV loading, schema reconciliation, value normalization

mod loader;
mod normalizer;
mod report;
mod schema;

pub use loader::{BenchTable, LoaderError};
pub use normalizer::{normalize_records, CanonicalRecord};
pub use report::RunReport;
pub use schema::{resolve_columns, AliasTable, ColumnMap, Field, SchemaError};
