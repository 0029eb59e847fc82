//! Run Report Module
//! Aggregated diagnostics for one pipeline run.
//!
//! Per-cell and per-row problems are recovered where they happen; this
//! collects them so the run ends with one readable summary instead of
//! interleaved per-row noise.

use crate::data::schema::Field;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Canonical fields with no matching input header.
    pub unresolved_fields: Vec<Field>,
    /// Fields matched by more than one header (first candidate was used).
    pub ambiguous_fields: Vec<(Field, Vec<String>)>,
    /// Rows dropped because an axis field (mass flow / inlet temp) was
    /// missing or malformed.
    pub dropped_rows: usize,
    /// Missing or malformed cells per resolved non-axis field.
    pub missing_cells: BTreeMap<Field, usize>,
    pub total_rows: usize,
    pub kept_rows: usize,
}

impl RunReport {
    pub fn has_warnings(&self) -> bool {
        !self.unresolved_fields.is_empty()
            || !self.ambiguous_fields.is_empty()
            || self.dropped_rows > 0
            || self.missing_cells.values().any(|&n| n > 0)
    }

    /// Emit the end-of-run warning summary.
    pub fn emit(&self) {
        if !self.unresolved_fields.is_empty() {
            let names: Vec<&str> = self.unresolved_fields.iter().map(|f| f.name()).collect();
            warn!(
                "no matching column for: {}; these fields are treated as missing everywhere",
                names.join(", ")
            );
        }
        for (field, candidates) in &self.ambiguous_fields {
            warn!(
                "multiple columns match {}: {:?}; using `{}`",
                field.name(),
                candidates,
                candidates[0]
            );
        }
        if self.dropped_rows > 0 {
            warn!(
                "dropped {} of {} rows with missing/malformed mass flow or inlet temperature",
                self.dropped_rows, self.total_rows
            );
        }
        for (field, count) in &self.missing_cells {
            if *count > 0 {
                warn!(
                    "{} missing/malformed value(s) in {} column",
                    count,
                    field.name()
                );
            }
        }
    }
}
