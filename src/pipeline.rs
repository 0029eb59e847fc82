//! Pipeline Module
//! One synchronous run: loaded table + thresholds in, chart specs and the
//! aggregated run report out. Pure and deterministic, so identical input
//! always produces identical series and shading.

use polars::prelude::DataFrame;

use crate::charts::{fan_power_chart, performance_chart, ChartSpec};
use crate::config::Thresholds;
use crate::data::{
    normalize_records, resolve_columns, AliasTable, CanonicalRecord, RunReport, SchemaError,
};

pub struct RunOutput {
    pub performance: ChartSpec,
    pub fan_power: ChartSpec,
    pub records: Vec<CanonicalRecord>,
    pub report: RunReport,
}

pub fn run(df: &DataFrame, thresholds: &Thresholds) -> Result<RunOutput, SchemaError> {
    let aliases = AliasTable::standard();
    aliases.validate()?;

    let observed: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let columns = resolve_columns(&observed, &aliases);

    let mut report = RunReport {
        unresolved_fields: columns.unresolved.clone(),
        ambiguous_fields: columns.ambiguous.clone(),
        ..Default::default()
    };
    let records = normalize_records(df, &columns, &mut report);

    Ok(RunOutput {
        performance: performance_chart(&records, thresholds),
        fan_power: fan_power_chart(&records, thresholds),
        records,
        report,
    })
}
