//! Value Normalizer Module
//! Coerces reconciled columns into fixed-shape numeric records.

use polars::prelude::*;

use crate::data::report::RunReport;
use crate::data::schema::{ColumnMap, Field};

/// One normalized test-bench row. Immutable once built.
///
/// `None` marks a value that was absent or failed numeric coercion.
/// Rows missing either axis field never make it into a record at all.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub mass_flow: f64,
    pub inlet_temp: f64,
    pub outlet_temp: Option<f64>,
    pub air_mass_flow: Option<f64>,
    pub ua: Option<f64>,
    /// Always the non-negative magnitude; the bench reports heat removed
    /// with an instrument-dependent sign.
    pub duty: Option<f64>,
    pub fan_power_summer: Option<f64>,
    pub fan_power_winter: Option<f64>,
}

/// Coerce one raw cell to a finite numeric value.
///
/// Numbers pass through; strings are trimmed and parsed (integers,
/// decimals, signs, scientific notation); everything else — empty cells,
/// placeholder text, non-finite parses — is missing.
fn coerce_cell(value: &AnyValue) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => parse_number(s),
        AnyValue::StringOwned(s) => parse_number(s.as_str()),
        other => other.extract::<f64>().filter(|v| v.is_finite()),
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Build canonical records from the loaded table.
///
/// Rows with a missing axis value are dropped and counted; missing
/// non-axis values only blank that field. Duty is folded to its absolute
/// value unconditionally.
pub fn normalize_records(
    df: &DataFrame,
    columns: &ColumnMap,
    report: &mut RunReport,
) -> Vec<CanonicalRecord> {
    fn column_for<'a>(df: &'a DataFrame, columns: &ColumnMap, field: Field) -> Option<&'a Column> {
        columns.get(field).and_then(|label| df.column(label).ok())
    }

    let mass_flow_col = column_for(df, columns, Field::MassFlow);
    let inlet_temp_col = column_for(df, columns, Field::InletTemp);
    let outlet_temp_col = column_for(df, columns, Field::OutletTemp);
    let air_mass_flow_col = column_for(df, columns, Field::AirMassFlow);
    let ua_col = column_for(df, columns, Field::Ua);
    let duty_col = column_for(df, columns, Field::Duty);
    let summer_col = column_for(df, columns, Field::FanPowerSummer);
    let winter_col = column_for(df, columns, Field::FanPowerWinter);

    let cell = |col: Option<&Column>, row: usize| -> Option<f64> {
        col.and_then(|c| c.get(row).ok())
            .as_ref()
            .and_then(coerce_cell)
    };

    report.total_rows = df.height();

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mass_flow = cell(mass_flow_col, row);
        let inlet_temp = cell(inlet_temp_col, row);

        // Axis fields anchor every curve; without both the row cannot be
        // plotted anywhere.
        let (Some(mass_flow), Some(inlet_temp)) = (mass_flow, inlet_temp) else {
            report.dropped_rows += 1;
            continue;
        };

        let mut optional = |field: Field, col: Option<&Column>| -> Option<f64> {
            let value = cell(col, row);
            if value.is_none() && col.is_some() {
                *report.missing_cells.entry(field).or_insert(0) += 1;
            }
            value
        };

        records.push(CanonicalRecord {
            mass_flow,
            inlet_temp,
            outlet_temp: optional(Field::OutletTemp, outlet_temp_col),
            air_mass_flow: optional(Field::AirMassFlow, air_mass_flow_col),
            ua: optional(Field::Ua, ua_col),
            duty: optional(Field::Duty, duty_col).map(f64::abs),
            fan_power_summer: optional(Field::FanPowerSummer, summer_col),
            fan_power_winter: optional(Field::FanPowerWinter, winter_col),
        });
    }

    report.kept_rows = records.len();
    records
}
