//! Schema Reconciler Module
//! Maps drifting test-bench column headers onto the canonical field set.
//!
//! Bench exports rename headers between revisions ("TS Gas Mass Flow
//! (kg/h)" vs "Mass Flow Rate (kg/hr)", "Brake" vs "Break" in the fan
//! power columns) and pad them with whitespace. Resolution is driven by a
//! declarative alias table so the accepted spellings stay in one place.

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Alias table lists field {0:?} more than once")]
    DuplicateField(Field),
    #[error("Alias `{0}` is claimed by more than one field")]
    DuplicateAlias(String),
}

/// Canonical fields of one test-bench record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    MassFlow,
    InletTemp,
    OutletTemp,
    AirMassFlow,
    Ua,
    Duty,
    FanPowerSummer,
    FanPowerWinter,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::MassFlow,
        Field::InletTemp,
        Field::OutletTemp,
        Field::AirMassFlow,
        Field::Ua,
        Field::Duty,
        Field::FanPowerSummer,
        Field::FanPowerWinter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::MassFlow => "mass flow",
            Field::InletTemp => "inlet temperature",
            Field::OutletTemp => "outlet temperature",
            Field::AirMassFlow => "air mass flow",
            Field::Ua => "UA",
            Field::Duty => "duty",
            Field::FanPowerSummer => "fan power (summer)",
            Field::FanPowerWinter => "fan power (winter)",
        }
    }

    /// Fields a record cannot be plotted without; a missing value here
    /// drops the whole row.
    pub fn is_axis(self) -> bool {
        matches!(self, Field::MassFlow | Field::InletTemp)
    }
}

/// Accepted raw header spellings per canonical field, in preference order.
pub struct AliasTable {
    entries: Vec<(Field, Vec<&'static str>)>,
}

impl AliasTable {
    /// The header spellings observed across bench export revisions.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                (
                    Field::MassFlow,
                    vec![
                        "Mass Flow Rate (kg/hr)",
                        "TS Gas Mass Flow (kg/h)",
                        "TS Gas Mass Flow (kg/hr)",
                    ],
                ),
                (
                    Field::InletTemp,
                    vec!["TS Inlet Temp (Deg C)", "TS Inlet Temperature (Deg C)"],
                ),
                (Field::OutletTemp, vec!["TS Outlet Temperature (Deg C)"]),
                (Field::AirMassFlow, vec!["Air Mass Flow (kg/h)"]),
                (
                    Field::Ua,
                    vec![
                        "Overall Heat Transfer Co-efficient (UA) (kcal/hr.m².°C)",
                        "UA (kcal/hr.m².°C)",
                        "UA (kJ/C-h)",
                    ],
                ),
                (
                    Field::Duty,
                    vec!["Heat Exchanger Duty (kcal/hr)", "HE Duty (kcal/h)"],
                ),
                (
                    Field::FanPowerSummer,
                    vec![
                        "Break Power/Fan Summer (kW)",
                        "Brake Power/Fan, Summer (kW)",
                        "Brake Power/Fan Summer (kW)",
                    ],
                ),
                (
                    Field::FanPowerWinter,
                    vec![
                        "Break Power/Fan Winter (kW)",
                        "Brake Power/Fan, Winter (kW)",
                        "Brake Power/Fan Winter (kW)",
                    ],
                ),
            ],
        }
    }

    /// Startup validation: each field listed once, no alias claimed twice.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen_fields = Vec::new();
        let mut seen_aliases: Vec<&str> = Vec::new();
        for (field, aliases) in &self.entries {
            if seen_fields.contains(field) {
                return Err(SchemaError::DuplicateField(*field));
            }
            seen_fields.push(*field);
            for &alias in aliases {
                if seen_aliases.contains(&alias) {
                    return Err(SchemaError::DuplicateAlias(alias.to_string()));
                }
                seen_aliases.push(alias);
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[(Field, Vec<&'static str>)] {
        &self.entries
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Result of reconciling observed headers against the alias table.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    resolved: BTreeMap<Field, String>,
    /// Fields with no matching header; treated as entirely missing.
    pub unresolved: Vec<Field>,
    /// Fields matched by more than one header, with every candidate in
    /// preference order. The first candidate is the one used.
    pub ambiguous: Vec<(Field, Vec<String>)>,
}

impl ColumnMap {
    /// The raw header label resolved for a canonical field.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.resolved.get(&field).map(String::as_str)
    }
}

/// Match observed column labels against the alias table.
///
/// Labels match case-sensitively after trimming leading/trailing
/// whitespace on both sides. When several headers match aliases of the
/// same field, alias-table order (then input order) decides — never
/// iteration order of a hash map.
pub fn resolve_columns(observed: &[String], aliases: &AliasTable) -> ColumnMap {
    let mut map = ColumnMap::default();

    for (field, alias_list) in aliases.entries() {
        let mut candidates: Vec<String> = Vec::new();
        for alias in alias_list {
            for label in observed {
                if label.trim() == alias.trim() && !candidates.contains(label) {
                    candidates.push(label.clone());
                }
            }
        }
        match candidates.len() {
            0 => map.unresolved.push(*field),
            1 => {
                map.resolved.insert(*field, candidates.remove(0));
            }
            _ => {
                map.resolved.insert(*field, candidates[0].clone());
                map.ambiguous.push((*field, candidates));
            }
        }
    }

    map
}
