//! Curve Grouper Module
//! Partitions normalized records into per-temperature metric curves.

use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

use crate::data::CanonicalRecord;

/// The plottable metrics of a canonical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Ua,
    Duty,
    FanPowerSummer,
    FanPowerWinter,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Ua => "UA",
            Metric::Duty => "Duty",
            Metric::FanPowerSummer => "Summer Power",
            Metric::FanPowerWinter => "Winter Power",
        }
    }

    pub fn value(self, record: &CanonicalRecord) -> Option<f64> {
        match self {
            Metric::Ua => record.ua,
            Metric::Duty => record.duty,
            Metric::FanPowerSummer => record.fan_power_summer,
            Metric::FanPowerWinter => record.fan_power_winter,
        }
    }
}

/// One metric's samples across mass flow, for one inlet-temperature
/// condition. Points are ordered by ascending mass flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub inlet_temp: f64,
    pub metric: Metric,
    /// (mass flow, metric value)
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Partition records by inlet temperature and extract one metric.
///
/// Grouping is exact f64 equality: the bench runs at a small fixed set of
/// discrete setpoints (50/55/60/65/70/75 °C), so no tolerance bucketing is
/// done and near-equal but not bit-identical temperatures form distinct
/// curves. Curves come back in ascending temperature order; within a
/// curve, points are sorted by ascending mass flow with input order
/// breaking ties. Records where the metric is missing are omitted, so a
/// curve may be empty (rendered as absent, not an error).
pub fn group_curves(records: &[CanonicalRecord], metric: Metric) -> Vec<Curve> {
    let mut groups: BTreeMap<OrderedFloat<f64>, Vec<(f64, f64)>> = BTreeMap::new();

    // Every observed temperature gets a group, even if the metric turns
    // out to be missing for all of its records.
    for record in records {
        let group = groups.entry(OrderedFloat(record.inlet_temp)).or_default();
        if let Some(value) = metric.value(record) {
            group.push((record.mass_flow, value));
        }
    }

    groups
        .into_iter()
        .map(|(temp, mut points)| {
            // Stable: equal mass flows keep their input order.
            points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            Curve {
                inlet_temp: temp.into_inner(),
                metric,
                points,
            }
        })
        .collect()
}
