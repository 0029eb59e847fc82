//! Chart Assembler Module
//! Builds renderer-agnostic specifications for the two performance charts.
//!
//! Everything here is plain data: named styled series, shade bands from
//! the exceedance engine, and horizontal threshold lines. No drawing
//! dependency enters this module.

use crate::config::Thresholds;
use crate::curves::{exceedance_regions, group_curves, Curve, Metric};
use crate::data::CanonicalRecord;

pub type Rgb = (u8, u8, u8);

pub const BLACK: Rgb = (0, 0, 0);
pub const RED: Rgb = (255, 0, 0);
pub const PURPLE: Rgb = (128, 0, 128);
pub const DARK_ORANGE: Rgb = (255, 140, 0);

/// Fixed colors for the bench's discrete inlet-temperature setpoints.
/// Unlisted temperatures fall back to black.
const TEMP_COLORS: [(f64, Rgb); 6] = [
    (50.0, (0x1f, 0x77, 0xb4)), // blue
    (55.0, (0xff, 0x7f, 0x0e)), // orange
    (60.0, (0x2c, 0xa0, 0x2c)), // green
    (65.0, (0xd6, 0x27, 0x28)), // red
    (70.0, (0x94, 0x67, 0xbd)), // purple
    (75.0, (0x8c, 0x56, 0x4b)), // brown
];

pub fn temp_color(temp: f64) -> Rgb {
    TEMP_COLORS
        .iter()
        .find(|(t, _)| *t == temp)
        .map(|(_, c)| *c)
        .unwrap_or(BLACK)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesStyle {
    pub kind: LineKind,
    pub color: Rgb,
    pub width: u32,
}

/// One named curve ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub style: SeriesStyle,
}

/// A fill between the curve samples `y` and the horizontal `baseline`,
/// covering one exceedance region. Band edges sit on the baseline exactly
/// when they were interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadeBand {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub baseline: f64,
    pub color: Rgb,
}

/// Horizontal design-limit line.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdLine {
    pub value: f64,
    pub label: String,
    pub style: SeriesStyle,
}

/// Everything drawn against one y-axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisSpec {
    pub label: String,
    pub series: Vec<Series>,
    pub bands: Vec<ShadeBand>,
    pub thresholds: Vec<ThresholdLine>,
    /// Fixed y-range; the renderer autoscales when None.
    pub range: Option<(f64, f64)>,
}

/// A complete chart: shared x-axis, one or two y-axes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub primary: AxisSpec,
    pub secondary: Option<AxisSpec>,
}

fn curve_series(curve: &Curve, kind: LineKind, width: u32) -> Series {
    Series {
        label: format!("{} @ {}°C", curve.metric.label(), curve.inlet_temp),
        x: curve.points.iter().map(|p| p.0).collect(),
        y: curve.points.iter().map(|p| p.1).collect(),
        style: SeriesStyle {
            kind,
            color: temp_color(curve.inlet_temp),
            width,
        },
    }
}

fn exceedance_bands(curve: &Curve, threshold: f64) -> Vec<ShadeBand> {
    exceedance_regions(&curve.points, threshold)
        .into_iter()
        .map(|region| ShadeBand {
            x: region.points.iter().map(|p| p.0).collect(),
            y: region.points.iter().map(|p| p.1).collect(),
            baseline: threshold,
            color: RED,
        })
        .collect()
}

/// Chart 1: UA (left axis, solid) and duty (right axis, dotted) against
/// mass flow, with design limits and out-of-spec shading on both axes.
pub fn performance_chart(records: &[CanonicalRecord], thresholds: &Thresholds) -> ChartSpec {
    let mut primary = AxisSpec {
        label: "Service Overall Heat Transfer Coefficient (UA) (kcal/hr.m².°C)".to_string(),
        ..Default::default()
    };
    for curve in group_curves(records, Metric::Ua) {
        if curve.is_empty() {
            continue;
        }
        primary.bands.extend(exceedance_bands(&curve, thresholds.design_ua));
        primary.series.push(curve_series(&curve, LineKind::Solid, 1));
    }
    primary.thresholds.push(ThresholdLine {
        value: thresholds.design_ua,
        label: format!("Design UA ({} kcal/hr.m².°C)", thresholds.design_ua),
        style: SeriesStyle {
            kind: LineKind::DashDot,
            color: DARK_ORANGE,
            width: 3,
        },
    });

    let mut secondary = AxisSpec {
        label: "Heat Exchanger Duty (kcal/hr)".to_string(),
        ..Default::default()
    };
    for curve in group_curves(records, Metric::Duty) {
        if curve.is_empty() {
            continue;
        }
        secondary
            .bands
            .extend(exceedance_bands(&curve, thresholds.design_duty));
        secondary.series.push(curve_series(&curve, LineKind::Dotted, 2));
    }
    secondary.thresholds.push(ThresholdLine {
        value: thresholds.design_duty,
        label: format!("Design Duty ({} kcal/hr)", thresholds.design_duty),
        style: SeriesStyle {
            kind: LineKind::Dashed,
            color: PURPLE,
            width: 3,
        },
    });

    ChartSpec {
        title: "Air Cooler Performance Curve: UA and Heat Duty vs. Mass Flow Rate".to_string(),
        x_label: "Mass Flow Rate (kg/hr)".to_string(),
        primary,
        secondary: Some(secondary),
    }
}

/// Chart 2: summer (solid) and winter (dashed) fan power against mass
/// flow, with the rated-power line. The y-range pads the observed power
/// values and always keeps the rated line in frame.
pub fn fan_power_chart(records: &[CanonicalRecord], thresholds: &Thresholds) -> ChartSpec {
    let mut axis = AxisSpec {
        label: "Break Power/Fan (kW)".to_string(),
        ..Default::default()
    };

    for curve in group_curves(records, Metric::FanPowerSummer) {
        if !curve.is_empty() {
            axis.series.push(curve_series(&curve, LineKind::Solid, 1));
        }
    }
    for curve in group_curves(records, Metric::FanPowerWinter) {
        if !curve.is_empty() {
            axis.series.push(curve_series(&curve, LineKind::Dashed, 1));
        }
    }

    axis.thresholds.push(ThresholdLine {
        value: thresholds.rated_power,
        label: format!("Rated Power ({} kW)", thresholds.rated_power),
        style: SeriesStyle {
            kind: LineKind::DashDot,
            color: BLACK,
            width: 3,
        },
    });

    let power_values: Vec<f64> = axis
        .series
        .iter()
        .flat_map(|s| s.y.iter().copied())
        .collect();
    if !power_values.is_empty() {
        let min = power_values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = power_values
            .iter()
            .copied()
            .fold(thresholds.rated_power, f64::max);
        axis.range = Some((min * 0.9, max * 1.1));
    }

    ChartSpec {
        title: "Air Cooler Performance Curve: Fan Power vs. Mass Flow Rate".to_string(),
        x_label: "Mass Flow Rate (kg/hr)".to_string(),
        primary: axis,
        secondary: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        mass_flow: f64,
        inlet_temp: f64,
        ua: Option<f64>,
        duty: Option<f64>,
        summer: Option<f64>,
        winter: Option<f64>,
    ) -> CanonicalRecord {
        CanonicalRecord {
            mass_flow,
            inlet_temp,
            outlet_temp: None,
            air_mass_flow: None,
            ua,
            duty,
            fan_power_summer: summer,
            fan_power_winter: winter,
        }
    }

    fn thresholds() -> Thresholds {
        Thresholds {
            rated_power: 30.0,
            design_duty: 3_350_000.0,
            design_ua: 280.0,
        }
    }

    #[test]
    fn known_setpoints_get_fixed_colors() {
        assert_eq!(temp_color(50.0), (0x1f, 0x77, 0xb4));
        assert_eq!(temp_color(75.0), (0x8c, 0x56, 0x4b));
        assert_eq!(temp_color(52.5), BLACK);
    }

    #[test]
    fn performance_chart_splits_metrics_across_axes() {
        let records = vec![
            record(1000.0, 50.0, Some(300.0), Some(3_000_000.0), None, None),
            record(2000.0, 50.0, Some(250.0), Some(3_400_000.0), None, None),
        ];
        let chart = performance_chart(&records, &thresholds());
        assert_eq!(chart.primary.series.len(), 1);
        assert_eq!(chart.primary.series[0].label, "UA @ 50°C");
        let secondary = chart.secondary.expect("duty axis");
        assert_eq!(secondary.series[0].label, "Duty @ 50°C");
        assert_eq!(secondary.thresholds[0].value, 3_350_000.0);
    }

    #[test]
    fn empty_metric_curves_are_absent_not_errors() {
        let records = vec![record(1000.0, 50.0, None, None, Some(20.0), None)];
        let chart = performance_chart(&records, &thresholds());
        assert!(chart.primary.series.is_empty());
        assert!(chart.primary.bands.is_empty());
        // Threshold line still drawn.
        assert_eq!(chart.primary.thresholds.len(), 1);
    }

    #[test]
    fn fan_chart_range_covers_rated_power() {
        let records = vec![
            record(1000.0, 50.0, None, None, Some(20.0), Some(12.0)),
            record(2000.0, 50.0, None, None, Some(28.0), Some(18.0)),
        ];
        let chart = fan_power_chart(&records, &thresholds());
        let (lo, hi) = chart.primary.range.expect("fixed range");
        assert!((lo - 12.0 * 0.9).abs() < 1e-9);
        assert!((hi - 30.0 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn fan_chart_without_power_data_autoscales() {
        let records = vec![record(1000.0, 50.0, Some(300.0), None, None, None)];
        let chart = fan_power_chart(&records, &thresholds());
        assert!(chart.primary.series.is_empty());
        assert!(chart.primary.range.is_none());
    }

    #[test]
    fn shade_band_edges_sit_on_threshold() {
        let records = vec![
            record(1000.0, 50.0, Some(300.0), None, None, None),
            record(2000.0, 50.0, Some(250.0), None, None, None),
        ];
        let chart = performance_chart(&records, &thresholds());
        let band = &chart.primary.bands[0];
        assert_eq!(band.baseline, 280.0);
        assert_eq!(band.x[0], 1000.0);
        assert_eq!(*band.y.last().unwrap(), 280.0);
    }
}
