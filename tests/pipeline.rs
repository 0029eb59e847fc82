use polars::prelude::*;

use cooler_curves::config::Thresholds;
use cooler_curves::curves::{group_curves, Metric};
use cooler_curves::pipeline;

fn thresholds() -> Thresholds {
    Thresholds {
        rated_power: 30.0,
        design_duty: 3_350_000.0,
        design_ua: 280.0,
    }
}

fn bench_frame() -> DataFrame {
    df!(
        "Mass Flow Rate (kg/hr)" => [1000.0, 2000.0],
        "TS Inlet Temp (Deg C)" => [50.0, 50.0],
        "TS Outlet Temperature (Deg C)" => [38.0, 41.0],
        "Air Mass Flow (kg/h)" => [90_000.0, 90_000.0],
        "UA (kJ/C-h)" => [300.0, 250.0],
        "HE Duty (kcal/h)" => [-3_000_000.0, -3_400_000.0],
        "Break Power/Fan Summer (kW)" => [22.0, 28.0],
        "Break Power/Fan Winter (kW)" => [15.0, 19.0],
    )
    .expect("test frame")
}

#[test]
fn scenario_ua_and_duty_exceedance() {
    let output = pipeline::run(&bench_frame(), &thresholds()).expect("pipeline");

    // UA curve for 50 °C holds both samples in mass-flow order.
    let ua = &output.performance.primary.series[0];
    assert_eq!(ua.label, "UA @ 50°C");
    assert_eq!(ua.x, vec![1000.0, 2000.0]);
    assert_eq!(ua.y, vec![300.0, 250.0]);

    // UA exceeds its design value from the left edge to the interpolated
    // crossing at x = 1000 + (280-300)*(2000-1000)/(250-300) = 1400.
    let ua_band = &output.performance.primary.bands[0];
    assert_eq!(ua_band.baseline, 280.0);
    assert_eq!(ua_band.x.first().copied(), Some(1000.0));
    let end = ua_band.x.last().copied().unwrap();
    assert!((end - 1400.0).abs() < 1e-9, "ua crossing at {end}");
    assert_eq!(ua_band.y.last().copied(), Some(280.0));

    // Duty (sign-normalized) crosses its design value going up at
    // x = 1000 + (3.35e6-3.0e6)*(2000-1000)/(0.4e6) = 1875.
    let duty_axis = output.performance.secondary.as_ref().expect("duty axis");
    let duty_band = &duty_axis.bands[0];
    let start = duty_band.x.first().copied().unwrap();
    assert!((start - 1875.0).abs() < 1e-9, "duty crossing at {start}");
    assert_eq!(duty_band.x.last().copied(), Some(2000.0));
}

#[test]
fn duty_is_always_non_negative() {
    let output = pipeline::run(&bench_frame(), &thresholds()).expect("pipeline");
    for record in &output.records {
        let duty = record.duty.expect("duty present");
        assert!(duty >= 0.0);
    }
    // And the magnitude survived the sign flip.
    assert_eq!(output.records[0].duty, Some(3_000_000.0));
}

#[test]
fn malformed_non_axis_cell_keeps_the_row() {
    let df = df!(
        "Mass Flow Rate (kg/hr)" => [1000.0, 2000.0],
        "TS Inlet Temp (Deg C)" => [50.0, 50.0],
        "UA (kJ/C-h)" => ["300", "not-a-number"],
    )
    .expect("test frame");

    let output = pipeline::run(&df, &thresholds()).expect("pipeline");
    assert_eq!(output.records.len(), 2);
    assert_eq!(output.records[0].ua, Some(300.0));
    assert_eq!(output.records[1].ua, None);
    assert_eq!(output.report.dropped_rows, 0);

    // The bad cell only vanishes from the UA curve.
    let curves = group_curves(&output.records, Metric::Ua);
    assert_eq!(curves[0].points, vec![(1000.0, 300.0)]);
}

#[test]
fn malformed_axis_cell_drops_the_row_everywhere() {
    let df = df!(
        "Mass Flow Rate (kg/hr)" => ["1000", "oops"],
        "TS Inlet Temp (Deg C)" => [50.0, 50.0],
        "UA (kJ/C-h)" => [300.0, 250.0],
        "Break Power/Fan Summer (kW)" => [22.0, 28.0],
    )
    .expect("test frame");

    let output = pipeline::run(&df, &thresholds()).expect("pipeline");
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.report.dropped_rows, 1);
    assert_eq!(output.report.total_rows, 2);

    for metric in [Metric::Ua, Metric::FanPowerSummer] {
        for curve in group_curves(&output.records, metric) {
            assert!(curve.points.iter().all(|p| p.0 == 1000.0));
        }
    }
}

#[test]
fn grouping_is_a_strict_partition() {
    let df = df!(
        "Mass Flow Rate (kg/hr)" => [1000.0, 1500.0, 2000.0, 1200.0, 1800.0],
        "TS Inlet Temp (Deg C)" => [50.0, 55.0, 50.0, 60.0, 55.0],
        "UA (kJ/C-h)" => [300.0, 290.0, 250.0, 285.0, 260.0],
    )
    .expect("test frame");

    let output = pipeline::run(&df, &thresholds()).expect("pipeline");
    let curves = group_curves(&output.records, Metric::Ua);

    let total: usize = curves.iter().map(|c| c.points.len()).sum();
    assert_eq!(total, output.records.len());
    for record in &output.records {
        let holders = curves
            .iter()
            .filter(|c| c.inlet_temp == record.inlet_temp)
            .count();
        assert_eq!(holders, 1);
    }
    // Within every curve, mass flow is non-decreasing.
    for curve in &curves {
        for pair in curve.points.windows(2) {
            assert!(pair[0].0 <= pair[1].0);
        }
    }
}

#[test]
fn whitespace_padded_headers_resolve() {
    let df = df!(
        "  Mass Flow Rate (kg/hr)  " => [1000.0],
        " TS Inlet Temp (Deg C)" => [50.0],
        "UA (kJ/C-h) " => [300.0],
    )
    .expect("test frame");

    let output = pipeline::run(&df, &thresholds()).expect("pipeline");
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].ua, Some(300.0));
}

#[test]
fn unresolved_columns_warn_but_do_not_abort() {
    let df = df!(
        "Mass Flow Rate (kg/hr)" => [1000.0, 2000.0],
        "TS Inlet Temp (Deg C)" => [50.0, 50.0],
    )
    .expect("test frame");

    let output = pipeline::run(&df, &thresholds()).expect("pipeline");
    assert_eq!(output.records.len(), 2);
    assert!(output.report.has_warnings());
    assert!(!output.report.unresolved_fields.is_empty());

    // Fan chart renders as absent curves, still carrying the rated line.
    assert!(output.fan_power.primary.series.is_empty());
    assert_eq!(output.fan_power.primary.thresholds.len(), 1);
}

#[test]
fn rerun_on_identical_input_is_byte_identical() {
    let df = bench_frame();
    let t = thresholds();
    let first = pipeline::run(&df, &t).expect("first run");
    let second = pipeline::run(&df, &t).expect("second run");

    assert_eq!(first.performance, second.performance);
    assert_eq!(first.fan_power, second.fan_power);
    assert_eq!(first.records, second.records);
}

#[test]
fn fan_power_chart_has_seasonal_series_and_range() {
    let output = pipeline::run(&bench_frame(), &thresholds()).expect("pipeline");
    let axis = &output.fan_power.primary;

    let labels: Vec<&str> = axis.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Summer Power @ 50°C", "Winter Power @ 50°C"]);

    // Padded to min*0.9 .. max(max, rated)*1.1 per the bench report layout.
    let (lo, hi) = axis.range.expect("fixed range");
    assert!((lo - 13.5).abs() < 1e-9);
    assert!((hi - 33.0).abs() < 1e-9);
}
