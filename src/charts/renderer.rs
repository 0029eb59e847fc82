//! Static Chart Renderer
//! Draws assembled chart specs to PNG files with plotters.
//!
//! Everything the renderer needs arrives in the `ChartSpec`: it maps
//! styles to plotters primitives, shades exceedance bands as filled
//! polygons against the threshold baseline, and mirrors the bench report
//! layout (title, bottom legend, dual y-axis on the UA/duty chart).

use anyhow::{Context, Result};
use plotters::chart::DualCoordChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use crate::charts::assembler::{
    AxisSpec, ChartSpec, LineKind, Series, SeriesStyle, ShadeBand, ThresholdLine,
};

const CHART_SIZE: (u32, u32) = (1400, 800);
const SHADE_ALPHA: f64 = 0.3;

type Area<'b> = DrawingArea<BitMapBackend<'b>, Shift>;
type Ctx<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;
type DualCtx<'a, 'b> = DualCoordChartContext<
    'a,
    BitMapBackend<'b>,
    Cartesian2d<RangedCoordf64, RangedCoordf64>,
    Cartesian2d<RangedCoordf64, RangedCoordf64>,
>;

/// Render one chart spec to a PNG file.
pub fn render_chart(spec: &ChartSpec, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .with_context(|| format!("failed to prepare {}", path.display()))?;

    match &spec.secondary {
        Some(secondary) => render_dual(&root, spec, secondary)?,
        None => render_single(&root, spec)?,
    }

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn render_single(root: &Area<'_>, spec: &ChartSpec) -> Result<()> {
    let x_range = x_extent(spec);
    let y_range = y_extent(&spec.primary);

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title.clone(), ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label.clone())
        .y_desc(spec.primary.label.clone())
        .draw()?;

    // Shading under the curves, curves, then threshold lines on top.
    for band in &spec.primary.bands {
        chart.draw_series(std::iter::once(band_polygon(band)))?;
    }
    for series in &spec.primary.series {
        draw_series(&mut chart, series)?;
    }
    for line in &spec.primary.thresholds {
        let series = threshold_series(line, x_range);
        draw_series(&mut chart, &series)?;
    }

    draw_legend(&mut chart)
}

fn render_dual(root: &Area<'_>, spec: &ChartSpec, secondary: &AxisSpec) -> Result<()> {
    let x_range = x_extent(spec);
    let y_range = y_extent(&spec.primary);
    let y2_range = y_extent(secondary);

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title.clone(), ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .right_y_label_area_size(80)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?
        .set_secondary_coord(x_range.0..x_range.1, y2_range.0..y2_range.1);

    chart
        .configure_mesh()
        .x_desc(spec.x_label.clone())
        .y_desc(spec.primary.label.clone())
        .draw()?;
    chart
        .configure_secondary_axes()
        .y_desc(secondary.label.clone())
        .draw()?;

    for band in &spec.primary.bands {
        chart.draw_series(std::iter::once(band_polygon(band)))?;
    }
    for band in &secondary.bands {
        chart.draw_secondary_series(std::iter::once(band_polygon(band)))?;
    }
    for series in &spec.primary.series {
        draw_series(&mut chart, series)?;
    }
    for series in &secondary.series {
        draw_secondary(&mut chart, series)?;
    }
    for line in &spec.primary.thresholds {
        let series = threshold_series(line, x_range);
        draw_series(&mut chart, &series)?;
    }
    for line in &secondary.thresholds {
        let series = threshold_series(line, x_range);
        draw_secondary(&mut chart, &series)?;
    }

    draw_legend(&mut chart)
}

fn draw_series(chart: &mut Ctx<'_, '_>, series: &Series) -> Result<()> {
    let points = points_of(series);
    let style = shape_style(&series.style);
    let anno = match dash_pattern(series.style.kind) {
        None => chart.draw_series(LineSeries::new(points, style))?,
        Some((size, spacing)) => {
            chart.draw_series(DashedLineSeries::new(points, size, spacing, style))?
        }
    };
    anno.label(series.label.clone())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    Ok(())
}

fn draw_secondary(chart: &mut DualCtx<'_, '_>, series: &Series) -> Result<()> {
    let points = points_of(series);
    let style = shape_style(&series.style);
    let anno = match dash_pattern(series.style.kind) {
        None => chart.draw_secondary_series(LineSeries::new(points, style))?,
        Some((size, spacing)) => {
            chart.draw_secondary_series(DashedLineSeries::new(points, size, spacing, style))?
        }
    };
    anno.label(series.label.clone())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    Ok(())
}

fn draw_legend<'a>(chart: &mut Ctx<'a, 'a>) -> Result<()> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerMiddle)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .label_font(("sans-serif", 13))
        .draw()?;
    Ok(())
}

fn points_of(series: &Series) -> Vec<(f64, f64)> {
    series
        .x
        .iter()
        .copied()
        .zip(series.y.iter().copied())
        .collect()
}

/// The fill polygon for one exceedance band: along the curve, then back
/// along the threshold baseline.
fn band_polygon(band: &ShadeBand) -> Polygon<(f64, f64)> {
    let mut vertices: Vec<(f64, f64)> = band
        .x
        .iter()
        .copied()
        .zip(band.y.iter().copied())
        .collect();
    if let (Some(&first), Some(&last)) = (band.x.first(), band.x.last()) {
        vertices.push((last, band.baseline));
        vertices.push((first, band.baseline));
    }
    let (r, g, b) = band.color;
    Polygon::new(vertices, RGBColor(r, g, b).mix(SHADE_ALPHA).filled())
}

/// A horizontal design-limit line spanning the plotted x-domain.
fn threshold_series(line: &ThresholdLine, x_range: (f64, f64)) -> Series {
    Series {
        label: line.label.clone(),
        x: vec![x_range.0, x_range.1],
        y: vec![line.value, line.value],
        style: line.style,
    }
}

fn shape_style(style: &SeriesStyle) -> ShapeStyle {
    let (r, g, b) = style.color;
    RGBColor(r, g, b).stroke_width(style.width)
}

/// (dash length, gap); None draws solid. DashDot is approximated with a
/// longer dash.
fn dash_pattern(kind: LineKind) -> Option<(i32, i32)> {
    match kind {
        LineKind::Solid => None,
        LineKind::Dashed => Some((10, 6)),
        LineKind::Dotted => Some((2, 5)),
        LineKind::DashDot => Some((14, 8)),
    }
}

fn x_extent(spec: &ChartSpec) -> (f64, f64) {
    let mut xs: Vec<f64> = spec
        .primary
        .series
        .iter()
        .flat_map(|s| s.x.iter().copied())
        .collect();
    if let Some(secondary) = &spec.secondary {
        xs.extend(secondary.series.iter().flat_map(|s| s.x.iter().copied()));
    }
    span_of(&xs, 0.0)
}

fn y_extent(axis: &AxisSpec) -> (f64, f64) {
    if let Some(range) = axis.range {
        return range;
    }
    let mut ys: Vec<f64> = axis
        .series
        .iter()
        .flat_map(|s| s.y.iter().copied())
        .collect();
    // Keep the design-limit lines in frame even when every curve sits on
    // one side of them.
    ys.extend(axis.thresholds.iter().map(|t| t.value));
    span_of(&ys, 0.1)
}

/// Min/max padded by `pad` of the span, with safe fallbacks for empty and
/// degenerate inputs so plotters never sees a reversed range.
fn span_of(values: &[f64], pad: f64) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if min > max {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let margin = (max - min) * pad;
    (min - margin, max + margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_pads_and_handles_degenerate_input() {
        assert_eq!(span_of(&[], 0.1), (0.0, 1.0));
        assert_eq!(span_of(&[5.0], 0.1), (4.0, 6.0));
        assert_eq!(span_of(&[0.0, 10.0], 0.1), (-1.0, 11.0));
    }

    #[test]
    fn dash_patterns_distinguish_line_kinds() {
        assert_eq!(dash_pattern(LineKind::Solid), None);
        assert!(dash_pattern(LineKind::Dotted).unwrap().0 < dash_pattern(LineKind::Dashed).unwrap().0);
    }
}
