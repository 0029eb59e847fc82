//! Charts module - chart assembly and static rendering

mod assembler;
mod renderer;

pub use assembler::{
    fan_power_chart, performance_chart, temp_color, AxisSpec, ChartSpec, LineKind, Rgb, Series,
    SeriesStyle, ShadeBand, ThresholdLine,
};
pub use renderer::render_chart;
