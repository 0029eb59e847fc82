//! Curves module - grouping and threshold exceedance

mod exceedance;
mod grouper;

pub use exceedance::{exceedance_regions, ExceedanceRegion};
pub use grouper::{group_curves, Curve, Metric};
