//! 训练日志解析和画图

pub mod chart;
pub mod extract;
pub mod smooth;

pub use chart::render_curves;
pub use extract::{extract_curves, PlotError};
pub use smooth::smooth;
