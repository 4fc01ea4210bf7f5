pub mod catalog;
pub mod chart;
pub mod state;

pub use catalog::{IndicatorView, RenderOptions};
pub use chart::ChartSeries;
pub use state::{Completion, ViewHandle};
