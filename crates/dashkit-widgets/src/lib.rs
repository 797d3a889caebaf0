#![forbid(unsafe_code)]

//! Interactive widgets for dashkit.
//!
//! Currently one widget: [`linechart::LineChart`], a Braille line chart that
//! zooms on scroll and traces the values under the mouse pointer.

pub mod error;
pub mod linechart;

pub use error::{ChartError, Result};
pub use linechart::{DrawStatus, LineChart, LineChartOptions, SeriesOptions};
