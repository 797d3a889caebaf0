#![forbid(unsafe_code)]

//! Series data held by the chart.

use std::collections::BTreeMap;

use dashkit_render::cell::Color;

use crate::error::{ChartError, Result};

/// Per-series drawing options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesOptions {
    /// Line color; the canvas default when unset.
    pub color: Option<Color>,
    /// Custom X axis labels by index. Indices without an entry show the
    /// index itself.
    pub x_labels: BTreeMap<usize, String>,
}

impl SeriesOptions {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_x_labels<S: Into<String>>(
        mut self,
        labels: impl IntoIterator<Item = (usize, S)>,
    ) -> Self {
        self.x_labels
            .extend(labels.into_iter().map(|(i, s)| (i, s.into())));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeriesValues {
    pub(crate) values: Vec<f64>,
    pub(crate) options: SeriesOptions,
}

impl SeriesValues {
    pub(crate) fn new(name: &str, values: Vec<f64>, options: SeriesOptions) -> Result<Self> {
        let invalid = |reason| ChartError::InvalidSeries {
            name: name.to_owned(),
            reason,
        };
        if name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if options.x_labels.values().any(String::is_empty) {
            return Err(invalid("x labels must not be empty"));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(invalid("values must be finite"));
        }
        Ok(Self { values, options })
    }

    pub(crate) fn label(&self, index: usize) -> Option<&str> {
        self.options.x_labels.get(&index).map(String::as_str)
    }
}

/// Smallest range covering zero and every value in `series`.
pub(crate) fn value_range<'a>(series: impl IntoIterator<Item = &'a SeriesValues>) -> (f64, f64) {
    series
        .into_iter()
        .flat_map(|s| s.values.iter().copied())
        .fold((0.0, 0.0), |(lo, hi), v| (f64::min(lo, v), f64::max(hi, v)))
}
