#![forbid(unsafe_code)]

//! Axis scales and layout for the line chart.
//!
//! The chart area is split into a left column holding the Y axis and its
//! labels, a bottom row holding the X axis, a row of X labels below that,
//! and the graph above and to the right of the axes:
//!
//! ```text
//!   10 │      ⢀⠔⠁
//!    5 │  ⢀⠔⠁
//!    0 └───────────
//!      0   1   2
//! ```
//!
//! Scales map data onto Braille pixels: two per cell horizontally, four per
//! cell vertically.

use dashkit_core::geometry::{Point, Rect};
use dashkit_render::braille::{COLS_PER_CELL, ROWS_PER_CELL};
use unicode_width::UnicodeWidthStr;

use crate::error::{ChartError, Result};

/// Smallest graph the chart will draw, in cells.
pub const MIN_GRAPH_WIDTH: u16 = 2;
pub const MIN_GRAPH_HEIGHT: u16 = 1;

/// Rows below the graph: the X axis and its labels.
pub const X_AXIS_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Linear {
    min: f64,
    max: f64,
    cells: u16,
    pixels: u32,
}

impl Linear {
    fn new(min: f64, max: f64, cells: u16, per_cell: u16) -> Result<Self> {
        if cells == 0 {
            return Err(ChartError::InvalidScale {
                min,
                max,
                cells,
                reason: "graph has no cells",
            });
        }
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(ChartError::InvalidScale {
                min,
                max,
                cells,
                reason: "range must be finite and ordered",
            });
        }
        // A single value still needs a non-zero span to scale against.
        let max = if max == min { min + 1.0 } else { max };
        Ok(Self {
            min,
            max,
            cells,
            pixels: u32::from(cells) * u32::from(per_cell),
        })
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }

    fn last_pixel(&self) -> f64 {
        f64::from(self.pixels - 1)
    }

    fn pixel_to_value(&self, pixel: i32) -> Result<f64> {
        if pixel < 0 || pixel as u32 >= self.pixels {
            return Err(ChartError::PixelOutOfRange {
                pixel,
                pixels: self.pixels,
            });
        }
        Ok(self.min + f64::from(pixel) * self.span() / self.last_pixel())
    }

    fn value_to_pixel(&self, value: f64) -> i32 {
        let p = ((value - self.min) / self.span() * self.last_pixel()).round();
        p.clamp(0.0, self.last_pixel()) as i32
    }
}

/// Horizontal scale over series indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XScale(Linear);

impl XScale {
    /// Scale `[min, max]` across `cells` columns.
    ///
    /// A window holding a single index is widened to `[min, min + 1]`.
    pub fn new(min: f64, max: f64, cells: u16) -> Result<Self> {
        Linear::new(min, max, cells, COLS_PER_CELL).map(Self)
    }

    /// Lowest index in the window.
    #[inline]
    #[must_use]
    pub fn min(&self) -> f64 {
        self.0.min
    }

    #[inline]
    #[must_use]
    pub fn max(&self) -> f64 {
        self.0.max
    }

    #[inline]
    #[must_use]
    pub fn cells(&self) -> u16 {
        self.0.cells
    }

    #[inline]
    #[must_use]
    pub fn pixels(&self) -> u32 {
        self.0.pixels
    }

    /// Value at pixel `pixel`, counted from the left edge of the graph.
    pub fn pixel_to_value(&self, pixel: i32) -> Result<f64> {
        self.0.pixel_to_value(pixel)
    }

    /// Nearest pixel for `value`, clamped into the graph.
    #[must_use]
    pub fn value_to_pixel(&self, value: f64) -> i32 {
        self.0.value_to_pixel(value)
    }
}

/// Vertical scale over series values. Pixel 0 is the bottom of the graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YScale(Linear);

impl YScale {
    pub fn new(min: f64, max: f64, cells: u16) -> Result<Self> {
        Linear::new(min, max, cells, ROWS_PER_CELL).map(Self)
    }

    #[inline]
    #[must_use]
    pub fn min(&self) -> f64 {
        self.0.min
    }

    #[inline]
    #[must_use]
    pub fn max(&self) -> f64 {
        self.0.max
    }

    #[inline]
    #[must_use]
    pub fn pixels(&self) -> u32 {
        self.0.pixels
    }

    pub fn pixel_to_value(&self, pixel: i32) -> Result<f64> {
        self.0.pixel_to_value(pixel)
    }

    #[must_use]
    pub fn value_to_pixel(&self, value: f64) -> i32 {
        self.0.value_to_pixel(value)
    }

    /// Pixel row for `value` counted from the top, as the painter expects.
    #[must_use]
    pub fn value_to_painter_row(&self, value: f64) -> i32 {
        self.0.last_pixel() as i32 - self.value_to_pixel(value)
    }
}

/// A positioned axis label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabel {
    pub pos: Point,
    pub text: String,
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Layout of the Y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct YDetails {
    /// Columns taken by the labels plus the axis line.
    pub width: u16,
    /// Top of the axis line.
    pub start: Point,
    /// Bottom of the axis line, where it meets the X axis.
    pub end: Point,
    pub scale: YScale,
    pub labels: Vec<AxisLabel>,
}

impl YDetails {
    /// Lay out the Y axis for values in `[min, max]` on a canvas of `area`.
    pub fn new(area: Rect, min: f64, max: f64) -> Result<Self> {
        let graph_height = area.height.saturating_sub(X_AXIS_ROWS);
        let scale = YScale::new(min, max, graph_height)?;
        let texts = label_texts(&scale);
        let width = label_width(&texts) + 1;
        let axis_x = area.x + width - 1;

        let mut labels: Vec<AxisLabel> = Vec::with_capacity(texts.len());
        for (value, text) in texts {
            let row = (scale.value_to_painter_row(value) as u32 / u32::from(ROWS_PER_CELL)) as u16;
            let pos = Point::new(axis_x - text.width() as u16, area.y + row);
            if labels.iter().any(|l| l.pos.y == pos.y) {
                continue;
            }
            labels.push(AxisLabel { pos, text });
        }

        Ok(Self {
            width,
            start: Point::new(axis_x, area.y),
            end: Point::new(axis_x, area.y + graph_height),
            scale,
            labels,
        })
    }

    /// Columns the Y axis needs for values in `[min, max]`.
    #[must_use]
    pub fn required_width(min: f64, max: f64) -> u16 {
        // Label text does not depend on the graph height.
        YScale::new(min, max, 1)
            .map(|scale| label_width(&label_texts(&scale)) + 1)
            .unwrap_or(1)
    }
}

fn label_texts(scale: &YScale) -> Vec<(f64, String)> {
    let (lo, hi) = (scale.min(), scale.max());
    // Top first so the highest value wins a shared row on short graphs.
    [hi, (lo + hi) / 2.0, lo]
        .into_iter()
        .map(|v| (v, format_value(v)))
        .collect()
}

fn label_width(texts: &[(f64, String)]) -> u16 {
    texts.iter().map(|(_, t)| t.width()).max().unwrap_or(0) as u16
}

/// Layout of the X axis.
#[derive(Debug, Clone, PartialEq)]
pub struct XDetails {
    /// Left end of the axis line, at the corner with the Y axis.
    pub start: Point,
    /// Right end of the axis line.
    pub end: Point,
    pub scale: XScale,
}

impl XDetails {
    /// Lay out the X axis for indices `[min, max]` to the right of `y`.
    pub fn new(area: Rect, y: &YDetails, min: f64, max: f64) -> Result<Self> {
        let cells = area.width.saturating_sub(y.width);
        Ok(Self {
            start: y.end,
            end: Point::new(area.right().saturating_sub(1), y.end.y),
            scale: XScale::new(min, max, cells)?,
        })
    }

    /// Same layout with the scale narrowed or widened to `[min, max]`.
    pub fn with_range(&self, min: f64, max: f64) -> Result<Self> {
        Ok(Self {
            start: self.start,
            end: self.end,
            scale: XScale::new(min, max, self.scale.cells())?,
        })
    }

    /// Labels for whole indices in the window, skipping any that would
    /// overlap the previous one or run past the axis.
    ///
    /// `custom` supplies a label for an index; otherwise the index is used.
    pub fn labels(&self, custom: impl Fn(usize) -> Option<String>) -> Vec<AxisLabel> {
        let first = self.scale.min().ceil().max(0.0) as usize;
        let last = self.scale.max().floor().max(0.0) as usize;
        // Columns in u32: pixel offsets of wide graphs exceed u16.
        let graph_x = u32::from(self.start.x) + 1;
        let limit = u32::from(self.end.x) + 1;
        let row = self.start.y + 1;

        let mut labels = Vec::new();
        let mut next_free = graph_x;
        for i in first..=last {
            let px = self.scale.value_to_pixel(i as f64).max(0) as u32;
            let col = graph_x + px / u32::from(COLS_PER_CELL);
            if col >= limit {
                break;
            }
            if col < next_free {
                continue;
            }
            let text = custom(i).unwrap_or_else(|| i.to_string());
            let end = u32::try_from(text.width())
                .map_or(u32::MAX, |w| col.saturating_add(w));
            if end > limit {
                continue;
            }
            next_free = end + 1;
            labels.push(AxisLabel {
                pos: Point::new(col as u16, row),
                text,
            });
        }
        labels
    }
}

/// The plotting rectangle bounded by the two axes.
#[must_use]
pub fn graph_area(x: &XDetails, y: &YDetails) -> Rect {
    Rect::new(
        y.start.x + 1,
        y.start.y,
        x.scale.cells(),
        y.end.y - y.start.y,
    )
}
