#![forbid(unsafe_code)]

//! Line chart with scroll zoom and a mouse value trace.
//!
//! [`LineChart`] plots named series of values against their index using
//! Braille sub-cell pixels. Moving the pointer over the graph places a
//! vertical guide line under it and shows the value of every series at the
//! index under the pointer:
//!
//! ```text
//!   4 │ : a: 2.00 b: 4.00
//!     │        │    ⢀⠤⠒⠉
//!   2 │      ⢀⠤⡗⠉
//!     │  ⢀⠤⠒⠉  │
//!   0 └───────────────────
//!     0                 1
//! ```
//!
//! # Synchronization
//!
//! Mouse handling and drawing may run on different threads. Both take the
//! chart's lock for their whole duration, so a draw never sees a half
//! updated trace.
//!
//! # Usage
//!
//! ```
//! use dashkit_core::event::{MouseEvent, MouseEventKind};
//! use dashkit_render::canvas::Canvas;
//! use dashkit_widgets::linechart::{DrawStatus, LineChart, LineChartOptions, SeriesOptions};
//!
//! let chart = LineChart::new(LineChartOptions::default());
//! chart.series("a", vec![1.0, 2.0], SeriesOptions::default()).unwrap();
//! chart.series("b", vec![3.0, 4.0], SeriesOptions::default()).unwrap();
//!
//! let mut canvas = Canvas::new(30, 10).unwrap();
//! assert_eq!(chart.draw(&mut canvas).unwrap(), DrawStatus::Drawn);
//!
//! chart.mouse(&MouseEvent::new(MouseEventKind::Moved, 22, 3)).unwrap();
//! assert_eq!(chart.trace().value(), ": a: 2.00 b: 4.00");
//! ```

pub mod axes;
pub mod series;
pub mod trace;
pub mod zoom;

use std::sync::{Mutex, MutexGuard};

use ahash::AHashMap;
use dashkit_core::event::{MouseButton, MouseEvent, MouseEventKind};
use dashkit_core::geometry::Point;
use dashkit_render::braille::BraillePainter;
use dashkit_render::canvas::Canvas;
use dashkit_render::cell::{Cell, Color, Style};
use dashkit_render::drawing::{HvLine, hv_lines, text};

use crate::error::{ChartError, Result};
use axes::{MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH, X_AXIS_ROWS, XDetails, YDetails, graph_area};
pub use series::SeriesOptions;
use series::{SeriesValues, value_range};
pub use trace::MouseTrace;
use trace::{format_values, value_to_index};
pub use zoom::ZoomConfig;
use zoom::Zoom;

/// Chart-wide drawing options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineChartOptions {
    pub axis_color: Option<Color>,
    pub y_label_color: Option<Color>,
    pub x_label_color: Option<Color>,
    /// Guide line under the pointer (default: gray).
    pub guide_color: Color,
    /// Value readout (default: white).
    pub value_color: Color,
    /// Fixed Y range, used only while every value fits inside it.
    pub y_range: Option<(f64, f64)>,
    pub zoom: ZoomConfig,
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            axis_color: None,
            y_label_color: None,
            x_label_color: None,
            guide_color: Color::Gray,
            value_color: Color::White,
            y_range: None,
            zoom: ZoomConfig::default(),
        }
    }
}

impl LineChartOptions {
    #[must_use]
    pub fn with_axis_color(mut self, color: Color) -> Self {
        self.axis_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_y_label_color(mut self, color: Color) -> Self {
        self.y_label_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_x_label_color(mut self, color: Color) -> Self {
        self.x_label_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_guide_color(mut self, color: Color) -> Self {
        self.guide_color = color;
        self
    }

    #[must_use]
    pub fn with_value_color(mut self, color: Color) -> Self {
        self.value_color = color;
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }
}

fn style(color: Option<Color>) -> Style {
    Style { fg: color, bg: None }
}

/// Result of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    Drawn,
    /// The canvas is below the chart's minimum size; nothing was drawn.
    ResizeNeeded { width: u16, height: u16 },
}

#[derive(Debug, Default)]
struct ChartState {
    series: AHashMap<String, SeriesValues>,
    /// Established by the first draw.
    zoom: Option<Zoom>,
    trace: MouseTrace,
    selected: Option<usize>,
}

impl ChartState {
    fn sorted_series(&self) -> Vec<(&str, &SeriesValues)> {
        let mut all: Vec<_> = self
            .series
            .iter()
            .map(|(name, s)| (name.as_str(), s))
            .collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }

    fn y_range(&self, options: &LineChartOptions) -> (f64, f64) {
        let (lo, hi) = value_range(self.series.values());
        match options.y_range {
            Some((min, max)) if min <= lo && max >= hi => (min, max),
            _ => (lo, hi),
        }
    }

    fn min_size(&self, options: &LineChartOptions) -> (u16, u16) {
        let (lo, hi) = self.y_range(options);
        (
            YDetails::required_width(lo, hi) + MIN_GRAPH_WIDTH,
            MIN_GRAPH_HEIGHT + X_AXIS_ROWS,
        )
    }

    fn axes_details(&self, canvas: &Canvas, options: &LineChartOptions) -> Result<(XDetails, YDetails)> {
        let area = canvas.area();
        let (lo, hi) = self.y_range(options);
        let yd = YDetails::new(area, lo, hi)?;
        let longest = self.series.values().map(|s| s.values.len()).max().unwrap_or(0);
        let max_index = longest.saturating_sub(1) as f64;
        let xd = XDetails::new(area, &yd, 0.0, max_index)?;
        Ok((xd, yd))
    }

    /// Paint every series inside the visible window and return the X axis
    /// layout of that window.
    fn draw_series(
        &mut self,
        canvas: &mut Canvas,
        base: XDetails,
        yd: &YDetails,
        options: &LineChartOptions,
    ) -> Result<XDetails> {
        let graph = graph_area(&base, yd);
        let zoom = match self.zoom.as_mut() {
            Some(zoom) => {
                zoom.update(base, graph)?;
                zoom
            }
            None => self.zoom.insert(Zoom::new(base, graph, options.zoom.clone())),
        };
        let xd = zoom.zoom().clone();

        let first = xd.scale.min().ceil() as usize;
        let last = xd.scale.max().floor() as usize;
        let mut painter = BraillePainter::for_area(graph);
        for (_, s) in self.sorted_series() {
            let end = last.min(s.values.len().saturating_sub(1));
            if s.values.is_empty() || first > end {
                continue;
            }
            let points: Vec<(i32, i32)> = (first..=end)
                .map(|i| {
                    (
                        xd.scale.value_to_pixel(i as f64),
                        yd.scale.value_to_painter_row(s.values[i]),
                    )
                })
                .collect();
            let color = s.options.color;
            let drawn = if let [(x, y)] = points[..] {
                painter.point(x, y, color)
            } else {
                points
                    .windows(2)
                    .try_for_each(|w| painter.line(w[0], w[1], color))
            };
            drawn.map_err(ChartError::draw("series"))?;
        }
        painter
            .apply(canvas, Style::new())
            .map_err(ChartError::draw("series"))?;
        Ok(xd)
    }
}

fn draw_guide(canvas: &mut Canvas, guide_x: Option<u16>, xd: &XDetails, yd: &YDetails, color: Color) -> Result<()> {
    let Some(x) = guide_x else {
        return Ok(());
    };
    // A guide placed before a resize may no longer lie over the graph.
    if !graph_area(xd, yd).contains(Point::new(x, yd.start.y)) {
        return Ok(());
    }
    hv_lines(
        canvas,
        &[HvLine::new(Point::new(x, yd.start.y), Point::new(x, yd.end.y))],
        Style::new().fg(color),
    )
    .map_err(ChartError::draw("guide line"))
}

fn draw_axes(
    canvas: &mut Canvas,
    xd: &XDetails,
    yd: &YDetails,
    state: &ChartState,
    options: &LineChartOptions,
) -> Result<()> {
    let axis = style(options.axis_color);
    hv_lines(
        canvas,
        &[HvLine::new(yd.start, yd.end), HvLine::new(xd.start, xd.end)],
        axis,
    )
    .map_err(ChartError::draw("axes"))?;
    canvas
        .set_cell(xd.start, Cell::from_char('└').styled(axis))
        .map_err(ChartError::draw("axes"))?;

    for label in &yd.labels {
        text(canvas, &label.text, label.pos, style(options.y_label_color))
            .map_err(ChartError::draw("y labels"))?;
    }
    let sorted = state.sorted_series();
    let custom = |i| sorted.iter().find_map(|(_, s)| s.label(i).map(str::to_owned));
    for label in xd.labels(custom) {
        text(canvas, &label.text, label.pos, style(options.x_label_color))
            .map_err(ChartError::draw("x labels"))?;
    }
    Ok(())
}

fn draw_value(canvas: &mut Canvas, value: &str, yd: &YDetails, color: Color) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    let pos = Point::new(yd.start.x + 2, yd.start.y);
    text(canvas, value, pos, Style::new().fg(color))
        .map(|_| ())
        .map_err(ChartError::draw("value"))
}

/// Interactive line chart.
///
/// Series are indexed from 0; the X axis spans the longest series. The Y
/// axis always includes zero.
#[derive(Debug, Default)]
pub struct LineChart {
    options: LineChartOptions,
    state: Mutex<ChartState>,
}

impl LineChart {
    #[must_use]
    pub fn new(options: LineChartOptions) -> Self {
        Self {
            options,
            state: Mutex::new(ChartState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ChartState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &LineChartOptions {
        &self.options
    }

    /// Add the series `name`, replacing any series already under that name.
    pub fn series(&self, name: impl Into<String>, values: Vec<f64>, options: SeriesOptions) -> Result<()> {
        let name = name.into();
        let values = SeriesValues::new(&name, values, options)?;
        self.lock().series.insert(name, values);
        Ok(())
    }

    /// Smallest canvas the chart can draw into, as `(width, height)`.
    #[must_use]
    pub fn min_size(&self) -> (u16, u16) {
        self.lock().min_size(&self.options)
    }

    /// Current guide line and value readout.
    #[must_use]
    pub fn trace(&self) -> MouseTrace {
        self.lock().trace.clone()
    }

    /// Index last selected with the left button, if any.
    ///
    /// Kept when the pointer leaves the graph.
    #[must_use]
    pub fn mouse_index(&self) -> Option<usize> {
        self.lock().selected
    }

    /// Handle a mouse event in canvas coordinates.
    ///
    /// Scroll and right-click events zoom first. The trace then follows the
    /// pointer: inside the graph it shows the series values at the index
    /// under the pointer, outside it is cleared. Does nothing until the
    /// chart has been drawn once.
    pub fn mouse(&self, event: &MouseEvent) -> Result<()> {
        let mut state = self.lock();
        let ChartState {
            series,
            zoom,
            trace,
            selected,
        } = &mut *state;
        let Some(zoom) = zoom.as_mut() else {
            return Ok(());
        };
        zoom.mouse(event)?;

        let area = zoom.graph_area();
        let pos = event.position();
        if !area.contains(pos) {
            if !trace.is_empty() {
                tracing::debug!(message = "trace.cleared", x = pos.x, y = pos.y);
            }
            trace.clear();
            return Ok(());
        }

        let scale = zoom.zoom().scale;
        let value = scale.pixel_to_value(i32::from(pos.x - area.x))?;
        let idx = value_to_index(value, scale.min());

        let mut names: Vec<&String> = series.keys().collect();
        names.sort();
        let mut label = None;
        let mut matched = Vec::new();
        for name in names {
            let s = &series[name];
            if let Some(&v) = s.values.get(idx) {
                label = label.or_else(|| s.label(idx));
                matched.push((name.as_str(), v));
            }
        }

        if matched.is_empty() {
            tracing::debug!(message = "trace.cleared", idx);
            trace.clear();
            return Ok(());
        }
        if matches!(
            event.kind,
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
        ) {
            *selected = Some(idx);
        }
        let matched_count = matched.len();
        trace.set(pos.x, format_values(label.unwrap_or(""), matched));
        tracing::debug!(message = "trace.update", idx, matched = matched_count, x = pos.x);
        Ok(())
    }

    /// Draw the chart onto `canvas`.
    ///
    /// A canvas below [`Self::min_size`] is left untouched and reported as
    /// [`DrawStatus::ResizeNeeded`].
    pub fn draw(&self, canvas: &mut Canvas) -> Result<DrawStatus> {
        let area = canvas.area();
        let _span = tracing::debug_span!("linechart.draw", width = area.width, height = area.height).entered();

        let mut state = self.lock();
        let (width, height) = state.min_size(&self.options);
        if !canvas.fits(width, height) {
            tracing::debug!(message = "chart.resize_needed", width, height);
            return Ok(DrawStatus::ResizeNeeded { width, height });
        }

        let (xd, yd) = state.axes_details(canvas, &self.options)?;
        let xd = state.draw_series(canvas, xd, &yd, &self.options)?;
        draw_guide(canvas, state.trace.guide_x(), &xd, &yd, self.options.guide_color)?;
        draw_axes(canvas, &xd, &yd, &state, &self.options)?;
        draw_value(canvas, state.trace.value(), &yd, self.options.value_color)?;
        Ok(DrawStatus::Drawn)
    }
}
