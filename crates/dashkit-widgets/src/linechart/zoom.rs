#![forbid(unsafe_code)]

//! Visible window over the X axis.
//!
//! [`Zoom`] narrows the chart's base index range around the pointer on
//! scroll and restores it on a right click. The zoomed range is always a
//! sub-range of the base range and never holds fewer indices than
//! [`ZoomConfig::min_visible_points`].

use dashkit_core::event::{MouseButton, MouseEvent, MouseEventKind};
use dashkit_core::geometry::Rect;
use dashkit_render::braille::COLS_PER_CELL;

use crate::error::Result;
use crate::linechart::axes::XDetails;

/// Scroll zoom behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomConfig {
    /// Share of the visible range removed per scroll step, in percent
    /// (default: 10, clamped to 1..=90).
    pub scroll_step_percent: u8,
    /// Fewest indices a zoomed window may show (default: 2).
    pub min_visible_points: usize,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            scroll_step_percent: 10,
            min_visible_points: 2,
        }
    }
}

impl ZoomConfig {
    #[must_use]
    pub fn with_scroll_step_percent(mut self, percent: u8) -> Self {
        self.scroll_step_percent = percent;
        self
    }

    #[must_use]
    pub fn with_min_visible_points(mut self, points: usize) -> Self {
        self.min_visible_points = points;
        self
    }

    fn step(&self) -> f64 {
        f64::from(self.scroll_step_percent.clamp(1, 90)) / 100.0
    }

    fn min_span(&self) -> f64 {
        self.min_visible_points.max(2) as f64 - 1.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Zoom {
    base: XDetails,
    current: XDetails,
    graph_area: Rect,
    config: ZoomConfig,
}

impl Zoom {
    /// Start unzoomed over `base`.
    #[must_use]
    pub fn new(base: XDetails, graph_area: Rect, config: ZoomConfig) -> Self {
        Self {
            current: base.clone(),
            base,
            graph_area,
            config,
        }
    }

    /// The plotting rectangle the window is drawn into.
    #[inline]
    #[must_use]
    pub fn graph_area(&self) -> Rect {
        self.graph_area
    }

    /// The X axis layout for the visible window.
    #[inline]
    #[must_use]
    pub fn zoom(&self) -> &XDetails {
        &self.current
    }

    /// Whether the visible window differs from the base range.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.current.scale != self.base.scale
    }

    /// Apply a scroll or right click landing inside the graph.
    pub fn mouse(&mut self, event: &MouseEvent) -> Result<()> {
        let pos = event.position();
        if !self.graph_area.contains(pos) {
            return Ok(());
        }
        let pixel = i32::from(pos.x - self.graph_area.x) * i32::from(COLS_PER_CELL);
        match event.kind {
            MouseEventKind::ScrollUp => self.scale_around(pixel, 1.0 - self.config.step()),
            MouseEventKind::ScrollDown => self.scale_around(pixel, 1.0 / (1.0 - self.config.step())),
            MouseEventKind::Down(MouseButton::Right) => {
                self.current = self.base.clone();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Adopt a freshly computed base layout.
    ///
    /// The zoomed range survives if the base range is unchanged; otherwise
    /// the window snaps back to the new base.
    pub fn update(&mut self, base: XDetails, graph_area: Rect) -> Result<()> {
        let same_range =
            base.scale.min() == self.base.scale.min() && base.scale.max() == self.base.scale.max();
        self.current = if same_range {
            base.with_range(self.current.scale.min(), self.current.scale.max())?
        } else {
            base.clone()
        };
        self.base = base;
        self.graph_area = graph_area;
        Ok(())
    }

    fn scale_around(&mut self, pixel: i32, factor: f64) -> Result<()> {
        let scale = self.current.scale;
        let anchor = scale.pixel_to_value(pixel)?;
        let (lo, hi) = (scale.min(), scale.max());
        let span = hi - lo;

        let (base_lo, base_hi) = (self.base.scale.min(), self.base.scale.max());
        let base_span = base_hi - base_lo;
        let mut new_span = (span * factor).round();
        if factor > 1.0 {
            new_span = new_span.max(span + 1.0);
        } else {
            new_span = new_span.min(span - 1.0);
        }
        let new_span = new_span.max(self.config.min_span()).min(base_span);
        if new_span == span {
            return Ok(());
        }

        let ratio = (anchor - lo) / span;
        let new_lo = (anchor - ratio * new_span)
            .round()
            .clamp(base_lo, base_hi - new_span);
        self.current = self.base.with_range(new_lo, new_lo + new_span)?;
        tracing::trace!(
            message = "zoom.changed",
            min = new_lo,
            max = new_lo + new_span
        );
        Ok(())
    }
}
