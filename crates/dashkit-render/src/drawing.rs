#![forbid(unsafe_code)]

//! Axis-aligned lines and text runs.

use dashkit_core::geometry::Point;
use unicode_width::UnicodeWidthChar;

use crate::canvas::Canvas;
use crate::cell::{Cell, Style};
use crate::error::{DrawError, Result};

const HORIZONTAL: char = '─';
const VERTICAL: char = '│';
const CROSS: char = '┼';

/// A horizontal or vertical line segment, inclusive of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HvLine {
    pub start: Point,
    pub end: Point,
}

impl HvLine {
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let (x0, x1) = (self.start.x.min(self.end.x), self.start.x.max(self.end.x));
        let (y0, y1) = (self.start.y.min(self.end.y), self.start.y.max(self.end.y));
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| Point::new(x, y)))
    }
}

/// Draw horizontal and vertical lines.
///
/// Where a line crosses an already drawn perpendicular line the cell becomes
/// a cross. Every endpoint must lie inside the canvas; nothing is drawn if
/// any line is invalid.
pub fn hv_lines(canvas: &mut Canvas, lines: &[HvLine], style: Style) -> Result<()> {
    let area = canvas.area();
    for line in lines {
        if line.start.x != line.end.x && line.start.y != line.end.y {
            return Err(DrawError::NotAxisAligned {
                start: line.start,
                end: line.end,
            });
        }
        for point in [line.start, line.end] {
            if !area.contains(point) {
                return Err(DrawError::OutOfBounds { point, area });
            }
        }
    }

    for line in lines {
        let (own, other) = if line.is_vertical() {
            (VERTICAL, HORIZONTAL)
        } else {
            (HORIZONTAL, VERTICAL)
        };
        for p in line.points() {
            let existing = canvas.cell(p).map(|c| c.ch);
            let ch = if existing == Some(other) || existing == Some(CROSS) {
                CROSS
            } else {
                own
            };
            canvas.set_cell(p, Cell::from_char(ch).styled(style))?;
        }
    }
    Ok(())
}

/// Draw a single line of text starting at `start`.
///
/// Text that would run past the right edge is truncated. Returns the number
/// of columns written.
pub fn text(canvas: &mut Canvas, text: &str, start: Point, style: Style) -> Result<u16> {
    let area = canvas.area();
    if !area.contains(start) {
        return Err(DrawError::OutOfBounds { point: start, area });
    }

    let mut x = start.x;
    for ch in text.chars() {
        let width = ch.width().unwrap_or(0) as u16;
        if width == 0 {
            continue;
        }
        if x.saturating_add(width) > area.right() {
            break;
        }
        canvas.set_cell(Point::new(x, start.y), Cell::from_char(ch).styled(style))?;
        // Wide glyphs own their trailing column.
        for pad in 1..width {
            canvas.set_cell(
                Point::new(x + pad, start.y),
                Cell::from_char(' ').styled(style),
            )?;
        }
        x += width;
    }
    Ok(x - start.x)
}
