#![forbid(unsafe_code)]

//! Canvas = a widget-local grid of cells.
//!
//! The canvas origin is the widget's top-left corner, so widgets and the
//! mouse events routed to them share one coordinate space.
//!
//! # Usage
//!
//! ```
//! use dashkit_core::geometry::Point;
//! use dashkit_render::canvas::Canvas;
//! use dashkit_render::cell::Cell;
//!
//! let mut canvas = Canvas::new(10, 3).unwrap();
//! canvas.set_cell(Point::new(1, 0), Cell::from_char('H')).unwrap();
//! assert_eq!(canvas.row_text(0), " H        ");
//! ```

use dashkit_core::geometry::{Point, Rect};

use crate::cell::Cell;
use crate::error::{DrawError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    area: Rect,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Create a blank canvas of the given size.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(DrawError::EmptyCanvas { width, height });
        }
        Ok(Self {
            area: Rect::from_size(width, height),
            cells: vec![Cell::default(); width as usize * height as usize],
        })
    }

    /// The drawable area, always anchored at the origin.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Whether the canvas is at least `width` x `height` cells.
    #[inline]
    #[must_use]
    pub const fn fits(&self, width: u16, height: u16) -> bool {
        self.area.width >= width && self.area.height >= height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.area
            .contains(p)
            .then(|| p.y as usize * self.area.width as usize + p.x as usize)
    }

    #[inline]
    #[must_use]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at `p`.
    pub fn set_cell(&mut self, p: Point, cell: Cell) -> Result<()> {
        let area = self.area;
        let i = self
            .index(p)
            .ok_or(DrawError::OutOfBounds { point: p, area })?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Whether nothing has been drawn.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }

    /// The characters of row `y`, or an empty string if out of range.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.area.height {
            return String::new();
        }
        let w = self.area.width as usize;
        let start = y as usize * w;
        self.cells[start..start + w].iter().map(|c| c.ch).collect()
    }
}
