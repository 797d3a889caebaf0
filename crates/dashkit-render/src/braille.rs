#![forbid(unsafe_code)]

//! Braille painter: 2x4 sub-cell pixels per terminal cell.
//!
//! Pixel `(0, 0)` is the top-left dot of the painter's area. Each cell maps
//! to one Unicode Braille pattern (`U+2800..=U+28FF`) whose bits are the
//! dots set inside that cell.

use dashkit_core::geometry::{Point, Rect};

use crate::canvas::Canvas;
use crate::cell::{Cell, Color, Style};
use crate::error::{DrawError, Result};

/// Horizontal pixels per cell.
pub const COLS_PER_CELL: u16 = 2;
/// Vertical pixels per cell.
pub const ROWS_PER_CELL: u16 = 4;

const BRAILLE_BASE: u32 = 0x2800;

/// Dot bit for `[row][col]` inside a cell.
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

#[derive(Debug, Clone)]
pub struct BraillePainter {
    area: Rect,
    dots: Vec<u8>,
    colors: Vec<Option<Color>>,
}

impl BraillePainter {
    /// A blank painter covering `area` of a canvas.
    #[must_use]
    pub fn for_area(area: Rect) -> Self {
        let cells = area.width as usize * area.height as usize;
        Self {
            area,
            dots: vec![0; cells],
            colors: vec![None; cells],
        }
    }

    #[inline]
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Pixel grid width.
    #[inline]
    #[must_use]
    pub fn pixel_width(&self) -> u32 {
        u32::from(self.area.width) * u32::from(COLS_PER_CELL)
    }

    /// Pixel grid height.
    #[inline]
    #[must_use]
    pub fn pixel_height(&self) -> u32 {
        u32::from(self.area.height) * u32::from(ROWS_PER_CELL)
    }

    /// Set the dot at pixel `(x, y)`.
    pub fn point(&mut self, x: i32, y: i32, color: Option<Color>) -> Result<()> {
        let (w, h) = (self.pixel_width(), self.pixel_height());
        if x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
            return Err(DrawError::PixelOutOfBounds {
                x,
                y,
                width: w,
                height: h,
            });
        }
        let (x, y) = (x as u32, y as u32);
        let cell_x = x / u32::from(COLS_PER_CELL);
        let cell_y = y / u32::from(ROWS_PER_CELL);
        let i = cell_y as usize * self.area.width as usize + cell_x as usize;
        let bit = DOT_BITS[(y % u32::from(ROWS_PER_CELL)) as usize]
            [(x % u32::from(COLS_PER_CELL)) as usize];
        self.dots[i] |= bit;
        if color.is_some() {
            self.colors[i] = color;
        }
        Ok(())
    }

    /// Draw a line between two pixels (Bresenham).
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Option<Color>) -> Result<()> {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.point(x0, y0, color)?;
            if x0 == x1 && y0 == y1 {
                return Ok(());
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Copy every cell with at least one dot onto the canvas.
    pub fn apply(&self, canvas: &mut Canvas, style: Style) -> Result<()> {
        let width = self.area.width as usize;
        for (i, &bits) in self.dots.iter().enumerate() {
            if bits == 0 {
                continue;
            }
            let p = Point::new(
                self.area.x + (i % width) as u16,
                self.area.y + (i / width) as u16,
            );
            let ch = char::from_u32(BRAILLE_BASE + u32::from(bits)).unwrap_or('⣿');
            let mut cell = Cell::from_char(ch).styled(style);
            if let Some(color) = self.colors[i] {
                cell.fg = color;
            }
            canvas.set_cell(p, cell)?;
        }
        Ok(())
    }
}
