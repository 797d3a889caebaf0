#![forbid(unsafe_code)]

//! Cells and the styling applied to them.

/// Terminal colors understood by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Terminal default.
    #[default]
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    White,
    /// 256-color palette index.
    Indexed(u8),
}

/// Optional foreground/background overrides applied when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Style {
    /// A style that changes nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self { fg: None, bg: None }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }
}

/// A single character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ')
    }
}

impl Cell {
    #[inline]
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }

    /// Apply the overrides in `style` to this cell.
    #[inline]
    #[must_use]
    pub fn styled(mut self, style: Style) -> Self {
        if let Some(fg) = style.fg {
            self.fg = fg;
        }
        if let Some(bg) = style.bg {
            self.bg = bg;
        }
        self
    }

    /// Whether the cell is blank with default colors.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
