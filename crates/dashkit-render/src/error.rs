use dashkit_core::geometry::{Point, Rect};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DrawError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("point {point:?} is outside the canvas area {area:?}")]
    OutOfBounds { point: Point, area: Rect },

    #[error("line from {start:?} to {end:?} is neither horizontal nor vertical")]
    NotAxisAligned { start: Point, end: Point },

    #[error("canvas size {width}x{height} must be non-zero")]
    EmptyCanvas { width: u16, height: u16 },

    #[error("pixel ({x}, {y}) is outside the {width}x{height} pixel grid")]
    PixelOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
}
