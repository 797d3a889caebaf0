use dashkit_render::DrawError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid scale [{min}, {max}] over {cells} cells: {reason}")]
    InvalidScale {
        min: f64,
        max: f64,
        cells: u16,
        reason: &'static str,
    },

    #[error("pixel {pixel} is outside the scale's {pixels} pixels")]
    PixelOutOfRange { pixel: i32, pixels: u32 },

    #[error("invalid series {name:?}: {reason}")]
    InvalidSeries { name: String, reason: &'static str },

    #[error("failed to draw {step}")]
    Draw {
        step: &'static str,
        #[source]
        source: DrawError,
    },
}

impl ChartError {
    /// Attach the drawing step to a render error.
    pub(crate) fn draw(step: &'static str) -> impl FnOnce(DrawError) -> Self {
        move |source| Self::Draw { step, source }
    }
}
