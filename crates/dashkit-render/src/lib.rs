#![forbid(unsafe_code)]

//! Render primitives: cells, canvases, and line/text drawing.
//!
//! # Role in dashkit
//! Widgets draw into a [`canvas::Canvas`], a cell grid whose origin is the
//! widget's top-left corner. The [`drawing`] module provides the axis-aligned
//! line and text routines widgets compose, and [`braille::BraillePainter`]
//! gives sub-cell resolution for plotting series data.

pub mod braille;
pub mod canvas;
pub mod cell;
pub mod drawing;
pub mod error;

pub use error::{DrawError, Result};
