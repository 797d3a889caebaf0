#![forbid(unsafe_code)]

//! Core: geometry, canonical mouse events, and button classification.
//!
//! # Role in dashkit
//! `dashkit-core` is the input layer. It owns the cell-space geometry types
//! shared by every other crate and the [`button::ButtonFsm`] that turns a
//! noisy stream of mouse transitions into discrete press/release/click
//! decisions.
//!
//! # How it fits in the system
//! `dashkit-container` feeds [`event::MouseEvent`]s through a classifier to
//! decide focus changes, and `dashkit-widgets` consumes the same events for
//! in-widget value lookup. Neither needs to know about debounce or drag
//! thresholds; those live here.

pub mod button;
pub mod event;
pub mod geometry;
