#![forbid(unsafe_code)]

//! Button transition classification: press/release/click decisions.
//!
//! [`ButtonFsm`] tracks a single mouse button inside a single area and turns
//! the raw [`MouseEvent`] stream into discrete [`ButtonState`] transitions
//! plus a `clicked` flag. Higher layers (focus tracking, widgets) reason only
//! about these discrete events.
//!
//! # State Machine
//!
//! ```text
//!            Down (inside area)
//!   Idle ───────────────────────▶ Pressed
//!    ▲                               │
//!    └───────── Up (any pos) ────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `Down` is reported once per press; repeated presses while already
//!    pressed are reported as `None`.
//! 2. `Up` is only reported after a matching `Down`.
//! 3. `clicked` is true only for an `Up` whose release lies inside the area,
//!    whose pointer never travelled `drag_threshold` cells or more from the
//!    press origin, and whose hold time did not exceed `max_hold`.
//! 4. After `reset()`, the machine is idle.

use std::time::Duration;

use web_time::Instant;

use crate::event::{MouseButton, MouseEvent, MouseEventKind};
use crate::geometry::{Point, Rect};

/// Discrete button transition reported by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    /// The event did not change the button state.
    #[default]
    None,
    /// The tracked button was pressed inside the area.
    Down,
    /// The tracked button was released after a press.
    Up,
}

/// Thresholds separating a click from a drag or a hold.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickConfig {
    /// Manhattan distance (cells) at which a press becomes a drag (default: 3).
    pub drag_threshold: u16,
    /// Longest press that still counts as a click (default: 1s).
    pub max_hold: Duration,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 3,
            max_hold: Duration::from_secs(1),
        }
    }
}

impl ClickConfig {
    #[must_use]
    pub fn with_drag_threshold(mut self, cells: u16) -> Self {
        self.drag_threshold = cells;
        self
    }

    #[must_use]
    pub fn with_max_hold(mut self, max_hold: Duration) -> Self {
        self.max_hold = max_hold;
        self
    }
}

/// Anything that can classify raw mouse events into button transitions.
///
/// Implementations are scoped to one button and one area.
pub trait ButtonClassifier {
    /// Feed one raw event, returning `(clicked, transition)`.
    fn classify(&mut self, event: &MouseEvent, now: Instant) -> (bool, ButtonState);

    /// Drop any in-progress press.
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Point,
    at: Instant,
    travelled: u32,
}

/// State machine classifying one button inside one area.
#[derive(Debug, Clone)]
pub struct ButtonFsm {
    button: MouseButton,
    area: Rect,
    config: ClickConfig,
    press: Option<Press>,
}

impl ButtonFsm {
    /// Track `button` inside `area` with default thresholds.
    #[must_use]
    pub fn new(button: MouseButton, area: Rect) -> Self {
        Self::with_config(button, area, ClickConfig::default())
    }

    #[must_use]
    pub fn with_config(button: MouseButton, area: Rect, config: ClickConfig) -> Self {
        Self {
            button,
            area,
            config,
            press: None,
        }
    }

    /// The tracked area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Re-scope the machine to a new area and drop any in-progress press.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.press = None;
    }

    /// Whether a press is currently being tracked.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClickConfig {
        &self.config
    }

    fn on_down(&mut self, pos: Point, now: Instant) -> ButtonState {
        if self.press.is_some() || !self.area.contains(pos) {
            return ButtonState::None;
        }
        self.press = Some(Press {
            origin: pos,
            at: now,
            travelled: 0,
        });
        ButtonState::Down
    }

    fn on_drag(&mut self, pos: Point) {
        if let Some(press) = self.press.as_mut() {
            press.travelled = press.travelled.max(press.origin.manhattan_distance(pos));
        }
    }

    fn on_up(&mut self, pos: Point, now: Instant) -> (bool, ButtonState) {
        let Some(press) = self.press.take() else {
            return (false, ButtonState::None);
        };
        let travelled = press.travelled.max(press.origin.manhattan_distance(pos));
        let held = now.duration_since(press.at);
        let clicked = self.area.contains(pos)
            && travelled < u32::from(self.config.drag_threshold)
            && held <= self.config.max_hold;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            message = "button.release",
            clicked,
            travelled,
            held_ms = held.as_millis() as u64
        );

        (clicked, ButtonState::Up)
    }
}

impl ButtonClassifier for ButtonFsm {
    fn classify(&mut self, event: &MouseEvent, now: Instant) -> (bool, ButtonState) {
        let pos = event.position();
        match event.kind {
            MouseEventKind::Down(b) if b == self.button => (false, self.on_down(pos, now)),
            MouseEventKind::Drag(b) if b == self.button => {
                self.on_drag(pos);
                (false, ButtonState::None)
            }
            MouseEventKind::Up(b) if b == self.button => self.on_up(pos, now),
            _ => (false, ButtonState::None),
        }
    }

    fn reset(&mut self) {
        self.press = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);

    fn down(x: u16, y: u16) -> MouseEvent {
        MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    fn up(x: u16, y: u16) -> MouseEvent {
        MouseEvent::new(MouseEventKind::Up(MouseButton::Left), x, y)
    }

    fn drag(x: u16, y: u16) -> MouseEvent {
        MouseEvent::new(MouseEventKind::Drag(MouseButton::Left), x, y)
    }

    fn fsm() -> ButtonFsm {
        ButtonFsm::new(MouseButton::Left, Rect::new(0, 0, 20, 10))
    }

    #[test]
    fn press_and_release_is_click() {
        let mut fsm = fsm();
        let t = Instant::now();
        assert_eq!(fsm.classify(&down(5, 5), t), (false, ButtonState::Down));
        assert!(fsm.is_pressed());
        assert_eq!(fsm.classify(&up(5, 5), t + MS_50), (true, ButtonState::Up));
        assert!(!fsm.is_pressed());
    }

    #[test]
    fn press_outside_area_is_ignored() {
        let mut fsm = fsm();
        let t = Instant::now();
        assert_eq!(fsm.classify(&down(30, 5), t), (false, ButtonState::None));
        assert_eq!(fsm.classify(&up(30, 5), t), (false, ButtonState::None));
    }

    #[test]
    fn release_without_press_is_not_a_click() {
        let mut fsm = fsm();
        assert_eq!(
            fsm.classify(&up(5, 5), Instant::now()),
            (false, ButtonState::None)
        );
    }

    #[test]
    fn duplicate_press_reports_none() {
        let mut fsm = fsm();
        let t = Instant::now();
        fsm.classify(&down(5, 5), t);
        assert_eq!(fsm.classify(&down(5, 5), t), (false, ButtonState::None));
    }

    #[test]
    fn drag_past_threshold_is_not_a_click() {
        let mut fsm = fsm();
        let t = Instant::now();
        fsm.classify(&down(5, 5), t);
        fsm.classify(&drag(9, 5), t);
        // Returning to the origin does not undo the drag.
        assert_eq!(fsm.classify(&up(5, 5), t + MS_50), (false, ButtonState::Up));
    }

    #[test]
    fn small_jitter_is_still_a_click() {
        let mut fsm = fsm();
        let t = Instant::now();
        fsm.classify(&down(5, 5), t);
        fsm.classify(&drag(6, 5), t);
        assert_eq!(fsm.classify(&up(6, 6), t + MS_50), (true, ButtonState::Up));
    }

    #[test]
    fn release_outside_area_is_not_a_click() {
        let mut fsm = ButtonFsm::with_config(
            MouseButton::Left,
            Rect::new(0, 0, 6, 6),
            ClickConfig::default().with_drag_threshold(10),
        );
        let t = Instant::now();
        fsm.classify(&down(5, 5), t);
        assert_eq!(fsm.classify(&up(7, 5), t), (false, ButtonState::Up));
    }

    #[test]
    fn long_hold_is_not_a_click() {
        let mut fsm = fsm();
        let t = Instant::now();
        fsm.classify(&down(5, 5), t);
        assert_eq!(
            fsm.classify(&up(5, 5), t + Duration::from_secs(2)),
            (false, ButtonState::Up)
        );
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut fsm = fsm();
        let t = Instant::now();
        let right = MouseEvent::new(MouseEventKind::Down(MouseButton::Right), 5, 5);
        assert_eq!(fsm.classify(&right, t), (false, ButtonState::None));
        assert!(!fsm.is_pressed());
    }

    #[test]
    fn reset_and_set_area_drop_press() {
        let mut fsm = fsm();
        let t = Instant::now();
        fsm.classify(&down(5, 5), t);
        fsm.reset();
        assert_eq!(fsm.classify(&up(5, 5), t), (false, ButtonState::None));

        fsm.classify(&down(5, 5), t);
        fsm.set_area(Rect::new(0, 0, 40, 40));
        assert!(!fsm.is_pressed());
        assert_eq!(fsm.area(), Rect::new(0, 0, 40, 40));
    }
}
