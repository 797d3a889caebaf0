#![forbid(unsafe_code)]

//! Click-to-focus tracking.
//!
//! [`FocusTracker`] holds the active region and a pending candidate. A press
//! records the region under the pointer as the candidate; a completed click
//! released on that same region makes it active. Presses and releases that
//! land on different regions leave focus where it was.
//!
//! # State Machine
//!
//! ```text
//!             Down on R
//!   Idle ─────────────────▶ Pending(R)
//!    ▲  ◀── Up (any) ────────┘   │
//!    │                           │ Down on S
//!    │                           ▼
//!    └──────── Up (any) ──── Pending(S)
//! ```
//!
//! A clicked `Up` on the pending region additionally sets `active`.
//!
//! # Synchronization
//!
//! The tracker takes `&mut self` and holds no lock of its own. Share it only
//! through [`crate::ContainerTree`], which serializes it together with the
//! hit test that produces each target.

use dashkit_core::button::{ButtonClassifier, ButtonFsm, ButtonState, ClickConfig};
use dashkit_core::event::{MouseButton, MouseEvent};
use dashkit_core::geometry::Rect;
use web_time::Instant;

use crate::region::RegionId;

/// Focus moved from one region to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    pub from: RegionId,
    pub to: RegionId,
}

#[derive(Debug, Clone)]
pub struct FocusTracker<C = ButtonFsm> {
    active: RegionId,
    candidate: Option<RegionId>,
    classifier: C,
}

impl FocusTracker<ButtonFsm> {
    /// Track left clicks inside `area`, starting with `initial` active.
    #[must_use]
    pub fn new(initial: RegionId, area: Rect) -> Self {
        Self::with_click_config(initial, area, ClickConfig::default())
    }

    #[must_use]
    pub fn with_click_config(initial: RegionId, area: Rect, config: ClickConfig) -> Self {
        Self::with_classifier(
            initial,
            ButtonFsm::with_config(MouseButton::Left, area, config),
        )
    }

    /// Activate `root` and re-scope click tracking to `area`.
    ///
    /// Used when the region tree is replaced; ids of the old tree are
    /// meaningless afterwards.
    pub fn rescope(&mut self, root: RegionId, area: Rect) {
        self.classifier.set_area(area);
        self.active = root;
        self.candidate = None;
    }
}

impl<C: ButtonClassifier> FocusTracker<C> {
    #[must_use]
    pub fn with_classifier(initial: RegionId, classifier: C) -> Self {
        Self {
            active: initial,
            candidate: None,
            classifier,
        }
    }

    #[inline]
    #[must_use]
    pub fn active(&self) -> RegionId {
        self.active
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self, id: RegionId) -> bool {
        self.active == id
    }

    /// Region that received the current press, if any.
    #[inline]
    #[must_use]
    pub fn candidate(&self) -> Option<RegionId> {
        self.candidate
    }

    /// Feed one mouse event whose hit-tested region is `target`.
    ///
    /// Returns the focus change this event caused, if any.
    pub fn mouse(
        &mut self,
        target: Option<RegionId>,
        event: &MouseEvent,
        now: Instant,
    ) -> Option<FocusChange> {
        let (clicked, state) = self.classifier.classify(event, now);
        match state {
            ButtonState::Down => {
                self.candidate = target;
                tracing::debug!(
                    message = "focus.candidate",
                    candidate = ?target,
                    x = event.x,
                    y = event.y
                );
                None
            }
            ButtonState::Up => {
                let candidate = self.candidate.take();
                if !clicked {
                    return None;
                }
                match target {
                    Some(to) if candidate == Some(to) => {
                        let from = std::mem::replace(&mut self.active, to);
                        if from == to {
                            return None;
                        }
                        tracing::debug!(message = "focus.changed", %from, %to);
                        Some(FocusChange { from, to })
                    }
                    _ => {
                        tracing::debug!(
                            message = "focus.ignored",
                            candidate = ?candidate,
                            target = ?target
                        );
                        None
                    }
                }
            }
            ButtonState::None => None,
        }
    }

    /// Forget the pending press.
    pub fn reset(&mut self) {
        self.candidate = None;
        self.classifier.reset();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dashkit_core::event::MouseEventKind;
    use tracing_test::traced_test;

    use super::*;

    const A: RegionId = RegionId::from_raw(1);
    const B: RegionId = RegionId::from_raw(2);
    const ROOT: RegionId = RegionId::from_raw(0);

    fn tracker() -> FocusTracker {
        FocusTracker::new(ROOT, Rect::new(0, 0, 80, 24))
    }

    fn down(x: u16, y: u16) -> MouseEvent {
        MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y)
    }

    fn up(x: u16, y: u16) -> MouseEvent {
        MouseEvent::new(MouseEventKind::Up(MouseButton::Left), x, y)
    }

    #[test]
    fn initial_region_is_active() {
        let t = tracker();
        assert!(t.is_active(ROOT));
        assert!(!t.is_active(A));
        assert_eq!(t.active(), ROOT);
        assert_eq!(t.candidate(), None);
    }

    #[test]
    fn click_on_same_region_moves_focus() {
        let mut t = tracker();
        let now = Instant::now();
        assert_eq!(t.mouse(Some(A), &down(3, 3), now), None);
        assert_eq!(t.candidate(), Some(A));
        let change = t.mouse(Some(A), &up(3, 3), now + Duration::from_millis(20));
        assert_eq!(change, Some(FocusChange { from: ROOT, to: A }));
        assert!(t.is_active(A));
        assert_eq!(t.candidate(), None);
    }

    #[test]
    fn release_on_other_region_keeps_focus() {
        let mut t = tracker();
        let now = Instant::now();
        t.mouse(Some(A), &down(3, 3), now);
        assert_eq!(t.mouse(Some(B), &up(4, 3), now), None);
        assert!(t.is_active(ROOT));
        assert_eq!(t.candidate(), None);
    }

    /// Replays a fixed sequence of classifications, then reports `None`.
    struct Scripted(Vec<(bool, ButtonState)>);

    impl ButtonClassifier for Scripted {
        fn classify(&mut self, _: &MouseEvent, _: Instant) -> (bool, ButtonState) {
            if self.0.is_empty() {
                (false, ButtonState::None)
            } else {
                self.0.remove(0)
            }
        }

        fn reset(&mut self) {
            self.0.clear();
        }
    }

    #[test]
    fn second_down_overwrites_candidate() {
        let script = vec![
            (false, ButtonState::Down),
            (false, ButtonState::Down),
            (true, ButtonState::Up),
        ];
        let mut t = FocusTracker::with_classifier(ROOT, Scripted(script));
        let now = Instant::now();
        assert_eq!(t.mouse(Some(A), &down(3, 3), now), None);
        assert_eq!(t.candidate(), Some(A));
        assert_eq!(t.mouse(Some(B), &down(10, 3), now), None);
        assert_eq!(t.candidate(), Some(B));
        assert_eq!(
            t.mouse(Some(B), &up(10, 3), now),
            Some(FocusChange { from: ROOT, to: B })
        );
        assert_eq!(t.candidate(), None);
    }

    #[test]
    fn press_after_reset_starts_fresh_click() {
        let mut t = tracker();
        let now = Instant::now();
        t.mouse(Some(A), &down(3, 3), now);
        // Terminals may drop the release; a fresh press restarts the attempt.
        t.reset();
        assert_eq!(t.candidate(), None);
        t.mouse(Some(B), &down(10, 3), now);
        assert_eq!(t.candidate(), Some(B));
        assert_eq!(
            t.mouse(Some(B), &up(10, 3), now),
            Some(FocusChange { from: ROOT, to: B })
        );
    }

    #[test]
    fn drag_release_does_not_move_focus() {
        let mut t = tracker();
        let now = Instant::now();
        t.mouse(Some(A), &down(3, 3), now);
        let drag = MouseEvent::new(MouseEventKind::Drag(MouseButton::Left), 20, 3);
        t.mouse(Some(A), &drag, now);
        assert_eq!(t.mouse(Some(A), &up(3, 3), now), None);
        assert!(t.is_active(ROOT));
    }

    #[test]
    fn click_on_active_region_reports_no_change() {
        let mut t = tracker();
        let now = Instant::now();
        t.mouse(Some(ROOT), &down(1, 1), now);
        assert_eq!(t.mouse(Some(ROOT), &up(1, 1), now), None);
        assert!(t.is_active(ROOT));
    }

    #[test]
    fn missed_hit_never_becomes_active() {
        let mut t = tracker();
        let now = Instant::now();
        t.mouse(None, &down(1, 1), now);
        assert_eq!(t.mouse(None, &up(1, 1), now), None);
        assert!(t.is_active(ROOT));
    }

    #[test]
    fn reset_drops_candidate() {
        let mut t = tracker();
        let now = Instant::now();
        t.mouse(Some(A), &down(3, 3), now);
        t.reset();
        assert_eq!(t.candidate(), None);
        assert_eq!(t.mouse(Some(A), &up(3, 3), now), None);
        assert!(t.is_active(ROOT));
    }

    #[test]
    fn rescope_activates_new_root() {
        let mut t = tracker();
        let now = Instant::now();
        t.mouse(Some(A), &down(3, 3), now);
        t.rescope(B, Rect::new(0, 0, 10, 10));
        assert!(t.is_active(B));
        assert_eq!(t.candidate(), None);
        // Outside the new area, presses are not tracked.
        assert_eq!(t.mouse(Some(A), &down(30, 3), now), None);
        assert_eq!(t.candidate(), None);
    }

    #[test]
    #[traced_test]
    fn focus_change_is_logged() {
        let mut t = tracker();
        let now = Instant::now();
        t.mouse(Some(A), &down(3, 3), now);
        t.mouse(Some(A), &up(3, 3), now);
        assert!(logs_contain("focus.candidate"));
        assert!(logs_contain("focus.changed"));

        t.mouse(Some(A), &down(3, 3), now);
        t.mouse(Some(B), &up(3, 3), now);
        assert!(logs_contain("focus.ignored"));
    }
}
