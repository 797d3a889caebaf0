#![forbid(unsafe_code)]

//! Shared owner of a region tree and its focus state.
//!
//! [`ContainerTree`] is the only way to reach a [`FocusTracker`] from more
//! than one thread. Every call takes the same lock, so the region a mouse
//! event is routed to and the focus decision made for it always come from
//! the same tree.

use std::sync::{Mutex, MutexGuard};

use dashkit_core::button::ClickConfig;
use dashkit_core::event::MouseEvent;
use dashkit_core::geometry::Point;
use web_time::Instant;

use crate::error::Result;
use crate::focus::{FocusChange, FocusTracker};
use crate::hit::locate;
use crate::region::{RegionId, RegionTree};

/// Outcome of routing one mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routed {
    /// Top-most region under the pointer.
    pub target: Option<RegionId>,
    /// Focus change caused by the event, if any.
    pub focus_change: Option<FocusChange>,
}

#[derive(Debug)]
struct Inner {
    tree: RegionTree,
    focus: FocusTracker,
}

#[derive(Debug)]
pub struct ContainerTree {
    inner: Mutex<Inner>,
}

impl ContainerTree {
    /// Take ownership of `tree`; its root starts out active.
    #[must_use]
    pub fn new(tree: RegionTree) -> Self {
        Self::with_click_config(tree, ClickConfig::default())
    }

    #[must_use]
    pub fn with_click_config(tree: RegionTree, config: ClickConfig) -> Self {
        let focus = FocusTracker::with_click_config(tree.root(), tree.area(), config);
        Self {
            inner: Mutex::new(Inner { tree, focus }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Hit-test `event` and update focus under one lock.
    pub fn mouse(&self, event: &MouseEvent, now: Instant) -> Result<Routed> {
        let mut inner = self.lock();
        let Inner { tree, focus } = &mut *inner;
        let target = locate(tree, tree.root(), event.position())?;
        let focus_change = focus.mouse(target, event, now);
        Ok(Routed {
            target,
            focus_change,
        })
    }

    /// Top-most region at `point`.
    pub fn locate(&self, point: Point) -> Result<Option<RegionId>> {
        let inner = self.lock();
        locate(&inner.tree, inner.tree.root(), point)
    }

    #[must_use]
    pub fn active(&self) -> RegionId {
        self.lock().focus.active()
    }

    #[must_use]
    pub fn is_active(&self, id: RegionId) -> bool {
        self.lock().focus.is_active(id)
    }

    /// Replace the region tree, e.g. after a terminal resize.
    ///
    /// Focus returns to the new root and any pending press is dropped.
    pub fn rebuild(&self, tree: RegionTree) {
        let mut inner = self.lock();
        inner.focus.rescope(tree.root(), tree.area());
        inner.tree = tree;
        tracing::debug!(message = "focus.rebuilt", regions = inner.tree.len());
    }

    /// Run `f` against the current tree while holding the lock.
    pub fn with_tree<R>(&self, f: impl FnOnce(&RegionTree) -> R) -> R {
        f(&self.lock().tree)
    }
}

#[cfg(test)]
mod tests {
    use dashkit_core::event::{MouseButton, MouseEventKind};
    use dashkit_core::geometry::Rect;

    use super::*;

    fn click(x: u16, y: u16) -> [MouseEvent; 2] {
        [
            MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y),
            MouseEvent::new(MouseEventKind::Up(MouseButton::Left), x, y),
        ]
    }

    #[test]
    fn click_routes_and_focuses() {
        let mut tree = RegionTree::new(Rect::new(0, 0, 40, 10));
        let left = tree.insert(tree.root(), Rect::new(0, 0, 20, 10)).unwrap();
        let ct = ContainerTree::new(tree);
        let now = Instant::now();

        let [down, up] = click(5, 5);
        let routed = ct.mouse(&down, now).unwrap();
        assert_eq!(routed.target, Some(left));
        assert_eq!(routed.focus_change, None);

        let routed = ct.mouse(&up, now).unwrap();
        assert_eq!(
            routed.focus_change,
            Some(FocusChange {
                from: RegionId::from_raw(0),
                to: left
            })
        );
        assert!(ct.is_active(left));
        assert_eq!(ct.active(), left);
    }

    #[test]
    fn rebuild_resets_focus_to_new_root() {
        let mut tree = RegionTree::new(Rect::new(0, 0, 40, 10));
        let left = tree.insert(tree.root(), Rect::new(0, 0, 20, 10)).unwrap();
        let ct = ContainerTree::new(tree);
        let now = Instant::now();
        for ev in click(5, 5) {
            ct.mouse(&ev, now).unwrap();
        }
        assert!(ct.is_active(left));

        let fresh = RegionTree::new(Rect::new(0, 0, 60, 20));
        let root = fresh.root();
        ct.rebuild(fresh);
        assert!(ct.is_active(root));
        assert_eq!(ct.with_tree(RegionTree::len), 1);
        assert_eq!(ct.locate(Point::new(50, 15)).unwrap(), Some(root));
    }

    #[test]
    fn usable_across_threads() {
        let tree = RegionTree::new(Rect::new(0, 0, 10, 10));
        let ct = std::sync::Arc::new(ContainerTree::new(tree));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ct = std::sync::Arc::clone(&ct);
                std::thread::spawn(move || ct.locate(Point::new(i, i)).unwrap())
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap().is_some());
        }
    }
}
