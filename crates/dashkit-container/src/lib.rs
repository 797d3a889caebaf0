#![forbid(unsafe_code)]

//! Container tree: spatial regions, hit testing, and click-to-focus.
//!
//! # Role in dashkit
//! The screen is split into a tree of rectangular [`region::Region`]s. On
//! every mouse event this crate decides which region the event lands on
//! ([`hit::locate`]) and whether a completed click moves keyboard focus
//! ([`focus::FocusTracker`]).
//!
//! # Locking
//! [`FocusTracker`] is not self-synchronizing. [`ContainerTree`] owns the
//! tree and the tracker behind a single mutex, so the hit test that picks a
//! target and the focus decision for that target are always observed
//! together.

pub mod error;
pub mod focus;
pub mod hit;
pub mod manager;
pub mod region;

pub use error::{ContainerError, Result};
pub use focus::{FocusChange, FocusTracker};
pub use hit::locate;
pub use manager::{ContainerTree, Routed};
pub use region::{Region, RegionId, RegionTree};
