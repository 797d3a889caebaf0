#![forbid(unsafe_code)]

//! Container hit testing.

use std::ops::ControlFlow;

use dashkit_core::geometry::Point;

use crate::error::Result;
use crate::region::{RegionId, RegionTree};

/// Find the most specific region containing `point`.
///
/// `handle` may be any region of `tree`; the search always covers the whole
/// tree. Regions are tried children-first with later siblings ahead of
/// earlier ones, so the first hit is the top-most region on screen.
///
/// Returns `Ok(None)` if no region contains the point. Structural faults
/// found during the walk abort the search and are returned as errors.
pub fn locate(tree: &RegionTree, handle: RegionId, point: Point) -> Result<Option<RegionId>> {
    let found = tree.walk_post_order(handle, |id, region| {
        Ok(if region.rect().contains(point) {
            ControlFlow::Break(id)
        } else {
            ControlFlow::Continue(())
        })
    })?;
    if found.is_none() {
        tracing::debug!(message = "hit.miss", x = point.x, y = point.y);
    }
    Ok(found)
}
