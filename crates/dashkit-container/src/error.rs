use dashkit_core::geometry::Rect;
use thiserror::Error;

use crate::region::RegionId;

pub type Result<T> = std::result::Result<T, ContainerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("region {id} does not exist in this tree")]
    UnknownRegion { id: RegionId },

    #[error("child rectangle {child:?} does not fit inside parent {parent} ({parent_rect:?})")]
    ChildOutsideParent {
        parent: RegionId,
        parent_rect: Rect,
        child: Rect,
    },

    #[error("malformed region tree at {id}: {reason}")]
    MalformedTree { id: RegionId, reason: &'static str },
}
