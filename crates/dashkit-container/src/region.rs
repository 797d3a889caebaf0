#![forbid(unsafe_code)]

//! Region tree: rectangular screen areas arranged as a tree.
//!
//! Regions live in an arena owned by [`RegionTree`] and refer to each other
//! by [`RegionId`]. Children are owned through the arena; the parent link is
//! a plain id, so no region ever holds a reference to another.
//!
//! # Invariants
//!
//! 1. The root is always [`RegionTree::root`] and has no parent.
//! 2. A child's rectangle lies within its parent's rectangle.
//! 3. Children are kept in render order: later children draw on top of
//!    earlier ones.
//! 4. Ids are only meaningful for the tree that issued them.

use std::fmt;
use std::ops::ControlFlow;

use dashkit_core::geometry::Rect;
use smallvec::SmallVec;

use crate::error::{ContainerError, Result};

/// Identity of a region within one [`RegionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u32);

impl RegionId {
    #[inline]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw numeric id.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

/// One node of the tree.
#[derive(Debug, Clone)]
pub struct Region {
    rect: Rect,
    parent: Option<RegionId>,
    children: SmallVec<[RegionId; 4]>,
}

impl Region {
    #[inline]
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    /// Children in render order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[RegionId] {
        &self.children
    }
}

/// Arena-backed tree of regions.
#[derive(Debug, Clone)]
pub struct RegionTree {
    nodes: Vec<Region>,
}

impl RegionTree {
    /// Create a tree with a single root covering `area`.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        Self {
            nodes: vec![Region {
                rect: area,
                parent: None,
                children: SmallVec::new(),
            }],
        }
    }

    #[inline]
    #[must_use]
    pub const fn root(&self) -> RegionId {
        RegionId(0)
    }

    /// Area covered by the root region.
    #[inline]
    #[must_use]
    pub fn area(&self) -> Rect {
        self.nodes[0].rect
    }

    /// Number of regions, including the root.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a tree has at least its root.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.nodes.get(id.index())
    }

    fn node(&self, id: RegionId) -> Result<&Region> {
        self.get(id).ok_or(ContainerError::UnknownRegion { id })
    }

    /// Add a child region drawn on top of its existing siblings.
    pub fn insert(&mut self, parent: RegionId, rect: Rect) -> Result<RegionId> {
        let parent_rect = self.node(parent)?.rect;
        if !parent_rect.contains_rect(&rect) {
            return Err(ContainerError::ChildOutsideParent {
                parent,
                parent_rect,
                child: rect,
            });
        }
        let id = RegionId::from_raw(self.nodes.len() as u32);
        self.nodes.push(Region {
            rect,
            parent: Some(parent),
            children: SmallVec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Follow parent links from `id` up to the root.
    pub fn root_of(&self, id: RegionId) -> Result<RegionId> {
        let mut current = id;
        let mut region = self.node(current)?;
        // A well-formed chain is never longer than the arena.
        for _ in 0..self.nodes.len() {
            let Some(parent) = region.parent else {
                return Ok(current);
            };
            region = self.get(parent).ok_or(ContainerError::MalformedTree {
                id: current,
                reason: "parent link points outside the tree",
            })?;
            current = parent;
        }
        Err(ContainerError::MalformedTree {
            id,
            reason: "parent links form a cycle",
        })
    }

    /// Post-order walk of the whole tree containing `start`.
    ///
    /// The walk always begins at the root, so any region works as a handle.
    /// Children are visited before their parent and later siblings before
    /// earlier ones, which makes the first visited region at a point the
    /// top-most one on screen.
    ///
    /// Stops at the first `Break` (returning its value) or the first error,
    /// whether raised by `visit` or by a structural fault in the tree.
    pub fn walk_post_order<B>(
        &self,
        start: RegionId,
        mut visit: impl FnMut(RegionId, &Region) -> Result<ControlFlow<B>>,
    ) -> Result<Option<B>> {
        let root = self.root_of(start)?;
        let mut seen = vec![false; self.nodes.len()];
        let mut stack: Vec<(RegionId, bool)> = vec![(root, false)];

        while let Some((id, expanded)) = stack.pop() {
            let region = self.get(id).ok_or(ContainerError::MalformedTree {
                id,
                reason: "dangling child reference",
            })?;
            if expanded {
                if let ControlFlow::Break(found) = visit(id, region)? {
                    return Ok(Some(found));
                }
                continue;
            }
            if std::mem::replace(&mut seen[id.index()], true) {
                return Err(ContainerError::MalformedTree {
                    id,
                    reason: "region reached twice",
                });
            }
            stack.push((id, true));
            for &child in &region.children {
                if self.get(child).is_some_and(|c| c.parent != Some(id)) {
                    return Err(ContainerError::MalformedTree {
                        id: child,
                        reason: "child does not point back to its parent",
                    });
                }
                stack.push((child, false));
            }
        }
        Ok(None)
    }
}
