// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive aggregation over subtrees: animation and visibility folds,
//! orientation resolution, and resize propagation.
//!
//! Nothing here is cached. Every query folds over the live tree, so the
//! answers can never desync from structural or flag changes.

use crate::observe::Notifier;
use crate::orientation::Orientation;

use super::id::{ContainerId, INVALID};
use super::tree::{ContainerFlags, ContainerTree};

impl ContainerTree {
    /// Returns whether the container itself is animating.
    ///
    /// Never looks past the container; see
    /// [`is_self_or_child_animating`](Self::is_self_or_child_animating) for
    /// the subtree fold.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_animating(&self, id: ContainerId) -> bool {
        self.validate(id);
        self.flags[id.idx as usize].animating
    }

    /// Returns whether the container or any descendant, at any depth, has
    /// its own animating flag set.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_self_or_child_animating(&self, id: ContainerId) -> bool {
        self.validate(id);
        self.subtree_any(id.idx, |flags| flags.animating)
    }

    /// Returns whether the container itself is visible.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_visible(&self, id: ContainerId) -> bool {
        self.validate(id);
        self.flags[id.idx as usize].visible
    }

    /// Returns whether the container or any descendant, at any depth, has
    /// its own visible flag set.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_self_or_child_visible(&self, id: ContainerId) -> bool {
        self.validate(id);
        self.subtree_any(id.idx, |flags| flags.visible)
    }

    /// Resolves the orientation this container presents to its parent.
    ///
    /// A concrete own orientation wins outright. Otherwise the children are
    /// consulted front-to-back (top of the stack first): the first concrete
    /// answer from a child that fills its parent is returned, a `Behind`
    /// answer is remembered as a fallback until something more specific
    /// turns up further back, and children that resolve to `Unset`
    /// contribute nothing. With no contribution at all, the container's own
    /// sentinel comes back out, which for an untouched container is
    /// `Unspecified`.
    ///
    /// Visibility plays no part here; an invisible chain still carries a
    /// deep descendant's concrete orientation to the root.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn effective_orientation(&self, id: ContainerId) -> Orientation {
        self.validate(id);
        self.resolve_orientation(id.idx, self.requested_orientation[id.idx as usize])
    }

    /// Returns whether an orientation request made below this container
    /// would be handled: true when the container or any ancestor declares
    /// `handles_orientation_request`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn handles_orientation_change_from_descendant(&self, id: ContainerId) -> bool {
        self.validate(id);
        let mut idx = id.idx;
        loop {
            if self.flags[idx as usize].handles_orientation_request {
                return true;
            }
            let up = self.parent[idx as usize];
            if up == INVALID {
                return false;
            }
            idx = up;
        }
    }

    /// Propagates a resize of `id` through its subtree.
    ///
    /// Every child without a bounds override receives exactly one
    /// `parent_resized` call, front-to-back, and the cascade continues into
    /// its own children. A child with an explicit override is skipped
    /// entirely, subtree included; its geometry does not follow the parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn on_resize(&self, id: ContainerId, notifier: &mut Notifier<'_>) {
        self.validate(id);
        self.resize_children(id.idx, notifier);
    }

    fn subtree_any(&self, idx: u32, flag: fn(&ContainerFlags) -> bool) -> bool {
        if flag(&self.flags[idx as usize]) {
            return true;
        }
        self.children[idx as usize]
            .iter()
            .any(|&child| self.subtree_any(child, flag))
    }

    fn resolve_orientation(&self, idx: u32, mut candidate: Orientation) -> Orientation {
        if !self.flags[idx as usize].fills_parent {
            // A container that does not fill its parent cannot express an
            // orientation the parent should honor.
            return Orientation::Unset;
        }

        let own = self.requested_orientation[idx as usize];
        if own != Orientation::Unset && own != Orientation::Unspecified {
            return own;
        }

        for &child in self.children[idx as usize].iter().rev() {
            let seed = if candidate == Orientation::Behind {
                Orientation::Behind
            } else {
                Orientation::Unset
            };
            let resolved = self.resolve_orientation(child, seed);
            if resolved == Orientation::Behind {
                // The child defers to whatever sits behind it; keep looking
                // further back with this as the fallback.
                candidate = Orientation::Behind;
                continue;
            }
            if resolved == Orientation::Unset {
                continue;
            }
            if resolved != Orientation::Unspecified || candidate == Orientation::Unset {
                return resolved;
            }
        }

        candidate
    }

    fn resize_children(&self, idx: u32, notifier: &mut Notifier<'_>) {
        for &child in self.children[idx as usize].iter().rev() {
            if self.bounds[child as usize].is_some() {
                continue;
            }
            notifier.parent_resized(self.id_at(child));
            self.resize_children(child, notifier);
        }
    }
}
