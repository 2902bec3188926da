// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays container storage with allocation, topology, and
//! property management.
//!
//! All structural mutation lives here: attach, detach, reposition, and
//! destroy, together with the eager maintenance of the pre-order index.
//! Every mutation leaves each root's index set dense (`0..N-1`) before
//! returning; queries never recompute it.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use core::cmp::Ordering;

use kurbo::Rect;

use crate::error::HierarchyError;
use crate::observe::Notifier;
use crate::orientation::Orientation;

use super::id::{ContainerId, INVALID, RequestToken, SurfaceId};
use super::order::Position;
use super::surface::SurfaceOp;
use super::traverse::Children;

/// Per-container boolean facts consumed by the aggregation walks.
///
/// `fills_parent` defaults to true: a plain container occupies its parent's
/// extent and passes orientation resolution through. The two capability
/// flags mark the roles a node plays for its descendants and default to
/// false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContainerFlags {
    /// Whether the container itself is running an animation.
    pub animating: bool,
    /// Whether the container itself is visible.
    pub visible: bool,
    /// Whether the container's bounds occupy its parent's full extent for
    /// orientation purposes.
    pub fills_parent: bool,
    /// Whether this container handles orientation requests bubbling up from
    /// descendants.
    pub handles_orientation_request: bool,
    /// Whether this container provides backing surfaces for descendants
    /// attached beneath it.
    pub provides_child_surfaces: bool,
}

impl Default for ContainerFlags {
    fn default() -> Self {
        Self {
            animating: false,
            visible: false,
            fills_parent: true,
            handles_orientation_request: false,
            provides_child_surfaces: false,
        }
    }
}

/// Struct-of-arrays storage for all containers.
///
/// Containers are addressed by [`ContainerId`] handles. Internally, each
/// container occupies a slot in parallel arrays. Destroyed containers are
/// recycled via a free list, and generation counters prevent stale handle
/// access.
#[derive(Debug)]
pub struct ContainerTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) children: Vec<Vec<u32>>,

    // -- Stacking order --
    pub(crate) prefix_index: Vec<u32>,

    // -- Per-node facts --
    pub(crate) flags: Vec<ContainerFlags>,
    pub(crate) requested_orientation: Vec<Orientation>,
    pub(crate) bounds: Vec<Option<Rect>>,
    pub(crate) surface: Vec<Option<SurfaceId>>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Deferred surface operations --
    pub(crate) pending_surface_ops: VecDeque<SurfaceOp>,
}

impl Default for ContainerTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            children: Vec::new(),
            prefix_index: Vec::new(),
            flags: Vec::new(),
            requested_orientation: Vec::new(),
            bounds: Vec::new(),
            surface: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            pending_surface_ops: VecDeque::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new container and returns its handle.
    ///
    /// The container starts parentless (a root of its own one-node tree)
    /// with default flags, an `Unspecified` orientation, no bounds override,
    /// and no surface.
    pub fn create_container(&mut self) -> ContainerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.parent[idx as usize] = INVALID;
            self.children[idx as usize].clear();
            self.prefix_index[idx as usize] = 0;
            self.flags[idx as usize] = ContainerFlags::default();
            self.requested_orientation[idx as usize] = Orientation::default();
            self.bounds[idx as usize] = None;
            self.surface[idx as usize] = None;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.children.push(Vec::new());
            self.prefix_index.push(0);
            self.flags.push(ContainerFlags::default());
            self.requested_orientation.push(Orientation::default());
            self.bounds.push(None);
            self.surface.push(None);
            self.generation.push(0);
            idx
        };

        ContainerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a detached container and its entire subtree, freeing the
    /// slots for reuse.
    ///
    /// Surface removal is enqueued for every surface owned by the subtree,
    /// in pre-order, and drained by the next
    /// [`sync_surfaces`](Self::sync_surfaces) call.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the container still has a parent
    /// (remove it first).
    pub fn destroy(&mut self, id: ContainerId) {
        self.validate(id);
        assert!(
            self.parent[id.idx as usize] == INVALID,
            "cannot destroy an attached container"
        );

        // Pre-order over the subtree so surface removals drain parent-first.
        let mut order = Vec::new();
        let mut stack = alloc::vec![id.idx];
        while let Some(idx) = stack.pop() {
            order.push(idx);
            for &child in self.children[idx as usize].iter().rev() {
                stack.push(child);
            }
        }

        for &idx in &order {
            if let Some(sid) = self.surface[idx as usize].take() {
                self.pending_surface_ops.push_back(SurfaceOp::Remove(sid));
            }
            self.parent[idx as usize] = INVALID;
            self.children[idx as usize].clear();
            // Bump generation so old handles immediately fail validation.
            self.generation[idx as usize] += 1;
            self.free_list.push(idx);
        }
    }

    /// Returns whether the given handle refers to a live container.
    #[must_use]
    pub fn is_alive(&self, id: ContainerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live containers across all trees.
    #[must_use]
    pub fn container_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Adds the parentless `child` to `parent` at an explicit placement.
    ///
    /// On success the child's whole subtree is spliced into the parent's
    /// tree, the pre-order index is renumbered from the insertion point to
    /// the end of the root's tree, and `notifier` receives the parent
    /// change. When the new ancestor chain contains a surface provider, a
    /// surface request is enqueued for every surfaceless node of the
    /// spliced subtree.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::AlreadyParented`] if `child` currently has a parent
    /// (even when that parent is `parent` itself);
    /// [`HierarchyError::PositionOutOfRange`] for `Position::At(i)` with
    /// `i > child_count`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if the attachment would place a
    /// container inside its own subtree.
    pub fn add_child_at(
        &mut self,
        parent: ContainerId,
        child: ContainerId,
        position: Position,
        notifier: &mut Notifier<'_>,
    ) -> Result<(), HierarchyError> {
        self.ensure_attachable(parent, child)?;
        let count = self.children[parent.idx as usize].len();
        let at = match position {
            Position::Top => count,
            Position::Bottom => 0,
            Position::At(i) => {
                if i > count {
                    return Err(HierarchyError::PositionOutOfRange {
                        position: i,
                        child_count: count,
                    });
                }
                i
            }
        };
        self.attach_at(parent.idx, child.idx, at, notifier);
        Ok(())
    }

    /// Adds the parentless `child` to `parent` at the position selected by a
    /// comparator.
    ///
    /// The comparator sees `(tree, candidate, existing)` for each current
    /// child in stacking order; the child is inserted before the first
    /// existing sibling for which it returns [`Ordering::Less`], or appended
    /// when none does. See
    /// [`sublayer_order`](super::order::sublayer_order) for the canonical
    /// signed-layer rule.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::AlreadyParented`] if `child` currently has a
    /// parent.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if the attachment would place a
    /// container inside its own subtree.
    pub fn add_child_ordered<F>(
        &mut self,
        parent: ContainerId,
        child: ContainerId,
        mut cmp: F,
        notifier: &mut Notifier<'_>,
    ) -> Result<(), HierarchyError>
    where
        F: FnMut(&Self, ContainerId, ContainerId) -> Ordering,
    {
        self.ensure_attachable(parent, child)?;
        let count = self.children[parent.idx as usize].len();
        let mut at = count;
        for i in 0..count {
            let existing = self.id_at(self.children[parent.idx as usize][i]);
            if cmp(self, child, existing) == Ordering::Less {
                at = i;
                break;
            }
        }
        self.attach_at(parent.idx, child.idx, at, notifier);
        Ok(())
    }

    /// Removes the direct child `child` from `parent`, detaching its whole
    /// subtree as a unit.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::NotAChild`] unless `child` is a direct child of
    /// `parent`; grandchildren are rejected, not resolved.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn remove_child(
        &mut self,
        parent: ContainerId,
        child: ContainerId,
        notifier: &mut Notifier<'_>,
    ) -> Result<(), HierarchyError> {
        self.validate(parent);
        self.validate(child);
        if self.parent[child.idx as usize] != parent.idx {
            return Err(HierarchyError::NotAChild { parent, child });
        }
        self.detach(child.idx, notifier);
        Ok(())
    }

    /// Detaches `child` (with its whole subtree) from its parent; a no-op
    /// when `child` is already a root.
    ///
    /// The former tree is renumbered densely and the detached subtree
    /// becomes a fresh root numbered `0..K-1`. Descendants of `child` keep
    /// their parent links to it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_immediately(&mut self, child: ContainerId, notifier: &mut Notifier<'_>) {
        self.validate(child);
        if self.parent[child.idx as usize] == INVALID {
            return;
        }
        self.detach(child.idx, notifier);
    }

    /// Reorders the direct child `child` within `parent`'s sibling list.
    ///
    /// Explicit indices normalize first: `At(i)` with `i >= child_count - 1`
    /// behaves as `Top`, `At(0)` as `Bottom`. With `including_parents` set,
    /// a `Top`/`Bottom` placement recurses to the parent's own sibling list
    /// and so on to the root; a middle index never repositions ancestors.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::NotAChild`] unless `child` is a direct child of
    /// `parent`; [`HierarchyError::PositionOutOfRange`] for `At(i)` with
    /// `i > child_count`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn position_child_at(
        &mut self,
        parent: ContainerId,
        child: ContainerId,
        position: Position,
        including_parents: bool,
        notifier: &mut Notifier<'_>,
    ) -> Result<(), HierarchyError> {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        if self.parent[c as usize] != p {
            return Err(HierarchyError::NotAChild { parent, child });
        }

        let count = self.children[p as usize].len();
        let normalized = match position {
            Position::At(i) if i > count => {
                return Err(HierarchyError::PositionOutOfRange {
                    position: i,
                    child_count: count,
                });
            }
            Position::At(i) if i + 1 >= count => Position::Top,
            Position::At(0) => Position::Bottom,
            other => other,
        };

        match normalized {
            Position::Top => {
                let at = self.index_in_parent(p, c);
                if at != count - 1 {
                    self.children[p as usize].remove(at);
                    self.children[p as usize].push(c);
                    self.renumber_from(p, at);
                }
                if including_parents && self.parent[p as usize] != INVALID {
                    let grandparent = self.id_at(self.parent[p as usize]);
                    let parent_id = self.id_at(p);
                    self.position_child_at(grandparent, parent_id, Position::Top, true, notifier)?;
                }
            }
            Position::Bottom => {
                let at = self.index_in_parent(p, c);
                if at != 0 {
                    self.children[p as usize].remove(at);
                    self.children[p as usize].insert(0, c);
                    self.renumber_from(p, 0);
                }
                if including_parents && self.parent[p as usize] != INVALID {
                    let grandparent = self.id_at(self.parent[p as usize]);
                    let parent_id = self.id_at(p);
                    self.position_child_at(
                        grandparent,
                        parent_id,
                        Position::Bottom,
                        true,
                        notifier,
                    )?;
                }
            }
            Position::At(i) => {
                let at = self.index_in_parent(p, c);
                if at != i {
                    self.children[p as usize].remove(at);
                    self.children[p as usize].insert(i, c);
                    self.renumber_from(p, at.min(i));
                }
            }
        }
        Ok(())
    }

    /// Returns the parent of a container, if any.
    #[must_use]
    pub fn parent(&self, id: ContainerId) -> Option<ContainerId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID { None } else { Some(self.id_at(p)) }
    }

    /// Returns an iterator over the direct children of a container, bottom
    /// of the stack first.
    #[must_use]
    pub fn children(&self, id: ContainerId) -> Children<'_> {
        self.validate(id);
        Children::new(self, id.idx)
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn child_count(&self, id: ContainerId) -> usize {
        self.validate(id);
        self.children[id.idx as usize].len()
    }

    /// Returns the direct child at stack index `at` (0 is bottom-most).
    #[must_use]
    pub fn child_at(&self, id: ContainerId, at: usize) -> Option<ContainerId> {
        self.validate(id);
        self.children[id.idx as usize]
            .get(at)
            .map(|&idx| self.id_at(idx))
    }

    /// Returns the root containers (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<ContainerId> {
        let mut roots = Vec::new();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                roots.push(self.id_at(idx));
            }
        }
        roots
    }

    /// Returns the container's position in a depth-first pre-order walk of
    /// its root's entire tree.
    ///
    /// Maintained eagerly by every structural mutation; within one root's
    /// tree the indices are always exactly `0..N-1`.
    #[must_use]
    pub fn prefix_order_index(&self, id: ContainerId) -> u32 {
        self.validate(id);
        self.prefix_index[id.idx as usize]
    }

    // -- Property getters --

    /// Returns the flags of a container.
    #[must_use]
    pub fn flags(&self, id: ContainerId) -> ContainerFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns whether the container's bounds occupy its parent's full
    /// extent for orientation purposes.
    #[must_use]
    pub fn fills_parent(&self, id: ContainerId) -> bool {
        self.validate(id);
        self.flags[id.idx as usize].fills_parent
    }

    /// Returns the container's own requested orientation.
    #[must_use]
    pub fn requested_orientation(&self, id: ContainerId) -> Orientation {
        self.validate(id);
        self.requested_orientation[id.idx as usize]
    }

    /// Returns the container's bounds override, if any.
    #[must_use]
    pub fn bounds(&self, id: ContainerId) -> Option<Rect> {
        self.validate(id);
        self.bounds[id.idx as usize]
    }

    /// Returns the container's backing surface, if one has been created.
    #[must_use]
    pub fn surface(&self, id: ContainerId) -> Option<SurfaceId> {
        self.validate(id);
        self.surface[id.idx as usize]
    }

    // -- Property setters --

    /// Sets the flags of a container.
    ///
    /// Flag changes carry no notifications; the aggregation walks read the
    /// live values on every query.
    pub fn set_flags(&mut self, id: ContainerId, flags: ContainerFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
    }

    /// Sets the container's requested orientation.
    ///
    /// Equivalent to
    /// [`set_requested_orientation_with_source`](Self::set_requested_orientation_with_source)
    /// with no token and no requester.
    pub fn set_requested_orientation(
        &mut self,
        id: ContainerId,
        orientation: Orientation,
        notifier: &mut Notifier<'_>,
    ) {
        self.set_requested_orientation_with_source(id, orientation, None, None, notifier);
    }

    /// Sets the container's requested orientation, carrying an opaque caller
    /// token and requester through the notification.
    ///
    /// When the stored value actually changes, the nearest ancestor that
    /// declares `handles_orientation_request` receives
    /// `descendant_orientation_changed(handler, token, requester)`;
    /// undeclared ancestors do not intercept, and no event fires when no
    /// ancestor is capable.
    pub fn set_requested_orientation_with_source(
        &mut self,
        id: ContainerId,
        orientation: Orientation,
        token: Option<RequestToken>,
        requester: Option<ContainerId>,
        notifier: &mut Notifier<'_>,
    ) {
        self.validate(id);
        if self.requested_orientation[id.idx as usize] == orientation {
            return;
        }
        self.requested_orientation[id.idx as usize] = orientation;

        let mut ancestor = self.parent[id.idx as usize];
        while ancestor != INVALID {
            if self.flags[ancestor as usize].handles_orientation_request {
                notifier.descendant_orientation_changed(self.id_at(ancestor), token, requester);
                break;
            }
            ancestor = self.parent[ancestor as usize];
        }
    }

    /// Sets or clears the container's bounds override.
    ///
    /// When the stored value actually changes, every strict ancestor up to
    /// the root receives one `descendant_override_changed` call, nearest
    /// first. For a surfaced container a position update is also enqueued
    /// for the next [`sync_surfaces`](Self::sync_surfaces).
    pub fn set_bounds(
        &mut self,
        id: ContainerId,
        bounds: Option<Rect>,
        notifier: &mut Notifier<'_>,
    ) {
        self.validate(id);
        if self.bounds[id.idx as usize] == bounds {
            return;
        }
        self.bounds[id.idx as usize] = bounds;

        let mut ancestor = self.parent[id.idx as usize];
        while ancestor != INVALID {
            notifier.descendant_override_changed(self.id_at(ancestor), id);
            ancestor = self.parent[ancestor as usize];
        }

        if self.surface[id.idx as usize].is_some() {
            self.pending_surface_ops.push_back(SurfaceOp::Position(id));
        }
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ContainerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ContainerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a handle for a known-live slot.
    pub(crate) fn id_at(&self, idx: u32) -> ContainerId {
        ContainerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Climbs to the root slot of `idx`'s tree.
    pub(crate) fn root_slot(&self, mut idx: u32) -> u32 {
        while self.parent[idx as usize] != INVALID {
            idx = self.parent[idx as usize];
        }
        idx
    }

    /// Shared preconditions for both attach operations.
    fn ensure_attachable(
        &self,
        parent: ContainerId,
        child: ContainerId,
    ) -> Result<(), HierarchyError> {
        self.validate(parent);
        self.validate(child);
        if self.parent[child.idx as usize] != INVALID {
            return Err(HierarchyError::AlreadyParented {
                child,
                parent: self.id_at(self.parent[child.idx as usize]),
            });
        }
        assert!(
            self.root_slot(parent.idx) != child.idx,
            "cannot attach a container inside its own subtree"
        );
        Ok(())
    }

    /// Splices `child` into `parent`'s child list at `at` and renumbers.
    fn attach_at(&mut self, parent: u32, child: u32, at: usize, notifier: &mut Notifier<'_>) {
        self.children[parent as usize].insert(at, child);
        self.parent[child as usize] = parent;
        self.renumber_from(parent, at);

        let parent_id = self.id_at(parent);
        let child_id = self.id_at(child);
        notifier.parent_changed(child_id, None, Some(parent_id));

        if self.in_surfaced_chain(parent) {
            // The spliced subtree may have been assembled away from any
            // provider; sweep it whole for surfaceless nodes.
            let mut stack = alloc::vec![child];
            while let Some(idx) = stack.pop() {
                for &grandchild in self.children[idx as usize].iter().rev() {
                    stack.push(grandchild);
                }
                if self.surface[idx as usize].is_some() {
                    continue;
                }
                let id = self.id_at(idx);
                self.pending_surface_ops.push_back(SurfaceOp::Create(id));
            }
        }
    }

    /// Unlinks `child` from its parent's child list and renumbers both the
    /// remaining tree and the detached subtree.
    fn detach(&mut self, child: u32, notifier: &mut Notifier<'_>) {
        let parent = self.parent[child as usize];
        let at = self.index_in_parent(parent, child);
        self.children[parent as usize].remove(at);
        self.parent[child as usize] = INVALID;
        self.renumber_from(parent, at);
        let _ = self.assign_subtree(child, 0);

        let child_id = self.id_at(child);
        let parent_id = self.id_at(parent);
        notifier.parent_changed(child_id, Some(parent_id), None);
    }

    /// Returns `child`'s index in `parent`'s child list.
    fn index_in_parent(&self, parent: u32, child: u32) -> usize {
        self.children[parent as usize]
            .iter()
            .position(|&c| c == child)
            .expect("parent/child link desync")
    }

    /// Reassigns pre-order indices for every node at or after child position
    /// `pos` of `parent`, continuing through the end of the root's tree.
    ///
    /// Indices before the mutation point are still valid, so the start value
    /// comes from the pre-order predecessor: the parent itself when `pos` is
    /// 0, otherwise the deepest last descendant of the previous sibling.
    fn renumber_from(&mut self, parent: u32, pos: usize) {
        let start = if pos == 0 {
            self.prefix_index[parent as usize] + 1
        } else {
            let previous = self.children[parent as usize][pos - 1];
            self.subtree_last_index(previous) + 1
        };

        let mut node = parent;
        let mut at = pos;
        let mut next = start;
        loop {
            while at < self.children[node as usize].len() {
                let child = self.children[node as usize][at];
                next = self.assign_subtree(child, next);
                at += 1;
            }
            let up = self.parent[node as usize];
            if up == INVALID {
                break;
            }
            at = self.index_in_parent(up, node) + 1;
            node = up;
        }
    }

    /// Assigns `next..` over the subtree rooted at `node` in pre-order;
    /// returns the first unused index.
    fn assign_subtree(&mut self, node: u32, mut next: u32) -> u32 {
        self.prefix_index[node as usize] = next;
        next += 1;
        for at in 0..self.children[node as usize].len() {
            let child = self.children[node as usize][at];
            next = self.assign_subtree(child, next);
        }
        next
    }

    /// Returns the pre-order index of the deepest last descendant of `node`
    /// (or of `node` itself when it has no children).
    fn subtree_last_index(&self, mut node: u32) -> u32 {
        while let Some(&last) = self.children[node as usize].last() {
            node = last;
        }
        self.prefix_index[node as usize]
    }

    /// Whether `idx` or any of its ancestors provides child surfaces.
    pub(crate) fn in_surfaced_chain(&self, mut idx: u32) -> bool {
        loop {
            if self.flags[idx as usize].provides_child_surfaces {
                return true;
            }
            let up = self.parent[idx as usize];
            if up == INVALID {
                return false;
            }
            idx = up;
        }
    }
}
