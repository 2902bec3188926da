// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree navigation: child iteration, subtree walks, and relationship
//! queries.

use alloc::vec::Vec;

use core::cmp::Ordering;

use crate::error::HierarchyError;

use super::id::{ContainerId, INVALID};
use super::tree::ContainerTree;

/// Iterator over the direct children of a container, bottom of the stack
/// first.
///
/// Created by [`ContainerTree::children`]. Iterate in reverse for a
/// front-to-back walk.
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a ContainerTree,
    inner: core::slice::Iter<'a, u32>,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a ContainerTree, idx: u32) -> Self {
        Self {
            tree,
            inner: tree.children[idx as usize].iter(),
        }
    }
}

impl Iterator for Children<'_> {
    type Item = ContainerId;

    fn next(&mut self) -> Option<ContainerId> {
        self.inner.next().map(|&idx| self.tree.id_at(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<ContainerId> {
        self.inner.next_back().map(|&idx| self.tree.id_at(idx))
    }
}

impl ExactSizeIterator for Children<'_> {}

/// Depth-first pre-order iterator over a subtree, starting with the
/// subtree's own root.
///
/// Created by [`ContainerTree::subtree`]. The yield order matches the
/// pre-order index: back-most first within each sibling list.
#[derive(Debug)]
pub struct Subtree<'a> {
    tree: &'a ContainerTree,
    stack: Vec<u32>,
}

impl<'a> Subtree<'a> {
    pub(crate) fn new(tree: &'a ContainerTree, idx: u32) -> Self {
        Self {
            tree,
            stack: alloc::vec![idx],
        }
    }
}

impl Iterator for Subtree<'_> {
    type Item = ContainerId;

    fn next(&mut self) -> Option<ContainerId> {
        let idx = self.stack.pop()?;
        for &child in self.tree.children[idx as usize].iter().rev() {
            self.stack.push(child);
        }
        Some(self.tree.id_at(idx))
    }
}

impl ContainerTree {
    /// Returns a pre-order iterator over the subtree rooted at `id`,
    /// including `id` itself.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn subtree(&self, id: ContainerId) -> Subtree<'_> {
        self.validate(id);
        Subtree::new(self, id.idx)
    }

    /// Returns whether `candidate` is a strict descendant of `id`.
    ///
    /// A container does not contain itself, so `has_child(x, x)` is false.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    #[must_use]
    pub fn has_child(&self, id: ContainerId, candidate: ContainerId) -> bool {
        self.validate(id);
        self.validate(candidate);
        if id.idx == candidate.idx {
            return false;
        }
        let mut cursor = self.parent[candidate.idx as usize];
        while cursor != INVALID {
            if cursor == id.idx {
                return true;
            }
            cursor = self.parent[cursor as usize];
        }
        false
    }

    /// Compares two containers by their position in the shared tree's
    /// pre-order: `Less` means `a` sits behind `b`.
    ///
    /// A container compares equal only to itself.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::DifferentRoots`] when the containers do not belong
    /// to the same root's tree; positions in unrelated trees are not
    /// ordered.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn compare(&self, a: ContainerId, b: ContainerId) -> Result<Ordering, HierarchyError> {
        self.validate(a);
        self.validate(b);
        if a.idx == b.idx {
            return Ok(Ordering::Equal);
        }
        if self.root_slot(a.idx) != self.root_slot(b.idx) {
            return Err(HierarchyError::DifferentRoots { a, b });
        }
        Ok(self.prefix_index[a.idx as usize].cmp(&self.prefix_index[b.idx as usize]))
    }

    /// Returns the root of the tree `id` belongs to (`id` itself when
    /// parentless).
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn root_of(&self, id: ContainerId) -> ContainerId {
        self.validate(id);
        self.id_at(self.root_slot(id.idx))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::container::Position;
    use crate::observe::Notifier;

    struct Fixture {
        tree: ContainerTree,
        root: ContainerId,
        child1: ContainerId,
        child11: ContainerId,
        child12: ContainerId,
        child2: ContainerId,
        child21: ContainerId,
    }

    fn fixture() -> Fixture {
        let mut tree = ContainerTree::new();
        let mut n = Notifier::none();
        let root = tree.create_container();
        let child1 = tree.create_container();
        let child11 = tree.create_container();
        let child12 = tree.create_container();
        let child2 = tree.create_container();
        let child21 = tree.create_container();
        tree.add_child_at(root, child1, Position::Top, &mut n).unwrap();
        tree.add_child_at(child1, child11, Position::Top, &mut n).unwrap();
        tree.add_child_at(child1, child12, Position::Top, &mut n).unwrap();
        tree.add_child_at(root, child2, Position::Top, &mut n).unwrap();
        tree.add_child_at(child2, child21, Position::Top, &mut n).unwrap();
        Fixture {
            tree,
            root,
            child1,
            child11,
            child12,
            child2,
            child21,
        }
    }

    #[test]
    fn children_iterates_both_directions() {
        let f = fixture();
        let forward: Vec<_> = f.tree.children(f.root).collect();
        assert_eq!(forward, alloc::vec![f.child1, f.child2]);
        let backward: Vec<_> = f.tree.children(f.root).rev().collect();
        assert_eq!(backward, alloc::vec![f.child2, f.child1]);
        assert_eq!(f.tree.children(f.root).len(), 2);
    }

    #[test]
    fn subtree_walks_preorder_including_self() {
        let f = fixture();
        let walk: Vec<_> = f.tree.subtree(f.root).collect();
        assert_eq!(
            walk,
            alloc::vec![f.root, f.child1, f.child11, f.child12, f.child2, f.child21]
        );
        // The walk agrees with the maintained index.
        for (at, id) in walk.iter().enumerate() {
            assert_eq!(f.tree.prefix_order_index(*id) as usize, at);
        }

        let partial: Vec<_> = f.tree.subtree(f.child1).collect();
        assert_eq!(partial, alloc::vec![f.child1, f.child11, f.child12]);
    }

    #[test]
    fn has_child_covers_strict_descendants_only() {
        let f = fixture();
        assert!(f.tree.has_child(f.root, f.child1));
        assert!(f.tree.has_child(f.root, f.child21));
        assert!(f.tree.has_child(f.child1, f.child12));
        // Not itself, not a sibling, not an ancestor.
        assert!(!f.tree.has_child(f.root, f.root));
        assert!(!f.tree.has_child(f.child1, f.child2));
        assert!(!f.tree.has_child(f.child11, f.child1));
    }

    #[test]
    fn compare_orders_by_prefix_position() {
        let f = fixture();
        assert_eq!(f.tree.compare(f.child1, f.child2), Ok(Ordering::Less));
        assert_eq!(f.tree.compare(f.child2, f.child1), Ok(Ordering::Greater));
        assert_eq!(f.tree.compare(f.child11, f.child12), Ok(Ordering::Less));
        // An ancestor sits behind its own descendants.
        assert_eq!(f.tree.compare(f.root, f.child21), Ok(Ordering::Less));
        assert_eq!(f.tree.compare(f.child12, f.child1), Ok(Ordering::Greater));
        assert_eq!(f.tree.compare(f.child2, f.child2), Ok(Ordering::Equal));
    }

    #[test]
    fn compare_across_roots_is_an_error() {
        let mut f = fixture();
        let stray = f.tree.create_container();
        assert_eq!(
            f.tree.compare(f.child1, stray),
            Err(HierarchyError::DifferentRoots {
                a: f.child1,
                b: stray
            })
        );
        // Two detached roots are unrelated as well.
        assert_eq!(
            f.tree.compare(f.root, stray),
            Err(HierarchyError::DifferentRoots { a: f.root, b: stray })
        );
    }

    #[test]
    fn root_of_walks_to_the_top() {
        let f = fixture();
        assert_eq!(f.tree.root_of(f.child21), f.root);
        assert_eq!(f.tree.root_of(f.root), f.root);
    }

    #[test]
    fn detached_subtree_is_self_contained() {
        let mut f = fixture();
        let mut n = Notifier::none();
        f.tree.remove_child(f.root, f.child1, &mut n).unwrap();

        assert_eq!(f.tree.root_of(f.child11), f.child1);
        assert!(f.tree.has_child(f.child1, f.child11));
        assert!(!f.tree.has_child(f.root, f.child11));
        assert_eq!(
            f.tree.compare(f.child11, f.child2),
            Err(HierarchyError::DifferentRoots {
                a: f.child11,
                b: f.child2
            })
        );
    }
}
