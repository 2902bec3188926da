// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling placement and the signed-layer ordering rule.

use core::cmp::Ordering;

use super::id::ContainerId;
use super::tree::ContainerTree;

/// Where to place a child among its siblings.
///
/// Child index 0 is the bottom of the stack (back-most); the last index is
/// the top (front-most).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// Append at the top of the stack.
    Top,
    /// Insert at the bottom of the stack (index 0).
    Bottom,
    /// Insert at an explicit index, `0..=child_count`.
    At(usize),
}

/// Builds the canonical signed-layer comparator for
/// [`add_child_ordered`](ContainerTree::add_child_ordered).
///
/// `layer_of` maps a container to its signed z-layer; the layer is caller
/// data, not tree state. The candidate sorts before an existing sibling when
/// its layer is smaller, or when the layers are equal and negative. Equal
/// non-negative layers therefore append after existing equals, while equal
/// negative layers insert before them, matching the convention that negative
/// layers stack below their anchor from the anchor outward.
pub fn sublayer_order<L>(
    mut layer_of: L,
) -> impl FnMut(&ContainerTree, ContainerId, ContainerId) -> Ordering
where
    L: FnMut(ContainerId) -> i32,
{
    move |_tree, candidate, existing| {
        let c = layer_of(candidate);
        let e = layer_of(existing);
        if c < e || (c == e && e < 0) {
            Ordering::Less
        } else if c == e {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }
}
