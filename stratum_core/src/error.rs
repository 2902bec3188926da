// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rejected-operation errors for structural preconditions.
//!
//! Structural mutations that violate a precondition return
//! [`HierarchyError`] and leave the tree unchanged. These are programming
//! errors on the caller's side, never silently downgraded to no-ops, but
//! they are reported as values so callers and tests can assert on them.
//!
//! Stale-handle misuse is a different class entirely and panics at the
//! validation layer (see [`ContainerTree`](crate::container::ContainerTree)).

use core::fmt;

use crate::container::ContainerId;

/// A structural operation was rejected; the tree is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HierarchyError {
    /// The node already has a parent and cannot be attached anywhere,
    /// including to its current parent.
    AlreadyParented {
        /// The node that was being attached.
        child: ContainerId,
        /// Its current parent.
        parent: ContainerId,
    },
    /// The node is not a direct child of the addressed container.
    NotAChild {
        /// The container addressed as parent.
        parent: ContainerId,
        /// The node that is not among its direct children.
        child: ContainerId,
    },
    /// An explicit position lies outside the valid range.
    PositionOutOfRange {
        /// The requested index.
        position: usize,
        /// Number of children at the time of the call.
        child_count: usize,
    },
    /// The two nodes do not share a root, so no stacking order relates them.
    DifferentRoots {
        /// First operand.
        a: ContainerId,
        /// Second operand.
        b: ContainerId,
    },
}

impl fmt::Display for HierarchyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyParented { child, parent } => {
                write!(f, "{child:?} already has parent {parent:?}")
            }
            Self::NotAChild { parent, child } => {
                write!(f, "{child:?} is not a direct child of {parent:?}")
            }
            Self::PositionOutOfRange {
                position,
                child_count,
            } => {
                write!(f, "position {position} out of range for {child_count} children")
            }
            Self::DifferentRoots { a, b } => {
                write!(f, "{a:?} and {b:?} are in different trees")
            }
        }
    }
}

impl core::error::Error for HierarchyError {}
