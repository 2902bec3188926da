// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural invariant auditing for container trees.
//!
//! [`audit`] walks every root of a [`ContainerTree`] through the public API
//! and re-derives what the tree maintains incrementally: parent/child link
//! symmetry, single ownership, dense pre-order indices, and reachability of
//! every live container. A clean tree produces an empty
//! [`AuditReport::violations`] list.
//!
//! The auditor is for tests and debug builds. It trusts nothing the tree
//! caches; every check goes through the public query API.

#![no_std]

extern crate alloc;

// The property tests expand to `format!` calls and need the std prelude
// macros in scope.
#[cfg(test)]
#[macro_use]
extern crate std;

use alloc::vec::Vec;

use stratum_core::container::{ContainerId, ContainerTree};

/// One detected invariant violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// A child's parent link does not point back at the container that
    /// lists it.
    LinkMismatch {
        /// The container listing the child.
        parent: ContainerId,
        /// The child whose back-reference disagrees.
        child: ContainerId,
    },
    /// A container was reached twice, so it is owned by more than one
    /// parent (or a child list cycles).
    DoubleOwned {
        /// The container reached a second time.
        child: ContainerId,
    },
    /// A container's pre-order index disagrees with its position in a
    /// fresh walk of its root's tree.
    PrefixIndexMismatch {
        /// The mis-indexed container.
        node: ContainerId,
        /// Index the walk expected.
        expected: u32,
        /// Index the tree reports.
        actual: u32,
    },
    /// Live containers exist that no root's walk reached.
    Unreachable {
        /// Live containers in the tree.
        live: usize,
        /// Containers reached from the roots.
        reached: usize,
    },
}

/// What one [`audit`] pass found.
#[derive(Debug, Default)]
pub struct AuditReport {
    /// Every violation, in discovery order.
    pub violations: Vec<Violation>,
    /// Containers reached across all roots.
    pub nodes_audited: usize,
    /// Roots walked.
    pub roots_audited: usize,
}

impl AuditReport {
    /// Returns whether the audit found nothing wrong.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Re-derives the structural invariants of `tree` from scratch.
///
/// Each root's subtree is walked depth-first in stacking order. For every
/// container the walk checks that its recorded pre-order index matches the
/// walk position, and for every listed child that the back-reference points
/// at the lister. A container reached twice is reported and not expanded
/// again, which also makes the walk terminate on a corrupted cyclic child
/// list.
#[must_use]
pub fn audit(tree: &ContainerTree) -> AuditReport {
    let mut report = AuditReport::default();
    let mut visited: Vec<ContainerId> = Vec::new();

    let roots = tree.roots();
    report.roots_audited = roots.len();

    for root in roots {
        let mut expected: u32 = 0;
        let mut stack = alloc::vec![root];
        while let Some(node) = stack.pop() {
            if visited.contains(&node) {
                report.violations.push(Violation::DoubleOwned { child: node });
                continue;
            }
            visited.push(node);

            let actual = tree.prefix_order_index(node);
            if actual != expected {
                report.violations.push(Violation::PrefixIndexMismatch {
                    node,
                    expected,
                    actual,
                });
            }
            expected += 1;

            let children: Vec<ContainerId> = tree.children(node).collect();
            for &child in children.iter().rev() {
                if tree.parent(child) != Some(node) {
                    report
                        .violations
                        .push(Violation::LinkMismatch { parent: node, child });
                }
                stack.push(child);
            }
        }
    }

    report.nodes_audited = visited.len();
    let live = tree.container_count();
    if visited.len() != live {
        report.violations.push(Violation::Unreachable {
            live,
            reached: visited.len(),
        });
    }
    report
}
