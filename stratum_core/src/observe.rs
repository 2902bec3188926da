// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Semantic notifications for tree mutations.
//!
//! This module provides a [`TreeObserver`] trait with per-event methods that
//! structural operations call as they mutate the tree. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Notifier`] wraps an optional `&mut dyn TreeObserver`. Mutating
//! operations take a `&mut Notifier<'_>`; callers without a listener pass
//! [`Notifier::none()`] and pay a single `Option` branch per event.
//!
//! The events are part of the tree's contract, not diagnostics: attach and
//! detach report the parent change to the moved node, bounds-override
//! changes fan out to every strict ancestor, orientation requests bubble to
//! the nearest capable ancestor, and resize propagation announces itself to
//! each affected child.

use crate::container::{ContainerId, RequestToken};

// ---------------------------------------------------------------------------
// TreeObserver trait
// ---------------------------------------------------------------------------

/// Receives semantic events from tree mutations.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TreeObserver {
    /// Called when a container gains or loses its parent.
    ///
    /// Fires once per attach (`old_parent` is `None`) and once per detach
    /// (`new_parent` is `None`).
    fn parent_changed(
        &mut self,
        child: ContainerId,
        old_parent: Option<ContainerId>,
        new_parent: Option<ContainerId>,
    ) {
        _ = (child, old_parent, new_parent);
    }

    /// Called on every strict ancestor, nearest first, when a descendant's
    /// bounds override actually changes.
    fn descendant_override_changed(&mut self, ancestor: ContainerId, descendant: ContainerId) {
        _ = (ancestor, descendant);
    }

    /// Called on the nearest ancestor that declares
    /// `handles_orientation_request` when a descendant's requested
    /// orientation changes. `token` and `requester` pass through from the
    /// requesting caller untouched.
    fn descendant_orientation_changed(
        &mut self,
        handler: ContainerId,
        token: Option<RequestToken>,
        requester: Option<ContainerId>,
    ) {
        _ = (handler, token, requester);
    }

    /// Called on each child without a bounds override, exactly once per
    /// resize of its parent.
    fn parent_resized(&mut self, child: ContainerId) {
        _ = child;
    }
}

// ---------------------------------------------------------------------------
// NoopObserver
// ---------------------------------------------------------------------------

/// A [`TreeObserver`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl TreeObserver for NoopObserver {}

// ---------------------------------------------------------------------------
// Notifier wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TreeObserver`].
///
/// Each method checks the inner `Option` (one branch) before dispatching to
/// the observer, so mutation paths stay cheap when nobody is listening.
pub struct Notifier<'a> {
    sink: Option<&'a mut dyn TreeObserver>,
}

impl core::fmt::Debug for Notifier<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}

impl<'a> Notifier<'a> {
    /// Creates a notifier that dispatches to the given observer.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TreeObserver) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a notifier that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self { sink: None }
    }

    /// Emits a parent-changed event.
    #[inline]
    pub fn parent_changed(
        &mut self,
        child: ContainerId,
        old_parent: Option<ContainerId>,
        new_parent: Option<ContainerId>,
    ) {
        if let Some(s) = &mut self.sink {
            s.parent_changed(child, old_parent, new_parent);
        }
    }

    /// Emits a descendant-override-changed event.
    #[inline]
    pub fn descendant_override_changed(
        &mut self,
        ancestor: ContainerId,
        descendant: ContainerId,
    ) {
        if let Some(s) = &mut self.sink {
            s.descendant_override_changed(ancestor, descendant);
        }
    }

    /// Emits a descendant-orientation-changed event.
    #[inline]
    pub fn descendant_orientation_changed(
        &mut self,
        handler: ContainerId,
        token: Option<RequestToken>,
        requester: Option<ContainerId>,
    ) {
        if let Some(s) = &mut self.sink {
            s.descendant_orientation_changed(handler, token, requester);
        }
    }

    /// Emits a parent-resized event.
    #[inline]
    pub fn parent_resized(&mut self, child: ContainerId) {
        if let Some(s) = &mut self.sink {
            s.parent_resized(child);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::container::ContainerTree;

    #[test]
    fn noop_observer_compiles() {
        let mut tree = ContainerTree::new();
        let id = tree.create_container();

        let mut obs = NoopObserver;
        obs.parent_changed(id, None, None);
        obs.descendant_override_changed(id, id);
        obs.descendant_orientation_changed(id, None, None);
        obs.parent_resized(id);
    }

    #[test]
    fn notifier_none_does_nothing() {
        let mut tree = ContainerTree::new();
        let id = tree.create_container();

        let mut notifier = Notifier::none();
        notifier.parent_changed(id, None, None);
        notifier.parent_resized(id);
    }

    #[test]
    fn notifier_dispatches_to_observer() {
        struct Recording {
            children: Vec<ContainerId>,
        }
        impl TreeObserver for Recording {
            fn parent_changed(
                &mut self,
                child: ContainerId,
                _old: Option<ContainerId>,
                _new: Option<ContainerId>,
            ) {
                self.children.push(child);
            }
        }

        let mut tree = ContainerTree::new();
        let id = tree.create_container();

        let mut obs = Recording {
            children: Vec::new(),
        };
        let mut notifier = Notifier::new(&mut obs);
        notifier.parent_changed(id, None, None);
        drop(notifier);
        assert_eq!(obs.children, &[id]);
    }
}
