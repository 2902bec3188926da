// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecordingObserver`] implements [`TreeObserver`] and appends every
//! notification to a `Vec<HierarchyEvent>` in arrival order. Tests assert on
//! the log; long-running tools can [`clear`](RecordingObserver::clear)
//! between phases.

use stratum_core::container::{ContainerId, RequestToken};
use stratum_core::observe::TreeObserver;

/// One recorded notification, in the order the tree delivered it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HierarchyEvent {
    /// A container gained or lost its parent.
    ParentChanged {
        /// The container that moved.
        child: ContainerId,
        /// Its parent before the mutation, if any.
        old_parent: Option<ContainerId>,
        /// Its parent after the mutation, if any.
        new_parent: Option<ContainerId>,
    },
    /// A descendant's bounds override changed; delivered once per strict
    /// ancestor.
    DescendantOverrideChanged {
        /// The ancestor receiving the notification.
        ancestor: ContainerId,
        /// The descendant whose override changed.
        descendant: ContainerId,
    },
    /// A descendant's orientation request reached a capable handler.
    DescendantOrientationChanged {
        /// The nearest capable ancestor.
        handler: ContainerId,
        /// Caller token, passed through untouched.
        token: Option<RequestToken>,
        /// The requesting container, passed through untouched.
        requester: Option<ContainerId>,
    },
    /// A child was told its parent resized.
    ParentResized {
        /// The affected child.
        child: ContainerId,
    },
}

/// A [`TreeObserver`] that appends every event to an in-memory log.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Vec<HierarchyEvent>,
}

impl RecordingObserver {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[HierarchyEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<HierarchyEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TreeObserver for RecordingObserver {
    fn parent_changed(
        &mut self,
        child: ContainerId,
        old_parent: Option<ContainerId>,
        new_parent: Option<ContainerId>,
    ) {
        self.events.push(HierarchyEvent::ParentChanged {
            child,
            old_parent,
            new_parent,
        });
    }

    fn descendant_override_changed(&mut self, ancestor: ContainerId, descendant: ContainerId) {
        self.events.push(HierarchyEvent::DescendantOverrideChanged {
            ancestor,
            descendant,
        });
    }

    fn descendant_orientation_changed(
        &mut self,
        handler: ContainerId,
        token: Option<RequestToken>,
        requester: Option<ContainerId>,
    ) {
        self.events.push(HierarchyEvent::DescendantOrientationChanged {
            handler,
            token,
            requester,
        });
    }

    fn parent_resized(&mut self, child: ContainerId) {
        self.events.push(HierarchyEvent::ParentResized { child });
    }
}
