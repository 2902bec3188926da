// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container, surface, and request identity types.

use core::fmt;

/// Sentinel value indicating "no container" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a container in a [`ContainerTree`](super::ContainerTree).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a container is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId {
    /// Slot index into the tree's arrays.
    pub(crate) idx: u32,
    /// Generation counter, must match the tree's generation for this slot.
    pub(crate) generation: u32,
}

impl ContainerId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerId({}@gen{})", self.idx, self.generation)
    }
}

/// An opaque reference to a backing surface.
///
/// Surfaces are created and owned externally by the injected
/// [`SurfaceProvider`](crate::backend::SurfaceProvider); the tree only
/// records which containers currently have one and forwards position and
/// removal operations to the transaction sink.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

impl fmt::Debug for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceId({})", self.0)
    }
}

/// An opaque caller token carried through the orientation request path.
///
/// The tree never interprets the value; it is handed to the observer of
/// [`descendant_orientation_changed`](crate::observe::TreeObserver::descendant_orientation_changed)
/// exactly as the requester supplied it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(pub u64);

impl fmt::Debug for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestToken({})", self.0)
    }
}
