// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred surface reconciliation.
//!
//! Structural and bounds mutations never talk to the backend directly.
//! They enqueue [`SurfaceOp`]s on the tree, and
//! [`sync_surfaces`](ContainerTree::sync_surfaces) drains the queue against
//! a [`SurfaceProvider`] and [`TransactionSink`] at a moment of the
//! caller's choosing. Stale requests (the container died, or moved out of
//! every surfaced chain, before the drain) are dropped silently.

use alloc::vec::Vec;

use kurbo::Point;

use crate::backend::{SurfaceError, SurfaceProvider, TransactionSink};

use super::id::{ContainerId, INVALID, SurfaceId};
use super::tree::ContainerTree;

/// A queued backend action, recorded at mutation time and applied at the
/// next drain.
#[derive(Clone, Copy, Debug)]
pub(crate) enum SurfaceOp {
    /// Request a surface for a freshly attached container.
    Create(ContainerId),
    /// Re-send the position of an already surfaced container.
    Position(ContainerId),
    /// Release a surface whose owner was destroyed.
    Remove(SurfaceId),
}

/// What one [`sync_surfaces`](ContainerTree::sync_surfaces) drain did.
#[derive(Debug, Default)]
pub struct SurfaceSync {
    /// Containers that received a surface, with the surface handle.
    pub created: Vec<(ContainerId, SurfaceId)>,
    /// Surfaces whose position was re-sent after a bounds change.
    pub repositioned: Vec<SurfaceId>,
    /// Surfaces released because their owners were destroyed.
    pub removed: Vec<SurfaceId>,
    /// Containers whose surface request the provider rejected. They stay
    /// attached and surfaceless; what to do about them is the caller's
    /// lifecycle decision.
    pub failed: Vec<(ContainerId, SurfaceError)>,
}

impl SurfaceSync {
    /// Returns whether the drain did nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
            && self.repositioned.is_empty()
            && self.removed.is_empty()
            && self.failed.is_empty()
    }
}

impl ContainerTree {
    /// Drains all pending surface work against the given backend.
    ///
    /// Surface creation positions the new surface exactly once, at the
    /// container's bounds origin (or the zero point without an override).
    /// A creation request whose container has died, already has a surface,
    /// or no longer sits under a surface provider is dropped without
    /// touching the backend.
    pub fn sync_surfaces(
        &mut self,
        provider: &mut dyn SurfaceProvider,
        sink: &mut dyn TransactionSink,
    ) -> SurfaceSync {
        let mut report = SurfaceSync::default();
        while let Some(op) = self.pending_surface_ops.pop_front() {
            match op {
                SurfaceOp::Create(id) => {
                    if !self.is_alive(id) || self.surface[id.idx as usize].is_some() {
                        continue;
                    }
                    // Conditions are re-checked at drain time; the container
                    // may have left the surfaced chain since the request.
                    let parent = self.parent[id.idx as usize];
                    if parent == INVALID || !self.in_surfaced_chain(parent) {
                        continue;
                    }
                    match provider.create_surface(self, id) {
                        Ok(sid) => {
                            self.surface[id.idx as usize] = Some(sid);
                            sink.set_position(sid, self.surface_origin(id));
                            report.created.push((id, sid));
                        }
                        Err(error) => report.failed.push((id, error)),
                    }
                }
                SurfaceOp::Position(id) => {
                    if !self.is_alive(id) {
                        continue;
                    }
                    if let Some(sid) = self.surface[id.idx as usize] {
                        sink.set_position(sid, self.surface_origin(id));
                        report.repositioned.push(sid);
                    }
                }
                SurfaceOp::Remove(sid) => {
                    sink.remove_surface(sid);
                    report.removed.push(sid);
                }
            }
        }
        report
    }

    fn surface_origin(&self, id: ContainerId) -> Point {
        self.bounds[id.idx as usize].map_or(Point::ZERO, |bounds| bounds.origin())
    }
}
