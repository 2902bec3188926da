// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator contract for windowing integrations.
//!
//! The tree core never talks to a windowing system directly. Integrations
//! provide two pieces:
//!
//! - **Surface provider** — Implements [`SurfaceProvider`] to build a
//!   backing surface for a container that has joined a surface-backed
//!   subtree. Invoked once per surfaceless container entering the chain; a
//!   container that already owns a surface is never re-requested on
//!   re-attach.
//!
//! - **Transaction sink** — Implements [`TransactionSink`] to receive
//!   position and removal operations. The core batches these in mutation
//!   order and never commits a transaction itself; commit timing belongs to
//!   the integration.
//!
//! # Crate boundaries
//!
//! `stratum_core` owns the data model, the ordering and aggregation
//! algorithms, and this contract module. Windowing integrations depend on
//! `stratum_core` and implement the two traits. Application code wires them
//! together and drains the queue at its own cadence:
//!
//! ```rust,ignore
//! // Mutate freely; surface work is deferred in order.
//! tree.add_child_at(display, win, Position::Top, &mut notifier)?;
//! tree.set_bounds(win, Some(frame), &mut notifier);
//!
//! // Later, on the windowing thread:
//! let sync = tree.sync_surfaces(&mut provider, &mut txn);
//! for (container, err) in &sync.failed {
//!     // Lifecycle-ending signal for that presentation, not a tree error.
//!     shell.drop_presentation(*container, *err);
//! }
//! ```

use kurbo::Point;

use crate::container::{ContainerId, ContainerTree, SurfaceId};

/// An opaque failure code from the windowing boundary.
///
/// The tree never interprets the value; it is carried into
/// [`SurfaceSync::failed`](crate::container::SurfaceSync) for the
/// integration to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceError(pub u32);

impl core::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "surface error {}", self.0)
    }
}

impl core::error::Error for SurfaceError {}

/// Builds backing surfaces for containers joining a surface-backed subtree.
///
/// The tree is passed in so the provider can read bounds or flags while
/// building. Failure is contained: the container stays attached and
/// surfaceless, and the error is reported through the sync outcome.
pub trait SurfaceProvider {
    /// Creates a surface for `container`, returning its handle.
    fn create_surface(
        &mut self,
        tree: &ContainerTree,
        container: ContainerId,
    ) -> Result<SurfaceId, SurfaceError>;
}

/// Receives surface operations in the order the mutations occurred.
///
/// Implementations typically stage the calls into a platform transaction
/// object; the core never commits.
pub trait TransactionSink {
    /// Sets the position of a surface.
    fn set_position(&mut self, surface: SurfaceId, position: Point);

    /// Removes a surface whose container was destroyed.
    fn remove_surface(&mut self, surface: SurfaceId);
}
