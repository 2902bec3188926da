// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The container tree: storage, ordering, navigation, and aggregation.
//!
//! [`ContainerTree`] owns every container in struct-of-arrays form and
//! hands out generational [`ContainerId`] handles. Structural operations
//! (attach, detach, reposition, destroy) keep the per-root pre-order index
//! dense as they go, so [`ContainerTree::compare`] and
//! [`ContainerTree::prefix_order_index`] are plain lookups.
//!
//! The submodules split the implementation by concern:
//!
//! - `tree`: the arena, allocation, structural mutation, and property
//!   setters with their notification walks.
//! - `order`: the [`Position`] placement type and the signed
//!   [`sublayer_order`] comparator.
//! - `traverse`: the [`Children`] and [`Subtree`] iterators plus the
//!   relationship queries.
//! - `aggregate`: uncached recursive folds (animation, visibility,
//!   orientation, resize propagation).
//! - `surface`: the deferred backend queue drained by
//!   [`ContainerTree::sync_surfaces`] into a [`SurfaceSync`] report.

mod aggregate;
mod id;
mod order;
mod surface;
mod traverse;
mod tree;

pub use id::{ContainerId, INVALID, RequestToken, SurfaceId};
pub use order::{Position, sublayer_order};
pub use surface::SurfaceSync;
pub use traverse::{Children, Subtree};
pub use tree::{ContainerFlags, ContainerTree};
