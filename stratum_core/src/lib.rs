// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchical window-container tree with ordered stacking and aggregation.
//!
//! `stratum_core` provides the data structures a window-manager-like system
//! needs to model parent/child window relationships: an ordered, multiply
//! nested tree of container nodes with strict single ownership, signed-layer
//! sibling ordering, an eagerly maintained pre-order index for O(1) stacking
//! comparisons, and recursive aggregation of orientation, animation, and
//! visibility state. It is `no_std` compatible (with `alloc`) and uses
//! array-based struct-of-arrays storage with generational index handles.
//!
//! # Architecture
//!
//! The tree is the single source of truth; surfaces and notifications flow
//! out to injected collaborators:
//!
//! ```text
//!   ContainerTree (structural mutation, &mut self)
//!        │                          │
//!        │ semantic events          │ deferred surface ops
//!        ▼                          ▼
//!   Notifier ──► TreeObserver   sync_surfaces() ──► SurfaceProvider
//!                                    │                   │
//!                                    ▼                   ▼
//!                               SurfaceSync ◄──── TransactionSink
//! ```
//!
//! **[`container`]** — Struct-of-arrays container tree with generational
//! handles. Structural operations (add, remove, reposition) keep the
//! pre-order index dense; aggregation queries walk the live tree without
//! caching.
//!
//! **[`orientation`]** — The requested-orientation value set, including the
//! `Unset`/`Unspecified` sentinels and the `Behind` fallback.
//!
//! **[`observe`]** — The [`TreeObserver`](observe::TreeObserver) trait and
//! [`Notifier`](observe::Notifier) wrapper through which mutations deliver
//! parent-changed, override, orientation, and resize notifications.
//!
//! **[`backend`]** — The [`SurfaceProvider`](backend::SurfaceProvider) and
//! [`TransactionSink`](backend::TransactionSink) traits that windowing
//! integrations implement, plus the surface failure type.
//!
//! **[`error`]** — Rejected-operation errors for structural preconditions.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod container;
pub mod error;
pub mod observe;
pub mod orientation;
