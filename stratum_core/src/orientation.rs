// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Requested-orientation values and their sentinel semantics.
//!
//! Orientation resolution distinguishes three kinds of value:
//!
//! - **Sentinels** — [`Unset`](Orientation::Unset) (contributes nothing and
//!   never propagates out of a parent's walk) and
//!   [`Unspecified`](Orientation::Unspecified) (the terminal default when
//!   nothing in a subtree expresses a preference).
//! - **Fallback** — [`Behind`](Orientation::Behind) defers to whatever
//!   orientation is set further back in the stacking order.
//! - **Concrete** — [`Locked`](Orientation::Locked),
//!   [`Portrait`](Orientation::Portrait), and
//!   [`Landscape`](Orientation::Landscape) win resolution outright.

/// A container's requested screen orientation.
///
/// The default for a fresh container is [`Unspecified`](Self::Unspecified).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Explicitly no contribution; skipped by parent walks.
    Unset,
    /// No preference expressed; the terminal default of resolution.
    #[default]
    Unspecified,
    /// Defer to the orientation of whatever is behind this container in the
    /// stacking order.
    Behind,
    /// Keep whatever orientation is currently in effect.
    Locked,
    /// Portrait orientation.
    Portrait,
    /// Landscape orientation.
    Landscape,
}
