// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for stratum hierarchy
//! diagnostics.
//!
//! This crate provides [`TreeObserver`](stratum_core::observe::TreeObserver)
//! implementations and exporters for development and post-mortem analysis:
//!
//! - [`recorder::RecordingObserver`] — in-memory event log for asserting on
//!   notification traffic.
//! - [`pretty::PrettyPrintObserver`] — human-readable one-line-per-event
//!   output, plus an indented tree dump.
//! - [`json::export`] — hierarchy snapshot as JSON for external tooling.

pub mod json;
pub mod pretty;
pub mod recorder;
