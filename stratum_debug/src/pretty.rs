// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable notification output and tree dumps.
//!
//! [`PrettyPrintObserver`] implements [`TreeObserver`] and writes one line
//! per event to a [`Write`](std::io::Write) destination (default: stderr).
//! [`dump`] writes an indented snapshot of a subtree.

use std::io::{self, Write};

use stratum_core::container::{ContainerId, ContainerTree, RequestToken};
use stratum_core::observe::TreeObserver;

/// Writes human-readable notification lines to a
/// [`Write`](std::io::Write) destination.
pub struct PrettyPrintObserver<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintObserver<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintObserver").finish_non_exhaustive()
    }
}

impl PrettyPrintObserver {
    /// Creates an observer that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(io::stderr()),
        }
    }

    /// Creates an observer that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintObserver<W> {
    /// Creates an observer that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TreeObserver for PrettyPrintObserver<W> {
    fn parent_changed(
        &mut self,
        child: ContainerId,
        old_parent: Option<ContainerId>,
        new_parent: Option<ContainerId>,
    ) {
        let _ = writeln!(
            self.writer,
            "[parent] child={child:?} old={old_parent:?} new={new_parent:?}",
        );
    }

    fn descendant_override_changed(&mut self, ancestor: ContainerId, descendant: ContainerId) {
        let _ = writeln!(
            self.writer,
            "[override] ancestor={ancestor:?} descendant={descendant:?}",
        );
    }

    fn descendant_orientation_changed(
        &mut self,
        handler: ContainerId,
        token: Option<RequestToken>,
        requester: Option<ContainerId>,
    ) {
        let _ = writeln!(
            self.writer,
            "[orientation] handler={handler:?} token={token:?} requester={requester:?}",
        );
    }

    fn parent_resized(&mut self, child: ContainerId) {
        let _ = writeln!(self.writer, "[resize] child={child:?}");
    }
}

/// Writes an indented snapshot of the subtree rooted at `root`, one
/// container per line in pre-order.
///
/// Each line carries the pre-order index, the handle, the requested
/// orientation, and any set flags, bounds, or surface.
///
/// # Errors
///
/// Propagates write failures from the destination.
pub fn dump(tree: &ContainerTree, root: ContainerId, writer: &mut dyn Write) -> io::Result<()> {
    dump_node(tree, root, 0, writer)
}

fn dump_node(
    tree: &ContainerTree,
    id: ContainerId,
    depth: usize,
    writer: &mut dyn Write,
) -> io::Result<()> {
    let flags = tree.flags(id);
    write!(
        writer,
        "{:indent$}#{} {id:?} orientation={:?}",
        "",
        tree.prefix_order_index(id),
        tree.requested_orientation(id),
        indent = depth * 2,
    )?;
    if flags.animating {
        write!(writer, " animating")?;
    }
    if flags.visible {
        write!(writer, " visible")?;
    }
    if !flags.fills_parent {
        write!(writer, " non-filling")?;
    }
    if flags.handles_orientation_request {
        write!(writer, " orientation-handler")?;
    }
    if flags.provides_child_surfaces {
        write!(writer, " surface-provider")?;
    }
    if let Some(bounds) = tree.bounds(id) {
        write!(
            writer,
            " bounds=({}, {})..({}, {})",
            bounds.x0, bounds.y0, bounds.x1, bounds.y1
        )?;
    }
    if let Some(surface) = tree.surface(id) {
        write!(writer, " surface={surface:?}")?;
    }
    writeln!(writer)?;

    for child in tree.children(id) {
        dump_node(tree, child, depth + 1, writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_core::container::Position;
    use stratum_core::observe::Notifier;
    use stratum_core::orientation::Orientation;

    #[test]
    fn pretty_print_parent_change() {
        let mut tree = ContainerTree::new();
        let root = tree.create_container();
        let child = tree.create_container();

        let mut observer = PrettyPrintObserver::with_writer(Vec::<u8>::new());
        tree.add_child_at(root, child, Position::Top, &mut Notifier::new(&mut observer))
            .unwrap();

        let output = String::from_utf8(observer.writer).unwrap();
        assert!(output.contains("[parent]"), "got: {output}");
        assert!(output.contains("old=None"), "got: {output}");
    }

    #[test]
    fn dump_indents_by_depth() {
        let mut tree = ContainerTree::new();
        let mut n = Notifier::none();
        let root = tree.create_container();
        let child = tree.create_container();
        let grandchild = tree.create_container();
        tree.add_child_at(root, child, Position::Top, &mut n).unwrap();
        tree.add_child_at(child, grandchild, Position::Top, &mut n).unwrap();
        tree.set_requested_orientation(grandchild, Orientation::Landscape, &mut n);

        let mut out = Vec::new();
        dump(&tree, root, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#0"), "got: {text}");
        assert!(lines[1].starts_with("  #1"), "got: {text}");
        assert!(lines[2].starts_with("    #2"), "got: {text}");
        assert!(lines[2].contains("orientation=Landscape"), "got: {text}");
    }
}
