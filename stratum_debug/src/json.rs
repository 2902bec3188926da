// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshot export.
//!
//! [`export`] writes the whole forest (every root with its subtree) as a
//! JSON array to the given writer, suitable for diffing in tests or loading
//! into external viewers.

use std::io::{self, Write};

use serde_json::{Value, json};

use stratum_core::container::{ContainerId, ContainerTree};

/// Exports every root's subtree as pretty-printed JSON.
///
/// Each container becomes an object with its handle, pre-order index,
/// orientation, flags, optional bounds and surface, and a nested `children`
/// array in stacking order (bottom first).
///
/// # Errors
///
/// Propagates write failures from the destination.
pub fn export(tree: &ContainerTree, writer: &mut dyn Write) -> io::Result<()> {
    let roots: Vec<Value> = tree
        .roots()
        .into_iter()
        .map(|root| node_value(tree, root))
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &Value::Array(roots))?;
    writeln!(writer)?;
    Ok(())
}

fn node_value(tree: &ContainerTree, id: ContainerId) -> Value {
    let flags = tree.flags(id);
    json!({
        "id": format!("{id:?}"),
        "prefix_index": tree.prefix_order_index(id),
        "orientation": format!("{:?}", tree.requested_orientation(id)),
        "animating": flags.animating,
        "visible": flags.visible,
        "fills_parent": flags.fills_parent,
        "bounds": tree.bounds(id).map(|b| json!([b.x0, b.y0, b.x1, b.y1])),
        "surface": tree.surface(id).map(|s| s.0),
        "children": tree
            .children(id)
            .map(|child| node_value(tree, child))
            .collect::<Vec<_>>(),
    })
}
