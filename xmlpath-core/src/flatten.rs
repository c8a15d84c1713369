use tracing::debug;

use crate::path::{build_path, segment, PathOptions, SEGMENT_SEPARATOR};
use crate::tree::{NodeId, XmlDocument};

/// List the path of `id` and of every descendant, in pre-order.
///
/// Siblings keep document order and nothing is sorted or deduplicated, so
/// the result has exactly one entry per element in the subtree.
pub fn flatten(doc: &XmlDocument, id: NodeId, options: &PathOptions) -> Vec<String> {
    let mut out = vec![build_path(doc, id, options)];
    // (node, index in `out` of its parent's path)
    let mut pending: Vec<(NodeId, usize)> = Vec::new();
    push_children(doc, id, 0, &mut pending);

    while let Some((current, parent_idx)) = pending.pop() {
        let mut path = out[parent_idx].clone();
        path.push_str(SEGMENT_SEPARATOR);
        path.push_str(&segment(doc.node(current), options));
        out.push(path);
        push_children(doc, current, out.len() - 1, &mut pending);
    }

    out
}

/// Flatten a whole document starting from its root element.
pub fn flatten_document(doc: &XmlDocument, options: &PathOptions) -> Vec<String> {
    let paths = flatten(doc, doc.root(), options);
    debug!(paths = paths.len(), ?options, "flattened document");
    paths
}

fn push_children(
    doc: &XmlDocument,
    id: NodeId,
    out_idx: usize,
    pending: &mut Vec<(NodeId, usize)>,
) {
    let children = doc.node(id).children().iter().rev();
    pending.extend(children.map(|child| (*child, out_idx)));
}
