//! Splits a flat layout into top-level and group-referenced nodes.

use formstudio_model::Node;
use std::collections::HashSet;

/// Ids referenced as a child of some group, with the multiPage encoding
/// decoded. Dangling ids end up in the set too; resolution is the
/// extractor's job.
pub fn in_group_ids(nodes: &[Node]) -> HashSet<String> {
    let mut in_group = HashSet::new();
    for node in nodes {
        if let Node::Group(group) = node {
            in_group.extend(group.effective_children());
        }
    }
    in_group
}

/// Nodes not referenced by any group, in document order.
///
/// A nested group is excluded here the same way a leaf is: by membership in
/// the in-group set.
pub fn top_level(nodes: &[Node]) -> Vec<&Node> {
    let in_group = in_group_ids(nodes);
    nodes
        .iter()
        .filter(|node| !in_group.contains(node.id()))
        .collect()
}
