//! Internal → external conversion.

use formstudio_model::{FormModel, LayoutDocument, Node};
use std::collections::HashSet;
use tracing::debug;

use crate::builder::DEFAULT_MAX_DEPTH;
use crate::errors::{ConvertError, ConvertResult};

/// Flatten `model` back into the external exchange format with default
/// settings.
pub fn to_external(model: &FormModel) -> ConvertResult<LayoutDocument> {
    LayoutSerializer::new().serialize(model)
}

/// Configurable internal → external converter.
///
/// Walks the order map from the synthetic root, depth-first, re-emitting
/// the flat node sequence of the exchange format: a group node is followed
/// immediately by its descendants, which it also references by id in its
/// `children` list.
#[derive(Debug, Clone)]
pub struct LayoutSerializer {
    max_depth: usize,
}

impl LayoutSerializer {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn serialize(&self, model: &FormModel) -> ConvertResult<LayoutDocument> {
        // Ids owned by some real group. A component id listed both at the
        // top level and inside a group is emitted by the group pass only.
        let group_owned: HashSet<&str> = model
            .order
            .iter()
            .filter(|(container_id, _)| container_id.as_str() != model.root_id)
            .flat_map(|(_, children)| children.iter().map(String::as_str))
            .collect();

        let mut nodes = Vec::new();

        // Work-stack of (id, parent id, depth) frames, seeded with the top
        // level in reverse so pops come out in document order.
        let mut stack: Vec<(&str, &str, usize)> = Vec::new();
        for id in model.root_order().iter().rev() {
            if model.components.contains_key(id) && group_owned.contains(id.as_str()) {
                continue;
            }
            stack.push((id, model.root_id.as_str(), 1));
        }

        while let Some((id, parent_id, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(ConvertError::MaxDepthExceeded {
                    max_depth: self.max_depth,
                });
            }

            if let Some(component) = model.components.get(id) {
                nodes.push(Node::Component(component.to_node(id)));
            } else if let Some(container) = model.containers.get(id) {
                let children = model.order.get(id).map(Vec::as_slice).unwrap_or(&[]);
                nodes.push(Node::Group(container.to_node(id, children.to_vec())));
                for child_id in children.iter().rev() {
                    stack.push((child_id, id, depth + 1));
                }
            } else {
                return Err(ConvertError::dangling(parent_id, id));
            }
        }

        debug!(nodes = nodes.len(), "serialized model to external layout");
        Ok(LayoutDocument::new(nodes))
    }
}

impl Default for LayoutSerializer {
    fn default() -> Self {
        Self::new()
    }
}
