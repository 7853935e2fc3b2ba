//! External → internal conversion.

use formstudio_model::{
    FormComponent, FormModel, IdGenerator, LayoutDocument, Node, UuidGenerator,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::classifier::top_level;
use crate::errors::{ConvertError, ConvertResult};
use crate::extractor::GroupExtractor;

/// Maximum group nesting accepted by default, both when loading a document
/// and when flattening a model back out.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Convert `document` into a fresh [`FormModel`] with default settings.
///
/// `hidden` is stored on the model untouched. An absent document yields a
/// model holding only the synthetic root.
pub fn to_internal(
    document: Option<&LayoutDocument>,
    hidden: Option<Value>,
) -> ConvertResult<FormModel> {
    ModelBuilder::new().build(document, hidden)
}

/// Configurable external → internal converter.
pub struct ModelBuilder {
    id_generator: Box<dyn IdGenerator>,
    max_depth: usize,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            id_generator: Box::new(UuidGenerator),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the source of synthetic ids, e.g. with a seeded generator in
    /// tests.
    pub fn with_id_generator(mut self, id_generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Box::new(id_generator);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the entity model for `document`.
    ///
    /// Every id in the returned model traces back to exactly one node in
    /// the input; any structural defect (duplicate id, dangling reference,
    /// missing id, lost `children`, nesting beyond the bound) aborts the
    /// build and no model escapes.
    pub fn build(
        &mut self,
        document: Option<&LayoutDocument>,
        hidden: Option<Value>,
    ) -> ConvertResult<FormModel> {
        let nodes: &[Node] = document.map(|doc| doc.nodes.as_slice()).unwrap_or(&[]);

        let index = index_nodes(nodes)?;

        // The synthetic root must never collide with a real node id.
        let mut root_id = self.id_generator.next_id();
        while index.contains_key(root_id.as_str()) {
            root_id = self.id_generator.next_id();
        }

        let mut model = FormModel::with_root(root_id);
        model.hidden = hidden;

        let extractor = GroupExtractor {
            index: &index,
            max_depth: self.max_depth,
        };

        let mut root_order = Vec::new();
        for node in top_level(nodes) {
            match node {
                Node::Component(component) => {
                    model
                        .components
                        .insert(component.id.clone(), FormComponent::from_node(component));
                }
                Node::Group(group) => extractor.extract(group, &mut model)?,
            }
            root_order.push(node.id().to_string());
        }
        model.order.insert(model.root_id.clone(), root_order);

        // Groups that only reference each other have no top-level ancestor
        // and would otherwise vanish from the model.
        if model.components.len() + model.containers.len() != nodes.len() {
            if let Some(node) = nodes.iter().find(|node| {
                !model.components.contains_key(node.id())
                    && !model.containers.contains_key(node.id())
            }) {
                return Err(ConvertError::malformed(
                    node.id(),
                    "node is unreachable from the top level",
                ));
            }
        }

        debug!(
            components = model.components.len(),
            containers = model.containers.len(),
            "built internal model"
        );
        Ok(model)
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Index the document by id, rejecting duplicates and malformed nodes.
fn index_nodes(nodes: &[Node]) -> ConvertResult<HashMap<&str, &Node>> {
    let mut index = HashMap::with_capacity(nodes.len());
    for node in nodes {
        let id = node.id();
        if id.is_empty() {
            return Err(ConvertError::malformed(id, "missing id"));
        }
        if let Node::Component(component) = node {
            // A group that lost its children list parses as a component
            // claiming the group type.
            if component.component_type == "Group" {
                return Err(ConvertError::malformed(id, "group node without a children list"));
            }
        }
        if index.insert(id, node).is_some() {
            return Err(ConvertError::DuplicateId { id: id.to_string() });
        }
    }
    Ok(index)
}
