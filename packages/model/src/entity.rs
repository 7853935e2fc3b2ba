use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::document::{ComponentNode, GroupEditOptions, GroupNode, GroupTag};

/// Pattern a designer-authored id must match: alphanumeric with interior
/// dashes, at least two characters.
static VALID_COMPONENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[0-9a-zA-Z][0-9a-zA-Z-]*[0-9a-zA-Z]$").unwrap());

pub fn is_valid_component_id(id: &str) -> bool {
    VALID_COMPONENT_ID.is_match(id)
}

/// Marks an entity's kind in the internal model, `itemType` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Component,
    Container,
}

/// Internal, map-based entity model of one layout document.
///
/// Optimized for random-access editing: every entity is addressable by id in
/// O(1). `order` holds the ordered child lists, keyed by container id; the
/// synthetic root container anchors the top level and is never serialized.
/// The root id lives only in `root_id` and `order`, never in `containers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormModel {
    pub components: HashMap<String, FormComponent>,
    pub containers: HashMap<String, FormContainer>,
    pub order: HashMap<String, Vec<String>>,
    pub root_id: String,

    /// Opaque pass-through supplied by the loading collaborator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<Value>,
}

impl FormModel {
    /// An empty model anchored at `root_id`.
    pub fn with_root(root_id: impl Into<String>) -> Self {
        let root_id = root_id.into();
        let mut order = HashMap::new();
        order.insert(root_id.clone(), Vec::new());

        Self {
            components: HashMap::new(),
            containers: HashMap::new(),
            order,
            root_id,
            hidden: None,
        }
    }

    /// Top-level ids in document order.
    pub fn root_order(&self) -> &[String] {
        self.order
            .get(&self.root_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `id` is already taken by a component or container.
    ///
    /// Case-insensitive: stored documents are consumed by case-insensitive
    /// collaborators, so `Name` and `name` count as the same id.
    pub fn id_exists(&self, id: &str) -> bool {
        let matches = |key: &String| key.eq_ignore_ascii_case(id);
        self.components.keys().any(matches) || self.containers.keys().any(matches)
    }
}

/// Fields of a component entity; the external node minus its `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormComponent {
    #[serde(rename = "type")]
    pub component_type: String,

    #[serde(rename = "itemType")]
    pub item_type: ItemType,

    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl FormComponent {
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            item_type: ItemType::Component,
            props: Map::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    pub fn from_node(node: &ComponentNode) -> Self {
        Self {
            component_type: node.component_type.clone(),
            item_type: ItemType::Component,
            props: node.props.clone(),
        }
    }

    /// The external node for this entity; the `itemType` tag is dropped.
    pub fn to_node(&self, id: impl Into<String>) -> ComponentNode {
        ComponentNode {
            id: id.into(),
            component_type: self.component_type.clone(),
            props: self.props.clone(),
        }
    }
}

/// Fields of a container entity; the group node minus `id`, `type` and
/// `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormContainer {
    #[serde(rename = "itemType", default = "container_item_type")]
    pub item_type: ItemType,

    #[serde(rename = "maxCount", skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<GroupEditOptions>,

    #[serde(flatten)]
    pub props: Map<String, Value>,
}

fn container_item_type() -> ItemType {
    ItemType::Container
}

impl Default for FormContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormContainer {
    pub fn new() -> Self {
        Self {
            item_type: ItemType::Container,
            max_count: None,
            edit: None,
            props: Map::new(),
        }
    }

    pub fn with_max_count(mut self, max_count: u32) -> Self {
        self.max_count = Some(max_count);
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    pub fn from_group(group: &GroupNode) -> Self {
        Self {
            item_type: ItemType::Container,
            max_count: group.max_count,
            edit: group.edit.clone(),
            props: group.props.clone(),
        }
    }

    /// The external group node for this entity; the `itemType` tag is
    /// dropped and the child list is supplied by the caller from the order
    /// map.
    pub fn to_node(&self, id: impl Into<String>, children: Vec<String>) -> GroupNode {
        GroupNode {
            id: id.into(),
            tag: GroupTag::Group,
            children,
            max_count: self.max_count,
            edit: self.edit.clone(),
            props: self.props.clone(),
        }
    }
}
