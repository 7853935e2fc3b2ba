use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// External, flat, order-significant exchange format for a form layout.
///
/// A layout is an ordered sequence of nodes. Group nodes reference their
/// children by id; the referenced nodes appear as standalone entries later
/// in the same sequence. Node order is significant and must survive a
/// load/save cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutDocument {
    pub nodes: Vec<Node>,
}

impl LayoutDocument {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }
}

/// One entry in a layout document.
///
/// The group variant is tried first: a group is any node whose `type` is the
/// literal `"Group"` and which carries a `children` list. A node claiming
/// `type: "Group"` without `children` falls through to the component variant
/// and is rejected later, when the document is converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Group(GroupNode),
    Component(ComponentNode),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Group(group) => &group.id,
            Node::Component(component) => &component.id,
        }
    }
}

/// Leaf node: a single form component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub id: String,

    #[serde(rename = "type")]
    pub component_type: String,

    /// Arbitrary component properties, carried opaquely.
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            props: Map::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }
}

/// Container node: references its child nodes by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    pub id: String,

    #[serde(rename = "type")]
    pub tag: GroupTag,

    /// Ordered child ids. With `edit.multiPage` set, each entry is encoded
    /// `"<page>:<childId>"`.
    pub children: Vec<String>,

    #[serde(rename = "maxCount", skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<GroupEditOptions>,

    /// Remaining group properties, carried opaquely.
    #[serde(flatten)]
    pub props: Map<String, Value>,
}

impl GroupNode {
    pub fn new(id: impl Into<String>, children: Vec<String>) -> Self {
        Self {
            id: id.into(),
            tag: GroupTag::Group,
            children,
            max_count: None,
            edit: None,
            props: Map::new(),
        }
    }

    pub fn with_max_count(mut self, max_count: u32) -> Self {
        self.max_count = Some(max_count);
        self
    }

    pub fn with_edit(mut self, edit: GroupEditOptions) -> Self {
        self.edit = Some(edit);
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    pub fn multi_page(&self) -> bool {
        self.edit
            .as_ref()
            .and_then(|edit| edit.multi_page)
            .unwrap_or(false)
    }

    /// The bare child ids, in `children` order.
    ///
    /// With `edit.multiPage` set, the bare id is the part of each entry
    /// after the first `:`; entries without a `:` are taken as-is.
    pub fn effective_children(&self) -> Vec<String> {
        let multi_page = self.multi_page();
        self.children
            .iter()
            .map(|entry| {
                if multi_page {
                    entry
                        .split_once(':')
                        .map(|(_, id)| id)
                        .unwrap_or(entry)
                        .to_string()
                } else {
                    entry.clone()
                }
            })
            .collect()
    }
}

/// The literal `"Group"` discriminant of a group node's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupTag {
    #[default]
    Group,
}

/// Designer settings of a group, `edit` in the external format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupEditOptions {
    #[serde(rename = "multiPage", skip_serializing_if = "Option::is_none")]
    pub multi_page: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GroupEditOptions {
    pub fn multi_page(enabled: bool) -> Self {
        Self {
            multi_page: Some(enabled),
            extra: Map::new(),
        }
    }
}
