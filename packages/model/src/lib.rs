pub mod document;
pub mod entity;
pub mod id_generator;

pub use document::{ComponentNode, GroupEditOptions, GroupNode, GroupTag, LayoutDocument, Node};
pub use entity::{is_valid_component_id, FormComponent, FormContainer, FormModel, ItemType};
pub use id_generator::{IdGenerator, SequentialIdGenerator, UuidGenerator};
