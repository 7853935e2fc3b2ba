//! # Model Mutations
//!
//! High-level semantic operations on a [`FormModel`].
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation represents one designer action
//! 2. **Validated**: structural preconditions are checked before applying
//! 3. **Atomic**: a failed mutation leaves the model untouched
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Atomic relocation of an entity to a new parent at an index
//! - Fails if the target container does not exist
//! - Fails if a container would become its own descendant
//!
//! ### Remove
//! - Removing a container removes its whole subtree
//!
//! ### Rename
//! - Rewrites the container key, its order entry, and the reference in its
//!   parent's child list

use formstudio_model::{is_valid_component_id, FormComponent, FormContainer, FormModel};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Semantic mutations over the entity model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a new component into a container at `position`
    AddComponent {
        id: String,
        component: FormComponent,
        container_id: String,
        position: usize,
    },

    /// Insert a new, empty-ordered container into a parent at `position`
    AddContainer {
        id: String,
        container: FormContainer,
        parent_id: String,
        position: usize,
    },

    /// Replace the fields of an existing component
    UpdateComponent {
        id: String,
        component: FormComponent,
    },

    /// Move a component or container to a new parent at `position`
    MoveItem {
        id: String,
        target_container_id: String,
        position: usize,
    },

    /// Remove a component
    RemoveComponent { id: String },

    /// Remove a container and its whole subtree
    RemoveContainer { id: String },

    /// Give a container a new id
    RenameContainer { id: String, new_id: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("component not found: {0}")]
    ComponentNotFound(String),

    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("item not found: {0}")]
    ItemNotFound(String),

    #[error("id already in use: {0}")]
    IdInUse(String),

    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("moving '{0}' would create a cycle")]
    CycleDetected(String),
}

impl Mutation {
    /// Apply the mutation with validation. On error the model is unchanged.
    pub fn apply(&self, model: &mut FormModel) -> Result<(), MutationError> {
        self.validate(model)?;

        match self {
            Mutation::AddComponent {
                id,
                component,
                container_id,
                position,
            } => {
                model.components.insert(id.clone(), component.clone());
                insert_into(model, container_id, id, *position);
                debug!(id = %id, container = %container_id, "added component");
            }

            Mutation::AddContainer {
                id,
                container,
                parent_id,
                position,
            } => {
                model.containers.insert(id.clone(), container.clone());
                model.order.insert(id.clone(), Vec::new());
                insert_into(model, parent_id, id, *position);
                debug!(id = %id, parent = %parent_id, "added container");
            }

            Mutation::UpdateComponent { id, component } => {
                model.components.insert(id.clone(), component.clone());
                debug!(id = %id, "updated component");
            }

            Mutation::MoveItem {
                id,
                target_container_id,
                position,
            } => {
                remove_from_parent(model, id);
                insert_into(model, target_container_id, id, *position);
                debug!(id = %id, target = %target_container_id, "moved item");
            }

            Mutation::RemoveComponent { id } => {
                model.components.remove(id);
                remove_from_parent(model, id);
                debug!(id = %id, "removed component");
            }

            Mutation::RemoveContainer { id } => {
                remove_from_parent(model, id);
                remove_subtree(model, id);
                debug!(id = %id, "removed container subtree");
            }

            Mutation::RenameContainer { id, new_id } => {
                if let Some(container) = model.containers.remove(id) {
                    model.containers.insert(new_id.clone(), container);
                }
                if let Some(children) = model.order.remove(id) {
                    model.order.insert(new_id.clone(), children);
                }
                rename_in_parent(model, id, new_id);
                debug!(id = %id, new_id = %new_id, "renamed container");
            }
        }

        Ok(())
    }

    /// Check the mutation's structural preconditions without applying it.
    pub fn validate(&self, model: &FormModel) -> Result<(), MutationError> {
        match self {
            Mutation::AddComponent {
                id, container_id, ..
            } => {
                require_fresh_id(model, id)?;
                require_container(model, container_id)
            }

            Mutation::AddContainer { id, parent_id, .. } => {
                require_fresh_id(model, id)?;
                require_container(model, parent_id)
            }

            Mutation::UpdateComponent { id, .. } => {
                if !model.components.contains_key(id) {
                    return Err(MutationError::ComponentNotFound(id.clone()));
                }
                Ok(())
            }

            Mutation::MoveItem {
                id,
                target_container_id,
                ..
            } => {
                if !model.components.contains_key(id) && !model.containers.contains_key(id) {
                    return Err(MutationError::ItemNotFound(id.clone()));
                }
                require_container(model, target_container_id)?;

                // A container must not end up inside its own subtree.
                if id == target_container_id
                    || (model.containers.contains_key(id)
                        && is_ancestor(model, id, target_container_id))
                {
                    return Err(MutationError::CycleDetected(id.clone()));
                }
                Ok(())
            }

            Mutation::RemoveComponent { id } => {
                if !model.components.contains_key(id) {
                    return Err(MutationError::ComponentNotFound(id.clone()));
                }
                Ok(())
            }

            Mutation::RemoveContainer { id } => {
                if !model.containers.contains_key(id) {
                    return Err(MutationError::ContainerNotFound(id.clone()));
                }
                Ok(())
            }

            Mutation::RenameContainer { id, new_id } => {
                if !model.containers.contains_key(id) {
                    return Err(MutationError::ContainerNotFound(id.clone()));
                }
                require_fresh_id(model, new_id)
            }
        }
    }
}

fn require_fresh_id(model: &FormModel, id: &str) -> Result<(), MutationError> {
    if !is_valid_component_id(id) {
        return Err(MutationError::InvalidId(id.to_string()));
    }
    if model.id_exists(id) {
        return Err(MutationError::IdInUse(id.to_string()));
    }
    Ok(())
}

fn require_container(model: &FormModel, id: &str) -> Result<(), MutationError> {
    if id != model.root_id && !model.containers.contains_key(id) {
        return Err(MutationError::ContainerNotFound(id.to_string()));
    }
    Ok(())
}

/// The container whose order entry lists `id`.
fn parent_of<'a>(model: &'a FormModel, id: &str) -> Option<&'a str> {
    model
        .order
        .iter()
        .find(|(_, children)| children.iter().any(|child| child == id))
        .map(|(parent_id, _)| parent_id.as_str())
}

/// Whether `ancestor_id` lies on the parent chain above `id`.
fn is_ancestor(model: &FormModel, ancestor_id: &str, id: &str) -> bool {
    let mut current = parent_of(model, id);
    while let Some(parent_id) = current {
        if parent_id == ancestor_id {
            return true;
        }
        current = parent_of(model, parent_id);
    }
    false
}

fn insert_into(model: &mut FormModel, container_id: &str, id: &str, position: usize) {
    if let Some(children) = model.order.get_mut(container_id) {
        let index = position.min(children.len());
        children.insert(index, id.to_string());
    }
}

fn remove_from_parent(model: &mut FormModel, id: &str) {
    for children in model.order.values_mut() {
        if let Some(index) = children.iter().position(|child| child == id) {
            children.remove(index);
            return;
        }
    }
}

fn rename_in_parent(model: &mut FormModel, id: &str, new_id: &str) {
    for children in model.order.values_mut() {
        if let Some(index) = children.iter().position(|child| child == id) {
            children[index] = new_id.to_string();
            return;
        }
    }
}

/// Remove a container, its order entry, and everything below it.
fn remove_subtree(model: &mut FormModel, id: &str) {
    let mut stack = vec![id.to_string()];
    while let Some(current) = stack.pop() {
        model.containers.remove(&current);
        if let Some(children) = model.order.remove(&current) {
            for child_id in children {
                if model.components.remove(&child_id).is_none() {
                    stack.push(child_id);
                }
            }
        }
    }
}
