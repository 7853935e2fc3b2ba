//! Structural validation of an entity model.
//!
//! The converter guarantees these invariants for the models it builds;
//! editing collaborators that mutate a model directly can re-check them
//! here before flattening the model back out.

use formstudio_model::FormModel;
use std::collections::{HashMap, HashSet};

use crate::errors::{ConvertError, ConvertResult};

/// Check the structural invariants of `model`:
///
/// 1. component and container ids are disjoint, and neither holds the root;
/// 2. every order entry belongs to the root or a known container;
/// 3. every id listed in some order entry resolves to an entity;
/// 4. no id is listed in more than one order entry (single parent);
/// 5. every entity is reachable from the root, so the parent relation is a
///    forest rooted at the synthetic root.
///
/// The first violation found is reported; a valid model yields `Ok(())`.
pub fn validate(model: &FormModel) -> ConvertResult<()> {
    for id in model.components.keys() {
        if model.containers.contains_key(id) {
            return Err(ConvertError::DuplicateId { id: id.clone() });
        }
    }
    if model.components.contains_key(&model.root_id)
        || model.containers.contains_key(&model.root_id)
    {
        return Err(ConvertError::DuplicateId {
            id: model.root_id.clone(),
        });
    }

    for container_id in model.order.keys() {
        if container_id != &model.root_id && !model.containers.contains_key(container_id) {
            return Err(ConvertError::malformed(
                container_id,
                "order entry without a container",
            ));
        }
    }

    let mut parents: HashMap<&str, &str> = HashMap::new();
    for (container_id, children) in &model.order {
        for child_id in children {
            if !model.components.contains_key(child_id)
                && !model.containers.contains_key(child_id)
            {
                return Err(ConvertError::dangling(container_id, child_id));
            }
            if parents
                .insert(child_id.as_str(), container_id.as_str())
                .is_some()
            {
                return Err(ConvertError::malformed(
                    child_id,
                    "id is listed in more than one order entry",
                ));
            }
        }
    }

    // With single parents established, the walk visits each id at most once
    // and terminates; anything it misses sits in a cycle or is orphaned.
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = model.root_order().iter().map(String::as_str).collect();
    while let Some(id) = stack.pop() {
        seen.insert(id);
        if let Some(children) = model.order.get(id) {
            stack.extend(children.iter().map(String::as_str));
        }
    }

    let unreachable = model
        .components
        .keys()
        .chain(model.containers.keys())
        .find(|id| !seen.contains(id.as_str()));
    if let Some(id) = unreachable {
        return Err(ConvertError::malformed(
            id,
            "entity not reachable from the root",
        ));
    }

    Ok(())
}
