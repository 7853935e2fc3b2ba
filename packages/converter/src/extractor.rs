//! Group extraction: one top-level group and everything it transitively
//! references, lifted into container and component entries.

use formstudio_model::{FormComponent, FormContainer, FormModel, GroupNode, Node};
use std::collections::HashMap;

use crate::errors::{ConvertError, ConvertResult};

/// Walks one group subtree on an explicit work-stack so that nesting depth
/// is bounded by configuration rather than by the call stack. Nesting depth
/// is author-controlled input.
pub(crate) struct GroupExtractor<'doc> {
    /// The full document, indexed by id.
    pub(crate) index: &'doc HashMap<&'doc str, &'doc Node>,
    pub(crate) max_depth: usize,
}

impl<'doc> GroupExtractor<'doc> {
    /// Store `group` and its descendants into `model`.
    ///
    /// Child order is exactly the order given in `children`, never
    /// re-sorted. A child id that resolves to no node aborts the whole
    /// conversion with a [`ConvertError::DanglingReference`].
    pub(crate) fn extract(
        &self,
        group: &'doc GroupNode,
        model: &mut FormModel,
    ) -> ConvertResult<()> {
        let mut stack: Vec<(&'doc GroupNode, usize)> = vec![(group, 1)];

        while let Some((group, depth)) = stack.pop() {
            if depth > self.max_depth {
                return Err(ConvertError::MaxDepthExceeded {
                    max_depth: self.max_depth,
                });
            }

            let children = group.effective_children();
            for child_id in &children {
                match self.index.get(child_id.as_str()) {
                    Some(Node::Group(nested)) => stack.push((nested, depth + 1)),
                    Some(Node::Component(component)) => {
                        model
                            .components
                            .insert(child_id.clone(), FormComponent::from_node(component));
                    }
                    None => return Err(ConvertError::dangling(&group.id, child_id)),
                }
            }

            model
                .containers
                .insert(group.id.clone(), FormContainer::from_group(group));
            model.order.insert(group.id.clone(), children);
        }

        Ok(())
    }
}
