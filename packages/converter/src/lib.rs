//! # Formstudio Converter
//!
//! Bidirectional transform between the external layout format and the
//! internal entity model.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ external: flat, order-significant node list  │
//! │ (groups reference children by id)            │
//! └──────────────────────────────────────────────┘
//!          to_internal ↓        ↑ to_external
//! ┌──────────────────────────────────────────────┐
//! │ internal: FormModel                          │
//! │  - components / containers maps              │
//! │  - order map rooted at a synthetic container │
//! │  - O(1) lookup by id for editing             │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Both directions are pure functions over their input: they either return
//! a complete result or a single typed [`ConvertError`], never a partially
//! built structure. Traversals run on explicit work-stacks with a
//! configurable nesting bound, so hand-edited documents cannot drive
//! call-stack growth.

pub mod builder;
pub mod classifier;
pub mod errors;
pub mod serializer;
pub mod validate;

mod extractor;

#[cfg(test)]
mod tests_roundtrip;

pub use builder::{to_internal, ModelBuilder, DEFAULT_MAX_DEPTH};
pub use classifier::{in_group_ids, top_level};
pub use errors::{ConvertError, ConvertResult};
pub use serializer::{to_external, LayoutSerializer};
pub use validate::validate;
