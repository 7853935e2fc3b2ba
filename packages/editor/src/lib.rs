//! # Formstudio Editor
//!
//! Validated mutations over the entity model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ converter: external layout → FormModel      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: mutations over the entity model     │
//! │  - validate, then apply                     │
//! │  - O(1) entity access by id                 │
//! │  - failed mutations leave the model intact  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ converter: FormModel → external layout      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is an intent-preserving operation (add, update, move,
//! remove, rename) that checks its structural preconditions before touching
//! the model, so the model invariants hold after every successful apply.

mod mutations;

pub use mutations::{Mutation, MutationError};
