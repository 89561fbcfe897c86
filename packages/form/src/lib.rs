//! # Pagecraft Form
//!
//! Schema-driven form rendering over arbitrary nested JSON — no per-block
//! code.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ schema: block type → ComponentSchema         │
//! └──────────────────────────────────────────────┘
//!                     ↓
//! ┌──────────────────────────────────────────────┐
//! │ form: (FieldSpec, value) → Widget tree       │
//! │  - pure recursive rendering                  │
//! │  - shape mismatch degrades, never throws     │
//! │  - edits write back through content paths    │
//! └──────────────────────────────────────────────┘
//!                     ↓
//! ┌──────────────────────────────────────────────┐
//! │ content: path get/set over the JSON payload  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_form::{render, edits};
//! use pagecraft_schema::SchemaRegistry;
//!
//! let schema = registry.resolve("hero", &block.content);
//! let form = render(&schema, &block.content);
//!
//! // Commit an input through the widget's write-back path.
//! edits::set_scalar(&mut block.content, "hero.title", "New title", false)?;
//! ```

pub mod edits;
pub mod error;
pub mod renderer;
pub mod widget;

pub use edits::{
    append_item, append_tag, default_value, move_item, remove_item, remove_tag, set_scalar,
    set_select, MoveDirection,
};
pub use error::{FormError, FormResult};
pub use renderer::{render, render_field};
pub use widget::{Form, Widget};
