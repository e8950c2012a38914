//! Message templates with named placeholders.
//!
//! Patterns use `{name}` placeholders (see [`parser`] for the full syntax).
//! Filling validates the supplied bindings against the declared placeholder
//! set first and reports every missing name in a single
//! [`TemplateError::MissingFields`].

pub mod builtin;
pub mod engine;
pub mod parser;

pub use builtin::field_label;
pub use engine::{Bindings, Template, TemplateEngine, TemplateError};
