//! `stencil_core` is a small text template engine. A template is literal text
//! with variable references and `for` / `if` blocks, rendered against a
//! hierarchical [`Context`] into one output string.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template text
//!   → Lexer (splits the source into text, variable and statement tokens)
//!   → Parser (nests for / if bodies into a tree, matching endfor / endif)
//!   → Engine (evaluates the tree against the context)
//! ```
//!
//! ## Syntax
//!
//! - `{$path}` inserts a scalar. A path is a dotted chain of keys
//!   (`user.name`) or a double quoted literal (`"text"`).
//! - `{% for item in items %}...{% endfor %}` renders the body once per list
//!   item with `item`, `loop` (1-based) and `loop0` (0-based) bound.
//! - `{% if path %}`, `{% if not path %}`, `{% if a == b %}` and
//!   `{% if a != b %}` followed by `...{% endif %}` render the body when the
//!   test holds. Values are true when they are not empty.
//! - Any other `{` is literal text.
//!
//! ## Key Types
//!
//! - [`Value`] — A scalar, list or map available to templates.
//! - [`Context`] — The root map a template is rendered against.
//! - [`Template`] — A parsed template tree that can be rendered repeatedly.
//! - [`Engine`] — Parses and renders with a fixed set of [`RenderOptions`].
//! - [`StencilError`] — Everything that can go wrong while parsing or
//!   rendering.
//!
//! ## Quick Start
//!
//! ```rust
//! use stencil_core::Context;
//! use stencil_core::Value;
//! use stencil_core::render;
//!
//! let mut context = Context::new()
//! 	.with("user", Value::map([("name", "Ada")]))
//! 	.with("admin", "yes");
//!
//! let output = render(
//! 	"Hello {$user.name}{% if admin %} (admin){% endif %}!",
//! 	&mut context,
//! )
//! .unwrap();
//! assert_eq!(output, "Hello Ada (admin)!");
//! ```

pub use config::*;
pub use data::*;
pub use engine::*;
pub use error::*;
pub use lexer::tokenize;
pub use parser::*;
pub use tokens::*;
pub use value::*;

mod config;
mod data;
mod engine;
#[allow(unused_assignments)]
mod error;
mod lexer;
mod parser;
mod tokens;
mod value;

#[cfg(test)]
mod __fixtures;
