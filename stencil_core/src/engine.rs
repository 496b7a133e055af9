use std::borrow::Cow;

use crate::Context;
use crate::Node;
use crate::RenderOptions;
use crate::StencilError;
use crate::StencilResult;
use crate::UndefinedBehavior;
use crate::Value;
use crate::ValueKind;
use crate::parser::parse;
use crate::resolve_path;
use crate::tokens::Condition;
use crate::tokens::ForLoop;

/// Context key holding the 1-based iteration count inside a `for` body.
pub const LOOP_KEY: &str = "loop";
/// Context key holding the 0-based iteration index inside a `for` body.
pub const LOOP0_KEY: &str = "loop0";

/// Render `source` against `context` with the default [`RenderOptions`].
///
/// ```rust
/// use stencil_core::Context;
/// use stencil_core::Value;
/// use stencil_core::render;
///
/// let mut context = Context::new().with("items", Value::list(["a", "b"]));
/// let output = render("{% for x in items %}{$loop}.{$x} {% endfor %}", &mut context).unwrap();
/// assert_eq!(output, "1.a 2.b ");
/// ```
pub fn render(source: impl AsRef<str>, context: &mut Context) -> StencilResult<String> {
	Engine::default().render(source, context)
}

/// Parses and renders templates with a fixed set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
	options: RenderOptions,
}

impl Engine {
	pub fn new(options: RenderOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// Parse `source` once so it can be rendered many times.
	pub fn parse(&self, source: impl AsRef<str>) -> StencilResult<Template> {
		Template::parse_with_options(source, self.options)
	}

	pub fn render(&self, source: impl AsRef<str>, context: &mut Context) -> StencilResult<String> {
		self.parse(source)?.render(context)
	}
}

/// A parsed template tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
	nodes: Vec<Node>,
	options: RenderOptions,
}

impl Template {
	pub fn parse(source: impl AsRef<str>) -> StencilResult<Self> {
		Self::parse_with_options(source, RenderOptions::default())
	}

	pub fn parse_with_options(
		source: impl AsRef<str>,
		options: RenderOptions,
	) -> StencilResult<Self> {
		let nodes = parse(source, &options)?;
		Ok(Self { nodes, options })
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Render the tree against `context`.
	///
	/// Loop bindings written during the render stay in `context`. On error
	/// nothing is returned, even if some nodes rendered.
	#[tracing::instrument(level = "debug", skip_all, fields(nodes = self.nodes.len()))]
	pub fn render(&self, context: &mut Context) -> StencilResult<String> {
		let renderer = Renderer {
			undefined: self.options.undefined,
		};
		let mut output = String::new();
		renderer.render_nodes(&self.nodes, context, &mut output)?;

		tracing::debug!(bytes = output.len(), "rendered template");

		Ok(output)
	}
}

struct Renderer {
	undefined: UndefinedBehavior,
}

impl Renderer {
	fn render_nodes(
		&self,
		nodes: &[Node],
		context: &mut Context,
		output: &mut String,
	) -> StencilResult<()> {
		for node in nodes {
			match node {
				Node::Text(text) => output.push_str(text),
				Node::Var(path) => {
					if let Some(value) = self.lookup(path, context)? {
						output.push_str(expect_scalar(path, &value)?);
					}
				}
				Node::For { looping, children } => {
					self.render_for(looping, children, context, output)?;
				}
				Node::If {
					condition,
					children,
				} => {
					if self.is_true(condition, context)? {
						self.render_nodes(children, context, output)?;
					}
				}
				Node::BlockEnd(_) => {}
			}
		}

		Ok(())
	}

	fn render_for(
		&self,
		looping: &ForLoop,
		children: &[Node],
		context: &mut Context,
		output: &mut String,
	) -> StencilResult<()> {
		let items = match self.lookup(&looping.collection, context)? {
			None => return Ok(()),
			Some(value) => {
				match value.into_owned() {
					Value::List(items) => items,
					other => {
						return Err(StencilError::TypeMismatch {
							path: looping.collection.clone(),
							expected: ValueKind::List,
							found: other.kind(),
						});
					}
				}
			}
		};

		for (index, item) in items.into_iter().enumerate() {
			tracing::trace!(
				iteration = index + 1,
				variable = %looping.variable,
				"rendering loop body"
			);

			context.insert(LOOP_KEY.to_string(), Value::Scalar((index + 1).to_string()));
			context.insert(LOOP0_KEY.to_string(), Value::Scalar(index.to_string()));
			context.insert(looping.variable.clone(), item);
			self.render_nodes(children, context, output)?;
		}

		Ok(())
	}

	fn is_true(&self, condition: &Condition, context: &Context) -> StencilResult<bool> {
		let result = match condition {
			Condition::Truthy(path) => !self.is_empty(path, context)?,
			Condition::Not(path) => self.is_empty(path, context)?,
			Condition::Compare {
				lhs,
				comparison,
				rhs,
			} => {
				let left = self.lookup(lhs, context)?;
				let right = self.lookup(rhs, context)?;
				let left = left.as_deref().map_or(Ok(""), |value| expect_scalar(lhs, value))?;
				let right = right
					.as_deref()
					.map_or(Ok(""), |value| expect_scalar(rhs, value))?;
				comparison.test(left, right)
			}
		};

		tracing::trace!(%condition, result, "evaluated condition");

		Ok(result)
	}

	fn is_empty(&self, path: &str, context: &Context) -> StencilResult<bool> {
		Ok(self
			.lookup(path, context)?
			.is_none_or(|value| value.is_empty()))
	}

	/// Resolve `path`, returning `None` for a missing key when undefined
	/// values are allowed.
	fn lookup<'a>(&self, path: &str, context: &'a Context) -> StencilResult<Option<Cow<'a, Value>>> {
		match resolve_path(path, context) {
			Ok(value) => Ok(Some(value)),
			Err(StencilError::KeyNotFound { .. }) if self.undefined == UndefinedBehavior::Empty => {
				Ok(None)
			}
			Err(error) => Err(error),
		}
	}
}

fn expect_scalar<'v>(path: &str, value: &'v Value) -> StencilResult<&'v str> {
	value.as_scalar().ok_or_else(|| {
		StencilError::TypeMismatch {
			path: path.to_string(),
			expected: ValueKind::Scalar,
			found: value.kind(),
		}
	})
}
