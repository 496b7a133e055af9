use serde::Deserialize;

use crate::StencilError;
use crate::StencilResult;

/// Default maximum depth of nested `for` / `if` blocks.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options controlling how templates are parsed and rendered.
///
/// ```toml
/// undefined = "empty"
/// blocks = "lenient"
/// max_depth = 16
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
	/// What a path that names a missing key resolves to.
	pub undefined: UndefinedBehavior,
	/// How unclosed blocks and stray terminators are treated.
	pub blocks: BlockMode,
	/// Maximum nesting depth of blocks.
	pub max_depth: usize,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			undefined: UndefinedBehavior::default(),
			blocks: BlockMode::default(),
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl RenderOptions {
	/// Parse options from TOML text. Missing keys keep their defaults.
	pub fn from_toml_str(content: &str) -> StencilResult<Self> {
		toml::from_str(content).map_err(|e| StencilError::ConfigParse(e.to_string()))
	}

	#[must_use]
	pub fn with_undefined(mut self, undefined: UndefinedBehavior) -> Self {
		self.undefined = undefined;
		self
	}

	#[must_use]
	pub fn with_blocks(mut self, blocks: BlockMode) -> Self {
		self.blocks = blocks;
		self
	}

	#[must_use]
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UndefinedBehavior {
	/// A missing key fails the render with [`StencilError::KeyNotFound`].
	#[default]
	Strict,
	/// A missing key resolves to an empty scalar.
	Empty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockMode {
	/// Unclosed blocks and stray terminators are errors.
	#[default]
	Strict,
	/// An unclosed block keeps whatever body was collected before the
	/// template ended and a stray terminator is kept as an inert node.
	Lenient,
}
