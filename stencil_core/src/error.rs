use miette::Diagnostic;
use thiserror::Error;

use crate::ValueKind;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum StencilError {
	#[error("invalid for-statement syntax: `{0}`")]
	#[diagnostic(
		code(stencil::invalid_for_syntax),
		help("a loop takes exactly four words: `{{% for item in items %}}`")
	)]
	InvalidForSyntax(String),

	#[error("invalid if-statement syntax: `{0}`")]
	#[diagnostic(
		code(stencil::invalid_if_syntax),
		help("supported forms: `if key`, `if not key`, `if lhs == rhs`, `if lhs != rhs`")
	)]
	InvalidIfSyntax(String),

	#[error("empty statement at byte {0}")]
	#[diagnostic(code(stencil::empty_statement))]
	EmptyStatement(usize),

	#[error("unterminated {kind} tag starting at byte {offset}")]
	#[diagnostic(
		code(stencil::unterminated_tag),
		help("close the tag with `}}`")
	)]
	UnterminatedTag { kind: TagKind, offset: usize },

	#[error("missing `{{% {terminator} %}}` for block `{{% {statement} %}}`")]
	#[diagnostic(
		code(stencil::unclosed_block),
		help("add `{{% {terminator} %}}` after the block body")
	)]
	UnclosedBlock {
		statement: String,
		terminator: String,
	},

	#[error("unexpected `{{% {0} %}}` without a matching block")]
	#[diagnostic(
		code(stencil::unexpected_block_end),
		help("remove the stray terminator or open a block for it")
	)]
	UnexpectedBlockEnd(String),

	#[error("blocks nested deeper than the limit of {0}")]
	#[diagnostic(
		code(stencil::nesting_too_deep),
		help("raise `max_depth` in the render options")
	)]
	NestingTooDeep(usize),

	#[error("type mismatch at `{path}`: expected {expected}, found {found}")]
	#[diagnostic(code(stencil::type_mismatch))]
	TypeMismatch {
		path: String,
		expected: ValueKind,
		found: ValueKind,
	},

	#[error("key `{key}` not found while resolving `{path}`")]
	#[diagnostic(
		code(stencil::key_not_found),
		help("add the key to the context or set `undefined = \"empty\"`")
	)]
	KeyNotFound { key: String, path: String },

	#[error("failed to parse render options: {0}")]
	#[diagnostic(
		code(stencil::config_parse),
		help("check that the options are valid TOML with `undefined`, `blocks` and `max_depth` keys")
	)]
	ConfigParse(String),

	#[error("failed to parse {format} data: {reason}")]
	#[diagnostic(code(stencil::data_parse))]
	DataParse { format: String, reason: String },

	#[error("unsupported data format: `{0}`")]
	#[diagnostic(
		code(stencil::unsupported_format),
		help("supported formats: json, toml, yaml, yml")
	)]
	UnsupportedDataFormat(String),

	#[error("data root must be a map, found {0}")]
	#[diagnostic(code(stencil::data_root))]
	DataRoot(ValueKind),
}

/// The kind of tag that was left open when the template ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
	/// `{$ ... }`
	Variable,
	/// `{% ... }`
	Statement,
}

impl std::fmt::Display for TagKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Variable => write!(f, "variable"),
			Self::Statement => write!(f, "statement"),
		}
	}
}

pub type StencilResult<T> = Result<T, StencilError>;
