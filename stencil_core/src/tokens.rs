use std::fmt::Display;

use crate::StencilError;
use crate::StencilResult;

/// A flat token produced by the lexer, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
	/// Literal text copied to the output.
	Text(String),
	/// `{$path}`
	Var(String),
	/// `{% for item in items %}`
	ForStart(ForLoop),
	/// `{% if ... %}`
	IfStart(Condition),
	/// Any other statement, e.g. `{% endfor %}`. Holds the keyword.
	BlockEnd(String),
}

impl Token {
	/// Classify the words inside a `{% ... }` tag by the first one. `offset`
	/// is the byte position of the tag, used when there are no words.
	pub(crate) fn statement(words: &[&str], offset: usize) -> StencilResult<Self> {
		match words.first().copied() {
			Some("for") => ForLoop::parse(words).map(Self::ForStart),
			Some("if") => Condition::parse(words).map(Self::IfStart),
			Some(keyword) => Ok(Self::BlockEnd(keyword.to_string())),
			None => Err(StencilError::EmptyStatement(offset)),
		}
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Text(text) => write!(f, "{text}"),
			Self::Var(path) => write!(f, "{{${path}}}"),
			Self::ForStart(looping) => write!(f, "{{% {looping} %}}"),
			Self::IfStart(condition) => write!(f, "{{% {condition} %}}"),
			Self::BlockEnd(keyword) => write!(f, "{{% {keyword} %}}"),
		}
	}
}

/// The header of a `for` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForLoop {
	/// Name bound to each item inside the body.
	pub variable: String,
	/// Path to the list being iterated.
	pub collection: String,
}

impl ForLoop {
	pub const TERMINATOR: &'static str = "endfor";

	fn parse(words: &[&str]) -> StencilResult<Self> {
		match words {
			["for", variable, "in", collection] => {
				Ok(Self {
					variable: (*variable).to_string(),
					collection: (*collection).to_string(),
				})
			}
			_ => Err(StencilError::InvalidForSyntax(words.join(" "))),
		}
	}
}

impl Display for ForLoop {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "for {} in {}", self.variable, self.collection)
	}
}

/// The test of an `if` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
	/// `if key`: true when the value is not empty.
	Truthy(String),
	/// `if not key`: true when the value is empty.
	Not(String),
	/// `if lhs == rhs` / `if lhs != rhs`: compares scalar text.
	Compare {
		lhs: String,
		comparison: Comparison,
		rhs: String,
	},
}

impl Condition {
	pub const TERMINATOR: &'static str = "endif";

	fn parse(words: &[&str]) -> StencilResult<Self> {
		match words {
			// Words after the negated path are ignored.
			["if", "not", path, ..] => Ok(Self::Not((*path).to_string())),
			["if", path] if *path != "not" => Ok(Self::Truthy((*path).to_string())),
			["if", lhs, operator, rhs] => {
				Ok(Self::Compare {
					lhs: (*lhs).to_string(),
					comparison: Comparison::from_operator(operator),
					rhs: (*rhs).to_string(),
				})
			}
			_ => Err(StencilError::InvalidIfSyntax(words.join(" "))),
		}
	}
}

impl Display for Condition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Truthy(path) => write!(f, "if {path}"),
			Self::Not(path) => write!(f, "if not {path}"),
			Self::Compare {
				lhs,
				comparison,
				rhs,
			} => write!(f, "if {lhs} {comparison} {rhs}"),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
	Equal,
	NotEqual,
}

impl Comparison {
	/// `==` is equality. Every other operator compares for inequality.
	fn from_operator(operator: &str) -> Self {
		if operator == "==" {
			Self::Equal
		} else {
			Self::NotEqual
		}
	}

	pub fn test(self, lhs: &str, rhs: &str) -> bool {
		match self {
			Self::Equal => lhs == rhs,
			Self::NotEqual => lhs != rhs,
		}
	}
}

impl Display for Comparison {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Equal => write!(f, "=="),
			Self::NotEqual => write!(f, "!="),
		}
	}
}
