use crate::BlockMode;
use crate::RenderOptions;
use crate::StencilError;
use crate::StencilResult;
use crate::lexer::tokenize;
use crate::tokens::Condition;
use crate::tokens::ForLoop;
use crate::tokens::Token;

/// A node of the template tree. `for` and `if` blocks own their bodies and
/// the terminators that closed them are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	/// Literal text.
	Text(String),
	/// A variable reference, by path.
	Var(String),
	/// A loop over a list.
	For {
		looping: ForLoop,
		children: Vec<Node>,
	},
	/// A conditional body.
	If {
		condition: Condition,
		children: Vec<Node>,
	},
	/// A terminator that closed nothing. Only kept with
	/// [`BlockMode::Lenient`] and renders as nothing.
	BlockEnd(String),
}

/// Tokenize `source` and nest the tokens into a tree.
pub fn parse(source: impl AsRef<str>, options: &RenderOptions) -> StencilResult<Vec<Node>> {
	let tokens = tokenize(source.as_ref())?;
	build_tree(&tokens, options)
}

/// Nest a flat token sequence into a tree, matching every `for` with an
/// `endfor` and every `if` with an `endif`.
pub fn build_tree(tokens: &[Token], options: &RenderOptions) -> StencilResult<Vec<Node>> {
	let builder = TreeBuilder {
		tokens,
		mode: options.blocks,
		max_depth: options.max_depth,
	};
	let level = builder.collect(0, None, 0)?;

	tracing::debug!(
		tokens = tokens.len(),
		nodes = level.nodes.len(),
		"built template tree"
	);

	Ok(level.nodes)
}

/// The nodes gathered for one block body (or the top level) and where the
/// cursor stopped.
struct Level {
	nodes: Vec<Node>,
	cursor: usize,
	/// Whether the expected terminator was found before the tokens ran out.
	closed: bool,
}

struct TreeBuilder<'a> {
	tokens: &'a [Token],
	mode: BlockMode,
	max_depth: usize,
}

impl TreeBuilder<'_> {
	/// Collect nodes starting at `cursor` until `terminator` is consumed or
	/// the tokens run out. The top level passes `None`.
	fn collect(
		&self,
		mut cursor: usize,
		terminator: Option<&str>,
		depth: usize,
	) -> StencilResult<Level> {
		let mut nodes = vec![];

		while let Some(token) = self.tokens.get(cursor) {
			cursor += 1;

			match token {
				Token::Text(text) => nodes.push(Node::Text(text.clone())),
				Token::Var(path) => nodes.push(Node::Var(path.clone())),
				Token::ForStart(looping) => {
					let (children, next) = self.block(
						cursor,
						ForLoop::TERMINATOR,
						depth + 1,
						|| looping.to_string(),
					)?;
					cursor = next;
					nodes.push(Node::For {
						looping: looping.clone(),
						children,
					});
				}
				Token::IfStart(condition) => {
					let (children, next) = self.block(
						cursor,
						Condition::TERMINATOR,
						depth + 1,
						|| condition.to_string(),
					)?;
					cursor = next;
					nodes.push(Node::If {
						condition: condition.clone(),
						children,
					});
				}
				Token::BlockEnd(keyword) => {
					if terminator == Some(keyword.as_str()) {
						return Ok(Level {
							nodes,
							cursor,
							closed: true,
						});
					}

					match self.mode {
						BlockMode::Strict => {
							return Err(StencilError::UnexpectedBlockEnd(keyword.clone()));
						}
						BlockMode::Lenient => nodes.push(Node::BlockEnd(keyword.clone())),
					}
				}
			}
		}

		Ok(Level {
			nodes,
			cursor,
			closed: false,
		})
	}

	/// Collect the body of a block opened just before `cursor`.
	fn block(
		&self,
		cursor: usize,
		terminator: &'static str,
		depth: usize,
		statement: impl FnOnce() -> String,
	) -> StencilResult<(Vec<Node>, usize)> {
		if depth > self.max_depth {
			return Err(StencilError::NestingTooDeep(self.max_depth));
		}

		let level = self.collect(cursor, Some(terminator), depth)?;

		if !level.closed && self.mode == BlockMode::Strict {
			return Err(StencilError::UnclosedBlock {
				statement: statement(),
				terminator: terminator.to_string(),
			});
		}

		Ok((level.nodes, level.cursor))
	}
}
