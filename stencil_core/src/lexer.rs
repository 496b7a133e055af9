use std::ops::Range;

use logos::Logos;

use crate::StencilError;
use crate::StencilResult;
use crate::TagKind;
use crate::tokens::Token;

/// Raw tokens produced by logos. Every byte of the source lands in exactly
/// one of them.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[token("{$")]
	VarOpen,
	#[token("{%")]
	StatementOpen,
	#[token("{")]
	BraceOpen,
	#[token("}")]
	BraceClose,
	#[regex(r"[^{}]+")]
	Text,
}

/// Walks the logos token stream and assembles template tokens.
struct TokenWalker<'a> {
	/// The template source.
	source: &'a str,
	/// The collected raw tokens and their byte spans.
	raw_tokens: Vec<(Result<RawToken, ()>, Range<usize>)>,
	/// Current index into `raw_tokens`.
	cursor: usize,
	/// Start of the literal text not yet emitted.
	text_start: Option<usize>,
	/// Collected tokens.
	tokens: Vec<Token>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens: Vec<_> = RawToken::lexer(source).spanned().collect();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			text_start: None,
			tokens: vec![],
		}
	}

	fn current_span(&self) -> Range<usize> {
		self.raw_tokens[self.cursor].1.clone()
	}

	/// Extend the pending text run through the current raw token.
	fn push_text(&mut self) {
		if self.text_start.is_none() {
			self.text_start = Some(self.current_span().start);
		}
		self.cursor += 1;
	}

	/// Emit the pending text run, ending right before `end`.
	fn flush_text(&mut self, end: usize) {
		if let Some(start) = self.text_start.take() {
			if start < end {
				self.tokens.push(Token::Text(self.source[start..end].to_string()));
			}
		}
	}

	/// Consume an opening tag and everything up to the next `}`. Returns the
	/// text between them.
	fn take_tag(&mut self, kind: TagKind) -> StencilResult<&'a str> {
		let open = self.current_span();
		let close = self.raw_tokens[self.cursor + 1..]
			.iter()
			.position(|(raw, _)| matches!(raw, Ok(RawToken::BraceClose)))
			.map(|index| self.cursor + 1 + index);

		let Some(close) = close else {
			return Err(StencilError::UnterminatedTag {
				kind,
				offset: open.start,
			});
		};

		let source = self.source;
		let inner = &source[open.end..self.raw_tokens[close].1.start];
		self.cursor = close + 1;
		Ok(inner)
	}

	fn process(&mut self) -> StencilResult<()> {
		while self.cursor < self.raw_tokens.len() {
			let (result, span) = self.raw_tokens[self.cursor].clone();

			// Unreachable in practice since the text pattern covers every
			// byte other than the braces.
			let Ok(raw) = result else {
				self.push_text();
				continue;
			};

			match raw {
				RawToken::Text | RawToken::BraceClose => self.push_text(),
				// `{` that doesn't start a tag is literal on its own, the text
				// after it starts a new run.
				RawToken::BraceOpen => {
					self.flush_text(span.start);
					self.tokens.push(Token::Text("{".to_string()));
					self.cursor += 1;
				}
				RawToken::VarOpen => {
					self.flush_text(span.start);
					let path = self.take_tag(TagKind::Variable)?;
					self.tokens.push(Token::Var(path.trim().to_string()));
				}
				RawToken::StatementOpen => {
					self.flush_text(span.start);
					let inner = self.take_tag(TagKind::Statement)?;
					let statement = inner.trim_end();
					let statement = statement.strip_suffix('%').unwrap_or(statement);
					let words: Vec<&str> = statement.split_whitespace().collect();
					self.tokens.push(Token::statement(&words, span.start)?);
				}
			}
		}

		self.flush_text(self.source.len());
		Ok(())
	}
}

/// Split a template into flat tokens in source order.
pub fn tokenize(source: &str) -> StencilResult<Vec<Token>> {
	let mut walker = TokenWalker::new(source);
	walker.process()?;

	tracing::debug!(
		bytes = source.len(),
		tokens = walker.tokens.len(),
		"tokenized template"
	);

	Ok(walker.tokens)
}
