use crate::Comparison;
use crate::Condition;
use crate::Context;
use crate::ForLoop;
use crate::Token;
use crate::Value;

pub fn text(value: &str) -> Token {
	Token::Text(value.to_string())
}

pub fn var(path: &str) -> Token {
	Token::Var(path.to_string())
}

pub fn for_start(variable: &str, collection: &str) -> Token {
	Token::ForStart(ForLoop {
		variable: variable.to_string(),
		collection: collection.to_string(),
	})
}

pub fn if_truthy(path: &str) -> Token {
	Token::IfStart(Condition::Truthy(path.to_string()))
}

pub fn if_not(path: &str) -> Token {
	Token::IfStart(Condition::Not(path.to_string()))
}

pub fn if_compare(lhs: &str, comparison: Comparison, rhs: &str) -> Token {
	Token::IfStart(Condition::Compare {
		lhs: lhs.to_string(),
		comparison,
		rhs: rhs.to_string(),
	})
}

pub fn end(keyword: &str) -> Token {
	Token::BlockEnd(keyword.to_string())
}

/// `items = ["first", "second"]`
pub fn items_context() -> Context {
	Context::new().with("items", Value::list(["first", "second"]))
}

/// `a.b.c = "d"` plus a scalar and a list at the top level.
pub fn nested_context() -> Context {
	Context::new()
		.with("a", Value::map([("b", Value::map([("c", "d")]))]))
		.with("scalar", "text")
		.with("list", Value::list(["x"]))
}
