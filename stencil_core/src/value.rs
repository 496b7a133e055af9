use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;

use derive_more::Deref;
use derive_more::DerefMut;

use crate::StencilError;
use crate::StencilResult;

/// String keyed values. Lookups are by key so ordering only affects debug
/// output.
pub type Map = BTreeMap<String, Value>;

/// A value available to a template.
///
/// Exactly one variant is active. Asking a value for a variant it doesn't
/// hold is reported as [`StencilError::TypeMismatch`] at the place that
/// needed it, never silently coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// Leaf text.
	Scalar(String),
	/// Ordered items, iterated by `for` blocks.
	List(Vec<Value>),
	/// Nested scope reachable through dotted paths.
	Map(Map),
}

impl Default for Value {
	fn default() -> Self {
		Self::Scalar(String::new())
	}
}

impl Value {
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Scalar(_) => ValueKind::Scalar,
			Self::List(_) => ValueKind::List,
			Self::Map(_) => ValueKind::Map,
		}
	}

	/// A scalar is empty when its text is empty, a list or map when it has no
	/// entries. Conditions treat non-empty values as true.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Scalar(text) => text.is_empty(),
			Self::List(items) => items.is_empty(),
			Self::Map(map) => map.is_empty(),
		}
	}

	pub fn as_scalar(&self) -> Option<&str> {
		match self {
			Self::Scalar(text) => Some(text),
			Self::List(_) | Self::Map(_) => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(items) => Some(items),
			Self::Scalar(_) | Self::Map(_) => None,
		}
	}

	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Self::Map(map) => Some(map),
			Self::Scalar(_) | Self::List(_) => None,
		}
	}

	/// Build a list from anything that yields values.
	pub fn list<I, V>(items: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self::List(items.into_iter().map(Into::into).collect())
	}

	/// Build a map from key value pairs.
	pub fn map<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		Self::Map(
			entries
				.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

impl From<&str> for Value {
	fn from(text: &str) -> Self {
		Self::Scalar(text.to_string())
	}
}

impl From<String> for Value {
	fn from(text: String) -> Self {
		Self::Scalar(text)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::List(items)
	}
}

impl From<Map> for Value {
	fn from(map: Map) -> Self {
		Self::Map(map)
	}
}

impl From<Context> for Value {
	fn from(context: Context) -> Self {
		Self::Map(context.0)
	}
}

/// The variant tag of a [`Value`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	Scalar,
	List,
	Map,
}

impl Display for ValueKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Scalar => write!(f, "scalar"),
			Self::List => write!(f, "list"),
			Self::Map => write!(f, "map"),
		}
	}
}

/// The root scope of a render.
///
/// `for` blocks write `loop`, `loop0` and their loop variable straight into
/// the context and leave the last iteration's values behind, so a context
/// reused across renders may not be the one the caller built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Context(
	#[deref]
	#[deref_mut]
	Map,
);

impl Context {
	pub fn new() -> Self {
		Self::default()
	}

	/// Bind `key` to `value`, returning `self` for chaining.
	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}

	pub fn into_inner(self) -> Map {
		self.0
	}
}

impl From<Map> for Context {
	fn from(map: Map) -> Self {
		Self(map)
	}
}

impl<K, V> FromIterator<(K, V)> for Context
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

/// Resolve `path` against `map`.
///
/// A path wrapped in double quotes is a literal and resolves to its inner
/// text without touching the map. Otherwise the path is a dot separated chain
/// of keys where every segment but the last must name a map.
pub fn resolve_path<'a>(path: &str, map: &'a Map) -> StencilResult<Cow<'a, Value>> {
	if let Some(literal) = quoted_literal(path) {
		return Ok(Cow::Owned(Value::Scalar(literal.to_string())));
	}

	resolve_segments(path, path, map).map(Cow::Borrowed)
}

fn resolve_segments<'a>(full_path: &str, path: &str, map: &'a Map) -> StencilResult<&'a Value> {
	let (key, rest) = match path.split_once('.') {
		Some((key, rest)) => (key, Some(rest)),
		None => (path, None),
	};

	let Some(value) = map.get(key) else {
		return Err(StencilError::KeyNotFound {
			key: key.to_string(),
			path: full_path.to_string(),
		});
	};

	let Some(rest) = rest else {
		return Ok(value);
	};

	match value {
		Value::Map(inner) => resolve_segments(full_path, rest, inner),
		Value::Scalar(_) | Value::List(_) => {
			Err(StencilError::TypeMismatch {
				path: full_path[..full_path.len() - rest.len() - 1].to_string(),
				expected: ValueKind::Map,
				found: value.kind(),
			})
		}
	}
}

/// Returns the text between the quotes when `path` is a double quoted
/// literal. Backslashes are kept as written.
fn quoted_literal(path: &str) -> Option<&str> {
	path.strip_prefix('"')
		.and_then(|rest| rest.strip_suffix('"'))
}
