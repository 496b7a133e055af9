use std::str::FromStr;

use serde::Serialize;

use crate::Context;
use crate::StencilError;
use crate::StencilResult;
use crate::Value;

/// Text formats a context can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DataFormat {
	Json,
	Toml,
	Yaml,
}

impl FromStr for DataFormat {
	type Err = StencilError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"json" => Ok(Self::Json),
			"toml" => Ok(Self::Toml),
			"yaml" | "yml" => Ok(Self::Yaml),
			other => Err(StencilError::UnsupportedDataFormat(other.to_string())),
		}
	}
}

impl std::fmt::Display for DataFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Json => write!(f, "json"),
			Self::Toml => write!(f, "toml"),
			Self::Yaml => write!(f, "yaml"),
		}
	}
}

/// Parse `content` in the given format into a render context. The document
/// root must be a map.
pub fn parse_data(content: &str, format: DataFormat) -> StencilResult<Context> {
	let parse_error = |reason: String| {
		StencilError::DataParse {
			format: format.to_string(),
			reason,
		}
	};

	let json: serde_json::Value = match format {
		DataFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
		DataFormat::Toml => {
			let table: toml::Table =
				toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
			toml_to_json(toml::Value::Table(table))
		}
		DataFormat::Yaml => {
			serde_yaml_ng::from_str(content).map_err(|e| parse_error(e.to_string()))?
		}
	};

	match Value::from(json) {
		Value::Map(map) => Ok(Context::from(map)),
		other => Err(StencilError::DataRoot(other.kind())),
	}
}

impl Value {
	/// Convert any serializable value through its JSON representation.
	pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> StencilResult<Self> {
		serde_json::to_value(value)
			.map(Self::from)
			.map_err(|e| {
				StencilError::DataParse {
					format: DataFormat::Json.to_string(),
					reason: e.to_string(),
				}
			})
	}
}

/// Scalars only hold text: numbers keep their decimal form, `true` becomes
/// `"true"` while `false` and `null` become empty so they read as false in
/// conditions.
impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null | serde_json::Value::Bool(false) => Self::default(),
			serde_json::Value::Bool(true) => Self::Scalar("true".to_string()),
			serde_json::Value::Number(number) => Self::Scalar(number.to_string()),
			serde_json::Value::String(text) => Self::Scalar(text),
			serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
			serde_json::Value::Object(object) => {
				Self::Map(
					object
						.into_iter()
						.map(|(key, value)| (key, Self::from(value)))
						.collect(),
				)
			}
		}
	}
}

/// Convert a `toml::Value` to a `serde_json::Value`. Datetimes keep their
/// TOML text and floats that JSON can't hold fall back to their text form.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
	match value {
		toml::Value::String(s) => serde_json::Value::String(s),
		toml::Value::Integer(i) => serde_json::Value::Number(i.into()),
		toml::Value::Float(f) => {
			serde_json::Number::from_f64(f).map_or_else(
				|| serde_json::Value::String(f.to_string()),
				serde_json::Value::Number,
			)
		}
		toml::Value::Boolean(b) => serde_json::Value::Bool(b),
		toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
		toml::Value::Array(arr) => serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect()),
		toml::Value::Table(table) => {
			serde_json::Value::Object(
				table
					.into_iter()
					.map(|(k, v)| (k, toml_to_json(v)))
					.collect(),
			)
		}
	}
}
