use serde_json::{Map, Number, Value};

use crate::error::{CliError, Result};

/// Kind named in a `--field` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KindName {
	String,
	Int,
	Float,
	Bool,
	Number,
	Array,
	Object,
}

impl KindName {
	fn parse(text: &str) -> Option<Self> {
		Some(match text {
			"string" | "str" => Self::String,
			"int" | "integer" => Self::Int,
			"float" => Self::Float,
			"bool" | "boolean" => Self::Bool,
			"number" | "num" => Self::Number,
			"array" => Self::Array,
			"object" => Self::Object,
			_ => return None,
		})
	}
}

/// Typed fallback parsed from the `=default` suffix.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DefaultValue {
	Str(String),
	Int(i64),
	Float(f64),
	Bool(bool),
	Number(Number),
	Array(Vec<Value>),
	Object(Map<String, Value>),
}

/// Parsed `path[:kind][=default]` declaration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FieldDecl {
	/// Declaration text as given, used as the report key.
	pub raw: String,
	/// Keys before `[]`, or the whole path.
	pub head: Vec<String>,
	/// Keys inside each element when the path contains `[]`.
	pub each: Option<Vec<String>>,
	pub kind: KindName,
	pub default: Option<DefaultValue>,
}

impl FieldDecl {
	/// Parse one declaration, e.g. `items[].qty:int=1`.
	pub(crate) fn parse(raw: &str) -> Result<Self> {
		let invalid = |reason: &str| CliError::InvalidDecl {
			decl: raw.to_owned(),
			reason: reason.to_owned(),
		};

		let (target, default_text) = match raw.split_once('=') {
			Some((target, default)) => (target, Some(default)),
			None => (raw, None),
		};
		let (path_text, kind) = match target.rsplit_once(':') {
			Some((path, kind)) => (path, KindName::parse(kind).ok_or_else(|| invalid("unknown kind"))?),
			None => (target, KindName::String),
		};

		let (head_text, each_text) = match path_text.split_once("[]") {
			Some((head, rest)) => {
				if rest.contains("[]") {
					return Err(invalid("at most one `[]` is supported"));
				}
				let each = if rest.is_empty() {
					Some("")
				} else {
					Some(rest.strip_prefix('.').ok_or_else(|| invalid("expected `.` after `[]`"))?)
				};
				(head, each)
			}
			None => (path_text, None),
		};

		let head = split_keys(head_text).ok_or_else(|| invalid("empty path segment"))?;
		if head.is_empty() {
			return Err(invalid("path must name at least one key"));
		}
		let each = match each_text {
			Some("") => Some(Vec::new()),
			Some(text) => Some(split_keys(text).ok_or_else(|| invalid("empty path segment"))?),
			None => None,
		};

		let default = match default_text {
			Some(text) => Some(parse_default(kind, text).map_err(|reason| CliError::InvalidDefault {
				decl: raw.to_owned(),
				reason,
			})?),
			None => None,
		};

		Ok(Self {
			raw: raw.to_owned(),
			head,
			each,
			kind,
			default,
		})
	}
}

/// Split dotted keys; `None` when any segment is empty.
fn split_keys(text: &str) -> Option<Vec<String>> {
	if text.is_empty() {
		return Some(Vec::new());
	}
	text.split('.')
		.map(|key| if key.is_empty() { None } else { Some(key.to_owned()) })
		.collect()
}

fn parse_default(kind: KindName, text: &str) -> std::result::Result<DefaultValue, String> {
	match kind {
		KindName::String => Ok(DefaultValue::Str(text.to_owned())),
		KindName::Int => text.parse().map(DefaultValue::Int).map_err(|err| format!("{err}")),
		KindName::Float => match text.parse::<f64>().map_err(|err| format!("{err}"))? {
			value if value.is_finite() => Ok(DefaultValue::Float(value)),
			_ => Err("float default must be finite".to_owned()),
		},
		KindName::Bool => text.parse().map(DefaultValue::Bool).map_err(|err| format!("{err}")),
		KindName::Number => serde_json::from_str(text).map(DefaultValue::Number).map_err(|err| err.to_string()),
		KindName::Array => match serde_json::from_str(text).map_err(|err| err.to_string())? {
			Value::Array(items) => Ok(DefaultValue::Array(items)),
			_ => Err("expected a JSON array".to_owned()),
		},
		KindName::Object => match serde_json::from_str(text).map_err(|err| err.to_string())? {
			Value::Object(map) => Ok(DefaultValue::Object(map)),
			_ => Err("expected a JSON object".to_owned()),
		},
	}
}
