use thiserror::Error;

use crate::vet::Path;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// The single failure recorded for a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// Input bytes were not a JSON document.
	#[error("JSON parse error: {message}")]
	Parse {
		/// One-based line reported by the decoder.
		line: usize,
		/// One-based column reported by the decoder.
		column: usize,
		/// Decoder message.
		message: String,
	},
	/// Required field was absent or null and had no default.
	#[error("property `{path}` is missing")]
	Missing {
		/// Absolute path of the field.
		path: Path,
	},
	/// Field was present but did not narrow to the declared kind.
	#[error("property `{path}` should be {expected}")]
	WrongType {
		/// Absolute path of the field.
		path: Path,
		/// Declared kind name.
		expected: &'static str,
	},
	/// Strict level contained a key nobody read.
	#[error("extra field `{path}` is not allowed")]
	ExtraField {
		/// Absolute path of the first unexpected key.
		path: Path,
	},
	/// A piped validator rejected the value.
	#[error("property `{path}` failed {rule}: {message}")]
	Custom {
		/// Absolute path of the field.
		path: Path,
		/// Short stable rule name, e.g. `exact_len`.
		rule: String,
		/// Human-readable reason.
		message: String,
	},
}

impl ValidationError {
	/// Build a validator failure.
	pub fn custom(path: &Path, rule: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Custom {
			path: path.clone(),
			rule: rule.into(),
			message: message.into(),
		}
	}

	pub(crate) fn from_decode(err: &serde_json::Error) -> Self {
		Self::Parse {
			line: err.line(),
			column: err.column(),
			message: err.to_string(),
		}
	}

	/// Stable lower-case kind label.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Parse { .. } => "parse",
			Self::Missing { .. } => "missing",
			Self::WrongType { .. } => "wrong_type",
			Self::ExtraField { .. } => "extra_field",
			Self::Custom { .. } => "custom",
		}
	}

	/// Path the error points at; parse errors carry none.
	pub fn path(&self) -> Option<&Path> {
		match self {
			Self::Parse { .. } => None,
			Self::Missing { path } | Self::WrongType { path, .. } | Self::ExtraField { path } | Self::Custom { path, .. } => Some(path),
		}
	}
}
