use std::path::PathBuf;

use thiserror::Error;

/// Result alias for command-line failures.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures that stop a command before a verdict is reached.
#[derive(Debug, Error)]
pub enum CliError {
	/// Input file could not be read.
	#[error("failed to read {}: {source}", .path.display())]
	Read {
		/// File that was requested.
		path: PathBuf,
		/// Underlying I/O failure.
		source: std::io::Error,
	},
	/// `--field` declaration does not follow `path[:kind][=default]`.
	#[error("invalid field declaration `{decl}`: {reason}")]
	InvalidDecl {
		/// Declaration as given.
		decl: String,
		/// What was wrong with it.
		reason: String,
	},
	/// `=default` text does not fit the declared kind.
	#[error("invalid default in `{decl}`: {reason}")]
	InvalidDefault {
		/// Declaration as given.
		decl: String,
		/// Parser message for the default text.
		reason: String,
	},
	/// Report could not be serialized.
	#[error("failed to encode report: {0}")]
	Encode(#[from] serde_json::Error),
}
