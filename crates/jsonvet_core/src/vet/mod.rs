mod document;
mod error;
mod field;
mod kind;
mod path;

/// Ready-made validators for [`Field::pipe`].
pub mod rules;

/// Root coordinator and sub-document views.
pub use document::{Document, Object};
/// Error and result aliases.
pub use error::{Result, ValidationError};
/// Lazy per-field accessor and the kind contract it is parameterized by.
pub use field::{Field, FieldKind, Site};
/// Built-in field kinds.
pub use kind::{Array, Bool, Float, Int, Mapping, Num, Str};
/// Absolute document paths.
pub use path::{Path, Segment};
