use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use serde_json::Value;

use crate::vet::{Array, Bool, Field, FieldKind, Float, Int, Mapping, Num, Path, Result, Site, Str, ValidationError};

/// Write-once holder for the first recorded failure.
///
/// Shared by reference between a [`Document`] and every accessor and
/// sub-document derived from it.
#[derive(Debug, Default)]
pub(crate) struct ErrorSlot {
	first: RefCell<Option<ValidationError>>,
}

impl ErrorSlot {
	/// Record `err` unless an earlier failure already won. Returns whether it was kept.
	pub(crate) fn record(&self, err: ValidationError) -> bool {
		let mut first = self.first.borrow_mut();
		if let Some(winner) = first.as_ref() {
			tracing::trace!(dropped = %err, winner = %winner, "validation error shadowed by earlier failure");
			return false;
		}

		tracing::debug!(kind = err.kind(), error = %err, "recorded first validation error");
		*first = Some(err);
		true
	}

	pub(crate) fn is_set(&self) -> bool {
		self.first.borrow().is_some()
	}

	pub(crate) fn get(&self) -> Option<ValidationError> {
		self.first.borrow().clone()
	}
}

/// Key prefixes read through accessors at one mapping level.
#[derive(Debug, Default)]
struct CheckedPaths {
	seen: RefCell<HashSet<Vec<String>>>,
	/// Set once the level itself was read through an empty key slice.
	whole: Cell<bool>,
}

impl CheckedPaths {
	/// Mark `keys` and every prefix of it, so `a.b.c` also covers `a` and `a.b`.
	/// An empty slice covers every key at this level.
	fn mark(&self, keys: &[&str]) {
		if keys.is_empty() {
			self.whole.set(true);
			return;
		}
		let mut seen = self.seen.borrow_mut();
		for end in 1..=keys.len() {
			seen.insert(keys[..end].iter().map(|key| (*key).to_owned()).collect());
		}
	}

	fn contains_key(&self, key: &str) -> bool {
		self.whole.get() || self.seen.borrow().contains([key.to_owned()].as_slice())
	}
}

/// Borrowed view shared by [`Document`] and [`Object`] accessors.
#[derive(Clone, Copy)]
struct Scope<'a> {
	node: &'a Value,
	errors: &'a ErrorSlot,
	base: &'a Path,
	checked: &'a CheckedPaths,
}

impl<'a> Scope<'a> {
	fn field<K: FieldKind<'a>>(self, keys: &[&str]) -> Field<'a, K> {
		let raw = lookup(self.node, keys).filter(|value| !value.is_null());
		self.checked.mark(keys);
		Field::new(Site::new(self.errors, self.base.join_keys(keys)), raw)
	}

	fn disallow_extra_fields(self) {
		let Value::Object(map) = self.node else {
			return;
		};
		if self.errors.is_set() {
			return;
		}

		tracing::trace!(path = %self.base, keys = map.len(), "checking for extra fields");
		if let Some(key) = map.keys().find(|key| !self.checked.contains_key(key)) {
			self.errors.record(ValidationError::ExtraField { path: self.base.key(key) });
		}
	}
}

/// Walk mapping lookups; any missing key or non-mapping step is absent.
fn lookup<'v>(node: &'v Value, keys: &[&str]) -> Option<&'v Value> {
	keys.iter().try_fold(node, |current, key| match current {
		Value::Object(map) => map.get(*key),
		_ => None,
	})
}

/// Root coordinator for one decoded document.
///
/// Owns the decoded tree, the write-once first-error slot and the registry of
/// fields read at the root level. Fields are declared by calling an accessor
/// (`string`, `int`, ...) and materialized with [`Field::done`]; the first
/// failure in call order is kept and every later one is dropped.
///
/// ```
/// use jsonvet::vet::{Document, ValidationError, Path};
///
/// let doc = Document::parse(br#"{"a": "ssss"}"#);
/// let a = doc.string(&["a"]).done();
/// let b = doc.int(&["b"]).done();
///
/// assert_eq!(a, "ssss");
/// assert_eq!(b, 0);
/// assert_eq!(doc.first_error(), Some(ValidationError::Missing { path: Path::from_keys(&["b"]) }));
/// ```
#[derive(Debug)]
pub struct Document {
	root: Value,
	errors: ErrorSlot,
	base: Path,
	checked: CheckedPaths,
}

impl Document {
	/// Decode `bytes` as a single JSON value.
	///
	/// Malformed input yields a document whose first error is
	/// [`ValidationError::Parse`]; it stays usable and every field reads as absent.
	pub fn parse(bytes: &[u8]) -> Self {
		match serde_json::from_slice::<Value>(bytes) {
			Ok(root) => Self::from_value(root),
			Err(err) => {
				tracing::debug!(line = err.line(), column = err.column(), "document failed to decode");
				let doc = Self::from_value(Value::Null);
				doc.errors.record(ValidationError::from_decode(&err));
				doc
			}
		}
	}

	/// Wrap an already decoded tree.
	pub fn from_value(root: Value) -> Self {
		Self {
			root,
			errors: ErrorSlot::default(),
			base: Path::root(),
			checked: CheckedPaths::default(),
		}
	}

	fn scope(&self) -> Scope<'_> {
		Scope {
			node: &self.root,
			errors: &self.errors,
			base: &self.base,
			checked: &self.checked,
		}
	}

	/// Decoded root value (`Null` after a parse failure).
	pub fn value(&self) -> &Value {
		&self.root
	}

	/// Accessor of an arbitrary kind at `keys`.
	pub fn field<'a, K: FieldKind<'a>>(&'a self, keys: &[&str]) -> Field<'a, K> {
		self.scope().field(keys)
	}

	/// String field.
	pub fn string(&self, keys: &[&str]) -> Field<'_, Str> {
		self.field(keys)
	}

	/// Whole-number field.
	pub fn int(&self, keys: &[&str]) -> Field<'_, Int> {
		self.field(keys)
	}

	/// Floating-point field.
	pub fn float(&self, keys: &[&str]) -> Field<'_, Float> {
		self.field(keys)
	}

	/// Boolean field.
	pub fn bool(&self, keys: &[&str]) -> Field<'_, Bool> {
		self.field(keys)
	}

	/// Number field kept in its exact decimal form.
	pub fn number(&self, keys: &[&str]) -> Field<'_, Num> {
		self.field(keys)
	}

	/// Sequence field resolving to one sub-document per element.
	pub fn array(&self, keys: &[&str]) -> Field<'_, Array> {
		self.field(keys)
	}

	/// Nested mapping resolving to a sub-document.
	pub fn object(&self, keys: &[&str]) -> Field<'_, Mapping> {
		self.field(keys)
	}

	/// Record [`ValidationError::ExtraField`] for the first root key no accessor read.
	///
	/// Must run after every expected field was accessed. Keys are visited in
	/// document order; nested levels are not inspected.
	pub fn disallow_extra_fields(&self) {
		self.scope().disallow_extra_fields();
	}

	/// Record an application-level failure, subject to first-error-wins.
	pub fn report(&self, err: ValidationError) {
		self.errors.record(err);
	}

	/// The first recorded failure, if any.
	pub fn first_error(&self) -> Option<ValidationError> {
		self.errors.get()
	}

	/// `Err` with the first recorded failure.
	pub fn result(&self) -> Result<()> {
		self.first_error().map_or(Ok(()), Err)
	}
}

/// Window onto a nested value, sharing its document's error slot.
///
/// Produced by [`Array`] and [`Mapping`] fields. Accessor paths are resolved
/// relative to the window but reported absolute. Extra-field checks only see
/// keys read through this window.
#[derive(Debug)]
pub struct Object<'a> {
	node: Cow<'a, Value>,
	errors: &'a ErrorSlot,
	base: Path,
	checked: CheckedPaths,
}

impl<'a> Object<'a> {
	pub(crate) fn new(node: Cow<'a, Value>, errors: &'a ErrorSlot, base: Path) -> Self {
		Self {
			node,
			errors,
			base,
			checked: CheckedPaths::default(),
		}
	}

	fn scope(&self) -> Scope<'_> {
		Scope {
			node: self.node.as_ref(),
			errors: self.errors,
			base: &self.base,
			checked: &self.checked,
		}
	}

	/// Absolute path of this window.
	pub fn path(&self) -> &Path {
		&self.base
	}

	/// Value under this window.
	pub fn value(&self) -> &Value {
		self.node.as_ref()
	}

	/// Accessor of an arbitrary kind at `keys`; an empty slice reads the window itself.
	pub fn field<'s, K: FieldKind<'s>>(&'s self, keys: &[&str]) -> Field<'s, K> {
		self.scope().field(keys)
	}

	/// String field.
	pub fn string(&self, keys: &[&str]) -> Field<'_, Str> {
		self.field(keys)
	}

	/// Whole-number field.
	pub fn int(&self, keys: &[&str]) -> Field<'_, Int> {
		self.field(keys)
	}

	/// Floating-point field.
	pub fn float(&self, keys: &[&str]) -> Field<'_, Float> {
		self.field(keys)
	}

	/// Boolean field.
	pub fn bool(&self, keys: &[&str]) -> Field<'_, Bool> {
		self.field(keys)
	}

	/// Exact-decimal number field.
	pub fn number(&self, keys: &[&str]) -> Field<'_, Num> {
		self.field(keys)
	}

	/// Sequence field.
	pub fn array(&self, keys: &[&str]) -> Field<'_, Array> {
		self.field(keys)
	}

	/// Nested mapping field.
	pub fn object(&self, keys: &[&str]) -> Field<'_, Mapping> {
		self.field(keys)
	}

	/// Extra-field check for this window's own keys.
	pub fn disallow_extra_fields(&self) {
		self.scope().disallow_extra_fields();
	}

	/// Record a failure in the owning document.
	pub fn report(&self, err: ValidationError) {
		self.errors.record(err);
	}

	/// The owning document's first failure.
	pub fn first_error(&self) -> Option<ValidationError> {
		self.errors.get()
	}
}

#[cfg(test)]
mod tests;
