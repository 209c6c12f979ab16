use std::borrow::Cow;

use serde_json::Value;

use crate::vet::document::ErrorSlot;
use crate::vet::{Object, Path, Result, ValidationError};

/// Narrowing contract for one target kind.
///
/// A kind decides which [`Value`] variants it accepts, what validators see,
/// and what [`Field::done`] hands back, including the zero value returned
/// after a failure.
pub trait FieldKind<'a> {
	/// Fallback accepted by [`Field::default`].
	type Default: Clone;
	/// Result of a successful narrowing.
	type Narrowed;
	/// Borrowed form passed to validators.
	type View: ?Sized;
	/// Value returned by [`Field::done`].
	type Output;

	/// Kind name reported in [`ValidationError::WrongType`].
	const EXPECTED: &'static str;

	/// Match the raw value against this kind.
	fn narrow(raw: &'a Value) -> Option<Self::Narrowed>;

	/// Borrow the narrowed value for validators.
	fn view(narrowed: &Self::Narrowed) -> &Self::View;

	/// Materialize a narrowed, validated value.
	fn finish(narrowed: Self::Narrowed, site: &Site<'a>) -> Self::Output;

	/// Materialize the configured default.
	fn fallback(default: &Self::Default, site: &Site<'a>) -> Self::Output;

	/// Value returned after any failure.
	fn zero(site: &Site<'a>) -> Self::Output;
}

/// Where an accessor reports: the shared error slot and its absolute path.
#[derive(Debug, Clone)]
pub struct Site<'a> {
	errors: &'a ErrorSlot,
	path: Path,
}

impl<'a> Site<'a> {
	pub(crate) fn new(errors: &'a ErrorSlot, path: Path) -> Self {
		Self { errors, path }
	}

	/// Absolute path of the accessor.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Sub-document over `node`, reporting into the same slot.
	pub fn object(&self, node: Cow<'a, Value>, path: Path) -> Object<'a> {
		Object::new(node, self.errors, path)
	}

	fn record(&self, err: ValidationError) {
		self.errors.record(err);
	}
}

/// Lazy accessor for one field.
///
/// Nothing is checked until [`Field::done`]; configuration is chained:
///
/// ```
/// use jsonvet::vet::{Document, ValidationError};
///
/// let doc = Document::parse(br#"{"port": null}"#);
/// let port = doc
/// 	.int(&["port"])
/// 	.default(8080)
/// 	.pipe(|path, port| {
/// 		if *port > 0 { Ok(()) } else { Err(ValidationError::custom(path, "positive", "must be > 0")) }
/// 	})
/// 	.done();
///
/// assert_eq!(port, 8080);
/// assert!(doc.first_error().is_none());
/// ```
pub struct Field<'a, K: FieldKind<'a>> {
	site: Site<'a>,
	raw: Option<&'a Value>,
	default: Option<K::Default>,
	validators: Vec<Box<dyn Fn(&Path, &K::View) -> Result<()> + 'a>>,
}

impl<'a, K: FieldKind<'a>> Field<'a, K> {
	/// `raw` is `None` for absent and null fields alike.
	pub(crate) fn new(site: Site<'a>, raw: Option<&'a Value>) -> Self {
		Self {
			site,
			raw,
			default: None,
			validators: Vec::new(),
		}
	}

	/// Fallback for an absent or null field. Never masks a type mismatch.
	pub fn default(mut self, value: impl Into<K::Default>) -> Self {
		self.default = Some(value.into());
		self
	}

	/// Append a validator; validators run in order and the first `Err` wins.
	pub fn pipe<F>(mut self, validator: F) -> Self
	where
		F: Fn(&Path, &K::View) -> Result<()> + 'a,
	{
		self.validators.push(Box::new(validator));
		self
	}

	/// Absolute path of this field.
	pub fn path(&self) -> &Path {
		self.site.path()
	}

	/// Whether the field holds a non-null value.
	pub fn is_present(&self) -> bool {
		self.raw.is_some()
	}

	/// Resolve the field, recording at most one failure.
	///
	/// Safe to call repeatedly: the result is the same and the document keeps
	/// its first error.
	pub fn done(&self) -> K::Output {
		let Some(raw) = self.raw else {
			return match &self.default {
				Some(default) => K::fallback(default, &self.site),
				None => {
					self.site.record(ValidationError::Missing { path: self.site.path.clone() });
					K::zero(&self.site)
				}
			};
		};

		let Some(narrowed) = K::narrow(raw) else {
			self.site.record(ValidationError::WrongType {
				path: self.site.path.clone(),
				expected: K::EXPECTED,
			});
			return K::zero(&self.site);
		};

		for validator in &self.validators {
			if let Err(err) = validator(&self.site.path, K::view(&narrowed)) {
				self.site.record(err);
				return K::zero(&self.site);
			}
		}

		K::finish(narrowed, &self.site)
	}
}
