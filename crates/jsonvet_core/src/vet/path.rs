use std::fmt;

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
	/// Mapping key.
	Key(String),
	/// Zero-based sequence position.
	Index(usize),
}

impl fmt::Display for Segment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Key(key) => f.write_str(key),
			Self::Index(index) => write!(f, "[{index}]"),
		}
	}
}

/// Absolute location inside a decoded document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
	segments: Vec<Segment>,
}

impl Path {
	/// The document root.
	pub fn root() -> Self {
		Self::default()
	}

	/// Build a path of mapping keys only.
	pub fn from_keys(keys: &[&str]) -> Self {
		Self {
			segments: keys.iter().map(|key| Segment::Key((*key).to_owned())).collect(),
		}
	}

	/// Ordered segments, root first.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Whether this is the document root.
	pub fn is_root(&self) -> bool {
		self.segments.is_empty()
	}

	/// Child path extended with mapping keys.
	pub fn join_keys(&self, keys: &[&str]) -> Self {
		let mut out = self.clone();
		out.segments.extend(keys.iter().map(|key| Segment::Key((*key).to_owned())));
		out
	}

	/// Child path extended with one key.
	pub fn key(&self, key: &str) -> Self {
		self.join_keys(&[key])
	}

	/// Child path extended with one sequence position.
	pub fn index(&self, index: usize) -> Self {
		let mut out = self.clone();
		out.segments.push(Segment::Index(index));
		out
	}
}

impl From<Vec<Segment>> for Path {
	fn from(segments: Vec<Segment>) -> Self {
		Self { segments }
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (pos, segment) in self.segments.iter().enumerate() {
			if pos > 0 && matches!(segment, Segment::Key(_)) {
				f.write_str(".")?;
			}
			write!(f, "{segment}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::{Path, Segment};

	#[test]
	fn renders_keys_and_indices() {
		let path = Path::from_keys(&["orders"]).index(3).key("id");
		assert_eq!(path.to_string(), "orders[3].id");
		assert_eq!(
			path.segments(),
			&[Segment::Key("orders".to_owned()), Segment::Index(3), Segment::Key("id".to_owned())]
		);
	}

	#[test]
	fn leading_index_has_no_separator() {
		let path = Path::root().index(0).key("a");
		assert_eq!(path.to_string(), "[0].a");
	}

	#[test]
	fn root_renders_empty() {
		assert!(Path::root().is_root());
		assert_eq!(Path::root().to_string(), "");
	}

	#[test]
	fn join_keeps_parent_prefix() {
		let parent = Path::from_keys(&["a"]).index(1);
		let child = parent.join_keys(&["b", "c"]);
		assert_eq!(child.to_string(), "a[1].b.c");
		assert_eq!(parent.to_string(), "a[1]");
	}
}
