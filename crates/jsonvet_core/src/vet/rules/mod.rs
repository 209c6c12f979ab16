//! Each constructor returns a closure for [`Field::pipe`](crate::vet::Field::pipe)
//! that reports [`ValidationError::Custom`] under a stable rule name.

use serde_json::Value;

use crate::vet::{Path, Result, ValidationError};

/// String must hold exactly `len` characters.
pub fn exact_len(len: usize) -> impl Fn(&Path, &str) -> Result<()> {
	move |path, value| {
		let count = value.chars().count();
		if count == len {
			Ok(())
		} else {
			Err(ValidationError::custom(path, "exact_len", format!("length must be {len}, got {count}")))
		}
	}
}

/// String length in characters must fall in `min..=max`.
pub fn len_between(min: usize, max: usize) -> impl Fn(&Path, &str) -> Result<()> {
	move |path, value| {
		let count = value.chars().count();
		if (min..=max).contains(&count) {
			Ok(())
		} else {
			Err(ValidationError::custom(path, "len_between", format!("length must be between {min} and {max}, got {count}")))
		}
	}
}

/// String must not be empty.
pub fn non_empty() -> impl Fn(&Path, &str) -> Result<()> {
	|path, value| {
		if value.is_empty() {
			Err(ValidationError::custom(path, "non_empty", "must not be empty"))
		} else {
			Ok(())
		}
	}
}

/// String must equal one of `allowed`.
pub fn one_of<I, S>(allowed: I) -> impl Fn(&Path, &str) -> Result<()>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
	move |path, value| {
		if allowed.iter().any(|item| item == value) {
			Ok(())
		} else {
			Err(ValidationError::custom(path, "one_of", format!("must be one of {}", allowed.join(", "))))
		}
	}
}

/// Integer must fall in `min..=max`.
pub fn int_range(min: i64, max: i64) -> impl Fn(&Path, &i64) -> Result<()> {
	move |path, value| {
		if (min..=max).contains(value) {
			Ok(())
		} else {
			Err(ValidationError::custom(path, "int_range", format!("must be between {min} and {max}, got {value}")))
		}
	}
}

/// Float must fall in `min..=max`.
pub fn float_range(min: f64, max: f64) -> impl Fn(&Path, &f64) -> Result<()> {
	move |path, value| {
		if (min..=max).contains(value) {
			Ok(())
		} else {
			Err(ValidationError::custom(path, "float_range", format!("must be between {min} and {max}, got {value}")))
		}
	}
}

/// Sequence must hold `min..=max` elements.
pub fn items_between(min: usize, max: usize) -> impl Fn(&Path, &[Value]) -> Result<()> {
	move |path, items| {
		if (min..=max).contains(&items.len()) {
			Ok(())
		} else {
			Err(ValidationError::custom(
				path,
				"items_between",
				format!("must hold between {min} and {max} items, got {}", items.len()),
			))
		}
	}
}

#[cfg(test)]
mod tests;
