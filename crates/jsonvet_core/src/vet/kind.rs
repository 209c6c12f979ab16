use std::borrow::Cow;

use serde_json::{Map, Number, Value};

use crate::vet::{FieldKind, Object, Site};

/// String kind; resolves to `String`.
#[derive(Debug, Clone, Copy)]
pub struct Str;

/// Whole-number kind; resolves to `i64`.
#[derive(Debug, Clone, Copy)]
pub struct Int;

/// Floating-point kind; resolves to `f64`.
#[derive(Debug, Clone, Copy)]
pub struct Float;

/// Boolean kind.
#[derive(Debug, Clone, Copy)]
pub struct Bool;

/// Number kind keeping the decoded decimal text.
#[derive(Debug, Clone, Copy)]
pub struct Num;

/// Sequence kind; resolves to one [`Object`] per element.
#[derive(Debug, Clone, Copy)]
pub struct Array;

/// Nested mapping kind; resolves to one [`Object`].
#[derive(Debug, Clone, Copy)]
pub struct Mapping;

impl<'a> FieldKind<'a> for Str {
	type Default = String;
	type Narrowed = &'a str;
	type View = str;
	type Output = String;

	const EXPECTED: &'static str = "string";

	fn narrow(raw: &'a Value) -> Option<&'a str> {
		match raw {
			Value::String(text) => Some(text),
			_ => None,
		}
	}

	fn view<'v>(narrowed: &'v &'a str) -> &'v str {
		narrowed
	}

	fn finish(narrowed: &'a str, _site: &Site<'a>) -> String {
		narrowed.to_owned()
	}

	fn fallback(default: &String, _site: &Site<'a>) -> String {
		default.clone()
	}

	fn zero(_site: &Site<'a>) -> String {
		String::new()
	}
}

impl<'a> FieldKind<'a> for Int {
	type Default = i64;
	type Narrowed = i64;
	type View = i64;
	type Output = i64;

	const EXPECTED: &'static str = "int";

	fn narrow(raw: &'a Value) -> Option<i64> {
		match raw {
			Value::Number(number) => whole_number(number),
			_ => None,
		}
	}

	fn view(narrowed: &i64) -> &i64 {
		narrowed
	}

	fn finish(narrowed: i64, _site: &Site<'a>) -> i64 {
		narrowed
	}

	fn fallback(default: &i64, _site: &Site<'a>) -> i64 {
		*default
	}

	fn zero(_site: &Site<'a>) -> i64 {
		0
	}
}

/// Integer value of `number` when its decimal text is exactly whole and fits
/// `i64` (`2`, `2.0`, `1e3`, `150e-1`).
fn whole_number(number: &Number) -> Option<i64> {
	if let Some(value) = number.as_i64() {
		return Some(value);
	}

	let text = number.to_string();
	let (negative, unsigned) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text.as_str()),
	};
	let (mantissa, exponent) = match unsigned.split_once(|ch: char| ch == 'e' || ch == 'E') {
		Some((mantissa, exponent)) => (mantissa, Some(exponent)),
		None => (unsigned, None),
	};
	let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));
	let digits: Vec<u8> = int_digits.bytes().chain(frac_digits.bytes()).collect();

	let Some(first) = digits.iter().position(|digit| *digit != b'0') else {
		return Some(0);
	};
	let exponent: i64 = match exponent {
		Some(exponent) => exponent.parse().ok()?,
		None => 0,
	};
	let point = i64::try_from(int_digits.len()).ok()?.checked_add(exponent)?;
	// Significant digits left of the scaled decimal point.
	let magnitude = point.checked_sub(i64::try_from(first).ok()?)?;
	if !(1..=19).contains(&magnitude) {
		return None;
	}

	let point = usize::try_from(point).ok()?;
	if digits.iter().skip(point).any(|digit| *digit != b'0') {
		return None;
	}

	let mut whole = String::new();
	if negative {
		whole.push('-');
	}
	whole.extend((first..point).map(|index| char::from(digits.get(index).copied().unwrap_or(b'0'))));
	whole.parse().ok()
}

impl<'a> FieldKind<'a> for Float {
	type Default = f64;
	type Narrowed = f64;
	type View = f64;
	type Output = f64;

	const EXPECTED: &'static str = "float";

	fn narrow(raw: &'a Value) -> Option<f64> {
		match raw {
			Value::Number(number) => number.as_f64(),
			_ => None,
		}
	}

	fn view(narrowed: &f64) -> &f64 {
		narrowed
	}

	fn finish(narrowed: f64, _site: &Site<'a>) -> f64 {
		narrowed
	}

	fn fallback(default: &f64, _site: &Site<'a>) -> f64 {
		*default
	}

	fn zero(_site: &Site<'a>) -> f64 {
		0.0
	}
}

impl<'a> FieldKind<'a> for Bool {
	type Default = bool;
	type Narrowed = bool;
	type View = bool;
	type Output = bool;

	const EXPECTED: &'static str = "boolean";

	fn narrow(raw: &'a Value) -> Option<bool> {
		match raw {
			Value::Bool(flag) => Some(*flag),
			_ => None,
		}
	}

	fn view(narrowed: &bool) -> &bool {
		narrowed
	}

	fn finish(narrowed: bool, _site: &Site<'a>) -> bool {
		narrowed
	}

	fn fallback(default: &bool, _site: &Site<'a>) -> bool {
		*default
	}

	fn zero(_site: &Site<'a>) -> bool {
		false
	}
}

impl<'a> FieldKind<'a> for Num {
	type Default = Number;
	type Narrowed = &'a Number;
	type View = Number;
	type Output = Number;

	const EXPECTED: &'static str = "number";

	fn narrow(raw: &'a Value) -> Option<&'a Number> {
		match raw {
			Value::Number(number) => Some(number),
			_ => None,
		}
	}

	fn view<'v>(narrowed: &'v &'a Number) -> &'v Number {
		narrowed
	}

	fn finish(narrowed: &'a Number, _site: &Site<'a>) -> Number {
		narrowed.clone()
	}

	fn fallback(default: &Number, _site: &Site<'a>) -> Number {
		default.clone()
	}

	fn zero(_site: &Site<'a>) -> Number {
		Number::from(0_u8)
	}
}

impl<'a> FieldKind<'a> for Array {
	type Default = Vec<Value>;
	type Narrowed = &'a [Value];
	type View = [Value];
	type Output = Vec<Object<'a>>;

	const EXPECTED: &'static str = "array";

	fn narrow(raw: &'a Value) -> Option<&'a [Value]> {
		match raw {
			Value::Array(items) => Some(items.as_slice()),
			_ => None,
		}
	}

	fn view<'v>(narrowed: &'v &'a [Value]) -> &'v [Value] {
		narrowed
	}

	fn finish(narrowed: &'a [Value], site: &Site<'a>) -> Vec<Object<'a>> {
		narrowed
			.iter()
			.enumerate()
			.map(|(index, item)| site.object(Cow::Borrowed(item), site.path().index(index)))
			.collect()
	}

	fn fallback(default: &Vec<Value>, site: &Site<'a>) -> Vec<Object<'a>> {
		default
			.iter()
			.enumerate()
			.map(|(index, item)| site.object(Cow::Owned(item.clone()), site.path().index(index)))
			.collect()
	}

	fn zero(_site: &Site<'a>) -> Vec<Object<'a>> {
		Vec::new()
	}
}

impl<'a> FieldKind<'a> for Mapping {
	type Default = Map<String, Value>;
	type Narrowed = &'a Value;
	type View = Value;
	type Output = Object<'a>;

	const EXPECTED: &'static str = "object";

	fn narrow(raw: &'a Value) -> Option<&'a Value> {
		raw.is_object().then_some(raw)
	}

	fn view<'v>(narrowed: &'v &'a Value) -> &'v Value {
		narrowed
	}

	fn finish(narrowed: &'a Value, site: &Site<'a>) -> Object<'a> {
		site.object(Cow::Borrowed(narrowed), site.path().clone())
	}

	fn fallback(default: &Map<String, Value>, site: &Site<'a>) -> Object<'a> {
		site.object(Cow::Owned(Value::Object(default.clone())), site.path().clone())
	}

	fn zero(site: &Site<'a>) -> Object<'a> {
		site.object(Cow::Owned(Value::Object(Map::new())), site.path().clone())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::Number;

	use super::whole_number;

	fn number(text: &str) -> Number {
		match serde_json::from_str(text) {
			Ok(serde_json::Value::Number(number)) => number,
			other => panic!("{text} should decode as a number, got {other:?}"),
		}
	}

	#[test]
	fn whole_number_accepts_integer_literals() {
		assert_eq!(whole_number(&number("123")), Some(123));
		assert_eq!(whole_number(&number("-9223372036854775808")), Some(i64::MIN));
	}

	#[test]
	fn whole_number_accepts_whole_decimals() {
		assert_eq!(whole_number(&number("2.0")), Some(2));
		assert_eq!(whole_number(&number("1e3")), Some(1000));
		assert_eq!(whole_number(&number("150e-1")), Some(15));
		assert_eq!(whole_number(&number("-4.20E+1")), Some(-42));
		assert_eq!(whole_number(&number("9007199254740993.000")), Some(9_007_199_254_740_993));
	}

	#[test]
	fn whole_number_rejects_fractions_hidden_by_f64_rounding() {
		assert_eq!(whole_number(&number("1.0000000000000001")), None);
		assert_eq!(whole_number(&number("4503599627370497.5")), None);
		assert_eq!(whole_number(&number("1e-400")), None);
	}

	#[test]
	fn whole_number_rejects_fractions_and_overflow() {
		assert_eq!(whole_number(&number("2.5")), None);
		assert_eq!(whole_number(&number("18446744073709551616")), None);
		assert_eq!(whole_number(&number("1e300")), None);
		assert_eq!(whole_number(&number("9223372036854775808.0")), None);
	}

	#[test]
	fn decoded_numbers_keep_their_text() {
		assert_eq!(number("1.50").to_string(), "1.50");
		assert_eq!(number("12345678901234567890123").to_string(), "12345678901234567890123");
	}
}
