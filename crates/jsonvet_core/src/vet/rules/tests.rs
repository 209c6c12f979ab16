use serde_json::json;

use crate::vet::{Document, Path, ValidationError, rules};

#[test]
fn exact_len_counts_characters() {
	let check = rules::exact_len(4);
	let path = Path::from_keys(&["code"]);
	assert!(check(&path, "ünïc").is_ok());
	assert_eq!(
		check(&path, "12345"),
		Err(ValidationError::custom(&path, "exact_len", "length must be 4, got 5"))
	);
}

#[test]
fn len_between_is_inclusive() {
	let check = rules::len_between(2, 3);
	let path = Path::root();
	assert!(check(&path, "ab").is_ok());
	assert!(check(&path, "abc").is_ok());
	assert!(check(&path, "a").is_err());
	assert!(check(&path, "abcd").is_err());
}

#[test]
fn one_of_lists_choices() {
	let check = rules::one_of(["red", "green"]);
	let path = Path::from_keys(&["color"]);
	assert!(check(&path, "red").is_ok());
	let err = check(&path, "blue").expect_err("blue is not allowed");
	assert_eq!(err.to_string(), "property `color` failed one_of: must be one of red, green");
}

#[test]
fn ranges_reject_out_of_bounds_values() {
	let path = Path::from_keys(&["n"]);
	assert!(rules::int_range(1, 10)(&path, &10).is_ok());
	assert!(rules::int_range(1, 10)(&path, &0).is_err());
	assert!(rules::float_range(0.0, 1.0)(&path, &0.5).is_ok());
	assert!(rules::float_range(0.0, 1.0)(&path, &1.5).is_err());
}

#[test]
fn rules_plug_into_field_pipes() {
	let doc = Document::from_value(json!({
		"name": "",
		"tags": ["a", "b", "c"],
	}));

	let tags = doc.array(&["tags"]).pipe(rules::items_between(1, 2)).done();
	let name = doc.string(&["name"]).pipe(rules::non_empty()).done();

	assert!(tags.is_empty());
	assert_eq!(name, "");
	assert!(matches!(
		doc.first_error(),
		Some(ValidationError::Custom { ref rule, ref path, .. }) if rule == "items_between" && path == &Path::from_keys(&["tags"])
	));
}

#[test]
fn first_failing_rule_stops_the_chain() {
	let doc = Document::from_value(json!({ "code": "toolong" }));

	let code = doc.string(&["code"]).pipe(rules::exact_len(4)).pipe(rules::non_empty()).done();

	assert_eq!(code, "");
	assert!(matches!(doc.first_error(), Some(ValidationError::Custom { ref rule, .. }) if rule == "exact_len"));
}
