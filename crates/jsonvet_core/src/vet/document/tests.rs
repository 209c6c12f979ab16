mod first_error_wins {

	use serde_json::json;

	use crate::vet::{Document, Path, ValidationError};

	#[test]
	fn passing_document_has_no_error() {
		let doc = Document::parse(br#"{ "a": "ssss", "b": 123 }"#);

		let a = doc.string(&["a"]).done();
		let b = doc.int(&["b"]).done();

		assert_eq!(doc.first_error(), None);
		assert!(doc.result().is_ok());
		assert_eq!(a, "ssss");
		assert_eq!(b, 123);
	}

	#[test]
	fn malformed_input_is_a_parse_error() {
		let doc = Document::parse(b"{ \"a\": 1, }");

		let a = doc.string(&["a"]).done();
		let n = doc.int(&["n"]).done();
		let flag = doc.bool(&["flag"]).done();
		let items = doc.array(&["items"]).done();

		assert_eq!(a, "");
		assert_eq!(n, 0);
		assert!(!flag);
		assert!(items.is_empty());
		assert!(matches!(doc.first_error(), Some(ValidationError::Parse { .. })));
		assert!(doc.value().is_null());
	}

	#[test]
	fn trailing_data_is_a_parse_error() {
		let doc = Document::parse(br#"{"a": 1} {"b": 2}"#);
		assert!(matches!(doc.first_error(), Some(ValidationError::Parse { .. })));
	}

	#[test]
	fn later_failures_do_not_replace_the_first() {
		let doc = Document::from_value(json!({ "a": "ssss" }));

		doc.int(&["a"]).done();
		doc.string(&["missing"]).done();
		doc.disallow_extra_fields();
		doc.report(ValidationError::custom(&Path::root(), "app", "late"));

		assert_eq!(
			doc.first_error(),
			Some(ValidationError::WrongType {
				path: Path::from_keys(&["a"]),
				expected: "int",
			})
		);
	}

	#[test]
	fn order_follows_calls_not_document_layout() {
		let doc = Document::from_value(json!({ "first": 1, "second": 2 }));

		doc.string(&["second"]).done();
		doc.string(&["first"]).done();

		assert_eq!(
			doc.first_error(),
			Some(ValidationError::WrongType {
				path: Path::from_keys(&["second"]),
				expected: "string",
			})
		);
	}

	#[test]
	fn result_surfaces_the_first_error() {
		let doc = Document::from_value(json!({}));
		doc.bool(&["enabled"]).done();

		let err = doc.result().expect_err("missing field should fail");
		assert_eq!(err.to_string(), "property `enabled` is missing");
	}
}

mod extra_fields {

	use serde_json::json;

	use crate::vet::{Document, Path, ValidationError};

	#[test]
	fn unread_key_is_reported() {
		let doc = Document::parse(br#"{ "a": "s", "b": 5 }"#);
		doc.string(&["a"]).done();
		doc.disallow_extra_fields();

		assert_eq!(doc.first_error(), Some(ValidationError::ExtraField { path: Path::from_keys(&["b"]) }));
	}

	#[test]
	fn reading_every_key_passes() {
		let doc = Document::from_value(json!({ "a": "s", "b": 1, "c": true }));
		doc.string(&["a"]).done();
		doc.int(&["b"]).done();
		doc.bool(&["c"]).done();
		doc.disallow_extra_fields();

		assert_eq!(doc.first_error(), None);
	}

	#[test]
	fn first_unread_key_in_document_order_wins() {
		let doc = Document::parse(br#"{ "z": 1, "a": 2, "m": 3 }"#);
		doc.int(&["a"]).done();
		doc.disallow_extra_fields();

		assert_eq!(doc.first_error(), Some(ValidationError::ExtraField { path: Path::from_keys(&["z"]) }));
	}

	#[test]
	fn deep_read_covers_its_prefixes() {
		let doc = Document::from_value(json!({ "a": { "b": { "c": 1 } } }));
		doc.int(&["a", "b", "c"]).done();
		doc.disallow_extra_fields();

		assert_eq!(doc.first_error(), None);
	}

	#[test]
	fn nested_levels_are_not_inspected() {
		let doc = Document::from_value(json!({ "a": { "b": 1, "extra": 2 } }));
		doc.int(&["a", "b"]).done();
		doc.disallow_extra_fields();

		assert_eq!(doc.first_error(), None);
	}

	#[test]
	fn reading_an_absent_field_still_marks_it() {
		let doc = Document::from_value(json!({ "a": null }));
		doc.int(&["a"]).default(1).done();
		doc.disallow_extra_fields();

		assert_eq!(doc.first_error(), None);
	}

	#[test]
	fn occupied_slot_skips_the_check() {
		let doc = Document::from_value(json!({ "a": 1, "b": 2 }));
		doc.string(&["a"]).done();
		doc.disallow_extra_fields();

		assert!(matches!(doc.first_error(), Some(ValidationError::WrongType { .. })));
	}

	#[test]
	fn non_mapping_root_has_no_extra_fields() {
		let doc = Document::from_value(json!([1, 2, 3]));
		doc.disallow_extra_fields();

		assert_eq!(doc.first_error(), None);
	}
}

mod sub_documents {

	use serde_json::json;

	use crate::vet::{Document, Path, ValidationError};

	#[test]
	fn element_errors_carry_indexed_paths() {
		let doc = Document::from_value(json!({
			"items": [{ "id": 1 }, { "id": "two" }],
		}));

		let ids: Vec<i64> = doc.array(&["items"]).done().iter().map(|item| item.int(&["id"]).done()).collect();

		assert_eq!(ids, vec![1, 0]);
		assert_eq!(
			doc.first_error(),
			Some(ValidationError::WrongType {
				path: Path::from_keys(&["items"]).index(1).key("id"),
				expected: "int",
			})
		);
	}

	#[test]
	fn scalar_elements_read_with_an_empty_path() {
		let doc = Document::parse(br#"{ "a": [1, 2, 3] }"#);

		let nums: Vec<i64> = doc.array(&["a"]).done().iter().map(|item| item.int(&[]).done()).collect();

		assert_eq!(nums, vec![1, 2, 3]);
		assert_eq!(doc.first_error(), None);
	}

	#[test]
	fn element_strictness_is_per_element() {
		let doc = Document::from_value(json!({
			"items": [{ "id": 1 }, { "id": 2, "note": "x" }],
		}));

		for item in doc.array(&["items"]).done() {
			item.int(&["id"]).done();
			item.disallow_extra_fields();
		}

		assert_eq!(
			doc.first_error(),
			Some(ValidationError::ExtraField {
				path: Path::from_keys(&["items"]).index(1).key("note"),
			})
		);
	}

	#[test]
	fn reading_the_whole_element_covers_its_keys() {
		let doc = Document::from_value(json!({
			"items": [{ "id": 1, "note": "x" }],
		}));

		for item in doc.array(&["items"]).done() {
			item.object(&[]).done();
			item.disallow_extra_fields();
		}
		doc.disallow_extra_fields();

		assert_eq!(doc.first_error(), None);
	}

	#[test]
	fn sub_document_shares_the_root_slot() {
		let doc = Document::from_value(json!({ "outer": { "inner": true } }));

		let outer = doc.object(&["outer"]).done();
		outer.int(&["inner"]).done();
		outer.report(ValidationError::custom(outer.path(), "late", "ignored"));

		assert_eq!(outer.first_error(), doc.first_error());
		assert_eq!(
			doc.first_error(),
			Some(ValidationError::WrongType {
				path: Path::from_keys(&["outer", "inner"]),
				expected: "int",
			})
		);
	}

	#[test]
	fn root_extra_check_ignores_reads_made_through_sub_documents() {
		let doc = Document::from_value(json!({ "outer": { "inner": 1 }, "other": 2 }));

		let outer = doc.object(&["outer"]).done();
		outer.int(&["inner"]).done();
		outer.disallow_extra_fields();
		doc.disallow_extra_fields();

		assert_eq!(doc.first_error(), Some(ValidationError::ExtraField { path: Path::from_keys(&["other"]) }));
	}
}
