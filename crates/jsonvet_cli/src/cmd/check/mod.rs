use std::path::PathBuf;

use jsonvet::vet::{Array, Bool, Document, Field, FieldKind, Float, Int, Mapping, Num, Object, Str, ValidationError};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cmd::decl::{DefaultValue, FieldDecl, KindName};
use crate::cmd::util::emit_json;
use crate::error::{CliError, Result};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	/// Field to read, as `path[:kind][=default]`; repeatable.
	#[arg(long = "field", short = 'f')]
	pub fields: Vec<String>,
	/// Reject keys no declaration reads, at the root and in `[]` elements.
	#[arg(long)]
	pub strict: bool,
	#[arg(long)]
	pub json: bool,
}

/// Outcome of a completed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
	Valid,
	Invalid,
}

/// Read the declared fields from a document and print the verdict.
pub fn run(args: Args) -> Result<Verdict> {
	let Args { file, fields, strict, json } = args;

	let decls = fields.iter().map(|raw| FieldDecl::parse(raw)).collect::<Result<Vec<_>>>()?;
	let bytes = std::fs::read(&file).map_err(|source| CliError::Read { path: file.clone(), source })?;
	tracing::info!(path = %file.display(), bytes = bytes.len(), fields = decls.len(), strict, "checking document");

	let doc = Document::parse(&bytes);
	let values = evaluate(&doc, &decls, strict);
	let report = Report::new(doc.first_error(), values);

	if json {
		emit_json(&report)?;
	} else if let Some(error) = &report.error {
		println!("invalid: {}", error.message);
	} else {
		println!("ok");
		for (decl, value) in &report.values {
			println!("{decl}\t{value}");
		}
	}

	Ok(if report.valid { Verdict::Valid } else { Verdict::Invalid })
}

/// One evaluation step: a plain field, or every element of one array.
#[derive(Debug)]
enum Step<'d> {
	Field(&'d FieldDecl),
	Each { head: &'d [String], decls: Vec<&'d FieldDecl> },
}

/// Group element declarations per array, keeping the position of the first.
fn plan(decls: &[FieldDecl]) -> Vec<Step<'_>> {
	let mut steps: Vec<Step<'_>> = Vec::new();
	for decl in decls {
		if decl.each.is_none() {
			steps.push(Step::Field(decl));
			continue;
		}
		let existing = steps.iter_mut().find_map(|step| match step {
			Step::Each { head, decls: group } if *head == decl.head.as_slice() => Some(group),
			_ => None,
		});
		match existing {
			Some(group) => group.push(decl),
			None => steps.push(Step::Each {
				head: &decl.head,
				decls: vec![decl],
			}),
		}
	}
	steps
}

/// Run every declaration against the document, returning values keyed by declaration text.
fn evaluate(doc: &Document, decls: &[FieldDecl], strict: bool) -> Map<String, Value> {
	let mut values = Map::new();

	for step in plan(decls) {
		match step {
			Step::Field(decl) => {
				let value = read(doc, &key_refs(&decl.head), decl);
				values.insert(decl.raw.clone(), value);
			}
			Step::Each { head, decls } => {
				let elements = doc.array(&key_refs(head)).done();
				tracing::debug!(array = %head.join("."), elements = elements.len(), fields = decls.len(), "reading elements");
				let mut columns = vec![Vec::with_capacity(elements.len()); decls.len()];
				for element in &elements {
					for (column, decl) in columns.iter_mut().zip(&decls) {
						let keys = decl.each.as_deref().unwrap_or_default();
						column.push(read(element, &key_refs(keys), decl));
					}
					if strict {
						element.disallow_extra_fields();
					}
				}
				for (column, decl) in columns.into_iter().zip(decls) {
					values.insert(decl.raw.clone(), Value::Array(column));
				}
			}
		}
	}

	if strict {
		doc.disallow_extra_fields();
	}
	values
}

fn key_refs(keys: &[String]) -> Vec<&str> {
	keys.iter().map(String::as_str).collect()
}

/// Accessor entry point shared by the root and element windows.
trait Scope {
	fn field<'s, K: FieldKind<'s>>(&'s self, keys: &[&str]) -> Field<'s, K>;
}

impl Scope for Document {
	fn field<'s, K: FieldKind<'s>>(&'s self, keys: &[&str]) -> Field<'s, K> {
		Document::field(self, keys)
	}
}

impl Scope for Object<'_> {
	fn field<'s, K: FieldKind<'s>>(&'s self, keys: &[&str]) -> Field<'s, K> {
		Object::field(self, keys)
	}
}

fn resolve<'s, K: FieldKind<'s>>(field: Field<'s, K>, default: Option<K::Default>) -> K::Output {
	match default {
		Some(value) => field.default(value).done(),
		None => field.done(),
	}
}

/// Read one field by its declared kind and render the outcome as JSON.
fn read<S: Scope>(scope: &S, keys: &[&str], decl: &FieldDecl) -> Value {
	let default = decl.default.clone();
	match decl.kind {
		KindName::String => {
			let default = match default {
				Some(DefaultValue::Str(value)) => Some(value),
				_ => None,
			};
			Value::String(resolve(scope.field::<Str>(keys), default))
		}
		KindName::Int => {
			let default = match default {
				Some(DefaultValue::Int(value)) => Some(value),
				_ => None,
			};
			Value::from(resolve(scope.field::<Int>(keys), default))
		}
		KindName::Float => {
			let default = match default {
				Some(DefaultValue::Float(value)) => Some(value),
				_ => None,
			};
			Value::from(resolve(scope.field::<Float>(keys), default))
		}
		KindName::Bool => {
			let default = match default {
				Some(DefaultValue::Bool(value)) => Some(value),
				_ => None,
			};
			Value::Bool(resolve(scope.field::<Bool>(keys), default))
		}
		KindName::Number => {
			let default = match default {
				Some(DefaultValue::Number(value)) => Some(value),
				_ => None,
			};
			Value::Number(resolve(scope.field::<Num>(keys), default))
		}
		KindName::Array => {
			let default = match default {
				Some(DefaultValue::Array(value)) => Some(value),
				_ => None,
			};
			let items = resolve(scope.field::<Array>(keys), default);
			Value::Array(items.iter().map(|item| item.value().clone()).collect())
		}
		KindName::Object => {
			let default = match default {
				Some(DefaultValue::Object(value)) => Some(value),
				_ => None,
			};
			resolve(scope.field::<Mapping>(keys), default).value().clone()
		}
	}
}

#[derive(Serialize)]
struct Report {
	valid: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<ErrorJson>,
	values: Map<String, Value>,
}

#[derive(Serialize)]
struct ErrorJson {
	kind: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	path: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	expected: Option<&'static str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	rule: Option<String>,
	message: String,
}

impl Report {
	fn new(error: Option<ValidationError>, values: Map<String, Value>) -> Self {
		Self {
			valid: error.is_none(),
			error: error.as_ref().map(ErrorJson::new),
			values,
		}
	}
}

impl ErrorJson {
	fn new(err: &ValidationError) -> Self {
		let (expected, rule) = match err {
			ValidationError::WrongType { expected, .. } => (Some(*expected), None),
			ValidationError::Custom { rule, .. } => (None, Some(rule.clone())),
			_ => (None, None),
		};
		Self {
			kind: err.kind(),
			path: err.path().map(ToString::to_string),
			expected,
			rule,
			message: describe(err),
		}
	}
}

/// Per-kind message shown to whoever supplied the document.
fn describe(err: &ValidationError) -> String {
	match err {
		ValidationError::Parse { message, .. } => format!("invalid json: {message}"),
		ValidationError::Missing { path } => format!("{path} is missing."),
		ValidationError::WrongType { path, expected } => format!("{path} should be of type {expected}."),
		ValidationError::ExtraField { path } => format!("Field {path} is not allowed."),
		ValidationError::Custom { .. } => err.to_string(),
	}
}
