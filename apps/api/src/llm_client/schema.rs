//! Output-shape contracts for structured generation.
//!
//! An `OutputShape` is the field-level description of what the model must return.
//! It renders to the provider's response schema, to a plain-text listing for the
//! prompt, and to a closed JSON Schema that returned values are validated against.

use jsonschema::JSONSchema;
use serde_json::{json, Map, Value};

/// The kind of a single field in an output shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    /// A number constrained to the closed interval `[min, max]`.
    Number { min: f64, max: f64 },
    Integer,
    TextList,
    Object(Vec<FieldSpec>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn text(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::Text)
    }

    pub fn score(name: &'static str, description: &'static str) -> Self {
        Self::new(
            name,
            description,
            FieldKind::Number {
                min: 0.0,
                max: 100.0,
            },
        )
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::Integer)
    }

    pub fn text_list(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::TextList)
    }

    pub fn object(name: &'static str, description: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self::new(name, description, FieldKind::Object(fields))
    }

    /// Marks the field as not required in the returned object.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn new(name: &'static str, description: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
        }
    }
}

/// A named, top-level object contract.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputShape {
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl OutputShape {
    pub fn new(name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { name, fields }
    }

    /// Finds a top-level field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Renders the shape in the OpenAPI-subset schema dialect used by the
    /// Generative Language API (`responseSchema`).
    pub fn to_response_schema(&self) -> Value {
        object_schema(&self.fields, None)
    }

    /// Renders a plain-text listing of every field, one per line, nested fields indented.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        describe_fields(&self.fields, 0, &mut out);
        out
    }

    /// Renders the shape as a standard JSON Schema document with closed objects.
    /// Used to validate what the model returned.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = closed_object_schema(&self.fields);
        schema["$schema"] = Value::from("http://json-schema.org/draft-07/schema#");
        schema["title"] = Value::from(self.name);
        schema
    }

    /// Removes every key the shape does not name, at every depth.
    /// A `null` counts as absent.
    pub fn retain_known(&self, value: &mut Value) {
        retain_fields(&self.fields, value);
    }

    /// Checks `value` against the shape and returns every violation found.
    pub fn check(&self, value: &Value) -> Result<(), Vec<String>> {
        let schema = self.to_json_schema();
        let compiled = JSONSchema::compile(&schema)
            .map_err(|e| vec![format!("{} has an invalid schema: {e}", self.name)])?;

        let violations: Vec<String> = match compiled.validate(value) {
            Ok(()) => return Ok(()),
            Err(errors) => errors
                .map(|e| {
                    let pointer = e.instance_path.to_string();
                    format!("{}: {e}", display_path(&pointer))
                })
                .collect(),
        };
        Err(violations)
    }
}

fn field_schema(field: &FieldSpec) -> Value {
    match &field.kind {
        FieldKind::Text => json!({ "type": "STRING", "description": field.description }),
        FieldKind::Number { min, max } => json!({
            "type": "NUMBER",
            "description": field.description,
            "minimum": min,
            "maximum": max,
        }),
        FieldKind::Integer => json!({ "type": "INTEGER", "description": field.description }),
        FieldKind::TextList => json!({
            "type": "ARRAY",
            "description": field.description,
            "items": { "type": "STRING" },
        }),
        FieldKind::Object(fields) => object_schema(fields, Some(field.description)),
    }
}

fn object_schema(fields: &[FieldSpec], description: Option<&str>) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.name.to_string(), field_schema(f)))
        .collect();
    let required: Vec<&str> = fields.iter().filter(|f| f.required).map(|f| f.name).collect();
    let ordering: Vec<&str> = fields.iter().map(|f| f.name).collect();

    let mut schema = json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
        "propertyOrdering": ordering,
    });
    if let Some(description) = description {
        schema["description"] = Value::from(description);
    }
    schema
}

fn describe_fields(fields: &[FieldSpec], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for field in fields {
        let kind = match &field.kind {
            FieldKind::Text => "string".to_string(),
            FieldKind::Number { min, max } => format!("number {min}-{max}"),
            FieldKind::Integer => "integer".to_string(),
            FieldKind::TextList => "array of strings".to_string(),
            FieldKind::Object(_) => "object".to_string(),
        };
        out.push_str(&format!(
            "{indent}- {} ({kind}): {}\n",
            field.name, field.description
        ));
        if let FieldKind::Object(children) = &field.kind {
            describe_fields(children, depth + 1, out);
        }
    }
}

fn closed_field_schema(field: &FieldSpec) -> Value {
    match &field.kind {
        FieldKind::Text => json!({ "type": "string" }),
        FieldKind::Number { min, max } => json!({
            "type": "number",
            "minimum": min,
            "maximum": max,
        }),
        FieldKind::Integer => json!({ "type": "integer" }),
        FieldKind::TextList => json!({ "type": "array", "items": { "type": "string" } }),
        FieldKind::Object(fields) => closed_object_schema(fields),
    }
}

fn closed_object_schema(fields: &[FieldSpec]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.name.to_string(), closed_field_schema(f)))
        .collect();
    let required: Vec<&str> = fields.iter().filter(|f| f.required).map(|f| f.name).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn retain_fields(fields: &[FieldSpec], value: &mut Value) {
    let Some(map) = value.as_object_mut() else {
        return;
    };

    map.retain(|key, v| !v.is_null() && fields.iter().any(|f| f.name == key.as_str()));
    for field in fields {
        if let (FieldKind::Object(children), Some(child)) = (&field.kind, map.get_mut(field.name)) {
            retain_fields(children, child);
        }
    }
}

/// Turns a JSON pointer (`/analysis/atsScore`) into a dotted path (`analysis.atsScore`).
fn display_path(pointer: &str) -> String {
    let path = pointer.trim_start_matches('/').replace('/', ".");
    if path.is_empty() {
        "response".to_string()
    } else {
        path
    }
}
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shape() -> OutputShape {
        OutputShape::new(
            "sample",
            vec![
                FieldSpec::text("title", "A title"),
                FieldSpec::object(
                    "stats",
                    "Nested stats",
                    vec![
                        FieldSpec::score("score", "A bounded score"),
                        FieldSpec::text_list("tags", "Some tags"),
                    ],
                ),
                FieldSpec::integer("count", "A count").optional(),
            ],
        )
    }

    #[test]
    fn test_response_schema_carries_bounds_and_required() {
        let schema = sample_shape().to_response_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(schema["required"], json!(["title", "stats"]));
        let score = &schema["properties"]["stats"]["properties"]["score"];
        assert_eq!(score["type"], "NUMBER");
        assert_eq!(score["minimum"], 0.0);
        assert_eq!(score["maximum"], 100.0);
        assert_eq!(
            schema["properties"]["stats"]["properties"]["tags"]["items"]["type"],
            "STRING"
        );
        assert_eq!(schema["properties"]["stats"]["description"], "Nested stats");
    }

    #[test]
    fn test_describe_lists_nested_fields_indented() {
        let text = sample_shape().describe();
        assert!(text.contains("- title (string): A title"));
        assert!(text.contains("  - score (number 0-100): A bounded score"));
        assert!(text.contains("  - tags (array of strings): Some tags"));
    }

    #[test]
    fn test_check_accepts_boundary_scores() {
        let shape = sample_shape();
        for score in [0.0, 100.0] {
            let value = json!({ "title": "t", "stats": { "score": score, "tags": [] } });
            assert!(shape.check(&value).is_ok(), "score {score} must be accepted");
        }
    }

    #[test]
    fn test_check_rejects_out_of_range_scores() {
        let shape = sample_shape();
        for score in [-0.5, 100.01, 250.0] {
            let value = json!({ "title": "t", "stats": { "score": score, "tags": [] } });
            let violations = shape.check(&value).unwrap_err();
            assert_eq!(violations.len(), 1, "{violations:?}");
            assert!(violations[0].starts_with("stats.score: "), "{violations:?}");
        }
    }

    #[test]
    fn test_check_reports_missing_and_mistyped_fields() {
        let value = json!({ "stats": { "score": "high", "tags": [1, 2] } });
        let violations = sample_shape().check(&value).unwrap_err();
        assert!(violations.iter().any(|v| v.starts_with("response: ") && v.contains("title")));
        assert!(violations.iter().any(|v| v.starts_with("stats.score: ")));
        assert!(violations.iter().any(|v| v.starts_with("stats.tags.0: ")));
    }

    #[test]
    fn test_check_skips_missing_optional_field() {
        let value = json!({ "title": "t", "stats": { "score": 50, "tags": ["a"] } });
        assert!(sample_shape().check(&value).is_ok());
    }

    #[test]
    fn test_check_rejects_non_object_root() {
        let violations = sample_shape().check(&json!("nope")).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].starts_with("response: "));
    }

    #[test]
    fn test_check_rejects_unknown_nested_key() {
        let value = json!({ "title": "t", "stats": { "score": 1, "tags": [], "bonus": 500 } });
        let violations = sample_shape().check(&value).unwrap_err();
        assert!(violations[0].contains("bonus"), "{violations:?}");
    }

    #[test]
    fn test_retain_known_prunes_every_depth() {
        let mut value = json!({
            "title": "t",
            "extra": true,
            "count": null,
            "stats": { "score": 1, "tags": [], "bonus": 500 }
        });
        sample_shape().retain_known(&mut value);

        assert_eq!(value, json!({ "title": "t", "stats": { "score": 1, "tags": [] } }));
        assert!(sample_shape().check(&value).is_ok());
    }

    #[test]
    fn test_json_schema_is_closed_and_bounded() {
        let schema = sample_shape().to_json_schema();
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["properties"]["stats"]["additionalProperties"], false);
        assert_eq!(schema["properties"]["stats"]["properties"]["score"]["maximum"], 100.0);
        assert_eq!(schema["required"], json!(["title", "stats"]));
    }
}
