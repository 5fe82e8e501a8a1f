//! Form values entered by the operator.
//!
//! Raw `name=value` strings are coerced according to the JSON type declared
//! by the matching property of the active input schema.

use super::schema::InputSchema;
use crate::error::FormError;
use serde_json::{Map, Number, Value};

/// Values of the active form. Dropped whenever the selection changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: Map<String, Value>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Coerces `raw` for `field` and stores it.
    pub fn set(&mut self, schema: &InputSchema, field: &str, raw: &str) -> Result<(), FormError> {
        let property = schema
            .property(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        let value = coerce(field, property, raw)?;
        self.values.insert(field.to_string(), value);
        Ok(())
    }

    /// Applies a list of `name=value` pairs.
    pub fn apply_pairs<'a>(
        &mut self,
        schema: &InputSchema,
        pairs: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), FormError> {
        for pair in pairs {
            let (field, raw) = parse_pair(pair)?;
            self.set(schema, field, raw)?;
        }
        Ok(())
    }

    /// Checks required fields and returns the params object to submit.
    pub fn validate(&self, schema: &InputSchema) -> Result<Value, FormError> {
        let missing: Vec<String> = schema
            .required
            .iter()
            .filter(|name| !self.values.contains_key(name.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingRequired(missing));
        }
        Ok(Value::Object(self.values.clone()))
    }
}

/// Splits `name=value` on the first `=`.
pub fn parse_pair(pair: &str) -> Result<(&str, &str), FormError> {
    match pair.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(FormError::MalformedPair(pair.to_string())),
    }
}

/// First non-`null` JSON type of a property, `string` when unspecified.
fn declared_type(property: &Value) -> &str {
    match property.get("type") {
        Some(Value::String(t)) => t.as_str(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .unwrap_or("string"),
        _ => "string",
    }
}

fn coerce(field: &str, property: &Value, raw: &str) -> Result<Value, FormError> {
    let invalid = |reason: String| FormError::InvalidValue {
        field: field.to_string(),
        reason,
    };

    let value = match declared_type(property) {
        "integer" => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| invalid(e.to_string()))?,
        "number" => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| invalid(format!("'{}' is not a number", raw)))?,
        "boolean" => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Value::Bool(true),
            "false" | "no" | "0" => Value::Bool(false),
            other => return Err(invalid(format!("'{}' is not a boolean", other))),
        },
        kind @ ("object" | "array") => {
            let parsed: Value = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
            let matches = (kind == "object" && parsed.is_object()) || (kind == "array" && parsed.is_array());
            if !matches {
                return Err(invalid(format!("expected a JSON {}", kind)));
            }
            parsed
        }
        _ => Value::String(raw.to_string()),
    };

    if let Some(allowed) = property.get("enum").and_then(Value::as_array) {
        if !allowed.contains(&value) {
            return Err(invalid(format!(
                "expected one of {}",
                allowed
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> InputSchema {
        let mut properties = Map::new();
        properties.insert("value".into(), json!({ "type": "string" }));
        properties.insert("count".into(), json!({ "type": "integer" }));
        properties.insert("ratio".into(), json!({ "type": ["number", "null"] }));
        properties.insert("strict".into(), json!({ "type": "boolean" }));
        properties.insert("extra".into(), json!({ "type": "object" }));
        properties.insert("mode".into(), json!({ "type": "string", "enum": ["DEFAULT", "URL"] }));
        InputSchema {
            title: "op".into(),
            description: None,
            schema_type: "object".into(),
            properties,
            required: vec!["value".into()],
        }
    }

    #[test]
    fn coerces_by_declared_type() {
        let schema = schema();
        let mut values = FormValues::new();
        values
            .apply_pairs(
                &schema,
                [
                    "value=a=b",
                    "count= 42",
                    "ratio=0.5",
                    "strict=yes",
                    r#"extra={"k":1}"#,
                    "mode=URL",
                ],
            )
            .unwrap();

        assert_eq!(
            values.validate(&schema).unwrap(),
            json!({
                "value": "a=b",
                "count": 42,
                "ratio": 0.5,
                "strict": true,
                "extra": { "k": 1 },
                "mode": "URL"
            })
        );
    }

    #[test]
    fn rejects_unknown_fields_and_bad_values() {
        let schema = schema();
        let mut values = FormValues::new();

        assert_eq!(
            values.set(&schema, "nope", "1"),
            Err(FormError::UnknownField("nope".into()))
        );
        assert!(matches!(
            values.set(&schema, "count", "many"),
            Err(FormError::InvalidValue { .. })
        ));
        assert!(matches!(
            values.set(&schema, "extra", "[1]"),
            Err(FormError::InvalidValue { .. })
        ));
        assert!(matches!(
            values.set(&schema, "mode", "MIME"),
            Err(FormError::InvalidValue { .. })
        ));
        assert_eq!(
            parse_pair("novalue"),
            Err(FormError::MalformedPair("novalue".into()))
        );
    }

    #[test]
    fn missing_required_fields_block_submission() {
        let schema = schema();
        let mut values = FormValues::new();
        values.set(&schema, "count", "1").unwrap();

        assert_eq!(
            values.validate(&schema),
            Err(FormError::MissingRequired(vec!["value".into()]))
        );
    }

    #[test]
    fn empty_form_submits_empty_object() {
        let schema = InputSchema {
            title: "uuid-generator".into(),
            description: None,
            schema_type: "object".into(),
            properties: Map::new(),
            required: Vec::new(),
        };
        assert_eq!(FormValues::new().validate(&schema).unwrap(), json!({}));
    }
}
