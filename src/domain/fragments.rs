//! Helpers for the multi-line text fields nbformat stores either as a single
//! string or as a sequence of line fragments.

use serde_json::Value;

/// Concatenate a text field into one string, without separators.
///
/// Returns `None` when the value is neither a string nor a sequence. Inside a
/// sequence `null` contributes nothing and other non-string items contribute
/// their JSON text.
pub(crate) fn concat(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let mut joined = String::new();
            for item in items {
                match item {
                    Value::String(text) => joined.push_str(text),
                    Value::Null => {}
                    other => joined.push_str(&other.to_string()),
                }
            }
            Some(joined)
        }
        _ => None,
    }
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sequences_concatenate_without_separator() {
        let value = json!(["import os\n", "print(os.getcwd())"]);
        assert_eq!(
            concat(&value).as_deref(),
            Some("import os\nprint(os.getcwd())")
        );
    }

    #[test]
    fn single_string_is_taken_verbatim() {
        assert_eq!(concat(&json!("a\nb")).as_deref(), Some("a\nb"));
    }

    #[test]
    fn nulls_vanish_and_scalars_stringify() {
        assert_eq!(concat(&json!(["a", null, 1, true])).as_deref(), Some("a1true"));
    }

    #[test]
    fn non_text_shapes_are_rejected() {
        assert_eq!(concat(&json!(42)), None);
        assert_eq!(concat(&json!({"a": "b"})), None);
        assert_eq!(concat(&Value::Null), None);
    }

    #[test]
    fn kinds_are_named() {
        assert_eq!(kind_of(&json!([])), "sequence");
        assert_eq!(kind_of(&json!({})), "object");
        assert_eq!(kind_of(&json!("x")), "string");
    }
}
