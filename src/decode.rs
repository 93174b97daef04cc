//! Lenient conversions for backend documents
//!
//! Display-only fields accept whatever scalar the backend sends. A value of
//! an unexpected type becomes `None` instead of failing the whole fetch.

use serde_json::Value;

/// Strings, numbers and booleans as text
pub(crate) fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers, or strings holding a number
pub(crate) fn number(value: Option<Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Booleans, or the strings `true` / `false`
pub(crate) fn flag(value: Option<Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Prefer `id`, fall back to the document's `_id`
pub(crate) fn document_id(id: Option<Value>, mongo_id: Option<Value>) -> Result<String, String> {
    text(id)
        .or_else(|| text(mongo_id))
        .ok_or_else(|| "missing field `id`".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_accepts_scalars_only() {
        assert_eq!(text(Some(json!("5kg"))), Some("5kg".to_string()));
        assert_eq!(text(Some(json!(12))), Some("12".to_string()));
        assert_eq!(text(Some(json!(true))), Some("true".to_string()));
        assert_eq!(text(Some(json!({ "a": 1 }))), None);
        assert_eq!(text(Some(Value::Null)), None);
        assert_eq!(text(None), None);
    }

    #[test]
    fn number_parses_strings() {
        assert_eq!(number(Some(json!(4.5))), Some(4.5));
        assert_eq!(number(Some(json!("4.8"))), Some(4.8));
        assert_eq!(number(Some(json!("great"))), None);
    }

    #[test]
    fn flag_parses_strings() {
        assert_eq!(flag(Some(json!(true))), Some(true));
        assert_eq!(flag(Some(json!("false"))), Some(false));
        assert_eq!(flag(Some(json!(1))), None);
    }

    #[test]
    fn document_id_prefers_id() {
        assert_eq!(document_id(Some(json!("a")), Some(json!("b"))), Ok("a".to_string()));
        assert_eq!(document_id(None, Some(json!(7))), Ok("7".to_string()));
        assert!(document_id(None, None).is_err());
    }
}
