use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ApiError;

/// JSON request body that never rejects. A body that is not a JSON object,
/// including an empty one, reads as the default request so that missing
/// fields surface through validation and id lookup.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.unwrap_or_default();
        let request = match serde_json::from_slice::<Value>(&bytes) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            _ => T::default(),
        };
        Ok(JsonBody(request))
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AuthorizeRequest {
    #[serde(default)]
    pub name: Option<Value>,
}

impl AuthorizeRequest {
    /// Only a JSON string counts as a name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Value::as_str)
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub subject: Option<Value>,
    #[serde(default)]
    pub text: Option<Value>,
}

impl MessageRequest {
    pub fn subject(&self) -> Option<String> {
        self.subject.as_ref().and_then(coerce_text)
    }

    pub fn text(&self) -> Option<String> {
        self.text.as_ref().and_then(coerce_text)
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MessageIdRequest {
    #[serde(default)]
    pub id: Option<Value>,
}

impl MessageIdRequest {
    pub fn id(&self) -> Option<u64> {
        self.id
            .as_ref()
            .and_then(coerce_text)
            .and_then(|id| parse_id(&id))
    }
}

/// Ids are canonical decimal strings: ASCII digits only, no sign, no
/// leading zero.
pub fn parse_id(raw: &str) -> Option<u64> {
    let canonical =
        !raw.is_empty() && !raw.starts_with('0') && raw.bytes().all(|b| b.is_ascii_digit());
    if canonical {
        raw.parse().ok()
    } else {
        None
    }
}

/// Loose coercion of a JSON value into text: `null`, `false`, zero and
/// anything that stringifies to the empty string count as missing.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(stringify(other)).filter(|text| !text.is_empty()),
    }
}

/// Arrays join their items with `,` (null items are empty), objects read
/// as `[object Object]`.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn falsy_values_are_missing() {
        for value in [json!(null), json!(false), json!(0), json!(""), json!(0.0)] {
            assert_eq!(coerce_text(&value), None, "{value}");
        }
    }

    #[test]
    fn scalars_are_stringified() {
        assert_eq!(coerce_text(&json!("hi")), Some("hi".to_string()));
        assert_eq!(coerce_text(&json!(42)), Some("42".to_string()));
        assert_eq!(coerce_text(&json!(true)), Some("true".to_string()));
    }

    #[test]
    fn name_must_be_a_string() {
        let request: AuthorizeRequest = serde_json::from_value(json!({ "name": 12345 })).unwrap();
        assert_eq!(request.name(), None);
        let request: AuthorizeRequest = serde_json::from_value(json!({ "name": "Vasya" })).unwrap();
        assert_eq!(request.name(), Some("Vasya"));
    }

    #[test]
    fn message_id_accepts_numbers_and_numeric_strings() {
        let request: MessageIdRequest = serde_json::from_value(json!({ "id": 3 })).unwrap();
        assert_eq!(request.id(), Some(3));
        let request: MessageIdRequest = serde_json::from_value(json!({ "id": "3" })).unwrap();
        assert_eq!(request.id(), Some(3));
        let request: MessageIdRequest = serde_json::from_value(json!({ "id": "-1" })).unwrap();
        assert_eq!(request.id(), None);
        let request: MessageIdRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request.id(), None);
    }

    #[test]
    fn ids_must_be_canonical() {
        assert_eq!(parse_id("1"), Some(1));
        assert_eq!(parse_id("120"), Some(120));
        for raw in ["", "0", "01", "+1", "-1", " 1", "1.0", "abc"] {
            assert_eq!(parse_id(raw), None, "{raw:?}");
        }
        let request: MessageIdRequest = serde_json::from_value(json!({ "id": "01" })).unwrap();
        assert_eq!(request.id(), None);
    }

    #[test]
    fn arrays_and_objects_stringify_loosely() {
        assert_eq!(coerce_text(&json!([1, 2])), Some("1,2".to_string()));
        assert_eq!(coerce_text(&json!(["a", null, true])), Some("a,,true".to_string()));
        assert_eq!(coerce_text(&json!({ "a": 1 })), Some("[object Object]".to_string()));
        assert_eq!(coerce_text(&json!([])), None);
        assert_eq!(coerce_text(&json!([null])), None);
        assert_eq!(coerce_text(&json!(1.5)), Some("1.5".to_string()));
    }
}
