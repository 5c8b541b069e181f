//! Payload assembly helpers.
//!
//! The binder consumes one flat mapping of string keys to untyped values
//! per request: query-string data merged with form or JSON body data. The
//! hosting server owns the raw I/O; these helpers implement the merge
//! contract so the dispatcher is usable end to end without one.

use http::Method;
use serde_json::{Map, Value};
use tracing::debug;

use crate::dispatcher::PayloadProvider;

/// Parse query string parameters from a URL path.
///
/// Everything after `?` is URL-decoded into ordered name/value pairs.
#[must_use]
pub fn parse_query_params(path: &str) -> Vec<(String, String)> {
    match path.find('?') {
        Some(pos) => url::form_urlencoded::parse(path[pos + 1..].as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        None => Vec::new(),
    }
}

/// Merge query data with body data into one payload mapping.
///
/// Query pairs go in first. For non-`GET` requests with a body, a JSON
/// content type parses the body and merges the resulting object over the
/// query data (non-object JSON is ignored); any other body is treated as
/// URL-encoded form fields, likewise merged over the query data.
#[must_use]
pub fn merge_payload(
    method: &Method,
    query: &[(String, String)],
    content_type: Option<&str>,
    body: Option<&str>,
) -> Map<String, Value> {
    let mut payload = Map::new();
    for (name, value) in query {
        payload.insert(name.clone(), Value::String(value.clone()));
    }

    if *method == Method::GET {
        return payload;
    }

    let Some(body) = body else {
        return payload;
    };

    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    if is_json {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => {
                for (name, value) in fields {
                    payload.insert(name, value);
                }
            }
            Ok(_) | Err(_) => {
                debug!(method = %method, "Request body is not a JSON object, ignoring");
            }
        }
    } else {
        for (name, value) in url::form_urlencoded::parse(body.as_bytes()) {
            payload.insert(name.to_string(), Value::String(value.to_string()));
        }
    }

    payload
}

/// A [`PayloadProvider`] over a prebuilt mapping.
#[derive(Debug, Clone, Default)]
pub struct StaticPayload(pub Map<String, Value>);

impl StaticPayload {
    #[must_use]
    pub fn empty() -> Self {
        Self(Map::new())
    }

    /// Build a provider from a JSON object value; anything else yields an
    /// empty payload.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::empty(),
        }
    }
}

impl PayloadProvider for StaticPayload {
    fn payload(&self) -> anyhow::Result<Map<String, Value>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_params_decode() {
        let params = parse_query_params("/login?user=a%20b&flag=on");
        assert_eq!(
            params,
            vec![
                ("user".to_string(), "a b".to_string()),
                ("flag".to_string(), "on".to_string())
            ]
        );
        assert!(parse_query_params("/login").is_empty());
    }

    #[test]
    fn json_body_merges_over_query() {
        let query = vec![("username".to_string(), "from_query".to_string())];
        let payload = merge_payload(
            &Method::POST,
            &query,
            Some("application/json"),
            Some(r#"{"username":"from_body","password":"x"}"#),
        );
        assert_eq!(payload.get("username"), Some(&json!("from_body")));
        assert_eq!(payload.get("password"), Some(&json!("x")));
    }

    #[test]
    fn get_requests_ignore_bodies() {
        let payload = merge_payload(
            &Method::GET,
            &[("a".to_string(), "1".to_string())],
            Some("application/json"),
            Some(r#"{"a":"2"}"#),
        );
        assert_eq!(payload.get("a"), Some(&json!("1")));
    }

    #[test]
    fn form_bodies_parse_as_fields() {
        let payload = merge_payload(
            &Method::POST,
            &[],
            Some("application/x-www-form-urlencoded"),
            Some("username=alice&remember=on"),
        );
        assert_eq!(payload.get("username"), Some(&json!("alice")));
        assert_eq!(payload.get("remember"), Some(&json!("on")));
    }

    #[test]
    fn non_object_json_is_ignored() {
        let payload = merge_payload(&Method::POST, &[], Some("application/json"), Some("[1,2]"));
        assert!(payload.is_empty());
    }
}
