//! Typed response content model.
//!
//! A [`ContentValue`] is the wire representation of a handler's result: the
//! public fields of a typed value, reflected into an ordered key-value
//! mapping via serde. Each content variant owns its wire content type; the
//! JSON kind additionally encodes the mapping to text. Nested typed objects
//! serialize recursively through the same reflection rule, so inline
//! property objects appear as nested objects in the output, never as
//! references.

use anyhow::bail;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::descriptor::MediaKind;

/// A typed response content value: its registered type name, media kind,
/// and reflected public fields. Owns no resources; lives for one
/// request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentValue {
    type_name: String,
    media: MediaKind,
    fields: Map<String, Value>,
}

impl ContentValue {
    /// Reflect a serializable value into a JSON content value.
    ///
    /// # Errors
    ///
    /// Fails if the value does not serialize to an object.
    pub fn json<T: Serialize>(type_name: impl Into<String>, value: &T) -> anyhow::Result<Self> {
        Self::reflect(type_name, MediaKind::Json, value)
    }

    /// Reflect a serializable value into a plain-text content value.
    ///
    /// # Errors
    ///
    /// Fails if the value does not serialize to an object.
    pub fn plain<T: Serialize>(type_name: impl Into<String>, value: &T) -> anyhow::Result<Self> {
        Self::reflect(type_name, MediaKind::Plain, value)
    }

    fn reflect<T: Serialize>(
        type_name: impl Into<String>,
        media: MediaKind,
        value: &T,
    ) -> anyhow::Result<Self> {
        let type_name = type_name.into();
        match serde_json::to_value(value)? {
            Value::Object(fields) => Ok(Self {
                type_name,
                media,
                fields,
            }),
            other => bail!(
                "content '{}' must serialize to an object, got {}",
                type_name,
                json_kind(&other)
            ),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn media(&self) -> MediaKind {
        self.media
    }

    /// The declared wire content type, fixed per media kind.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        self.media.mime()
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Serialize the reflected fields to a wire body.
    ///
    /// JSON content encodes the field mapping as compact JSON text. Plain
    /// content renders one `name: value` line per field.
    #[must_use]
    pub fn render(&self) -> String {
        match self.media {
            MediaKind::Json => Value::Object(self.fields.clone()).to_string(),
            MediaKind::Plain => {
                let mut out = String::new();
                for (name, value) in &self.fields {
                    out.push_str(name);
                    out.push_str(": ");
                    match value {
                        Value::String(s) => out.push_str(s),
                        other => out.push_str(&other.to_string()),
                    }
                    out.push('\n');
                }
                out
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The typed result of a handler invocation.
///
/// Status code and description are fixed per response variant (declared once
/// as associated constants on the variant, mirrored by the registry's
/// `ResponseDef`); the content is instance-specific.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub description: String,
    pub content: ContentValue,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn new(status: u16, description: impl Into<String>, content: ContentValue) -> Self {
        Self {
            status,
            description: description.into(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        count: i64,
    }

    #[test]
    fn json_content_renders_field_mapping() {
        let content = ContentValue::json(
            "Sample",
            &Sample {
                name: "widget".to_string(),
                count: 3,
            },
        )
        .unwrap();

        assert_eq!(content.content_type(), "application/json");
        assert_eq!(content.render(), r#"{"name":"widget","count":3}"#);
    }

    #[test]
    fn plain_content_renders_lines() {
        let content = ContentValue::plain(
            "Sample",
            &Sample {
                name: "widget".to_string(),
                count: 3,
            },
        )
        .unwrap();

        assert_eq!(content.content_type(), "text/plain");
        assert_eq!(content.render(), "name: widget\ncount: 3\n");
    }

    #[test]
    fn non_object_values_are_rejected() {
        let err = ContentValue::json("Broken", &42).unwrap_err();
        assert!(err.to_string().contains("must serialize to an object"));
    }

    #[test]
    fn nested_objects_serialize_recursively() {
        #[derive(Serialize)]
        struct Inner {
            id: u32,
        }
        #[derive(Serialize)]
        struct Outer {
            inner: Inner,
        }

        let content = ContentValue::json("Outer", &Outer { inner: Inner { id: 7 } }).unwrap();
        assert_eq!(content.render(), r#"{"inner":{"id":7}}"#);
    }
}
