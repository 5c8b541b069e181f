use std::fmt;

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::descriptor::{ObjectDef, ObjectKind, ScalarKind, TypeDescriptor, TypeRegistry};
use crate::router::ParamSpec;

/// Binding failure taxonomy. Every variant names the offending parameter or
/// property so the client-facing message can point at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// A non-nullable, no-default parameter's key is absent from the payload.
    MissingParameter { name: String },
    /// A required property of an object-typed parameter is absent.
    MissingProperty { field: String, parameter: String },
    /// A parameter or field names an object type the registry does not know.
    UnknownType { name: String, parameter: String },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::MissingParameter { name } => {
                write!(f, "Missing required parameter: {}", name)
            }
            BindError::MissingProperty { field, parameter } => {
                write!(
                    f,
                    "Missing required property '{}' for parameter {}",
                    field, parameter
                )
            }
            BindError::UnknownType { name, parameter } => {
                write!(
                    f,
                    "Type '{}' is not registered for parameter {}",
                    name, parameter
                )
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Ordered, typed arguments for one handler invocation. Ephemeral: produced
/// by the binder, consumed immediately by the dispatcher, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationPlan {
    pub args: Vec<Value>,
}

/// Binds untyped payload mappings to typed handler arguments using the
/// shared descriptor tables.
pub struct ParameterBinder<'a> {
    types: &'a TypeRegistry,
}

impl<'a> ParameterBinder<'a> {
    #[must_use]
    pub fn new(types: &'a TypeRegistry) -> Self {
        Self { types }
    }

    /// Bind the declared parameters against one payload mapping.
    ///
    /// Parameters bind in declaration order; that order defines the
    /// positional argument order handed to the handler.
    ///
    /// # Errors
    ///
    /// Fails with the [`BindError`] taxonomy; no partially bound plan is
    /// ever returned.
    pub fn bind(
        &self,
        params: &[ParamSpec],
        payload: &Map<String, Value>,
    ) -> Result<InvocationPlan, BindError> {
        let mut args = Vec::with_capacity(params.len());
        for param in params {
            args.push(self.bind_param(param, payload)?);
        }
        Ok(InvocationPlan { args })
    }

    fn bind_param(
        &self,
        param: &ParamSpec,
        payload: &Map<String, Value>,
    ) -> Result<Value, BindError> {
        let Some(ty) = &param.ty else {
            return self.bind_by_name(param, payload);
        };

        match ty.base() {
            TypeDescriptor::Scalar(kind) => self.bind_scalar(param, *kind, ty, payload),
            TypeDescriptor::Object(name) => {
                let def = self.types.object(name).ok_or_else(|| BindError::UnknownType {
                    name: name.clone(),
                    parameter: param.name.clone(),
                })?;
                // Object parameters hydrate from the whole payload, not a
                // nested key: the request IS this DTO.
                self.hydrate(def, payload, &param.name)
            }
            // Unclassifiable declarations bind like untyped ones.
            _ => self.bind_by_name(param, payload),
        }
    }

    fn bind_by_name(
        &self,
        param: &ParamSpec,
        payload: &Map<String, Value>,
    ) -> Result<Value, BindError> {
        if let Some(value) = payload.get(&param.name) {
            return Ok(value.clone());
        }
        if let Some(default) = &param.default {
            return Ok(default.clone());
        }
        Err(BindError::MissingParameter {
            name: param.name.clone(),
        })
    }

    fn bind_scalar(
        &self,
        param: &ParamSpec,
        kind: ScalarKind,
        ty: &TypeDescriptor,
        payload: &Map<String, Value>,
    ) -> Result<Value, BindError> {
        let Some(value) = payload.get(&param.name) else {
            if let Some(default) = &param.default {
                return Ok(default.clone());
            }
            if ty.allows_null() {
                return Ok(Value::Null);
            }
            return Err(BindError::MissingParameter {
                name: param.name.clone(),
            });
        };

        if value.is_null() && ty.allows_null() {
            return Ok(Value::Null);
        }

        // A present null against a non-nullable scalar coerces like any
        // other value; there is no null short-circuit.
        Ok(coerce_scalar(kind, value))
    }

    /// Hydrate an instance of `def` from the given payload scope.
    ///
    /// Absent nullable or defaulted fields are omitted from the hydrated
    /// object rather than written as explicit nulls, so downstream
    /// deserialization sees them as unset.
    pub fn hydrate(
        &self,
        def: &ObjectDef,
        payload: &Map<String, Value>,
        parameter: &str,
    ) -> Result<Value, BindError> {
        let mut out = Map::new();

        for field in &def.fields {
            let Some(value) = payload.get(&field.name) else {
                if field.ty.allows_null() || field.has_default {
                    continue;
                }
                return Err(BindError::MissingProperty {
                    field: field.name.clone(),
                    parameter: parameter.to_string(),
                });
            };

            if value.is_null() && field.ty.allows_null() {
                out.insert(field.name.clone(), Value::Null);
                continue;
            }

            let bound = match field.ty.base() {
                TypeDescriptor::Scalar(kind) => coerce_scalar(*kind, value),
                TypeDescriptor::Object(name) => {
                    let inner =
                        self.types.object(name).ok_or_else(|| BindError::UnknownType {
                            name: name.clone(),
                            parameter: parameter.to_string(),
                        })?;
                    match inner.kind {
                        ObjectKind::Container(elem) => coerce_container(elem, value),
                        _ => match value {
                            Value::Object(nested) => self.hydrate(inner, nested, parameter)?,
                            // Non-mapping values pass through untouched.
                            other => other.clone(),
                        },
                    }
                }
                _ => value.clone(),
            };
            out.insert(field.name.clone(), bound);
        }

        debug!(
            type_name = %def.name,
            parameter = %parameter,
            bound_fields = out.len(),
            "Object hydrated"
        );
        Ok(Value::Object(out))
    }
}

/// Apply the scalar coercion rule for `kind` to an arbitrary payload value.
pub(crate) fn coerce_scalar(kind: ScalarKind, value: &Value) -> Value {
    match kind {
        ScalarKind::Int => Value::Number(Number::from(cast_int(value))),
        ScalarKind::Float => float_value(cast_float(value)),
        ScalarKind::Str => Value::String(cast_str(value)),
        ScalarKind::Bool => Value::Bool(cast_bool(value)),
        ScalarKind::Array => match value {
            Value::Array(_) | Value::Object(_) => value.clone(),
            other => Value::Array(vec![other.clone()]),
        },
    }
}

/// Coerce a container field value: wrap non-sequences, then coerce every
/// element to the declared element kind.
fn coerce_container(elem: ScalarKind, value: &Value) -> Value {
    let items: Vec<Value> = match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    };
    Value::Array(items.iter().map(|v| coerce_scalar(elem, v)).collect())
}

fn float_value(f: f64) -> Value {
    Number::from_f64(f).map_or(Value::Null, Value::Number)
}

/// Integer cast with lenient, form-style semantics: numeric strings parse
/// (including a leading-numeric prefix), floats truncate, booleans become
/// 0 or 1, null becomes 0, sequences report emptiness.
fn cast_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => cast_float_str(s) as i64,
        Value::Array(a) => i64::from(!a.is_empty()),
        Value::Object(o) => i64::from(!o.is_empty()),
    }
}

fn cast_float(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => cast_float_str(s),
        Value::Array(a) => f64::from(u8::from(!a.is_empty())),
        Value::Object(o) => f64::from(u8::from(!o.is_empty())),
    }
}

/// Parse the leading numeric prefix of a string: `"42"` is 42, `"12.5x"`
/// is 12.5, `"abc"` is 0.
fn cast_float_str(s: &str) -> f64 {
    let s = s.trim();
    if let Ok(f) = s.parse::<f64>() {
        return f;
    }

    let bytes = s.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return 0.0;
    }
    s[..end].parse::<f64>().unwrap_or(0.0)
}

fn cast_str(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Boolean cast: the truthy-string table first, generic truthiness for
/// everything else.
fn cast_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => truthy(value),
        },
        other => truthy(other),
    }
}

/// Generic truthiness: empty strings, `"0"`, zero numbers, null, and empty
/// sequences are false; everything else is true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
