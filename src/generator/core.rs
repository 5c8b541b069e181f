use std::path::Path;

use http::Method;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};

use crate::descriptor::{
    FieldDef, ObjectKind, ScalarKind, TypeDescriptor, TypeRegistry,
};
use crate::router::{HandlerTypeDef, MethodDef, RouteRegistry};

/// Offline schema synthesizer.
///
/// Walks a [`RouteRegistry`] and the shared [`TypeRegistry`] and accumulates
/// an OpenAPI-style document: one path item per route, one memoized component
/// per named response and content type. Call [`generate`](Self::generate)
/// once, then [`document`](Self::document) or
/// [`save_to_file`](Self::save_to_file).
pub struct SchemaSynthesizer<'a> {
    types: &'a TypeRegistry,
    paths: Map<String, Value>,
    schemas: Map<String, Value>,
    responses: Map<String, Value>,
}

impl<'a> SchemaSynthesizer<'a> {
    #[must_use]
    pub fn new(types: &'a TypeRegistry) -> Self {
        Self {
            types,
            paths: Map::new(),
            schemas: Map::new(),
            responses: Map::new(),
        }
    }

    /// Synthesize the document for every discovered route.
    ///
    /// Response variants no route references are not swept up automatically;
    /// emit those explicitly with
    /// [`generate_from_response`](Self::generate_from_response).
    pub fn generate(&mut self, registry: &RouteRegistry) {
        for handler in registry.handler_types() {
            self.generate_from_handler(handler);
        }

        info!(
            paths = self.paths.len(),
            schemas = self.schemas.len(),
            responses = self.responses.len(),
            "Schema document synthesized"
        );
    }

    fn generate_from_handler(&mut self, handler: &HandlerTypeDef) {
        for method in &handler.methods {
            self.generate_operation(method);
        }
    }

    /// Emit one path operation for a verb-marked method.
    ///
    /// Methods without a verb marker are not routes. Methods without a
    /// resolvable response variant stay routable at runtime but contribute no
    /// operation; the document never invents a response shape.
    fn generate_operation(&mut self, method: &MethodDef) {
        let Some(verb) = &method.verb else {
            return;
        };
        let Some(response_name) = &method.response else {
            debug!(method = %method.name, "No response variant declared, skipping operation");
            return;
        };
        if !self.emit_response(response_name) {
            return;
        }
        // emit_response guarantees the lookup succeeds here.
        let Some(response) = self.types.response(response_name) else {
            return;
        };
        let status = response.status.to_string();

        let query_style = *verb == Method::GET || *verb == Method::DELETE;
        let mut parameters: Vec<Value> = Vec::new();
        let mut request_body: Option<Value> = None;

        for param in &method.params {
            let Some(ty) = &param.ty else {
                debug!(
                    method = %method.name,
                    param = %param.name,
                    "Untyped parameter, not represented in the document"
                );
                continue;
            };

            match ty.base() {
                TypeDescriptor::Scalar(ScalarKind::Array) => {
                    debug!(
                        method = %method.name,
                        param = %param.name,
                        "Untyped sequence parameter, not represented in the document"
                    );
                }
                TypeDescriptor::Scalar(kind) => {
                    if query_style {
                        parameters.push(json!({
                            "name": param.name,
                            "in": "query",
                            "required": param.default.is_none(),
                            "schema": scalar_schema(*kind, false),
                        }));
                    } else {
                        debug!(
                            method = %method.name,
                            param = %param.name,
                            "Scalar parameter on a body verb, not represented in the document"
                        );
                    }
                }
                TypeDescriptor::Object(type_name) => {
                    let type_name = type_name.clone();
                    if !self.ensure_schema(&type_name) {
                        continue;
                    }
                    if query_style {
                        self.flatten_to_query(&type_name, &mut parameters);
                    } else {
                        request_body = Some(json!({
                            "required": param.default.is_none(),
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": format!("#/components/schemas/{}", type_name)
                                    }
                                }
                            }
                        }));
                    }
                }
                TypeDescriptor::Unknown | TypeDescriptor::Nullable(_) => {
                    debug!(
                        method = %method.name,
                        param = %param.name,
                        "Unclassifiable parameter type, not represented in the document"
                    );
                }
            }
        }

        let mut operation = Map::new();
        operation.insert("summary".to_string(), Value::String(method.name.clone()));
        if !parameters.is_empty() {
            operation.insert("parameters".to_string(), Value::Array(parameters));
        }
        if let Some(body) = request_body {
            operation.insert("requestBody".to_string(), body);
        }
        operation.insert(
            "responses".to_string(),
            json!({
                status: {
                    "$ref": format!("#/components/responses/{}", response_name)
                }
            }),
        );

        let path = format!("/{}", method.name);
        let verb_key = verb.as_str().to_ascii_lowercase();
        match self.paths.get_mut(&path) {
            Some(Value::Object(item)) => {
                item.insert(verb_key, Value::Object(operation));
            }
            _ => {
                let mut item = Map::new();
                item.insert(verb_key, Value::Object(operation));
                self.paths.insert(path, Value::Object(item));
            }
        }
    }

    /// Each query parameter mirrors one public field of the object type:
    /// same name, requiredness from the shared field rule, schema from the
    /// field's declared type.
    fn flatten_to_query(&mut self, type_name: &str, parameters: &mut Vec<Value>) {
        let Some(object) = self.types.object(type_name) else {
            return;
        };
        let fields: Vec<FieldDef> = object.fields.clone();
        for field in fields {
            let schema = self.field_schema(&field.ty);
            parameters.push(json!({
                "name": field.name,
                "in": "query",
                "required": field.required(),
                "schema": schema,
            }));
        }
    }

    /// Emit the component for a named response variant, memoized.
    ///
    /// Returns `false` when the variant is unregistered or its content
    /// declaration cannot be resolved; the caller then skips whatever would
    /// have referenced it. One broken declaration must not abort the scan.
    pub fn generate_from_response(&mut self, name: &str) -> bool {
        self.emit_response(name)
    }

    fn emit_response(&mut self, name: &str) -> bool {
        if self.responses.contains_key(name) {
            return true;
        }
        let Some(response) = self.types.response(name) else {
            error!(response = %name, "Response variant is not registered, skipping");
            return false;
        };
        let response = response.clone();

        let mut component = Map::new();
        component.insert(
            "description".to_string(),
            Value::String(response.description.clone()),
        );

        if let Some(content_name) = &response.content {
            let Some(content) = self.types.object(content_name) else {
                error!(
                    response = %name,
                    content = %content_name,
                    "Response names an unregistered content type, skipping"
                );
                return false;
            };
            let ObjectKind::Content(media) = content.kind else {
                error!(
                    response = %name,
                    content = %content_name,
                    "Response content is not a content type, skipping"
                );
                return false;
            };
            let content_name = content_name.clone();
            if !self.ensure_schema(&content_name) {
                return false;
            }
            let mime = media.mime();
            component.insert(
                "content".to_string(),
                json!({
                    mime: {
                        "schema": {
                            "$ref": format!("#/components/schemas/{}", content_name)
                        }
                    }
                }),
            );
        }

        self.responses
            .insert(name.to_string(), Value::Object(component));
        true
    }

    /// Emit the named schema component, memoized. First writer wins.
    fn ensure_schema(&mut self, name: &str) -> bool {
        if self.schemas.contains_key(name) {
            return true;
        }
        let Some(object) = self.types.object(name) else {
            error!(type_name = %name, "Object type is not registered, skipping schema");
            return false;
        };
        let object = object.clone();

        // Placeholder guards against self-referential types; replacing it
        // keeps the entry's position in the document.
        self.schemas.insert(name.to_string(), Value::Null);

        let schema = match object.kind {
            ObjectKind::Container(elem) => json!({
                "type": "array",
                "items": { "type": elem.schema_type() }
            }),
            _ => {
                let mut properties = Map::new();
                let mut required: Vec<Value> = Vec::new();
                for field in &object.fields {
                    properties.insert(field.name.clone(), self.field_schema(&field.ty));
                    if field.required() {
                        required.push(Value::String(field.name.clone()));
                    }
                }
                let mut schema = Map::new();
                schema.insert("type".to_string(), Value::String("object".to_string()));
                schema.insert("properties".to_string(), Value::Object(properties));
                if !required.is_empty() {
                    schema.insert("required".to_string(), Value::Array(required));
                }
                Value::Object(schema)
            }
        };

        self.schemas.insert(name.to_string(), schema);
        true
    }

    /// Schema fragment for one field's declared type.
    ///
    /// Scalars carry a `nullable` flag when declared nullable. Object fields
    /// resolve through the registry: containers become typed arrays, every
    /// other object kind expands inline as a bare `properties` map. Anything
    /// unresolvable degrades to `string`.
    fn field_schema(&mut self, ty: &TypeDescriptor) -> Value {
        let nullable = matches!(ty, TypeDescriptor::Nullable(_));
        match ty.base() {
            TypeDescriptor::Scalar(kind) => scalar_schema(*kind, nullable),
            TypeDescriptor::Object(name) => match self.types.object(name) {
                Some(object) => match object.kind {
                    ObjectKind::Container(elem) => json!({
                        "type": "array",
                        "items": { "type": elem.schema_type() }
                    }),
                    _ => {
                        let fields: Vec<FieldDef> = object.fields.clone();
                        let mut properties = Map::new();
                        for field in fields {
                            properties
                                .insert(field.name.clone(), self.field_schema(&field.ty));
                        }
                        json!({ "properties": properties })
                    }
                },
                None => {
                    debug!(type_name = %name, "Field type unresolved, degrading to string");
                    json!({ "type": "string" })
                }
            },
            TypeDescriptor::Unknown | TypeDescriptor::Nullable(_) => {
                json!({ "type": "string" })
            }
        }
    }

    /// Assemble the full document from the accumulated sections.
    #[must_use]
    pub fn document(&self) -> Value {
        json!({
            "openapi": "3.0.0",
            "servers": [
                { "url": "http://localhost:8000/" }
            ],
            "info": {
                "title": "API Documentation",
                "version": "1.0.0"
            },
            "paths": self.paths,
            "components": {
                "schemas": self.schemas,
                "responses": self.responses
            }
        })
    }

    /// Pretty-print the document to a file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let rendered = serde_json::to_string_pretty(&self.document())?;
        std::fs::write(path, rendered)?;
        info!(path = %path.display(), "Schema document written");
        Ok(())
    }
}

/// Schema fragment for a scalar kind. Floats carry an explicit format.
fn scalar_schema(kind: ScalarKind, nullable: bool) -> Value {
    let mut schema = Map::new();
    schema.insert(
        "type".to_string(),
        Value::String(kind.schema_type().to_string()),
    );
    if kind == ScalarKind::Float {
        schema.insert("format".to_string(), Value::String("float".to_string()));
    }
    if nullable {
        schema.insert("nullable".to_string(), Value::Bool(true));
    }
    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{MediaKind, ObjectDef, ResponseDef};

    fn registry_with_content() -> TypeRegistry {
        let mut types = TypeRegistry::new();
        types.register_object(
            ObjectDef::new("Greeting", ObjectKind::Content(MediaKind::Json))
                .field(FieldDef::new(
                    "message",
                    TypeDescriptor::scalar(ScalarKind::Str),
                ))
                .field(FieldDef::new(
                    "count",
                    TypeDescriptor::scalar(ScalarKind::Int).nullable(),
                )),
        );
        types.register_response(
            ResponseDef::new("GreetingResponse", 200, "A greeting").with_content("Greeting"),
        );
        types
    }

    #[test]
    fn empty_document_has_the_fixed_skeleton() {
        let types = TypeRegistry::new();
        let synth = SchemaSynthesizer::new(&types);
        let doc = synth.document();

        assert_eq!(doc["openapi"], "3.0.0");
        assert_eq!(doc["servers"][0]["url"], "http://localhost:8000/");
        assert_eq!(doc["info"]["title"], "API Documentation");
        assert_eq!(doc["info"]["version"], "1.0.0");
        assert!(doc["paths"].as_object().unwrap().is_empty());
        assert!(doc["components"]["schemas"].as_object().unwrap().is_empty());
        assert!(doc["components"]["responses"]
            .as_object()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn required_list_follows_the_field_rule() {
        let types = registry_with_content();
        let mut synth = SchemaSynthesizer::new(&types);
        assert!(synth.ensure_schema("Greeting"));

        let doc = synth.document();
        let schema = &doc["components"]["schemas"]["Greeting"];
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["message"]));
        assert_eq!(schema["properties"]["count"]["nullable"], json!(true));
    }

    #[test]
    fn unregistered_response_is_skipped() {
        let types = TypeRegistry::new();
        let mut synth = SchemaSynthesizer::new(&types);
        assert!(!synth.emit_response("Ghost"));
        assert!(synth.document()["components"]["responses"]
            .as_object()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn response_with_non_content_type_is_skipped() {
        let mut types = TypeRegistry::new();
        types.register_object(ObjectDef::new("Plain", ObjectKind::Data));
        types.register_response(ResponseDef::new("Broken", 200, "broken").with_content("Plain"));

        let mut synth = SchemaSynthesizer::new(&types);
        assert!(!synth.emit_response("Broken"));
    }

    #[test]
    fn float_scalars_carry_a_format() {
        assert_eq!(
            scalar_schema(ScalarKind::Float, false),
            json!({ "type": "number", "format": "float" })
        );
        assert_eq!(
            scalar_schema(ScalarKind::Str, true),
            json!({ "type": "string", "nullable": true })
        );
    }

    #[test]
    fn container_schema_is_a_typed_array() {
        let mut types = TypeRegistry::new();
        types.register_object(ObjectDef::new(
            "IntArray",
            ObjectKind::Container(ScalarKind::Int),
        ));

        let mut synth = SchemaSynthesizer::new(&types);
        assert!(synth.ensure_schema("IntArray"));
        assert_eq!(
            synth.document()["components"]["schemas"]["IntArray"],
            json!({ "type": "array", "items": { "type": "integer" } })
        );
    }
}
