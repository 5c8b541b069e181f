use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::content::ResponseEnvelope;
use crate::descriptor::TypeDescriptor;

/// Handler entry point: bound positional arguments in, typed response out.
///
/// Any `Err` surfaces to the client as a generic internal error with the
/// message suppressed.
pub type HandlerFn = Arc<dyn Fn(&[Value]) -> anyhow::Result<ResponseEnvelope> + Send + Sync>;

/// A declared handler-method parameter.
///
/// `ty: None` means the declaration carries no type at all; the binder then
/// looks the value up by name without coercion. A parameter with a default
/// value is optional for both the binder and the generated document.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub ty: Option<TypeDescriptor>,
    pub default: Option<Value>,
}

impl ParamSpec {
    /// An untyped parameter, bound by name only.
    #[must_use]
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    #[must_use]
    pub fn typed(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}

/// A handler method declaration: name, optional verb marker, parameters,
/// declared response variant, and the entry point itself.
///
/// Methods without a verb marker are legal; discovery simply ignores them,
/// the same way lifecycle helpers on a handler type contribute no routes.
#[derive(Clone)]
pub struct MethodDef {
    pub name: String,
    pub verb: Option<Method>,
    pub params: Vec<ParamSpec>,
    pub response: Option<String>,
    pub handler: HandlerFn,
}

impl MethodDef {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<ResponseEnvelope> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            verb: None,
            params: Vec::new(),
            response: None,
            handler: Arc::new(handler),
        }
    }

    /// Attach the verb marker that makes this method routable.
    #[must_use]
    pub fn verb(mut self, verb: Method) -> Self {
        self.verb = Some(verb);
        self
    }

    #[must_use]
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Declare the response variant this method returns. Methods without a
    /// usable response type stay routable but are skipped by the schema
    /// synthesizer.
    #[must_use]
    pub fn returns(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }
}

impl std::fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("verb", &self.verb)
            .field("params", &self.params)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}

/// A candidate handler type: a named collection of method declarations.
#[derive(Debug, Clone)]
pub struct HandlerTypeDef {
    pub name: String,
    pub methods: Vec<MethodDef>,
}

impl HandlerTypeDef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn method(mut self, def: MethodDef) -> Self {
        self.methods.push(def);
        self
    }
}

/// Resolved mapping from a `(path, verb)` pair to a handler type and method.
///
/// Created once at registry build time, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub verb: Method,
    pub handler_type: String,
    pub handler_method: String,
}

/// Index from `(path, verb)` to route descriptors, plus the handler catalog
/// the dispatcher resolves against.
pub struct RouteRegistry {
    routes: HashMap<(String, Method), RouteDescriptor>,
    order: Vec<(String, Method)>,
    handlers: HashMap<String, HandlerTypeDef>,
    handler_order: Vec<String>,
}

impl RouteRegistry {
    /// Scan candidate handler types and build the route index.
    ///
    /// Each verb-marked method registers `"/" + method name` under its
    /// uppercased verb. Methods without a marker are ignored; types with no
    /// qualifying methods simply contribute nothing. A later registration
    /// for an occupied `(path, verb)` pair silently replaces the earlier
    /// one (logged at `warn`).
    #[must_use]
    pub fn discover(candidates: Vec<HandlerTypeDef>) -> Self {
        let mut registry = Self {
            routes: HashMap::new(),
            order: Vec::new(),
            handlers: HashMap::new(),
            handler_order: Vec::new(),
        };

        for candidate in candidates {
            for method in &candidate.methods {
                let Some(verb) = &method.verb else {
                    debug!(
                        handler_type = %candidate.name,
                        method = %method.name,
                        "Method has no verb marker, skipping"
                    );
                    continue;
                };

                let path = format!("/{}", method.name);
                let descriptor = RouteDescriptor {
                    path: path.clone(),
                    verb: verb.clone(),
                    handler_type: candidate.name.clone(),
                    handler_method: method.name.clone(),
                };

                let key = (path.clone(), verb.clone());
                if let Some(previous) = registry.routes.insert(key.clone(), descriptor) {
                    warn!(
                        path = %path,
                        verb = %verb,
                        previous_handler = %previous.handler_type,
                        new_handler = %candidate.name,
                        "Route collision, last registration wins"
                    );
                } else {
                    registry.order.push(key);
                }
            }

            if !registry.handlers.contains_key(&candidate.name) {
                registry.handler_order.push(candidate.name.clone());
            }
            registry.handlers.insert(candidate.name.clone(), candidate);
        }

        info!(
            routes_count = registry.order.len(),
            handler_types = registry.handler_order.len(),
            "Routing table loaded"
        );

        registry
    }

    /// Match a request to a route descriptor.
    ///
    /// Path comparison is exact string equality; the verb is matched
    /// case-insensitively. Returns `None` on any miss (a 404 downstream).
    #[must_use]
    pub fn match_route(&self, path: &str, verb: &str) -> Option<&RouteDescriptor> {
        let method = Method::from_bytes(verb.to_ascii_uppercase().as_bytes()).ok()?;
        let found = self.routes.get(&(path.to_string(), method));
        match found {
            Some(route) => {
                debug!(path = %path, verb = %verb, handler_type = %route.handler_type, "Route matched");
            }
            None => {
                debug!(path = %path, verb = %verb, "No route matched");
            }
        }
        found
    }

    /// Resolve a route descriptor to its handler method.
    ///
    /// `None` means the registry references a type or method that no longer
    /// exists, which signals a stale or corrupted build and is fatal for the
    /// request (a 500 downstream).
    #[must_use]
    pub fn resolve(&self, route: &RouteDescriptor) -> Option<&MethodDef> {
        self.handlers
            .get(&route.handler_type)?
            .methods
            .iter()
            .find(|m| m.name == route.handler_method)
    }

    /// Registered routes in discovery order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.order.iter().filter_map(|key| self.routes.get(key))
    }

    /// Handler types in discovery order.
    pub fn handler_types(&self) -> impl Iterator<Item = &HandlerTypeDef> {
        self.handler_order
            .iter()
            .filter_map(|name| self.handlers.get(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Print the route table to stdout. Debugging aid.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in self.routes() {
            println!(
                "[route] {} {} -> {}::{}",
                route.verb, route.path, route.handler_type, route.handler_method
            );
        }
    }

    /// Build a registry directly from parts. Exists so the stale-registry
    /// path (descriptor pointing at a missing type or method) is testable.
    #[cfg(test)]
    pub(crate) fn from_parts(
        routes: Vec<RouteDescriptor>,
        handlers: Vec<HandlerTypeDef>,
    ) -> Self {
        let mut registry = Self {
            routes: HashMap::new(),
            order: Vec::new(),
            handlers: HashMap::new(),
            handler_order: Vec::new(),
        };
        for route in routes {
            let key = (route.path.clone(), route.verb.clone());
            registry.order.push(key.clone());
            registry.routes.insert(key, route);
        }
        for handler in handlers {
            registry.handler_order.push(handler.name.clone());
            registry.handlers.insert(handler.name.clone(), handler);
        }
        registry
    }
}

impl std::fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("routes", &self.order)
            .field("handler_types", &self.handler_order)
            .finish()
    }
}
