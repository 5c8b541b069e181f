use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::binder::ParameterBinder;
use crate::descriptor::TypeRegistry;
use crate::router::RouteRegistry;

/// Supplies the flat untyped payload mapping for one request.
///
/// The dispatcher depends only on the merged mapping, not on how it was
/// assembled; assembling query and body data is the hosting collaborator's
/// job (see [`crate::payload`] for the reference implementation).
pub trait PayloadProvider {
    /// Produce the payload mapping.
    ///
    /// # Errors
    ///
    /// Failures (for example a malformed request body) surface to the
    /// client as a bad request.
    fn payload(&self) -> anyhow::Result<Map<String, Value>>;
}

/// Result of dispatching one request: status line inputs, the content type
/// header value, and the serialized body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: String,
    pub body: String,
}

impl DispatchOutcome {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason_phrase(status),
            content_type: "text/plain".to_string(),
            body: body.into(),
        }
    }

    /// The HTTP/1.1 status line for this outcome.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!("HTTP/1.1 {} {}", self.status, self.reason)
    }
}

/// Reason phrase for the status codes the dispatcher emits.
#[must_use]
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Routes one request through match, resolve, bind, invoke, serialize.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<RouteRegistry>,
    types: Arc<TypeRegistry>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: Arc<RouteRegistry>, types: Arc<TypeRegistry>) -> Self {
        Self { registry, types }
    }

    /// Handle one request.
    ///
    /// Never panics and never returns an error: every failure mode maps to
    /// an outcome with the appropriate status code and a plain-text body.
    #[must_use]
    pub fn handle(
        &self,
        verb: &str,
        path: &str,
        provider: &dyn PayloadProvider,
    ) -> DispatchOutcome {
        let start = Instant::now();

        let Some(route) = self.registry.match_route(path, verb) else {
            warn!(verb = %verb, path = %path, "No route matched");
            return DispatchOutcome::text(404, "Not Found");
        };

        let Some(method) = self.registry.resolve(route) else {
            // The index references a handler that no longer exists. That is
            // a stale or corrupted registry, not a client mistake.
            error!(
                verb = %verb,
                path = %path,
                handler_type = %route.handler_type,
                handler_method = %route.handler_method,
                "Route descriptor does not resolve to a handler"
            );
            return DispatchOutcome::text(500, "Handler not found");
        };

        let payload = match provider.payload() {
            Ok(payload) => payload,
            Err(err) => {
                warn!(verb = %verb, path = %path, error = %err, "Payload extraction failed");
                return DispatchOutcome::text(400, format!("Bad Request: {err}"));
            }
        };

        let binder = ParameterBinder::new(&self.types);
        let plan = match binder.bind(&method.params, &payload) {
            Ok(plan) => plan,
            Err(err) => {
                info!(verb = %verb, path = %path, error = %err, "Parameter binding failed");
                return DispatchOutcome::text(400, format!("Bad Request: {err}"));
            }
        };

        debug!(
            verb = %verb,
            path = %path,
            handler_type = %route.handler_type,
            handler_method = %route.handler_method,
            args = plan.args.len(),
            "Invoking handler"
        );

        let invoked = panic::catch_unwind(AssertUnwindSafe(|| (method.handler)(&plan.args)));

        let envelope = match invoked {
            Ok(Ok(envelope)) => envelope,
            Ok(Err(err)) => {
                error!(
                    verb = %verb,
                    path = %path,
                    handler_method = %route.handler_method,
                    error = %err,
                    "Handler returned an error"
                );
                return DispatchOutcome::text(500, "Internal Server Error");
            }
            Err(panic_payload) => {
                error!(
                    verb = %verb,
                    path = %path,
                    handler_method = %route.handler_method,
                    panic_message = ?panic_payload,
                    "Handler panicked"
                );
                return DispatchOutcome::text(500, "Internal Server Error");
            }
        };

        info!(
            verb = %verb,
            path = %path,
            status = envelope.status,
            latency_us = start.elapsed().as_micros() as u64,
            "Request handled"
        );

        DispatchOutcome {
            status: envelope.status,
            reason: reason_phrase(envelope.status),
            content_type: envelope.content.content_type().to_string(),
            body: envelope.content.render(),
        }
    }
}
