//! Reference login module.
//!
//! A small but complete wiring of the framework: a type registry covering
//! every descriptor shape (data, content, inline property, typed
//! containers), one handler type with a query-style and a body-style route,
//! and the serde types their handlers answer with. The CLI and the
//! integration tests both run against this module.

use std::sync::Arc;

use anyhow::Context;
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{ContentValue, ResponseEnvelope};
use crate::descriptor::{
    FieldDef, MediaKind, ObjectDef, ObjectKind, ResponseDef, ScalarKind, TypeDescriptor,
    TypeRegistry,
};
use crate::dispatcher::Dispatcher;
use crate::router::{HandlerTypeDef, MethodDef, ParamSpec, RouteRegistry};

/// Basic user info carried inside a login status answer. Inline property
/// object: embedded in place, never a named schema component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProperty {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<i64>>,
}

/// Wire content of the login status answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggedInContent {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProperty>,
}

/// Credentials posted to the login route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The single response variant both login routes declare. Status and
/// description are fixed per variant; the constants mirror the registered
/// [`ResponseDef`].
pub struct LoginStatusResponse;

impl LoginStatusResponse {
    pub const NAME: &'static str = "LoginStatusResponse";
    pub const STATUS: u16 = 200;
    pub const DESCRIPTION: &'static str =
        "Returns login status and (if logged in) basic user info";
    pub const CONTENT: &'static str = "LoggedInContent";

    /// Wrap a content body in the declared envelope.
    ///
    /// # Errors
    ///
    /// Fails if the body does not reflect to an object.
    pub fn envelope(body: &LoggedInContent) -> anyhow::Result<ResponseEnvelope> {
        let content = ContentValue::json(Self::CONTENT, body)?;
        Ok(ResponseEnvelope::new(Self::STATUS, Self::DESCRIPTION, content))
    }
}

/// Build the descriptor tables for the login module.
#[must_use]
pub fn type_registry() -> TypeRegistry {
    let mut types = TypeRegistry::new();

    types.register_object(ObjectDef::new(
        "StringArray",
        ObjectKind::Container(ScalarKind::Str),
    ));
    types.register_object(ObjectDef::new(
        "IntArray",
        ObjectKind::Container(ScalarKind::Int),
    ));
    types.register_object(
        ObjectDef::new("UserProperty", ObjectKind::Property)
            .field(FieldDef::new(
                "username",
                TypeDescriptor::scalar(ScalarKind::Str),
            ))
            .field(FieldDef::new("roles", TypeDescriptor::object("StringArray")))
            .field(FieldDef::new(
                "permissions",
                TypeDescriptor::object("IntArray").nullable(),
            )),
    );
    types.register_object(
        ObjectDef::new("LoggedInContent", ObjectKind::Content(MediaKind::Json))
            .field(FieldDef::new(
                "loggedIn",
                TypeDescriptor::scalar(ScalarKind::Bool),
            ))
            .field(FieldDef::new(
                "user",
                TypeDescriptor::object("UserProperty").nullable(),
            )),
    );
    types.register_object(
        ObjectDef::new("LoginRequest", ObjectKind::Data)
            .field(FieldDef::new(
                "username",
                TypeDescriptor::scalar(ScalarKind::Str),
            ))
            .field(FieldDef::new(
                "password",
                TypeDescriptor::scalar(ScalarKind::Str),
            )),
    );
    types.register_response(
        ResponseDef::new(
            LoginStatusResponse::NAME,
            LoginStatusResponse::STATUS,
            LoginStatusResponse::DESCRIPTION,
        )
        .with_content(LoginStatusResponse::CONTENT),
    );

    types
}

fn login_status(_args: &[Value]) -> anyhow::Result<ResponseEnvelope> {
    LoginStatusResponse::envelope(&LoggedInContent {
        logged_in: true,
        user: Some(UserProperty {
            username: "root".to_string(),
            roles: Some(vec!["admin".to_string(), "superadmin".to_string()]),
            permissions: None,
        }),
    })
}

fn login(args: &[Value]) -> anyhow::Result<ResponseEnvelope> {
    let request: LoginRequest = serde_json::from_value(
        args.first()
            .cloned()
            .context("login expects one bound argument")?,
    )
    .context("login request payload is malformed")?;

    // A rejected login is still a successful dispatch; the outcome lives in
    // the content, not the status code.
    LoginStatusResponse::envelope(&LoggedInContent {
        logged_in: request.username == "root",
        user: Some(UserProperty {
            username: request.username,
            roles: None,
            permissions: None,
        }),
    })
}

/// Candidate handler types for route discovery.
#[must_use]
pub fn handler_types() -> Vec<HandlerTypeDef> {
    vec![HandlerTypeDef::new("MainRoute")
        .method(
            MethodDef::new("login_status", login_status)
                .verb(Method::GET)
                .returns(LoginStatusResponse::NAME),
        )
        .method(
            MethodDef::new("login", login)
                .verb(Method::POST)
                .param(ParamSpec::typed(
                    "request",
                    TypeDescriptor::object("LoginRequest"),
                ))
                .returns(LoginStatusResponse::NAME),
        )]
}

/// A dispatcher wired to the login module's registries.
#[must_use]
pub fn dispatcher() -> Dispatcher {
    let types = Arc::new(type_registry());
    let registry = Arc::new(RouteRegistry::discover(handler_types()));
    Dispatcher::new(registry, types)
}
