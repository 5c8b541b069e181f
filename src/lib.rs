//! # routecast
//!
//! **routecast** is a descriptor-driven request dispatch framework: routes,
//! parameter binding, and response schemas all derive from one set of
//! declared type descriptors.
//!
//! ## Overview
//!
//! Handler types declare their methods, verbs, parameters, and response
//! variants as plain data. Route discovery walks those declarations and
//! builds the routing table; the binder uses the same declarations to
//! coerce an untyped request payload into positional handler arguments; the
//! schema synthesizer uses them again to emit an OpenAPI-style document
//! offline. Because every consumer reads the same descriptors, the
//! document the generator writes and the coercions the binder applies can
//! never drift apart.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`descriptor`]** - Type descriptors, object/response definitions, and the type registry
//! - **[`router`]** - Handler declarations, route discovery, and route matching
//! - **[`binder`]** - Type-directed parameter binding with lenient scalar coercion
//! - **[`content`]** - Typed response content and the response envelope
//! - **[`dispatcher`]** - The match, resolve, bind, invoke, serialize pipeline
//! - **[`generator`]** - Offline OpenAPI-style schema synthesis
//! - **[`payload`]** - Query/body merge helpers and a static payload provider
//! - **[`demo`]** - Reference login module exercising every descriptor shape
//! - **[`cli`]** - Command-line front end (`routecast-gen`)
//!
//! ## Quick Start
//!
//! ```rust
//! use routecast::demo;
//! use routecast::payload::StaticPayload;
//!
//! let dispatcher = demo::dispatcher();
//! let outcome = dispatcher.handle("GET", "/login_status", &StaticPayload::empty());
//! assert_eq!(outcome.status, 200);
//! ```

pub mod binder;
pub mod cli;
pub mod content;
pub mod demo;
pub mod descriptor;
pub mod dispatcher;
pub mod generator;
pub mod payload;
pub mod router;

pub use binder::{BindError, ParameterBinder};
pub use content::{ContentValue, ResponseEnvelope};
pub use descriptor::{TypeDescriptor, TypeRegistry};
pub use dispatcher::{DispatchOutcome, Dispatcher, PayloadProvider};
pub use generator::SchemaSynthesizer;
pub use router::{HandlerTypeDef, MethodDef, ParamSpec, RouteRegistry};
