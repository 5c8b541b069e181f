//! # Dispatcher Module
//!
//! Orchestrates one request end to end: match the route, resolve the
//! handler, obtain the payload, bind parameters, invoke, serialize.
//!
//! ## Inputs are explicit
//!
//! The dispatcher receives the verb, path, and payload provider as explicit
//! arguments. It never reads ambient process state, which keeps the whole
//! dispatch path testable without a real server.
//!
//! ## Error mapping
//!
//! - no route for `(path, verb)` results in 404
//! - a route descriptor whose type or method cannot be resolved results in
//!   500 (stale registry, fatal, non-retryable)
//! - binding failures result in 400 with the offending name in the message
//! - any other invocation failure (handler error or panic) results in a
//!   generic 500 with no internal detail leaked
//!
//! All error bodies are plain text.
//!
//! ## Concurrency
//!
//! Request handling is synchronous and single-threaded per request. The
//! route and type registries are immutable after construction and shared
//! via `Arc`, so the dispatcher itself is freely cloneable across worker
//! threads.

mod core;

pub use core::{reason_phrase, DispatchOutcome, Dispatcher, PayloadProvider};
