//! # Router Module
//!
//! Route discovery and matching over explicit handler descriptor tables.
//!
//! ## Overview
//!
//! Handler types are declared as [`HandlerTypeDef`] tables built in code:
//! a builder replaces runtime reflection as the discovery mechanism behind
//! the stable [`RouteDescriptor`] shape. Discovery keeps only methods that
//! carry a verb marker and derives each path deterministically as
//! `"/" + method name`. There are no path templates or parameters: matching
//! is exact string equality on the path and case-insensitive on the verb.
//!
//! ## Collisions
//!
//! Registering a second handler for an already-taken `(path, verb)` pair
//! overwrites the first. The overwrite is logged at `warn` level because it
//! is almost always a configuration mistake, but it is not an error.
//!
//! ## Lifetime
//!
//! The registry is built once and read-only thereafter; share it via `Arc`
//! across worker threads. Rebuilding (process restart) discards it wholesale.

mod core;

pub use core::{HandlerFn, HandlerTypeDef, MethodDef, ParamSpec, RouteDescriptor, RouteRegistry};
