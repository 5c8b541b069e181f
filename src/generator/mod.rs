//! # Generator Module
//!
//! The offline schema synthesizer. It walks the same descriptor tables the
//! runtime binder consumes and emits an OpenAPI-style document describing
//! every route, response variant, and nested schema.
//!
//! ## Consistency contract
//!
//! The generator derives `required` lists, nullability flags, container
//! item types, and inline property expansion from the exact descriptor
//! rules the binder applies at runtime. It never re-implements
//! classification; both consumers call into [`crate::descriptor`].
//!
//! ## Degradation, not failure
//!
//! One un-analyzable type must not abort the whole scan. Unresolvable
//! types degrade to a plain `string` schema; a malformed response or
//! content declaration is reported and that entry skipped.
//!
//! ## Memoization
//!
//! Schema and response components are emitted at most once per name. The
//! first writer wins and later attempts are no-ops, so generating twice
//! produces byte-identical components. Generation is a single-run batch
//! process; the memoization maps are plain single-threaded structures.

mod core;

pub use core::SchemaSynthesizer;
