//! # CLI Module
//!
//! Command-line front end for the routecast utilities, wired to the
//! reference login module in [`crate::demo`].
//!
//! ## Commands
//!
//! ### `schema`
//!
//! Synthesize the OpenAPI-style document for the discovered routes:
//!
//! ```bash
//! routecast-gen schema --output openapi.json
//! ```
//!
//! Without `--output` the document is printed to stdout.
//!
//! ### `routes`
//!
//! Print the discovered route table.
//!
//! ### `dispatch`
//!
//! Run one request through the dispatcher and print the outcome:
//!
//! ```bash
//! routecast-gen dispatch --method POST --path /login \
//!     --payload '{"username":"alice","password":"secret"}'
//! ```
//!
//! ## Binary
//!
//! Available as the `routecast-gen` binary.

mod cli;

pub use cli::{run_cli, Cli, Commands};
