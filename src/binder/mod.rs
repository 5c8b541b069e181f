//! # Binder Module
//!
//! The type-directed parameter binder. Given a handler method's declared
//! parameters and one flat untyped payload mapping, it produces the ordered,
//! typed argument list the dispatcher hands to the handler.
//!
//! ## Rules
//!
//! - Scalars are coerced leniently, in the tradition of dynamic form
//!   handling: numeric strings parse, truthy-string tables drive booleans,
//!   a present `null` against a non-nullable scalar coerces like any other
//!   value. Coercion never validates semantic content.
//! - Object-typed parameters hydrate from the entire current payload, not a
//!   nested key: the request IS the DTO. Hydration recurses into nested
//!   mappings for object-typed fields.
//! - A non-nullable, no-default parameter or field whose key is absent fails
//!   the bind; nothing partially constructed escapes.
//!
//! The boundary between untyped external payloads and typed internal values
//! sits exactly here. Nothing downstream re-inspects untyped data.

mod core;

pub use core::{BindError, InvocationPlan, ParameterBinder};
