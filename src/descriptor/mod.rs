//! # Descriptor Module
//!
//! Type classification shared by the parameter binder and the schema
//! synthesizer. Every declared parameter or field type is described by a
//! [`TypeDescriptor`]; object-shaped types are registered once in a
//! [`TypeRegistry`] as [`ObjectDef`] entries.
//!
//! ## Overview
//!
//! Two independent consumers read these tables:
//!
//! - the runtime binder, which coerces untyped payload values into typed
//!   arguments, and
//! - the offline generator, which emits a schema document describing the
//!   same types.
//!
//! Both must apply identical classification rules or the declared API
//! contract silently diverges from runtime behavior. Keeping the rules in
//! one place is the point of this module: neither consumer re-implements
//! them.
//!
//! ## Object kinds
//!
//! - [`ObjectKind::Data`] - a plain object referenced by name (request DTOs)
//! - [`ObjectKind::Content`] - a response content object with a fixed wire
//!   content type
//! - [`ObjectKind::Property`] - an inline-embedded object whose schema is
//!   expanded in place, never emitted as a named component
//! - [`ObjectKind::Container`] - a homogeneous sequence wrapper that declares
//!   its element kind as a fixed constant
//!
//! ## Required fields
//!
//! Nullability and "has a default value" are two independent facts. A field
//! is required iff it disallows null and declares no default; see
//! [`FieldDef::required`].

mod registry;
mod types;

pub use registry::TypeRegistry;
pub use types::{
    FieldDef, MediaKind, ObjectDef, ObjectKind, ResponseDef, ScalarKind, TypeDescriptor,
};
