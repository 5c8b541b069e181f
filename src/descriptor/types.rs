use serde_json::Value;

/// Scalar kinds a declared type can resolve to.
///
/// `Array` is the untyped sequence kind: a value that is a sequence (or
/// mapping) of unclassified elements. Typed sequences are modeled as
/// [`ObjectKind::Container`] wrappers instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Float,
    Str,
    Bool,
    Array,
}

impl ScalarKind {
    /// Schema type name for this kind, as it appears in generated documents.
    ///
    /// Untyped sequences have no dedicated schema representation and degrade
    /// to `string`, matching the generator's "never fail on unknowns" posture.
    #[must_use]
    pub fn schema_type(&self) -> &'static str {
        match self {
            ScalarKind::Int => "integer",
            ScalarKind::Float => "number",
            ScalarKind::Bool => "boolean",
            ScalarKind::Str | ScalarKind::Array => "string",
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ScalarKind::Int => "int",
            ScalarKind::Float => "float",
            ScalarKind::Str => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::Array => "array",
        };
        write!(f, "{}", s)
    }
}

/// Classification of a declared parameter or field type.
///
/// `Object` carries the registered type name and is resolved through the
/// [`super::TypeRegistry`]. `Unknown` stands in for declarations the
/// classifier cannot analyze; consumers treat it leniently (bind by name,
/// schema `string`) rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    Nullable(Box<TypeDescriptor>),
    Object(String),
    Unknown,
}

impl TypeDescriptor {
    #[must_use]
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeDescriptor::Scalar(kind)
    }

    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        TypeDescriptor::Object(name.into())
    }

    /// Wrap this descriptor in a nullable marker.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            TypeDescriptor::Nullable(_) => self,
            other => TypeDescriptor::Nullable(Box::new(other)),
        }
    }

    /// Whether a null (or absent) value is acceptable for this type.
    ///
    /// Unclassifiable types allow null: an unknown declaration must not make
    /// a field required.
    #[must_use]
    pub fn allows_null(&self) -> bool {
        matches!(self, TypeDescriptor::Nullable(_) | TypeDescriptor::Unknown)
    }

    /// The descriptor with any nullable marker stripped.
    #[must_use]
    pub fn base(&self) -> &TypeDescriptor {
        match self {
            TypeDescriptor::Nullable(inner) => inner.base(),
            other => other,
        }
    }
}

/// Wire media kinds for response content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Plain,
    Json,
}

impl MediaKind {
    /// The `Content-Type` header value for this media kind.
    #[must_use]
    pub fn mime(&self) -> &'static str {
        match self {
            MediaKind::Plain => "text/plain",
            MediaKind::Json => "application/json",
        }
    }
}

/// The shape category of a registered object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Plain object referenced by name (request DTOs).
    Data,
    /// Response content object with a fixed wire content type.
    Content(MediaKind),
    /// Inline-embedded object; expanded in place, never a named component.
    Property,
    /// Homogeneous sequence wrapper declaring its element kind.
    Container(ScalarKind),
}

/// A declared public field of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeDescriptor,
    pub has_default: bool,
}

impl FieldDef {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: false,
        }
    }

    /// Mark the field as carrying a declared default value.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// A field is required iff it disallows null and declares no default.
    ///
    /// This rule is shared verbatim between the binder (missing-property
    /// failures) and the generator (`required` lists).
    #[must_use]
    pub fn required(&self) -> bool {
        !self.ty.allows_null() && !self.has_default
    }
}

/// A registered object type: its name, shape category, and public fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDef {
    pub name: String,
    pub kind: ObjectKind,
    pub fields: Vec<FieldDef>,
}

impl ObjectDef {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn field_named(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A response variant: status, description, and optional content type name.
///
/// Status and description are fixed per variant, declared once here and
/// mirrored by associated constants on the variant type itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDef {
    pub name: String,
    pub status: u16,
    pub description: String,
    pub content: Option<String>,
}

impl ResponseDef {
    #[must_use]
    pub fn new(name: impl Into<String>, status: u16, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            description: description.into(),
            content: None,
        }
    }

    /// Name the content object this response carries.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Default value carried by a parameter declaration.
pub type DefaultValue = Value;
