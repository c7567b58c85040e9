//! Avro schema document model.
//!
//! Documents are plain values serialized with `serde`; the field order of
//! each struct is the key order of the rendered JSON object.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// File extension of generated schema documents.
pub const SCHEMA_EXTENSION: &str = "avsc";

/// Avro type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvroType {
    /// Primitive or named type reference, e.g. `string` or `ns.codeset.Side`.
    Name(String),
    /// Logical type layered over a base type.
    Logical {
        /// Underlying Avro type.
        base: String,
        /// Logical type name.
        logical_type: String,
        /// Auxiliary properties, values kept verbatim.
        properties: Vec<(String, String)>,
    },
    /// Union of alternatives.
    Union(Vec<AvroType>),
    /// Array of items.
    Array(Box<AvroType>),
    /// Inline record definition.
    Record(Box<RecordSchema>),
}

impl AvroType {
    /// Creates a named type reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Wraps the type in a union with `null`.
    #[must_use]
    pub fn nullable(self) -> Self {
        Self::Union(vec![Self::named("null"), self])
    }

    /// Returns the type name for named references.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }
}

impl Serialize for AvroType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Name(name) => serializer.serialize_str(name),
            Self::Logical {
                base,
                logical_type,
                properties,
            } => {
                let mut map = serializer.serialize_map(Some(2 + properties.len()))?;
                map.serialize_entry("type", base)?;
                map.serialize_entry("logicalType", logical_type)?;
                for (key, value) in properties {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Union(types) => {
                let mut seq = serializer.serialize_seq(Some(types.len()))?;
                for ty in types {
                    seq.serialize_element(ty)?;
                }
                seq.end()
            }
            Self::Array(items) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "array")?;
                map.serialize_entry("items", items)?;
                map.end()
            }
            Self::Record(record) => record.serialize(serializer),
        }
    }
}

/// Avro complex schema kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Record schema.
    Record,
    /// Enumeration schema.
    Enum,
}

/// Member of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    /// Member name.
    pub name: String,
    /// Member type.
    #[serde(rename = "type")]
    pub ty: AvroType,
    /// Default value; `Some(Null)` for optional members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl FieldSchema {
    /// Creates a required member.
    #[must_use]
    pub fn required(name: impl Into<String>, ty: AvroType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            doc: None,
        }
    }

    /// Creates an optional member typed as a union with `null`.
    #[must_use]
    pub fn optional(name: impl Into<String>, ty: AvroType) -> Self {
        Self {
            name: name.into(),
            ty: ty.nullable(),
            default: Some(serde_json::Value::Null),
            doc: None,
        }
    }

    /// Sets the documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Returns true if the member carries a null default.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self.default, Some(serde_json::Value::Null))
    }
}

/// Record schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSchema {
    /// Record name.
    pub name: String,
    /// Namespace; absent for inline records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Always [`SchemaKind::Record`].
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    /// Documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Members in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl RecordSchema {
    /// Creates an empty record.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
            kind: SchemaKind::Record,
            doc: None,
            fields: Vec::new(),
        }
    }

    /// Sets the documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Sets the members.
    #[must_use]
    pub fn with_fields(mut self, fields: Vec<FieldSchema>) -> Self {
        self.fields = fields;
        self
    }

    /// Finds a member by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Enumeration schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumSchema {
    /// Enumeration name.
    pub name: String,
    /// Namespace.
    pub namespace: String,
    /// Always [`SchemaKind::Enum`].
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    /// Documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Symbols in declaration order.
    pub symbols: Vec<String>,
    /// Symbol used by readers for unknown values.
    pub default: String,
}

/// Top-level schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Schema {
    /// Record schema.
    Record(RecordSchema),
    /// Enumeration schema.
    Enum(EnumSchema),
}

/// Kind of repository entity a document is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Code set enumeration.
    CodeSet,
    /// Field wrapper record.
    Field,
    /// Component record.
    Component,
    /// Group record.
    Group,
    /// Message record.
    Message,
}

impl EntityKind {
    /// Returns the namespace suffix and directory name of the kind.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::CodeSet => "codeset",
            Self::Field => "field",
            Self::Component => "component",
            Self::Group => "group",
            Self::Message => "message",
        }
    }

    /// Returns the namespace of documents of this kind.
    #[must_use]
    pub fn namespace(self, base: &str) -> String {
        if base.is_empty() {
            self.dir().to_string()
        } else {
            format!("{base}.{}", self.dir())
        }
    }

    /// Returns the full name of a document of this kind.
    #[must_use]
    pub fn full_name(self, base: &str, name: &str) -> String {
        crate::names::full_name(&self.namespace(base), name)
    }
}

/// One generated schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDocument {
    /// Entity kind.
    pub kind: EntityKind,
    /// Document name.
    pub name: String,
    /// Base namespace, without the kind suffix.
    pub namespace: String,
    /// Schema body.
    pub schema: Schema,
}

impl SchemaDocument {
    /// Returns `<namespace path>/<kind>/<name>.avsc`.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .namespace
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(self.kind.dir());
        path.push(format!("{}.{SCHEMA_EXTENSION}", self.name));
        path
    }

    /// Returns the full Avro name of the document.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.kind.full_name(&self.namespace, &self.name)
    }

    /// Renders the document as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn render(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.schema)
    }

    /// Returns the record body, if the document is a record.
    #[must_use]
    pub fn as_record(&self) -> Option<&RecordSchema> {
        match &self.schema {
            Schema::Record(record) => Some(record),
            Schema::Enum(_) => None,
        }
    }

    /// Returns the enumeration body, if the document is an enumeration.
    #[must_use]
    pub fn as_enum(&self) -> Option<&EnumSchema> {
        match &self.schema {
            Schema::Enum(schema) => Some(schema),
            Schema::Record(_) => None,
        }
    }
}
