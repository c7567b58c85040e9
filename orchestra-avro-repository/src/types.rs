//! Repository entity definitions.
//!
//! This module contains the read-only records loaded from an Orchestra
//! repository: datatypes, code sets, fields, categories and sections.
//! Structural entities (components, groups, messages) live in
//! [`crate::messages`].

use crate::messages::{Component, Group, Message};

/// Complete Orchestra repository.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    /// Repository name (e.g. `FIX.Latest`).
    pub name: String,
    /// Repository version (e.g. `FIX.5.0SP2_EP254`).
    pub version: String,
    /// Datatype definitions.
    pub datatypes: Vec<Datatype>,
    /// Code set definitions.
    pub code_sets: Vec<CodeSet>,
    /// Field definitions.
    pub fields: Vec<Field>,
    /// Component definitions.
    pub components: Vec<Component>,
    /// Repeating group definitions.
    pub groups: Vec<Group>,
    /// Message definitions.
    pub messages: Vec<Message>,
    /// Message categories.
    pub categories: Vec<Category>,
    /// Sections grouping categories.
    pub sections: Vec<Section>,
}

impl Repository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }
}

/// Documentation attached to an entity or member reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Documentation strings in document order.
    pub documentation: Vec<String>,
}

impl Annotation {
    /// Creates an annotation from documentation strings.
    #[must_use]
    pub fn new<I, S>(documentation: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            documentation: documentation.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if there is no documentation text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documentation.iter().all(|d| d.trim().is_empty())
    }

    /// Adds a documentation string.
    pub fn push(&mut self, text: impl Into<String>) {
        self.documentation.push(text.into());
    }

    /// Iterates over documentation strings with whitespace collapsed.
    ///
    /// Empty entries are skipped.
    pub fn texts(&self) -> impl Iterator<Item = String> + '_ {
        self.documentation
            .iter()
            .map(|d| d.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|d| !d.is_empty())
    }
}

/// FIX datatype definition.
#[derive(Debug, Clone)]
pub struct Datatype {
    /// Datatype name (e.g. `Price`).
    pub name: String,
    /// FIX base type this datatype derives from (e.g. `float`).
    pub base_type: Option<String>,
    /// Mappings to other encoding standards.
    pub mappings: Vec<MappedDatatype>,
    /// Documentation.
    pub annotation: Annotation,
}

impl Datatype {
    /// Creates a new datatype.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_type: None,
            mappings: Vec::new(),
            annotation: Annotation::default(),
        }
    }

    /// Finds the mapping declared for an encoding standard.
    #[must_use]
    pub fn mapping_for(&self, standard: &str) -> Option<&MappedDatatype> {
        self.mappings.iter().find(|m| m.standard == standard)
    }
}

/// Mapping of a FIX datatype to another encoding standard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedDatatype {
    /// Standard name (e.g. `XML`, `AVRO_V1`).
    pub standard: String,
    /// Base type in the target standard.
    pub base: Option<String>,
    /// Logical type carried in the mapping extension.
    pub extension: Option<LogicalType>,
}

impl MappedDatatype {
    /// Creates a mapping without extension.
    #[must_use]
    pub fn new(standard: impl Into<String>, base: Option<String>) -> Self {
        Self {
            standard: standard.into(),
            base,
            extension: None,
        }
    }
}

/// Logical type annotation layered over a base type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalType {
    /// Logical type name (e.g. `decimal`, `date`).
    pub name: String,
    /// Auxiliary properties in declaration order.
    pub key_values: Vec<KeyValue>,
}

impl LogicalType {
    /// Creates a logical type without properties.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_values: Vec::new(),
        }
    }

    /// Adds a property.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_values.push(KeyValue {
            key: key.into(),
            value: value.into(),
        });
        self
    }
}

/// Key/value property of a logical type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Property key.
    pub key: String,
    /// Property value, kept verbatim.
    pub value: String,
}

/// Code set (enumeration) definition.
#[derive(Debug, Clone)]
pub struct CodeSet {
    /// Code set name; fields of this type are enumerated.
    pub name: String,
    /// Code set identifier.
    pub id: Option<u32>,
    /// Underlying FIX datatype.
    pub type_name: String,
    /// Codes in declaration order.
    pub codes: Vec<Code>,
    /// Documentation.
    pub annotation: Annotation,
}

impl CodeSet {
    /// Creates a new empty code set.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            type_name: type_name.into(),
            codes: Vec::new(),
            annotation: Annotation::default(),
        }
    }

    /// Adds a code.
    pub fn add_code(&mut self, code: Code) {
        self.codes.push(code);
    }
}

/// Single code of a code set.
#[derive(Debug, Clone)]
pub struct Code {
    /// Symbolic name.
    pub name: String,
    /// Wire value.
    pub value: String,
    /// Code identifier.
    pub id: Option<u32>,
    /// Documentation.
    pub annotation: Annotation,
}

impl Code {
    /// Creates a new code.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            id: None,
            annotation: Annotation::default(),
        }
    }
}

/// Field definition.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field tag.
    pub id: u32,
    /// Field name.
    pub name: String,
    /// FIX datatype name or code set name.
    pub type_name: String,
    /// Documentation.
    pub annotation: Annotation,
}

impl Field {
    /// Creates a new field.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            type_name: type_name.into(),
            annotation: Annotation::default(),
        }
    }
}

/// Message category.
#[derive(Debug, Clone)]
pub struct Category {
    /// Category name.
    pub name: String,
    /// Section the category belongs to.
    pub section: Option<String>,
    /// Documentation.
    pub annotation: Annotation,
}

/// Section grouping categories.
#[derive(Debug, Clone)]
pub struct Section {
    /// Section name.
    pub name: String,
    /// Documentation.
    pub annotation: Annotation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_texts_collapse_whitespace() {
        let annotation = Annotation::new(["  Unique\n   identifier  ", "   ", "of order"]);
        let texts: Vec<String> = annotation.texts().collect();
        assert_eq!(texts, vec!["Unique identifier", "of order"]);
    }

    #[test]
    fn test_annotation_is_empty() {
        assert!(Annotation::default().is_empty());
        assert!(Annotation::new([" \n "]).is_empty());
        assert!(!Annotation::new(["text"]).is_empty());
    }

    #[test]
    fn test_datatype_mapping_for() {
        let mut datatype = Datatype::new("Price");
        datatype
            .mappings
            .push(MappedDatatype::new("XML", Some("xs:decimal".to_string())));
        datatype
            .mappings
            .push(MappedDatatype::new("AVRO_V1", Some("double".to_string())));

        let mapping = datatype.mapping_for("AVRO_V1").expect("mapping");
        assert_eq!(mapping.base.as_deref(), Some("double"));
        assert!(datatype.mapping_for("JSON").is_none());
    }

    #[test]
    fn test_logical_type_with_preserves_order() {
        let logical = LogicalType::new("decimal")
            .with("scale", "2")
            .with("precision", "4");
        let keys: Vec<&str> = logical.key_values.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["scale", "precision"]);
    }
}
