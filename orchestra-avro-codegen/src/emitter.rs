//! Schema document rendering.
//!
//! Each repository entity becomes one self-contained document. Members that
//! reference other entities are typed by the full name of the referenced
//! document; only the entries of a group are defined inline.

use crate::avro::{
    AvroType, EntityKind, EnumSchema, FieldSchema, RecordSchema, Schema, SchemaDocument,
    SchemaKind,
};
use crate::diagnostics::{Diagnostics, ReferenceKind};
use crate::error::CodegenError;
use crate::names::{to_screaming_snake_case, to_title_case};
use crate::resolver::HeaderTrailer;
use crate::types::TypeMapper;
use orchestra_avro_repository::{
    Annotation, CodeSet, Component, EntityIndex, Field, Group, Member, MemberRef, Message,
};
use tracing::debug;

/// Prefix of the synthesized catch-all enumeration symbol.
pub const UNKNOWN_SYMBOL_PREFIX: &str = "UNKNOWN_";

/// Name of the single member of a field record.
pub const FIELD_VALUE_MEMBER: &str = "value";

/// Renders repository entities as Avro schema documents.
pub struct SchemaEmitter<'i, 'a> {
    index: &'i EntityIndex<'a>,
    types: TypeMapper<'i, 'a>,
    namespace: String,
}

impl<'i, 'a> SchemaEmitter<'i, 'a> {
    /// Creates an emitter for a resolved base namespace.
    #[must_use]
    pub fn new(
        index: &'i EntityIndex<'a>,
        types: TypeMapper<'i, 'a>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            index,
            types,
            namespace: namespace.into(),
        }
    }

    /// Returns the base namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Renders a code set as an enumeration.
    ///
    /// The symbols are the code names followed by an `UNKNOWN_` symbol,
    /// which is also the reader default.
    #[must_use]
    pub fn code_set(&self, code_set: &CodeSet) -> SchemaDocument {
        let name = to_title_case(&code_set.name);
        let unknown = format!(
            "{UNKNOWN_SYMBOL_PREFIX}{}",
            to_screaming_snake_case(&code_set.name)
        );

        let mut symbols: Vec<String> = code_set.codes.iter().map(|c| c.name.clone()).collect();
        symbols.push(unknown.clone());

        let doc = join_docs(code_set.annotation.texts(), ",");
        debug!(code_set = %name, symbols = symbols.len(), "emitting code set");

        self.document(
            EntityKind::CodeSet,
            name.clone(),
            Schema::Enum(EnumSchema {
                name,
                namespace: EntityKind::CodeSet.namespace(&self.namespace),
                kind: SchemaKind::Enum,
                doc: (!doc.is_empty()).then_some(doc),
                symbols,
                default: unknown,
            }),
        )
    }

    /// Renders a field as a record wrapping a single `value` member.
    ///
    /// # Errors
    /// Returns `CodegenError::MissingDatatype` if the datatype cannot be mapped.
    pub fn field(&self, field: &Field) -> Result<SchemaDocument, CodegenError> {
        let name = to_title_case(&field.name);
        let ty = self.field_type(field)?;

        let docs = std::iter::once(format!("FIX datatype : {}", field.type_name.trim()))
            .chain(field.annotation.texts());
        let record = self
            .record(EntityKind::Field, &name)
            .with_doc(join_docs(docs, ","))
            .with_fields(vec![FieldSchema::required(FIELD_VALUE_MEMBER, ty)]);

        debug!(field = %name, tag = field.id, "emitting field");
        Ok(self.document(EntityKind::Field, name, Schema::Record(record)))
    }

    /// Renders a component as a record of its members.
    ///
    /// # Errors
    /// Returns `CodegenError::MissingDatatype` if a member datatype cannot be mapped.
    pub fn component(
        &self,
        component: &Component,
        diagnostics: &mut Diagnostics,
    ) -> Result<SchemaDocument, CodegenError> {
        let name = to_title_case(&component.name);
        let fields = self.member_fields(
            &component.name,
            &component.members,
            HeaderTrailer::Skip,
            diagnostics,
        )?;
        let record = self
            .record(EntityKind::Component, &name)
            .with_doc(join_docs(component.annotation.texts(), ","))
            .with_fields(fields);

        debug!(component = %name, members = record.fields.len(), "emitting component");
        Ok(self.document(EntityKind::Component, name, Schema::Record(record)))
    }

    /// Renders a group as a record holding an array of entry records.
    ///
    /// The single member is named after the group; its items are an inline
    /// record `<Name>Entry` with the group's own members.
    ///
    /// # Errors
    /// Returns `CodegenError::MissingDatatype` if a member datatype cannot be mapped.
    pub fn group(
        &self,
        group: &Group,
        header_trailer: HeaderTrailer,
        diagnostics: &mut Diagnostics,
    ) -> Result<SchemaDocument, CodegenError> {
        let name = to_title_case(&group.name);
        let entry_fields =
            self.member_fields(&group.name, &group.members, header_trailer, diagnostics)?;
        let entry = RecordSchema::new(format!("{name}Entry"), None).with_fields(entry_fields);

        let record = self
            .record(EntityKind::Group, &name)
            .with_doc(join_docs(group.annotation.texts(), ","))
            .with_fields(vec![FieldSchema::required(
                name.clone(),
                AvroType::Array(Box::new(AvroType::Record(Box::new(entry)))),
            )]);

        debug!(group = %name, "emitting group");
        Ok(self.document(EntityKind::Group, name, Schema::Record(record)))
    }

    /// Renders a message as a record of its members.
    ///
    /// # Errors
    /// Returns `CodegenError::MissingDatatype` if a member datatype cannot be mapped.
    pub fn message(
        &self,
        message: &Message,
        header_trailer: HeaderTrailer,
        diagnostics: &mut Diagnostics,
    ) -> Result<SchemaDocument, CodegenError> {
        let name = to_title_case(&message.name);
        let fields =
            self.member_fields(&message.name, &message.members, header_trailer, diagnostics)?;
        let record = self
            .record(EntityKind::Message, &name)
            .with_doc(join_docs(message.annotation.texts(), ","))
            .with_fields(fields);

        debug!(message = %name, msg_type = ?message.msg_type, "emitting message");
        Ok(self.document(EntityKind::Message, name, Schema::Record(record)))
    }

    /// Converts a member list into record members, one level deep.
    ///
    /// Header and trailer references are flattened into the list when
    /// `header_trailer` includes them and dropped otherwise. Unresolved
    /// references are recorded and skipped.
    ///
    /// # Errors
    /// Returns `CodegenError::MissingDatatype` if a member datatype cannot be mapped.
    pub fn member_fields(
        &self,
        context: &str,
        members: &[Member],
        header_trailer: HeaderTrailer,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<FieldSchema>, CodegenError> {
        let mut fields = Vec::with_capacity(members.len());

        for member in members {
            match member {
                Member::Field(r) => {
                    let Some(field) = self.index.field(r.id) else {
                        diagnostics.missing(ReferenceKind::Field, r.id, context);
                        continue;
                    };
                    let ty = self.field_type(field)?;
                    let docs = r
                        .annotation
                        .texts()
                        .chain(std::iter::once(format!("FIX datatype : {}", field.type_name)))
                        .chain(field.annotation.texts());
                    fields.push(member_schema(r, &field.name, ty, join_docs(docs, ", ")));
                }
                Member::Group(r) => {
                    let Some(group) = self.index.group(r.id) else {
                        diagnostics.missing(ReferenceKind::Group, r.id, context);
                        continue;
                    };
                    let ty = self.reference(EntityKind::Group, &group.name);
                    let doc = reference_doc(r, "Group", &group.name, &group.annotation);
                    fields.push(member_schema(r, &group.name, ty, doc));
                }
                Member::Component(r) => {
                    let Some(component) = self.index.component(r.id) else {
                        diagnostics.missing(ReferenceKind::Component, r.id, context);
                        continue;
                    };
                    if component.is_header_or_trailer() {
                        if header_trailer.is_included() {
                            fields.extend(self.member_fields(
                                &component.name,
                                &component.members,
                                HeaderTrailer::Skip,
                                diagnostics,
                            )?);
                        }
                        continue;
                    }
                    let ty = self.reference(EntityKind::Component, &component.name);
                    let doc =
                        reference_doc(r, "Component", &component.name, &component.annotation);
                    fields.push(member_schema(r, &component.name, ty, doc));
                }
            }
        }

        Ok(fields)
    }

    /// Returns the type of a field: its code set reference or mapped datatype.
    fn field_type(&self, field: &Field) -> Result<AvroType, CodegenError> {
        match self.index.code_set(&field.type_name) {
            Some(code_set) => Ok(self.reference(EntityKind::CodeSet, &code_set.name)),
            None => self.types.map(&field.name, &field.type_name),
        }
    }

    fn reference(&self, kind: EntityKind, name: &str) -> AvroType {
        AvroType::Name(kind.full_name(&self.namespace, &to_title_case(name)))
    }

    fn record(&self, kind: EntityKind, name: &str) -> RecordSchema {
        RecordSchema::new(name, Some(kind.namespace(&self.namespace)))
    }

    fn document(&self, kind: EntityKind, name: String, schema: Schema) -> SchemaDocument {
        SchemaDocument {
            kind,
            name,
            namespace: self.namespace.clone(),
            schema,
        }
    }
}

fn member_schema(reference: &MemberRef, name: &str, ty: AvroType, doc: String) -> FieldSchema {
    let name = to_title_case(name);
    let field = if reference.presence.is_optional() {
        FieldSchema::optional(name, ty)
    } else {
        FieldSchema::required(name, ty)
    };
    field.with_doc(doc)
}

fn reference_doc(
    reference: &MemberRef,
    marker: &str,
    name: &str,
    annotation: &Annotation,
) -> String {
    let docs = reference
        .annotation
        .texts()
        .chain(std::iter::once(format!("{marker} : {name}")))
        .chain(annotation.texts());
    join_docs(docs, ",")
}

fn join_docs(docs: impl Iterator<Item = String>, separator: &str) -> String {
    docs.collect::<Vec<_>>().join(separator).trim().to_string()
}
