//! # Orchestra Avro Repository
//!
//! FIX Orchestra repository model and loader.
//!
//! This crate provides:
//! - XML parsing of Orchestra repository documents
//! - Read-only entity records (fields, code sets, components, groups, messages)
//! - An entity index keyed by identifier or name

pub mod error;
pub mod index;
pub mod messages;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use index::EntityIndex;
pub use messages::{
    Component, Group, Member, MemberRef, Message, Presence, STANDARD_HEADER_ID,
    STANDARD_TRAILER_ID, SESSION_CATEGORY,
};
pub use parser::{parse_repository, parse_repository_file};
pub use types::{
    Annotation, Category, Code, CodeSet, Datatype, Field, KeyValue, LogicalType, MappedDatatype,
    Repository, Section,
};
