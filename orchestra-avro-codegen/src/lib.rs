//! # Orchestra Avro Codegen
//!
//! Apache Avro schema generation from FIX Orchestra repositories.
//!
//! This crate provides:
//! - Reference resolution and session/application partitioning
//! - FIX datatype to Avro type mapping, static or metadata driven
//! - Schema documents for code sets, fields, components, groups and messages
//! - Directory and in-memory output sinks

pub mod avro;
pub mod config;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod names;
pub mod partition;
pub mod resolver;
pub mod sink;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use avro::{AvroType, EntityKind, SchemaDocument};
pub use config::{DecimalRepresentation, GeneratorConfig, TypeMappingMode};
pub use diagnostics::{Diagnostics, MissingReference, ReferenceKind};
pub use emitter::SchemaEmitter;
pub use error::CodegenError;
pub use generator::{GenerationReport, Generator, generate_files};
pub use partition::SessionPartition;
pub use resolver::{Closure, HeaderTrailer, ReferenceResolver};
pub use sink::{DirectorySink, MemorySink, SchemaSink};
pub use types::{FixTypeCategory, TypeMapper};

/// Generates Avro schemas from an Orchestra XML string.
///
/// # Arguments
/// * `xml` - Orchestra repository content
/// * `config` - Generation options
///
/// # Returns
/// Rendered documents keyed by relative path, and the run report.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_xml(
    xml: &str,
    config: GeneratorConfig,
) -> Result<(MemorySink, GenerationReport), CodegenError> {
    let repository = orchestra_avro_repository::parse_repository(xml)?;
    let mut sink = MemorySink::new();
    let report = Generator::new(config).generate(&repository, &mut sink)?;
    Ok((sink, report))
}
