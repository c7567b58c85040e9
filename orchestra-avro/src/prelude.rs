//! Prelude module for convenient imports.
//!
//! ```ignore
//! use orchestra_avro::prelude::*;
//! ```

// Repository types
pub use orchestra_avro_repository::{
    CodeSet, Component, EntityIndex, Field, Group, Member, Message, ParseError, Presence,
    Repository, parse_repository, parse_repository_file,
};

// Generation types
pub use orchestra_avro_codegen::{
    AvroType, CodegenError, DecimalRepresentation, DirectorySink, EntityKind, GenerationReport,
    Generator, GeneratorConfig, MemorySink, SchemaDocument, SchemaSink, TypeMappingMode,
    generate_files,
};
