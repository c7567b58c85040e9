//! # Orchestra Avro
//!
//! Apache Avro schema generation from FIX Orchestra repositories.
//!
//! A repository document is parsed, its member references are resolved and
//! split into session and application layers, and one `.avsc` document is
//! written per code set, field, component, group and message.
//!
//! ## Quick Start
//!
//! ```ignore
//! use orchestra_avro::prelude::*;
//! use std::path::Path;
//!
//! let config = GeneratorConfig::new("io.fixprotocol")
//!     .decimal_representation(DecimalRepresentation::Double);
//! let report = generate_files(
//!     Path::new("OrchestraFIXLatest.xml"),
//!     Path::new("target/generated-sources"),
//!     config,
//! )?;
//! println!("{} schemas written", report.total());
//! ```
//!
//! ## Crate Organization
//!
//! - [`repository`] - Orchestra data model, XML loader and entity index
//! - [`codegen`] - Reference resolution, type mapping and schema emission

pub mod prelude;

/// Orchestra data model and loader.
pub mod repository {
    pub use orchestra_avro_repository::*;
}

/// Avro schema generation.
pub mod codegen {
    pub use orchestra_avro_codegen::*;
}

pub use orchestra_avro_codegen::{
    CodegenError, DecimalRepresentation, GenerationReport, Generator, GeneratorConfig,
    TypeMappingMode, generate_files,
};
pub use orchestra_avro_repository::{
    ParseError, Repository, parse_repository, parse_repository_file,
};
