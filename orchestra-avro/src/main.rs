//! Orchestra to Avro schema generator CLI.
//!
//! Reads a FIX Orchestra repository and writes one Avro schema per code set,
//! field, component, group and message below the output directory.

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use orchestra_avro::{DecimalRepresentation, GeneratorConfig, TypeMappingMode, generate_files};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "orchestra-avro")]
#[command(about = "Generate Apache Avro schemas from a FIX Orchestra repository")]
struct Cli {
    /// Orchestra repository file
    #[arg(short = 'i', long)]
    orchestra_file: PathBuf,

    /// Root directory of generated schemas
    #[arg(short, long, default_value = "target/generated-sources")]
    output_dir: PathBuf,

    /// Base namespace of generated schemas
    #[arg(short, long)]
    namespace: String,

    /// Carry price, amount and quantity types as strings instead of doubles
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    generate_string_for_decimal: bool,

    /// Append the repository version to the namespace
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    append_repo_fix_version_to_namespace: bool,

    /// Skip session-layer messages, groups and fields
    #[arg(long)]
    exclude_session: bool,

    /// Standard name of Avro datatype mappings in the repository
    #[arg(long, default_value = "AVRO_V1")]
    avro_standard: String,

    /// Datatype mapping strategy
    #[arg(long, value_enum, default_value_t = MappingArg::Auto)]
    type_mapping: MappingArg,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MappingArg {
    Auto,
    Static,
    Metadata,
}

impl From<MappingArg> for TypeMappingMode {
    fn from(arg: MappingArg) -> Self {
        match arg {
            MappingArg::Auto => Self::Auto,
            MappingArg::Static => Self::Static,
            MappingArg::Metadata => Self::Metadata,
        }
    }
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new(&self.namespace)
            .decimal_representation(DecimalRepresentation::from_string_flag(
                self.generate_string_for_decimal,
            ))
            .append_repository_version(self.append_repo_fix_version_to_namespace)
            .exclude_session(self.exclude_session)
            .avro_standard(&self.avro_standard)
            .type_mapping(self.type_mapping.into())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let report = generate_files(&cli.orchestra_file, &cli.output_dir, cli.config())
        .with_context(|| {
            format!(
                "failed to generate schemas from {}",
                cli.orchestra_file.display()
            )
        })?;

    info!(
        namespace = %report.namespace,
        documents = report.total(),
        missing_references = report.missing_references.len(),
        output = %cli.output_dir.display(),
        "schemas written"
    );
    Ok(())
}
