//! Generation run driver.

use crate::avro::EntityKind;
use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostics, MissingReference};
use crate::emitter::SchemaEmitter;
use crate::error::CodegenError;
use crate::partition::SessionPartition;
use crate::resolver::HeaderTrailer;
use crate::sink::{DirectorySink, SchemaSink, check_output_dir};
use crate::types::TypeMapper;
use orchestra_avro_repository::{EntityIndex, Repository, parse_repository_file};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

/// Outcome of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Resolved base namespace.
    pub namespace: String,
    /// Documents written per entity kind.
    pub documents: BTreeMap<EntityKind, usize>,
    /// Unresolved member references met during the run.
    pub missing_references: Vec<MissingReference>,
}

impl GenerationReport {
    /// Returns the number of documents written for a kind.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.documents.get(&kind).copied().unwrap_or_default()
    }

    /// Returns the total number of documents written.
    #[must_use]
    pub fn total(&self) -> usize {
        self.documents.values().sum()
    }

    fn record(&mut self, kind: EntityKind) {
        *self.documents.entry(kind).or_default() += 1;
    }
}

/// Generates Avro schemas from a repository.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates every document of a repository into a sink.
    ///
    /// Documents are written in the order code sets, fields, groups,
    /// components, messages. The standard header and trailer are never
    /// written as components. With session exclusion, only application
    /// fields are written and session groups and messages are skipped.
    ///
    /// # Errors
    /// Returns `CodegenError` if a datatype cannot be mapped or the sink
    /// fails. Missing references are reported, not returned.
    pub fn generate(
        &self,
        repository: &Repository,
        sink: &mut dyn SchemaSink,
    ) -> Result<GenerationReport, CodegenError> {
        let namespace = self.config.resolve_namespace(&repository.version);
        info!(
            repository = %repository.name,
            version = %repository.version,
            namespace = %namespace,
            "generating Avro schemas"
        );

        let index = EntityIndex::new(repository);
        let mut diagnostics = Diagnostics::new();
        let partition = SessionPartition::compute(&index, &mut diagnostics);
        let types = TypeMapper::from_config(&index, &self.config);
        debug!(metadata = types.uses_metadata(), "selected type mapping");
        let emitter = SchemaEmitter::new(&index, types, namespace.clone());

        let mut report = GenerationReport {
            namespace,
            ..GenerationReport::default()
        };
        let exclude_session = self.config.is_exclude_session();

        for code_set in index.code_sets() {
            sink.write(&emitter.code_set(code_set))?;
            report.record(EntityKind::CodeSet);
        }

        for field in index.fields() {
            if exclude_session && !partition.non_session().contains_field(field.id) {
                continue;
            }
            sink.write(&emitter.field(field)?)?;
            report.record(EntityKind::Field);
        }

        let mut emitted_groups = BTreeSet::new();
        for group in partition.non_session().groups() {
            emitted_groups.insert(group.id);
            sink.write(&emitter.group(group, HeaderTrailer::Skip, &mut diagnostics)?)?;
            report.record(EntityKind::Group);
        }
        if !exclude_session {
            for group in partition.session().groups() {
                if !emitted_groups.insert(group.id) {
                    continue;
                }
                sink.write(&emitter.group(group, HeaderTrailer::Include, &mut diagnostics)?)?;
                report.record(EntityKind::Group);
            }
        }

        for component in index.components().filter(|c| !c.is_header_or_trailer()) {
            sink.write(&emitter.component(component, &mut diagnostics)?)?;
            report.record(EntityKind::Component);
        }

        for message in partition.non_session_messages() {
            sink.write(&emitter.message(message, HeaderTrailer::Skip, &mut diagnostics)?)?;
            report.record(EntityKind::Message);
        }
        if !exclude_session {
            for message in partition.session_messages() {
                sink.write(&emitter.message(message, HeaderTrailer::Include, &mut diagnostics)?)?;
                report.record(EntityKind::Message);
            }
        }

        report.missing_references = diagnostics.into_missing_references();
        info!(
            documents = report.total(),
            missing_references = report.missing_references.len(),
            "generation complete"
        );
        Ok(report)
    }
}

/// Generates schema files from a repository file into a directory.
///
/// The input must be an existing file and the output, if it exists, a
/// directory. The output root is created only once the input has parsed.
///
/// # Errors
/// Returns `CodegenError` if validation, parsing or generation fails.
pub fn generate_files(
    input: &Path,
    output: &Path,
    config: GeneratorConfig,
) -> Result<GenerationReport, CodegenError> {
    if !input.is_file() {
        return Err(CodegenError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    check_output_dir(output)?;

    let repository = parse_repository_file(input)?;
    let mut sink = DirectorySink::create(output)?;
    Generator::new(config).generate(&repository, &mut sink)
}
