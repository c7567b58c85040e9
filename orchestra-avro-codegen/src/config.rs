//! Generation options.

use crate::names::version_namespace_suffix;

/// Default name of the Avro standard in datatype mappings.
pub const DEFAULT_AVRO_STANDARD: &str = "AVRO_V1";

/// Avro representation of FIX decimal datatypes in the static mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalRepresentation {
    /// Decimals are carried as strings.
    #[default]
    String,
    /// Decimals are carried as IEEE doubles.
    Double,
}

impl DecimalRepresentation {
    /// Returns the Avro primitive name.
    #[must_use]
    pub const fn avro_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Double => "double",
        }
    }

    /// Selects the representation from the `generateStringForDecimal` flag.
    #[must_use]
    pub const fn from_string_flag(generate_string: bool) -> Self {
        if generate_string {
            Self::String
        } else {
            Self::Double
        }
    }
}

/// Strategy used to map FIX datatypes to Avro types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeMappingMode {
    /// Use datatype metadata when the repository declares Avro mappings.
    #[default]
    Auto,
    /// Always use the static mapping table.
    Static,
    /// Always use datatype metadata.
    Metadata,
}

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    namespace: String,
    decimal_representation: DecimalRepresentation,
    exclude_session: bool,
    append_repository_version: bool,
    avro_standard: String,
    type_mapping: TypeMappingMode,
}

impl GeneratorConfig {
    /// Creates a configuration with default options for a base namespace.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            decimal_representation: DecimalRepresentation::default(),
            exclude_session: false,
            append_repository_version: true,
            avro_standard: DEFAULT_AVRO_STANDARD.to_string(),
            type_mapping: TypeMappingMode::default(),
        }
    }

    /// Sets the decimal representation.
    #[must_use]
    pub fn decimal_representation(mut self, representation: DecimalRepresentation) -> Self {
        self.decimal_representation = representation;
        self
    }

    /// Excludes session-layer messages, groups and fields.
    #[must_use]
    pub fn exclude_session(mut self, exclude: bool) -> Self {
        self.exclude_session = exclude;
        self
    }

    /// Appends the repository version to the namespace.
    #[must_use]
    pub fn append_repository_version(mut self, append: bool) -> Self {
        self.append_repository_version = append;
        self
    }

    /// Sets the standard name looked up in datatype mappings.
    #[must_use]
    pub fn avro_standard(mut self, standard: impl Into<String>) -> Self {
        self.avro_standard = standard.into();
        self
    }

    /// Sets the type mapping strategy.
    #[must_use]
    pub fn type_mapping(mut self, mode: TypeMappingMode) -> Self {
        self.type_mapping = mode;
        self
    }

    /// Returns the configured base namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the decimal representation.
    #[must_use]
    pub const fn decimal(&self) -> DecimalRepresentation {
        self.decimal_representation
    }

    /// Returns true if session-layer output is suppressed.
    #[must_use]
    pub const fn is_exclude_session(&self) -> bool {
        self.exclude_session
    }

    /// Returns true if the repository version is appended to the namespace.
    #[must_use]
    pub const fn is_append_repository_version(&self) -> bool {
        self.append_repository_version
    }

    /// Returns the Avro standard name.
    #[must_use]
    pub fn standard(&self) -> &str {
        &self.avro_standard
    }

    /// Returns the type mapping strategy.
    #[must_use]
    pub const fn mapping_mode(&self) -> TypeMappingMode {
        self.type_mapping
    }

    /// Returns the base namespace for a repository version.
    ///
    /// When version appending is enabled the version is reduced to
    /// lower case without dots and extension-pack suffix, so
    /// `FIX.5.0SP2_EP254` yields `<namespace>.fix50sp2`.
    #[must_use]
    pub fn resolve_namespace(&self, repository_version: &str) -> String {
        if !self.append_repository_version {
            return self.namespace.clone();
        }
        match version_namespace_suffix(repository_version) {
            Some(suffix) if self.namespace.is_empty() => suffix,
            Some(suffix) => format!("{}.{}", self.namespace, suffix),
            None => self.namespace.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeneratorConfig::new("io.fixprotocol");
        assert_eq!(config.namespace(), "io.fixprotocol");
        assert_eq!(config.decimal(), DecimalRepresentation::String);
        assert!(!config.is_exclude_session());
        assert!(config.is_append_repository_version());
        assert_eq!(config.standard(), "AVRO_V1");
        assert_eq!(config.mapping_mode(), TypeMappingMode::Auto);
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::new("ns")
            .decimal_representation(DecimalRepresentation::Double)
            .exclude_session(true)
            .append_repository_version(false)
            .avro_standard("AVRO_V2")
            .type_mapping(TypeMappingMode::Static);
        assert_eq!(config.decimal(), DecimalRepresentation::Double);
        assert!(config.is_exclude_session());
        assert!(!config.is_append_repository_version());
        assert_eq!(config.standard(), "AVRO_V2");
        assert_eq!(config.mapping_mode(), TypeMappingMode::Static);
    }

    #[test]
    fn test_decimal_representation_from_flag() {
        assert_eq!(
            DecimalRepresentation::from_string_flag(true).avro_type(),
            "string"
        );
        assert_eq!(
            DecimalRepresentation::from_string_flag(false).avro_type(),
            "double"
        );
    }

    #[test]
    fn test_resolve_namespace_appends_version() {
        let config = GeneratorConfig::new("io.fixprotocol");
        assert_eq!(
            config.resolve_namespace("FIX.5.0SP2_EP254"),
            "io.fixprotocol.fix50sp2"
        );
        assert_eq!(config.resolve_namespace("FIX.4.4"), "io.fixprotocol.fix44");
        assert_eq!(config.resolve_namespace(""), "io.fixprotocol");
    }

    #[test]
    fn test_resolve_namespace_without_version() {
        let config = GeneratorConfig::new("io.fixprotocol").append_repository_version(false);
        assert_eq!(config.resolve_namespace("FIX.5.0SP2_EP254"), "io.fixprotocol");
    }
}
