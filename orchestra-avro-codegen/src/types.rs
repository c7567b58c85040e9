//! FIX datatype to Avro type mapping.
//!
//! Both strategies share one classification of FIX datatype names. The
//! static strategy maps each category to a fixed Avro primitive; the
//! metadata strategy honours the repository's declared Avro mappings and
//! falls back to the category when a datatype declares none.

use crate::avro::AvroType;
use crate::config::{DecimalRepresentation, GeneratorConfig, TypeMappingMode};
use crate::error::CodegenError;
use orchestra_avro_repository::{Datatype, EntityIndex};

/// Classification of FIX datatype names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixTypeCategory {
    /// `float`.
    Float,
    /// `int`.
    Int,
    /// Price, amount and quantity types.
    Decimal,
    /// Counters, sequence numbers, lengths and tags.
    Counting,
    /// `Percentage`.
    Percentage,
    /// `Boolean`.
    Boolean,
    /// Characters, strings, timestamps and anything unknown.
    Text,
}

impl FixTypeCategory {
    /// Classifies a FIX datatype name. Matching is case-sensitive.
    #[must_use]
    pub fn classify(type_name: &str) -> Self {
        match type_name {
            "float" => Self::Float,
            "int" => Self::Int,
            "Price" | "Amt" | "Qty" | "PriceOffset" => Self::Decimal,
            "NumInGroup" | "SeqNum" | "Length" | "TagNum" | "DayOfMonth" => Self::Counting,
            "Percentage" => Self::Percentage,
            "Boolean" => Self::Boolean,
            _ => Self::Text,
        }
    }

    /// Returns the Avro primitive of the static table.
    #[must_use]
    pub const fn static_type(self, decimal: DecimalRepresentation) -> &'static str {
        match self {
            Self::Float | Self::Decimal => decimal.avro_type(),
            Self::Int | Self::Counting => "int",
            Self::Percentage => "double",
            Self::Boolean => "boolean",
            Self::Text => "string",
        }
    }
}

/// Active mapping strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Strategy {
    Static,
    Metadata { standard: String },
}

/// Maps FIX datatypes of fields to Avro types.
#[derive(Debug, Clone)]
pub struct TypeMapper<'i, 'a> {
    index: &'i EntityIndex<'a>,
    decimal: DecimalRepresentation,
    strategy: Strategy,
}

impl<'i, 'a> TypeMapper<'i, 'a> {
    /// Creates a mapper using the static table.
    #[must_use]
    pub fn with_static_table(index: &'i EntityIndex<'a>, decimal: DecimalRepresentation) -> Self {
        Self {
            index,
            decimal,
            strategy: Strategy::Static,
        }
    }

    /// Creates a mapper using declared mappings of an encoding standard.
    #[must_use]
    pub fn with_metadata(
        index: &'i EntityIndex<'a>,
        decimal: DecimalRepresentation,
        standard: impl Into<String>,
    ) -> Self {
        Self {
            index,
            decimal,
            strategy: Strategy::Metadata {
                standard: standard.into(),
            },
        }
    }

    /// Creates the mapper selected by a configuration.
    ///
    /// In [`TypeMappingMode::Auto`] the metadata strategy is used when any
    /// datatype declares a mapping for the configured standard.
    #[must_use]
    pub fn from_config(index: &'i EntityIndex<'a>, config: &GeneratorConfig) -> Self {
        let standard = config.standard();
        let use_metadata = match config.mapping_mode() {
            TypeMappingMode::Static => false,
            TypeMappingMode::Metadata => true,
            TypeMappingMode::Auto => index
                .datatypes()
                .any(|d| d.mapping_for(standard).is_some()),
        };

        if use_metadata {
            Self::with_metadata(index, config.decimal(), standard)
        } else {
            Self::with_static_table(index, config.decimal())
        }
    }

    /// Returns true if declared datatype mappings are used.
    #[must_use]
    pub fn uses_metadata(&self) -> bool {
        matches!(self.strategy, Strategy::Metadata { .. })
    }

    /// Maps the datatype of a field.
    ///
    /// # Arguments
    /// * `field` - Field name, used in errors
    /// * `type_name` - FIX datatype name of the field
    ///
    /// # Errors
    /// Returns `CodegenError::MissingDatatype` when the metadata strategy is
    /// active and the repository does not define `type_name`.
    pub fn map(&self, field: &str, type_name: &str) -> Result<AvroType, CodegenError> {
        match &self.strategy {
            Strategy::Static => Ok(AvroType::named(
                FixTypeCategory::classify(type_name).static_type(self.decimal),
            )),
            Strategy::Metadata { standard } => {
                let datatype = self
                    .index
                    .datatype(type_name)
                    .ok_or_else(|| CodegenError::missing_datatype(field, type_name))?;
                Ok(self.map_declared(datatype, standard))
            }
        }
    }

    fn map_declared(&self, datatype: &Datatype, standard: &str) -> AvroType {
        let Some(mapping) = datatype.mapping_for(standard) else {
            return AvroType::named(self.fallback(datatype));
        };
        let base = mapping
            .base
            .clone()
            .unwrap_or_else(|| self.fallback(datatype));

        match &mapping.extension {
            Some(logical) => AvroType::Logical {
                base,
                logical_type: logical.name.clone(),
                properties: logical
                    .key_values
                    .iter()
                    .map(|kv| (kv.key.clone(), kv.value.clone()))
                    .collect(),
            },
            None => AvroType::Name(base),
        }
    }

    fn fallback(&self, datatype: &Datatype) -> String {
        let category = FixTypeCategory::classify(&datatype.name);
        match category {
            FixTypeCategory::Float | FixTypeCategory::Int => datatype.name.clone(),
            FixTypeCategory::Decimal | FixTypeCategory::Counting | FixTypeCategory::Percentage => {
                datatype
                    .base_type
                    .clone()
                    .unwrap_or_else(|| category.static_type(self.decimal).to_string())
            }
            FixTypeCategory::Boolean | FixTypeCategory::Text => {
                category.static_type(self.decimal).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::trading_repository;
    use orchestra_avro_repository::Repository;

    #[test]
    fn test_classify() {
        assert_eq!(FixTypeCategory::classify("Price"), FixTypeCategory::Decimal);
        assert_eq!(FixTypeCategory::classify("PriceOffset"), FixTypeCategory::Decimal);
        assert_eq!(FixTypeCategory::classify("DayOfMonth"), FixTypeCategory::Counting);
        assert_eq!(FixTypeCategory::classify("Boolean"), FixTypeCategory::Boolean);
        assert_eq!(FixTypeCategory::classify("UTCTimestamp"), FixTypeCategory::Text);
        assert_eq!(FixTypeCategory::classify("price"), FixTypeCategory::Text);
    }

    #[test]
    fn test_static_table() {
        let repository = Repository::default();
        let index = EntityIndex::new(&repository);
        let mapper = TypeMapper::with_static_table(&index, DecimalRepresentation::String);

        let cases = [
            ("Price", "string"),
            ("Amt", "string"),
            ("float", "string"),
            ("int", "int"),
            ("NumInGroup", "int"),
            ("SeqNum", "int"),
            ("TagNum", "int"),
            ("Boolean", "boolean"),
            ("Percentage", "double"),
            ("char", "string"),
            ("UTCTimestamp", "string"),
            ("LocalMktDate", "string"),
        ];
        for (fix, avro) in cases {
            let mapped = mapper.map("Test", fix).expect("static mapping");
            assert_eq!(mapped.as_name(), Some(avro), "mapping of {fix}");
        }
    }

    #[test]
    fn test_static_table_double_decimal() {
        let repository = Repository::default();
        let index = EntityIndex::new(&repository);
        let mapper = TypeMapper::with_static_table(&index, DecimalRepresentation::Double);

        for fix in ["Price", "Qty", "PriceOffset", "float"] {
            assert_eq!(mapper.map("Test", fix).expect("mapped").as_name(), Some("double"));
        }
        assert_eq!(mapper.map("Test", "int").expect("mapped").as_name(), Some("int"));
    }

    #[test]
    fn test_metadata_logical_type() {
        let repository = trading_repository();
        let index = EntityIndex::new(&repository);
        let mapper = TypeMapper::with_metadata(&index, DecimalRepresentation::String, "AVRO_V1");

        let mapped = mapper.map("OrderPercent", "Percentage").expect("mapped");
        let value = serde_json::to_value(&mapped).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"type": "bytes", "logicalType": "decimal", "scale": "2", "precision": "4"})
        );
        let rendered = serde_json::to_string(&mapped).expect("serialize");
        assert_eq!(
            rendered,
            r#"{"type":"bytes","logicalType":"decimal","scale":"2","precision":"4"}"#
        );
    }

    #[test]
    fn test_metadata_mapping_without_extension() {
        let repository = trading_repository();
        let index = EntityIndex::new(&repository);
        let mapper = TypeMapper::with_metadata(&index, DecimalRepresentation::String, "AVRO_V1");

        let mapped = mapper.map("TransactTime", "UTCTimestamp").expect("mapped");
        assert_eq!(mapped.as_name(), Some("string"));
    }

    #[test]
    fn test_metadata_fallback() {
        let repository = trading_repository();
        let index = EntityIndex::new(&repository);
        let mapper = TypeMapper::with_metadata(&index, DecimalRepresentation::String, "AVRO_V1");

        let cases = [
            ("int", "int"),
            ("float", "float"),
            ("Price", "float"),
            ("Qty", "float"),
            ("NumInGroup", "int"),
            ("Length", "int"),
            ("Boolean", "boolean"),
            ("char", "string"),
            ("String", "string"),
        ];
        for (fix, avro) in cases {
            let mapped = mapper.map("Test", fix).expect("metadata mapping");
            assert_eq!(mapped.as_name(), Some(avro), "mapping of {fix}");
        }
    }

    #[test]
    fn test_metadata_missing_datatype_is_fatal() {
        let repository = trading_repository();
        let index = EntityIndex::new(&repository);
        let mapper = TypeMapper::with_metadata(&index, DecimalRepresentation::String, "AVRO_V1");

        let err = mapper.map("Venue", "Exchange").expect_err("missing datatype");
        assert!(matches!(
            err,
            CodegenError::MissingDatatype { ref field, ref type_name }
                if field == "Venue" && type_name == "Exchange"
        ));
    }

    #[test]
    fn test_from_config_auto_selection() {
        let repository = trading_repository();
        let index = EntityIndex::new(&repository);

        let config = GeneratorConfig::new("ns");
        assert!(TypeMapper::from_config(&index, &config).uses_metadata());

        let config = GeneratorConfig::new("ns").avro_standard("PROTOBUF");
        assert!(!TypeMapper::from_config(&index, &config).uses_metadata());

        let config = GeneratorConfig::new("ns").type_mapping(TypeMappingMode::Static);
        assert!(!TypeMapper::from_config(&index, &config).uses_metadata());

        let empty = Repository::default();
        let empty_index = EntityIndex::new(&empty);
        let config = GeneratorConfig::new("ns").type_mapping(TypeMappingMode::Metadata);
        assert!(TypeMapper::from_config(&empty_index, &config).uses_metadata());
    }
}
