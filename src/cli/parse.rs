//! Value parsers for clap arguments backed by core `FromStr` impls

use tagreport_core::format::OutputFormat;
use tagreport_core::report::StructureVariant;

/// Parse output format from string
pub fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse report structure variant from string
pub fn parse_variant(s: &str) -> std::result::Result<StructureVariant, String> {
    s.parse::<StructureVariant>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant_aliases() {
        assert_eq!(parse_variant("row-first"), Ok(StructureVariant::DimensionFirst));
        assert_eq!(parse_variant("sectorFirst"), Ok(StructureVariant::SectorFirst));
        assert!(parse_variant("diagonal").unwrap_err().contains("diagonal"));
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("json"), Ok(OutputFormat::Json));
        assert!(parse_output_format("records").is_err());
    }
}
