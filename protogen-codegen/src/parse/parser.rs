use protogen_core::ProtogenError;

use super::xml_model::Protocol;

/// Parses a complete XML document into the raw [`Protocol`] tree.
///
/// This is the only place a malformed document surfaces as a fatal error
/// (§7): anything that gets this far is well-formed XML matching the
/// grammar in `xml_model`, and every later stage only ever produces
/// non-fatal diagnostics.
pub fn parse_protocol(xml: &str) -> Result<Protocol, ProtogenError> {
    quick_xml::de::from_str(xml).map_err(|e| ProtogenError::Xml(e.to_string()))
}
