//! Enumeration resolution: turns a raw `<Enum>` parse tree into concrete
//! (or symbolic) numeric values and a minimum bit width.

use std::fmt::Write as _;

use crate::parse::xml_model;

/// A fully resolved enum value: either a concrete integer or a symbolic
/// expression anchored on an unresolved name (§3: "unresolved symbols
/// start a new symbolic base and subsequent empties are `base + offset`").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Numeric(i64),
    Symbolic(String),
}

impl Resolved {
    pub fn render(&self) -> String {
        match self {
            Resolved::Numeric(n) => n.to_string(),
            Resolved::Symbolic(s) => s.clone(),
        }
    }

    fn numeric_value(&self) -> Option<i64> {
        match self {
            Resolved::Numeric(n) => Some(*n),
            Resolved::Symbolic(_) => None,
        }
    }
}

/// One resolved member of an [`EnumModel`].
#[derive(Debug, Clone)]
pub struct EnumValue {
    pub name: String,
    pub raw_value: Option<String>,
    pub resolved: Resolved,
    pub comment: String,
}

/// A parsed, resolved `<Enum>` declaration (§3, §4.2).
#[derive(Debug, Clone)]
pub struct EnumModel {
    pub name: String,
    pub comment: String,
    pub values: Vec<EnumValue>,
    pub min_bit_width: u32,
}

fn parse_integer_literal(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(bin) = raw.strip_prefix("0b").or_else(|| raw.strip_prefix("0B")) {
        return i64::from_str_radix(bin, 2).ok();
    }
    raw.parse::<i64>().ok()
}

fn bits_needed(max_value: i64) -> u32 {
    if max_value <= 0 {
        return 0;
    }
    let v = max_value as u64;
    let mut bits = 0u32;
    while (1u64 << bits) <= v {
        bits += 1;
    }
    bits
}

impl EnumModel {
    /// Populates name, comment, and the raw value list without resolving
    /// numeric values yet.
    pub fn parse(xml: &xml_model::Enum) -> EnumModel {
        let values = xml
            .values
            .iter()
            .map(|v| EnumValue {
                name: v.name.clone(),
                raw_value: v.value.clone(),
                resolved: Resolved::Numeric(0),
                comment: v.comment.clone(),
            })
            .collect();

        EnumModel {
            name: xml.name.clone(),
            comment: xml.comment.clone(),
            values,
            min_bit_width: 8,
        }
    }

    /// Resolves every value's raw literal into a concrete or symbolic
    /// numeric form and sets `min_bit_width` (§3's left-to-right resolver).
    pub fn compute_number_list(&mut self) {
        let mut next_numeric: i64 = 0;
        let mut symbolic_base: Option<String> = None;
        let mut offset: i64 = 0;
        let mut max_numeric: Option<i64> = None;

        for value in &mut self.values {
            let raw = value.raw_value.as_deref().map(str::trim).filter(|s| !s.is_empty());

            value.resolved = match raw {
                None => match &symbolic_base {
                    Some(base) => {
                        offset += 1;
                        Resolved::Symbolic(if offset == 0 {
                            base.clone()
                        } else {
                            format!("{base} + {offset}")
                        })
                    }
                    None => {
                        let n = next_numeric;
                        next_numeric += 1;
                        Resolved::Numeric(n)
                    }
                },
                Some(literal) => match parse_integer_literal(literal) {
                    Some(n) => {
                        symbolic_base = None;
                        next_numeric = n + 1;
                        Resolved::Numeric(n)
                    }
                    None => {
                        symbolic_base = Some(literal.to_string());
                        offset = 0;
                        Resolved::Symbolic(literal.to_string())
                    }
                },
            };

            if let Some(n) = value.resolved.numeric_value() {
                max_numeric = Some(max_numeric.map_or(n, |m| m.max(n)));
            }
        }

        self.min_bit_width = match max_numeric {
            Some(max) => bits_needed(max).max(8),
            None => 8,
        };
    }

    /// Builds and resolves an [`EnumModel`] from its raw XML form in one step.
    pub fn from_xml(xml: &xml_model::Enum) -> EnumModel {
        let mut model = EnumModel::parse(xml);
        model.compute_number_list();
        model
    }

    /// `typedef enum { … } Name;` with inline comments aligned on a column
    /// padded to a multiple of four (§4.2).
    pub fn render_declaration(&self) -> String {
        if self.values.is_empty() {
            return String::new();
        }

        let name_width = self
            .values
            .iter()
            .map(|v| v.name.len())
            .max()
            .unwrap_or(0)
            .div_ceil(4)
            * 4;

        let mut out = String::new();
        let _ = writeln!(out, "typedef enum\n{{");
        for (i, value) in self.values.iter().enumerate() {
            let comma = if i + 1 == self.values.len() { "" } else { "," };
            let entry = format!("{} = {}{}", value.name, value.resolved.render(), comma);
            if value.comment.is_empty() {
                let _ = writeln!(out, "    {entry}");
            } else {
                let pad = " ".repeat(name_width.saturating_sub(value.name.len()) + 1);
                let _ = writeln!(out, "    {entry}{pad}/*!< {} */", value.comment);
            }
        }
        let _ = writeln!(out, "}} {};", self.name);
        out
    }

    /// Three-column Markdown table (Name | Value | Description); names
    /// that match a known packet ID become anchor links.
    pub fn render_markdown(&self, packet_ids: &[String]) -> String {
        if self.values.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        let _ = writeln!(out, "| Name | Value | Description |");
        let _ = writeln!(out, "|------|-------|-------------|");
        for value in &self.values {
            let name_cell = if packet_ids.iter().any(|id| id == &value.name) {
                format!("[{}](#{})", value.name, value.name.to_lowercase())
            } else {
                value.name.clone()
            };
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                name_cell,
                value.resolved.render(),
                value.comment
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_value(name: &str, value: Option<&str>) -> xml_model::Value {
        xml_model::Value {
            name: name.to_string(),
            value: value.map(str::to_string),
            comment: String::new(),
        }
    }

    fn xml_enum(values: Vec<xml_model::Value>) -> xml_model::Enum {
        xml_model::Enum {
            name: "Color".to_string(),
            comment: String::new(),
            values,
        }
    }

    #[test]
    fn empty_enum_has_no_declaration() {
        let model = EnumModel::from_xml(&xml_enum(vec![]));
        assert_eq!(model.render_declaration(), "");
    }

    #[test]
    fn plain_increment() {
        let model = EnumModel::from_xml(&xml_enum(vec![
            xml_value("RED", None),
            xml_value("GREEN", None),
            xml_value("BLUE", None),
        ]));
        let rendered: Vec<String> = model.values.iter().map(|v| v.resolved.render()).collect();
        assert_eq!(rendered, vec!["0", "1", "2"]);
    }

    #[test]
    fn unresolved_base_produces_offsets() {
        let model = EnumModel::from_xml(&xml_enum(vec![
            xml_value("A", None),
            xml_value("B", Some("SOMEWHERE")),
            xml_value("C", None),
        ]));
        let rendered: Vec<String> = model.values.iter().map(|v| v.resolved.render()).collect();
        assert_eq!(rendered, vec!["0", "SOMEWHERE", "SOMEWHERE + 1"]);
        assert_eq!(model.min_bit_width, 8);
    }

    #[test]
    fn hex_and_binary_literals_resolve() {
        let model = EnumModel::from_xml(&xml_enum(vec![
            xml_value("A", Some("0x10")),
            xml_value("B", None),
            xml_value("C", Some("0b101")),
        ]));
        let rendered: Vec<String> = model.values.iter().map(|v| v.resolved.render()).collect();
        assert_eq!(rendered, vec!["16", "17", "5"]);
    }

    #[test]
    fn min_bit_width_grows_with_max_value() {
        let model = EnumModel::from_xml(&xml_enum(vec![xml_value("A", Some("255"))]));
        assert_eq!(model.min_bit_width, 8);

        let model = EnumModel::from_xml(&xml_enum(vec![xml_value("A", Some("256"))]));
        assert_eq!(model.min_bit_width, 9);
    }

    #[test]
    fn markdown_links_known_packet_ids() {
        let model = EnumModel::from_xml(&xml_enum(vec![xml_value("ECHO_ID", Some("1"))]));
        let markdown = model.render_markdown(&["ECHO_ID".to_string()]);
        assert!(markdown.contains("[ECHO_ID](#echo_id)"));
    }
}
