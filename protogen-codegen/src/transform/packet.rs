//! Packet encodable: a [`StructureModel`] specialized with an identity and
//! a choice of structure vs. parameter C API surface (§4.5).

use protogen_core::{runtime, Diagnostics};

use super::field::PrimitiveField;
use super::length;
use super::structure::{Child, StructureModel};
use crate::parse::xml_model;

/// Which C entry-point shape a packet emits. The XML grammar gives
/// `<Packet>` no `array`/`dependsOn` attributes at all (§6), so the
/// "packets are never arrays and never depend on a sibling" invariant
/// (§3) is enforced structurally rather than by a runtime diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceMode {
    /// `encode/decode<Name>PacketStructure(pkt, user)`.
    Structure,
    /// `encode/decode<Name>Packet(pkt, field1, field2, …)`.
    Parameter,
}

#[derive(Debug, Clone)]
pub struct PacketModel {
    pub structure: StructureModel,
    pub id: Option<String>,
    pub structure_interface: bool,
    pub parameter_interface: bool,
    pub interface_mode: InterfaceMode,
}

fn to_upper_snake(name: &str) -> String {
    let mut out = String::new();
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(ch.to_uppercase());
    }
    out
}

fn resolve_interface_mode(structure_interface: bool, parameter_interface: bool, child_count: usize) -> InterfaceMode {
    match (structure_interface, parameter_interface) {
        (true, false) => InterfaceMode::Structure,
        (false, true) => InterfaceMode::Parameter,
        _ => {
            if child_count > 1 {
                InterfaceMode::Structure
            } else {
                InterfaceMode::Parameter
            }
        }
    }
}

impl PacketModel {
    pub fn parse(xml: &xml_model::Packet, prefix: &str, diagnostics: &mut Diagnostics) -> PacketModel {
        let synthetic = xml_model::Structure {
            name: xml.name.clone(),
            comment: xml.comment.clone(),
            array: None,
            variable_array: None,
            depends_on: None,
            file: xml.file.clone(),
            children: xml.children.clone(),
        };
        let structure = StructureModel::parse(&synthetic, prefix, diagnostics);
        let interface_mode = resolve_interface_mode(xml.structure_interface, xml.parameter_interface, structure.children.len());

        PacketModel {
            structure,
            id: xml.id.clone(),
            structure_interface: xml.structure_interface,
            parameter_interface: xml.parameter_interface,
            interface_mode,
        }
    }

    /// The literal `get<Prefix><Name>PacketID()` returns: the configured
    /// `ID` attribute, or `UPPER_SNAKE_NAME` when absent.
    pub fn id_literal(&self) -> String {
        self.id.clone().unwrap_or_else(|| to_upper_snake(&self.structure.name))
    }

    pub fn render_id_accessor(&self, prefix: &str) -> String {
        format!(
            "uint32_t get{prefix}{}PacketID(void)\n{{\n    return {};\n}}\n",
            self.structure.name,
            self.id_literal()
        )
    }

    pub fn render_min_data_length_accessor(&self, prefix: &str) -> String {
        let min = &self.structure.encoded_length.min;
        let min = if min.is_empty() { "0".to_string() } else { min.clone() };
        format!(
            "int get{prefix}{}MinDataLength(void)\n{{\n    return {};\n}}\n",
            self.structure.name, min
        )
    }

    fn encode_signature(&self, prefix: &str) -> String {
        match self.interface_mode {
            InterfaceMode::Structure => format!(
                "void encode{prefix}{}PacketStructure(void* pkt, const {}* user)",
                self.structure.name, self.structure.type_name
            ),
            InterfaceMode::Parameter => {
                let params: Vec<String> = self
                    .structure
                    .children
                    .iter()
                    .filter_map(|c| match c {
                        Child::Primitive(f) => Some(format!("{} {}", f.c_type(), f.name)),
                        Child::Structure(_) => None,
                    })
                    .collect();
                let joined = if params.is_empty() { String::new() } else { format!(", {}", params.join(", ")) };
                format!("void encode{prefix}{}Packet(void* pkt{joined})", self.structure.name)
            }
        }
    }

    pub fn render_encode(&self, big_endian: bool) -> String {
        let prefix = "";
        let mut out = format!("{}\n{{\n", self.encode_signature(prefix));

        if self.structure.children.is_empty() {
            out.push_str(&format!("    {}(pkt, 0, {});\n}}\n", runtime::FINISH_PACKET, self.id_literal()));
            return out;
        }

        out.push_str("    int byteindex = 0;\n");
        out.push_str("    uint8_t* data = (uint8_t*)pkt;\n");
        if self.structure.flags.has_bitfields {
            out.push_str("    int bitcount = 0;\n");
        }
        if self.structure.flags.needs_iterator {
            out.push_str("    int i;\n");
        }
        for child in &self.structure.children {
            let stmt = match child {
                Child::Primitive(f) => render_parameter_encode(f, big_endian, self.interface_mode),
                Child::Structure(_) => child.render_encode_stmt(big_endian),
            };
            if !stmt.is_empty() {
                out.push_str(&format!("    {stmt}\n"));
            }
        }
        out.push_str(&format!("    {}(pkt, byteindex, {});\n}}\n", runtime::FINISH_PACKET, self.id_literal()));
        out
    }

    pub fn render_decode(&self, big_endian: bool) -> String {
        let prefix = "";
        let name = &self.structure.name;
        let mut out = format!(
            "int decode{prefix}{name}Packet(const void* pkt, int numBytes, {}* user)\n{{\n",
            self.structure.type_name
        );
        out.push_str("    int byteindex = 0;\n");
        out.push_str("    const uint8_t* data = (const uint8_t*)pkt;\n");
        out.push_str(&format!(
            "    if (getPacketID(pkt) != {}) {{\n        return 0;\n    }}\n",
            self.id_literal()
        ));
        out.push_str(&format!(
            "    if (numBytes < get{prefix}{name}MinDataLength()) {{\n        return 0;\n    }}\n"
        ));

        if self.structure.children.is_empty() {
            out.push_str("    return 1;\n}\n");
            return out;
        }

        if self.structure.flags.has_bitfields {
            out.push_str("    int bitcount = 0;\n");
        }

        let (defaults, non_defaults): (Vec<&Child>, Vec<&Child>) = self
            .structure
            .children
            .iter()
            .partition(|c| matches!(c, Child::Primitive(f) if f.default.is_some()));

        for child in &defaults {
            if let Child::Primitive(f) = child {
                if let Some(default) = &f.default {
                    out.push_str(&format!("    user->{} = {};\n", f.name, default));
                }
            }
        }

        for child in &non_defaults {
            let stmt = child.render_decode_stmt(big_endian);
            if !stmt.is_empty() {
                out.push_str(&format!("    {stmt}\n"));
            }
        }

        let min = &self.structure.encoded_length.min;
        let non_default_len = &self.structure.encoded_length.non_default;
        if !defaults.is_empty() && !non_defaults.is_empty() && length::collapse(min) != length::collapse(non_default_len) {
            out.push_str("    if (numBytes < byteindex) {\n        return 1;\n    }\n");
        }
        for child in &defaults {
            let stmt = child.render_decode_stmt(big_endian);
            if !stmt.is_empty() {
                out.push_str(&format!("    {stmt}\n"));
            }
        }

        out.push_str("    return 1;\n}\n");
        out
    }
}

fn render_parameter_encode(field: &PrimitiveField, big_endian: bool, mode: InterfaceMode) -> String {
    match mode {
        InterfaceMode::Structure => field.render_encode_call(big_endian),
        InterfaceMode::Parameter => field.render_encode_call(big_endian).replace(&format!("user->{}", field.name), &field.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(name: &str, id: Option<&str>, children: Vec<xml_model::StructureChild>, structure_interface: bool, parameter_interface: bool) -> xml_model::Packet {
        xml_model::Packet {
            name: name.to_string(),
            id: id.map(str::to_string),
            comment: String::new(),
            file: None,
            structure_interface,
            parameter_interface,
            children,
        }
    }

    fn data(name: &str, ty: &str) -> xml_model::Data {
        xml_model::Data {
            name: name.to_string(),
            in_memory_type: ty.to_string(),
            encoded_type: None,
            bits: None,
            array: None,
            variable_array: None,
            depends_on: None,
            default: None,
            constant: None,
            comment: String::new(),
            not_encoded: false,
            not_in_memory: false,
        }
    }

    #[test]
    fn empty_packet_uses_finish_packet_and_id_check() {
        let xml = packet("Ping", Some("0x01"), vec![], false, false);
        let mut diagnostics = Diagnostics::new();
        let model = PacketModel::parse(&xml, "Proto", &mut diagnostics);

        assert_eq!(model.id_literal(), "0x01");
        assert!(model.render_encode(true).contains("finishPacket"));
        assert!(model.render_decode(true).contains("return 1;"));
    }

    #[test]
    fn single_field_defaults_to_parameter_interface() {
        let xml = packet("Echo", Some("ECHO_ID"), vec![xml_model::StructureChild::Data(data("n", "unsigned16"))], false, false);
        let mut diagnostics = Diagnostics::new();
        let model = PacketModel::parse(&xml, "Proto", &mut diagnostics);

        assert_eq!(model.interface_mode, InterfaceMode::Parameter);
        assert_eq!(model.structure.encoded_length.min, "2");
        assert!(model.render_encode(true).contains("uint16_t n"));
    }

    #[test]
    fn multiple_fields_default_to_structure_interface() {
        let xml = packet(
            "Multi",
            Some("1"),
            vec![
                xml_model::StructureChild::Data(data("a", "uint8")),
                xml_model::StructureChild::Data(data("b", "uint8")),
            ],
            false,
            false,
        );
        let mut diagnostics = Diagnostics::new();
        let model = PacketModel::parse(&xml, "Proto", &mut diagnostics);

        assert_eq!(model.interface_mode, InterfaceMode::Structure);
        assert!(model.render_encode(true).contains("PacketStructure"));
    }

    #[test]
    fn id_literal_falls_back_to_upper_snake_name() {
        let xml = packet("BlobPacket", None, vec![], false, false);
        let mut diagnostics = Diagnostics::new();
        let model = PacketModel::parse(&xml, "Proto", &mut diagnostics);
        assert_eq!(model.id_literal(), "BLOB_PACKET");
    }
}
