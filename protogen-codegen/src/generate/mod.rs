//! Emitter: turns a resolved [`crate::transform::Model`] into C header and
//! source text plus Markdown documentation (§4.6).

pub mod markdown;
pub mod writer;

use crate::transform::model::Model;
use crate::transform::packet::PacketModel;
use crate::transform::structure::StructureModel;
use writer::{HeaderWriter, SourceWriter};

/// Header and source text for one `<Prefix><Name>{.h,.c}` module pair.
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    pub name: String,
    pub header: String,
    pub source: String,
}

/// Everything produced from one protocol document.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    pub modules: Vec<GeneratedModule>,
    pub markdown: String,
}

/// Renders a complete [`GeneratedOutput`] for `model` (§4.6, §6).
pub fn generate(model: &Model) -> GeneratedOutput {
    let mut modules = Vec::new();

    for structure in &model.structures {
        modules.push(generate_structure_module(model, structure));
    }
    for packet in &model.packets {
        modules.push(generate_packet_module(model, packet));
    }

    let markdown = generate_markdown(model);

    GeneratedOutput { modules, markdown }
}

fn generate_structure_module(model: &Model, structure: &StructureModel) -> GeneratedModule {
    let module_name = structure
        .file
        .as_deref()
        .map(|f| f.trim_end_matches(".h").trim_end_matches(".c").to_string())
        .unwrap_or_else(|| format!("{}{}", model.prefix, structure.name));

    let mut header = HeaderWriter::new();
    header.write_banner(&module_name);
    header.write_include_directive(&format!("{}.h", model.name));
    header.make_line_separator();
    for e in &structure.enumerations {
        header.write(&e.render_declaration());
        header.make_line_separator();
    }
    header.write(&structure.render_struct_declaration(true));

    let mut source = SourceWriter::new();
    source.write_runtime_includes();
    source.write_include_directive(&format!("{module_name}.h"));
    source.make_line_separator();
    source.write(&structure.render_encode(model.big_endian));
    source.make_line_separator();
    source.write(&structure.render_decode(model.big_endian));

    GeneratedModule {
        name: module_name,
        header: header.flush().to_string(),
        source: source.flush().to_string(),
    }
}

fn generate_packet_module(model: &Model, packet: &PacketModel) -> GeneratedModule {
    let module_name = packet
        .structure
        .file
        .as_deref()
        .map(|f| f.trim_end_matches(".h").trim_end_matches(".c").to_string())
        .unwrap_or_else(|| format!("{}{}Packet", model.prefix, packet.structure.name));

    let mut header = HeaderWriter::new();
    header.write_banner(&module_name);
    header.write_include_directive(&format!("{}.h", model.name));
    header.make_line_separator();
    for e in &packet.structure.enumerations {
        header.write(&e.render_declaration());
        header.make_line_separator();
    }
    header.write(&packet.structure.render_struct_declaration(true));
    header.make_line_separator();
    header.write(&format!("uint32_t get{}{}PacketID(void);\n", model.prefix, packet.structure.name));
    header.write(&format!("int get{}{}MinDataLength(void);\n", model.prefix, packet.structure.name));

    let mut source = SourceWriter::new();
    source.write_runtime_includes();
    source.write_include_directive(&format!("{module_name}.h"));
    source.make_line_separator();
    source.write(&packet.render_id_accessor(&model.prefix));
    source.make_line_separator();
    source.write(&packet.render_min_data_length_accessor(&model.prefix));
    source.make_line_separator();
    source.write(&packet.render_encode(model.big_endian));
    source.make_line_separator();
    source.write(&packet.render_decode(model.big_endian));

    GeneratedModule {
        name: module_name,
        header: header.flush().to_string(),
        source: source.flush().to_string(),
    }
}

fn generate_markdown(model: &Model) -> String {
    let mut out = format!("# {}\n\n", model.name);
    for packet in &model.packets {
        out.push_str(&markdown::render_packet_markdown(packet));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::xml_model;
    use crate::transform::to_model;
    use crate::parse::parse_protocol;

    #[test]
    fn generates_one_module_per_structure_and_packet() {
        let xml = r#"
            <Protocol name="Proto" prefix="Proto" endian="big">
                <Structure name="Header">
                    <Data name="version" inMemoryType="uint8"/>
                </Structure>
                <Packet name="Ping" ID="0x01"/>
            </Protocol>
        "#;
        let protocol = parse_protocol(xml).unwrap();
        let (model, _) = to_model(&protocol);
        let output = generate(&model);

        assert_eq!(output.modules.len(), 2);
        assert!(output.modules.iter().any(|m| m.name == "ProtoHeader"));
        assert!(output.modules.iter().any(|m| m.name == "ProtoPingPacket"));
    }

    #[test]
    fn markdown_includes_packet_heading() {
        let xml = xml_model::Protocol {
            name: "Proto".to_string(),
            prefix: "Proto".to_string(),
            api: String::new(),
            version: String::new(),
            endian: "big".to_string(),
            children: vec![xml_model::ProtocolChild::Packet(xml_model::Packet {
                name: "Ping".to_string(),
                id: Some("0x01".to_string()),
                comment: String::new(),
                file: None,
                structure_interface: false,
                parameter_interface: false,
                children: vec![],
            })],
        };
        let (model, _) = to_model(&xml);
        let output = generate(&model);
        assert!(output.markdown.contains("## Ping"));
    }
}
