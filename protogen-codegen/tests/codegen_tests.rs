//! Integration tests for C/Markdown generation.
//!
//! These tests verify that the emitter produces correct header, source,
//! and Markdown text from a resolved model.

use protogen_codegen::generate::generate;
use protogen_codegen::parse::parse_protocol;
use protogen_codegen::transform::to_model;
use test_utils::{assert_code_contains, assert_code_not_contains, load_fixture};

fn generate_from_fixture(category: &str, filename: &str) -> protogen_codegen::GeneratedOutput {
    let xml = load_fixture(category, filename);
    let protocol = parse_protocol(&xml).expect("failed to parse fixture");
    let (model, _) = to_model(&protocol);
    generate(&model)
}

#[test]
fn generate_empty_packet_emits_finish_packet_call() {
    let output = generate_from_fixture("valid", "simple_packet.xml");
    let module = output.modules.iter().find(|m| m.name.contains("Ping")).unwrap();

    assert_code_contains(&module.source, &["finishPacket", "getDemoPingPacketID"]);
    assert_code_contains(&module.header, &["#include \"Demo.h\""]);
}

#[test]
fn generate_single_field_packet_uses_parameter_signature() {
    let output = generate_from_fixture("valid", "single_field_packet.xml");
    let module = output.modules.iter().find(|m| m.name.contains("Echo")).unwrap();

    assert_code_contains(&module.source, &["uint16_t counter", "encodeDemoEchoPacket"]);
    assert_code_not_contains(&module.source, &["PacketStructure"]);
}

#[test]
fn generate_multi_field_packet_uses_structure_signature() {
    let output = generate_from_fixture("valid", "multi_field_packet.xml");
    let module = output.modules.iter().find(|m| m.name.contains("Status")).unwrap();

    assert_code_contains(&module.source, &["PacketStructure"]);
    assert_code_contains(&module.header, &["typedef struct"]);
}

#[test]
fn generate_writes_runtime_includes_once_per_module() {
    let output = generate_from_fixture("valid", "multi_field_packet.xml");
    let module = &output.modules[0];

    assert_eq!(module.source.matches("fieldencode.h").count(), 1);
}

#[test]
fn generate_nested_structure_gets_its_own_module_and_call() {
    let output = generate_from_fixture("valid", "nested_structure.xml");

    assert!(output.modules.iter().any(|m| m.name.contains("Header")));
    let packet_module = output.modules.iter().find(|m| m.name.contains("Telemetry")).unwrap();
    assert_code_contains(&packet_module.source, &["encodeDemoHeader"]);
}

#[test]
fn generate_markdown_includes_packet_heading_and_identifier() {
    let output = generate_from_fixture("valid", "single_field_packet.xml");

    assert!(output.markdown.contains("## Echo"));
    assert!(output.markdown.contains("**Identifier:** 0x02"));
}

#[test]
fn generate_markdown_includes_variable_array_row() {
    let output = generate_from_fixture("valid", "variable_array.xml");

    assert!(output.markdown.contains("payload"));
    assert!(output.markdown.contains("count"));
}

#[test]
fn generate_variable_array_emits_guarded_loop_not_a_scalar_call() {
    let output = generate_from_fixture("valid", "variable_array.xml");
    let module = output.modules.iter().find(|m| m.name.contains("Blob")).unwrap();

    assert_code_contains(&module.source, &["int i;", "for(i=0; i < (int)user->count && i < 17; i++)", "payload[i]"]);
    assert_code_not_contains(&module.source, &["user->payload, data"]);
}

#[test]
fn generate_enum_declaration_from_packet_id() {
    let output = generate_from_fixture("valid", "enum_with_base.xml");
    let module = output.modules.iter().find(|m| m.name.contains("Ping")).unwrap();

    assert_code_contains(&module.header, &["typedef enum", "MessageKind", "PING"]);
}

#[test]
fn generate_bitfield_run_emits_single_decode_call_per_member() {
    let output = generate_from_fixture("valid", "bitfield_run.xml");
    let module = output.modules.iter().find(|m| m.name.contains("Flags")).unwrap();

    assert_eq!(module.source.matches("decodeBitfield").count(), 3);
}
