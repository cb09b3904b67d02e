//! Integration tests for the Builder API.
//!
//! These tests verify that the high-level Builder API correctly
//! orchestrates the parsing, transformation, and code generation pipeline.

use protogen::codegen::builder::ProtogenBuilder;
use std::fs;
use test_utils::{cleanup_temp_files, create_temp_file, load_fixture};

#[test]
fn builder_from_fixture() {
    let xml = load_fixture("valid", "simple_packet.xml");

    let builder = ProtogenBuilder::new();
    let result = builder.build(&xml);

    assert!(result.is_ok());
    let (output, diagnostics) = result.unwrap();
    assert!(diagnostics.is_empty());
    assert!(output.modules.iter().any(|m| m.name.contains("Ping")));
}

#[test]
fn builder_generates_structure_and_packet_modules() {
    let xml = load_fixture("valid", "nested_structure.xml");

    let builder = ProtogenBuilder::new();
    let (output, _) = builder.build(&xml).unwrap();

    assert!(output.modules.iter().any(|m| m.name.contains("Header")));
    assert!(output.modules.iter().any(|m| m.name.contains("Telemetry")));
}

#[test]
fn builder_build_file_writes_headers_sources_and_markdown() {
    let xml_content = load_fixture("valid", "single_field_packet.xml");
    let temp_path = create_temp_file(&xml_content, "xml");

    let builder = ProtogenBuilder::new();
    let output_dir = temp_path.with_extension("").to_str().unwrap().to_string() + "_out";
    let result = builder.build_file(temp_path.to_str().unwrap(), &output_dir);

    assert!(result.is_ok());
    let written = result.unwrap();
    assert!(written.iter().any(|p| p.extension().is_some_and(|e| e == "h")));
    assert!(written.iter().any(|p| p.extension().is_some_and(|e| e == "c")));
    assert!(written.iter().any(|p| p.file_name().is_some_and(|n| n == "protocol.md")));

    fs::remove_dir_all(&output_dir).ok();
    cleanup_temp_files();
}

#[test]
fn builder_fails_on_missing_file() {
    let builder = ProtogenBuilder::new();
    let result = builder.build_file("nonexistent_file.xml", "target/test_output_missing");

    assert!(result.is_err());
}

#[test]
fn builder_fails_on_invalid_xml() {
    let xml = load_fixture("invalid", "malformed.xml");

    let builder = ProtogenBuilder::new();
    let result = builder.build(&xml);

    assert!(result.is_err());
}

#[test]
fn builder_reports_diagnostics_for_unresolved_depends_on() {
    let xml = load_fixture("invalid", "unresolved_depends_on.xml");

    let builder = ProtogenBuilder::new();
    let (_, diagnostics) = builder.build(&xml).unwrap();

    assert!(!diagnostics.is_empty());
}

#[test]
fn builder_handles_variable_array() {
    let xml = load_fixture("valid", "variable_array.xml");

    let builder = ProtogenBuilder::new();
    let (output, _) = builder.build(&xml).unwrap();

    assert!(output.markdown.contains("Blob"));
}

#[test]
fn builder_handles_enum() {
    let xml = load_fixture("valid", "enum_with_base.xml");

    let builder = ProtogenBuilder::new();
    let (output, _) = builder.build(&xml).unwrap();

    let module = output.modules.iter().find(|m| m.name.contains("Ping")).unwrap();
    assert!(module.header.contains("typedef enum"));
}

#[test]
fn builder_default_trait() {
    let builder: ProtogenBuilder = Default::default();
    let xml = load_fixture("valid", "simple_packet.xml");

    let result = builder.build(&xml);
    assert!(result.is_ok());
}
