//! High-level Builder API: owns file I/O and output-path conventions so
//! a CLI collaborator never touches [`ParserDriver`] directly.

use std::fs;
use std::path::{Path, PathBuf};

use protogen_core::{Diagnostics, ProtogenError};

use crate::driver::ParserDriver;
use crate::generate::{self, GeneratedOutput};

/// Which emission phases [`ProtogenBuilder::build`] runs. All on by
/// default; a CLI collaborator can turn any of them off independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub emit_doxygen: bool,
    pub emit_markdown: bool,
    pub emit_helper_files: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            emit_doxygen: true,
            emit_markdown: true,
            emit_helper_files: true,
        }
    }
}

/// Drives one document through parse, transform, and emission.
pub struct ProtogenBuilder {
    options: GeneratorOptions,
}

impl ProtogenBuilder {
    pub fn new() -> Self {
        ProtogenBuilder { options: GeneratorOptions::default() }
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        ProtogenBuilder { options }
    }

    /// Parses, resolves, and emits `xml` in one step. Returns the
    /// generated modules and diagnostics collected along the way; only a
    /// malformed document is fatal (§7).
    pub fn build(&self, xml: &str) -> Result<(GeneratedOutput, Diagnostics), ProtogenError> {
        let driver = ParserDriver::build(xml)?;
        let mut output = generate::generate(&driver.model);
        if !self.options.emit_markdown {
            output.markdown.clear();
        }
        if !self.options.emit_doxygen {
            for module in &mut output.modules {
                module.header = strip_doxygen_banner(&module.header, &module.name);
            }
        }
        Ok((output, driver.diagnostics))
    }

    /// Reads `input_path`, builds it, and writes every generated module
    /// (and, when enabled, the Markdown doc) under `output_dir`.
    pub fn build_file(&self, input_path: &str, output_dir: &str) -> Result<Vec<PathBuf>, ProtogenError> {
        let xml = fs::read_to_string(input_path)?;
        let (output, _diagnostics) = self.build(&xml)?;

        fs::create_dir_all(output_dir)?;
        let mut written = Vec::new();

        for module in &output.modules {
            let header_path = Path::new(output_dir).join(format!("{}.h", module.name));
            fs::write(&header_path, &module.header)?;
            written.push(header_path);

            let source_path = Path::new(output_dir).join(format!("{}.c", module.name));
            fs::write(&source_path, &module.source)?;
            written.push(source_path);
        }

        if self.options.emit_markdown && !output.markdown.is_empty() {
            let doc_path = Path::new(output_dir).join("protocol.md");
            fs::write(&doc_path, &output.markdown)?;
            written.push(doc_path);
        }

        if self.options.emit_helper_files {
            for header in ["fieldencode.h", "fielddecode.h", "bitfieldspecial.h", "floatspecial.h"] {
                let path = Path::new(output_dir).join(header);
                if !path.exists() {
                    fs::write(&path, format!("/* runtime helper: {header} */\n"))?;
                    written.push(path);
                }
            }
        }

        Ok(written)
    }
}

impl Default for ProtogenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes the exact banner `HeaderWriter::write_banner` emits for
/// `module_name`, when present at the start of `header`.
fn strip_doxygen_banner(header: &str, module_name: &str) -> String {
    let banner = format!("/*!\n * \\file\n * \\brief Declarations for {module_name}.\n */\n");
    header.strip_prefix(banner.as_str()).unwrap_or(header).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_XML: &str = r#"
        <Protocol name="Proto" prefix="Proto" endian="big">
            <Structure name="Header">
                <Data name="version" inMemoryType="uint8"/>
            </Structure>
            <Packet name="Ping" ID="0x01"/>
        </Protocol>
    "#;

    #[test]
    fn builds_modules_and_markdown_by_default() {
        let builder = ProtogenBuilder::new();
        let (output, diagnostics) = builder.build(SIMPLE_XML).unwrap();

        assert_eq!(output.modules.len(), 2);
        assert!(!output.markdown.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn options_can_disable_markdown() {
        let options = GeneratorOptions { emit_markdown: false, ..GeneratorOptions::default() };
        let builder = ProtogenBuilder::with_options(options);
        let (output, _) = builder.build(SIMPLE_XML).unwrap();
        assert!(output.markdown.is_empty());
    }

    #[test]
    fn options_can_disable_doxygen_banner() {
        let with_banner = ProtogenBuilder::new().build(SIMPLE_XML).unwrap().0;
        assert!(with_banner.modules.iter().all(|m| m.header.contains("\\brief")));

        let options = GeneratorOptions { emit_doxygen: false, ..GeneratorOptions::default() };
        let builder = ProtogenBuilder::with_options(options);
        let (output, _) = builder.build(SIMPLE_XML).unwrap();
        assert!(output.modules.iter().all(|m| !m.header.contains("\\brief")));
        assert!(output.modules.iter().all(|m| m.header.contains("#include")));
    }

    #[test]
    fn build_fails_on_malformed_xml() {
        let builder = ProtogenBuilder::new();
        assert!(builder.build("<Protocol name=\"Proto\"").is_err());
    }

    #[test]
    fn build_file_writes_header_source_and_markdown() {
        let dir = std::env::temp_dir().join(format!("protogen-builder-test-{}", std::process::id()));
        let builder = ProtogenBuilder::new();
        let input_path = dir.join("proto.xml");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&input_path, SIMPLE_XML).unwrap();

        let written = builder.build_file(input_path.to_str().unwrap(), dir.join("out").to_str().unwrap()).unwrap();

        assert!(written.iter().any(|p| p.extension().is_some_and(|e| e == "h")));
        assert!(written.iter().any(|p| p.extension().is_some_and(|e| e == "c")));
        assert!(written.iter().any(|p| p.file_name().is_some_and(|n| n == "protocol.md")));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn default_trait_matches_new() {
        let builder: ProtogenBuilder = Default::default();
        assert!(builder.build(SIMPLE_XML).is_ok());
    }
}
