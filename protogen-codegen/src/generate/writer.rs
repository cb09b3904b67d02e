//! Append-aware text buffers for header and source emission (§4.6, §9:
//! "append-aware writers with a scoped-flush discipline").

/// Accumulates header text: a Doxygen banner (suppressed when appending to
/// an existing file), includes, enum declarations, struct declarations,
/// and function prototypes.
#[derive(Debug, Default)]
pub struct HeaderWriter {
    buffer: String,
    includes: Vec<String>,
    appending: bool,
}

/// Accumulates source text: includes (written only on first emission),
/// static prototypes, then function bodies.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buffer: String,
    includes: Vec<String>,
    wrote_includes: bool,
    appending: bool,
}

impl HeaderWriter {
    pub fn new() -> HeaderWriter {
        HeaderWriter::default()
    }

    /// Marks this writer as appending to an already-emitted file, which
    /// suppresses the Doxygen banner on the next [`Self::write_banner`].
    pub fn prepare_to_append(&mut self) {
        self.appending = true;
    }

    pub fn is_appending(&self) -> bool {
        self.appending
    }

    pub fn write_banner(&mut self, module_name: &str) {
        if self.appending {
            return;
        }
        self.buffer.push_str(&format!("/*!\n * \\file\n * \\brief Declarations for {module_name}.\n */\n"));
    }

    /// Idempotent within this writer: the same directive is never emitted
    /// twice.
    pub fn write_include_directive(&mut self, name: &str) {
        if self.includes.iter().any(|i| i == name) {
            return;
        }
        self.includes.push(name.to_string());
        self.buffer.push_str(&format!("#include \"{name}\"\n"));
    }

    /// Ensures exactly one blank line separates whatever was written
    /// before from what comes next.
    pub fn make_line_separator(&mut self) {
        while self.buffer.ends_with("\n\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.ends_with("\n\n") && !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
    }

    pub fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn flush(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.includes.clear();
        self.appending = false;
    }
}

impl SourceWriter {
    pub fn new() -> SourceWriter {
        SourceWriter::default()
    }

    pub fn prepare_to_append(&mut self) {
        self.appending = true;
        self.wrote_includes = true;
    }

    pub fn is_appending(&self) -> bool {
        self.appending
    }

    pub fn write_include_directive(&mut self, name: &str) {
        if self.wrote_includes || self.includes.iter().any(|i| i == name) {
            return;
        }
        self.includes.push(name.to_string());
        self.buffer.push_str(&format!("#include \"{name}\"\n"));
    }

    /// Writes the shipped-verbatim runtime headers, but only on the first
    /// emission of this module (§4.6).
    pub fn write_runtime_includes(&mut self) {
        if self.wrote_includes {
            return;
        }
        for header in ["fieldencode.h", "fielddecode.h", "bitfieldspecial.h", "floatspecial.h"] {
            self.buffer.push_str(&format!("#include \"{header}\"\n"));
        }
        self.wrote_includes = true;
    }

    pub fn make_line_separator(&mut self) {
        while self.buffer.ends_with("\n\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.ends_with("\n\n") && !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
    }

    pub fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn flush(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.includes.clear();
        self.wrote_includes = false;
        self.appending = false;
    }
}
