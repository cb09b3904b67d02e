//! Top-level document owner: parses, builds the model, and exposes the
//! cross-document enum substitution the Markdown emitter relies on (§4.7).

use protogen_core::{Diagnostics, ProtogenError};

use crate::parse::parse_protocol;
use crate::transform::{to_model, Model};

/// Owns one document's worth of state: the resolved model and every
/// diagnostic produced while building it.
pub struct ParserDriver {
    pub model: Model,
    pub diagnostics: Diagnostics,
}

impl ParserDriver {
    /// Parses `xml` and builds the resolved model. The only fatal error
    /// path in the whole pipeline (§7): everything past this point is a
    /// non-fatal diagnostic.
    pub fn build(xml: &str) -> Result<ParserDriver, ProtogenError> {
        let protocol = parse_protocol(xml)?;
        let (model, diagnostics) = to_model(&protocol);
        Ok(ParserDriver { model, diagnostics })
    }

    /// The module name a structure or packet emits under: its `file`
    /// attribute override with any `.h`/`.c` extension stripped, or
    /// `<prefix><name><suffix>` when no override was given.
    pub fn module_name_for(&self, name: &str, suffix: &str, file_override: Option<&str>) -> String {
        match file_override {
            Some(f) => f.trim_end_matches(".h").trim_end_matches(".c").to_string(),
            None => format!("{}{name}{suffix}", self.model.prefix),
        }
    }

    /// The root include every generated header pulls in (§4.7: "the
    /// top-level include walk (`ProtocolName.h` always included)").
    pub fn root_include(&self) -> String {
        format!("{}.h", self.model.name)
    }

    /// Substitutes every occurrence of a known enumerator name in `text`
    /// with its resolved numeric form, so Markdown can show both the
    /// symbolic and numeric form of a packet ID (§4.7).
    pub fn replace_enumeration_name_with_value(&self, text: &str) -> String {
        let mut out = text.to_string();
        for e in &self.model.enums {
            for value in &e.values {
                out = replace_word(&out, &value.name, &value.resolved.render());
            }
        }
        out
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Replaces whole-word occurrences of `word` in `haystack` with
/// `replacement`, leaving partial matches inside a larger identifier
/// untouched.
fn replace_word(haystack: &str, word: &str, replacement: &str) -> String {
    if word.is_empty() {
        return haystack.to_string();
    }

    let mut out = String::with_capacity(haystack.len());
    let chars: Vec<char> = haystack.chars().collect();
    let word_chars: Vec<char> = word.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let matches = chars[i..].starts_with(word_chars.as_slice());
        let boundary_before = i == 0 || !is_identifier_char(chars[i - 1]);
        let boundary_after = i + word_chars.len() >= chars.len() || !is_identifier_char(chars[i + word_chars.len()]);

        if matches && boundary_before && boundary_after {
            out.push_str(replacement);
            i += word_chars.len();
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}
