//! Protogen - protocol description compiler.
//!
//! This crate re-exports the core runtime seam (`protogen-core`) and the
//! code generator (`protogen-codegen`) for convenient single-import usage.
//!
//! ## Crate Structure
//!
//! - [`pcore`] - Core runtime types (`ProtogenError`, `Diagnostics`, the
//!   shipped-verbatim runtime function-name constants)
//! - [`codegen`] - XML parsing, model transformation, and C/Markdown
//!   generation
//!
//! ## Usage
//!
//! ```ignore
//! use protogen::codegen::builder::ProtogenBuilder;
//!
//! let builder = ProtogenBuilder::new();
//! let (output, diagnostics) = builder.build(xml_text)?;
//! ```

/// Re-export of protogen-core as `pcore`.
pub mod pcore {
    pub use protogen_core::*;
}

/// Re-export of protogen-codegen as `codegen`.
pub mod codegen {
    pub use protogen_codegen::*;
}

pub use codegen::{GeneratedModule, GeneratedOutput, GeneratorOptions, Model, ParserDriver, ProtogenBuilder};
pub use pcore::{Diagnostic, Diagnostics, ProtogenError};
