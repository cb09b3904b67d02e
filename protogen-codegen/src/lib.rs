//! # protogen-codegen
//!
//! Compiles declarative XML wire-protocol descriptions into C encode/decode
//! sources and Markdown documentation.
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | XML front end | [`parse`] |
//! | Validation, length algebra, model construction | [`transform`] |
//! | C and Markdown emission | [`generate`] |
//! | Document-level orchestration | [`driver`] |
//! | File-system-facing entry point | [`builder`] |

pub mod builder;
pub mod driver;
pub mod generate;
pub mod parse;
pub mod transform;

pub use builder::{GeneratorOptions, ProtogenBuilder};
pub use driver::ParserDriver;
pub use generate::{GeneratedModule, GeneratedOutput};
pub use transform::Model;
