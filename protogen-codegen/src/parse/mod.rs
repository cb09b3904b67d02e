//! XML front end: turns a document into the typed [`xml_model`] tree.
//!
//! This module owns only the textual parse. Cross-field validation, the
//! encoded-length algebra, and the reference resolver all live in
//! [`crate::transform`], which consumes the tree produced here.

pub mod parser;
pub mod xml_model;

pub use parser::parse_protocol;
