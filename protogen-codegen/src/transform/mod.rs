//! Cross-field validation, the encoded-length algebra, and model
//! construction: everything between the raw XML tree ([`crate::parse`])
//! and C/Markdown emission ([`crate::generate`]).

pub mod enum_model;
pub mod field;
pub mod length;
pub mod model;
pub mod packet;
pub mod structure;
pub mod transformer;

pub use enum_model::EnumModel;
pub use field::PrimitiveField;
pub use model::Model;
pub use packet::PacketModel;
pub use structure::StructureModel;
pub use transformer::to_model;
