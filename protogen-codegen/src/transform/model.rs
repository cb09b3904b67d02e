//! Top-level resolved model: everything the [`crate::generate`] back end
//! needs for one protocol document (§3).

use super::enum_model::EnumModel;
use super::packet::PacketModel;
use super::structure::StructureModel;

#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    pub prefix: String,
    pub api: String,
    pub version: String,
    pub big_endian: bool,
    pub enums: Vec<EnumModel>,
    pub structures: Vec<StructureModel>,
    pub packets: Vec<PacketModel>,
}

impl Model {
    pub fn packet_ids(&self) -> Vec<String> {
        self.packets.iter().map(PacketModel::id_literal).collect()
    }
}
