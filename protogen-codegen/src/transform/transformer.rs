//! Orchestrates the raw XML parse tree into a resolved [`Model`] (§2's
//! "ParserDriver … dispatches Enum/Packet/Structure declarations into
//! their models").

use protogen_core::Diagnostics;

use super::enum_model::EnumModel;
use super::model::Model;
use super::packet::PacketModel;
use super::structure::StructureModel;
use crate::parse::xml_model::{Protocol, ProtocolChild};

/// Builds the resolved [`Model`] from a parsed [`Protocol`], accumulating
/// every non-fatal diagnostic produced along the way (§7).
pub fn to_model(protocol: &Protocol) -> (Model, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let mut enums = Vec::new();
    let mut structures = Vec::new();
    let mut packets = Vec::new();

    for child in &protocol.children {
        match child {
            ProtocolChild::Enum(e) => enums.push(EnumModel::from_xml(e)),
            ProtocolChild::Structure(s) => structures.push(StructureModel::parse(s, &protocol.prefix, &mut diagnostics)),
            ProtocolChild::Packet(p) => packets.push(PacketModel::parse(p, &protocol.prefix, &mut diagnostics)),
        }
    }

    let model = Model {
        name: protocol.name.clone(),
        prefix: protocol.prefix.clone(),
        api: protocol.api.clone(),
        version: protocol.version.clone(),
        big_endian: protocol.endian != "little",
        enums,
        structures,
        packets,
    };

    (model, diagnostics)
}
