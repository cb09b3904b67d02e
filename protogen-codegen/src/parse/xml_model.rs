use serde::Deserialize;

//
// Root document
//

/// The root `<Protocol>` element: a declarative description of a binary
/// wire protocol (packets, structures, primitive fields, bitfields,
/// enumerations).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "Protocol")]
pub struct Protocol {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@prefix", default)]
    pub prefix: String,

    #[serde(rename = "@api", default)]
    pub api: String,

    #[serde(rename = "@version", default)]
    pub version: String,

    #[serde(rename = "@endian", default = "default_endian")]
    pub endian: String,

    #[serde(rename = "$value", default)]
    pub children: Vec<ProtocolChild>,
}

fn default_endian() -> String {
    "big".into()
}

/// Top-level declarations directly under `<Protocol>`.
#[derive(Debug, Clone, Deserialize)]
pub enum ProtocolChild {
    #[serde(rename = "Enum")]
    Enum(Enum),

    #[serde(rename = "Structure")]
    Structure(Structure),

    #[serde(rename = "Packet")]
    Packet(Packet),
}

//
// Enumerations
//

/// An `<Enum>` declaration: a set of named, (possibly unresolved)
/// numeric values.
#[derive(Debug, Clone, Deserialize)]
pub struct Enum {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@comment", default)]
    pub comment: String,

    #[serde(rename = "Value", default)]
    pub values: Vec<Value>,
}

/// A single `<Value>` within an `<Enum>`.
///
/// `value` is the raw XML literal: absent, decimal, `0x…`, `0b…`, or an
/// unresolved symbol. Resolution happens later, in
/// [`crate::transform::enum_model`].
#[derive(Debug, Clone, Deserialize)]
pub struct Value {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@value", default)]
    pub value: Option<String>,

    #[serde(rename = "@comment", default)]
    pub comment: String,
}

//
// Structures and packets
//

/// A `<Structure>` declaration: a composite encodable made of `<Data>`,
/// nested `<Structure>`, and nested `<Enum>` children in document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Structure {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@comment", default)]
    pub comment: String,

    #[serde(rename = "@array", default)]
    pub array: Option<String>,

    #[serde(rename = "@variableArray", default)]
    pub variable_array: Option<String>,

    #[serde(rename = "@dependsOn", default)]
    pub depends_on: Option<String>,

    #[serde(rename = "@file", default)]
    pub file: Option<String>,

    #[serde(rename = "$value", default)]
    pub children: Vec<StructureChild>,
}

/// A `<Packet>` declaration: a `Structure` specialization with a packet ID
/// and a choice of structure vs. parameter API surface.
#[derive(Debug, Clone, Deserialize)]
pub struct Packet {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@ID", default)]
    pub id: Option<String>,

    #[serde(rename = "@comment", default)]
    pub comment: String,

    #[serde(rename = "@file", default)]
    pub file: Option<String>,

    #[serde(rename = "@structureInterface", default)]
    pub structure_interface: bool,

    #[serde(rename = "@parameterInterface", default)]
    pub parameter_interface: bool,

    #[serde(rename = "$value", default)]
    pub children: Vec<StructureChild>,
}

/// A child of `<Structure>` or `<Packet>`, dispatched on tag name and kept
/// in document order (document order is load-bearing: bitfield-run
/// detection and `variableArray`/`dependsOn` cross-references both walk
/// children left to right).
#[derive(Debug, Clone, Deserialize)]
pub enum StructureChild {
    #[serde(rename = "Data")]
    Data(Data),

    #[serde(rename = "Structure")]
    Structure(Box<Structure>),

    #[serde(rename = "Enum")]
    Enum(Enum),
}

//
// Primitive fields
//

/// A `<Data>` declaration: a leaf primitive field, possibly a bitfield,
/// possibly arrayed, possibly conditional on a prior sibling.
#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "@inMemoryType")]
    pub in_memory_type: String,

    #[serde(rename = "@encodedType", default)]
    pub encoded_type: Option<String>,

    #[serde(rename = "@bits", default)]
    pub bits: Option<u32>,

    #[serde(rename = "@array", default)]
    pub array: Option<String>,

    #[serde(rename = "@variableArray", default)]
    pub variable_array: Option<String>,

    #[serde(rename = "@dependsOn", default)]
    pub depends_on: Option<String>,

    #[serde(rename = "@default", default)]
    pub default: Option<String>,

    #[serde(rename = "@constant", default)]
    pub constant: Option<String>,

    #[serde(rename = "@comment", default)]
    pub comment: String,

    #[serde(rename = "@notEncoded", default)]
    pub not_encoded: bool,

    #[serde(rename = "@notInMemory", default)]
    pub not_in_memory: bool,
}
