//! Names of the shipped-verbatim C runtime helpers the emitter calls into.
//!
//! The helper runtime itself (`fieldencode.c`, `fielddecode.c`,
//! `bitfieldspecial.c`, `floatspecial.c`, `scaledencode.c`,
//! `scaleddecode.c`) is an external collaborator: it ships unmodified with
//! every generated protocol and is not produced by this compiler. What the
//! compiler does own is the set of call sites it emits against that
//! runtime, so the function names live here as the seam between the two —
//! the same role `rasterix-core`'s `BitReader`/`BitWriter`/`Fspec` play as
//! identifiers the generator emits calls against, except here the runtime
//! is C text rather than a linked Rust crate.

/// Packs an in-memory integer into its on-wire byte representation.
pub mod fieldencode {
    pub const UINT8_TO_BYTES: &str = "uint8ToBytes";
    pub const UINT16_TO_BE_BYTES: &str = "uint16ToBeBytes";
    pub const UINT16_TO_LE_BYTES: &str = "uint16ToLeBytes";
    pub const UINT32_TO_BE_BYTES: &str = "uint32ToBeBytes";
    pub const UINT32_TO_LE_BYTES: &str = "uint32ToLeBytes";
    pub const INT8_TO_BYTES: &str = "int8ToBytes";
    pub const INT16_TO_BE_BYTES: &str = "int16ToBeBytes";
    pub const INT16_TO_LE_BYTES: &str = "int16ToLeBytes";
    pub const INT32_TO_BE_BYTES: &str = "int32ToBeBytes";
    pub const INT32_TO_LE_BYTES: &str = "int32ToLeBytes";
}

/// Unpacks an on-wire byte representation back into an in-memory integer.
pub mod fielddecode {
    pub const UINT8_FROM_BYTES: &str = "uint8FromBytes";
    pub const UINT16_FROM_BE_BYTES: &str = "uint16FromBeBytes";
    pub const UINT16_FROM_LE_BYTES: &str = "uint16FromLeBytes";
    pub const UINT32_FROM_BE_BYTES: &str = "uint32FromBeBytes";
    pub const UINT32_FROM_LE_BYTES: &str = "uint32FromLeBytes";
    pub const INT8_FROM_BYTES: &str = "int8FromBytes";
    pub const INT16_FROM_BE_BYTES: &str = "int16FromBeBytes";
    pub const INT16_FROM_LE_BYTES: &str = "int16FromLeBytes";
    pub const INT32_FROM_BE_BYTES: &str = "int32FromBeBytes";
    pub const INT32_FROM_LE_BYTES: &str = "int32FromLeBytes";
}

/// Packed bitfield-run encode/decode, threading an accumulated bit offset.
pub mod bitfieldspecial {
    pub const ENCODE_BITFIELD: &str = "encodeBitfield";
    pub const DECODE_BITFIELD: &str = "decodeBitfield";
    pub const RESET_BITFIELD_ACCUMULATOR: &str = "bitfieldAccumulatorInit";
}

/// IEEE-754 float encode/decode with endianness handled by the runtime.
pub mod floatspecial {
    pub const FLOAT32_TO_BE_BYTES: &str = "float32ToBeBytes";
    pub const FLOAT32_FROM_BE_BYTES: &str = "float32FromBeBytes";
    pub const FLOAT64_TO_BE_BYTES: &str = "float64ToBeBytes";
    pub const FLOAT64_FROM_BE_BYTES: &str = "float64FromBeBytes";
}

/// Scaled (fixed-point) field encode, e.g. a float stored as a scaled
/// integer on the wire.
pub mod scaledencode {
    pub const ENCODE_SCALED_UNSIGNED: &str = "encodeScaledUnsignedToBytes";
    pub const ENCODE_SCALED_SIGNED: &str = "encodeScaledSignedToBytes";
}

/// Scaled (fixed-point) field decode, inverse of [`scaledencode`].
pub mod scaleddecode {
    pub const DECODE_SCALED_UNSIGNED: &str = "decodeScaledUnsignedFromBytes";
    pub const DECODE_SCALED_SIGNED: &str = "decodeScaledSignedFromBytes";
}

/// Packet-framing helper invoked by empty-packet encode bodies and by every
/// decode's packet-ID check (§8 end-to-end scenario 1).
pub const FINISH_PACKET: &str = "finishPacket";
