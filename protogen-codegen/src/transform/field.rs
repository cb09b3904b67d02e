//! Leaf encodable: a single wire field, possibly arrayed, possibly one
//! member of a bitfield run (§3, §4.3).

use protogen_core::runtime::{bitfieldspecial, fielddecode, fieldencode, floatspecial};

use super::length::{self, EncodedLength};
use crate::parse::xml_model;

/// Resolved shape of an in-memory C type: the type name and its width in
/// bytes when not a bitfield member.
struct TypeInfo {
    c_type: &'static str,
    width: u32,
    is_float: bool,
    is_signed: bool,
}

fn resolve_type(name: &str) -> TypeInfo {
    match name {
        "uint8" | "unsigned8" => TypeInfo { c_type: "uint8_t", width: 1, is_float: false, is_signed: false },
        "uint16" | "unsigned16" => TypeInfo { c_type: "uint16_t", width: 2, is_float: false, is_signed: false },
        "uint32" | "unsigned32" => TypeInfo { c_type: "uint32_t", width: 4, is_float: false, is_signed: false },
        "int8" | "signed8" => TypeInfo { c_type: "int8_t", width: 1, is_float: false, is_signed: true },
        "int16" | "signed16" => TypeInfo { c_type: "int16_t", width: 2, is_float: false, is_signed: true },
        "int32" | "signed32" => TypeInfo { c_type: "int32_t", width: 4, is_float: false, is_signed: true },
        "float32" | "float" => TypeInfo { c_type: "float", width: 4, is_float: true, is_signed: true },
        "float64" | "double" => TypeInfo { c_type: "double", width: 8, is_float: true, is_signed: true },
        _ => TypeInfo { c_type: "int", width: 4, is_float: false, is_signed: true },
    }
}

/// A leaf `<Data>` field, after attribute extraction but before bitfield-run
/// detection (which [`super::structure::StructureModel`] performs across
/// siblings).
#[derive(Debug, Clone)]
pub struct PrimitiveField {
    pub name: String,
    pub in_memory_type: String,
    pub encoded_type: String,
    pub array: Option<String>,
    pub variable_array: Option<String>,
    pub depends_on: Option<String>,
    pub default: Option<String>,
    pub constant: Option<String>,
    pub comment: String,
    pub not_encoded: bool,
    pub not_in_memory: bool,
    pub bitfield_bits: Option<u32>,
    /// Set by the enclosing structure's bitfield-run sweep.
    pub starting_bit_count: u32,
    pub terminates_bitfield: bool,
    /// Total bits of the run this field ends, set only when
    /// `terminates_bitfield` is true.
    pub run_total_bits: u32,
}

impl PrimitiveField {
    pub fn parse(xml: &xml_model::Data) -> PrimitiveField {
        PrimitiveField {
            name: xml.name.clone(),
            in_memory_type: xml.in_memory_type.clone(),
            encoded_type: xml.encoded_type.clone().unwrap_or_else(|| xml.in_memory_type.clone()),
            array: xml.array.clone(),
            variable_array: xml.variable_array.clone(),
            depends_on: xml.depends_on.clone(),
            default: xml.default.clone(),
            constant: xml.constant.clone(),
            comment: xml.comment.clone(),
            not_encoded: xml.not_encoded,
            not_in_memory: xml.not_in_memory,
            bitfield_bits: xml.bits,
            starting_bit_count: 0,
            terminates_bitfield: false,
            run_total_bits: 0,
        }
    }

    pub fn is_bitfield(&self) -> bool {
        self.bitfield_bits.is_some()
    }

    pub fn is_array(&self) -> bool {
        self.array.is_some()
    }

    fn type_info(&self) -> TypeInfo {
        resolve_type(&self.in_memory_type)
    }

    pub fn c_type(&self) -> &'static str {
        if self.is_bitfield() {
            "uint32_t"
        } else {
            self.type_info().c_type
        }
    }

    /// Byte contribution of one element, before any array multiplication.
    /// Non-terminating bitfield members contribute nothing; the run's total
    /// bytes land entirely on the terminator.
    fn base_encoded_length(&self) -> String {
        if self.is_bitfield() {
            if self.terminates_bitfield {
                self.run_total_bits.div_ceil(8).to_string()
            } else {
                "0".to_string()
            }
        } else {
            self.type_info().width.to_string()
        }
    }

    /// This field's own contribution to the enclosing structure's
    /// [`EncodedLength`] (§3, §4.4 step 7).
    pub fn encoded_length(&self) -> EncodedLength {
        let base = self.base_encoded_length();

        let mut length = match &self.array {
            Some(count) => {
                let full = length::multiply_by(&base, count);
                if self.variable_array.is_some() {
                    EncodedLength { min: "0".to_string(), max: full.clone(), non_default: full }
                } else {
                    EncodedLength::exact(full)
                }
            }
            None => {
                let non_default = if self.default.is_some() { "0".to_string() } else { base.clone() };
                EncodedLength { min: base.clone(), max: base, non_default }
            }
        };

        if self.depends_on.is_some() {
            length.min = "0".to_string();
        }

        length
    }

    /// `user->name` or, for the indexed element of an array, `user->name[i]`.
    fn member_ref(&self, index: Option<&str>) -> String {
        match index {
            Some(i) => format!("user->{}[{i}]", self.name),
            None => format!("user->{}", self.name),
        }
    }

    /// `for(i=0; …; i++)` wrapping `body_stmt`, guarded by the
    /// `variableArray` target when present (§4.3, §4.4, §8 scenario 3).
    fn wrap_array_loop(&self, count: &str, body_stmt: &str) -> String {
        let condition = match &self.variable_array {
            Some(var) => format!("i < (int)user->{var} && i < {count}"),
            None => format!("i < {count}"),
        };
        format!("for(i=0; {condition}; i++)\n    {{\n        {body_stmt}\n    }}")
    }

    fn render_scalar_encode_stmt(&self, big_endian: bool, member: &str) -> String {
        if self.is_bitfield() {
            let bits = self.bitfield_bits.unwrap_or(0);
            return format!("{}({member}, {bits}, data, &bitcount, &byteindex);", bitfieldspecial::ENCODE_BITFIELD);
        }

        let info = self.type_info();
        let func = if info.is_float {
            match info.width {
                8 => floatspecial::FLOAT64_TO_BE_BYTES,
                _ => floatspecial::FLOAT32_TO_BE_BYTES,
            }
        } else {
            integer_encode_fn(info.width, info.is_signed, big_endian)
        };

        format!("byteindex = {func}({member}, data, byteindex);")
    }

    fn render_scalar_decode_stmt(&self, big_endian: bool, member: &str) -> String {
        if self.is_bitfield() {
            let bits = self.bitfield_bits.unwrap_or(0);
            return format!("{member} = {}(data, &bitcount, &byteindex, {bits});", bitfieldspecial::DECODE_BITFIELD);
        }

        let info = self.type_info();
        let func = if info.is_float {
            match info.width {
                8 => floatspecial::FLOAT64_FROM_BE_BYTES,
                _ => floatspecial::FLOAT32_FROM_BE_BYTES,
            }
        } else {
            integer_decode_fn(info.width, info.is_signed, big_endian)
        };

        format!("{member} = {func}(data, &byteindex);")
    }

    /// C call that packs this field's in-memory value into the output
    /// buffer, advancing `byteindex`. Arrays iterate over every element
    /// (§4.3, §4.4, §8 scenario 3).
    pub fn render_encode_call(&self, big_endian: bool) -> String {
        if self.not_encoded {
            return String::new();
        }
        if let Some(constant) = &self.constant {
            return format!("/* {} is constant ({}); not re-encoded */", self.name, constant);
        }

        match &self.array {
            Some(count) => {
                let element = self.render_scalar_encode_stmt(big_endian, &self.member_ref(Some("i")));
                self.wrap_array_loop(count, &element)
            }
            None => self.render_scalar_encode_stmt(big_endian, &self.member_ref(None)),
        }
    }

    /// C call that unpacks this field from the input buffer into the user
    /// struct, advancing `byteindex`. Arrays iterate over every element
    /// (§4.3, §4.4, §8 scenario 3).
    pub fn render_decode_call(&self, big_endian: bool) -> String {
        if self.not_encoded {
            return String::new();
        }
        if self.constant.is_some() {
            return String::new();
        }

        match &self.array {
            Some(count) => {
                let element = self.render_scalar_decode_stmt(big_endian, &self.member_ref(Some("i")));
                self.wrap_array_loop(count, &element)
            }
            None => self.render_scalar_decode_stmt(big_endian, &self.member_ref(None)),
        }
    }

    /// Struct-member declaration line, or `None` when the field never
    /// occupies memory.
    pub fn render_decl(&self) -> Option<String> {
        if self.not_in_memory {
            return None;
        }
        let array_suffix = self.array.as_deref().map(|n| format!("[{n}]")).unwrap_or_default();
        Some(format!("{} {}{};", self.c_type(), self.name, array_suffix))
    }

    /// `Bytes | Name | Enc | Repeat | Description` Markdown row (§4.6).
    pub fn render_markdown_row(&self, start_byte: &str) -> String {
        let bytes_cell = self.encoded_length().max;
        let repeat_cell = self.array.as_deref().unwrap_or("");
        format!(
            "| {} | {} | {} | {} | {} |",
            if bytes_cell.is_empty() { "||".to_string() } else { format!("{start_byte}, {bytes_cell}") },
            self.name,
            self.encoded_type,
            if repeat_cell.is_empty() { "||".to_string() } else { repeat_cell.to_string() },
            self.comment
        )
    }
}

fn integer_encode_fn(width: u32, signed: bool, big_endian: bool) -> &'static str {
    match (width, signed, big_endian) {
        (1, false, _) => fieldencode::UINT8_TO_BYTES,
        (1, true, _) => fieldencode::INT8_TO_BYTES,
        (2, false, true) => fieldencode::UINT16_TO_BE_BYTES,
        (2, false, false) => fieldencode::UINT16_TO_LE_BYTES,
        (2, true, true) => fieldencode::INT16_TO_BE_BYTES,
        (2, true, false) => fieldencode::INT16_TO_LE_BYTES,
        (_, false, true) => fieldencode::UINT32_TO_BE_BYTES,
        (_, false, false) => fieldencode::UINT32_TO_LE_BYTES,
        (_, true, true) => fieldencode::INT32_TO_BE_BYTES,
        (_, true, false) => fieldencode::INT32_TO_LE_BYTES,
    }
}

fn integer_decode_fn(width: u32, signed: bool, big_endian: bool) -> &'static str {
    match (width, signed, big_endian) {
        (1, false, _) => fielddecode::UINT8_FROM_BYTES,
        (1, true, _) => fielddecode::INT8_FROM_BYTES,
        (2, false, true) => fielddecode::UINT16_FROM_BE_BYTES,
        (2, false, false) => fielddecode::UINT16_FROM_LE_BYTES,
        (2, true, true) => fielddecode::INT16_FROM_BE_BYTES,
        (2, true, false) => fielddecode::INT16_FROM_LE_BYTES,
        (_, false, true) => fielddecode::UINT32_FROM_BE_BYTES,
        (_, false, false) => fielddecode::UINT32_FROM_LE_BYTES,
        (_, true, true) => fielddecode::INT32_FROM_BE_BYTES,
        (_, true, false) => fielddecode::INT32_FROM_LE_BYTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str, in_memory_type: &str) -> xml_model::Data {
        xml_model::Data {
            name: name.to_string(),
            in_memory_type: in_memory_type.to_string(),
            encoded_type: None,
            bits: None,
            array: None,
            variable_array: None,
            depends_on: None,
            default: None,
            constant: None,
            comment: String::new(),
            not_encoded: false,
            not_in_memory: false,
        }
    }

    #[test]
    fn plain_field_length_is_type_width() {
        let field = PrimitiveField::parse(&data("n", "unsigned16"));
        let length = field.encoded_length();
        assert_eq!(length.min, "2");
        assert_eq!(length.max, "2");
        assert_eq!(length.non_default, "2");
    }

    #[test]
    fn fixed_array_scales_length() {
        let mut xml = data("payload", "uint8");
        xml.array = Some("16".to_string());
        let field = PrimitiveField::parse(&xml);
        let length = field.encoded_length();
        assert_eq!(length.min, "16");
        assert_eq!(length.max, "16");
    }

    #[test]
    fn variable_array_has_zero_min() {
        let mut xml = data("payload", "uint8");
        xml.array = Some("16".to_string());
        xml.variable_array = Some("count".to_string());
        let field = PrimitiveField::parse(&xml);
        let length = field.encoded_length();
        assert_eq!(length.min, "0");
        assert_eq!(length.max, "16");
    }

    #[test]
    fn default_field_excluded_from_non_default_length() {
        let mut xml = data("c", "uint32");
        xml.default = Some("0".to_string());
        let field = PrimitiveField::parse(&xml);
        let length = field.encoded_length();
        assert_eq!(length.min, "4");
        assert_eq!(length.non_default, "0");
    }

    #[test]
    fn depends_on_zeroes_minimum() {
        let mut xml = data("opt", "uint8");
        xml.depends_on = Some("flag".to_string());
        let field = PrimitiveField::parse(&xml);
        assert_eq!(field.encoded_length().min, "0");
    }

    #[test]
    fn constant_field_is_not_decoded() {
        let mut xml = data("magic", "uint8");
        xml.constant = Some("0xAB".to_string());
        let field = PrimitiveField::parse(&xml);
        assert_eq!(field.render_decode_call(true), "");
        assert!(field.render_encode_call(true).contains("constant"));
    }

    #[test]
    fn variable_array_encode_emits_guarded_loop_over_elements() {
        let mut xml = data("payload", "uint8");
        xml.array = Some("16".to_string());
        xml.variable_array = Some("count".to_string());
        let field = PrimitiveField::parse(&xml);

        let encode = field.render_encode_call(true);
        assert!(encode.starts_with("for(i=0; i < (int)user->count && i < 16; i++)"));
        assert!(encode.contains("user->payload[i]"));
        assert!(!encode.contains("user->payload,"));

        let decode = field.render_decode_call(true);
        assert!(decode.starts_with("for(i=0; i < (int)user->count && i < 16; i++)"));
        assert!(decode.contains("user->payload[i] ="));
    }

    #[test]
    fn fixed_array_loop_has_no_count_guard() {
        let mut xml = data("samples", "uint16");
        xml.array = Some("4".to_string());
        let field = PrimitiveField::parse(&xml);

        let encode = field.render_encode_call(true);
        assert!(encode.starts_with("for(i=0; i < 4; i++)"));
        assert!(!encode.contains("&&"));
    }

    #[test]
    fn bitfield_terminator_carries_run_bytes() {
        let mut xml = data("flags", "uint8");
        xml.bits = Some(8);
        let mut field = PrimitiveField::parse(&xml);
        field.terminates_bitfield = true;
        field.run_total_bits = 16;
        assert_eq!(field.encoded_length().max, "2");
    }
}
