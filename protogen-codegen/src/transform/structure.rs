//! Composite encodable: an ordered sequence of primitive and nested
//! structure children, with aggregate flags and length (§3, §4.4).

use protogen_core::Diagnostics;

use super::enum_model::EnumModel;
use super::field::PrimitiveField;
use super::length::EncodedLength;
use crate::parse::xml_model;

/// One positional child of a structure: either a leaf field or a nested
/// structure. Nested `<Enum>` children are hoisted into `enumerations`
/// before this list is built (§4.4 step 2).
#[derive(Debug, Clone)]
pub enum Child {
    Primitive(PrimitiveField),
    Structure(Box<StructureModel>),
}

impl Child {
    pub fn name(&self) -> &str {
        match self {
            Child::Primitive(f) => &f.name,
            Child::Structure(s) => &s.name,
        }
    }

    /// Whether this child is eligible as a `variableArray`/`dependsOn`
    /// target: a primitive, in memory and encoded (§3).
    fn is_reference_target(&self) -> bool {
        match self {
            Child::Primitive(f) => !f.not_in_memory && !f.not_encoded,
            Child::Structure(_) => false,
        }
    }

    fn is_array(&self) -> bool {
        match self {
            Child::Primitive(f) => f.is_array(),
            Child::Structure(s) => s.array.is_some(),
        }
    }

    fn has_variable_array(&self) -> bool {
        match self {
            Child::Primitive(f) => f.variable_array.is_some(),
            Child::Structure(s) => s.variable_array.is_some(),
        }
    }

    pub fn encoded_length(&self) -> EncodedLength {
        match self {
            Child::Primitive(f) => f.encoded_length(),
            Child::Structure(s) => s.encoded_length.clone(),
        }
    }

    pub fn render_decl_line(&self) -> Option<String> {
        match self {
            Child::Primitive(f) => f.render_decl(),
            Child::Structure(s) => {
                let array_suffix = s.array.as_deref().map(|n| format!("[{n}]")).unwrap_or_default();
                Some(format!("{} {}{};", s.type_name, s.name, array_suffix))
            }
        }
    }

    pub fn render_encode_stmt(&self, big_endian: bool) -> String {
        match self {
            Child::Primitive(f) => f.render_encode_call(big_endian),
            Child::Structure(s) => match &s.array {
                Some(count) => {
                    let body = format!("byteindex = encode{}(&user->{}[i], data, byteindex);", s.type_name, s.name);
                    array_loop(count, s.variable_array.as_deref(), &body)
                }
                None => format!("byteindex = encode{}(&user->{}, data, byteindex);", s.type_name, s.name),
            },
        }
    }

    pub fn render_decode_stmt(&self, big_endian: bool) -> String {
        match self {
            Child::Primitive(f) => f.render_decode_call(big_endian),
            Child::Structure(s) => match &s.array {
                Some(count) => {
                    let body = format!("byteindex = decode{}(data, byteindex, &user->{}[i]);", s.type_name, s.name);
                    array_loop(count, s.variable_array.as_deref(), &body)
                }
                None => format!("byteindex = decode{}(data, byteindex, &user->{});", s.type_name, s.name),
            },
        }
    }
}

/// `for(i=0; …; i++)` wrapping `body_stmt`, guarded by the `variableArray`
/// target when present. Mirrors [`super::field::PrimitiveField`]'s loop
/// shape for nested-structure arrays (§4.3, §4.4, §8 scenario 3).
fn array_loop(count: &str, variable_array: Option<&str>, body_stmt: &str) -> String {
    let condition = match variable_array {
        Some(var) => format!("i < (int)user->{var} && i < {count}"),
        None => format!("i < {count}"),
    };
    format!("for(i=0; {condition}; i++)\n    {{\n        {body_stmt}\n    }}")
}

/// Aggregate booleans derived from a single left-to-right walk of a
/// structure's children (§4.4 step 4).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureFlags {
    pub has_bitfields: bool,
    pub needs_iterator: bool,
    pub has_defaults: bool,
}

/// A parsed, validated `<Structure>` (or the structure half of a
/// `<Packet>`, via [`super::packet::PacketModel`]).
#[derive(Debug, Clone)]
pub struct StructureModel {
    pub name: String,
    pub type_name: String,
    pub comment: String,
    pub array: Option<String>,
    pub variable_array: Option<String>,
    pub depends_on: Option<String>,
    /// `file` attribute override for this module's output file name (§4.7).
    pub file: Option<String>,
    pub children: Vec<Child>,
    pub enumerations: Vec<EnumModel>,
    pub encoded_length: EncodedLength,
    pub flags: StructureFlags,
}

impl StructureModel {
    pub fn parse(xml: &xml_model::Structure, prefix: &str, diagnostics: &mut Diagnostics) -> StructureModel {
        let mut array = xml.array.clone();
        let mut variable_array = xml.variable_array.clone();
        let mut depends_on = xml.depends_on.clone();

        if variable_array.is_some() && depends_on.is_some() {
            diagnostics.report(xml.name.as_str(), None, "variableArray and dependsOn cannot both be set; dependsOn cleared");
            depends_on = None;
        }
        if array.is_none() && variable_array.is_some() {
            diagnostics.report(xml.name.as_str(), None, "variableArray requires array; cleared");
            variable_array = None;
        }

        let enumerations: Vec<EnumModel> = xml
            .children
            .iter()
            .filter_map(|c| match c {
                xml_model::StructureChild::Enum(e) => Some(EnumModel::from_xml(e)),
                _ => None,
            })
            .collect();

        let mut children: Vec<Child> = xml
            .children
            .iter()
            .filter_map(|c| match c {
                xml_model::StructureChild::Data(d) => Some(Child::Primitive(PrimitiveField::parse(d))),
                xml_model::StructureChild::Structure(s) => {
                    Some(Child::Structure(Box::new(StructureModel::parse(s, prefix, diagnostics))))
                }
                xml_model::StructureChild::Enum(_) => None,
            })
            .collect();

        validate_cross_references(&xml.name, &mut children, diagnostics);
        revoke_non_trailing_defaults(&xml.name, &mut children, diagnostics);
        detect_bitfield_runs(&mut children);

        let flags = compute_flags(&children);
        let encoded_length = aggregate_length(&children, array.as_deref(), variable_array.as_deref(), depends_on.is_some());

        StructureModel {
            type_name: format!("{prefix}{}_t", xml.name),
            name: xml.name.clone(),
            comment: xml.comment.clone(),
            array,
            variable_array,
            depends_on,
            file: xml.file.clone(),
            children,
            enumerations,
            encoded_length,
            flags,
        }
    }

    /// `typedef struct { … } TypeName;`, nested structures first. Returns
    /// an empty string when the structure has exactly one field and
    /// `always_create` is false (§4.4: callers inline the lone field).
    pub fn render_struct_declaration(&self, always_create: bool) -> String {
        if self.children.len() == 1 && !always_create {
            return String::new();
        }

        let mut out = String::new();
        for child in &self.children {
            if let Child::Structure(s) = child {
                out.push_str(&s.render_struct_declaration(true));
            }
        }

        let lines: Vec<String> = self.children.iter().filter_map(Child::render_decl_line).collect();
        let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);

        out.push_str("typedef struct\n{\n");
        for line in &lines {
            let pad = " ".repeat(width.saturating_sub(line.len()));
            out.push_str(&format!("    {line}{pad}\n"));
        }
        out.push_str(&format!("}} {};\n", self.type_name));
        out
    }

    /// Static encode function body: one `byteindex` cursor, children
    /// emitted in order, trailing `return byteindex` (§4.4).
    pub fn render_encode(&self, big_endian: bool) -> String {
        let mut out = format!(
            "static int encode{}(const {}* user, uint8_t* data, int byteindex)\n{{\n",
            self.type_name, self.type_name
        );
        if self.flags.has_bitfields {
            out.push_str("    int bitcount = 0;\n");
        }
        if self.flags.needs_iterator {
            out.push_str("    int i;\n");
        }
        for child in &self.children {
            let stmt = child.render_encode_stmt(big_endian);
            if !stmt.is_empty() {
                out.push_str(&format!("    {stmt}\n"));
            }
        }
        out.push_str("    return byteindex;\n}\n");
        out
    }

    /// Static decode function body, mirroring [`Self::render_encode`].
    pub fn render_decode(&self, big_endian: bool) -> String {
        let mut out = format!(
            "static int decode{}(const uint8_t* data, int byteindex, {}* user)\n{{\n",
            self.type_name, self.type_name
        );
        if self.flags.has_bitfields {
            out.push_str("    int bitcount = 0;\n");
        }
        if self.flags.needs_iterator {
            out.push_str("    int i;\n");
        }
        for child in &self.children {
            let stmt = child.render_decode_stmt(big_endian);
            if !stmt.is_empty() {
                out.push_str(&format!("    {stmt}\n"));
            }
        }
        out.push_str("    return byteindex;\n}\n");
        out
    }
}

fn compute_flags(children: &[Child]) -> StructureFlags {
    StructureFlags {
        has_bitfields: children.iter().any(|c| matches!(c, Child::Primitive(f) if f.is_bitfield())),
        needs_iterator: children.iter().any(|c| c.is_array() || c.has_variable_array()),
        has_defaults: children
            .iter()
            .any(|c| matches!(c, Child::Primitive(f) if f.default.is_some())),
    }
}

fn aggregate_length(children: &[Child], array: Option<&str>, variable_array: Option<&str>, depends_on: bool) -> EncodedLength {
    let mut total = EncodedLength::zero();
    for child in children {
        total = total.plus(&child.encoded_length());
    }

    let mut total = match array {
        Some(count) => {
            let scaled = total.scaled_by(count);
            if variable_array.is_some() {
                EncodedLength { min: "0".to_string(), ..scaled }
            } else {
                scaled
            }
        }
        None => total,
    };

    if depends_on {
        total.min = "0".to_string();
    }
    total
}

fn validate_cross_references(struct_name: &str, children: &mut [Child], diagnostics: &mut Diagnostics) {
    let mut seen_targets: Vec<String> = Vec::new();

    for i in 0..children.len() {
        let is_target = children[i].is_reference_target();
        let name = children[i].name().to_string();

        let (variable_array, depends_on, is_bitfield) = match &children[i] {
            Child::Primitive(f) => (f.variable_array.clone(), f.depends_on.clone(), f.is_bitfield()),
            Child::Structure(s) => (s.variable_array.clone(), s.depends_on.clone(), false),
        };

        if let Some(target) = &variable_array {
            if !seen_targets.contains(target) {
                diagnostics.report(struct_name, Some(name.as_str()), format!("variableArray references unknown prior sibling '{target}'; cleared"));
                clear_variable_array(&mut children[i]);
            }
        }

        if let Some(target) = &depends_on {
            if is_bitfield {
                diagnostics.report(struct_name, Some(name.as_str()), "dependsOn is forbidden on bitfields; cleared");
                clear_depends_on(&mut children[i]);
            } else if !seen_targets.contains(target) {
                diagnostics.report(struct_name, Some(name.as_str()), format!("dependsOn references unknown prior sibling '{target}'; cleared"));
                clear_depends_on(&mut children[i]);
            }
        }

        if is_target {
            seen_targets.push(name);
        }
    }
}

fn clear_variable_array(child: &mut Child) {
    match child {
        Child::Primitive(f) => f.variable_array = None,
        Child::Structure(s) => s.variable_array = None,
    }
}

fn clear_depends_on(child: &mut Child) {
    match child {
        Child::Primitive(f) => f.depends_on = None,
        Child::Structure(s) => s.depends_on = None,
    }
}

/// Keeps only the trailing run of default-valued primitives; any earlier
/// default is revoked with a diagnostic (§3, §8).
fn revoke_non_trailing_defaults(struct_name: &str, children: &mut [Child], diagnostics: &mut Diagnostics) {
    let mut trailing_start = children.len();
    for child in children.iter().rev() {
        match child {
            Child::Primitive(f) if f.default.is_some() => trailing_start -= 1,
            _ => break,
        }
    }

    for child in children[..trailing_start].iter_mut() {
        if let Child::Primitive(f) = child {
            if f.default.take().is_some() {
                diagnostics.report(
                    struct_name,
                    Some(f.name.as_str()),
                    "default revoked: a non-default field follows it",
                );
            }
        }
    }
}

/// Single left-to-right sweep grouping adjacent bitfield primitives into
/// runs, flipping `terminates_bitfield` on the last member of each run and
/// propagating `starting_bit_count` (§3, §4.3, §8).
fn detect_bitfield_runs(children: &mut [Child]) {
    let mut run_start: Option<usize> = None;
    let mut bit_cursor = 0u32;

    for i in 0..children.len() {
        let is_bitfield = matches!(&children[i], Child::Primitive(f) if f.is_bitfield());

        if is_bitfield {
            if run_start.is_none() {
                run_start = Some(i);
                bit_cursor = 0;
            }
            if let Child::Primitive(f) = &mut children[i] {
                f.starting_bit_count = bit_cursor;
                bit_cursor += f.bitfield_bits.unwrap_or(0);
            }
        } else if let Some(start) = run_start.take() {
            terminate_run(children, start, i, bit_cursor);
        }
    }

    if let Some(start) = run_start {
        let end = children.len();
        terminate_run(children, start, end, bit_cursor);
    }
}

fn terminate_run(children: &mut [Child], start: usize, end: usize, total_bits: u32) {
    if end == start {
        return;
    }
    if let Child::Primitive(f) = &mut children[end - 1] {
        f.terminates_bitfield = true;
        f.run_total_bits = total_bits;
    }
}
