//! Packet documentation: a heading, identifier/length bullets, nested
//! enum tables, and a depth-first encoding table (§4.6).

use std::fmt::Write as _;

use crate::transform::length;
use crate::transform::packet::PacketModel;
use crate::transform::structure::Child;

struct Row {
    outline: String,
    bytes: String,
    name: String,
    enc: String,
    repeat: String,
    description: String,
}

fn merged_or(cell: &str) -> String {
    if cell.is_empty() {
        "||".to_string()
    } else {
        cell.to_string()
    }
}

fn walk(children: &[Child], outline: &mut Vec<usize>, start_byte: &mut String, rows: &mut Vec<Row>) {
    for (i, child) in children.iter().enumerate() {
        outline.push(i + 1);
        let outline_str = format!(
            "{})",
            outline.iter().map(usize::to_string).collect::<Vec<_>>().join(".")
        );

        match child {
            Child::Primitive(f) => {
                let field_length = f.encoded_length();
                rows.push(Row {
                    outline: outline_str,
                    bytes: format!("{start_byte}, {}", field_length.max),
                    name: f.name.clone(),
                    enc: f.encoded_type.clone(),
                    repeat: f.array.clone().unwrap_or_default(),
                    description: f.comment.clone(),
                });
                *start_byte = length::add(start_byte, &field_length.max);
            }
            Child::Structure(s) => {
                rows.push(Row {
                    outline: outline_str,
                    bytes: format!("{start_byte}, {}", s.encoded_length.max),
                    name: s.name.clone(),
                    enc: "structure".to_string(),
                    repeat: s.array.clone().unwrap_or_default(),
                    description: s.comment.clone(),
                });
                walk(&s.children, outline, start_byte, rows);
            }
        }

        outline.pop();
    }
}

/// Renders the full Markdown section for one packet.
pub fn render_packet_markdown(packet: &PacketModel) -> String {
    let mut out = String::new();
    let id = packet.id_literal();
    let anchor = id.to_lowercase().replace(['_', ' '], "-");

    let _ = writeln!(out, "## {} {{#{anchor}}}", packet.structure.name);
    let _ = writeln!(out, "- **Identifier:** {id}");
    let _ = writeln!(
        out,
        "- **Length:** {} to {} bytes",
        packet.structure.encoded_length.min, packet.structure.encoded_length.max
    );
    out.push('\n');

    for e in &packet.structure.enumerations {
        let table = e.render_markdown(&[]);
        if !table.is_empty() {
            let _ = writeln!(out, "### {}", e.name);
            out.push_str(&table);
            out.push('\n');
        }
    }

    if packet.structure.children.is_empty() {
        return out;
    }

    let mut rows = Vec::new();
    let mut outline = Vec::new();
    let mut start_byte = "0".to_string();
    walk(&packet.structure.children, &mut outline, &mut start_byte, &mut rows);

    let headers = ["Bytes", "Name", "Enc", "Repeat", "Description"];
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|r| {
            [
                merged_or(&r.bytes),
                format!("{} {}", r.outline, r.name),
                r.enc.clone(),
                merged_or(&r.repeat),
                r.description.clone(),
            ]
        })
        .collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let pad = |s: &str, w: usize| format!("{s:<w$}");
    let _ = writeln!(
        out,
        "| {} | {} | {} | {} | {} |",
        pad(headers[0], widths[0]),
        pad(headers[1], widths[1]),
        pad(headers[2], widths[2]),
        pad(headers[3], widths[3]),
        pad(headers[4], widths[4])
    );
    let _ = writeln!(
        out,
        "|{}|{}|{}|{}|{}|",
        "-".repeat(widths[0] + 2),
        "-".repeat(widths[1] + 2),
        "-".repeat(widths[2] + 2),
        "-".repeat(widths[3] + 2),
        "-".repeat(widths[4] + 2)
    );
    for row in &cells {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            pad(&row[0], widths[0]),
            pad(&row[1], widths[1]),
            pad(&row[2], widths[2]),
            pad(&row[3], widths[3]),
            pad(&row[4], widths[4])
        );
    }

    out
}
