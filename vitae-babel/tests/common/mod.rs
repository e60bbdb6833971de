//! Shared helpers for the integration tests.

use std::io::{Cursor, Read};
use vitae_babel::{Block, StyledRun};

pub const RESUME_FIXTURE: &str = include_str!("../fixtures/resume.html");

/// One line per block: kind, then every run with its flags.
///
/// `ol: "Mentored " {u}"three"` is an ordered list item with a plain and an
/// underlined run.
pub fn dump(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(|block| {
            let kind = match block {
                Block::Heading { level, .. } => format!("h{level}"),
                Block::Paragraph { .. } => "p".to_string(),
                Block::ListItem { ordered: true, .. } => "ol".to_string(),
                Block::ListItem { ordered: false, .. } => "ul".to_string(),
            };
            let runs: Vec<String> = block.runs().iter().map(dump_run).collect();
            format!("{kind}: {}", runs.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn dump_run(run: &StyledRun) -> String {
    let mut flags = String::new();
    if run.is_bold() {
        flags.push('b');
    }
    if run.is_italic() {
        flags.push('i');
    }
    if run.is_underline() {
        flags.push('u');
    }
    if flags.is_empty() {
        format!("{:?}", run.text())
    } else {
        format!("{{{flags}}}{:?}", run.text())
    }
}

/// Names of every entry in a zip archive, in archive order.
pub fn zip_entries(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

/// Contents of one zip entry as UTF-8.
pub fn zip_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}
