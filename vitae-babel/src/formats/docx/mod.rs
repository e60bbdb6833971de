//! Word-processor (DOCX) export.
//!
//! Paragraph XML is built incrementally as blocks are appended; `finish`
//! wraps the body into `word/document.xml` and writes the package with `zip`.
//!
//! Headings use the built-in `Heading1`..`Heading6` styles. List items are
//! `ListParagraph`s attached to a numbering instance: every bullet item shares
//! one instance, while each contiguous run of ordered items gets a fresh
//! instance so its numbering starts at 1.
//!
//! Zip entries carry a fixed timestamp, so output is byte-for-byte
//! reproducible.

mod parts;

use crate::error::FormatError;
use crate::format::{ExportOptions, Format, PageSize};
use crate::ir::{HeadingLevel, StyledRun};
use crate::sink::DocumentSink;
use parts::{ParagraphProps, BULLET_ABSTRACT_ID, DECIMAL_ABSTRACT_ID};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

const BULLET_NUM_ID: u32 = 1;

/// DOCX export format
#[derive(Debug, Default)]
pub struct DocxFormat;

impl DocxFormat {
    pub fn new() -> Self {
        Self
    }
}

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Office Open XML word-processing document"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn mime_type(&self) -> &str {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    }

    fn create_sink(&self, options: &ExportOptions) -> Box<dyn DocumentSink> {
        Box::new(DocxSink::new(options))
    }
}

/// Sink accumulating WordprocessingML paragraphs.
pub struct DocxSink {
    title: String,
    page_size: PageSize,
    margin_twips: u32,
    body: String,
    paragraphs: usize,
    /// (numId, abstractNumId) for every numbering instance in use
    nums: Vec<(u32, u32)>,
    /// Instance of the ordered run in progress
    open_ordered: Option<u32>,
}

impl DocxSink {
    pub fn new(options: &ExportOptions) -> Self {
        Self {
            title: options.title.clone(),
            page_size: options.pdf.page_size,
            margin_twips: (options.pdf.margin * 20.0).round() as u32,
            body: String::new(),
            paragraphs: 0,
            nums: vec![(BULLET_NUM_ID, BULLET_ABSTRACT_ID)],
            open_ordered: None,
        }
    }

    fn push(&mut self, props: ParagraphProps<'_>, runs: &[StyledRun]) {
        self.body.push_str(&parts::paragraph_xml(&props, runs));
        self.paragraphs += 1;
    }

    fn ordered_num_id(&mut self) -> u32 {
        if let Some(id) = self.open_ordered {
            return id;
        }
        let id = self.nums.len() as u32 + 1;
        self.nums.push((id, DECIMAL_ABSTRACT_ID));
        self.open_ordered = Some(id);
        id
    }

    fn package(self) -> Result<Vec<u8>, FormatError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());
        let entries: [(&str, String); 7] = [
            ("[Content_Types].xml", parts::content_types_xml().to_string()),
            ("_rels/.rels", parts::package_rels_xml().to_string()),
            ("docProps/core.xml", parts::core_xml(&self.title)),
            (
                "word/document.xml",
                parts::document_xml(&self.body, self.page_size, self.margin_twips),
            ),
            ("word/styles.xml", parts::styles_xml()),
            ("word/numbering.xml", parts::numbering_xml(&self.nums)),
            (
                "word/_rels/document.xml.rels",
                parts::document_rels_xml().to_string(),
            ),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            zip.start_file(name, options)?;
            zip.write_all(contents.as_bytes())?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

impl DocumentSink for DocxSink {
    fn append_heading(&mut self, level: HeadingLevel, runs: &[StyledRun]) {
        self.open_ordered = None;
        let style = format!("Heading{level}");
        self.push(
            ParagraphProps {
                style: Some(&style),
                num_id: None,
            },
            runs,
        );
    }

    fn append_paragraph(&mut self, runs: &[StyledRun]) {
        self.open_ordered = None;
        self.push(
            ParagraphProps {
                style: None,
                num_id: None,
            },
            runs,
        );
    }

    fn append_list_item(&mut self, ordered: bool, runs: &[StyledRun]) {
        let num_id = if ordered {
            self.ordered_num_id()
        } else {
            self.open_ordered = None;
            BULLET_NUM_ID
        };
        self.push(
            ParagraphProps {
                style: Some("ListParagraph"),
                num_id: Some(num_id),
            },
            runs,
        );
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, FormatError> {
        log::debug!(
            "docx: packaging {} paragraph(s), {} numbering instance(s)",
            self.paragraphs,
            self.nums.len()
        );
        self.package()
    }
}
