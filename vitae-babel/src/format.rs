//! Format trait definition
//!
//! This module defines the core Format trait that all export formats implement.
//! A format turns the converted [`Block`] sequence into its serialized bytes by
//! feeding a [`DocumentSink`](crate::sink::DocumentSink) and finishing it.

use crate::error::FormatError;
use crate::formats::html::InlineMode;
use crate::ir::Block;
use crate::sink::DocumentSink;

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedDocument {
    bytes: Vec<u8>,
}

impl SerializedDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Physical page sizes supported by the paginated exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in PostScript points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    /// Width and height in twentieths of a point, as used by WordprocessingML.
    pub fn twips(self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a4" => Some(PageSize::A4),
            "letter" | "us-letter" => Some(PageSize::Letter),
            _ => None,
        }
    }
}

/// Layout knobs for the PDF export.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    pub page_size: PageSize,
    /// Page margin on all four sides, in points
    pub margin: f32,
    /// Font size of paragraphs and list items, in points
    pub body_font_size: f32,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 56.0,
            body_font_size: 11.0,
        }
    }
}

/// Options shared by all export formats.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Document title written into the output metadata
    pub title: String,
    /// How nested inline styles are resolved during import
    pub inline_mode: InlineMode,
    pub pdf: PdfOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Resume".to_string(),
            inline_mode: InlineMode::default(),
            pdf: PdfOptions::default(),
        }
    }
}

impl ExportOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Trait for export formats
///
/// Implementors create a fresh sink per call, append every block in order and
/// finish the sink. Formats are stateless apart from their configuration, so
/// one instance can serialize any number of documents.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn create_sink(&self, options: &ExportOptions) -> Box<dyn DocumentSink> {
///         Box::new(MySink::new(options))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "pdf", "docx")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// MIME type of the serialized output
    fn mime_type(&self) -> &str {
        "application/octet-stream"
    }

    /// Create an empty sink configured by `options`.
    fn create_sink(&self, options: &ExportOptions) -> Box<dyn DocumentSink>;

    /// Serialize a block sequence.
    fn serialize(
        &self,
        blocks: &[Block],
        options: &ExportOptions,
    ) -> Result<SerializedDocument, FormatError> {
        let mut sink = self.create_sink(options);
        for block in blocks {
            sink.append_block(block);
        }
        let bytes = sink.finish()?;
        log::debug!("{} export produced {} bytes", self.name(), bytes.len());
        Ok(SerializedDocument::new(bytes))
    }
}
