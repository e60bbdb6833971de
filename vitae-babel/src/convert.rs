//! One-pass conversion of an HTML string into the requested formats.
//!
//! The HTML is walked once; the resulting block sequence is fed to every
//! selected sink. Each format succeeds or fails on its own, so a caller can
//! still deliver the PDF when the DOCX packaging failed and vice versa.

use crate::error::FormatError;
use crate::format::{ExportOptions, Format};
use crate::formats::docx::DocxFormat;
use crate::formats::html::HtmlImporter;
use crate::formats::pdf::PdfFormat;
use crate::ir::Block;

/// Which outputs to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSelection {
    pub pdf: bool,
    pub docx: bool,
}

impl FormatSelection {
    pub fn both() -> Self {
        Self {
            pdf: true,
            docx: true,
        }
    }

    pub fn pdf_only() -> Self {
        Self {
            pdf: true,
            docx: false,
        }
    }

    pub fn docx_only() -> Self {
        Self {
            pdf: false,
            docx: true,
        }
    }

    /// Parse `pdf`, `docx` or `all`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::pdf_only()),
            "docx" => Some(Self::docx_only()),
            "all" | "both" => Some(Self::both()),
            _ => None,
        }
    }
}

impl Default for FormatSelection {
    fn default() -> Self {
        Self::both()
    }
}

/// Per-format outcome of [`convert`]. A format that was not selected is
/// `None`.
#[derive(Debug)]
pub struct Conversion {
    pub pdf: Option<Result<Vec<u8>, FormatError>>,
    pub docx: Option<Result<Vec<u8>, FormatError>>,
}

impl Conversion {
    pub fn pdf_bytes(&self) -> Option<&[u8]> {
        self.pdf.as_ref()?.as_ref().ok().map(Vec::as_slice)
    }

    pub fn docx_bytes(&self) -> Option<&[u8]> {
        self.docx.as_ref()?.as_ref().ok().map(Vec::as_slice)
    }

    /// True when at least one requested format was produced.
    pub fn any_succeeded(&self) -> bool {
        self.pdf_bytes().is_some() || self.docx_bytes().is_some()
    }
}

/// Convert `html` into every format in `selection`.
pub fn convert(html: &str, selection: &FormatSelection, options: &ExportOptions) -> Conversion {
    let blocks = HtmlImporter::new(options.inline_mode).parse(html);
    convert_blocks(&blocks, selection, options)
}

/// Like [`convert`], for an already imported block sequence.
pub fn convert_blocks(
    blocks: &[Block],
    selection: &FormatSelection,
    options: &ExportOptions,
) -> Conversion {
    Conversion {
        pdf: selection
            .pdf
            .then(|| export(&PdfFormat::new(), blocks, options)),
        docx: selection
            .docx
            .then(|| export(&DocxFormat::new(), blocks, options)),
    }
}

fn export(
    format: &dyn Format,
    blocks: &[Block],
    options: &ExportOptions,
) -> Result<Vec<u8>, FormatError> {
    format
        .serialize(blocks, options)
        .map(|doc| doc.into_bytes())
        .map_err(|err| {
            log::error!("{} export failed: {err}", format.name());
            err
        })
}
