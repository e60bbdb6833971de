//! Format implementations
//!
//! `html` is the import side (HTML string → blocks); `pdf` and `docx` are the
//! export sinks.

pub mod docx;
pub mod html;
pub mod pdf;

pub use docx::{DocxFormat, DocxSink};
pub use html::{HtmlImporter, InlineMode};
pub use pdf::{PdfFormat, PdfSink};
