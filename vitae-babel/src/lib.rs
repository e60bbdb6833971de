//! Resume conversion: HTML in, PDF and DOCX out
//!
//!     This crate turns a server-rendered resume (an HTML string) into a paginated PDF and a
//!     word-processor document. It is a pure lib that powers vitae-cli but is shell agnostic:
//!     no code here prints, reads env vars or touches the file system.
//!
//! Architecture
//!
//!     Conversion is a tree-to-tree transformation split in two halves joined by a small IR
//!     (./ir/nodes.rs): a flat sequence of blocks (heading, paragraph, list item), each holding
//!     styled runs of text.
//!
//!     - Import: ./formats/html parses the markup with html5ever and walks the DOM once, in
//!       document order, classifying every element into a block kind. Inline content is turned
//!       into runs by the inline formatter.
//!     - Export: every output format implements the Format trait (./format.rs) and hands out a
//!       DocumentSink (./sink.rs). Blocks are appended in order and the sink is finished into
//!       bytes.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait, export options
//!     ├── sink.rs                 # DocumentSink trait
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── convert.rs              # One walk, every selected sink
//!     ├── fetch.rs                # Resume API client (feature "fetch")
//!     ├── formats
//!     │   ├── html                # Block walker + inline formatter
//!     │   ├── pdf                 # Layout + pdf-writer rendering
//!     │   └── docx                # WordprocessingML parts + zip packaging
//!     ├── ir                      # Intermediate Representation
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # aggregates the subdirectories
//!     ├── html/
//!     ├── pdf/
//!     ├── docx/
//!     ├── fetch/                  # local one-shot HTTP server
//!     ├── conversion/             # whole pipeline, idempotence
//!     └── fixtures/
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Library Choices
//!
//!     - html5ever + markup5ever_rcdom: browser-grade parsing, never fails on bad markup.
//!     - pdf-writer: low level PDF objects; the layout is ours, the fonts are the base-14
//!       Helvetica family so nothing is embedded.
//!     - zip: packaging of the DOCX parts, which are plain XML strings.
//!     - reqwest (blocking): the single HTTP GET of the fetch adapter.
pub mod convert;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;
pub mod sink;

pub use convert::{convert, convert_blocks, Conversion, FormatSelection};
pub use error::FormatError;
pub use format::{ExportOptions, Format, PageSize, PdfOptions, SerializedDocument};
pub use formats::html::InlineMode;
pub use ir::{Block, HeadingLevel, StyledRun};
pub use registry::FormatRegistry;
pub use sink::DocumentSink;

/// Parse an HTML string into its blocks, using the default inline mode.
///
/// Never fails: malformed markup is repaired by the parser and elements that
/// cannot be processed are skipped.
pub fn parse_html(html: &str) -> Vec<Block> {
    formats::html::HtmlImporter::default().parse(html)
}
