//! Document sinks
//!
//! A sink is a write-only target document: blocks are appended in order and
//! the serialized bytes become available once, when the sink is finished.
//! Every export format is a [`Format`](crate::format::Format) that hands out a
//! fresh sink per document.
//!
//! Sinks must accept empty run slices (an empty block is emitted) and runs
//! with no style flags.

use crate::error::FormatError;
use crate::ir::{Block, HeadingLevel, StyledRun};

pub trait DocumentSink {
    fn append_heading(&mut self, level: HeadingLevel, runs: &[StyledRun]);

    fn append_paragraph(&mut self, runs: &[StyledRun]);

    fn append_list_item(&mut self, ordered: bool, runs: &[StyledRun]);

    /// Consume the sink and return the finished document bytes.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, FormatError>;

    fn append_block(&mut self, block: &Block) {
        match block {
            Block::Heading { level, runs } => self.append_heading(*level, runs),
            Block::Paragraph { runs } => self.append_paragraph(runs),
            Block::ListItem { ordered, runs } => self.append_list_item(*ordered, runs),
        }
    }
}
