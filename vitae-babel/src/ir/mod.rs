//! Intermediate Representation (IR) for converted resumes.
//!
//! The HTML importer produces a flat, ordered sequence of [`nodes::Block`]s;
//! every export format consumes that same sequence.

pub mod nodes;

pub use nodes::{Block, HeadingLevel, StyledRun};
