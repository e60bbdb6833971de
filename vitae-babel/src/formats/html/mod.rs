//! HTML import (HTML → Block sequence)
//!
//! This module turns server-rendered resume HTML into the flat [`Block`]
//! sequence consumed by the export formats.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` pair for parsing:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! The parser accepts fragments as well as full documents and never fails on
//! malformed markup, so import itself is infallible.
//!
//! # Element Mapping Table
//!
//! | HTML                 | Block / Run                        | Notes                                     |
//! |----------------------|------------------------------------|-------------------------------------------|
//! | `<h1>` … `<h6>`      | `Block::Heading(level)`            | Level is the tag's numeric suffix         |
//! | `<p>`                | `Block::Paragraph`                 |                                           |
//! | `<ul>` / `<ol>`      | one `Block::ListItem` per `<li>`   | Direct `<li>` children only               |
//! | `<li>`               | (none on its own)                  | Only reached through its parent list      |
//! | Text                 | plain run                          | Literal text, whitespace kept             |
//! | `<strong>`           | bold run                           | Flattened subtree text                    |
//! | `<em>`               | italic run                         | Flattened subtree text                    |
//! | `<u>`                | underline run                      | Flattened subtree text                    |
//! | `<a>`                | underline run                      | Target discarded                          |
//! | anything else        | recursed                           | Contributes its children's runs           |
//!
//! # Ordering
//!
//! Blocks come out in document (pre-order) order over the whole tree, not per
//! subtree: a list nested inside a list item is met by the scan after its
//! parent list has emitted all of its own items.
//!
//! # Fault Isolation
//!
//! A node that cannot be read while it is being processed (for instance
//! because another borrower holds it) is an [`ElementFault`]. The walker logs
//! the fault, drops that single element, and keeps going.

mod inline;
mod walker;

pub use inline::{format_inline, InlineMode};
pub use walker::{walk_node, WalkStats};

use crate::ir::Block;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use thiserror::Error;

/// A DOM node that could not be processed. Never surfaces past the walker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot process <{tag}>: {reason}")]
pub struct ElementFault {
    pub tag: String,
    pub reason: String,
}

impl ElementFault {
    pub(crate) fn new(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}

/// HTML importer with a configurable inline mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlImporter {
    mode: InlineMode,
}

impl HtmlImporter {
    pub fn new(mode: InlineMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> InlineMode {
        self.mode
    }

    /// Parse `source` and return its blocks in document order.
    pub fn parse(&self, source: &str) -> Vec<Block> {
        self.parse_with_stats(source).0
    }

    /// Like [`HtmlImporter::parse`], also returning walk statistics.
    pub fn parse_with_stats(&self, source: &str) -> (Vec<Block>, WalkStats) {
        let dom = parse_dom(source);
        let (blocks, stats) = walk_node(&dom.document, self.mode);
        log::debug!(
            "html import: {} elements visited, {} blocks emitted, {} faults",
            stats.visited,
            stats.emitted,
            stats.faults
        );
        (blocks, stats)
    }
}

/// Parse an HTML string (fragment or full document) into a DOM.
pub fn parse_dom(source: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(source)
}

/// Local (namespace-free) tag name of an element node.
pub(crate) fn local_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Every element named `tag` below `root`, in document order.
pub fn find_elements(root: &Handle, tag: &str) -> Vec<Handle> {
    let mut found = Vec::new();
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if local_name(&node) == Some(tag) {
            found.push(node.clone());
        }
        if let Ok(children) = node.children.try_borrow() {
            stack.extend(children.iter().rev().cloned());
        }
    }
    found
}
