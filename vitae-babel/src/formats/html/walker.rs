//! Block walker (DOM → Block sequence)
//!
//! One pre-order scan over the whole tree. Each element is classified once
//! into a [`BlockKind`]; block-producing kinds are converted and the scan
//! then continues into the element's descendants regardless of the outcome.

use super::inline::format_inline;
use super::{local_name, ElementFault, InlineMode};
use crate::ir::{Block, HeadingLevel};
use markup5ever_rcdom::Handle;

/// Counters collected during one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Element nodes met by the scan
    pub visited: usize,
    /// Blocks produced
    pub emitted: usize,
    /// Elements (or list items) dropped because of a fault
    pub faults: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Heading(HeadingLevel),
    Paragraph,
    List { ordered: bool },
    /// `li` and the inline tags: recognised, but they only contribute through
    /// the block that contains them.
    Inline,
    Unrecognized,
}

fn classify(tag: &str) -> BlockKind {
    match tag {
        "p" => BlockKind::Paragraph,
        "ul" => BlockKind::List { ordered: false },
        "ol" => BlockKind::List { ordered: true },
        "li" | "strong" | "em" | "u" | "a" => BlockKind::Inline,
        _ => HeadingLevel::from_tag(tag)
            .map(BlockKind::Heading)
            .unwrap_or(BlockKind::Unrecognized),
    }
}

/// Walk the tree below `root` and collect its blocks in document order.
pub fn walk_node(root: &Handle, mode: InlineMode) -> (Vec<Block>, WalkStats) {
    let mut blocks = Vec::new();
    let mut stats = WalkStats::default();
    let mut stack = vec![root.clone()];

    while let Some(node) = stack.pop() {
        if let Some(tag) = local_name(&node) {
            stats.visited += 1;
            let before = blocks.len();
            let kind = classify(tag);
            if let Err(fault) = convert_element(&node, kind, mode, &mut blocks, &mut stats) {
                log::warn!("skipping element: {fault}");
                stats.faults += 1;
            }
            stats.emitted += blocks.len() - before;
        }

        match node.children.try_borrow() {
            Ok(children) => stack.extend(children.iter().rev().cloned()),
            Err(_) => log::warn!(
                "cannot descend into <{}>: children are being modified",
                local_name(&node).unwrap_or("#node")
            ),
        }
    }

    (blocks, stats)
}

fn convert_element(
    node: &Handle,
    kind: BlockKind,
    mode: InlineMode,
    blocks: &mut Vec<Block>,
    stats: &mut WalkStats,
) -> Result<(), ElementFault> {
    match kind {
        BlockKind::Heading(level) => {
            let runs = format_inline(node, mode)?;
            blocks.push(Block::Heading { level, runs });
        }
        BlockKind::Paragraph => {
            let runs = format_inline(node, mode)?;
            blocks.push(Block::Paragraph { runs });
        }
        BlockKind::List { ordered } => {
            let tag = if ordered { "ol" } else { "ul" };
            let items: Vec<Handle> = node
                .children
                .try_borrow()
                .map_err(|_| ElementFault::new(tag, "children are being modified"))?
                .iter()
                .filter(|child| local_name(child) == Some("li"))
                .cloned()
                .collect();
            for item in items {
                match format_inline(&item, mode) {
                    Ok(runs) => blocks.push(Block::ListItem { ordered, runs }),
                    Err(fault) => {
                        log::warn!("skipping list item: {fault}");
                        stats.faults += 1;
                    }
                }
            }
        }
        BlockKind::Inline | BlockKind::Unrecognized => {}
    }
    Ok(())
}
