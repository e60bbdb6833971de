//! Inline formatting (DOM inline children → styled runs)
//!
//! Every child of an element is classified exactly once into an [`InlineKind`]
//! and then handled by an exhaustive match.
//!
//! In [`InlineMode::Flatten`] (the default) `strong`/`em`/`u`/`a` take the
//! flattened text of their whole subtree as a single run, so formatting nested
//! below them is lost, and any other element is recursed into with a fresh,
//! unstyled state. [`InlineMode::Cascade`] instead accumulates flags down the
//! tree and merges adjacent runs that end up with identical flags.

use super::{local_name, ElementFault};
use crate::ir::StyledRun;
use markup5ever_rcdom::{Handle, NodeData};

/// How nested inline styles are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InlineMode {
    /// Shallow: styled elements contribute their flattened text as one run.
    #[default]
    Flatten,
    /// Recursive: flags accumulate through nested styled elements.
    Cascade,
}

impl InlineMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "flatten" => Some(InlineMode::Flatten),
            "cascade" => Some(InlineMode::Cascade),
            _ => None,
        }
    }
}

/// Classification of a single child node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InlineKind {
    Text(String),
    Bold,
    Italic,
    Underline,
    Link,
    Other(String),
    /// Comments, doctypes and processing instructions carry no inline content.
    Skip,
}

pub(crate) fn classify(node: &Handle) -> Result<InlineKind, ElementFault> {
    let kind = match &node.data {
        NodeData::Text { contents } => {
            let contents = contents
                .try_borrow()
                .map_err(|_| ElementFault::new("#text", "text node is being modified"))?;
            InlineKind::Text(contents.to_string())
        }
        NodeData::Element { .. } => match local_name(node).unwrap_or_default() {
            "strong" => InlineKind::Bold,
            "em" => InlineKind::Italic,
            "u" => InlineKind::Underline,
            "a" => InlineKind::Link,
            other => InlineKind::Other(other.to_string()),
        },
        NodeData::Document
        | NodeData::Doctype { .. }
        | NodeData::Comment { .. }
        | NodeData::ProcessingInstruction { .. } => InlineKind::Skip,
    };
    Ok(kind)
}

/// Produce the styled runs for the inline content of `element`.
pub fn format_inline(element: &Handle, mode: InlineMode) -> Result<Vec<StyledRun>, ElementFault> {
    let mut runs = Vec::new();
    match mode {
        InlineMode::Flatten => flatten_children(element, &mut runs)?,
        InlineMode::Cascade => {
            cascade_children(element, &StyledRun::plain(""), &mut runs)?;
            runs = merge_adjacent(runs);
        }
    }
    Ok(runs)
}

fn flatten_children(element: &Handle, runs: &mut Vec<StyledRun>) -> Result<(), ElementFault> {
    for child in children(element)?.iter() {
        match classify(child)? {
            InlineKind::Text(text) => runs.push(StyledRun::plain(text)),
            InlineKind::Bold => runs.push(StyledRun::plain(text_content(child)?).bold()),
            InlineKind::Italic => runs.push(StyledRun::plain(text_content(child)?).italic()),
            InlineKind::Underline | InlineKind::Link => {
                runs.push(StyledRun::plain(text_content(child)?).underline())
            }
            InlineKind::Other(tag) => {
                log::trace!("recursing into <{tag}> with unstyled state");
                flatten_children(child, runs)?;
            }
            InlineKind::Skip => {}
        }
    }
    Ok(())
}

fn cascade_children(
    element: &Handle,
    style: &StyledRun,
    runs: &mut Vec<StyledRun>,
) -> Result<(), ElementFault> {
    for child in children(element)?.iter() {
        match classify(child)? {
            InlineKind::Text(text) => runs.push(style.with_text(text)),
            InlineKind::Bold => cascade_children(child, &style.clone().bold(), runs)?,
            InlineKind::Italic => cascade_children(child, &style.clone().italic(), runs)?,
            InlineKind::Underline | InlineKind::Link => {
                cascade_children(child, &style.clone().underline(), runs)?
            }
            InlineKind::Other(_) => cascade_children(child, style, runs)?,
            InlineKind::Skip => {}
        }
    }
    Ok(())
}

fn merge_adjacent(runs: Vec<StyledRun>) -> Vec<StyledRun> {
    let mut merged: Vec<StyledRun> = Vec::with_capacity(runs.len());
    for run in runs {
        match merged.last_mut() {
            Some(last) if last.same_style(&run) => {
                *last = last.with_text(format!("{}{}", last.text(), run.text()));
            }
            _ => merged.push(run),
        }
    }
    merged
}

/// Concatenated text of every text node below `node`, in document order.
pub(crate) fn text_content(node: &Handle) -> Result<String, ElementFault> {
    let mut out = String::new();
    collect_text(node, &mut out)?;
    Ok(out)
}

fn collect_text(node: &Handle, out: &mut String) -> Result<(), ElementFault> {
    match &node.data {
        NodeData::Text { contents } => {
            let contents = contents
                .try_borrow()
                .map_err(|_| ElementFault::new("#text", "text node is being modified"))?;
            out.push_str(&contents);
        }
        _ => {
            for child in children(node)?.iter() {
                collect_text(child, out)?;
            }
        }
    }
    Ok(())
}

fn children(node: &Handle) -> Result<std::cell::Ref<'_, Vec<Handle>>, ElementFault> {
    node.children.try_borrow().map_err(|_| {
        ElementFault::new(
            local_name(node).unwrap_or("#node"),
            "children are being modified",
        )
    })
}
