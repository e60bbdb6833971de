//! Greedy line breaking for styled runs.
//!
//! Whitespace is collapsed the way a browser would render it: any whitespace
//! sequence, even one spanning several runs, becomes a single space, and
//! spaces at the start of a line are dropped.

use super::metrics::{text_width, FontVariant};
use crate::ir::StyledRun;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fragment {
    pub text: String,
    pub font: FontVariant,
    pub underline: bool,
    /// Offset from the line start, in points
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Line {
    pub fragments: Vec<Fragment>,
    pub width: f32,
}

impl Line {
    fn push(&mut self, text: &str, font: FontVariant, underline: bool, size: f32) {
        let width = text_width(text, font, size);
        match self.fragments.last_mut() {
            Some(last) if last.font == font && last.underline == underline => {
                last.text.push_str(text);
                last.width += width;
            }
            _ => self.fragments.push(Fragment {
                text: text.to_string(),
                font,
                underline,
                x: self.width,
                width,
            }),
        }
        self.width += width;
    }
}

#[derive(Debug, Clone, Copy)]
struct Style {
    font: FontVariant,
    underline: bool,
}

/// A word is every piece of text between two whitespace runs. Its pieces can
/// come from several styled runs (`Hel<strong>lo</strong>`) and are never
/// split across lines.
enum Token<'a> {
    Word(Vec<(&'a str, Style)>),
    Space(Style),
}

fn push_piece<'a>(tokens: &mut Vec<Token<'a>>, piece: &'a str, style: Style) {
    match tokens.last_mut() {
        Some(Token::Word(pieces)) => pieces.push((piece, style)),
        _ => tokens.push(Token::Word(vec![(piece, style)])),
    }
}

fn tokenize(runs: &[StyledRun], force_bold: bool) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for run in runs {
        let style = Style {
            font: FontVariant::select(force_bold || run.is_bold(), run.is_italic()),
            underline: run.is_underline(),
        };
        let text = run.text();
        let mut start = None;
        for (idx, c) in text.char_indices() {
            if c.is_whitespace() {
                if let Some(s) = start.take() {
                    push_piece(&mut tokens, &text[s..idx], style);
                }
                tokens.push(Token::Space(style));
            } else if start.is_none() {
                start = Some(idx);
            }
        }
        if let Some(s) = start {
            push_piece(&mut tokens, &text[s..], style);
        }
    }
    tokens
}

/// Break `runs` into lines no wider than `max_width`. A single word wider
/// than the line is placed on its own line and allowed to overflow.
pub(crate) fn break_lines(
    runs: &[StyledRun],
    force_bold: bool,
    size: f32,
    max_width: f32,
) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();
    let mut pending_space: Option<Style> = None;

    for token in tokenize(runs, force_bold) {
        match token {
            Token::Space(style) => {
                if !line.fragments.is_empty() && pending_space.is_none() {
                    pending_space = Some(style);
                }
            }
            Token::Word(pieces) => {
                let word_width: f32 = pieces
                    .iter()
                    .map(|(piece, style)| text_width(piece, style.font, size))
                    .sum();
                let space_width = pending_space
                    .map(|s| text_width(" ", s.font, size))
                    .unwrap_or(0.0);
                if !line.fragments.is_empty() && line.width + space_width + word_width > max_width
                {
                    lines.push(std::mem::take(&mut line));
                    pending_space = None;
                }
                if let Some(space) = pending_space.take() {
                    line.push(" ", space.font, space.underline, size);
                }
                for (piece, style) in pieces {
                    line.push(piece, style.font, style.underline, size);
                }
            }
        }
    }

    if !line.fragments.is_empty() {
        lines.push(line);
    }
    lines
}
