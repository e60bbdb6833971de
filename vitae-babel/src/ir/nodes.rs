//! Core data structures for the Intermediate Representation (IR).

use serde::Serialize;
use std::fmt;

/// A contiguous span of text sharing one combination of style flags.
///
/// Runs are immutable once built: the builder-style methods consume the run
/// and return a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StyledRun {
    text: String,
    bold: bool,
    italic: bool,
    underline: bool,
}

impl StyledRun {
    /// An unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            underline: false,
        }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    pub fn underline(self) -> Self {
        Self {
            underline: true,
            ..self
        }
    }

    /// Returns a run carrying `text` with the same flags as `self`.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn is_italic(&self) -> bool {
        self.italic
    }

    pub fn is_underline(&self) -> bool {
        self.underline
    }

    /// True when both runs carry the same flags, whatever their text.
    pub fn same_style(&self, other: &StyledRun) -> bool {
        self.bold == other.bold && self.italic == other.italic && self.underline == other.underline
    }

    /// True when no style flag is set.
    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline)
    }
}

/// Heading level, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Returns `None` for values outside `1..=6`.
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(Self(level))
    }

    /// Parses the level out of a heading tag name such as `h3`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let digits = tag.strip_prefix('h')?;
        if digits.len() != 1 {
            return None;
        }
        digits.parse::<u8>().ok().and_then(Self::new)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One structural unit of a converted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: HeadingLevel,
        runs: Vec<StyledRun>,
    },
    Paragraph {
        runs: Vec<StyledRun>,
    },
    ListItem {
        ordered: bool,
        runs: Vec<StyledRun>,
    },
}

impl Block {
    pub fn runs(&self) -> &[StyledRun] {
        match self {
            Block::Heading { runs, .. } | Block::Paragraph { runs } | Block::ListItem { runs, .. } => {
                runs
            }
        }
    }

    /// Concatenated text of all runs, styles dropped.
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(StyledRun::text).collect()
    }
}
