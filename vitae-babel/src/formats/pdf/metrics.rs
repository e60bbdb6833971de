//! Standard 14 Helvetica fonts: advance widths and WinAnsi encoding.
//!
//! Widths are the AFM values in thousandths of an em for the printable ASCII
//! range. Anything outside that range falls back to an average width, which is
//! close enough for line breaking.

/// The four Helvetica faces referenced by every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum FontVariant {
    Regular,
    Bold,
    Oblique,
    BoldOblique,
}

impl FontVariant {
    pub(crate) const ALL: [FontVariant; 4] = [
        FontVariant::Regular,
        FontVariant::Bold,
        FontVariant::Oblique,
        FontVariant::BoldOblique,
    ];

    pub(crate) fn select(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontVariant::Regular,
            (true, false) => FontVariant::Bold,
            (false, true) => FontVariant::Oblique,
            (true, true) => FontVariant::BoldOblique,
        }
    }

    /// Resource name used inside content streams.
    pub(crate) fn resource(self) -> &'static [u8] {
        match self {
            FontVariant::Regular => b"F1",
            FontVariant::Bold => b"F2",
            FontVariant::Oblique => b"F3",
            FontVariant::BoldOblique => b"F4",
        }
    }

    pub(crate) fn base_font(self) -> &'static [u8] {
        match self {
            FontVariant::Regular => b"Helvetica",
            FontVariant::Bold => b"Helvetica-Bold",
            FontVariant::Oblique => b"Helvetica-Oblique",
            FontVariant::BoldOblique => b"Helvetica-BoldOblique",
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, FontVariant::Bold | FontVariant::BoldOblique)
    }
}

// ' ' (0x20) through '~' (0x7e)
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

fn char_width(c: char, variant: FontVariant) -> u16 {
    let table = if variant.is_bold() {
        &HELVETICA_BOLD
    } else {
        &HELVETICA
    };
    match c {
        ' '..='~' => table[c as usize - 0x20],
        '\u{2022}' => 350,
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` set in `variant` at `size` points.
pub(crate) fn text_width(text: &str, variant: FontVariant, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, variant))).sum();
    units as f32 * size / 1000.0
}

/// Encode `text` for a simple font with `WinAnsiEncoding`; unmappable
/// characters become `?`.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '\u{20ac}' => 0x80,
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2122}' => 0x99,
        _ => b'?',
    }
}
