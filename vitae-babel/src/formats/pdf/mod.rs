//! Native PDF export.
//!
//! Blocks are laid out as they arrive: each one is broken into lines with the
//! standard Helvetica metrics and placed top to bottom, starting a new page
//! when the bottom margin is reached. The finished pages are written with
//! `pdf-writer` using the four base-14 Helvetica faces, so no font data is
//! embedded and no external renderer is needed.
//!
//! Output is deterministic: no creation dates or random identifiers are
//! written, so the same blocks always give the same bytes.

mod layout;
mod metrics;

use crate::error::FormatError;
use crate::format::{ExportOptions, Format, PdfOptions};
use crate::ir::{HeadingLevel, StyledRun};
use crate::sink::DocumentSink;
use layout::break_lines;
use metrics::{encode_win_ansi, FontVariant};
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

const HEADING_SIZES: [f32; 6] = [22.0, 18.0, 15.0, 13.0, 12.0, 11.0];
const LINE_SPACING: f32 = 1.35;
const LIST_INDENT: f32 = 18.0;
const MARKER_OFFSET: f32 = 4.0;
const BULLET: &str = "\u{2022}";

/// PDF export format
#[derive(Debug, Default)]
pub struct PdfFormat;

impl PdfFormat {
    pub fn new() -> Self {
        Self
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "Paginated PDF with base-14 Helvetica fonts"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn mime_type(&self) -> &str {
        "application/pdf"
    }

    fn create_sink(&self, options: &ExportOptions) -> Box<dyn DocumentSink> {
        Box::new(PdfSink::new(options))
    }
}

/// A positioned drawing operation on one page. Coordinates are PDF user space
/// (origin bottom left).
#[derive(Debug, Clone, PartialEq)]
enum DrawOp {
    Text {
        font: FontVariant,
        size: f32,
        x: f32,
        y: f32,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        width: f32,
    },
}

struct BlockStyle<'a> {
    size: f32,
    force_bold: bool,
    indent: f32,
    marker: Option<String>,
    space_before: f32,
    space_after: f32,
    runs: &'a [StyledRun],
}

/// Sink that lays out blocks onto pages.
pub struct PdfSink {
    options: PdfOptions,
    title: String,
    pages: Vec<Vec<DrawOp>>,
    /// Top of the free area on the current page
    cursor: f32,
    /// Number of the last item in the current ordered run, 0 outside one
    ordered_counter: usize,
}

impl PdfSink {
    pub fn new(options: &ExportOptions) -> Self {
        let mut sink = Self {
            options: options.pdf.clone(),
            title: options.title.clone(),
            pages: Vec::new(),
            cursor: 0.0,
            ordered_counter: 0,
        };
        sink.new_page();
        sink
    }

    fn page_height(&self) -> f32 {
        self.options.page_size.dimensions().1
    }

    fn content_width(&self) -> f32 {
        self.options.page_size.dimensions().0 - 2.0 * self.options.margin
    }

    fn top(&self) -> f32 {
        self.page_height() - self.options.margin
    }

    fn at_page_top(&self) -> bool {
        (self.cursor - self.top()).abs() < f32::EPSILON
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = self.top();
    }

    fn current_page(&mut self) -> &mut Vec<DrawOp> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn place(&mut self, style: BlockStyle<'_>) {
        if !self.at_page_top() {
            self.cursor -= style.space_before;
        }

        let line_height = style.size * LINE_SPACING;
        let left = self.options.margin + style.indent;
        let mut lines = break_lines(
            style.runs,
            style.force_bold,
            style.size,
            self.content_width() - style.indent,
        );
        if lines.is_empty() {
            lines.push(Default::default());
        }

        for (idx, line) in lines.iter().enumerate() {
            if self.cursor - line_height < self.options.margin && !self.at_page_top() {
                self.new_page();
            }
            let baseline = self.cursor - style.size;

            if idx == 0 {
                if let Some(marker) = &style.marker {
                    let op = DrawOp::Text {
                        font: FontVariant::Regular,
                        size: style.size,
                        x: self.options.margin + MARKER_OFFSET,
                        y: baseline,
                        text: marker.clone(),
                    };
                    self.current_page().push(op);
                }
            }

            for fragment in &line.fragments {
                let x = left + fragment.x;
                let mut ops = vec![DrawOp::Text {
                    font: fragment.font,
                    size: style.size,
                    x,
                    y: baseline,
                    text: fragment.text.clone(),
                }];
                if fragment.underline {
                    ops.push(DrawOp::Rule {
                        x1: x,
                        x2: x + fragment.width,
                        y: baseline - style.size * 0.12,
                        width: style.size * 0.05,
                    });
                }
                self.current_page().extend(ops);
            }

            self.cursor -= line_height;
        }

        self.cursor -= style.space_after;
    }

    fn render(&self) -> Vec<u8> {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let tree_id = Ref::new(2);
        let info_id = Ref::new(3);
        let font_ids: Vec<(FontVariant, Ref)> = FontVariant::ALL
            .iter()
            .enumerate()
            .map(|(i, v)| (*v, Ref::new(4 + i as i32)))
            .collect();
        let page_ids: Vec<(Ref, Ref)> = (0..self.pages.len())
            .map(|i| {
                let base = 8 + 2 * i as i32;
                (Ref::new(base), Ref::new(base + 1))
            })
            .collect();

        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().map(|(page, _)| *page))
            .count(page_ids.len() as i32);

        let (width, height) = self.options.page_size.dimensions();
        for (ops, (page_id, content_id)) in self.pages.iter().zip(&page_ids) {
            {
                let mut page = pdf.page(*page_id);
                page.media_box(Rect::new(0.0, 0.0, width, height));
                page.parent(tree_id);
                page.contents(*content_id);
                let mut resources = page.resources();
                let mut fonts = resources.fonts();
                for (variant, font_id) in &font_ids {
                    fonts.pair(Name(variant.resource()), *font_id);
                }
            }
            let content = page_content(ops);
            pdf.stream(*content_id, &content);
        }

        for (variant, font_id) in &font_ids {
            pdf.type1_font(*font_id)
                .base_font(Name(variant.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        pdf.document_info(info_id)
            .title(TextStr(&self.title))
            .producer(TextStr("vitae"));

        pdf.finish()
    }
}

fn page_content(ops: &[DrawOp]) -> Vec<u8> {
    let mut content = Content::new();
    for op in ops {
        match op {
            DrawOp::Text {
                font,
                size,
                x,
                y,
                text,
            } => {
                content.begin_text();
                content.set_font(Name(font.resource()), *size);
                content.next_line(*x, *y);
                content.show(Str(&encode_win_ansi(text)));
                content.end_text();
            }
            DrawOp::Rule { x1, x2, y, width } => {
                content.set_line_width(*width);
                content.move_to(*x1, *y);
                content.line_to(*x2, *y);
                content.stroke();
            }
        }
    }
    content.finish().to_vec()
}

impl DocumentSink for PdfSink {
    fn append_heading(&mut self, level: HeadingLevel, runs: &[StyledRun]) {
        self.ordered_counter = 0;
        let size = HEADING_SIZES[usize::from(level.get()) - 1];
        self.place(BlockStyle {
            size,
            force_bold: true,
            indent: 0.0,
            marker: None,
            space_before: size * 0.6,
            space_after: size * 0.25,
            runs,
        });
    }

    fn append_paragraph(&mut self, runs: &[StyledRun]) {
        self.ordered_counter = 0;
        let size = self.options.body_font_size;
        self.place(BlockStyle {
            size,
            force_bold: false,
            indent: 0.0,
            marker: None,
            space_before: 0.0,
            space_after: size * 0.5,
            runs,
        });
    }

    fn append_list_item(&mut self, ordered: bool, runs: &[StyledRun]) {
        let marker = if ordered {
            self.ordered_counter += 1;
            format!("{}.", self.ordered_counter)
        } else {
            self.ordered_counter = 0;
            BULLET.to_string()
        };
        let size = self.options.body_font_size;
        self.place(BlockStyle {
            size,
            force_bold: false,
            indent: LIST_INDENT,
            marker: Some(marker),
            space_before: 0.0,
            space_after: size * 0.2,
            runs,
        });
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, FormatError> {
        log::debug!("pdf: rendering {} page(s)", self.pages.len());
        Ok(self.render())
    }
}
