//! End-to-end tests for the PDF sink, inspecting the uncompressed content
//! streams of the produced file.

use crate::common::RESUME_FIXTURE;
use vitae_babel::formats::PdfFormat;
use vitae_babel::{parse_html, Block, ExportOptions, Format, PageSize, StyledRun};

fn render(blocks: &[Block], options: &ExportOptions) -> String {
    let bytes = PdfFormat::new()
        .serialize(blocks, options)
        .unwrap()
        .into_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

fn page_count(pdf: &str) -> usize {
    let start = pdf.find("/Count ").expect("page tree count") + "/Count ".len();
    pdf[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap()
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph {
        runs: vec![StyledRun::plain(text)],
    }
}

#[test]
fn test_resume_is_a_complete_pdf() {
    let pdf = render(&parse_html(RESUME_FIXTURE), &ExportOptions::default());
    assert!(pdf.starts_with("%PDF-"));
    assert!(pdf.trim_end().ends_with("%%EOF"));
    assert_eq!(page_count(&pdf), 1);
    assert!(pdf.contains("(Jane"));
    assert!(pdf.contains("(Lisbon) Tj"));
    assert!(pdf.contains("Kubernetes) Tj"));
}

#[test]
fn test_empty_document_is_one_blank_page() {
    let pdf = render(&[], &ExportOptions::default());
    assert!(pdf.starts_with("%PDF-"));
    assert_eq!(page_count(&pdf), 1);
    assert!(!pdf.contains(" Tj"));
}

#[test]
fn test_base14_fonts_are_declared() {
    let pdf = render(&[paragraph("x")], &ExportOptions::default());
    for font in [
        "/Helvetica",
        "/Helvetica-Bold",
        "/Helvetica-Oblique",
        "/Helvetica-BoldOblique",
    ] {
        assert!(pdf.contains(font), "missing {font}");
    }
    assert!(pdf.contains("/WinAnsiEncoding"));
    assert!(!pdf.contains("/FontFile"));
}

#[test]
fn test_long_documents_paginate() {
    let blocks: Vec<Block> = (0..200)
        .map(|i| paragraph(&format!("Paragraph number {i}")))
        .collect();
    let pdf = render(&blocks, &ExportOptions::default());
    assert!(page_count(&pdf) > 1);
    assert!(pdf.contains("(Paragraph number 0) Tj"));
    assert!(pdf.contains("(Paragraph number 199) Tj"));
}

#[test]
fn test_long_paragraph_wraps_onto_several_lines() {
    let text = "word ".repeat(200);
    let pdf = render(&[paragraph(&text)], &ExportOptions::default());
    let lines = pdf.matches(" Tj").count();
    assert!(lines > 1, "expected wrapped lines, got {lines}");
    assert_eq!(page_count(&pdf), 1);
}

#[test]
fn test_letter_page_size() {
    let mut options = ExportOptions::default();
    options.pdf.page_size = PageSize::Letter;
    let pdf = render(&[paragraph("x")], &options);
    assert!(pdf.contains("/MediaBox [0 0 612 792]"));
}

#[test]
fn test_ordered_markers_restart_after_a_heading() {
    let blocks = parse_html("<ol><li>a</li><li>b</li></ol><h2>Next</h2><ol><li>c</li></ol>");
    let pdf = render(&blocks, &ExportOptions::default());
    assert_eq!(pdf.matches("(1.) Tj").count(), 2);
    assert_eq!(pdf.matches("(2.) Tj").count(), 1);
}

#[test]
fn test_title_in_document_info() {
    let pdf = render(&[], &ExportOptions::default().with_title("JaneDoe"));
    assert!(pdf.contains("/Title (JaneDoe)"));
    assert!(pdf.contains("/Producer (vitae)"));
}

#[test]
fn test_output_is_deterministic() {
    let blocks = parse_html(RESUME_FIXTURE);
    let options = ExportOptions::default();
    assert_eq!(render(&blocks, &options), render(&blocks, &options));
}
