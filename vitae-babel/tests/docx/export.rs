//! End-to-end tests for the DOCX sink. Every part is unzipped and parsed as
//! XML; assertions look at the WordprocessingML elements, not at the text.

use crate::common::{zip_entries, zip_part, RESUME_FIXTURE};
use vitae_babel::formats::DocxFormat;
use vitae_babel::{parse_html, Block, ExportOptions, Format, PageSize};

fn render(blocks: &[Block], options: &ExportOptions) -> Vec<u8> {
    DocxFormat::new()
        .serialize(blocks, options)
        .unwrap()
        .into_bytes()
}

/// (pStyle, numId, text) for every body paragraph.
fn paragraphs(document: &str) -> Vec<(Option<String>, Option<String>, String)> {
    let doc = roxmltree::Document::parse(document).unwrap();
    doc.descendants()
        .filter(|n| n.tag_name().name() == "p")
        .map(|p| {
            let attr = |tag: &str| {
                p.descendants()
                    .find(|n| n.tag_name().name() == tag)
                    .and_then(|n| {
                        n.attributes()
                            .find(|a| a.name() == "val")
                            .map(|a| a.value().to_string())
                    })
            };
            let text: String = p
                .descendants()
                .filter(|n| n.tag_name().name() == "t")
                .filter_map(|n| n.text())
                .collect();
            (attr("pStyle"), attr("numId"), text)
        })
        .collect()
}

#[test]
fn test_package_layout() {
    let bytes = render(&parse_html(RESUME_FIXTURE), &ExportOptions::default());
    assert!(bytes.starts_with(b"PK"));
    assert_eq!(
        zip_entries(&bytes),
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "word/document.xml",
            "word/styles.xml",
            "word/numbering.xml",
            "word/_rels/document.xml.rels",
        ]
    );
    for name in zip_entries(&bytes) {
        let part = zip_part(&bytes, &name);
        assert!(
            roxmltree::Document::parse(&part).is_ok(),
            "{name} is not well-formed"
        );
    }
}

#[test]
fn test_one_paragraph_per_block() {
    let blocks = parse_html(RESUME_FIXTURE);
    let bytes = render(&blocks, &ExportOptions::default());
    let paras = paragraphs(&zip_part(&bytes, "word/document.xml"));

    assert_eq!(paras.len(), blocks.len());
    let texts: Vec<String> = blocks.iter().map(Block::plain_text).collect();
    let got: Vec<String> = paras.iter().map(|(_, _, t)| t.clone()).collect();
    assert_eq!(got, texts);
}

#[test]
fn test_styles_and_numbering_follow_block_kinds() {
    let bytes = render(&parse_html(RESUME_FIXTURE), &ExportOptions::default());
    let paras = paragraphs(&zip_part(&bytes, "word/document.xml"));
    let props: Vec<(Option<&str>, Option<&str>)> = paras
        .iter()
        .map(|(s, n, _)| (s.as_deref(), n.as_deref()))
        .collect();

    let list = Some("ListParagraph");
    assert_eq!(
        props,
        vec![
            (Some("Heading1"), None),
            (None, None),
            (Some("Heading2"), None),
            (Some("Heading3"), None),
            (None, None),
            (list, Some("1")),
            (list, Some("1")),
            (Some("Heading3"), None),
            (list, Some("2")),
            (list, Some("2")),
            (Some("Heading2"), None),
            (None, None),
        ]
    );
}

#[test]
fn test_each_ordered_run_restarts_numbering() {
    let blocks = parse_html("<ol><li>a</li><li>b</li></ol><p>gap</p><ol><li>c</li></ol>");
    let bytes = render(&blocks, &ExportOptions::default());
    let numbering = zip_part(&bytes, "word/numbering.xml");
    let doc = roxmltree::Document::parse(&numbering).unwrap();

    let nums: Vec<&str> = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "num")
        .filter_map(|n| n.attributes().find(|a| a.name() == "numId").map(|a| a.value()))
        .collect();
    assert_eq!(nums, vec!["1", "2", "3"]);
    assert_eq!(numbering.matches("w:startOverride").count(), 2);
}

#[test]
fn test_run_properties() {
    let blocks = parse_html("<p><strong>b</strong><em>i</em><a href=\"#\">u</a>plain</p>");
    let bytes = render(&blocks, &ExportOptions::default());
    let document = zip_part(&bytes, "word/document.xml");
    assert!(document.contains("<w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">b</w:t></w:r>"));
    assert!(document.contains("<w:rPr><w:i/></w:rPr>"));
    assert!(document.contains("<w:u w:val=\"single\"/>"));
    assert!(document.contains("<w:r><w:t xml:space=\"preserve\">plain</w:t></w:r>"));
}

#[test]
fn test_text_is_escaped() {
    let blocks = parse_html("<p>R&amp;D &lt;team&gt;</p>");
    let bytes = render(&blocks, &ExportOptions::default().with_title("Q&A"));
    assert!(zip_part(&bytes, "word/document.xml").contains("R&amp;D &lt;team&gt;"));
    assert!(zip_part(&bytes, "docProps/core.xml").contains("<dc:title>Q&amp;A</dc:title>"));
}

#[test]
fn test_control_characters_do_not_corrupt_the_package() {
    let blocks = parse_html("<p>a&#11;b</p><p>tab\u{000C}feed</p>");
    let bytes = render(&blocks, &ExportOptions::default().with_title("CV\u{0B}"));

    for name in zip_entries(&bytes) {
        let part = zip_part(&bytes, &name);
        assert!(
            roxmltree::Document::parse(&part).is_ok(),
            "{name} is not well-formed"
        );
    }
    let texts: Vec<String> = paragraphs(&zip_part(&bytes, "word/document.xml"))
        .into_iter()
        .map(|(_, _, text)| text)
        .collect();
    assert_eq!(texts, vec!["ab", "tabfeed"]);
}

#[test]
fn test_empty_document_is_still_a_package() {
    let bytes = render(&[], &ExportOptions::default());
    assert_eq!(zip_entries(&bytes).len(), 7);
    assert!(paragraphs(&zip_part(&bytes, "word/document.xml")).is_empty());
}

#[test]
fn test_page_size_and_margin_come_from_pdf_options() {
    let mut options = ExportOptions::default();
    options.pdf.page_size = PageSize::Letter;
    options.pdf.margin = 36.0;
    let document = zip_part(&render(&[], &options), "word/document.xml");
    assert!(document.contains("<w:pgSz w:w=\"12240\" w:h=\"15840\"/>"));
    assert!(document.contains("w:top=\"720\""));
}

#[test]
fn test_output_is_deterministic() {
    let blocks = parse_html(RESUME_FIXTURE);
    let options = ExportOptions::default();
    assert_eq!(render(&blocks, &options), render(&blocks, &options));
}
