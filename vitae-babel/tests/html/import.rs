//! Import tests for the block walker and inline formatter, driven through the
//! public entry points.

use crate::common::{dump, RESUME_FIXTURE};
use insta::assert_snapshot;
use vitae_babel::formats::html::HtmlImporter;
use vitae_babel::{parse_html, Block, HeadingLevel, InlineMode, StyledRun};

#[test]
fn test_resume_fixture() {
    let blocks = parse_html(RESUME_FIXTURE);
    assert_snapshot!(dump(&blocks), @r#"
    h1: "Jane Doe"
    p: "Backend engineer in " {b}"Lisbon" ". " {u}"jane@example.com"
    h2: "Experience"
    h3: "Senior Engineer, Acme Corp"
    p: {i}"2019 – present"
    ul: "Led the migration of the billing service to " {b}"Rust"
    ul: "Cut p99 latency by 40%"
    h3: "Engineer, Initech"
    ol: "Built the reporting pipeline"
    ol: "Mentored " {u}"three" " interns"
    h2: "Skills"
    p: "Rust, PostgreSQL, Kubernetes"
    "#);
}

#[test]
fn test_heading_then_paragraph_with_bold() {
    let blocks = parse_html("<h1>Name</h1><p>Hello <strong>World</strong></p>");
    assert_eq!(
        blocks,
        vec![
            Block::Heading {
                level: HeadingLevel::new(1).unwrap(),
                runs: vec![StyledRun::plain("Name")],
            },
            Block::Paragraph {
                runs: vec![StyledRun::plain("Hello "), StyledRun::plain("World").bold()],
            },
        ]
    );
}

#[test]
fn test_plain_paragraph_is_one_run() {
    assert_snapshot!(dump(&parse_html("<p>Just text</p>")), @r#"p: "Just text""#);
}

#[test]
fn test_strong_is_one_bold_run() {
    assert_snapshot!(
        dump(&parse_html("<p><strong>bold text</strong></p>")),
        @r#"p: {b}"bold text""#
    );
}

#[test]
fn test_unordered_list() {
    assert_snapshot!(dump(&parse_html("<ul><li>a</li><li>b</li></ul>")), @r#"
    ul: "a"
    ul: "b"
    "#);
}

#[test]
fn test_whitespace_is_preserved_verbatim() {
    let blocks = parse_html("<p>  two  spaces </p>");
    assert_eq!(blocks[0].runs(), &[StyledRun::plain("  two  spaces ")]);
}

#[test]
fn test_nested_list_follows_parent_items() {
    assert_snapshot!(
        dump(&parse_html("<ol><li>one<ul><li>inner</li></ul></li><li>two</li></ol>")),
        @r#"
    ol: "one" "inner"
    ol: "two"
    ul: "inner"
    "#
    );
}

#[test]
fn test_unsupported_elements_emit_nothing() {
    let html = "<table><tr><td>cell</td></tr></table><img src=\"x.png\"><hr><div>loose text</div>";
    assert!(parse_html(html).is_empty());
}

#[test]
fn test_b_and_i_are_not_emphasis() {
    assert_snapshot!(
        dump(&parse_html("<p><b>bold?</b> <i>italic?</i></p>")),
        @r#"p: "bold?" " " "italic?""#
    );
}

#[test]
fn test_empty_elements_produce_empty_blocks() {
    let blocks = parse_html("<h2></h2><p></p><ul><li></li></ul>");
    assert_eq!(blocks.len(), 3);
    assert!(blocks.iter().all(|b| b.runs().is_empty()));
}

#[test]
fn test_empty_and_whitespace_input() {
    assert!(parse_html("").is_empty());
    assert!(parse_html("   \n\t").is_empty());
}

#[test]
fn test_malformed_markup_is_repaired() {
    assert_snapshot!(dump(&parse_html("<p>open <strong>never closed<p>next")), @r#"
    p: "open " {b}"never closed"
    p: {b}"next"
    "#);
}

#[test]
fn test_cascade_mode_keeps_nested_formatting() {
    let html = "<p><strong>bold <em>both</em></strong></p>";
    let flatten = HtmlImporter::new(InlineMode::Flatten).parse(html);
    let cascade = HtmlImporter::new(InlineMode::Cascade).parse(html);

    assert_snapshot!(dump(&flatten), @r#"p: {b}"bold both""#);
    assert_snapshot!(dump(&cascade), @r#"p: {b}"bold " {bi}"both""#);
}

#[test]
fn test_blocks_serialize_to_json() {
    let blocks = parse_html("<h3>Skills</h3>");
    let json = serde_json::to_value(&blocks).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "kind": "heading",
            "level": 3,
            "runs": [{"text": "Skills", "bold": false, "italic": false, "underline": false}]
        }])
    );
}
