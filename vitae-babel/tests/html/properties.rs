//! Property tests for the block walker.

use proptest::prelude::*;
use vitae_babel::{parse_html, Block};

proptest! {
    #[test]
    fn heading_level_matches_tag_suffix(level in 1u8..=6, text in "[A-Za-z0-9]{1,12}") {
        let html = format!("<h{level}>{text}</h{level}>");
        let blocks = parse_html(&html);
        prop_assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Heading { level: got, .. } => prop_assert_eq!(got.get(), level),
            other => prop_assert!(false, "expected heading, got {:?}", other),
        }
        prop_assert_eq!(blocks[0].plain_text(), text);
    }

    #[test]
    fn paragraph_text_survives_verbatim(text in "[A-Za-z0-9 ,.]{0,40}") {
        let blocks = parse_html(&format!("<p>{text}</p>"));
        prop_assert_eq!(blocks.len(), 1);
        prop_assert_eq!(blocks[0].plain_text(), text);
    }

    #[test]
    fn one_block_per_list_item(count in 0usize..12, ordered in any::<bool>()) {
        let tag = if ordered { "ol" } else { "ul" };
        let items: String = (0..count).map(|i| format!("<li>item {i}</li>")).collect();
        let blocks = parse_html(&format!("<{tag}>{items}</{tag}>"));
        prop_assert_eq!(blocks.len(), count);
        for block in &blocks {
            prop_assert!(
                matches!(block, Block::ListItem { ordered: o, .. } if *o == ordered),
                "expected list item, got {:?}",
                block
            );
        }
    }
}
