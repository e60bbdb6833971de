//! WordprocessingML package parts.

use crate::format::PageSize;
use crate::ir::StyledRun;

pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Abstract numbering definitions in `numbering.xml`.
pub(crate) const BULLET_ABSTRACT_ID: u32 = 0;
pub(crate) const DECIMAL_ABSTRACT_ID: u32 = 1;

/// Heading sizes in half-points, h1 through h6.
const HEADING_HALF_POINTS: [u32; 6] = [44, 36, 30, 26, 24, 22];

/// True for characters allowed in an XML 1.0 document.
fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

/// Escape markup characters and drop characters XML cannot carry, such as
/// vertical tab or form feed.
pub(crate) fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars().filter(|c| is_xml_char(*c)) {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn run_xml(run: &StyledRun) -> String {
    let mut out = String::from("<w:r>");
    if !run.is_plain() {
        out.push_str("<w:rPr>");
        if run.is_bold() {
            out.push_str("<w:b/>");
        }
        if run.is_italic() {
            out.push_str("<w:i/>");
        }
        if run.is_underline() {
            out.push_str("<w:u w:val=\"single\"/>");
        }
        out.push_str("</w:rPr>");
    }
    out.push_str("<w:t xml:space=\"preserve\">");
    out.push_str(&xml_escape(run.text()));
    out.push_str("</w:t></w:r>");
    out
}

/// Paragraph properties for one block.
pub(crate) struct ParagraphProps<'a> {
    pub style: Option<&'a str>,
    pub num_id: Option<u32>,
}

pub(crate) fn paragraph_xml(props: &ParagraphProps<'_>, runs: &[StyledRun]) -> String {
    let mut out = String::from("<w:p>");
    if props.style.is_some() || props.num_id.is_some() {
        out.push_str("<w:pPr>");
        if let Some(style) = props.style {
            out.push_str(&format!("<w:pStyle w:val=\"{style}\"/>"));
        }
        if let Some(num_id) = props.num_id {
            out.push_str(&format!(
                "<w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{num_id}\"/></w:numPr>"
            ));
        }
        out.push_str("</w:pPr>");
    }
    for run in runs.iter().filter(|r| !r.text().is_empty()) {
        out.push_str(&run_xml(run));
    }
    out.push_str("</w:p>");
    out
}

pub(crate) fn document_xml(body: &str, page_size: PageSize, margin_twips: u32) -> String {
    let (width, height) = page_size.twips();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>{body}<w:sectPr><w:pgSz w:w="{width}" w:h="{height}"/><w:pgMar w:top="{m}" w:right="{m}" w:bottom="{m}" w:left="{m}" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr></w:body>
</w:document>"#,
        m = margin_twips
    )
}

pub(crate) fn styles_xml() -> String {
    let mut out = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}">
  <w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault></w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
"#
    );
    for (idx, size) in HEADING_HALF_POINTS.iter().enumerate() {
        let level = idx + 1;
        out.push_str(&format!(
            r#"  <w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:uiPriority w:val="9"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="{idx}"/></w:pPr><w:rPr><w:b/><w:sz w:val="{size}"/></w:rPr></w:style>
"#
        ));
    }
    out.push_str(
        r#"  <w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/><w:basedOn w:val="Normal"/><w:uiPriority w:val="34"/><w:qFormat/><w:pPr><w:spacing w:after="40"/><w:ind w:left="720"/></w:pPr></w:style>
</w:styles>"#,
    );
    out
}

/// `nums` pairs each concrete numbering id with its abstract definition.
/// Ordered instances restart at 1.
pub(crate) fn numbering_xml(nums: &[(u32, u32)]) -> String {
    let mut out = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="{W_NS}">
  <w:abstractNum w:abstractNumId="{BULLET_ABSTRACT_ID}"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="{bullet}"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>
  <w:abstractNum w:abstractNumId="{DECIMAL_ABSTRACT_ID}"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>
"#,
        bullet = '\u{2022}'
    );
    for (num_id, abstract_id) in nums {
        if *abstract_id == DECIMAL_ABSTRACT_ID {
            out.push_str(&format!(
                r#"  <w:num w:numId="{num_id}"><w:abstractNumId w:val="{abstract_id}"/><w:lvlOverride w:ilvl="0"><w:startOverride w:val="1"/></w:lvlOverride></w:num>
"#
            ));
        } else {
            out.push_str(&format!(
                r#"  <w:num w:numId="{num_id}"><w:abstractNumId w:val="{abstract_id}"/></w:num>
"#
            ));
        }
    }
    out.push_str("</w:numbering>");
    out
}

pub(crate) fn content_types_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#
}

pub(crate) fn package_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#
}

pub(crate) fn document_rels_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>
</Relationships>"#
}

pub(crate) fn core_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:title>{}</dc:title>
  <dc:creator>vitae</dc:creator>
</cp:coreProperties>"#,
        xml_escape(title)
    )
}
