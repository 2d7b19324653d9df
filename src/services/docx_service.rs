use std::borrow::Cow;
use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::Result;
use crate::models::report::{Paragraph, Report, Run};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

// A4 portrait with 1" margins, in twentieths of a point.
const PAGE_WIDTH: &str = "11906";
const PAGE_HEIGHT: &str = "16838";
const PAGE_MARGIN: &str = "1440";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="ru-RU"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style></w:styles>"#;

const APP_PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>questionnaire-analyzer</Application></Properties>"#;

pub struct DocxService;

impl DocxService {
    /// Package a report as a `.docx` archive.
    ///
    /// Every section after the first starts on a new page. Entry order and
    /// timestamps are fixed, so the same report always yields the same bytes.
    pub fn render(report: &Report) -> Result<Vec<u8>> {
        let document = Self::document_xml(report)?;
        let core = Self::core_xml(report.title())?;

        let parts: [(&str, &[u8]); 7] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS.as_bytes()),
            ("docProps/core.xml", core.as_slice()),
            ("docProps/app.xml", APP_PROPS.as_bytes()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes()),
            ("word/styles.xml", STYLES.as_bytes()),
            ("word/document.xml", document.as_slice()),
        ];

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in parts {
            zip.start_file(name, options)?;
            zip.write_all(bytes)?;
        }
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn document_xml(report: &Report) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        writer.write_event(Event::Start(
            BytesStart::new("w:document").with_attributes([("xmlns:w", W_NS), ("xmlns:r", R_NS)]),
        ))?;
        writer.write_event(Event::Start(BytesStart::new("w:body")))?;

        let sections = report.sections();
        for (idx, section) in sections.iter().enumerate() {
            let is_last_section = idx + 1 == sections.len();
            let count = section.paragraphs.len();

            if count == 0 && !is_last_section {
                write_paragraph(&mut writer, &Paragraph::blank(), true)?;
                continue;
            }
            for (p_idx, paragraph) in section.paragraphs.iter().enumerate() {
                // Non-final sections close with a section break in their last paragraph.
                let closes_section = !is_last_section && p_idx + 1 == count;
                write_paragraph(&mut writer, paragraph, closes_section)?;
            }
        }

        write_section_properties(&mut writer)?;
        writer.write_event(Event::End(BytesEnd::new("w:body")))?;
        writer.write_event(Event::End(BytesEnd::new("w:document")))?;
        Ok(writer.into_inner())
    }

    fn core_xml(title: &str) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        writer.write_event(Event::Start(
            BytesStart::new("cp:coreProperties").with_attributes([
                (
                    "xmlns:cp",
                    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
                ),
                ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ]),
        ))?;
        writer.write_event(Event::Start(BytesStart::new("dc:title")))?;
        writer.write_event(Event::Text(BytesText::new(&xml_text(title))))?;
        writer.write_event(Event::End(BytesEnd::new("dc:title")))?;
        writer.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;
        Ok(writer.into_inner())
    }
}

fn write_paragraph<W: Write>(
    writer: &mut Writer<W>,
    paragraph: &Paragraph,
    closes_section: bool,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    if closes_section {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
        write_section_properties(writer)?;
        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }
    for run in paragraph.runs.iter().filter(|r| !r.text.is_empty()) {
        write_run(writer, run)?;
    }
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_run<W: Write>(writer: &mut Writer<W>, run: &Run) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    if run.bold || run.size.is_some() {
        writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if run.bold {
            writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
            writer.write_event(Event::Empty(BytesStart::new("w:bCs")))?;
        }
        if let Some(size) = run.size {
            let val = size.to_string();
            writer.write_event(Event::Empty(
                BytesStart::new("w:sz").with_attributes([("w:val", val.as_str())]),
            ))?;
            writer.write_event(Event::Empty(
                BytesStart::new("w:szCs").with_attributes([("w:val", val.as_str())]),
            ))?;
        }
        writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }
    writer.write_event(Event::Start(
        BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(&xml_text(&run.text))))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

/// Drops characters XML 1.0 cannot carry even escaped (C0 controls other than
/// tab, LF, CR, and the U+FFFE/U+FFFF noncharacters). Word refuses to open a part
/// that contains them.
fn xml_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => false,
        _ => true,
    }
}

fn write_section_properties<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    writer.write_event(Event::Empty(
        BytesStart::new("w:pgSz").with_attributes([("w:w", PAGE_WIDTH), ("w:h", PAGE_HEIGHT)]),
    ))?;
    writer.write_event(Event::Empty(BytesStart::new("w:pgMar").with_attributes([
        ("w:top", PAGE_MARGIN),
        ("w:right", PAGE_MARGIN),
        ("w:bottom", PAGE_MARGIN),
        ("w:left", PAGE_MARGIN),
        ("w:header", "708"),
        ("w:footer", "708"),
        ("w:gutter", "0"),
    ])))?;
    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}
