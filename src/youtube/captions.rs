//! Timed-text caption XML parsing.

use crate::error::{Result, TranscriptError};
use crate::transcript::TranscriptEntry;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

/// Parse a `<transcript><text start=".." dur="..">..</text></transcript>` document.
pub(super) fn parse_caption_xml(xml: &str) -> Result<Vec<TranscriptEntry>> {
    let mut reader = Reader::from_str(xml);
    let mut entries = Vec::new();
    let mut pending: Option<(f64, f64)> = None;
    let mut buffer = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"text" => {
                pending = Some(timing(e));
                buffer.clear();
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"text" => {
                let (start, duration) = timing(e);
                entries.push(TranscriptEntry {
                    start_seconds: start,
                    duration_seconds: duration,
                    text: String::new(),
                });
            }
            Ok(Event::Text(ref e)) if pending.is_some() => {
                buffer.push_str(&unescape(e));
            }
            Ok(Event::CData(ref e)) if pending.is_some() => {
                buffer.push_str(&String::from_utf8_lossy(e));
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"text" => {
                if let Some((start, duration)) = pending.take() {
                    // Caption text is HTML-escaped a second time inside the XML
                    let text = html_escape::decode_html_entities(&buffer).into_owned();
                    entries.push(TranscriptEntry {
                        start_seconds: start,
                        duration_seconds: duration,
                        text,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(TranscriptError::Parse(format!(
                    "caption XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(entries)
}

/// Read `start` and `dur` attributes, defaulting to zero.
fn timing(element: &BytesStart) -> (f64, f64) {
    let mut start = 0.0;
    let mut duration = 0.0;

    for attr in element.attributes().flatten() {
        let value = String::from_utf8_lossy(&attr.value).parse::<f64>().ok();
        match attr.key.as_ref() {
            b"start" => start = value.unwrap_or(0.0).max(0.0),
            b"dur" => duration = value.unwrap_or(0.0),
            _ => {}
        }
    }

    (start, duration)
}

fn unescape(text: &BytesText) -> String {
    text.unescape()
        .map(|t| t.into_owned())
        .unwrap_or_else(|_| String::from_utf8_lossy(text).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?>
<transcript>
    <text start="0.21" dur="2.34">Hello world</text>
    <text start="2.55" dur="1.50">This is a test</text>
</transcript>"#;

        let entries = parse_caption_xml(xml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "Hello world");
        assert!((entries[0].start_seconds - 0.21).abs() < f64::EPSILON);
        assert!((entries[0].duration_seconds - 2.34).abs() < f64::EPSILON);
        assert_eq!(entries[1].text, "This is a test");
    }

    #[test]
    fn test_double_escaped_entities() {
        let xml = r#"<transcript><text start="0.0" dur="1.0">it&amp;#39;s a &amp;quot;test&amp;quot;</text></transcript>"#;
        let entries = parse_caption_xml(xml).unwrap();
        assert_eq!(entries[0].text, r#"it's a "test""#);
    }

    #[test]
    fn test_empty_and_self_closing_entries_are_kept() {
        let xml = r#"<transcript><text start="1.0" dur="1.0"></text><text start="2.0"/></transcript>"#;
        let entries = parse_caption_xml(xml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "");
        assert!((entries[1].start_seconds - 2.0).abs() < f64::EPSILON);
        assert_eq!(entries[1].duration_seconds, 0.0);
    }

    #[test]
    fn test_cdata_text_is_kept() {
        let xml = r#"<transcript><text start="3.0" dur="1.0">a <![CDATA[<b>bold</b> &amp; more]]></text></transcript>"#;
        let entries = parse_caption_xml(xml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "a <b>bold</b> & more");
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_caption_xml("<transcript></transcript>").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(parse_caption_xml("<transcript><text start=\"1\">oops</transcript>").is_err());
    }
}
