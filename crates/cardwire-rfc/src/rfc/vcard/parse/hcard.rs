//! hCard fragment parsing.
//!
//! Reads one HTML element (with its descendants) into an [`HCardElement`].
//! HTML is read leniently: void elements need no end tag, attributes may be
//! unquoted or valueless, and stray end tags are skipped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::{ParseError, ParseResult};
use crate::rfc::vcard::core::{HCardElement, HtmlNode};

/// Elements that never have content or an end tag.
const VOID_ELEMENTS: [&str; 8] = ["area", "br", "col", "hr", "img", "input", "link", "meta"];

/// Parses the first element of an HTML fragment.
///
/// Runs of whitespace in text are collapsed to a single space.
///
/// ## Errors
/// Returns an error if the fragment has no element or is not well-formed
/// enough to tokenize.
pub fn parse_html_element(html: &str) -> ParseResult<HCardElement> {
    let mut reader = Reader::from_reader(html.as_bytes());
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut buf = Vec::new();
    let mut stack: Vec<HCardElement> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let element = start_element(e, &reader)?;
                if VOID_ELEMENTS.contains(&element.tag_name()) {
                    if let Some(root) = close_into(&mut stack, element) {
                        return Ok(root);
                    }
                } else {
                    stack.push(element);
                }
            }
            Event::Empty(ref e) => {
                let element = start_element(e, &reader)?;
                if let Some(root) = close_into(&mut stack, element) {
                    return Ok(root);
                }
            }
            Event::End(ref e) => {
                let name = std::str::from_utf8(e.local_name().as_ref())?.to_ascii_lowercase();
                // Stray end tags are skipped; an end tag closes every
                // element opened after its start tag.
                if let Some(open) = stack.iter().rposition(|el| el.tag_name() == name) {
                    while stack.len() > open {
                        let Some(element) = stack.pop() else { break };
                        if let Some(root) = close_into(&mut stack, element) {
                            return Ok(root);
                        }
                    }
                }
            }
            Event::Text(ref e) => {
                let text = reader.decoder().decode(e)?;
                push_text(&mut stack, &collapse_whitespace(&text));
            }
            Event::CData(ref e) => {
                let text = reader.decoder().decode(e)?;
                push_text(&mut stack, &text);
            }
            Event::GeneralRef(ref e) => {
                let text = match e.resolve_char_ref()? {
                    Some(c) => c.to_string(),
                    None => {
                        let entity = reader.decoder().decode(e)?;
                        match entity.as_ref() {
                            "nbsp" => " ".to_string(),
                            other => quick_xml::escape::resolve_predefined_entity(other)
                                .map_or_else(|| format!("&{other};"), str::to_owned),
                        }
                    }
                };
                push_text(&mut stack, &text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    // Unclosed elements at the end of the fragment.
    while let Some(element) = stack.pop() {
        if let Some(root) = close_into(&mut stack, element) {
            return Ok(root);
        }
    }

    Err(ParseError::html("fragment contains no element"))
}

fn start_element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> ParseResult<HCardElement> {
    let name = std::str::from_utf8(e.local_name().as_ref())?.to_owned();
    let mut element = HCardElement::new(name);

    for attr in e.html_attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_owned();
        let value = attr.decode_and_unescape_value(reader.decoder())?;
        element = element.with_attribute(key, value.into_owned());
    }

    Ok(element)
}

/// Attaches a finished element to its parent, or returns it if it is the
/// root.
fn close_into(stack: &mut [HCardElement], element: HCardElement) -> Option<HCardElement> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push(HtmlNode::Element(element));
            None
        }
        None => Some(element),
    }
}

fn push_text(stack: &mut [HCardElement], text: &str) {
    // Text outside the root element is ignored.
    if let Some(parent) = stack.last_mut()
        && !text.is_empty()
    {
        parent.push(HtmlNode::Text(text.to_string()));
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                result.push(' ');
            }
            in_space = true;
        } else {
            result.push(c);
            in_space = false;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_element() {
        let element =
            parse_html_element(r#"<span class="fn">  Jane   Doe </span>"#).unwrap();
        assert_eq!(element.tag_name(), "span");
        assert!(element.has_class("fn"));
        assert_eq!(element.value(), "Jane Doe");
    }

    #[test]
    fn parse_void_elements_and_entities() {
        let element =
            parse_html_element("<div class=note>one<br>two &amp; three<img src=x.png></div>")
                .unwrap();
        assert_eq!(element.attribute("class"), Some("note"));
        assert_eq!(element.value(), "one\ntwo & three");
    }

    #[test]
    fn parse_abbr_title() {
        let element = parse_html_element(r#"<abbr class="gender" title="F">Female</abbr>"#)
            .unwrap();
        assert_eq!(element.value(), "F");
    }

    #[test]
    fn parse_value_class_parts() {
        let html = r#"<span class="tel"><span class="type">work</span>
            <span class="value">+1</span>-<span class="value">555</span></span>"#;
        let element = parse_html_element(html).unwrap();
        assert_eq!(element.value(), "+1555");
    }

    #[test]
    fn stray_end_tags_are_skipped() {
        let element = parse_html_element("<p>text </i><b>bold</b></p>").unwrap();
        assert_eq!(element.tag_name(), "p");
        assert_eq!(element.value(), "text bold");
    }

    #[test]
    fn no_element_is_an_error() {
        let err = parse_html_element("just text").unwrap_err();
        assert_eq!(err.kind, crate::rfc::vcard::parse::ParseErrorKind::HtmlError);
    }
}
