//! xCard (RFC 6351) property element parsing.

use cardwire_core::constants::{XCARD_NS, XCARD_PARAMETERS};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::{ParseError, ParseResult};
use crate::rfc::vcard::core::{
    QualifiedName, VCardParameters, VCardVersion, XCardElement, XCardValue,
};

/// One xCard property element, split into the pieces a property reads.
#[derive(Debug, Clone)]
pub struct XCardProperty {
    pub name: QualifiedName,
    /// Parameters from the `<parameters>` child.
    pub parameters: VCardParameters,
    /// The value children.
    pub element: XCardElement,
}

/// Where the reader currently is inside the property element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Outside,
    Property,
    Value,
    Parameters,
    Parameter,
    ParameterValue,
}

/// Parses a single xCard property element.
///
/// Elements nested deeper than the value children are ignored; their text
/// is not part of any value.
///
/// ## Errors
/// Returns an error if the XML is malformed or has no root element.
#[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_property_element(xml: &str) -> ParseResult<XCardProperty> {
    let mut reader = Reader::from_reader(xml.as_bytes());

    let mut buf = Vec::new();
    let mut namespaces: Vec<(String, String)> = Vec::new();
    let mut position = Position::Outside;
    let mut ignored_depth = 0usize;

    let mut name: Option<QualifiedName> = None;
    let mut parameters = VCardParameters::new();
    let mut children: Vec<XCardValue> = Vec::new();
    let mut parameter_name = String::new();
    let mut text = String::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                collect_namespaces(e, &mut namespaces)?;
                let local_name = local_name(e)?;

                if ignored_depth > 0 || in_value(position) {
                    if !is_empty {
                        ignored_depth += 1;
                    }
                } else {
                    let next = match position {
                        Position::Outside => {
                            name = Some(resolve_qname(e, &namespaces)?);
                            Position::Property
                        }
                        Position::Property if local_name == XCARD_PARAMETERS => {
                            Position::Parameters
                        }
                        Position::Property => {
                            text.clear();
                            children.push(XCardValue {
                                name: local_name,
                                text: String::new(),
                            });
                            Position::Value
                        }
                        Position::Parameters => {
                            parameter_name = local_name;
                            Position::Parameter
                        }
                        Position::Parameter => {
                            text.clear();
                            Position::ParameterValue
                        }
                        Position::Value | Position::ParameterValue => position,
                    };

                    if is_empty {
                        close(next, &mut parameters, &parameter_name, &mut text, &mut children);
                        if next == Position::Property && position == Position::Outside {
                            break;
                        }
                    } else {
                        position = next;
                    }
                }
            }
            Event::End(_) => {
                if ignored_depth > 0 {
                    ignored_depth -= 1;
                } else {
                    close(position, &mut parameters, &parameter_name, &mut text, &mut children);
                    position = parent(position);
                    if position == Position::Outside {
                        break;
                    }
                }
            }
            Event::Text(ref e) => {
                if ignored_depth == 0 && in_value(position) {
                    text.push_str(&reader.decoder().decode(e)?);
                }
            }
            Event::CData(ref e) => {
                if ignored_depth == 0 && in_value(position) {
                    text.push_str(&reader.decoder().decode(e)?);
                }
            }
            Event::GeneralRef(ref e) => {
                if ignored_depth == 0 && in_value(position) {
                    if let Some(c) = e.resolve_char_ref()? {
                        text.push(c);
                    } else {
                        let entity = reader.decoder().decode(e)?;
                        let resolved = quick_xml::escape::resolve_predefined_entity(&entity)
                            .ok_or_else(|| {
                                ParseError::xml(format!("unknown entity: &{entity};"))
                            })?;
                        text.push_str(resolved);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let name = name.ok_or_else(|| ParseError::missing_element("property"))?;
    tracing::debug!(%name, children = children.len(), "Parsed xCard property element");

    Ok(XCardProperty {
        name,
        parameters,
        element: XCardElement::with_children(VCardVersion::V4_0, children),
    })
}

fn in_value(position: Position) -> bool {
    matches!(position, Position::Value | Position::ParameterValue)
}

fn parent(position: Position) -> Position {
    match position {
        Position::Outside | Position::Property => Position::Outside,
        Position::Value | Position::Parameters => Position::Property,
        Position::Parameter => Position::Parameters,
        Position::ParameterValue => Position::Parameter,
    }
}

/// Stores the text collected for the element being closed.
fn close(
    position: Position,
    parameters: &mut VCardParameters,
    parameter_name: &str,
    text: &mut String,
    children: &mut [XCardValue],
) {
    match position {
        Position::Value => {
            if let Some(child) = children.last_mut() {
                child.text = std::mem::take(text);
            }
        }
        Position::ParameterValue => parameters.put(parameter_name, std::mem::take(text)),
        _ => {}
    }
}

fn local_name(e: &BytesStart<'_>) -> ParseResult<String> {
    let local_name_bytes = e.local_name();
    Ok(std::str::from_utf8(local_name_bytes.as_ref())?.to_owned())
}

/// Collects namespace declarations.
fn collect_namespaces(
    e: &BytesStart<'_>,
    namespaces: &mut Vec<(String, String)>,
) -> ParseResult<()> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.push((prefix.to_string(), value.to_string()));
        } else if key == "xmlns" {
            namespaces.push((String::new(), value.to_string()));
        } else {
            // Other attributes ignored
        }
    }
    Ok(())
}

/// Resolves a qualified name from an element, using namespace declarations.
fn resolve_qname(e: &BytesStart<'_>, namespaces: &[(String, String)]) -> ParseResult<QualifiedName> {
    let name_bytes = e.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?.to_owned();

    let (prefix, local_name) = match name.split_once(':') {
        Some((prefix, local)) => (prefix.to_owned(), local.to_owned()),
        None => (String::new(), name),
    };

    let namespace = namespaces
        .iter()
        .rev()
        .find(|(p, _)| *p == prefix)
        .map_or(XCARD_NS, |(_, ns)| ns.as_str()); // Default to the xCard namespace

    Ok(QualifiedName::new(namespace.to_string(), local_name))
}
