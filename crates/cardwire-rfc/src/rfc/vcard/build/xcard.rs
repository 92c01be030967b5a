//! xCard (RFC 6351) property element writer.

use std::io::Cursor;

use cardwire_core::constants::{XCARD_NS, XCARD_PARAMETERS};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::RfcResult;
use crate::rfc::vcard::core::{QualifiedName, VCardParameters, XCardElement, parameter_names};

/// Prefix used for a property element outside the xCard namespace.
const FOREIGN_PREFIX: &str = "x";

/// Writes one xCard property element: the `<parameters>` child (if any
/// parameter is set), then the value children.
///
/// ## Errors
/// Returns an error if the XML writer fails.
pub fn write_property_element(
    name: &QualifiedName,
    parameters: &VCardParameters,
    element: &XCardElement,
) -> RfcResult<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let tag = if name.is_xcard() {
        name.local_name().to_string()
    } else {
        format!("{FOREIGN_PREFIX}:{}", name.local_name())
    };

    let mut start = BytesStart::new(tag.as_str());
    start.push_attribute(("xmlns", XCARD_NS));
    if !name.is_xcard() {
        start.push_attribute((
            format!("xmlns:{FOREIGN_PREFIX}").as_str(),
            name.namespace_uri(),
        ));
    }
    writer.write_event(Event::Start(start))?;

    write_parameters(&mut writer, parameters)?;

    for child in element.children() {
        write_text_element(&mut writer, &child.name, &child.text)?;
    }

    writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| crate::error::RfcError::SerializeError(e.to_string()))
}

fn write_parameters(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    parameters: &VCardParameters,
) -> RfcResult<()> {
    // The value type is carried by the value element names.
    let params: Vec<_> = parameters
        .iter()
        .filter(|p| !p.is_named(parameter_names::VALUE))
        .collect();
    if params.is_empty() {
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new(XCARD_PARAMETERS)))?;
    for param in params {
        let name = param.name.to_ascii_lowercase();
        writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
        let data_type = parameter_data_type(&param.name);
        for value in &param.values {
            write_text_element(writer, data_type, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    }
    writer.write_event(Event::End(BytesEnd::new(XCARD_PARAMETERS)))?;

    Ok(())
}

/// The value element xCard uses for a parameter's values.
fn parameter_data_type(name: &str) -> &'static str {
    match name.to_ascii_uppercase().as_str() {
        parameter_names::LANGUAGE => "language-tag",
        parameter_names::PREF | parameter_names::INDEX => "integer",
        parameter_names::GEO => "uri",
        _ => "text",
    }
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    text: &str,
) -> RfcResult<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
