//! Reading and writing a single property in any wire format.
//!
//! These helpers do what generic document processing does with the
//! outcome of a property hook: a skipped property is dropped, a value that
//! cannot be parsed is dropped with a reason, an embedded vCard is handed
//! back to the caller, and an unsupported format is an error.

use serde_json::Value;

use super::build::{write_content_line, write_property_array, write_property_element};
use super::core::{
    CompatibilityMode, Document, EmbeddedDocument, Property, PropertyExt, PropertyResult, Signal,
    VCardVersion, WireFormat,
};
use super::parse::{
    ParseError, parse_content_line, parse_html_element, parse_property_array, parse_property_element,
};
use super::types::PropertyRegistry;
use crate::error::{RfcError, RfcResult};

/// Result of reading one property.
#[derive(Debug)]
pub enum ReadOutcome {
    /// The property was read, with any non-fatal read warnings.
    Property {
        property: Box<dyn Property>,
        warnings: Vec<String>,
    },
    /// The property asked to be discarded.
    Skipped { type_name: String, reason: String },
    /// The value was malformed; the property was discarded.
    Failed { type_name: String, reason: String },
    /// The value is a nested vCard. Process `document` and hand the result
    /// back to `property`.
    Embedded {
        property: Box<dyn Property>,
        document: EmbeddedDocument,
    },
}

impl ReadOutcome {
    /// Returns the property if it was read.
    #[must_use]
    pub fn into_property(self) -> Option<Box<dyn Property>> {
        match self {
            Self::Property { property, .. } => Some(property),
            _ => None,
        }
    }
}

/// Result of writing one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome<T> {
    Written(T),
    /// The property asked not to be written.
    Skipped(String),
    /// The value is a nested vCard the caller must write itself.
    Embedded(EmbeddedDocument),
}

impl<T> WriteOutcome<T> {
    /// Returns the written value, if any.
    pub fn written(self) -> Option<T> {
        match self {
            Self::Written(value) => Some(value),
            _ => None,
        }
    }
}

/// Reads one (unfolded) content line.
///
/// ## Errors
/// Returns an error if the line cannot be tokenized, or if the property
/// type reports the format as unsupported.
pub fn read_text_property(
    line: &str,
    version: VCardVersion,
    compat: CompatibilityMode,
    registry: &PropertyRegistry,
) -> RfcResult<ReadOutcome> {
    let line = parse_content_line(line)?;
    let mut property = registry.create(&line.name);
    property.set_group(line.group);
    let result = property.unmarshal_text(line.parameters, &line.value, version, compat);
    resolve_read(property, result, WireFormat::Text)
}

/// Reads one xCard property element. xCard is always vCard 4.0.
///
/// ## Errors
/// Returns an error if the XML is malformed, or if the property type does
/// not read xCard.
pub fn read_xml_property(
    xml: &str,
    compat: CompatibilityMode,
    registry: &PropertyRegistry,
) -> RfcResult<ReadOutcome> {
    let parsed = parse_property_element(xml)?;
    let mut property = registry.create_for_xml(&parsed.name);
    let result = property.unmarshal_xml(parsed.parameters, &parsed.element, compat);
    resolve_read(property, result, WireFormat::Xml)
}

/// Reads one jCard property array.
///
/// ## Errors
/// Returns an error if the JSON is not a property array, or if the
/// property type reports the format as unsupported.
pub fn read_json_property(
    json: &str,
    version: VCardVersion,
    registry: &PropertyRegistry,
) -> RfcResult<ReadOutcome> {
    let parsed = parse_property_array(json)?;
    let mut property = registry.create(&parsed.name);
    property.set_group(parsed.group);
    let result = property.unmarshal_json(parsed.parameters, &parsed.value, version);
    resolve_read(property, result, WireFormat::Json)
}

/// Reads one hCard element.
///
/// The type name is taken from `type_name`, or else from the first class
/// name of the element the registry knows.
///
/// ## Errors
/// Returns an error if the fragment has no element or no usable type name,
/// or if the property type reports the format as unsupported.
pub fn read_html_property(
    html: &str,
    type_name: Option<&str>,
    registry: &PropertyRegistry,
) -> RfcResult<ReadOutcome> {
    let element = parse_html_element(html)?;
    let type_name = match type_name {
        Some(name) => name.to_string(),
        None => element
            .class_names()
            .into_iter()
            .find(|class| registry.contains(class))
            .map(str::to_owned)
            .ok_or_else(|| {
                ParseError::html(format!(
                    "<{}> has no class naming a known property",
                    element.tag_name()
                ))
            })?,
    };
    let mut property = registry.create(&type_name);
    let result = property.unmarshal_html(&element);
    resolve_read(property, result, WireFormat::Html)
}

/// Writes one property as a content line, folded at `fold_width` octets.
///
/// ## Errors
/// Returns an error if the property type reports the format as
/// unsupported.
pub fn write_text_property(
    property: &dyn Property,
    version: VCardVersion,
    compat: CompatibilityMode,
    document: &dyn Document,
    fold_width: Option<usize>,
) -> RfcResult<WriteOutcome<String>> {
    let result = write_content_line(property, version, compat, document, fold_width);
    resolve_write(property, result)
}

/// Writes one property as an xCard property element.
///
/// ## Errors
/// Returns an error if the XML writer fails, or if the property type
/// reports the format as unsupported.
pub fn write_xml_property(
    property: &dyn Property,
    compat: CompatibilityMode,
    document: &dyn Document,
) -> RfcResult<WriteOutcome<String>> {
    let version = VCardVersion::V4_0;
    let element = match resolve_write(property, property.marshal_xml(version, compat))? {
        WriteOutcome::Written(element) => element,
        WriteOutcome::Skipped(reason) => return Ok(WriteOutcome::Skipped(reason)),
        WriteOutcome::Embedded(document) => return Ok(WriteOutcome::Embedded(document)),
    };
    let parameters = property.marshal_parameters(version, compat, document);
    let xml = write_property_element(&property.xml_name(), &parameters, &element)?;
    Ok(WriteOutcome::Written(xml))
}

/// Writes one property as a jCard property array.
///
/// ## Errors
/// Returns an error if the property type reports the format as
/// unsupported.
pub fn write_json_property(
    property: &dyn Property,
    version: VCardVersion,
    document: &dyn Document,
) -> RfcResult<WriteOutcome<Value>> {
    let value = match resolve_write(property, property.marshal_json(version))? {
        WriteOutcome::Written(value) => value,
        WriteOutcome::Skipped(reason) => return Ok(WriteOutcome::Skipped(reason)),
        WriteOutcome::Embedded(document) => return Ok(WriteOutcome::Embedded(document)),
    };
    let parameters = property.marshal_parameters(version, CompatibilityMode::Rfc, document);
    Ok(WriteOutcome::Written(write_property_array(
        property.type_name(),
        property.group(),
        &parameters,
        &value,
    )))
}

fn resolve_read(
    property: Box<dyn Property>,
    result: PropertyResult<Vec<String>>,
    format: WireFormat,
) -> RfcResult<ReadOutcome> {
    let type_name = property.type_name().to_string();
    match result {
        Ok(warnings) => {
            tracing::debug!(%type_name, %format, warnings = warnings.len(), "Property read");
            Ok(ReadOutcome::Property { property, warnings })
        }
        Err(Signal::Skip(reason)) => {
            tracing::warn!(%type_name, %format, %reason, "Property skipped");
            Ok(ReadOutcome::Skipped { type_name, reason })
        }
        Err(Signal::CannotParse(reason)) => {
            tracing::warn!(%type_name, %format, %reason, "Property could not be parsed");
            Ok(ReadOutcome::Failed { type_name, reason })
        }
        Err(Signal::EmbeddedDocument(document)) => {
            tracing::debug!(%type_name, %format, "Property holds an embedded vCard");
            Ok(ReadOutcome::Embedded { property, document })
        }
        Err(signal @ Signal::Unsupported { .. }) => Err(RfcError::Unsupported(signal)),
    }
}

fn resolve_write<T>(
    property: &dyn Property,
    result: PropertyResult<T>,
) -> RfcResult<WriteOutcome<T>> {
    match result {
        Ok(value) => Ok(WriteOutcome::Written(value)),
        Err(Signal::Skip(reason)) => {
            tracing::warn!(type_name = %property.type_name(), %reason, "Property not written");
            Ok(WriteOutcome::Skipped(reason))
        }
        Err(Signal::EmbeddedDocument(document)) => Ok(WriteOutcome::Embedded(document)),
        Err(Signal::CannotParse(reason)) => Err(RfcError::SerializeError(reason)),
        Err(signal @ Signal::Unsupported { .. }) => Err(RfcError::Unsupported(signal)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::NoDocument;
    use crate::rfc::vcard::types::{Agent, Gender, TextProperty};

    #[test_log::test]
    fn read_text_gender() {
        let registry = PropertyRegistry::standard();
        let outcome = read_text_property(
            "item1.GENDER:F;she",
            VCardVersion::V4_0,
            CompatibilityMode::Rfc,
            &registry,
        )
        .unwrap();
        let ReadOutcome::Property { property, warnings } = outcome else {
            panic!("expected a property");
        };
        assert!(warnings.is_empty());
        assert_eq!(property.group(), Some("item1"));
        assert_eq!(
            property
                .marshal_text(VCardVersion::V4_0, CompatibilityMode::Rfc)
                .unwrap(),
            "F;she"
        );
    }

    #[test_log::test]
    fn malformed_value_fails_without_error() {
        let registry = PropertyRegistry::standard();
        let outcome = read_text_property(
            "GENDER:Q",
            VCardVersion::V4_0,
            CompatibilityMode::Rfc,
            &registry,
        )
        .unwrap();
        assert!(matches!(outcome, ReadOutcome::Failed { type_name, .. } if type_name == "GENDER"));
    }

    #[test_log::test]
    fn unsupported_xml_read_is_an_error() {
        let registry = PropertyRegistry::standard();
        let err = read_xml_property(
            r#"<x-custom xmlns="urn:ietf:params:xml:ns:vcard-4.0"><unknown>v</unknown></x-custom>"#,
            CompatibilityMode::Rfc,
            &registry,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RfcError::Unsupported(Signal::Unsupported {
                format: WireFormat::Xml,
                ..
            })
        ));
    }

    #[test_log::test]
    fn xml_read_and_write() {
        let registry = PropertyRegistry::standard();
        let outcome = read_xml_property(
            r#"<note xmlns="urn:ietf:params:xml:ns:vcard-4.0"><parameters><language><language-tag>fr</language-tag></language></parameters><text>Salut</text></note>"#,
            CompatibilityMode::Rfc,
            &registry,
        )
        .unwrap();
        let property = outcome.into_property().unwrap();
        assert_eq!(property.parameter("LANGUAGE"), Some("fr"));

        let xml = write_xml_property(property.as_ref(), CompatibilityMode::Rfc, &NoDocument)
            .unwrap()
            .written()
            .unwrap();
        assert!(xml.contains("<text>Salut</text>"));
        assert!(xml.contains("<language>"));
    }

    #[test_log::test]
    fn json_read_and_write() {
        let registry = PropertyRegistry::standard();
        let outcome = read_json_property(
            r#"["categories", {"group": "g"}, "text", "a", "b"]"#,
            VCardVersion::V4_0,
            &registry,
        )
        .unwrap();
        let property = outcome.into_property().unwrap();
        let json = write_json_property(property.as_ref(), VCardVersion::V4_0, &NoDocument)
            .unwrap()
            .written()
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!(["categories", {"group": "g"}, "text", "a", "b"])
        );
    }

    #[test_log::test]
    fn html_type_from_class() {
        let registry = PropertyRegistry::standard();
        let outcome = read_html_property(
            r#"<span class="p-x fn">Jane Doe</span>"#,
            None,
            &registry,
        )
        .unwrap();
        let property = outcome.into_property().unwrap();
        assert_eq!(property.type_name(), "FN");

        assert!(read_html_property("<span>?</span>", None, &registry).is_err());
    }

    #[test_log::test]
    fn write_outcomes() {
        let note = TextProperty::with_value("NOTE", "hi");
        let written = write_text_property(
            &note,
            VCardVersion::V3_0,
            CompatibilityMode::Rfc,
            &NoDocument,
            Some(75),
        )
        .unwrap();
        assert_eq!(written, WriteOutcome::Written("NOTE:hi".to_string()));

        let skipped = write_text_property(
            &Agent::default(),
            VCardVersion::V3_0,
            CompatibilityMode::Rfc,
            &NoDocument,
            None,
        )
        .unwrap();
        assert!(matches!(skipped, WriteOutcome::Skipped(_)));

        let embedded = write_json_property(
            &Agent::document("BEGIN:VCARD"),
            VCardVersion::V3_0,
            &NoDocument,
        )
        .unwrap();
        assert!(matches!(embedded, WriteOutcome::Embedded(_)));

        let gender = write_json_property(&Gender::male(), VCardVersion::V4_0, &NoDocument)
            .unwrap()
            .written()
            .unwrap();
        assert_eq!(gender, serde_json::json!(["gender", {}, "text", "M"]));
    }
}
