//! The property contract.
//!
//! A concrete property type implements [`Property`]: a handful of per-format
//! hooks plus access to its [`PropertyBase`]. Callers never invoke the hooks
//! directly; they go through [`PropertyExt`], which is implemented for every
//! property and cannot be overridden. The entry points install freshly
//! parsed parameters before a read hook runs, hand write hooks a copy of the
//! parameters, and run the validation pipeline.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use cardwire_core::constants::{XCARD_NS, XCARD_UNKNOWN};

use super::data_type::VCardDataType;
use super::element::{HCardElement, XCardElement};
use super::parameters::VCardParameters;
use super::signal::{PropertyResult, Signal, WireFormat};
use super::tagged::TaggedValue;
use super::validation::validate_property;
use super::version::{CompatibilityMode, VCardVersion};
use super::warning::ValidationWarning;

/// A qualified XML name (namespace + local name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Cow<'static, str>,
    pub local_name: Cow<'static, str>,
}

impl QualifiedName {
    #[must_use]
    pub fn new(
        namespace: impl Into<Cow<'static, str>>,
        local_name: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// Creates a name in the xCard namespace.
    #[must_use]
    pub fn xcard(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(XCARD_NS, local_name)
    }

    /// The name the xCard vocabulary gives a property type: its lower-cased
    /// type name in the xCard namespace.
    #[must_use]
    pub fn for_type_name(type_name: &str) -> Self {
        Self::xcard(type_name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    #[must_use]
    pub fn namespace_uri(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn is_xcard(&self) -> bool {
        self.namespace == XCARD_NS
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.namespace, self.local_name)
    }
}

/// State shared by every property type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBase {
    type_name: Cow<'static, str>,
    group: Option<String>,
    parameters: VCardParameters,
}

impl PropertyBase {
    /// Creates the state for a property of the given type. The type name is
    /// upper-cased and fixed for the lifetime of the property.
    #[must_use]
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        let type_name = type_name.into();
        let type_name = if type_name.bytes().any(|b| b.is_ascii_lowercase()) {
            Cow::Owned(type_name.to_ascii_uppercase())
        } else {
            type_name
        };
        Self {
            type_name,
            group: None,
            parameters: VCardParameters::new(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn set_group(&mut self, group: Option<String>) {
        self.group = group;
    }

    #[must_use]
    pub fn parameters(&self) -> &VCardParameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut VCardParameters {
        &mut self.parameters
    }

    pub fn set_parameters(&mut self, parameters: VCardParameters) {
        self.parameters = parameters;
    }
}

/// A read-only view of the document a property belongs to.
pub trait Document {
    /// Every property of the document, in document order.
    fn properties(&self) -> Vec<&dyn Property>;

    /// The properties with the given type name.
    fn properties_named(&self, type_name: &str) -> Vec<&dyn Property> {
        self.properties()
            .into_iter()
            .filter(|p| p.base().type_name().eq_ignore_ascii_case(type_name))
            .collect()
    }
}

/// A property validated or written on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDocument;

impl Document for NoDocument {
    fn properties(&self) -> Vec<&dyn Property> {
        Vec::new()
    }
}

impl Document for [Box<dyn Property>] {
    fn properties(&self) -> Vec<&dyn Property> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl Document for Vec<Box<dyn Property>> {
    fn properties(&self) -> Vec<&dyn Property> {
        self.as_slice().properties()
    }
}

/// The per-format hooks of a property type.
///
/// Only [`base`](Self::base), [`base_mut`](Self::base_mut),
/// [`write_text`](Self::write_text) and [`read_text`](Self::read_text) are
/// required. Read hooks return the non-fatal warnings produced while
/// parsing. Hooks must not install parameters or run validation; the
/// [`PropertyExt`] entry points do that.
pub trait Property: fmt::Debug {
    fn base(&self) -> &PropertyBase;

    fn base_mut(&mut self) -> &mut PropertyBase;

    /// Versions that define this property type.
    fn supported_versions(&self) -> &'static [VCardVersion] {
        &VCardVersion::ALL
    }

    /// xCard element name, when it differs from the lower-cased type name in
    /// the xCard namespace.
    fn qualified_name(&self) -> Option<QualifiedName> {
        None
    }

    /// Type-specific validation.
    fn validate_value(
        &self,
        _version: VCardVersion,
        _document: &dyn Document,
    ) -> Vec<ValidationWarning> {
        Vec::new()
    }

    /// Renders the value in the text encoding, escaped but not folded.
    ///
    /// ## Errors
    /// [`Signal::Skip`] to drop the property, or
    /// [`Signal::EmbeddedDocument`] when the value is a nested vCard.
    fn write_text(&self, version: VCardVersion, compat: CompatibilityMode)
    -> PropertyResult<String>;

    /// Appends the value children of the xCard element.
    ///
    /// Defaults to the text value inside an `<unknown>` child.
    ///
    /// ## Errors
    /// Whatever [`write_text`](Self::write_text) signals.
    fn write_xml(
        &self,
        element: &mut XCardElement,
        compat: CompatibilityMode,
    ) -> PropertyResult<()> {
        let text = self.write_text(element.version(), compat)?;
        element.append(XCARD_UNKNOWN, text);
        Ok(())
    }

    /// Produces the jCard value.
    ///
    /// Defaults to the strict text value, typed by the `VALUE` parameter.
    ///
    /// ## Errors
    /// Whatever [`write_text`](Self::write_text) signals.
    fn write_json(&self, version: VCardVersion) -> PropertyResult<TaggedValue> {
        let text = self.write_text(version, CompatibilityMode::Rfc)?;
        Ok(TaggedValue::single(
            self.base().parameters().value_type(),
            text,
        ))
    }

    /// Adjusts the copy of the parameters that is about to be written.
    fn write_parameters(
        &self,
        _parameters: &mut VCardParameters,
        _version: VCardVersion,
        _compat: CompatibilityMode,
        _document: &dyn Document,
    ) {
    }

    /// Parses an unescaped text value into the property.
    ///
    /// ## Errors
    /// [`Signal::Skip`], [`Signal::CannotParse`] or
    /// [`Signal::EmbeddedDocument`].
    fn read_text(
        &mut self,
        value: &str,
        version: VCardVersion,
        compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>>;

    /// Parses the value children of an xCard element.
    ///
    /// Property types must opt in; the default does not read xCard at all.
    ///
    /// ## Errors
    /// [`Signal::Unsupported`] unless overridden.
    fn read_xml(
        &mut self,
        _element: &XCardElement,
        _compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        Err(Signal::unsupported_read(
            self.base().type_name(),
            WireFormat::Xml,
        ))
    }

    /// Parses an hCard element.
    ///
    /// Defaults to reading the element's value with the vCard 3.0 text
    /// grammar, which is the only one hCard maps to.
    ///
    /// ## Errors
    /// Whatever [`read_text`](Self::read_text) signals.
    fn read_html(&mut self, element: &HCardElement) -> PropertyResult<Vec<String>> {
        self.read_text(&element.value(), VCardVersion::HTML, CompatibilityMode::Rfc)
    }

    /// Parses a jCard value.
    ///
    /// Defaults to joining the value into one text value (see
    /// [`TaggedValue::to_text`]) and reading that.
    ///
    /// ## Errors
    /// Whatever [`read_text`](Self::read_text) signals.
    fn read_json(
        &mut self,
        value: &TaggedValue,
        version: VCardVersion,
    ) -> PropertyResult<Vec<String>> {
        self.read_text(&value.to_text(), version, CompatibilityMode::Rfc)
    }
}

/// Public entry points of every property.
///
/// Implemented for all [`Property`] types and not implementable elsewhere,
/// so the bookkeeping around each hook always runs exactly once.
pub trait PropertyExt: Property {
    fn type_name(&self) -> &str {
        self.base().type_name()
    }

    fn group(&self) -> Option<&str> {
        self.base().group()
    }

    fn set_group(&mut self, group: Option<String>) {
        self.base_mut().set_group(group);
    }

    fn parameters(&self) -> &VCardParameters {
        self.base().parameters()
    }

    fn set_parameters(&mut self, parameters: VCardParameters) {
        self.base_mut().set_parameters(parameters);
    }

    /// The xCard element name of the property.
    fn xml_name(&self) -> QualifiedName {
        self.qualified_name()
            .unwrap_or_else(|| QualifiedName::for_type_name(self.type_name()))
    }

    fn is_supported(&self, version: VCardVersion) -> bool {
        self.supported_versions().contains(&version)
    }

    /// Checks the property against a version.
    ///
    /// Warnings come in three groups, always all computed: version support,
    /// then parameters in parameter order, then type-specific checks.
    fn validate(&self, version: VCardVersion, document: &dyn Document) -> Vec<ValidationWarning> {
        validate_property(self, version, document)
    }

    /// ## Errors
    /// [`Signal::Skip`] or [`Signal::EmbeddedDocument`].
    fn marshal_text(
        &self,
        version: VCardVersion,
        compat: CompatibilityMode,
    ) -> PropertyResult<String> {
        self.write_text(version, compat)
    }

    /// Builds the value children of the property's xCard element.
    ///
    /// ## Errors
    /// [`Signal::Skip`] or [`Signal::EmbeddedDocument`].
    fn marshal_xml(
        &self,
        version: VCardVersion,
        compat: CompatibilityMode,
    ) -> PropertyResult<XCardElement> {
        let mut element = XCardElement::new(version);
        self.write_xml(&mut element, compat)?;
        Ok(element)
    }

    /// ## Errors
    /// [`Signal::Skip`] or [`Signal::EmbeddedDocument`].
    fn marshal_json(&self, version: VCardVersion) -> PropertyResult<TaggedValue> {
        self.write_json(version)
    }

    /// Returns the parameters to write. The property's own parameters are
    /// never modified.
    fn marshal_parameters(
        &self,
        version: VCardVersion,
        compat: CompatibilityMode,
        document: &dyn Document,
    ) -> VCardParameters {
        let mut copy = self.parameters().clone();
        self.write_parameters(&mut copy, version, compat, document);
        copy
    }

    /// Installs `parameters`, then parses a text value.
    ///
    /// ## Errors
    /// [`Signal::Skip`], [`Signal::CannotParse`] or
    /// [`Signal::EmbeddedDocument`].
    fn unmarshal_text(
        &mut self,
        parameters: VCardParameters,
        value: &str,
        version: VCardVersion,
        compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        self.set_parameters(parameters);
        self.read_text(value, version, compat)
    }

    /// Installs `parameters`, then parses an xCard element.
    ///
    /// ## Errors
    /// [`Signal::Unsupported`] if the type does not read xCard, otherwise
    /// as [`unmarshal_text`](Self::unmarshal_text).
    fn unmarshal_xml(
        &mut self,
        parameters: VCardParameters,
        element: &XCardElement,
        compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        self.set_parameters(parameters);
        self.read_xml(element, compat)
    }

    /// Parses an hCard element. hCard carries no parameters, so the current
    /// ones are kept.
    ///
    /// ## Errors
    /// As [`unmarshal_text`](Self::unmarshal_text).
    fn unmarshal_html(&mut self, element: &HCardElement) -> PropertyResult<Vec<String>> {
        self.read_html(element)
    }

    /// Installs `parameters`, then parses a jCard value.
    ///
    /// ## Errors
    /// As [`unmarshal_text`](Self::unmarshal_text).
    fn unmarshal_json(
        &mut self,
        parameters: VCardParameters,
        value: &TaggedValue,
        version: VCardVersion,
    ) -> PropertyResult<Vec<String>> {
        self.set_parameters(parameters);
        self.read_json(value, version)
    }

    // --- Parameter conveniences (names are case-insensitive) ---

    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters().first(name)
    }

    fn parameter_values(&self, name: &str) -> &[String] {
        self.parameters().get(name)
    }

    /// Replaces every value of `name` with `value`.
    fn set_parameter(&mut self, name: &str, value: &str) {
        self.base_mut().parameters_mut().replace(name, value);
    }

    fn add_parameter(&mut self, name: &str, value: &str) {
        self.base_mut().parameters_mut().put(name, value);
    }

    fn remove_parameter(&mut self, name: &str) -> Vec<String> {
        self.base_mut().parameters_mut().remove_all(name)
    }

    /// Orders by preference rank, most preferred first. A property without
    /// a rank sorts after every ranked one; two unranked properties are
    /// equal.
    fn cmp_pref(&self, other: &dyn Property) -> Ordering {
        let ours = self.parameters().pref();
        let theirs = other.base().parameters().pref();
        match (ours, theirs) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl<T: Property + ?Sized> PropertyExt for T {}

/// Signal for an xCard element that has none of the expected value
/// children.
#[must_use]
pub fn missing_xml_elements(names: &[&str]) -> Signal {
    let message = match names {
        [] => "Property value empty.".to_string(),
        [one] => format!("Property value empty (no <{one}> element found)."),
        [a, b] => format!("Property value empty (no <{a}> or <{b}> elements found)."),
        [init @ .., last] => {
            let init = init
                .iter()
                .map(|n| format!("<{n}>"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Property value empty (no {init}, or <{last}> elements found).")
        }
    };
    Signal::cannot_parse(message)
}

/// As [`missing_xml_elements`], naming data types; an untyped entry stands
/// for `<unknown>`.
#[must_use]
pub fn missing_xml_values(data_types: &[Option<&VCardDataType>]) -> Signal {
    let names: Vec<&str> = data_types
        .iter()
        .map(|t| t.map_or(XCARD_UNKNOWN, VCardDataType::as_str))
        .collect();
    missing_xml_elements(&names)
}
