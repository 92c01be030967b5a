//! Single free-text properties (FN, NOTE, TITLE, ROLE).

use crate::rfc::vcard::build::escape_text;
use crate::rfc::vcard::core::{
    CompatibilityMode, Document, Pid, Property, PropertyBase, PropertyResult, TaggedValue,
    VCardDataType, VCardParameters, VCardVersion, ValidationWarning, XCardElement,
    missing_xml_values,
};
use crate::rfc::vcard::parse::unescape_text;

/// Type names handled by [`TextProperty`].
pub const TEXT_TYPES: [&str; 4] = ["FN", "NOTE", "TITLE", "ROLE"];

/// A property whose value is one free-text string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextProperty {
    base: PropertyBase,
    value: Option<String>,
}

impl TextProperty {
    /// Creates an empty property of the given type.
    #[must_use]
    pub fn new(type_name: &str) -> Self {
        Self {
            base: PropertyBase::new(type_name.to_string()),
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(type_name: &str, value: impl Into<String>) -> Self {
        let mut property = Self::new(type_name);
        property.value = Some(value.into());
        property
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    #[must_use]
    pub fn pref(&self) -> Option<u32> {
        self.base.parameters().pref()
    }

    pub fn set_pref(&mut self, pref: Option<u32>) {
        self.base.parameters_mut().set_pref(pref);
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.base.parameters().language()
    }

    pub fn set_language(&mut self, language: Option<&str>) {
        self.base.parameters_mut().set_language(language);
    }

    #[must_use]
    pub fn index(&self) -> Option<u32> {
        self.base.parameters().index()
    }

    pub fn set_index(&mut self, index: Option<u32>) {
        self.base.parameters_mut().set_index(index);
    }

    #[must_use]
    pub fn pids(&self) -> Vec<Pid> {
        self.base.parameters().pids()
    }

    pub fn add_pid(&mut self, pid: Pid) {
        self.base.parameters_mut().add_pid(pid);
    }

    pub fn remove_pids(&mut self) {
        self.base.parameters_mut().remove_pids();
    }
}

impl Property for TextProperty {
    fn base(&self) -> &PropertyBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PropertyBase {
        &mut self.base
    }

    fn validate_value(
        &self,
        _version: VCardVersion,
        _document: &dyn Document,
    ) -> Vec<ValidationWarning> {
        if self.value.as_deref().is_none_or(str::is_empty) {
            vec![ValidationWarning::value_empty()]
        } else {
            Vec::new()
        }
    }

    fn write_parameters(
        &self,
        parameters: &mut VCardParameters,
        version: VCardVersion,
        compat: CompatibilityMode,
        _document: &dyn Document,
    ) {
        // Outlook misreads non-ASCII 2.1 values unless the charset is named.
        if compat == CompatibilityMode::MsOutlook
            && version == VCardVersion::V2_1
            && parameters.charset().is_none()
            && self.value.as_deref().is_some_and(|v| !v.is_ascii())
        {
            parameters.set_charset(Some("UTF-8"));
        }
    }

    fn write_text(
        &self,
        _version: VCardVersion,
        _compat: CompatibilityMode,
    ) -> PropertyResult<String> {
        Ok(self.value.as_deref().map(escape_text).unwrap_or_default())
    }

    fn write_xml(
        &self,
        element: &mut XCardElement,
        _compat: CompatibilityMode,
    ) -> PropertyResult<()> {
        element.append(
            VCardDataType::Text.as_str(),
            self.value.clone().unwrap_or_default(),
        );
        Ok(())
    }

    fn write_json(&self, _version: VCardVersion) -> PropertyResult<TaggedValue> {
        Ok(TaggedValue::single(
            Some(VCardDataType::Text),
            self.value.clone().unwrap_or_default(),
        ))
    }

    fn read_text(
        &mut self,
        value: &str,
        _version: VCardVersion,
        _compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        self.value = Some(unescape_text(value));
        Ok(Vec::new())
    }

    fn read_xml(
        &mut self,
        element: &XCardElement,
        _compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        let text = element
            .first_value(Some(&VCardDataType::Text))
            .ok_or_else(|| missing_xml_values(&[Some(&VCardDataType::Text)]))?;
        self.value = Some(text.to_string());
        Ok(Vec::new())
    }

    fn read_json(
        &mut self,
        value: &TaggedValue,
        _version: VCardVersion,
    ) -> PropertyResult<Vec<String>> {
        self.value = Some(match value {
            TaggedValue::Single { value, .. } => value.clone(),
            other => unescape_text(&other.to_text()),
        });
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::{NoDocument, PropertyExt, Signal, WarningKind};

    #[test]
    fn text_escaping() {
        let note = TextProperty::with_value("note", "a, b; c\nd");
        assert_eq!(note.type_name(), "NOTE");
        assert_eq!(
            note.marshal_text(VCardVersion::V4_0, CompatibilityMode::Rfc)
                .unwrap(),
            "a\\, b\\; c\\nd"
        );

        let mut parsed = TextProperty::new("NOTE");
        parsed
            .read_text("a\\, b\\; c\\nd", VCardVersion::V4_0, CompatibilityMode::Rfc)
            .unwrap();
        assert_eq!(parsed.value(), note.value());
    }

    #[test]
    fn typed_parameter_accessors() {
        let mut fn_ = TextProperty::with_value("FN", "Jane");
        fn_.set_pref(Some(1));
        fn_.set_language(Some("en"));
        fn_.add_pid(Pid::new(1, Some(2)));

        assert_eq!(fn_.pref(), Some(1));
        assert_eq!(fn_.language(), Some("en"));
        assert_eq!(fn_.parameter("PID"), Some("1.2"));
        assert_eq!(fn_.pids(), vec![Pid::new(1, Some(2))]);
    }

    #[test]
    fn outlook_charset_on_copy_only() {
        let title = TextProperty::with_value("TITLE", "Directrice générale");
        let written = title.marshal_parameters(
            VCardVersion::V2_1,
            CompatibilityMode::MsOutlook,
            &NoDocument,
        );
        assert_eq!(written.charset(), Some("UTF-8"));
        assert_eq!(title.parameters().charset(), None);

        let rfc = title.marshal_parameters(VCardVersion::V2_1, CompatibilityMode::Rfc, &NoDocument);
        assert_eq!(rfc.charset(), None);
    }

    #[test]
    fn xml_read_requires_text_child() {
        let mut role = TextProperty::new("ROLE");
        let mut element = XCardElement::new(VCardVersion::V4_0);
        assert_eq!(
            role.read_xml(&element, CompatibilityMode::Rfc).unwrap_err(),
            Signal::cannot_parse("Property value empty (no <text> element found).")
        );

        element.append("text", "Engineer");
        role.read_xml(&element, CompatibilityMode::Rfc).unwrap();
        assert_eq!(role.value(), Some("Engineer"));
    }

    #[test]
    fn empty_value_warns() {
        let warnings = TextProperty::new("FN").validate(VCardVersion::V4_0, &NoDocument);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::ValueEmpty);
    }
}
