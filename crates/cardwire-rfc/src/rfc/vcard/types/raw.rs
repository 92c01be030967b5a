//! Properties without a dedicated type (extensions and unknown names).

use crate::rfc::vcard::core::{
    CompatibilityMode, Property, PropertyBase, PropertyResult, QualifiedName, VCardVersion,
};

/// A property kept as its raw text value.
///
/// Uses every default hook, so it cannot read xCard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProperty {
    base: PropertyBase,
    xml_name: Option<QualifiedName>,
    value: String,
}

impl RawProperty {
    #[must_use]
    pub fn new(type_name: &str) -> Self {
        Self {
            base: PropertyBase::new(type_name.to_string()),
            xml_name: None,
            value: String::new(),
        }
    }

    #[must_use]
    pub fn with_value(type_name: &str, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::new(type_name)
        }
    }

    /// Creates a property for an xCard element outside the xCard namespace.
    #[must_use]
    pub fn with_xml_name(name: QualifiedName) -> Self {
        Self {
            xml_name: Some(name.clone()),
            ..Self::new(name.local_name())
        }
    }

    /// Raw, still-escaped text value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Property for RawProperty {
    fn base(&self) -> &PropertyBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PropertyBase {
        &mut self.base
    }

    fn qualified_name(&self) -> Option<QualifiedName> {
        self.xml_name.clone()
    }

    fn write_text(
        &self,
        _version: VCardVersion,
        _compat: CompatibilityMode,
    ) -> PropertyResult<String> {
        Ok(self.value.clone())
    }

    fn read_text(
        &mut self,
        value: &str,
        _version: VCardVersion,
        _compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        self.value = value.to_string();
        Ok(Vec::new())
    }
}
