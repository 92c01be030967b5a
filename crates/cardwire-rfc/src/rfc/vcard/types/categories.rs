//! CATEGORIES (RFC 6350 §6.7.1).

use crate::rfc::vcard::build::escape_text;
use crate::rfc::vcard::core::{
    CompatibilityMode, Document, Property, PropertyBase, PropertyResult, TaggedValue,
    VCardDataType, VCardVersion, ValidationWarning, XCardElement, missing_xml_values,
};
use crate::rfc::vcard::parse::split_component;

pub const CATEGORIES: &str = "CATEGORIES";

/// Tags or keywords describing the card, as a list of text values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories {
    base: PropertyBase,
    values: Vec<String>,
}

impl Default for Categories {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Categories {
    #[must_use]
    pub fn new(values: Vec<String>) -> Self {
        Self {
            base: PropertyBase::new(CATEGORIES),
            values,
        }
    }

    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn add(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }
}

impl Property for Categories {
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
        if self.values.is_empty() {
            vec![ValidationWarning::value_empty()]
        } else {
            Vec::new()
        }
    }

    fn write_text(
        &self,
        _version: VCardVersion,
        _compat: CompatibilityMode,
    ) -> PropertyResult<String> {
        Ok(self
            .values
            .iter()
            .map(|v| escape_text(v))
            .collect::<Vec<_>>()
            .join(","))
    }

    fn write_xml(
        &self,
        element: &mut XCardElement,
        _compat: CompatibilityMode,
    ) -> PropertyResult<()> {
        element.append_all(VCardDataType::Text.as_str(), self.values.iter().cloned());
        Ok(())
    }

    fn write_json(&self, _version: VCardVersion) -> PropertyResult<TaggedValue> {
        Ok(match self.values.as_slice() {
            [single] => TaggedValue::single(Some(VCardDataType::Text), single.clone()),
            values => TaggedValue::multi(Some(VCardDataType::Text), values.to_vec()),
        })
    }

    fn read_text(
        &mut self,
        value: &str,
        _version: VCardVersion,
        _compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        self.values = split_component(value);
        Ok(Vec::new())
    }

    fn read_xml(
        &mut self,
        element: &XCardElement,
        _compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        let values = element.all(VCardDataType::Text.as_str());
        if values.is_empty() {
            return Err(missing_xml_values(&[Some(&VCardDataType::Text)]));
        }
        self.values = values.into_iter().map(str::to_owned).collect();
        Ok(Vec::new())
    }

    fn read_json(
        &mut self,
        value: &TaggedValue,
        _version: VCardVersion,
    ) -> PropertyResult<Vec<String>> {
        self.values = match value {
            TaggedValue::Single { value, .. } if value.is_empty() => Vec::new(),
            TaggedValue::Single { value, .. } => vec![value.clone()],
            TaggedValue::Multi { values, .. } => values.clone(),
            TaggedValue::Structured { components, .. } => {
                components.iter().flatten().cloned().collect()
            }
        };
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::PropertyExt;

    #[test]
    fn text_list() {
        let mut categories = Categories::default();
        categories
            .read_text("work,a\\,b,friends", VCardVersion::V3_0, CompatibilityMode::Rfc)
            .unwrap();
        assert_eq!(categories.values(), ["work", "a,b", "friends"]);
        assert_eq!(
            categories
                .marshal_text(VCardVersion::V3_0, CompatibilityMode::Rfc)
                .unwrap(),
            "work,a\\,b,friends"
        );
    }

    #[test]
    fn json_reads_entries_without_joining() {
        let mut categories = Categories::default();
        categories
            .read_json(
                &TaggedValue::multi(None, vec!["a,b".into(), "c".into()]),
                VCardVersion::V4_0,
            )
            .unwrap();
        assert_eq!(categories.values(), ["a,b", "c"]);
        assert_eq!(
            categories.marshal_json(VCardVersion::V4_0).unwrap(),
            TaggedValue::multi(Some(VCardDataType::Text), vec!["a,b".into(), "c".into()])
        );
    }

    #[test]
    fn xml_repeated_text_children() {
        let categories = Categories::new(vec!["x".into(), "y".into()]);
        let element = categories
            .marshal_xml(VCardVersion::V4_0, CompatibilityMode::Rfc)
            .unwrap();
        assert_eq!(element.all("text"), ["x", "y"]);

        let mut parsed = Categories::default();
        parsed.read_xml(&element, CompatibilityMode::Rfc).unwrap();
        assert_eq!(parsed.values(), categories.values());
    }
}
