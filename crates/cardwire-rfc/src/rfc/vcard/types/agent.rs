//! AGENT (vCard 2.1 and 3.0): someone who acts on behalf of the card's
//! subject, given either as a URL or as a nested vCard.

use crate::rfc::vcard::core::{
    CompatibilityMode, Document, EmbeddedDocument, HCardElement, Property, PropertyBase,
    PropertyResult, Signal, TaggedValue, VCardDataType, VCardParameters, VCardVersion,
    ValidationWarning,
};
use crate::rfc::vcard::parse::unescape_text;

pub const AGENT: &str = "AGENT";

/// Where the agent's details live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentValue {
    Url(String),
    /// Serialized nested vCard.
    Document(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    base: PropertyBase,
    value: Option<AgentValue>,
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            base: PropertyBase::new(AGENT),
            value: None,
        }
    }
}

impl Agent {
    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            value: Some(AgentValue::Url(url.into())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn document(vcard: impl Into<String>) -> Self {
        Self {
            value: Some(AgentValue::Document(vcard.into())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&AgentValue> {
        self.value.as_ref()
    }

    /// Hands back the nested card after the caller processed an
    /// [`Signal::EmbeddedDocument`].
    pub fn set_document(&mut self, vcard: impl Into<String>) {
        self.value = Some(AgentValue::Document(vcard.into()));
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.value = Some(AgentValue::Url(url.into()));
    }

    fn url_type(version: VCardVersion) -> VCardDataType {
        if version == VCardVersion::V2_1 {
            VCardDataType::Url
        } else {
            VCardDataType::Uri
        }
    }
}

impl Property for Agent {
    fn base(&self) -> &PropertyBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PropertyBase {
        &mut self.base
    }

    fn supported_versions(&self) -> &'static [VCardVersion] {
        &[VCardVersion::V2_1, VCardVersion::V3_0]
    }

    fn validate_value(
        &self,
        _version: VCardVersion,
        _document: &dyn Document,
    ) -> Vec<ValidationWarning> {
        if self.value.is_none() {
            vec![ValidationWarning::value_empty()]
        } else {
            Vec::new()
        }
    }

    fn write_parameters(
        &self,
        parameters: &mut VCardParameters,
        version: VCardVersion,
        _compat: CompatibilityMode,
        _document: &dyn Document,
    ) {
        let data_type = match self.value {
            Some(AgentValue::Url(_)) => Some(Self::url_type(version)),
            _ => None,
        };
        parameters.set_value_type(data_type.as_ref());
    }

    fn write_text(
        &self,
        version: VCardVersion,
        _compat: CompatibilityMode,
    ) -> PropertyResult<String> {
        match &self.value {
            Some(AgentValue::Url(url)) => Ok(url.clone()),
            Some(AgentValue::Document(vcard)) => Err(Signal::embedded(
                EmbeddedDocument::new(vcard.clone()).with_version(version),
            )),
            None => Err(Signal::skip("Property has neither a URL nor an embedded vCard.")),
        }
    }

    fn write_json(&self, version: VCardVersion) -> PropertyResult<TaggedValue> {
        let url = self.write_text(version, CompatibilityMode::Rfc)?;
        Ok(TaggedValue::single(Some(Self::url_type(version)), url))
    }

    fn read_text(
        &mut self,
        value: &str,
        version: VCardVersion,
        _compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        match self.base.parameters().value_type() {
            Some(VCardDataType::Url | VCardDataType::Uri) => {
                self.value = Some(AgentValue::Url(value.trim().to_string()));
                Ok(Vec::new())
            }
            _ => Err(Signal::embedded(
                EmbeddedDocument::new(unescape_text(value)).with_version(version),
            )),
        }
    }

    /// The jCard data type slot stands in for `VALUE`.
    fn read_json(
        &mut self,
        value: &TaggedValue,
        version: VCardVersion,
    ) -> PropertyResult<Vec<String>> {
        match value.data_type() {
            Some(VCardDataType::Url | VCardDataType::Uri) => {
                self.value = Some(AgentValue::Url(value.to_text().trim().to_string()));
                Ok(Vec::new())
            }
            _ => Err(Signal::embedded(
                EmbeddedDocument::new(value.to_text()).with_version(version),
            )),
        }
    }

    fn read_html(&mut self, element: &HCardElement) -> PropertyResult<Vec<String>> {
        if element.has_class("vcard") {
            return Err(Signal::embedded(
                EmbeddedDocument::default().with_version(VCardVersion::HTML),
            ));
        }
        let url = element
            .attribute("href")
            .map_or_else(|| element.value(), str::to_owned);
        if url.is_empty() {
            return Err(Signal::cannot_parse("Agent has no URL."));
        }
        self.value = Some(AgentValue::Url(url));
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::{NoDocument, PropertyExt, WarningKind};

    #[test]
    fn url_sets_value_type_per_version() {
        let agent = Agent::url("http://example.com/agent.vcf");
        let v21 = agent.marshal_parameters(VCardVersion::V2_1, CompatibilityMode::Rfc, &NoDocument);
        let v30 = agent.marshal_parameters(VCardVersion::V3_0, CompatibilityMode::Rfc, &NoDocument);
        assert_eq!(v21.value_type(), Some(VCardDataType::Url));
        assert_eq!(v30.value_type(), Some(VCardDataType::Uri));
        assert_eq!(agent.parameters().value_type(), None);
    }

    #[test]
    fn document_is_embedded() {
        let agent = Agent::document("BEGIN:VCARD\r\nEND:VCARD");
        let err = agent
            .marshal_text(VCardVersion::V3_0, CompatibilityMode::Rfc)
            .unwrap_err();
        let Signal::EmbeddedDocument(doc) = err else {
            panic!("expected an embedded document");
        };
        assert_eq!(doc.content, "BEGIN:VCARD\r\nEND:VCARD");
        assert_eq!(doc.version, Some(VCardVersion::V3_0));
    }

    #[test]
    fn empty_agent_is_skipped() {
        let err = Agent::default()
            .marshal_text(VCardVersion::V3_0, CompatibilityMode::Rfc)
            .unwrap_err();
        assert!(matches!(err, Signal::Skip(_)));
    }

    #[test]
    fn read_uri_or_embedded() {
        let mut params = VCardParameters::new();
        params.put("VALUE", "uri");
        let mut agent = Agent::default();
        agent
            .unmarshal_text(params, "http://x", VCardVersion::V3_0, CompatibilityMode::Rfc)
            .unwrap();
        assert_eq!(agent.value(), Some(&AgentValue::Url("http://x".into())));

        let mut inline = Agent::default();
        let err = inline
            .unmarshal_text(
                VCardParameters::new(),
                "",
                VCardVersion::V2_1,
                CompatibilityMode::Rfc,
            )
            .unwrap_err();
        let Signal::EmbeddedDocument(doc) = err else {
            panic!("expected an embedded document");
        };
        assert!(doc.is_inline());
    }

    #[test]
    fn json_data_type_marks_a_url() {
        let mut agent = Agent::default();
        agent
            .unmarshal_json(
                VCardParameters::new(),
                &TaggedValue::single(Some(VCardDataType::Uri), "http://x"),
                VCardVersion::V3_0,
            )
            .unwrap();
        assert_eq!(agent.value(), Some(&AgentValue::Url("http://x".into())));

        let err = Agent::default()
            .unmarshal_json(
                VCardParameters::new(),
                &TaggedValue::single(Some(VCardDataType::Text), "BEGIN:VCARD\nEND:VCARD"),
                VCardVersion::V3_0,
            )
            .unwrap_err();
        let Signal::EmbeddedDocument(doc) = err else {
            panic!("expected an embedded document");
        };
        assert_eq!(doc.content, "BEGIN:VCARD\nEND:VCARD");
    }

    #[test]
    fn html_href_or_nested_vcard() {
        let mut agent = Agent::default();
        agent
            .unmarshal_html(
                &HCardElement::new("a")
                    .with_attribute("class", "agent")
                    .with_attribute("href", "http://agent")
                    .with_text("Agent"),
            )
            .unwrap();
        assert_eq!(agent.value(), Some(&AgentValue::Url("http://agent".into())));

        let err = Agent::default()
            .unmarshal_html(&HCardElement::new("div").with_attribute("class", "agent vcard"))
            .unwrap_err();
        assert!(matches!(err, Signal::EmbeddedDocument(_)));
    }

    #[test]
    fn not_defined_in_v4() {
        let warnings = Agent::url("http://x").validate(VCardVersion::V4_0, &NoDocument);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::UnsupportedVersion);
    }
}
