//! GENDER (RFC 6350 §6.2.7).

use std::fmt;

use crate::rfc::vcard::build::escape_text;
use crate::rfc::vcard::core::{
    CompatibilityMode, Document, Property, PropertyBase, PropertyResult, Signal, TaggedValue,
    VCardDataType, VCardVersion, ValidationWarning, XCardElement, missing_xml_elements,
};
use crate::rfc::vcard::parse::{split_structured, unescape_text};

/// Type name of the property.
pub const GENDER: &str = "GENDER";

const SEX_ELEMENT: &str = "sex";
const IDENTITY_ELEMENT: &str = "identity";

/// Sex component of the GENDER property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    Other,
    /// Not applicable.
    None,
    Unknown,
}

impl Sex {
    /// Parses from a single-letter code (case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" => Some(Self::Male),
            "F" => Some(Self::Female),
            "O" => Some(Self::Other),
            "N" => Some(Self::None),
            "U" => Some(Self::Unknown),
            _ => Option::None,
        }
    }

    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other => "O",
            Self::None => "N",
            Self::Unknown => "U",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// A person's sex and gender identity. Defined by vCard 4.0 only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gender {
    base: PropertyBase,
    sex: Option<Sex>,
    identity: Option<String>,
}

impl Default for Gender {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Gender {
    #[must_use]
    pub fn new(sex: Option<Sex>) -> Self {
        Self {
            base: PropertyBase::new(GENDER),
            sex,
            identity: None,
        }
    }

    #[must_use]
    pub fn male() -> Self {
        Self::new(Some(Sex::Male))
    }

    #[must_use]
    pub fn female() -> Self {
        Self::new(Some(Sex::Female))
    }

    #[must_use]
    pub fn other() -> Self {
        Self::new(Some(Sex::Other))
    }

    #[must_use]
    pub fn none() -> Self {
        Self::new(Some(Sex::None))
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::new(Some(Sex::Unknown))
    }

    #[must_use]
    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }

    pub fn set_sex(&mut self, sex: Option<Sex>) {
        self.sex = sex;
    }

    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn set_identity(&mut self, identity: Option<String>) {
        self.identity = identity;
    }

    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    #[must_use]
    pub fn is_male(&self) -> bool {
        self.sex == Some(Sex::Male)
    }

    #[must_use]
    pub fn is_female(&self) -> bool {
        self.sex == Some(Sex::Female)
    }

    #[must_use]
    pub fn is_other(&self) -> bool {
        self.sex == Some(Sex::Other)
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.sex == Some(Sex::None)
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.sex == Some(Sex::Unknown)
    }

    /// Returns whether neither component is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sex.is_none() && self.identity.as_deref().is_none_or(str::is_empty)
    }

    /// Sets both components from their unescaped text forms.
    fn set_components(&mut self, sex: &str, identity: Option<&str>) -> PropertyResult<()> {
        let sex = sex.trim();
        self.sex = if sex.is_empty() {
            None
        } else {
            Some(Sex::from_code(sex).ok_or_else(|| {
                Signal::cannot_parse(format!("Unrecognized sex code \"{sex}\"."))
            })?)
        };
        self.identity = identity.filter(|i| !i.is_empty()).map(str::to_owned);
        Ok(())
    }
}

impl Property for Gender {
    fn base(&self) -> &PropertyBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut PropertyBase {
        &mut self.base
    }

    fn supported_versions(&self) -> &'static [VCardVersion] {
        &[VCardVersion::V4_0]
    }

    fn validate_value(
        &self,
        _version: VCardVersion,
        _document: &dyn Document,
    ) -> Vec<ValidationWarning> {
        if self.is_empty() {
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
        let mut value = self.sex.map(Sex::as_code).unwrap_or_default().to_string();
        if let Some(identity) = &self.identity {
            value.push(';');
            value.push_str(&escape_text(identity));
        }
        Ok(value)
    }

    fn write_xml(
        &self,
        element: &mut XCardElement,
        _compat: CompatibilityMode,
    ) -> PropertyResult<()> {
        element.append(SEX_ELEMENT, self.sex.map(Sex::as_code).unwrap_or_default());
        if let Some(identity) = &self.identity {
            element.append(IDENTITY_ELEMENT, identity.as_str());
        }
        Ok(())
    }

    fn write_json(&self, _version: VCardVersion) -> PropertyResult<TaggedValue> {
        let sex = self.sex.map(Sex::as_code).unwrap_or_default().to_string();
        Ok(match &self.identity {
            Some(identity) => TaggedValue::structured(
                Some(VCardDataType::Text),
                vec![vec![sex], vec![identity.clone()]],
            ),
            None => TaggedValue::single(Some(VCardDataType::Text), sex),
        })
    }

    fn read_text(
        &mut self,
        value: &str,
        _version: VCardVersion,
        _compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        let parts = split_structured(value);
        let sex = parts.first().map(|s| unescape_text(s)).unwrap_or_default();
        let identity = parts.get(1).map(|s| unescape_text(s));
        self.set_components(&sex, identity.as_deref())?;
        Ok(Vec::new())
    }

    fn read_xml(
        &mut self,
        element: &XCardElement,
        _compat: CompatibilityMode,
    ) -> PropertyResult<Vec<String>> {
        let sex = element
            .first(&[SEX_ELEMENT])
            .ok_or_else(|| missing_xml_elements(&[SEX_ELEMENT]))?;
        self.set_components(sex, element.first(&[IDENTITY_ELEMENT]))?;
        Ok(Vec::new())
    }

    fn read_json(
        &mut self,
        value: &TaggedValue,
        _version: VCardVersion,
    ) -> PropertyResult<Vec<String>> {
        match value {
            TaggedValue::Single { value, .. } => self.set_components(value, None)?,
            TaggedValue::Multi { values, .. } => {
                let sex = values.first().map(String::as_str).unwrap_or_default();
                self.set_components(sex, values.get(1).map(String::as_str))?;
            }
            TaggedValue::Structured { components, .. } => {
                let first = |i: usize| {
                    components
                        .get(i)
                        .and_then(|c| c.first())
                        .map(String::as_str)
                };
                self.set_components(first(0).unwrap_or_default(), first(1))?;
            }
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::{NoDocument, PropertyExt, WarningKind};

    fn kinds(gender: &Gender, version: VCardVersion) -> Vec<WarningKind> {
        gender
            .validate(version, &NoDocument)
            .into_iter()
            .map(|w| w.kind)
            .collect()
    }

    #[test]
    fn validate_empty_and_male() {
        let empty = Gender::new(None);
        for version in [VCardVersion::V2_1, VCardVersion::V3_0] {
            assert_eq!(
                kinds(&empty, version),
                [WarningKind::UnsupportedVersion, WarningKind::ValueEmpty]
            );
            assert_eq!(kinds(&Gender::male(), version), [WarningKind::UnsupportedVersion]);
        }
        assert_eq!(kinds(&empty, VCardVersion::V4_0), [WarningKind::ValueEmpty]);
        assert!(kinds(&Gender::male(), VCardVersion::V4_0).is_empty());
    }

    #[test]
    fn predicates() {
        let cases = [
            (Gender::male(), [true, false, false, false, false]),
            (Gender::female(), [false, true, false, false, false]),
            (Gender::other(), [false, false, true, false, false]),
            (Gender::none(), [false, false, false, true, false]),
            (Gender::unknown(), [false, false, false, false, true]),
        ];
        for (gender, expected) in cases {
            assert_eq!(
                [
                    gender.is_male(),
                    gender.is_female(),
                    gender.is_other(),
                    gender.is_none(),
                    gender.is_unknown()
                ],
                expected
            );
        }
    }

    #[test]
    fn text_with_identity() {
        let gender = Gender::female().with_identity("she; her");
        assert_eq!(
            gender
                .marshal_text(VCardVersion::V4_0, CompatibilityMode::Rfc)
                .unwrap(),
            "F;she\\; her"
        );

        let mut parsed = Gender::default();
        parsed
            .read_text("f;she\\; her", VCardVersion::V4_0, CompatibilityMode::Rfc)
            .unwrap();
        assert_eq!(parsed.sex(), Some(Sex::Female));
        assert_eq!(parsed.identity(), Some("she; her"));
    }

    #[test]
    fn identity_without_sex() {
        let mut gender = Gender::default();
        gender
            .read_text(";it's complicated", VCardVersion::V4_0, CompatibilityMode::Rfc)
            .unwrap();
        assert_eq!(gender.sex(), None);
        assert_eq!(gender.identity(), Some("it's complicated"));
        assert!(!gender.is_empty());
    }

    #[test]
    fn unrecognized_code_cannot_be_parsed() {
        let mut gender = Gender::default();
        let err = gender
            .read_text("X", VCardVersion::V4_0, CompatibilityMode::Rfc)
            .unwrap_err();
        assert!(matches!(err, Signal::CannotParse(_)));
    }

    #[test]
    fn xml_requires_sex() {
        let mut gender = Gender::default();
        let err = gender
            .read_xml(&XCardElement::new(VCardVersion::V4_0), CompatibilityMode::Rfc)
            .unwrap_err();
        assert_eq!(
            err,
            Signal::cannot_parse("Property value empty (no <sex> element found).")
        );
    }

    #[test]
    fn json_shapes() {
        assert_eq!(
            Gender::male().marshal_json(VCardVersion::V4_0).unwrap(),
            TaggedValue::single(Some(VCardDataType::Text), "M")
        );

        let mut gender = Gender::default();
        gender
            .read_json(
                &TaggedValue::structured(None, vec![vec!["O".into()], vec!["a,b".into()]]),
                VCardVersion::V4_0,
            )
            .unwrap();
        assert!(gender.is_other());
        assert_eq!(gender.identity(), Some("a,b"));
    }
}
