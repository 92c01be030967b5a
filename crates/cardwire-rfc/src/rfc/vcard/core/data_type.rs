//! vCard value data types (the `VALUE` parameter).

use std::fmt;

use super::version::VCardVersion;

/// Data type of a property value.
///
/// Standard types carry the versions that define them; any other name is
/// preserved as [`VCardDataType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VCardDataType {
    Text,
    /// `uri` (3.0 and 4.0).
    Uri,
    /// `url` (2.1 only).
    Url,
    /// `content-id` (2.1 only).
    ContentId,
    /// `binary` (3.0 only).
    Binary,
    Date,
    Time,
    DateTime,
    DateAndOrTime,
    Timestamp,
    Boolean,
    Integer,
    Float,
    UtcOffset,
    LanguageTag,
    /// Extension or unrecognized type name (lower-cased).
    Other(String),
}

const STANDARD: [VCardDataType; 15] = [
    VCardDataType::Text,
    VCardDataType::Uri,
    VCardDataType::Url,
    VCardDataType::ContentId,
    VCardDataType::Binary,
    VCardDataType::Date,
    VCardDataType::Time,
    VCardDataType::DateTime,
    VCardDataType::DateAndOrTime,
    VCardDataType::Timestamp,
    VCardDataType::Boolean,
    VCardDataType::Integer,
    VCardDataType::Float,
    VCardDataType::UtcOffset,
    VCardDataType::LanguageTag,
];

impl VCardDataType {
    /// Returns the type name as used in the `VALUE` parameter and jCard.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Uri => "uri",
            Self::Url => "url",
            Self::ContentId => "content-id",
            Self::Binary => "binary",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date-time",
            Self::DateAndOrTime => "date-and-or-time",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::UtcOffset => "utc-offset",
            Self::LanguageTag => "language-tag",
            Self::Other(name) => name,
        }
    }

    /// Looks up a standard data type by name (case-insensitive).
    #[must_use]
    pub fn find(name: &str) -> Option<Self> {
        STANDARD
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Looks up a data type by name, falling back to [`VCardDataType::Other`].
    #[must_use]
    pub fn get(name: &str) -> Self {
        Self::find(name).unwrap_or_else(|| Self::Other(name.to_ascii_lowercase()))
    }

    /// Returns whether this is one of the standard types.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Returns the versions that define this data type.
    ///
    /// Extension types are accepted by every version.
    #[must_use]
    pub fn supported_versions(&self) -> &'static [VCardVersion] {
        use VCardVersion::{V2_1, V3_0, V4_0};

        match self {
            Self::Url | Self::ContentId => &[V2_1],
            Self::Binary => &[V3_0],
            Self::Uri | Self::Boolean | Self::Integer | Self::Float | Self::UtcOffset => {
                &[V3_0, V4_0]
            }
            Self::DateAndOrTime | Self::Timestamp | Self::LanguageTag => &[V4_0],
            Self::Text | Self::Date | Self::Time | Self::DateTime | Self::Other(_) => {
                &VCardVersion::ALL
            }
        }
    }

    /// Returns whether the data type exists in the given version.
    #[must_use]
    pub fn is_supported(&self, version: VCardVersion) -> bool {
        self.supported_versions().contains(&version)
    }
}

impl fmt::Display for VCardDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
