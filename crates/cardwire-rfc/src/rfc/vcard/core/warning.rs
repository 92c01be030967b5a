//! Validation warnings.

use std::fmt;

use super::version::VCardVersion;

/// Category of a validation warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// The property type is not defined by the requested version.
    UnsupportedVersion,
    /// A parameter is malformed or not allowed by the requested version.
    ParameterInvalid,
    /// The property has no value.
    ValueEmpty,
    /// A problem specific to the property type.
    TypeSpecific,
}

/// A human-readable validation warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl ValidationWarning {
    #[must_use]
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Warning for a property used under a version that does not define it.
    #[must_use]
    pub fn unsupported_version(version: VCardVersion, supported: &[VCardVersion]) -> Self {
        let supported = supported
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(
            WarningKind::UnsupportedVersion,
            format!(
                "Property is not supported by version {version}.  Supported versions are: [{supported}]"
            ),
        )
    }

    #[must_use]
    pub fn parameter(message: impl Into<String>) -> Self {
        Self::new(WarningKind::ParameterInvalid, message)
    }

    /// Warning for a property that has no value.
    #[must_use]
    pub fn value_empty() -> Self {
        Self::new(WarningKind::ValueEmpty, "Property has no value.")
    }

    #[must_use]
    pub fn type_specific(message: impl Into<String>) -> Self {
        Self::new(WarningKind::TypeSpecific, message)
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
