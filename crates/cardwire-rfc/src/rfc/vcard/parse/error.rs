//! Wire fragment parse errors.

use std::fmt;

/// Result type for wire fragment parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while reading a property's wire fragment.
///
/// These are structural errors in the fragment itself (a content line with
/// no colon, malformed XML); problems with a property's value are reported
/// by the property as a [`Signal`](crate::rfc::vcard::Signal) instead.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Additional context or message.
    pub message: String,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::XmlError, message)
    }

    #[must_use]
    pub fn json(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::JsonError, message)
    }

    #[must_use]
    pub fn html(message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::HtmlError, message)
    }

    /// Creates a missing element error.
    #[must_use]
    pub fn missing_element(name: &str) -> Self {
        Self::new(
            ParseErrorKind::MissingElement,
            format!("missing required element: {name}"),
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        Self::xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::xml(err.to_string())
    }
}

impl From<quick_xml::encoding::EncodingError> for ParseError {
    fn from(err: quick_xml::encoding::EncodingError) -> Self {
        Self::new(ParseErrorKind::EncodingError, err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for ParseError {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Self::xml(err.to_string())
    }
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::new(ParseErrorKind::EncodingError, err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::json(err.to_string())
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Invalid property name.
    InvalidPropertyName,
    /// Invalid parameter.
    InvalidParameter,
    /// XML parsing error.
    XmlError,
    /// JSON parsing error, or JSON that is not a jCard property.
    JsonError,
    /// Malformed HTML fragment.
    HtmlError,
    /// Missing required element.
    MissingElement,
    /// Encoding error.
    EncodingError,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::XmlError => write!(f, "XML error"),
            Self::JsonError => write!(f, "JSON error"),
            Self::HtmlError => write!(f, "HTML error"),
            Self::MissingElement => write!(f, "missing element"),
            Self::EncodingError => write!(f, "encoding error"),
        }
    }
}
