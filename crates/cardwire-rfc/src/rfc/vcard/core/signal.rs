//! Non-success outcomes of per-format property operations.

use std::fmt;

use thiserror::Error;

use super::version::VCardVersion;

/// Result type for per-format property operations.
pub type PropertyResult<T> = Result<T, Signal>;

/// A wire encoding of a vCard property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// Line-oriented plain text (RFC 6350 §3).
    Text,
    /// xCard (RFC 6351).
    Xml,
    /// jCard (RFC 7095).
    Json,
    /// hCard microformat.
    Html,
}

impl WireFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Xml => "xCard",
            Self::Json => "jCard",
            Self::Html => "hCard",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property value that is itself a complete vCard.
///
/// The framework never parses or writes the nested card; the caller re-enters
/// the framework for it and hands the result back to the property.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbeddedDocument {
    /// Serialized nested card. Empty when the nested card follows the
    /// property inline (vCard 2.1 `AGENT`).
    pub content: String,
    /// Version of the enclosing document, if known.
    pub version: Option<VCardVersion>,
}

impl EmbeddedDocument {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            version: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: VCardVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Returns whether the nested card follows inline instead of being
    /// carried in the value.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.content.is_empty()
    }
}

/// What a per-format operation produced instead of a normal return.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Signal {
    /// Discard this property instance silently. Not an error.
    #[error("property skipped: {0}")]
    Skip(String),

    /// The raw value is malformed. Record the reason and discard the
    /// property, but keep processing the rest of the document.
    #[error("cannot parse property value: {0}")]
    CannotParse(String),

    /// The value is a nested vCard the caller must process recursively.
    #[error("property value is an embedded vCard")]
    EmbeddedDocument(EmbeddedDocument),

    /// The property type does not implement this wire format at all.
    ///
    /// This is a gap in the property type, not a data problem, and must not
    /// be swallowed by generic document processing.
    #[error("{type_name} does not support {format} {direction}")]
    Unsupported {
        type_name: String,
        format: WireFormat,
        direction: &'static str,
    },
}

impl Signal {
    #[must_use]
    pub fn skip(reason: impl Into<String>) -> Self {
        Self::Skip(reason.into())
    }

    #[must_use]
    pub fn cannot_parse(reason: impl Into<String>) -> Self {
        Self::CannotParse(reason.into())
    }

    #[must_use]
    pub fn embedded(document: EmbeddedDocument) -> Self {
        Self::EmbeddedDocument(document)
    }

    /// A property type does not read the given format.
    #[must_use]
    pub fn unsupported_read(type_name: impl Into<String>, format: WireFormat) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
            format,
            direction: "parsing",
        }
    }

    /// A property type does not write the given format.
    #[must_use]
    pub fn unsupported_write(type_name: impl Into<String>, format: WireFormat) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
            format,
            direction: "writing",
        }
    }

    /// Returns whether generic document processing may handle this signal
    /// and continue with the next property.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }
}
