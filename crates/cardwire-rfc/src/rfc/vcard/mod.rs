//! vCard property framework (RFC 2426, RFC 6350, RFC 6351, RFC 7095).
//!
//! A vCard property can travel in four encodings of the same logical
//! document: the line-oriented text format, xCard (XML), jCard (JSON) and
//! hCard (HTML microformat). Each concrete property type implements only the
//! per-format hooks of [`Property`]; the entry points of [`PropertyExt`]
//! install parameters, copy parameters before they are written, and compose
//! validation in the same way for every type.
//!
//! ## Usage
//!
//! ### Reading
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::{
//!     CompatibilityMode, PropertyExt, PropertyRegistry, ReadOutcome, VCardVersion,
//!     read_text_property,
//! };
//!
//! let registry = PropertyRegistry::standard();
//! let outcome = read_text_property(
//!     "GENDER:F",
//!     VCardVersion::V4_0,
//!     CompatibilityMode::Rfc,
//!     &registry,
//! )
//! .unwrap();
//!
//! let ReadOutcome::Property { property, .. } = outcome else {
//!     panic!("expected a property");
//! };
//! assert_eq!(property.type_name(), "GENDER");
//! ```
//!
//! ### Writing
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::{
//!     CompatibilityMode, Gender, NoDocument, PropertyExt, VCardVersion,
//! };
//!
//! let gender = Gender::male();
//! let text = gender
//!     .marshal_text(VCardVersion::V4_0, CompatibilityMode::Rfc)
//!     .unwrap();
//! assert_eq!(text, "M");
//! assert!(gender.validate(VCardVersion::V4_0, &NoDocument).is_empty());
//! ```
//!
//! ## Signals
//!
//! Per-format operations return [`PropertyResult`]. Besides success they may
//! produce a [`Signal`]: skip the property, the value cannot be parsed, the
//! value is an embedded vCard, or the format is unsupported by the type.
//!
//! ## Submodules
//!
//! - [`core`] - Versions, data types, parameters, tagged values, signals,
//!   element wrappers and the property contract
//! - [`types`] - Concrete property types and the type registry
//! - [`parse`] - Wire-fragment readers (content line, xCard, jCard, hCard)
//! - [`build`] - Wire-fragment writers (escaping, folding, content line,
//!   xCard, jCard)
//! - [`io`] - Per-property read/write helpers that resolve signals

pub mod build;
pub mod core;
pub mod io;
pub mod parse;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use self::core::{
    CompatibilityMode, Document, EmbeddedDocument, HCardElement, NoDocument, Pid, Property,
    PropertyBase, PropertyExt, PropertyResult, QualifiedName, Signal, TaggedValue,
    VCardDataType, VCardParameter, VCardParameters, VCardVersion, ValidationWarning,
    WarningKind, WireFormat, XCardElement,
};
pub use self::io::{
    ReadOutcome, WriteOutcome, read_html_property, read_json_property, read_text_property,
    read_xml_property, write_json_property, write_text_property, write_xml_property,
};
pub use types::{Agent, Categories, Gender, PropertyRegistry, RawProperty, Sex, TextProperty};
