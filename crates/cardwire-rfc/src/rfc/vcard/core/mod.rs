//! vCard core types.
//!
//! This module provides the foundational pieces every property type is built
//! from:
//!
//! - [`VCardVersion`] / [`CompatibilityMode`] - Protocol versions and
//!   consumer quirk modes
//! - [`VCardDataType`] - Value data types (the `VALUE` parameter)
//! - [`VCardParameters`] - Case-insensitive, ordered parameter container
//! - [`TaggedValue`] - Format-neutral jCard value shape
//! - [`Signal`] - Non-success outcomes of a per-format operation
//! - [`XCardElement`] / [`HCardElement`] - Wrappers over one XML or HTML
//!   element
//! - [`Property`] / [`PropertyExt`] - The property contract
//!
//! ## Example
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::core::{VCardParameters, VCardVersion};
//!
//! let mut params = VCardParameters::new();
//! params.put("type", "home");
//! params.put("TYPE", "work");
//!
//! assert_eq!(params.get("Type"), ["home", "work"]);
//! assert!(params.validate(VCardVersion::V4_0).is_empty());
//! ```

mod data_type;
mod element;
mod parameter;
mod parameters;
mod property;
mod signal;
mod tagged;
mod validation;
mod version;
mod warning;

pub use data_type::VCardDataType;
pub use element::{HCardElement, HtmlNode, XCardElement, XCardValue};
pub use parameter::{VCardParameter, names as parameter_names};
pub use parameters::{Pid, VCardParameters};
pub use property::{
    Document, NoDocument, Property, PropertyBase, PropertyExt, QualifiedName,
    missing_xml_elements, missing_xml_values,
};
pub use signal::{EmbeddedDocument, PropertyResult, Signal, WireFormat};
pub use tagged::TaggedValue;
pub use validation::validate_property;
pub use version::{CompatibilityMode, VCardVersion};
pub use warning::{ValidationWarning, WarningKind};
