//! vCard property readers.
//!
//! These split one property's wire fragment into the pieces the property
//! contract consumes: a content line into name, group, parameters and raw
//! value; an xCard element into its name, parameters and value children; a
//! jCard array into name, parameters and [`TaggedValue`]; an HTML fragment
//! into an [`HCardElement`].
//!
//! ## Usage
//!
//! ```rust
//! use cardwire_rfc::rfc::vcard::parse;
//!
//! let line = parse::parse_content_line("item1.NOTE;LANGUAGE=en:Hello\\, world").unwrap();
//! assert_eq!(line.group.as_deref(), Some("item1"));
//! assert_eq!(line.parameters.first("language"), Some("en"));
//! assert_eq!(parse::unescape_text(&line.value), "Hello, world");
//! ```
//!
//! [`TaggedValue`]: crate::rfc::vcard::TaggedValue
//! [`HCardElement`]: crate::rfc::vcard::HCardElement

mod error;
mod hcard;
mod jcard;
mod lexer;
mod values;
mod xcard;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use hcard::parse_html_element;
pub use jcard::{JCardProperty, parse_property_array, property_from_value};
pub use lexer::{ContentLine, parse_content_line, unfold};
pub use values::{split_component, split_structured, unescape_text};
pub use xcard::{XCardProperty, parse_property_element};
