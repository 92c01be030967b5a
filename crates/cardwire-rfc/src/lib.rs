//! vCard property framework.
//!
//! Every vCard property type implements a small set of per-format hooks
//! ([`rfc::vcard::Property`]); the framework supplies the public entry points
//! ([`rfc::vcard::PropertyExt`]) that read and write a property in the
//! plain-text, xCard, jCard and hCard encodings and validate it against
//! vCard 2.1, 3.0 and 4.0.

pub mod error;
pub mod rfc;
