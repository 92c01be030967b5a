use thiserror::Error;

use crate::rfc::vcard::Signal;
use crate::rfc::vcard::parse::ParseError;

/// RFC parsing and serialization errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Serialization error: {0}")]
    SerializeError(String),

    #[error("I/O error while writing: {0}")]
    Io(#[from] std::io::Error),

    /// A property type was asked for a wire format it does not implement.
    ///
    /// Only [`Signal::Unsupported`] is carried here; the recoverable signals
    /// are folded into read/write outcomes instead.
    #[error(transparent)]
    Unsupported(Signal),

    #[error(transparent)]
    CoreError(#[from] cardwire_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
