/// Application name, used as the environment variable prefix and config file stem.
pub const APP_NAME: &str = "cardwire";

pub const CONFIG_FILE_NAME: &str = const_str::concat!(APP_NAME, ".toml");

/// xCard namespace (RFC 6351).
pub const XCARD_NS: &str = "urn:ietf:params:xml:ns:vcard-4.0";

/// Local name of the xCard element that holds a property's parameters.
pub const XCARD_PARAMETERS: &str = "parameters";

/// Value element used for properties with no dedicated xCard vocabulary.
pub const XCARD_UNKNOWN: &str = "unknown";

/// Default maximum content-line length in octets (RFC 6350 §3.2).
pub const DEFAULT_FOLD_WIDTH: usize = 75;
