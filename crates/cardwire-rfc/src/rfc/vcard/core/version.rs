//! vCard protocol versions and compatibility modes.

use std::fmt;
use std::str::FromStr;

use cardwire_core::constants::XCARD_NS;
use cardwire_core::error::CoreError;

/// vCard protocol version, ordered oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (versit consortium).
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3_0,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4_0,
}

impl VCardVersion {
    /// All known versions, oldest first.
    pub const ALL: [Self; 3] = [Self::V2_1, Self::V3_0, Self::V4_0];

    /// The version whose text grammar hCard values are interpreted with.
    pub const HTML: Self = Self::V3_0;

    /// Parses from version string.
    #[must_use]
    pub fn find(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V2_1),
            "3.0" => Some(Self::V3_0),
            "4.0" => Some(Self::V4_0),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2_1 => "2.1",
            Self::V3_0 => "3.0",
            Self::V4_0 => "4.0",
        }
    }

    /// Returns the xCard namespace, which only exists for vCard 4.0.
    #[must_use]
    pub const fn xml_namespace(self) -> Option<&'static str> {
        match self {
            Self::V4_0 => Some(XCARD_NS),
            Self::V2_1 | Self::V3_0 => None,
        }
    }
}

impl fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VCardVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::find(s).ok_or_else(|| CoreError::InvalidInput(format!("unknown vCard version: {s}")))
    }
}

/// Biases marshalling toward strict RFC output or toward the deviations a
/// particular consumer is known to expect.
///
/// Passed through unchanged to every property hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompatibilityMode {
    /// Follow the specifications strictly.
    #[default]
    Rfc,
    /// Microsoft Outlook.
    MsOutlook,
    /// Apple Address Book.
    MacAddressBook,
    /// Google Contacts.
    Gmail,
    /// iPhone contacts.
    IPhone,
    /// GNOME Evolution.
    Evolution,
}

impl CompatibilityMode {
    /// All known modes.
    pub const ALL: [Self; 6] = [
        Self::Rfc,
        Self::MsOutlook,
        Self::MacAddressBook,
        Self::Gmail,
        Self::IPhone,
        Self::Evolution,
    ];

    /// Returns the configuration name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rfc => "rfc",
            Self::MsOutlook => "outlook",
            Self::MacAddressBook => "mac-address-book",
            Self::Gmail => "gmail",
            Self::IPhone => "iphone",
            Self::Evolution => "evolution",
        }
    }

    /// Parses a mode name (case-insensitive).
    #[must_use]
    pub fn find(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for CompatibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompatibilityMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::find(s)
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown compatibility mode: {s}")))
    }
}
