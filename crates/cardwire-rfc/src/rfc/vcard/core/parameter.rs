//! A single vCard parameter.

/// A vCard parameter.
///
/// Parameters can have multiple values (e.g., TYPE=home,work).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values in order of appearance.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Returns whether this parameter is named `name` (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Well-known parameter names.
pub mod names {
    pub const ALTID: &str = "ALTID";
    pub const CALSCALE: &str = "CALSCALE";
    pub const CHARSET: &str = "CHARSET";
    pub const ENCODING: &str = "ENCODING";
    pub const GEO: &str = "GEO";
    pub const INDEX: &str = "INDEX";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const LEVEL: &str = "LEVEL";
    pub const MEDIATYPE: &str = "MEDIATYPE";
    pub const PID: &str = "PID";
    pub const PREF: &str = "PREF";
    pub const SORT_AS: &str = "SORT-AS";
    pub const TYPE: &str = "TYPE";
    pub const TZ: &str = "TZ";
    pub const VALUE: &str = "VALUE";

    /// Parameters introduced by vCard 4.0.
    pub const V4_ONLY: [&str; 10] = [
        ALTID, CALSCALE, GEO, INDEX, LEVEL, MEDIATYPE, PID, PREF, SORT_AS, TZ,
    ];
}
