//! Parameter container (vCard "sub types").
//!
//! An ordered, case-insensitive multimap of parameter name to values. Names
//! are stored upper-cased; the order in which names first appear and the
//! order of values under each name are preserved.

use std::fmt;
use std::str::FromStr;

use super::data_type::VCardDataType;
use super::parameter::{VCardParameter, names};
use super::version::VCardVersion;
use super::warning::ValidationWarning;

/// A `PID` parameter value: a local id, optionally qualified by the id of a
/// `CLIENTPIDMAP` source (`local[.source]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pid {
    pub local_id: u32,
    pub source: Option<u32>,
}

impl Pid {
    #[must_use]
    pub const fn new(local_id: u32, source: Option<u32>) -> Self {
        Self { local_id, source }
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Some(source) => write!(f, "{}.{source}", self.local_id),
            None => write!(f, "{}", self.local_id),
        }
    }
}

impl FromStr for Pid {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (local, source) = match s.split_once('.') {
            Some((local, source)) => (local, Some(source.parse()?)),
            None => (s, None),
        };
        Ok(Self {
            local_id: local.parse()?,
            source,
        })
    }
}

/// The parameters of one property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardParameters {
    params: Vec<VCardParameter>,
}

impl VCardParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, name: &str) -> Option<&VCardParameter> {
        self.params.iter().find(|p| p.is_named(name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut VCardParameter> {
        self.params.iter_mut().find(|p| p.is_named(name))
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(VCardParameter::value)
    }

    /// Returns all values of a parameter (empty if absent).
    #[must_use]
    pub fn get(&self, name: &str) -> &[String] {
        self.find(name)
            .map(|p| p.values.as_slice())
            .unwrap_or_default()
    }

    /// Returns whether the parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Appends a value to a parameter.
    pub fn put(&mut self, name: &str, value: impl Into<String>) {
        match self.find_mut(name) {
            Some(param) => param.values.push(value.into()),
            None => self.params.push(VCardParameter::new(name, value)),
        }
    }

    /// Appends several values to a parameter.
    pub fn put_all<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.put(name, value);
        }
    }

    /// Replaces all values of a parameter with a single value.
    ///
    /// The parameter keeps its position if it was already present.
    pub fn replace(&mut self, name: &str, value: impl Into<String>) {
        match self.find_mut(name) {
            Some(param) => param.values = vec![value.into()],
            None => self.params.push(VCardParameter::new(name, value)),
        }
    }

    /// Removes one value from a parameter. Returns whether it was present.
    pub fn remove(&mut self, name: &str, value: &str) -> bool {
        let Some(param) = self.find_mut(name) else {
            return false;
        };
        let Some(pos) = param.values.iter().position(|v| v == value) else {
            return false;
        };
        param.values.remove(pos);
        if param.values.is_empty() {
            self.params.retain(|p| !p.is_named(name));
        }
        true
    }

    /// Removes a parameter, returning its values.
    pub fn remove_all(&mut self, name: &str) -> Vec<String> {
        match self.params.iter().position(|p| p.is_named(name)) {
            Some(pos) => self.params.remove(pos).values,
            None => Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Parameter names in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VCardParameter> {
        self.params.iter()
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn set_optional(&mut self, name: &str, value: Option<String>) {
        match value {
            Some(value) => self.replace(name, value),
            None => {
                self.remove_all(name);
            }
        }
    }

    // --- Public typed accessors ---

    /// Returns the value-type hint (`VALUE`).
    #[must_use]
    pub fn value_type(&self) -> Option<VCardDataType> {
        self.first(names::VALUE).map(VCardDataType::get)
    }

    pub fn set_value_type(&mut self, data_type: Option<&VCardDataType>) {
        self.set_optional(names::VALUE, data_type.map(ToString::to_string));
    }

    /// Returns the `TYPE` values.
    #[must_use]
    pub fn types(&self) -> &[String] {
        self.get(names::TYPE)
    }

    pub fn add_type(&mut self, value: impl Into<String>) {
        self.put(names::TYPE, value);
    }

    #[must_use]
    pub fn encoding(&self) -> Option<&str> {
        self.first(names::ENCODING)
    }

    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.first(names::CHARSET)
    }

    pub fn set_charset(&mut self, charset: Option<&str>) {
        self.set_optional(names::CHARSET, charset.map(str::to_owned));
    }

    #[must_use]
    pub fn alt_id(&self) -> Option<&str> {
        self.first(names::ALTID)
    }

    pub fn set_alt_id(&mut self, alt_id: Option<&str>) {
        self.set_optional(names::ALTID, alt_id.map(str::to_owned));
    }

    // --- Cross-cutting accessors, used by the property contract ---

    /// Preference rank (`PREF`); lower is more preferred. Unparseable values
    /// are treated as absent.
    pub(crate) fn pref(&self) -> Option<u32> {
        self.first(names::PREF).and_then(|v| v.trim().parse().ok())
    }

    pub(crate) fn set_pref(&mut self, pref: Option<u32>) {
        self.set_optional(names::PREF, pref.map(|p| p.to_string()));
    }

    pub(crate) fn language(&self) -> Option<&str> {
        self.first(names::LANGUAGE)
    }

    pub(crate) fn set_language(&mut self, language: Option<&str>) {
        self.set_optional(names::LANGUAGE, language.map(str::to_owned));
    }

    /// Sort position (`INDEX`) among properties of the same type.
    pub(crate) fn index(&self) -> Option<u32> {
        self.first(names::INDEX).and_then(|v| v.trim().parse().ok())
    }

    pub(crate) fn set_index(&mut self, index: Option<u32>) {
        self.set_optional(names::INDEX, index.map(|i| i.to_string()));
    }

    /// Per-source identifiers (`PID`); malformed entries are skipped.
    pub(crate) fn pids(&self) -> Vec<Pid> {
        self.get(names::PID)
            .iter()
            .filter_map(|v| v.trim().parse().ok())
            .collect()
    }

    pub(crate) fn add_pid(&mut self, pid: Pid) {
        self.put(names::PID, pid.to_string());
    }

    pub(crate) fn remove_pids(&mut self) {
        self.remove_all(names::PID);
    }

    // --- Validation ---

    /// Checks the parameters against a version.
    ///
    /// Warnings are returned in parameter order.
    #[must_use]
    pub fn validate(&self, version: VCardVersion) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        for param in &self.params {
            validate_parameter(param, version, &mut warnings);
        }
        warnings
    }
}

impl<'a> IntoIterator for &'a VCardParameters {
    type Item = &'a VCardParameter;
    type IntoIter = std::slice::Iter<'a, VCardParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

fn validate_parameter(
    param: &VCardParameter,
    version: VCardVersion,
    warnings: &mut Vec<ValidationWarning>,
) {
    let name = param.name.as_str();

    if version != VCardVersion::V4_0 && names::V4_ONLY.contains(&name) {
        warnings.push(ValidationWarning::parameter(format!(
            "{name} parameter is not supported by version {version}."
        )));
    }

    match name {
        names::CHARSET if version != VCardVersion::V2_1 => {
            warnings.push(ValidationWarning::parameter(format!(
                "{name} parameter is not supported by version {version}."
            )));
        }
        names::ENCODING => {
            for value in &param.values {
                if !encoding_allowed(value, version) {
                    warnings.push(ValidationWarning::parameter(format!(
                        "{name} value \"{value}\" is not supported by version {version}."
                    )));
                }
            }
        }
        names::VALUE => {
            for value in &param.values {
                match VCardDataType::find(value) {
                    None if !is_extension(value) => {
                        warnings.push(ValidationWarning::parameter(format!(
                            "{name} parameter has a non-standard value: {value}"
                        )));
                    }
                    Some(data_type) if !data_type.is_supported(version) => {
                        warnings.push(ValidationWarning::parameter(format!(
                            "{name} value \"{value}\" is not supported by version {version}."
                        )));
                    }
                    _ => {}
                }
            }
        }
        names::PREF => {
            for value in &param.values {
                match value.trim().parse::<u32>() {
                    Ok(pref) if version == VCardVersion::V4_0 && !(1..=100).contains(&pref) => {
                        warnings.push(ValidationWarning::parameter(format!(
                            "{name} value must be between 1 and 100: {value}"
                        )));
                    }
                    Ok(_) => {}
                    Err(_) => warnings.push(ValidationWarning::parameter(format!(
                        "{name} value is not an integer: {value}"
                    ))),
                }
            }
        }
        names::INDEX => {
            for value in &param.values {
                if !value.trim().parse::<u32>().is_ok_and(|i| i > 0) {
                    warnings.push(ValidationWarning::parameter(format!(
                        "{name} value is not a positive integer: {value}"
                    )));
                }
            }
        }
        names::PID => {
            for value in &param.values {
                if value.trim().parse::<Pid>().is_err() {
                    warnings.push(ValidationWarning::parameter(format!(
                        "{name} value is malformed: {value}"
                    )));
                }
            }
        }
        _ => {}
    }
}

fn is_extension(value: &str) -> bool {
    value.len() > 2 && value.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("x-"))
}

fn encoding_allowed(value: &str, version: VCardVersion) -> bool {
    let allowed: &[&str] = match version {
        VCardVersion::V2_1 => &["7bit", "8bit", "quoted-printable", "base64"],
        VCardVersion::V3_0 => &["b"],
        VCardVersion::V4_0 => &[],
    };
    allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
}
