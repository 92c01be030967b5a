//! Maps property type names to constructors.

use std::collections::HashMap;
use std::fmt;

use super::agent::{AGENT, Agent};
use super::categories::{CATEGORIES, Categories};
use super::gender::{GENDER, Gender};
use super::raw::RawProperty;
use super::text::{TEXT_TYPES, TextProperty};
use crate::rfc::vcard::core::{Property, QualifiedName};

/// Creates an empty property for a type name.
pub type PropertyConstructor = fn(&str) -> Box<dyn Property>;

/// Registry of the property types a reader knows how to build.
///
/// Names are case-insensitive. Unregistered names produce a
/// [`RawProperty`].
#[derive(Clone, Default)]
pub struct PropertyRegistry {
    constructors: HashMap<String, PropertyConstructor>,
}

impl PropertyRegistry {
    /// Creates a registry with no types; every name maps to
    /// [`RawProperty`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in types.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(GENDER, |_| Box::new(Gender::default()));
        registry.register(CATEGORIES, |_| Box::new(Categories::default()));
        registry.register(AGENT, |_| Box::new(Agent::default()));
        for name in TEXT_TYPES {
            registry.register(name, |name| Box::new(TextProperty::new(name)));
        }
        registry
    }

    /// Registers (or replaces) the constructor for a type name.
    pub fn register(&mut self, type_name: &str, constructor: PropertyConstructor) {
        self.constructors
            .insert(type_name.to_ascii_uppercase(), constructor);
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors
            .contains_key(&type_name.to_ascii_uppercase())
    }

    /// Creates an empty property for a type name.
    #[must_use]
    pub fn create(&self, type_name: &str) -> Box<dyn Property> {
        let upper = type_name.to_ascii_uppercase();
        match self.constructors.get(&upper) {
            Some(constructor) => constructor(&upper),
            None => Box::new(RawProperty::new(&upper)),
        }
    }

    /// Creates an empty property for an xCard element name. Elements outside
    /// the xCard namespace are never registered types.
    #[must_use]
    pub fn create_for_xml(&self, name: &QualifiedName) -> Box<dyn Property> {
        if name.is_xcard() {
            self.create(name.local_name())
        } else {
            Box::new(RawProperty::with_xml_name(name.clone()))
        }
    }
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("PropertyRegistry")
            .field("types", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::{PropertyExt, VCardVersion};

    #[test]
    fn standard_types_are_case_insensitive() {
        let registry = PropertyRegistry::standard();
        assert!(registry.contains("gender"));
        assert!(registry.contains("Fn"));

        let property = registry.create("note");
        assert_eq!(property.type_name(), "NOTE");
        assert!(property.is_supported(VCardVersion::V2_1));

        let gender = registry.create("GENDER");
        assert!(!gender.is_supported(VCardVersion::V3_0));
    }

    #[test]
    fn unknown_names_fall_back_to_raw() {
        let registry = PropertyRegistry::standard();
        assert!(!registry.contains("X-FOO"));
        let property = registry.create("x-foo");
        assert_eq!(property.type_name(), "X-FOO");
    }

    #[test]
    fn foreign_xml_names_are_raw() {
        let registry = PropertyRegistry::standard();
        let property = registry.create_for_xml(&QualifiedName::new("urn:example", "gender"));
        assert_eq!(property.xml_name().namespace_uri(), "urn:example");

        let gender = registry.create_for_xml(&QualifiedName::xcard("gender"));
        assert!(!gender.is_supported(VCardVersion::V2_1));
    }

    #[test]
    fn register_replaces() {
        let mut registry = PropertyRegistry::new();
        registry.register("x-note", |name| Box::new(TextProperty::new(name)));
        assert!(registry.contains("X-NOTE"));
        assert_eq!(registry.create("x-note").type_name(), "X-NOTE");
    }
}
