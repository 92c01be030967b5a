//! Property validation pipeline.

use super::property::{Document, Property};
use super::version::VCardVersion;
use super::warning::ValidationWarning;

/// Validates a property against a version.
///
/// Runs, without short-circuiting:
/// 1. version support,
/// 2. the parameter container's own checks,
/// 3. the property type's checks.
#[must_use]
pub fn validate_property<P: Property + ?Sized>(
    property: &P,
    version: VCardVersion,
    document: &dyn Document,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let supported = property.supported_versions();
    if !supported.contains(&version) {
        warnings.push(ValidationWarning::unsupported_version(version, supported));
    }

    warnings.extend(property.base().parameters().validate(version));
    warnings.extend(property.validate_value(version, document));

    tracing::debug!(
        type_name = property.base().type_name(),
        %version,
        count = warnings.len(),
        "validated property"
    );

    warnings
}
