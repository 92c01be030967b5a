//! Content line writer.

use super::escape::escape_param_value;
use super::fold::fold_line;
use crate::rfc::vcard::core::{
    CompatibilityMode, Document, PropertyExt, PropertyResult, VCardParameter, VCardParameters,
    VCardVersion, parameter_names,
};

/// Writes one property as a content line (`[group.]NAME[;PARAM=v]*:value`).
///
/// Parameters come from [`PropertyExt::marshal_parameters`], so the
/// property's own parameters are left as they are. The line is folded when
/// `fold_width` is given and has no trailing line break.
///
/// ## Errors
/// Whatever the property's text hook signals.
pub fn write_content_line<P: PropertyExt + ?Sized>(
    property: &P,
    version: VCardVersion,
    compat: CompatibilityMode,
    document: &dyn Document,
    fold_width: Option<usize>,
) -> PropertyResult<String> {
    let value = property.marshal_text(version, compat)?;
    let parameters = property.marshal_parameters(version, compat, document);

    let mut line = String::new();

    if let Some(group) = property.group() {
        line.push_str(group);
        line.push('.');
    }
    line.push_str(property.type_name());
    write_parameters(&parameters, version, &mut line);
    line.push(':');
    line.push_str(&value);

    Ok(match fold_width {
        Some(width) => fold_line(&line, width),
        None => line,
    })
}

/// Appends `;NAME=value` for every parameter.
///
/// vCard 2.1 writes `TYPE` values as bare parameters (`;HOME;WORK`).
pub fn write_parameters(parameters: &VCardParameters, version: VCardVersion, output: &mut String) {
    for param in parameters {
        if version == VCardVersion::V2_1 && param.is_named(parameter_names::TYPE) {
            for value in &param.values {
                output.push(';');
                output.push_str(&escape_param_value(value, version));
            }
            continue;
        }
        write_parameter(param, version, output);
    }
}

fn write_parameter(param: &VCardParameter, version: VCardVersion, output: &mut String) {
    output.push(';');
    output.push_str(&param.name);
    output.push('=');

    for (i, value) in param.values.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push_str(&escape_param_value(value, version));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_in_order() {
        let mut params = VCardParameters::new();
        params.put("TYPE", "home");
        params.put("TYPE", "work");
        params.put("LANGUAGE", "en");

        let mut out = String::new();
        write_parameters(&params, VCardVersion::V4_0, &mut out);
        assert_eq!(out, ";TYPE=home,work;LANGUAGE=en");
    }

    #[test]
    fn v21_bare_type_parameters() {
        let mut params = VCardParameters::new();
        params.put("TYPE", "HOME");
        params.put("TYPE", "WORK");
        params.put("CHARSET", "UTF-8");

        let mut out = String::new();
        write_parameters(&params, VCardVersion::V2_1, &mut out);
        assert_eq!(out, ";HOME;WORK;CHARSET=UTF-8");
    }

    #[test]
    fn quoted_parameter_values() {
        let mut params = VCardParameters::new();
        params.put("SORT-AS", "Doe,Jane");

        let mut out = String::new();
        write_parameters(&params, VCardVersion::V4_0, &mut out);
        assert_eq!(out, ";SORT-AS=\"Doe,Jane\"");
    }
}
