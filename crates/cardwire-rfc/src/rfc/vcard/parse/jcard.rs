//! jCard (RFC 7095) property array parsing.

use serde_json::Value;

use super::error::{ParseError, ParseResult};
use crate::rfc::vcard::core::{TaggedValue, VCardParameters};

/// One jCard property array, split into the pieces a property reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JCardProperty {
    /// Property name, upper-cased.
    pub name: String,
    pub group: Option<String>,
    pub parameters: VCardParameters,
    pub value: TaggedValue,
}

/// Parses a jCard property array from JSON text.
///
/// ## Errors
/// Returns an error if the text is not JSON or not a property array.
pub fn parse_property_array(json: &str) -> ParseResult<JCardProperty> {
    let value: Value = serde_json::from_str(json)?;
    property_from_value(&value)
}

/// Reads a jCard property array: `[name, {params}, type, value...]`.
///
/// The `group` parameter becomes the property group. Parameter values may
/// be strings, numbers, or arrays of either.
///
/// ## Errors
/// Returns an error if the value is not a property array.
pub fn property_from_value(value: &Value) -> ParseResult<JCardProperty> {
    let Some(items) = value.as_array() else {
        return Err(ParseError::json("property must be an array"));
    };
    let [name, params, data_type, values @ ..] = items.as_slice() else {
        return Err(ParseError::json(
            "property array needs a name, parameters, and a data type",
        ));
    };

    let name = name
        .as_str()
        .ok_or_else(|| ParseError::json("property name must be a string"))?;
    let params = params
        .as_object()
        .ok_or_else(|| ParseError::json("property parameters must be an object"))?;
    let data_type = data_type
        .as_str()
        .ok_or_else(|| ParseError::json("property data type must be a string"))?;

    let mut group = None;
    let mut parameters = VCardParameters::new();
    for (key, value) in params {
        if key.eq_ignore_ascii_case("group") {
            group = value.as_str().map(str::to_owned);
            continue;
        }
        match value {
            Value::Array(items) => parameters.put_all(key, items.iter().map(param_value)),
            other => parameters.put(key, param_value(other)),
        }
    }

    Ok(JCardProperty {
        name: name.to_ascii_uppercase(),
        group,
        parameters,
        value: TaggedValue::from_json_values(data_type, values),
    })
}

fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
