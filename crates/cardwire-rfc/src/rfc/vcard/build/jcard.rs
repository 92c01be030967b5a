//! jCard (RFC 7095) property array writer.

use serde_json::{Map, Value};

use crate::rfc::vcard::core::{TaggedValue, VCardParameters, parameter_names};

/// Builds a jCard property array: `[name, {params}, type, value...]`.
///
/// Parameter names are lower-cased; a single-valued parameter becomes a
/// string, a multi-valued one an array. The `VALUE` parameter is carried by
/// the data type slot instead. The group, if any, is written as the `group`
/// parameter.
#[must_use]
pub fn write_property_array(
    type_name: &str,
    group: Option<&str>,
    parameters: &VCardParameters,
    value: &TaggedValue,
) -> Value {
    let mut params = Map::new();
    if let Some(group) = group {
        params.insert("group".to_string(), Value::String(group.to_string()));
    }
    for param in parameters {
        if param.is_named(parameter_names::VALUE) {
            continue;
        }
        let json = match param.values.as_slice() {
            [single] => Value::String(single.clone()),
            many => Value::Array(many.iter().cloned().map(Value::String).collect()),
        };
        params.insert(param.name.to_ascii_lowercase(), json);
    }

    let mut array = vec![
        Value::String(type_name.to_ascii_lowercase()),
        Value::Object(params),
        Value::String(value.json_type_name().to_string()),
    ];
    array.extend(value.to_json_values());
    Value::Array(array)
}
