//! Format-neutral jCard value.

use serde_json::Value;

use super::data_type::VCardDataType;
use crate::rfc::vcard::build::escape_list_item;

/// Data type name jCard uses when a value's type is not known.
const UNKNOWN_TYPE: &str = "unknown";

/// A jCard-capable property value together with its declared data type.
///
/// Produced and consumed only while marshalling to or from jCard; never kept
/// as property state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedValue {
    /// One scalar value.
    Single {
        data_type: Option<VCardDataType>,
        value: String,
    },
    /// A flat list of values.
    Multi {
        data_type: Option<VCardDataType>,
        values: Vec<String>,
    },
    /// A list of components, each a list of values.
    Structured {
        data_type: Option<VCardDataType>,
        components: Vec<Vec<String>>,
    },
}

impl TaggedValue {
    #[must_use]
    pub fn single(data_type: Option<VCardDataType>, value: impl Into<String>) -> Self {
        Self::Single {
            data_type,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn multi(data_type: Option<VCardDataType>, values: Vec<String>) -> Self {
        Self::Multi { data_type, values }
    }

    #[must_use]
    pub fn structured(data_type: Option<VCardDataType>, components: Vec<Vec<String>>) -> Self {
        Self::Structured {
            data_type,
            components,
        }
    }

    /// Returns the declared data type.
    #[must_use]
    pub fn data_type(&self) -> Option<&VCardDataType> {
        match self {
            Self::Single { data_type, .. }
            | Self::Multi { data_type, .. }
            | Self::Structured { data_type, .. } => data_type.as_ref(),
        }
    }

    /// Converts the value to a single text-format string.
    ///
    /// - `Multi`: entries escaped, joined with commas.
    /// - `Structured`: entries escaped, each component joined with commas,
    ///   components joined with semicolons.
    /// - `Single`: the scalar as-is; unescaping is the text grammar's concern.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Single { value, .. } => value.clone(),
            Self::Multi { values, .. } => join_escaped(values),
            Self::Structured { components, .. } => components
                .iter()
                .map(|component| join_escaped(component))
                .collect::<Vec<_>>()
                .join(";"),
        }
    }

    /// Returns the jCard data type name (`unknown` when untyped).
    #[must_use]
    pub fn json_type_name(&self) -> &str {
        self.data_type().map_or(UNKNOWN_TYPE, VCardDataType::as_str)
    }

    /// Returns the jCard value items that follow the data type in a property
    /// array.
    #[must_use]
    pub fn to_json_values(&self) -> Vec<Value> {
        match self {
            Self::Single { value, .. } => vec![Value::String(value.clone())],
            Self::Multi { values, .. } => values.iter().cloned().map(Value::String).collect(),
            Self::Structured { components, .. } => {
                let components = components
                    .iter()
                    .map(|component| match component.as_slice() {
                        [single] => Value::String(single.clone()),
                        _ => Value::Array(component.iter().cloned().map(Value::String).collect()),
                    })
                    .collect();
                vec![Value::Array(components)]
            }
        }
    }

    /// Builds a value from the items of a jCard property array.
    ///
    /// A single array item is structured, several items are multi-valued,
    /// anything else is a single value. Non-string scalars are stringified.
    #[must_use]
    pub fn from_json_values(type_name: &str, values: &[Value]) -> Self {
        let data_type =
            (!type_name.eq_ignore_ascii_case(UNKNOWN_TYPE)).then(|| VCardDataType::get(type_name));

        match values {
            [Value::Array(components)] => Self::Structured {
                data_type,
                components: components
                    .iter()
                    .map(|component| match component {
                        Value::Array(items) => items.iter().map(scalar_to_string).collect(),
                        other => vec![scalar_to_string(other)],
                    })
                    .collect(),
            },
            [single] => Self::Single {
                data_type,
                value: scalar_to_string(single),
            },
            [] => Self::Single {
                data_type,
                value: String::new(),
            },
            many => Self::Multi {
                data_type,
                values: many.iter().map(scalar_to_string).collect(),
            },
        }
    }
}

fn join_escaped(values: &[String]) -> String {
    values
        .iter()
        .map(|v| escape_list_item(v))
        .collect::<Vec<_>>()
        .join(",")
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn multi_joins_with_commas() {
        let value = TaggedValue::multi(None, vec!["a".into(), "b".into()]);
        assert_eq!(value.to_text(), "a,b");
    }

    #[test]
    fn structured_joins_with_semicolons() {
        let value = TaggedValue::structured(
            None,
            vec![vec!["a".into(), "b".into()], vec!["c".into()]],
        );
        assert_eq!(value.to_text(), "a,b;c");
    }

    #[test]
    fn join_escapes_entries_but_single_is_verbatim() {
        let multi = TaggedValue::multi(None, vec!["a,b".into(), "c;d".into()]);
        assert_eq!(multi.to_text(), "a\\,b,c\\;d");

        let single = TaggedValue::single(None, "a,b");
        assert_eq!(single.to_text(), "a,b");
    }

    #[test]
    fn data_type_travels_with_every_shape() {
        let t = Some(VCardDataType::Uri);
        assert_eq!(
            TaggedValue::single(t.clone(), "x").data_type(),
            Some(&VCardDataType::Uri)
        );
        assert_eq!(
            TaggedValue::multi(t.clone(), vec![]).data_type(),
            Some(&VCardDataType::Uri)
        );
        assert_eq!(
            TaggedValue::structured(t, vec![]).json_type_name(),
            "uri"
        );
        assert_eq!(TaggedValue::single(None, "x").json_type_name(), "unknown");
    }

    #[test]
    fn from_json_values_shapes() {
        let single = TaggedValue::from_json_values("text", &[json!("hello")]);
        assert_eq!(
            single,
            TaggedValue::single(Some(VCardDataType::Text), "hello")
        );

        let multi = TaggedValue::from_json_values("text", &[json!("a"), json!("b")]);
        assert_eq!(
            multi,
            TaggedValue::multi(Some(VCardDataType::Text), vec!["a".into(), "b".into()])
        );

        let structured = TaggedValue::from_json_values("unknown", &[json!(["M", ["x", "y"]])]);
        assert_eq!(
            structured,
            TaggedValue::structured(None, vec![vec!["M".into()], vec!["x".into(), "y".into()]])
        );

        let number = TaggedValue::from_json_values("integer", &[json!(42)]);
        assert_eq!(number.to_text(), "42");
    }

    #[test]
    fn structured_to_json_collapses_single_entry_components() {
        let value = TaggedValue::structured(
            None,
            vec![vec!["M".into()], vec!["a".into(), "b".into()]],
        );
        assert_eq!(value.to_json_values(), vec![json!(["M", ["a", "b"]])]);
    }
}
