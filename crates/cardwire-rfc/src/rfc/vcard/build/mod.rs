//! vCard property writers.
//!
//! - Escape: text, list-item and parameter value escaping
//! - Fold: content line folding (UTF-8 safe)
//! - Content line: `[group.]NAME;PARAMS:value`
//! - xCard: one property element
//! - jCard: one property array

mod content_line;
mod escape;
mod fold;
mod jcard;
mod xcard;

pub use content_line::{write_content_line, write_parameters};
pub use escape::{escape_list_item, escape_param_value, escape_text};
pub use fold::fold_line;
pub use jcard::write_property_array;
pub use xcard::write_property_element;
