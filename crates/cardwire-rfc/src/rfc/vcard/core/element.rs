//! Wrappers over the single XML or HTML element a property is read from or
//! written to.

use super::data_type::VCardDataType;
use super::version::VCardVersion;

/// One value child of an xCard property element, e.g. `<text>Bob</text>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XCardValue {
    /// Local name of the child element.
    pub name: String,
    /// Text content of the child element.
    pub text: String,
}

/// Version-aware view of an xCard property element.
///
/// Holds the value children of the property's element; the `<parameters>`
/// child is never included (it is read into the property's parameters
/// before the property sees the element).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XCardElement {
    version: VCardVersion,
    children: Vec<XCardValue>,
}

impl XCardElement {
    /// Creates an empty element.
    #[must_use]
    pub fn new(version: VCardVersion) -> Self {
        Self {
            version,
            children: Vec::new(),
        }
    }

    /// Creates an element from already-parsed value children.
    #[must_use]
    pub fn with_children(version: VCardVersion, children: Vec<XCardValue>) -> Self {
        Self { version, children }
    }

    /// Version of the xCard document the element belongs to.
    #[must_use]
    pub fn version(&self) -> VCardVersion {
        self.version
    }

    #[must_use]
    pub fn children(&self) -> &[XCardValue] {
        &self.children
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the text of the first child whose name is one of `names`.
    #[must_use]
    pub fn first(&self, names: &[&str]) -> Option<&str> {
        self.children
            .iter()
            .find(|c| names.contains(&c.name.as_str()))
            .map(|c| c.text.as_str())
    }

    /// Returns the texts of every child named `name`.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.children
            .iter()
            .filter(|c| c.name == name)
            .map(|c| c.text.as_str())
            .collect()
    }

    /// Returns the text of the first child whose name is the given data
    /// type, or of an `<unknown>` child when no type is given.
    #[must_use]
    pub fn first_value(&self, data_type: Option<&VCardDataType>) -> Option<&str> {
        let name = data_type.map_or(cardwire_core::constants::XCARD_UNKNOWN, VCardDataType::as_str);
        self.first(&[name])
    }

    /// Appends a value child.
    pub fn append(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.children.push(XCardValue {
            name: name.into(),
            text: text.into(),
        });
    }

    /// Appends one value child per text, all with the same name.
    pub fn append_all<I, S>(&mut self, name: &str, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for text in texts {
            self.append(name, text);
        }
    }
}

/// A node of a parsed hCard fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element(HCardElement),
    Text(String),
}

/// Read-only view of an hCard microformat element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HCardElement {
    tag_name: String,
    attributes: Vec<(String, String)>,
    children: Vec<HtmlNode>,
}

impl HCardElement {
    /// Creates an element with no attributes or children.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(HtmlNode::Text(text.into()));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: HCardElement) -> Self {
        self.children.push(HtmlNode::Element(child));
        self
    }

    pub(crate) fn push(&mut self, node: HtmlNode) {
        self.children.push(node);
    }

    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Returns an attribute value (attribute names are case-insensitive).
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the whitespace-separated `class` names.
    #[must_use]
    pub fn class_names(&self) -> Vec<&str> {
        self.attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class_names()
            .iter()
            .any(|c| c.eq_ignore_ascii_case(class))
    }

    #[must_use]
    pub fn children(&self) -> &[HtmlNode] {
        &self.children
    }

    /// Returns the effective value of the element.
    ///
    /// - an `<abbr>` with a non-empty `title` yields the title;
    /// - otherwise, if descendants carry the `value` class, their values are
    ///   concatenated (nested `value` elements are not visited twice);
    /// - otherwise the element's text, where `<br>` becomes a newline and
    ///   `<del>` and `type`-classed elements are ignored.
    ///
    /// The result is trimmed.
    #[must_use]
    pub fn value(&self) -> String {
        if let Some(title) = self.abbr_title() {
            return title.trim().to_string();
        }

        let mut value_elements = Vec::new();
        collect_value_elements(self, &mut value_elements);

        let mut value = String::new();
        if value_elements.is_empty() {
            visit_for_value(self, &mut value);
        } else {
            for element in value_elements {
                match element.abbr_title() {
                    Some(title) => value.push_str(title),
                    None => visit_for_value(element, &mut value),
                }
            }
        }
        value.trim().to_string()
    }

    fn abbr_title(&self) -> Option<&str> {
        (self.tag_name == "abbr")
            .then(|| self.attribute("title"))
            .flatten()
            .filter(|t| !t.is_empty())
    }
}

/// Collects the outermost descendants that carry the `value` class.
fn collect_value_elements<'a>(element: &'a HCardElement, out: &mut Vec<&'a HCardElement>) {
    for child in &element.children {
        if let HtmlNode::Element(child) = child {
            if child.has_class("value") {
                out.push(child);
            } else {
                collect_value_elements(child, out);
            }
        }
    }
}

fn visit_for_value(element: &HCardElement, value: &mut String) {
    for child in &element.children {
        match child {
            HtmlNode::Text(text) => value.push_str(text),
            HtmlNode::Element(child) => {
                if child.has_class("type") || child.tag_name == "del" {
                    continue;
                }
                if child.tag_name == "br" {
                    value.push('\n');
                    continue;
                }
                visit_for_value(child, value);
            }
        }
    }
}
