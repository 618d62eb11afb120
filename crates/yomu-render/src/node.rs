use std::collections::BTreeMap;

use serde::Serialize;

/// Attribute name to value. An empty value on a boolean attribute such as
/// `open` means "present".
pub type Attributes = BTreeMap<String, String>;

/// Kebab-case style property to value.
pub type StyleMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Br,
    Ruby,
    Rt,
    Rp,
    Table,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Td,
    Th,
    Span,
    Div,
    Ol,
    Ul,
    Li,
    Details,
    Summary,
    Img,
    A,
    Figure,
    Figcaption,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Br => "br",
            Self::Ruby => "ruby",
            Self::Rt => "rt",
            Self::Rp => "rp",
            Self::Table => "table",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Tfoot => "tfoot",
            Self::Tr => "tr",
            Self::Td => "td",
            Self::Th => "th",
            Self::Span => "span",
            Self::Div => "div",
            Self::Ol => "ol",
            Self::Ul => "ul",
            Self::Li => "li",
            Self::Details => "details",
            Self::Summary => "summary",
            Self::Img => "img",
            Self::A => "a",
            Self::Figure => "figure",
            Self::Figcaption => "figcaption",
        }
    }

    /// Elements that never have children.
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Br | Self::Img)
    }
}

/// Presentation-neutral render tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderNode {
    Text { text: String },
    /// Siblings without a wrapping element
    Fragment { children: Vec<RenderNode> },
    Element(RenderElement),
}

impl RenderNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn fragment(children: Vec<RenderNode>) -> Self {
        Self::Fragment { children }
    }

    /// Number of text leaves in the tree.
    pub fn text_leaf_count(&self) -> usize {
        match self {
            Self::Text { .. } => 1,
            Self::Fragment { children } => children.iter().map(Self::text_leaf_count).sum(),
            Self::Element(element) => element.children.iter().map(Self::text_leaf_count).sum(),
        }
    }

    /// Concatenated text of every leaf, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text { text } => out.push_str(text),
            Self::Fragment { children } => children.iter().for_each(|child| child.collect_text(out)),
            Self::Element(element) => element
                .children
                .iter()
                .for_each(|child| child.collect_text(out)),
        }
    }

    pub fn as_element(&self) -> Option<&RenderElement> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<RenderElement> for RenderNode {
    fn from(element: RenderElement) -> Self {
        Self::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderElement {
    pub kind: ElementKind,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub style: StyleMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderElement {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            style: StyleMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the attribute only for a present, non-empty value.
    pub fn attr_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.attr(name, value),
            _ => self,
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style.extend(style);
        self
    }

    pub fn child(mut self, child: impl Into<RenderNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: Vec<RenderNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_count_and_text() {
        let node = RenderNode::fragment(vec![
            RenderNode::text("a"),
            RenderElement::new(ElementKind::Span)
                .child(RenderNode::text("b"))
                .child(RenderElement::new(ElementKind::Br))
                .into(),
            RenderNode::text("c"),
        ]);

        assert_eq!(node.text_leaf_count(), 3);
        assert_eq!(node.text_content(), "abc");
    }

    #[test]
    fn test_attr_opt_skips_empty() {
        let element = RenderElement::new(ElementKind::Div)
            .attr_opt("title", Some(""))
            .attr_opt("lang", None)
            .attr_opt("dir", Some("ltr"));

        assert_eq!(element.attributes.len(), 1);
        assert_eq!(element.attribute("dir"), Some("ltr"));
    }

    #[test]
    fn test_serialize_shape() {
        let node: RenderNode = RenderElement::new(ElementKind::Span)
            .attr("lang", "ja")
            .child(RenderNode::text("語"))
            .into();

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "element",
                "kind": "span",
                "attributes": { "lang": "ja" },
                "children": [{ "type": "text", "text": "語" }]
            })
        );
    }
}
