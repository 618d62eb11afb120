//! Structured content, the recursive HTML-like document format used by
//! dictionaries for rich definitions.
//!
//! A node is a text leaf, a list of sibling nodes, or a tagged [`Element`].
//! Each element variant only carries the attributes valid for its tag. Tags
//! this crate does not know deserialize into [`Element::Unknown`] so newer
//! dictionaries still load and their text survives.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Generic data attributes attached to an element.
pub type StructuredContentData = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StructuredContent {
    /// Represents a text node.
    Text(String),
    /// An array of child content.
    Children(Vec<StructuredContent>),
    Element(Box<Element>),
}

impl From<&str> for StructuredContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Br(BreakFields),

    Ruby(ContainerFields),
    Rt(ContainerFields),
    Rp(ContainerFields),
    Table(ContainerFields),
    Thead(ContainerFields),
    Tbody(ContainerFields),
    Tfoot(ContainerFields),
    Tr(ContainerFields),

    Td(TableCellFields),
    Th(TableCellFields),

    Span(StyledContainerFields),
    Div(StyledContainerFields),
    Ol(StyledContainerFields),
    Ul(StyledContainerFields),
    Li(StyledContainerFields),
    Details(StyledContainerFields),
    Summary(StyledContainerFields),

    Img(ImageFields),

    A(LinkFields),

    /// Any tag not listed above.
    Unknown { tag: String, fields: UnknownFields },
}

impl Element {
    /// Returns the tag name associated with this variant.
    pub fn tag(&self) -> &str {
        match self {
            Self::Br(_) => "br",
            Self::Ruby(_) => "ruby",
            Self::Rt(_) => "rt",
            Self::Rp(_) => "rp",
            Self::Table(_) => "table",
            Self::Thead(_) => "thead",
            Self::Tbody(_) => "tbody",
            Self::Tfoot(_) => "tfoot",
            Self::Tr(_) => "tr",
            Self::Td(_) => "td",
            Self::Th(_) => "th",
            Self::Span(_) => "span",
            Self::Div(_) => "div",
            Self::Ol(_) => "ol",
            Self::Ul(_) => "ul",
            Self::Li(_) => "li",
            Self::Details(_) => "details",
            Self::Summary(_) => "summary",
            Self::Img(_) => "img",
            Self::A(_) => "a",
            Self::Unknown { tag, .. } => tag,
        }
    }

    /// Child content, if this kind of element can have any.
    pub fn content(&self) -> Option<&StructuredContent> {
        match self {
            Self::Br(_) | Self::Img(_) => None,
            Self::Ruby(fields)
            | Self::Rt(fields)
            | Self::Rp(fields)
            | Self::Table(fields)
            | Self::Thead(fields)
            | Self::Tbody(fields)
            | Self::Tfoot(fields)
            | Self::Tr(fields) => fields.content.as_ref(),
            Self::Td(fields) | Self::Th(fields) => fields.content.as_ref(),
            Self::Span(fields)
            | Self::Div(fields)
            | Self::Ol(fields)
            | Self::Ul(fields)
            | Self::Li(fields)
            | Self::Details(fields)
            | Self::Summary(fields) => fields.content.as_ref(),
            Self::A(fields) => fields.content.as_ref(),
            Self::Unknown { fields, .. } => fields.content.as_ref(),
        }
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = match value.get("tag") {
            Some(serde_json::Value::String(tag)) => tag.clone(),
            _ => return Err(de::Error::missing_field("tag")),
        };

        let element = match tag.as_str() {
            "br" => serde_json::from_value(value).map(Self::Br),
            "ruby" => serde_json::from_value(value).map(Self::Ruby),
            "rt" => serde_json::from_value(value).map(Self::Rt),
            "rp" => serde_json::from_value(value).map(Self::Rp),
            "table" => serde_json::from_value(value).map(Self::Table),
            "thead" => serde_json::from_value(value).map(Self::Thead),
            "tbody" => serde_json::from_value(value).map(Self::Tbody),
            "tfoot" => serde_json::from_value(value).map(Self::Tfoot),
            "tr" => serde_json::from_value(value).map(Self::Tr),
            "td" => serde_json::from_value(value).map(Self::Td),
            "th" => serde_json::from_value(value).map(Self::Th),
            "span" => serde_json::from_value(value).map(Self::Span),
            "div" => serde_json::from_value(value).map(Self::Div),
            "ol" => serde_json::from_value(value).map(Self::Ol),
            "ul" => serde_json::from_value(value).map(Self::Ul),
            "li" => serde_json::from_value(value).map(Self::Li),
            "details" => serde_json::from_value(value).map(Self::Details),
            "summary" => serde_json::from_value(value).map(Self::Summary),
            "img" => serde_json::from_value(value).map(Self::Img),
            "a" => serde_json::from_value(value).map(Self::A),
            _ => serde_json::from_value(value).map(|fields| Self::Unknown {
                tag: tag.clone(),
                fields,
            }),
        };

        element.map_err(de::Error::custom)
    }
}

/// Empty tags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BreakFields {
    pub data: Option<StructuredContentData>,
}

/// Generic container tags.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContainerFields {
    pub content: Option<StructuredContent>,
    pub data: Option<StructuredContentData>,
    /// Language of the element, RFC 5646.
    pub lang: Option<String>,
}

/// Table cells.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableCellFields {
    pub content: Option<StructuredContent>,
    pub data: Option<StructuredContentData>,
    pub col_span: Option<u32>,
    pub row_span: Option<u32>,
    pub style: Option<Style>,
    pub lang: Option<String>,
}

/// Container tags supporting configurable styles.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyledContainerFields {
    pub content: Option<StructuredContent>,
    pub data: Option<StructuredContentData>,
    pub style: Option<Style>,
    /// Hover text for the element.
    pub title: Option<String>,
    /// Whether a details element starts expanded. Ignored by other tags.
    pub open: Option<bool>,
    pub lang: Option<String>,
}

/// Image tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    /// Path to the image file in the dictionary archive.
    pub path: String,
    #[serde(default)]
    pub data: Option<StructuredContentData>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub pixelated: bool,
    /// Supersedes `pixelated` when present.
    #[serde(default)]
    pub image_rendering: Option<String>,
    #[serde(default)]
    pub appearance: Option<String>,
    #[serde(default = "default_true")]
    pub background: bool,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub vertical_align: Option<String>,
    /// Shorthand for border width, style, and color.
    #[serde(default)]
    pub border: Option<String>,
    #[serde(default)]
    pub border_radius: Option<String>,
    /// Units for `width` and `height`.
    #[serde(default)]
    pub size_units: Option<String>,
}

/// Link tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkFields {
    pub href: String,
    #[serde(default)]
    pub content: Option<StructuredContent>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// Attributes kept for tags without a dedicated variant.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UnknownFields {
    pub content: Option<StructuredContent>,
    pub data: Option<StructuredContentData>,
    pub style: Option<Style>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub font_style: Option<String>,
    pub font_weight: Option<String>,
    pub font_size: Option<String>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub background_color: Option<String>,
    pub text_decoration_line: Option<TextDecorationLine>,
    pub text_decoration_style: Option<String>,
    pub text_decoration_color: Option<String>,
    pub border_color: Option<String>,
    pub border_style: Option<String>,
    pub border_radius: Option<String>,
    pub border_width: Option<String>,
    pub clip_path: Option<String>,
    pub vertical_align: Option<String>,
    pub text_align: Option<String>,
    pub text_emphasis: Option<String>,
    pub text_shadow: Option<String>,
    pub margin: Option<String>,
    pub margin_top: Option<NumberOrString>,
    pub margin_left: Option<NumberOrString>,
    pub margin_right: Option<NumberOrString>,
    pub margin_bottom: Option<NumberOrString>,
    pub padding: Option<String>,
    pub padding_top: Option<String>,
    pub padding_left: Option<String>,
    pub padding_right: Option<String>,
    pub padding_bottom: Option<String>,
    pub word_break: Option<String>,
    pub white_space: Option<String>,
    pub cursor: Option<String>,
    pub list_style_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextDecorationLine {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    String(String),
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_content() {
        let json = r#"[
            "before",
            {"tag": "ruby", "content": ["漢", {"tag": "rt", "content": "かん"}]},
            {"tag": "div", "style": {"marginTop": 4, "fontWeight": "bold"}, "data": {"sense": "1"}}
        ]"#;

        let content: StructuredContent = serde_json::from_str(json).unwrap();
        let StructuredContent::Children(children) = content else {
            panic!("expected children");
        };
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], StructuredContent::from("before"));

        let StructuredContent::Element(ruby) = &children[1] else {
            panic!("expected element");
        };
        assert_eq!(ruby.tag(), "ruby");
        assert!(matches!(ruby.content(), Some(StructuredContent::Children(_))));

        let StructuredContent::Element(div) = &children[2] else {
            panic!("expected element");
        };
        let Element::Div(fields) = div.as_ref() else {
            panic!("expected div");
        };
        let style = fields.style.as_ref().unwrap();
        assert_eq!(style.margin_top, Some(NumberOrString::Number(4.0)));
        assert_eq!(fields.data.as_ref().unwrap()["sense"], "1");
    }

    #[test]
    fn test_unknown_tag_keeps_content() {
        let json = r#"{"tag": "marquee", "content": "still here", "data": {"k": "v"}}"#;

        let content: StructuredContent = serde_json::from_str(json).unwrap();
        let StructuredContent::Element(element) = content else {
            panic!("expected element");
        };
        assert_eq!(element.tag(), "marquee");
        assert_eq!(element.content(), Some(&StructuredContent::from("still here")));
    }

    #[test]
    fn test_image_defaults() {
        let json = r#"{"tag": "img", "path": "img/a.png", "width": 1.5}"#;

        let content: StructuredContent = serde_json::from_str(json).unwrap();
        let StructuredContent::Element(element) = content else {
            panic!("expected element");
        };
        let Element::Img(image) = element.as_ref() else {
            panic!("expected img");
        };
        assert_eq!(image.path, "img/a.png");
        assert_eq!(image.width, Some(1.5));
        assert!(image.background);
        assert!(!image.pixelated);
        assert_eq!(element.content(), None);
    }

    #[test]
    fn test_missing_tag_is_rejected() {
        let result = serde_json::from_str::<StructuredContent>(r#"{"content": "x"}"#);
        assert!(result.is_err());
    }
}
