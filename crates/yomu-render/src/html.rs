use std::fmt::Write;

use crate::node::{RenderElement, RenderNode};

impl RenderNode {
    /// Escaped HTML fragment for the tree.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out);
        out
    }
}

fn write_node(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Text { text } => escape_into(text, false, out),
        RenderNode::Fragment { children } => {
            children.iter().for_each(|child| write_node(child, out));
        }
        RenderNode::Element(element) => write_element(element, out),
    }
}

fn write_element(element: &RenderElement, out: &mut String) {
    let name = element.kind.as_str();
    out.push('<');
    out.push_str(name);

    for (attribute, value) in &element.attributes {
        if !is_attribute_name(attribute) {
            tracing::debug!("Skipping invalid attribute name {:?}", attribute);
            continue;
        }
        out.push(' ');
        out.push_str(attribute);
        // Boolean attributes are stored with an empty value
        if !value.is_empty() {
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
    }

    if !element.style.is_empty() {
        let mut style = String::new();
        for (property, value) in &element.style {
            if !style.is_empty() {
                style.push(' ');
            }
            let _ = write!(style, "{property}: {value};");
        }
        out.push_str(" style=\"");
        escape_into(&style, true, out);
        out.push('"');
    }

    out.push('>');
    if element.kind.is_void() {
        return;
    }

    element.children.iter().for_each(|child| write_node(child, out));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Names that cannot end the tag or start a value early.
fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::ElementKind;

    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let node: RenderNode = RenderElement::new(ElementKind::A)
            .attr("href", "?q=\"a&b\"")
            .child(RenderNode::text("<tag> & 'quote'"))
            .into();

        assert_eq!(
            node.to_html(),
            "<a href=\"?q=&quot;a&amp;b&quot;\">&lt;tag&gt; &amp; 'quote'</a>"
        );
    }

    #[test]
    fn test_data_keys_cannot_break_out_of_the_tag() {
        let content: yomu_types::StructuredContent = serde_json::from_value(serde_json::json!({
            "tag": "span",
            "data": {"x><script>alert(1)</script><i a": "v", "ok": "1", "a b": "2"},
            "content": "text"
        }))
        .unwrap();

        let html = crate::interpret(&content).to_html();

        assert!(!html.contains("<script>"));
        assert_eq!(html, "<span data-sc-ok=\"1\">text</span>");
    }

    #[test]
    fn test_void_and_boolean_attributes() {
        let node = RenderNode::fragment(vec![
            RenderElement::new(ElementKind::Details)
                .attr("open", "")
                .child(RenderElement::new(ElementKind::Br))
                .into(),
            RenderElement::new(ElementKind::Img)
                .attr("src", "a.png")
                .attr("alt", "")
                .into(),
        ]);

        assert_eq!(
            node.to_html(),
            "<details open><br></details><img alt src=\"a.png\">"
        );
    }

    #[test]
    fn test_style_is_serialized_in_property_order() {
        let mut style = crate::node::StyleMap::new();
        style.insert("margin-top".to_string(), "4".to_string());
        style.insert("font-weight".to_string(), "bold".to_string());
        let node: RenderNode = RenderElement::new(ElementKind::Div)
            .with_style(style)
            .child(RenderNode::text("x"))
            .into();

        assert_eq!(
            node.to_html(),
            "<div style=\"font-weight: bold; margin-top: 4;\">x</div>"
        );
    }
}
