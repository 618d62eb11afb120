//! Structured content to render tree.
//!
//! Every tag keeps only the attributes its field group defines. Tags without
//! a dedicated variant become a `span` that keeps the nested content.

use yomu_types::{
    ContainerFields, Element, StructuredContent, StyledContainerFields, TableCellFields,
};

use crate::image::structured_image;
use crate::node::{ElementKind, RenderElement, RenderNode};
use crate::style::{project_data, project_style};

pub fn interpret(content: &StructuredContent) -> RenderNode {
    match content {
        StructuredContent::Text(text) => RenderNode::text(text.as_str()),
        StructuredContent::Children(children) => {
            RenderNode::fragment(children.iter().map(interpret).collect())
        }
        StructuredContent::Element(element) => interpret_element(element),
    }
}

/// Children of an element: a sibling list is spliced in directly instead of
/// being wrapped in a fragment.
fn children_of(content: Option<&StructuredContent>) -> Vec<RenderNode> {
    match content {
        None => Vec::new(),
        Some(StructuredContent::Children(children)) => children.iter().map(interpret).collect(),
        Some(content) => vec![interpret(content)],
    }
}

fn interpret_element(element: &Element) -> RenderNode {
    let rendered = match element {
        Element::Br(fields) => {
            RenderElement::new(ElementKind::Br).with_attributes(project_data(fields.data.as_ref()))
        }
        Element::Ruby(fields) => RenderElement::new(ElementKind::Ruby)
            .with_attributes(project_data(fields.data.as_ref()))
            .with_children(children_of(fields.content.as_ref())),
        Element::Rt(fields) => container(ElementKind::Rt, fields),
        Element::Rp(fields) => container(ElementKind::Rp, fields),
        Element::Table(fields) => container(ElementKind::Table, fields),
        Element::Thead(fields) => container(ElementKind::Thead, fields),
        Element::Tbody(fields) => container(ElementKind::Tbody, fields),
        Element::Tfoot(fields) => container(ElementKind::Tfoot, fields),
        Element::Tr(fields) => container(ElementKind::Tr, fields),
        Element::Td(fields) => table_cell(ElementKind::Td, fields),
        Element::Th(fields) => table_cell(ElementKind::Th, fields),
        Element::Span(fields) => styled(ElementKind::Span, fields),
        Element::Div(fields) => described(ElementKind::Div, fields),
        Element::Ol(fields) => described(ElementKind::Ol, fields),
        Element::Ul(fields) => described(ElementKind::Ul, fields),
        Element::Li(fields) => described(ElementKind::Li, fields),
        Element::Summary(fields) => described(ElementKind::Summary, fields),
        Element::Details(fields) => {
            let details = described(ElementKind::Details, fields);
            if fields.open == Some(true) {
                details.attr("open", "")
            } else {
                details
            }
        }
        Element::Img(fields) => return structured_image(fields),
        Element::A(fields) => RenderElement::new(ElementKind::A)
            .attr("href", fields.href.as_str())
            .attr_opt("lang", fields.lang.as_deref())
            .with_children(children_of(fields.content.as_ref())),
        Element::Unknown { tag, fields } => {
            tracing::debug!("Unknown structured content tag '{}', rendering as span", tag);
            RenderElement::new(ElementKind::Span)
                .with_attributes(project_data(fields.data.as_ref()))
                .with_style(project_style(fields.style.as_ref()))
                .with_children(children_of(fields.content.as_ref()))
        }
    };

    rendered.into()
}

fn container(kind: ElementKind, fields: &ContainerFields) -> RenderElement {
    RenderElement::new(kind)
        .with_attributes(project_data(fields.data.as_ref()))
        .with_children(children_of(fields.content.as_ref()))
}

fn table_cell(kind: ElementKind, fields: &TableCellFields) -> RenderElement {
    let col_span = fields.col_span.map(|span| span.to_string());
    let row_span = fields.row_span.map(|span| span.to_string());

    RenderElement::new(kind)
        .with_attributes(project_data(fields.data.as_ref()))
        .with_style(project_style(fields.style.as_ref()))
        .attr_opt("colspan", col_span.as_deref())
        .attr_opt("rowspan", row_span.as_deref())
        .attr_opt("lang", fields.lang.as_deref())
        .with_children(children_of(fields.content.as_ref()))
}

fn styled(kind: ElementKind, fields: &StyledContainerFields) -> RenderElement {
    RenderElement::new(kind)
        .with_attributes(project_data(fields.data.as_ref()))
        .with_style(project_style(fields.style.as_ref()))
        .with_children(children_of(fields.content.as_ref()))
}

/// Styled container that also carries `title` and `lang`.
fn described(kind: ElementKind, fields: &StyledContainerFields) -> RenderElement {
    styled(kind, fields)
        .attr_opt("title", fields.title.as_deref())
        .attr_opt("lang", fields.lang.as_deref())
}
