use yomu_types::{ImageDefinition, ImageFields};

use crate::node::{ElementKind, RenderElement, RenderNode, StyleMap};
use crate::style::{format_number, project_data, set};

/// Attributes every image carries: `src`, `alt` (possibly empty), and
/// `title`, `width`, `height` when set.
fn base_image(
    path: &str,
    alt: Option<&str>,
    title: Option<&str>,
    width: Option<f64>,
    height: Option<f64>,
) -> RenderElement {
    let width = width.and_then(format_number);
    let height = height.and_then(format_number);

    RenderElement::new(ElementKind::Img)
        .attr("src", path)
        .attr("alt", alt.unwrap_or_default())
        .attr_opt("title", title)
        .attr_opt("width", width.as_deref())
        .attr_opt("height", height.as_deref())
}

/// `img` node inside structured content.
pub fn structured_image(fields: &ImageFields) -> RenderNode {
    let mut style = StyleMap::new();
    set(&mut style, "image-rendering", fields.image_rendering.as_deref());
    set(&mut style, "vertical-align", fields.vertical_align.as_deref());
    set(&mut style, "border", fields.border.as_deref());
    set(&mut style, "border-radius", fields.border_radius.as_deref());

    base_image(
        &fields.path,
        fields.alt.as_deref(),
        fields.title.as_deref(),
        fields.width,
        fields.height,
    )
    .with_attributes(project_data(fields.data.as_ref()))
    .with_style(style)
    .into()
}

/// Top-level image definition. A description turns the image into a
/// captioned figure.
pub fn definition_image(definition: &ImageDefinition) -> RenderNode {
    let mut style = StyleMap::new();
    let rendering = match definition.image_rendering.as_deref() {
        Some(rendering) if !rendering.is_empty() => Some(rendering),
        _ if definition.pixelated => Some("pixelated"),
        _ => None,
    };
    set(&mut style, "image-rendering", rendering);
    if definition.appearance.as_deref() == Some("monochrome") {
        set(&mut style, "filter", Some("grayscale(100%)"));
    }
    if definition.background {
        set(&mut style, "background-color", Some("transparent"));
    }

    let image = base_image(
        &definition.path,
        definition.alt.as_deref(),
        definition.title.as_deref(),
        definition.width,
        definition.height,
    )
    .with_style(style);

    match definition.description.as_deref() {
        Some(description) if !description.is_empty() => RenderElement::new(ElementKind::Figure)
            .child(image)
            .child(RenderElement::new(ElementKind::Figcaption).child(RenderNode::text(description)))
            .into(),
        _ => image.into(),
    }
}
