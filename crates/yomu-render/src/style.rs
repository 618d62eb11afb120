use yomu_types::{NumberOrString, Style, StructuredContentData, TextDecorationLine};

use crate::node::{Attributes, StyleMap};

/// Prefix for attributes projected from a node's `data` record.
pub const DATA_PREFIX: &str = "data-sc-";

/// `data` entries as `data-sc-<key>` attributes.
pub fn project_data(data: Option<&StructuredContentData>) -> Attributes {
    data.into_iter()
        .flatten()
        .map(|(key, value)| (format!("{DATA_PREFIX}{key}"), value.clone()))
        .collect()
}

/// Maps a structured-content style onto kebab-case properties. Absent and
/// empty values are left out.
pub fn project_style(style: Option<&Style>) -> StyleMap {
    let mut out = StyleMap::new();
    let Some(style) = style else {
        return out;
    };

    set(&mut out, "font-style", style.font_style.as_deref());
    set(&mut out, "font-weight", style.font_weight.as_deref());
    set(&mut out, "font-size", style.font_size.as_deref());
    set(&mut out, "color", style.color.as_deref());
    set(&mut out, "background", style.background.as_deref());
    set(&mut out, "background-color", style.background_color.as_deref());
    if let Some(line) = &style.text_decoration_line {
        let line = match line {
            TextDecorationLine::Single(line) => line.clone(),
            TextDecorationLine::Multiple(lines) => lines.join(" "),
        };
        set(&mut out, "text-decoration-line", Some(line.as_str()));
    }
    set(&mut out, "text-decoration-style", style.text_decoration_style.as_deref());
    set(&mut out, "text-decoration-color", style.text_decoration_color.as_deref());
    set(&mut out, "border-color", style.border_color.as_deref());
    set(&mut out, "border-style", style.border_style.as_deref());
    set(&mut out, "border-radius", style.border_radius.as_deref());
    set(&mut out, "border-width", style.border_width.as_deref());
    set(&mut out, "clip-path", style.clip_path.as_deref());
    set(&mut out, "vertical-align", style.vertical_align.as_deref());
    if style.text_align.as_deref() != Some("justify-all") {
        set(&mut out, "text-align", style.text_align.as_deref());
    }
    set(&mut out, "text-emphasis", style.text_emphasis.as_deref());
    set(&mut out, "text-shadow", style.text_shadow.as_deref());
    set(&mut out, "margin", style.margin.as_deref());
    set_length(&mut out, "margin-top", style.margin_top.as_ref());
    set_length(&mut out, "margin-left", style.margin_left.as_ref());
    set_length(&mut out, "margin-right", style.margin_right.as_ref());
    set_length(&mut out, "margin-bottom", style.margin_bottom.as_ref());
    set(&mut out, "padding", style.padding.as_deref());
    set(&mut out, "padding-top", style.padding_top.as_deref());
    set(&mut out, "padding-left", style.padding_left.as_deref());
    set(&mut out, "padding-right", style.padding_right.as_deref());
    set(&mut out, "padding-bottom", style.padding_bottom.as_deref());
    set(&mut out, "word-break", style.word_break.as_deref());
    set(&mut out, "white-space", style.white_space.as_deref());
    set(&mut out, "cursor", style.cursor.as_deref());
    set(&mut out, "list-style-type", style.list_style_type.as_deref());

    out
}

pub(crate) fn set(out: &mut StyleMap, property: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.is_empty()) {
        out.insert(property.to_string(), value.to_string());
    }
}

/// Numbers are written without a unit; zero counts as absent.
fn set_length(out: &mut StyleMap, property: &str, value: Option<&NumberOrString>) {
    let value = match value {
        Some(NumberOrString::Number(number)) => format_number(*number),
        Some(NumberOrString::String(text)) => Some(text.clone()),
        None => None,
    };
    set(out, property, value.as_deref());
}

/// `4.0` as "4", `1.5` as "1.5". Zero and NaN give `None`.
pub(crate) fn format_number(number: f64) -> Option<String> {
    if number == 0.0 || number.is_nan() {
        return None;
    }
    Some(number.to_string())
}
