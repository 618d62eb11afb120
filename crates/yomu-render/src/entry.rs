use yomu_types::{DefinitionTag, DictionaryEntry};

use crate::definition::render_definition;
use crate::node::{ElementKind, RenderElement, RenderNode};

/// Headword with its reading as ruby, when the reading differs.
pub fn render_headword(entry: &DictionaryEntry) -> RenderNode {
    let headword = RenderElement::new(ElementKind::Div).attr("class", "headword");
    let headword = if entry.reading.is_empty() || entry.reading == entry.expression {
        headword.child(RenderNode::text(entry.expression.as_str()))
    } else {
        headword.child(
            RenderElement::new(ElementKind::Ruby)
                .child(RenderNode::text(entry.expression.as_str()))
                .child(RenderElement::new(ElementKind::Rt).child(RenderNode::text(entry.reading.as_str()))),
        )
    };
    headword.into()
}

pub fn render_tags(tags: &[DefinitionTag]) -> Option<RenderNode> {
    if tags.is_empty() {
        return None;
    }

    let badges: Vec<RenderNode> = tags
        .iter()
        .map(|tag| {
            RenderElement::new(ElementKind::Span)
                .attr("class", "tag")
                .attr_opt("data-category", Some(tag.category.as_str()))
                .attr_opt("title", Some(tag.notes.as_str()))
                .child(RenderNode::text(tag.name.as_str()))
                .into()
        })
        .collect();

    Some(
        RenderElement::new(ElementKind::Div)
            .attr("class", "tags")
            .with_children(badges)
            .into(),
    )
}

/// One entry: headword, tag badges, then the definitions that render to
/// something, as an ordered list.
pub fn render_entry(entry: &DictionaryEntry, tags: &[DefinitionTag]) -> RenderNode {
    let definitions: Vec<RenderNode> = entry
        .definitions
        .iter()
        .filter_map(|definition| render_definition(Some(definition)))
        .map(|definition| RenderElement::new(ElementKind::Li).child(definition).into())
        .collect();

    let mut document = RenderElement::new(ElementKind::Div)
        .attr("class", "entry")
        .attr("data-entry-id", entry.id.to_string())
        .attr("data-dictionary-id", entry.dictionary_id.to_string())
        .child(render_headword(entry));
    if let Some(tags) = render_tags(tags) {
        document = document.child(tags);
    }
    if !definitions.is_empty() {
        document = document.child(
            RenderElement::new(ElementKind::Ol)
                .attr("class", "definitions")
                .with_children(definitions),
        );
    }
    document.into()
}

pub fn render_entries<'a>(
    entries: impl IntoIterator<Item = (&'a DictionaryEntry, &'a [DefinitionTag])>,
) -> RenderNode {
    RenderElement::new(ElementKind::Div)
        .attr("class", "entries")
        .with_children(
            entries
                .into_iter()
                .map(|(entry, tags)| render_entry(entry, tags))
                .collect(),
        )
        .into()
}
