use yomu_types::{Definition, DetailedDefinition};

use crate::image::definition_image;
use crate::node::RenderNode;
use crate::structured_content::interpret;

/// Renders one definition. `None` means there is nothing to show: the
/// definition is missing or empty, is a deinflection, or has a shape this
/// renderer does not know.
pub fn render_definition(definition: Option<&Definition>) -> Option<RenderNode> {
    match definition? {
        Definition::Text(text) if text.is_empty() => None,
        Definition::Text(text) => Some(RenderNode::text(text.as_str())),
        Definition::Detailed(detailed) => match detailed.as_ref() {
            DetailedDefinition::Text(definition) => Some(RenderNode::text(definition.text.as_str())),
            DetailedDefinition::Image(image) => Some(definition_image(image)),
            DetailedDefinition::StructuredContent(definition) => {
                Some(interpret(&definition.content))
            }
        },
        Definition::Deinflection(deinflection) => {
            tracing::debug!("Skipping deinflection definition for '{}'", deinflection.0);
            None
        }
        Definition::Unrecognized(value) => {
            tracing::debug!("Skipping unrecognized definition: {}", value);
            None
        }
    }
}
