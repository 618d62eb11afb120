pub mod definition;
pub mod entry;
pub mod html;
pub mod image;
pub mod node;
pub mod structured_content;
pub mod style;

pub use definition::render_definition;
pub use entry::{render_entries, render_entry};
pub use node::{Attributes, ElementKind, RenderElement, RenderNode, StyleMap};
pub use structured_content::interpret;
pub use style::DATA_PREFIX;
