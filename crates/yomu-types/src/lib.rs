pub mod definition;
pub mod entry;
pub mod lexeme;
pub mod structured_content;
pub mod types;

pub use definition::{
    Deinflection, Definition, DetailedDefinition, ImageDefinition, StructuredContentDefinition,
    TextDefinition,
};
pub use entry::{DefinitionTag, DictionaryEntry, DictionaryId, EntryId};
pub use lexeme::{Lexeme, LexemeExtra, Token};
pub use structured_content::{
    BreakFields, ContainerFields, Element, ImageFields, LinkFields, NumberOrString,
    StructuredContent, StructuredContentData, StyledContainerFields, Style, TableCellFields,
    TextDecorationLine, UnknownFields,
};
pub use types::{AppEvent, DisplayResult, LookupOutcome, PointerEvent, TextSource};
