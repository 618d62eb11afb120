use yomu_types::{DefinitionTag, DictionaryEntry, Lexeme};

use crate::error::FetchError;

/// Lexical analysis service.
#[async_trait::async_trait]
pub trait TokenizerClient: Send + Sync {
    /// Split `sentence` into lexemes laid out contiguously from its start
    async fn tokenize(&self, sentence: &str) -> Result<Vec<Lexeme>, FetchError>;
}

/// Dictionary search service.
#[async_trait::async_trait]
pub trait DictionaryBackend: Send + Sync {
    /// Entries whose expression or reading equals `expression`
    async fn search_entries(&self, expression: &str) -> Result<Vec<DictionaryEntry>, FetchError>;

    /// Tags named `name`, from every dictionary that defines one
    async fn search_definition_tags(&self, name: &str) -> Result<Vec<DefinitionTag>, FetchError>;
}
