use serde::Deserialize;

use crate::definition::Definition;

pub type EntryId = i32;
pub type DictionaryId = i32;

/// A term imported from one dictionary, as returned by `dictionary_entries/search`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DictionaryEntry {
    pub id: EntryId,
    pub dictionary_id: DictionaryId,
    pub expression: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    /// Space-separated rule identifiers used for deinflection
    #[serde(default)]
    pub rules: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub sequence: i32,
    /// Space-separated definition tag names
    #[serde(default)]
    pub definition_tags: String,
    /// Space-separated term tag names
    #[serde(default)]
    pub expression_tags: String,
}

impl DictionaryEntry {
    /// Definition tag names in declaration order. Empty strings yield no tags.
    pub fn definition_tag_names(&self) -> impl Iterator<Item = &str> {
        self.definition_tags.split_whitespace()
    }
}

/// Tag metadata. The same `name` may exist in several dictionaries with
/// different metadata, so tags are always matched on `dictionary_id` too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DefinitionTag {
    pub id: i32,
    pub dictionary_id: DictionaryId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub order: f32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_row() {
        let json = r#"{
            "id": 7,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z",
            "dictionary_id": 2,
            "expression": "食べる",
            "reading": "たべる",
            "definitions": ["to eat"],
            "rules": "v1",
            "score": 0.0,
            "sequence": 1358280,
            "definition_tags": "v1  vt",
            "expression_tags": ""
        }"#;

        let entry: DictionaryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.dictionary_id, 2);
        assert_eq!(entry.definitions.len(), 1);
        assert_eq!(entry.definition_tag_names().collect::<Vec<_>>(), ["v1", "vt"]);
    }
}
