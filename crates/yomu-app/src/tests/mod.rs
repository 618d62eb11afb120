//! Binary tests: tracker, output stage and channel plumbing

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;
use yomu_core::{DictionaryBackend, FetchError, TokenizerClient};
use yomu_types::{DefinitionTag, Definition, DictionaryEntry, Lexeme, Token};

mod sync_channel_tests;

/// Lookup server stand-in. Every sentence tokenizes to a single word whose
/// lemma is the sentence itself, and every expression has one entry.
#[derive(Default)]
pub struct FakeServer {
    /// Sentences whose tokenization waits on `gate`
    pub held: HashSet<String>,
    pub gate: Notify,
    pub tokenize_calls: AtomicUsize,
    pub tokenized: Mutex<Vec<String>>,
}

impl FakeServer {
    pub fn holding(sentence: &str) -> Self {
        Self {
            held: HashSet::from([sentence.to_string()]),
            ..Self::default()
        }
    }

    pub fn tokenized(&self) -> Vec<String> {
        self.tokenized.lock().unwrap().clone()
    }
}

pub fn entry_id(expression: &str) -> i32 {
    expression.chars().map(|c| c as i32).sum()
}

pub fn entry(expression: &str) -> DictionaryEntry {
    DictionaryEntry {
        id: entry_id(expression),
        dictionary_id: 1,
        expression: expression.to_string(),
        reading: "よみ".to_string(),
        definitions: vec![Definition::Text(format!("meaning of {expression}"))],
        rules: String::new(),
        score: 0.0,
        sequence: 0,
        definition_tags: "n".to_string(),
        expression_tags: String::new(),
    }
}

pub fn noun_tag() -> DefinitionTag {
    DefinitionTag {
        id: 1,
        dictionary_id: 1,
        name: "n".to_string(),
        category: "partOfSpeech".to_string(),
        order: 0.0,
        notes: "noun".to_string(),
        score: 0.0,
    }
}

#[async_trait::async_trait]
impl TokenizerClient for FakeServer {
    async fn tokenize(&self, sentence: &str) -> Result<Vec<Lexeme>, FetchError> {
        self.tokenize_calls.fetch_add(1, Ordering::SeqCst);
        self.tokenized.lock().unwrap().push(sentence.to_string());
        if self.held.contains(sentence) {
            self.gate.notified().await;
        }

        Ok(vec![Lexeme {
            word: sentence.to_string(),
            lemma: None,
            part_of_speech: None,
            tokens: vec![Token {
                literal: sentence.to_string(),
                lemma: sentence.to_string(),
                ..Token::default()
            }],
            extra: None,
        }])
    }
}

#[async_trait::async_trait]
impl DictionaryBackend for FakeServer {
    async fn search_entries(&self, expression: &str) -> Result<Vec<DictionaryEntry>, FetchError> {
        Ok(vec![entry(expression)])
    }

    async fn search_definition_tags(&self, name: &str) -> Result<Vec<DefinitionTag>, FetchError> {
        if name == "n" {
            Ok(vec![noun_tag()])
        } else {
            Ok(Vec::new())
        }
    }
}
