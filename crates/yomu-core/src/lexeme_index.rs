//! Offset-to-lexeme resolution for one tokenized sentence.
//!
//! Offsets count UTF-16 code units from the start of the sentence.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;
use yomu_types::Lexeme;

/// Identity of one tokenizer result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceId(Uuid);

impl SequenceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Tokenizer output for one sentence, tagged with a fresh [`SequenceId`].
#[derive(Debug)]
pub struct TokenizedSentence {
    id: SequenceId,
    lexemes: Vec<Lexeme>,
}

impl TokenizedSentence {
    pub fn new(lexemes: Vec<Lexeme>) -> Self {
        Self {
            id: SequenceId::new(),
            lexemes,
        }
    }

    pub fn id(&self) -> SequenceId {
        self.id
    }

    pub fn lexemes(&self) -> &[Lexeme] {
        &self.lexemes
    }

    pub fn is_empty(&self) -> bool {
        self.lexemes.is_empty()
    }
}

pub struct LexemeIndex {
    sentence: Arc<TokenizedSentence>,
    /// `offsets[i]` is the summed length of every lexeme before `i`
    offsets: Vec<usize>,
    lengths: Vec<usize>,
}

impl LexemeIndex {
    pub fn new(sentence: Arc<TokenizedSentence>) -> Self {
        let mut offsets = Vec::with_capacity(sentence.lexemes.len());
        let mut lengths = Vec::with_capacity(sentence.lexemes.len());
        let mut current = 0;
        for lexeme in &sentence.lexemes {
            let len = lexeme.utf16_len();
            offsets.push(current);
            lengths.push(len);
            current += len;
        }

        Self {
            sentence,
            offsets,
            lengths,
        }
    }

    pub fn sequence_id(&self) -> SequenceId {
        self.sentence.id
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Summed length of all lexemes. May be shorter than the sentence if the
    /// tokenizer dropped trailing characters.
    pub fn covered_len(&self) -> usize {
        match (self.offsets.last(), self.lengths.last()) {
            (Some(start), Some(len)) => start + len,
            _ => 0,
        }
    }

    /// Index of the lexeme whose span contains `offset`.
    pub fn resolve_index(&self, offset: usize) -> Option<usize> {
        // Last lexeme starting at or before the offset. Zero-length lexemes
        // share their start with a neighbour and never contain anything.
        let index = self
            .offsets
            .partition_point(|&start| start <= offset)
            .checked_sub(1)?;
        let span = self.span(index)?;
        span.contains(&offset).then_some(index)
    }

    pub fn resolve_lexeme(&self, offset: usize) -> Option<&Lexeme> {
        self.resolve_index(offset)
            .and_then(|index| self.sentence.lexemes.get(index))
    }

    /// The resolved lexeme's word, clipped to start at `offset`. An offset
    /// inside a surrogate pair clips at that character.
    pub fn tail_from(&self, offset: usize) -> Option<&str> {
        let index = self.resolve_index(offset)?;
        let word = &self.sentence.lexemes.get(index)?.word;
        let relative = offset - self.offsets[index];

        let mut units = 0;
        for (byte_offset, c) in word.char_indices() {
            units += c.len_utf16();
            if relative < units {
                return Some(&word[byte_offset..]);
            }
        }
        None
    }

    pub fn span(&self, index: usize) -> Option<Range<usize>> {
        let start = *self.offsets.get(index)?;
        let len = *self.lengths.get(index)?;
        Some(start..start + len)
    }
}

/// Keeps one [`LexemeIndex`] per tokenizer result so the offset table is
/// built only once for the same output.
#[derive(Default)]
pub struct LexemeIndexCache {
    indexes: Mutex<HashMap<SequenceId, Arc<LexemeIndex>>>,
    builds: AtomicU64,
}

impl LexemeIndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(&self, sentence: &Arc<TokenizedSentence>) -> Arc<LexemeIndex> {
        let mut indexes = self.indexes.lock().unwrap_or_else(PoisonError::into_inner);
        let index = indexes.entry(sentence.id).or_insert_with(|| {
            self.builds.fetch_add(1, Ordering::Relaxed);
            Arc::new(LexemeIndex::new(Arc::clone(sentence)))
        });
        Arc::clone(index)
    }

    /// Number of indexes built so far.
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }
}
