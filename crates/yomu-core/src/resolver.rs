use std::sync::Arc;

use crate::backend::TokenizerClient;
use crate::cache::{FailurePolicy, KeyedResourceCache};
use crate::candidates::CandidateSet;
use crate::error::LookupError;
use crate::key::QueryKey;
use crate::lexeme_index::{LexemeIndex, LexemeIndexCache, TokenizedSentence};

/// Turns a pointer position inside a sentence into candidate lookup
/// expressions.
pub struct ExpressionResolver {
    tokenizer: Arc<dyn TokenizerClient>,
    sentences: KeyedResourceCache<QueryKey, Arc<TokenizedSentence>>,
    indexes: LexemeIndexCache,
}

impl ExpressionResolver {
    pub fn new(tokenizer: Arc<dyn TokenizerClient>, policy: FailurePolicy) -> Self {
        Self {
            tokenizer,
            sentences: KeyedResourceCache::with_policy("tokenize", policy),
            indexes: LexemeIndexCache::new(),
        }
    }

    /// Tokenizes `sentence` through the cache.
    pub async fn tokenize(&self, sentence: &str) -> Result<Arc<TokenizedSentence>, LookupError> {
        let key = QueryKey::tokenize(sentence)?;
        let tokenizer = Arc::clone(&self.tokenizer);
        let sentence = sentence.to_string();

        let tokenized = self
            .sentences
            .get(&key, move || async move {
                let lexemes = tokenizer.tokenize(&sentence).await?;
                Ok(Arc::new(TokenizedSentence::new(lexemes)))
            })
            .await?;
        Ok(tokenized)
    }

    pub async fn index_for(&self, sentence: &str) -> Result<Arc<LexemeIndex>, LookupError> {
        let tokenized = self.tokenize(sentence).await?;
        Ok(self.indexes.get_or_build(&tokenized))
    }

    /// Candidates for the character at `offset`, most specific first:
    /// lemma of the re-tokenized tail, surface word, headword lemma.
    ///
    /// Never fails. Tokenizer errors and offsets outside every lexeme give
    /// an empty set.
    pub async fn resolve_candidates(&self, sentence: &str, offset: usize) -> CandidateSet {
        let mut candidates = CandidateSet::new();
        if sentence.is_empty() {
            return candidates;
        }

        let index = match self.index_for(sentence).await {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("Failed to tokenize sentence: {}", e);
                return candidates;
            }
        };

        let Some(lexeme) = index.resolve_lexeme(offset) else {
            tracing::debug!("Offset {} is outside every lexeme", offset);
            return candidates;
        };

        let clipped_lemma = match index.tail_from(offset) {
            Some(tail) if !tail.is_empty() => self.clipped_lemma(tail).await,
            _ => None,
        };

        if let Some(lemma) = clipped_lemma {
            candidates.push(lemma);
        }
        candidates.push(lexeme.word.as_str());
        if let Some(lemma) = lexeme.head_lemma() {
            candidates.push(lemma);
        }

        tracing::debug!("Candidates at {}: {:?}", offset, candidates);
        candidates
    }

    /// Lemma of the first lexeme of `tail`, tokenized on its own.
    async fn clipped_lemma(&self, tail: &str) -> Option<String> {
        match self.tokenize(tail).await {
            Ok(tokenized) => tokenized
                .lexemes()
                .first()
                .and_then(|lexeme| lexeme.head_lemma())
                .map(str::to_string),
            Err(e) => {
                tracing::warn!("Failed to tokenize clipped tail '{}': {}", tail, e);
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use yomu_types::Lexeme;

    use super::*;
    use crate::error::FetchError;
    use crate::lexeme_index::tests::lexeme;

    /// Tokenizer answering from a fixed table; unknown sentences fail.
    #[derive(Default)]
    pub(crate) struct FakeTokenizer {
        pub(crate) sentences: HashMap<String, Vec<Lexeme>>,
        pub(crate) calls: AtomicUsize,
        pub(crate) requested: Mutex<Vec<String>>,
    }

    impl FakeTokenizer {
        pub(crate) fn with(mut self, sentence: &str, lexemes: Vec<Lexeme>) -> Self {
            self.sentences.insert(sentence.to_string(), lexemes);
            self
        }
    }

    #[async_trait::async_trait]
    impl TokenizerClient for FakeTokenizer {
        async fn tokenize(&self, sentence: &str) -> Result<Vec<Lexeme>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().unwrap().push(sentence.to_string());
            self.sentences
                .get(sentence)
                .cloned()
                .ok_or_else(|| FetchError::Network(format!("no analysis for {sentence}")))
        }
    }

    pub(crate) fn taberarenai() -> FakeTokenizer {
        FakeTokenizer::default()
            .with(
                "食べられない",
                vec![
                    lexeme("食べられ", &["食べる", "られる"]),
                    lexeme("ない", &["ない"]),
                ],
            )
            .with(
                "べられない",
                vec![lexeme("べら", &["べる"]), lexeme("れない", &["れる", "ない"])],
            )
            .with("られ", vec![lexeme("られ", &["られる"])])
            .with("食べられ", vec![lexeme("食べられ", &["食べる", "られる"])])
    }

    fn resolver(tokenizer: FakeTokenizer) -> (ExpressionResolver, Arc<FakeTokenizer>) {
        let tokenizer = Arc::new(tokenizer);
        let resolver = ExpressionResolver::new(tokenizer.clone(), FailurePolicy::Retry);
        (resolver, tokenizer)
    }

    #[tokio::test]
    async fn test_candidates_mid_word() {
        let (resolver, tokenizer) = resolver(FakeTokenizer::default()
            .with(
                "食べられない",
                vec![
                    lexeme("食べられ", &["食べる", "られる"]),
                    lexeme("ない", &["ない"]),
                ],
            )
            .with("べられ", vec![lexeme("べら", &["べる"]), lexeme("れ", &["れる"])]));

        let candidates = resolver.resolve_candidates("食べられない", 1).await;

        assert_eq!(candidates.as_slice(), ["べる", "食べられ", "食べる"]);
        assert_eq!(
            *tokenizer.requested.lock().unwrap(),
            ["食べられない", "べられ"]
        );
    }

    #[tokio::test]
    async fn test_candidates_at_offset_two() {
        let (resolver, _) = resolver(taberarenai());

        let candidates = resolver.resolve_candidates("食べられない", 2).await;

        assert_eq!(candidates.as_slice(), ["られる", "食べられ", "食べる"]);
    }

    #[tokio::test]
    async fn test_clipped_duplicate_is_dropped() {
        let (resolver, _) = resolver(taberarenai());

        // The tail from the word start is the word itself, so its lemma
        // repeats the headword and only appears once, in first position.
        let candidates = resolver.resolve_candidates("食べられない", 0).await;

        assert_eq!(candidates.as_slice(), ["食べる", "食べられ"]);
    }

    #[tokio::test]
    async fn test_offset_outside_sentence() {
        let (resolver, tokenizer) = resolver(taberarenai());

        assert!(resolver.resolve_candidates("食べられない", 6).await.is_empty());
        assert!(resolver.resolve_candidates("食べられない", 100).await.is_empty());
        assert_eq!(tokenizer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_sentence_never_tokenizes() {
        let (resolver, tokenizer) = resolver(taberarenai());

        assert!(resolver.resolve_candidates("", 0).await.is_empty());
        assert_eq!(tokenizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tokenizer_failure_gives_empty_set() {
        let (resolver, _) = resolver(FakeTokenizer::default());

        assert!(resolver.resolve_candidates("未知", 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_tokenizer_output_gives_empty_set() {
        let (resolver, _) = resolver(FakeTokenizer::default().with("   ", vec![]));

        assert!(resolver.resolve_candidates("   ", 1).await.is_empty());
    }

    #[tokio::test]
    async fn test_tail_failure_keeps_other_candidates() {
        let (resolver, _) = resolver(FakeTokenizer::default().with(
            "食べられない",
            vec![lexeme("食べられ", &["食べる"]), lexeme("ない", &["ない"])],
        ));

        let candidates = resolver.resolve_candidates("食べられない", 1).await;

        assert_eq!(candidates.as_slice(), ["食べられ", "食べる"]);
    }

    #[tokio::test]
    async fn test_repeated_resolution_reuses_tokenizer_output() {
        let (resolver, tokenizer) = resolver(taberarenai());

        for _ in 0..3 {
            resolver.resolve_candidates("食べられない", 2).await;
        }

        // One call for the sentence and one for the tail.
        assert_eq!(tokenizer.calls.load(Ordering::SeqCst), 2);
        assert_eq!(resolver.indexes.builds(), 1);
    }
}
