use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use yomu_types::{DefinitionTag, DictionaryEntry, EntryId};

use crate::backend::{DictionaryBackend, TokenizerClient};
use crate::cache::FailurePolicy;
use crate::candidates::CandidateSet;
use crate::lookup::DictionaryLookupService;
use crate::resolver::ExpressionResolver;

/// Everything one pointer position resolves to.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub candidates: CandidateSet,
    pub entries: Vec<DictionaryEntry>,
    /// Definition tags of each entry, in the entry's declaration order
    pub tags: HashMap<EntryId, Vec<DefinitionTag>>,
}

impl PipelineOutput {
    pub fn tags_for(&self, entry: EntryId) -> &[DefinitionTag] {
        self.tags.get(&entry).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Sentence and offset in, dictionary entries out.
///
/// Holds the caches, so one pipeline should live as long as the session.
pub struct LookupPipeline {
    resolver: ExpressionResolver,
    dictionary: DictionaryLookupService,
}

impl LookupPipeline {
    pub fn new(resolver: ExpressionResolver, dictionary: DictionaryLookupService) -> Self {
        Self {
            resolver,
            dictionary,
        }
    }

    /// Pipeline whose tokenizer and dictionary are the same service.
    pub fn from_backend<B>(backend: Arc<B>, policy: FailurePolicy) -> Self
    where
        B: TokenizerClient + DictionaryBackend + 'static,
    {
        let tokenizer: Arc<dyn TokenizerClient> = backend.clone();
        let dictionary: Arc<dyn DictionaryBackend> = backend;
        Self::new(
            ExpressionResolver::new(tokenizer, policy),
            DictionaryLookupService::new(dictionary, policy),
        )
    }

    pub fn resolver(&self) -> &ExpressionResolver {
        &self.resolver
    }

    pub fn dictionary(&self) -> &DictionaryLookupService {
        &self.dictionary
    }

    pub async fn resolve_candidates(&self, sentence: &str, offset: usize) -> CandidateSet {
        self.resolver.resolve_candidates(sentence, offset).await
    }

    pub async fn lookup(&self, candidates: &CandidateSet) -> Vec<DictionaryEntry> {
        self.dictionary.lookup(candidates).await
    }

    /// Runs candidate resolution, entry lookup and tag lookup for one
    /// position. A negative offset resolves to nothing.
    pub async fn run(&self, sentence: &str, offset: i64) -> PipelineOutput {
        let Ok(offset) = usize::try_from(offset) else {
            tracing::debug!("Negative offset {}, nothing to look up", offset);
            return PipelineOutput::default();
        };

        let candidates = self.resolve_candidates(sentence, offset).await;
        let entries = self.lookup(&candidates).await;

        let tag_lists = join_all(entries.iter().map(|entry| self.dictionary.tags_for_entry(entry))).await;
        let tags = entries
            .iter()
            .map(|entry| entry.id)
            .zip(tag_lists)
            .collect();

        tracing::debug!(
            "Resolved {} candidates to {} entries",
            candidates.len(),
            entries.len()
        );

        PipelineOutput {
            candidates,
            entries,
            tags,
        }
    }
}
