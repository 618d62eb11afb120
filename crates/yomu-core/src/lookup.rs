use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::join_all;
use yomu_types::{DefinitionTag, DictionaryEntry, DictionaryId};

use crate::backend::DictionaryBackend;
use crate::cache::{FailurePolicy, KeyedResourceCache};
use crate::candidates::CandidateSet;
use crate::error::LookupError;
use crate::key::QueryKey;

/// Cached dictionary queries: entries per expression, tags per name.
pub struct DictionaryLookupService {
    backend: Arc<dyn DictionaryBackend>,
    entries: KeyedResourceCache<QueryKey, Arc<[DictionaryEntry]>>,
    tags: KeyedResourceCache<QueryKey, Arc<[DefinitionTag]>>,
}

impl DictionaryLookupService {
    pub fn new(backend: Arc<dyn DictionaryBackend>, policy: FailurePolicy) -> Self {
        Self {
            backend,
            entries: KeyedResourceCache::with_policy("dictionaryEntries", policy),
            tags: KeyedResourceCache::with_policy("definitionTags", policy),
        }
    }

    pub async fn search_entries(
        &self,
        expression: &str,
    ) -> Result<Arc<[DictionaryEntry]>, LookupError> {
        let key = QueryKey::dictionary_entries(expression)?;
        let backend = Arc::clone(&self.backend);
        let expression = expression.to_string();

        let entries = self
            .entries
            .get(&key, move || async move {
                let entries = backend.search_entries(&expression).await?;
                Ok(Arc::from(entries))
            })
            .await?;
        Ok(entries)
    }

    /// Entries for every candidate, merged in candidate order without
    /// duplicate ids. A candidate whose search fails contributes nothing.
    pub async fn lookup(&self, candidates: &CandidateSet) -> Vec<DictionaryEntry> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let searches = candidates.iter().map(|expression| self.search_entries(expression));
        let results = join_all(searches).await;

        let mut found = Vec::with_capacity(results.len());
        for (expression, result) in candidates.iter().zip(results) {
            match result {
                Ok(entries) => found.push(entries),
                Err(e) => tracing::warn!("Entry search for '{}' failed: {}", expression, e),
            }
        }

        merge_entries(found.iter().map(|entries| &entries[..]))
    }

    pub async fn search_definition_tags(
        &self,
        name: &str,
    ) -> Result<Arc<[DefinitionTag]>, LookupError> {
        let key = QueryKey::definition_tags(name)?;
        let backend = Arc::clone(&self.backend);
        let name = name.to_string();

        let tags = self
            .tags
            .get(&key, move || async move {
                let tags = backend.search_definition_tags(&name).await?;
                Ok(Arc::from(tags))
            })
            .await?;
        Ok(tags)
    }

    /// For each name, the first tag from `dictionary_id`. Names with no
    /// such tag, or whose search fails, are left out.
    pub async fn lookup_tags<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
        dictionary_id: DictionaryId,
    ) -> Vec<DefinitionTag> {
        let names: Vec<&str> = names.into_iter().collect();
        let results = join_all(names.iter().map(|name| self.search_definition_tags(name))).await;

        names
            .iter()
            .zip(results)
            .filter_map(|(name, result)| match result {
                Ok(tags) => tags
                    .iter()
                    .find(|tag| tag.dictionary_id == dictionary_id)
                    .cloned(),
                Err(e) => {
                    tracing::warn!("Tag search for '{}' failed: {}", name, e);
                    None
                }
            })
            .collect()
    }

    pub async fn tags_for_entry(&self, entry: &DictionaryEntry) -> Vec<DefinitionTag> {
        self.lookup_tags(entry.definition_tag_names(), entry.dictionary_id)
            .await
    }
}

/// Concatenates entry lists, keeping only the first entry for each id.
pub fn merge_entries<'a>(
    lists: impl IntoIterator<Item = &'a [DictionaryEntry]>,
) -> Vec<DictionaryEntry> {
    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|entry| seen.insert(entry.id))
        .cloned()
        .collect()
}
