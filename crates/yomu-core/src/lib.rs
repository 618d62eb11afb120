pub mod backend;
pub mod cache;
pub mod candidates;
pub mod error;
pub mod key;
pub mod lexeme_index;
pub mod lookup;
pub mod pipeline;
pub mod resolver;

pub use backend::{DictionaryBackend, TokenizerClient};
pub use cache::{CacheStats, FailurePolicy, KeyedResourceCache, SlotState};
pub use candidates::CandidateSet;
pub use error::{FetchError, KeyError, LookupError};
pub use key::{QueryKey, Resource};
pub use lexeme_index::{LexemeIndex, LexemeIndexCache, SequenceId, TokenizedSentence};
pub use lookup::{DictionaryLookupService, merge_entries};
pub use pipeline::{LookupPipeline, PipelineOutput};
pub use resolver::ExpressionResolver;
