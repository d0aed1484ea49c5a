// Recommendation pipeline
// Expansion, vector retrieval, category/location filtering, response text

pub mod document;
pub mod expansion;
pub mod filter;
pub mod response;


use tracing::{debug, info};

use crate::Result;
use crate::config::RecommenderConfig;
use crate::data::RestaurantRecord;
use crate::embeddings::Embedder;
use crate::index::VectorIndex;

pub use document::{DocumentMetadata, IndexedDocument, build_documents, extract_location_keywords};
pub use expansion::expand_query;
pub use filter::{filter_by_category, filter_by_location};
pub use response::{NO_MATCH_MESSAGE, compose_response};

/// Returned when vector retrieval yields no candidates at all
pub const NO_RETRIEVAL_MESSAGE: &str =
    "관련된 음식점을 찾을 수 없습니다. 다른 검색어로 시도해보세요.";

/// Restaurant recommender over an immutable vector index.
///
/// `search` only borrows `self`, so one instance can serve several threads.
#[derive(Debug)]
pub struct Recommender {
    index: VectorIndex,
    settings: RecommenderConfig,
}

impl Recommender {
    /// Build documents from the records and index them with `embedder`
    #[inline]
    pub fn build(
        records: &[RestaurantRecord],
        embedder: Box<dyn Embedder>,
        settings: RecommenderConfig,
    ) -> Result<Self> {
        let documents = build_documents(records);
        let index = VectorIndex::build(documents, embedder)?;
        Ok(Self::from_index(index, settings))
    }

    #[inline]
    pub fn from_index(index: VectorIndex, settings: RecommenderConfig) -> Self {
        Self { index, settings }
    }

    #[inline]
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// Answer a free-text query with formatted recommendations.
    ///
    /// Only the embedding step can fail; "nothing found" is reported in the
    /// returned text.
    #[inline]
    pub fn search(&self, query: &str) -> Result<String> {
        info!("Searching restaurants for {:?}", query);

        let expanded = expand_query(query);
        let retrieved = self.index.retrieve(&expanded, self.settings.retrieval_k)?;
        debug!("Retrieved {} candidates", retrieved.len());

        if retrieved.is_empty() {
            return Ok(NO_RETRIEVAL_MESSAGE.to_string());
        }

        let by_category = filter_by_category(&retrieved, query, self.settings.filter_limit);
        debug!("{} candidates after category filter", by_category.len());

        let by_location = filter_by_location(&by_category, query, self.settings.filter_limit);
        debug!("{} candidates after location filter", by_location.len());

        Ok(compose_response(
            query,
            &by_location,
            self.settings.max_recommendations,
        ))
    }
}
