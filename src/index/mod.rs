// In-memory vector index
// Exact cosine search over one embedding per restaurant document


use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::embeddings::Embedder;
use crate::recommender::document::IndexedDocument;
use crate::{EatsError, Result};

/// Documents embedded per call while building the index
const BUILD_BATCH_SIZE: usize = 64;

/// Read-only embedding index built once from all documents
pub struct VectorIndex {
    documents: Vec<IndexedDocument>,
    vectors: Vec<Vec<f32>>,
    dimension: Option<usize>,
    embedder: Box<dyn Embedder>,
}

/// Retrieval hit with its cosine similarity to the query
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub document: &'a IndexedDocument,
    pub similarity_score: f32,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("documents", &self.documents.len())
            .field("dimension", &self.dimension)
            .field("embedder", &self.embedder.describe())
            .finish()
    }
}

impl VectorIndex {
    /// Embed every document's content and build the index.
    ///
    /// Fails without exposing a partial index when the embedder errors,
    /// returns the wrong number of vectors, or returns vectors of differing
    /// dimensions.
    #[inline]
    pub fn build(documents: Vec<IndexedDocument>, embedder: Box<dyn Embedder>) -> Result<Self> {
        info!(
            "Building vector index for {} documents with {}",
            documents.len(),
            embedder.describe()
        );

        let bar = if console::user_attended_stderr() {
            ProgressBar::new(documents.len() as u64).with_style(
                ProgressStyle::with_template("{spinner} [{pos}/{len}] Embedding restaurants")
                    .map_err(|e| EatsError::IndexBuild(format!("Invalid progress style: {e}")))?,
            )
        } else {
            ProgressBar::hidden()
        };

        let mut vectors = Vec::with_capacity(documents.len());
        for batch in documents.chunks(BUILD_BATCH_SIZE) {
            let texts: Vec<String> = batch.iter().map(|doc| doc.content.clone()).collect();
            let embedded = embedder.embed_batch(&texts).map_err(|e| {
                EatsError::IndexBuild(format!("Failed to embed documents: {e:#}"))
            })?;

            if embedded.len() != batch.len() {
                return Err(EatsError::IndexBuild(format!(
                    "Embedder returned {} vectors for {} documents",
                    embedded.len(),
                    batch.len()
                )));
            }

            vectors.extend(embedded);
            bar.inc(batch.len() as u64);
        }
        bar.finish_and_clear();

        let dimension = vectors.first().map(Vec::len);
        if let Some(dim) = dimension {
            if dim == 0 {
                return Err(EatsError::IndexBuild(
                    "Embedder returned empty vectors".to_string(),
                ));
            }
            if let Some(position) = vectors.iter().position(|v| v.len() != dim) {
                return Err(EatsError::IndexBuild(format!(
                    "Inconsistent embedding dimension for document {}: expected {}, got {}",
                    position,
                    dim,
                    vectors[position].len()
                )));
            }
        }

        info!(
            "Vector index ready: {} documents, dimension {:?}",
            documents.len(),
            dimension
        );

        Ok(Self {
            documents,
            vectors,
            dimension,
            embedder,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[inline]
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    #[inline]
    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }

    /// Up to `k` documents ranked by decreasing similarity, with scores.
    ///
    /// Ties keep index order. An empty index answers without embedding the
    /// query.
    #[inline]
    pub fn search_similar(&self, query: &str, k: usize) -> Result<Vec<SearchHit<'_>>> {
        let Some(dimension) = self.dimension else {
            debug!("Index is empty, skipping query embedding");
            return Ok(Vec::new());
        };
        if k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self
            .embedder
            .embed(query)
            .map_err(|e| EatsError::Retrieval(format!("Failed to embed query: {e:#}")))?;

        if query_vector.len() != dimension {
            return Err(EatsError::Retrieval(format!(
                "Query embedding has dimension {}, index expects {}",
                query_vector.len(),
                dimension
            )));
        }

        let mut hits: Vec<SearchHit<'_>> = self
            .documents
            .iter()
            .zip(&self.vectors)
            .map(|(document, vector)| SearchHit {
                document,
                similarity_score: finite_or_lowest(cosine_similarity(&query_vector, vector)),
            })
            .collect();

        // Stable sort keeps index order among equal scores
        hits.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
        hits.truncate(k);

        debug!("Retrieved {} of {} documents", hits.len(), self.len());
        Ok(hits)
    }

    /// Up to `k` documents ranked by decreasing similarity to `query`
    #[inline]
    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<&IndexedDocument>> {
        Ok(self
            .search_similar(query, k)?
            .into_iter()
            .map(|hit| hit.document)
            .collect())
    }
}

// NaN or infinite scores from a misbehaving embedder rank last
fn finite_or_lowest(score: f32) -> f32 {
    if score.is_finite() {
        score
    } else {
        f32::NEG_INFINITY
    }
}

/// Cosine similarity (normalized dot product); zero vectors score 0
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
