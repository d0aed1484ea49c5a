// Embeddings module
// Text embedding backends used to build and query the vector index

pub mod hashing;
pub mod ollama;

use anyhow::Result;

use crate::config::{Config, EmbeddingProvider};

pub use hashing::HashingEmbedder;
pub use ollama::{EmbeddingResult, OllamaClient};

/// Turns text into embedding vectors.
///
/// Implementations must be deterministic for a fixed model and input, and safe
/// to call from several threads at once so a built index can be shared.
pub trait Embedder: Send + Sync {
    /// Embed a single text
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, returning one vector per input in input order
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}

/// Create the embedder selected by the configuration
#[inline]
pub fn embedder_from_config(config: &Config) -> Result<Box<dyn Embedder>> {
    match config.embedding.provider {
        EmbeddingProvider::Ollama => Ok(Box::new(OllamaClient::new(&config.ollama)?)),
        EmbeddingProvider::Hashing => Ok(Box::new(HashingEmbedder::new(
            config.embedding.hashing_dimension,
        )?)),
    }
}
