//! Model-free embeddings via feature hashing.
//!
//! Each whitespace token contributes itself plus its character bigrams, hashed
//! into a fixed number of signed buckets and L2-normalised. Texts sharing
//! words or syllable pairs (common in Korean place names and categories) end
//! up with high cosine similarity, which is enough for offline use and tests.


use anyhow::{Result, bail};
use std::hash::{DefaultHasher, Hash, Hasher};

use super::Embedder;

pub const DEFAULT_HASHING_DIMENSION: usize = 384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    #[inline]
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            bail!("Hashing embedder dimension must be greater than 0");
        }
        Ok(Self { dimension })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        // DefaultHasher::new() uses fixed keys, so buckets are stable per build
        let mut hasher = DefaultHasher::new();
        feature.hash(&mut hasher);
        let hash = hasher.finish();

        let bucket = (hash % self.dimension as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }

    /// Embed without the `anyhow` wrapper; hashing cannot fail
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimension];

        for token in text.split_whitespace() {
            self.add_feature(&mut vector, token, 1.0);

            let chars: Vec<char> = token.chars().collect();
            for pair in chars.windows(2) {
                let bigram: String = pair.iter().collect();
                self.add_feature(&mut vector, &bigram, 0.5);
            }
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_HASHING_DIMENSION,
        }
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_text(text))
    }

    fn describe(&self) -> String {
        format!("feature hashing ({} dimensions)", self.dimension)
    }
}
