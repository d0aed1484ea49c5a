use thiserror::Error;

pub type Result<T> = std::result::Result<T, EatsError>;

#[derive(Error, Debug)]
pub enum EatsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Index construction failed: {0}")]
    IndexBuild(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod commands;
pub mod config;
pub mod data;
pub mod embeddings;
pub mod geo;
pub mod index;
pub mod recommender;
