use std::path::PathBuf;

use thiserror::Error;

use crate::recipe::RecipeId;

/// Failures starting a run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("recipe {0} has no steps")]
    InvalidRecipe(RecipeId),
}

/// Failures reading or writing the recipe file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed recipe file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no recipe with id {0}")]
    UnknownRecipe(RecipeId),

    #[error("recipe \"{0}\" has no steps with a description")]
    EmptyRecipe(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level error reported by `main`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("session I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
