//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CONCORD_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_CACHE_BLOB, FETCH_RETRIES};
use crate::reference::FileCorpusProvider;

/// File names expected inside the corpus directory.
pub const CORPUS_QUESTIONS_FILE: &str = "corpus_questions.jsonl";
pub const CORPUS_METADATA_FILE: &str = "corpus_metadata.jsonl";
pub const CORPUS_EMBEDDINGS_FILE: &str = "corpus_embeddings.json";

/// Default vectorization service URL used when `CONCORD_VECTORIZER_URL` is not set.
pub const DEFAULT_VECTORIZER_URL: &str = "http://localhost:8000";

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CONCORD_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the vectorization service. Default: `http://localhost:8000`.
    pub vectorizer_url: String,

    /// Directory for the persisted vector-cache blob. Default: `./.data`.
    pub cache_path: PathBuf,

    /// Blob name the vector cache persists under. Default: `cache_vectors.json`.
    pub cache_blob: String,

    /// Directory holding the reference-corpus files; topic inference is
    /// disabled when unset.
    pub corpus_dir: Option<PathBuf>,

    /// Attempts per vectorization fetch. Default: `3`.
    pub fetch_retries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vectorizer_url: DEFAULT_VECTORIZER_URL.to_string(),
            cache_path: PathBuf::from("./.data"),
            cache_blob: DEFAULT_CACHE_BLOB.to_string(),
            corpus_dir: None,
            fetch_retries: FETCH_RETRIES,
        }
    }
}

impl Config {
    const ENV_VECTORIZER_URL: &'static str = "CONCORD_VECTORIZER_URL";
    const ENV_CACHE_PATH: &'static str = "CONCORD_CACHE_PATH";
    const ENV_CACHE_BLOB: &'static str = "CONCORD_CACHE_BLOB";
    const ENV_CORPUS_DIR: &'static str = "CONCORD_CORPUS_DIR";
    const ENV_FETCH_RETRIES: &'static str = "CONCORD_FETCH_RETRIES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let vectorizer_url =
            Self::parse_string_from_env(Self::ENV_VECTORIZER_URL, defaults.vectorizer_url);
        let cache_path = Self::parse_path_from_env(Self::ENV_CACHE_PATH, defaults.cache_path);
        let cache_blob = Self::parse_string_from_env(Self::ENV_CACHE_BLOB, defaults.cache_blob);
        let corpus_dir = Self::parse_optional_path_from_env(Self::ENV_CORPUS_DIR);
        let fetch_retries = Self::parse_retries_from_env(defaults.fetch_retries)?;

        Ok(Self {
            vectorizer_url,
            cache_path,
            cache_blob,
            corpus_dir,
            fetch_retries,
        })
    }

    /// Validates URLs and paths (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.vectorizer_url.starts_with("http://")
            && !self.vectorizer_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidUrl {
                value: self.vectorizer_url.clone(),
            });
        }

        if self.cache_path.exists() && !self.cache_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.cache_path.clone(),
            });
        }

        if let Some(ref dir) = self.corpus_dir {
            if !dir.exists() {
                return Err(ConfigError::PathNotFound { path: dir.clone() });
            }
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory { path: dir.clone() });
            }
        }

        Ok(())
    }

    /// Builds the corpus provider, if a corpus directory is configured.
    pub fn corpus_provider(&self) -> Option<FileCorpusProvider> {
        self.corpus_dir.as_ref().map(|dir| {
            FileCorpusProvider::new(
                dir.join(CORPUS_QUESTIONS_FILE),
                dir.join(CORPUS_METADATA_FILE),
                dir.join(CORPUS_EMBEDDINGS_FILE),
            )
        })
    }

    fn parse_retries_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_FETCH_RETRIES) {
            Ok(value) => {
                let retries: usize = value
                    .parse()
                    .map_err(|_| ConfigError::InvalidRetries {
                        value: value.clone(),
                    })?;
                if retries == 0 {
                    return Err(ConfigError::InvalidRetries { value });
                }
                Ok(retries)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
