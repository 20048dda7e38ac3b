//! The search-engine boundary the query client talks to.
//!
//! The engine is opened once at process start with the fixed configuration
//! path and then answers one query at a time. It never interprets the
//! rendered result; the client prints it verbatim.

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::SearchError;
use crate::search::{self, BinaryIndexAccessor};

/// Configuration file the client passes to the engine on every run.
pub const CONFIG_PATH: &str = "config.json";

#[derive(Debug)]
pub struct SearchEngine {
    config: EngineConfig,
}

impl SearchEngine {
    /// Load the configuration once; fails if it cannot be read or parsed.
    pub fn open(config_path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let config_path = config_path.as_ref();
        let config = EngineConfig::load(config_path)?;
        debug!(
            config = %config_path.display(),
            ngram_min = config.ngram_min_length,
            ngram_max = config.ngram_max_length,
            "engine ready"
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Execute one query against the named index and render the result.
    ///
    /// Both parameters are optional at the signature level; the engine, not
    /// the caller, rejects absent ones.
    pub fn search(
        &self,
        index_id: Option<&str>,
        query: Option<&str>,
    ) -> Result<String, SearchError> {
        let index_id = index_id.ok_or(SearchError::MissingParameter("index"))?;
        let query = query.ok_or(SearchError::MissingParameter("query"))?;

        let accessor = BinaryIndexAccessor::open(Path::new(index_id))?;
        let started = Instant::now();
        let hits = search::search(&self.config, &accessor, query)?;
        debug!(
            index = index_id,
            hits = hits.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "query complete"
        );
        Ok(search::render_results(&hits))
    }
}
