pub mod analysis;
pub mod args;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod index;
pub mod logging;
pub mod search;

pub use args::ArgMap;
pub use config::EngineConfig;
pub use engine::{SearchEngine, CONFIG_PATH};
pub use error::{ArgError, ConfigError, IndexError, SearchError};
pub use index::{BinaryIndexWriter, Index, IndexBuilder, TextIndexWriter};
pub use search::{
    BinaryIndexAccessor, IndexAccessor, SearchHit, TextIndexAccessor, render_results,
};
