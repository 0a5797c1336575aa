//! mushaf is a library for retrieving Quranic text by hierarchical index.
//! Given an inclusive range of four-level indexes (sura, verse, word,
//! letterblock) it walks the corpus in document order and yields each unit
//! in four parallel shapes: Arabic and Latin graphemic representations and
//! Arabic and Latin archigraphemic (skeleton) representations.

// Module declarations
pub mod error;
pub mod types;
pub mod config;
pub mod corpus;
pub mod script;
pub mod address;
pub mod walker;

// Re-exports
pub use error::{Error, Result};
pub use types::{Index, IndexField, ParsedIndex, Record, RecordIndex, Source};
pub use corpus::Mushaf;
pub use walker::{walk, WalkOptions};

// Re-export the config from config module
pub use config::MushafConfig;
