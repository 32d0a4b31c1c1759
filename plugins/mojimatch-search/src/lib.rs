//! Catalog search front end for mojimatch
//!
//! Loads a JSON title catalog and ranks its records against free-form
//! queries typed in romaji, kana, kanji or Latin text.
//!
//! ## Usage
//!
//! ```rust
//! use mojimatch_search::{CatalogEngine, CatalogEntry};
//!
//! let engine = CatalogEngine::new();
//! engine.rebuild_catalog(vec![
//!     CatalogEntry::new(1, "しゃけ"),
//!     CatalogEntry::new(2, "メルト").with_pronunciation("めると"),
//! ]);
//!
//! let (hits, _time_us) = engine.search("shake", Some(5), None);
//! assert_eq!(hits[0].id, 1);
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod logging;

// Re-export main types
pub use catalog::{load_catalog, read_catalog, CatalogEntry, TitleInfo};
pub use config::EngineConfig;
pub use engine::{CatalogEngine, SearchHit};
pub use error::{Error, Result};
pub use highlight::{highlight, render_hit, Markers};
