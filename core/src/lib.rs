//! In-memory ranking of short, possibly misspelled queries against a small
//! labelled catalog.
//!
//! Build a [`CorpusIndex`] once per load, then call [`search`] as often as
//! needed: queries only read the index.

pub mod catalog;
pub mod index;
pub mod query;
pub mod rank;
pub mod similarity;
pub mod tokenizer;
pub mod trigram;
pub mod vector;

pub use catalog::{parse_items_csv, Bin, BinTable, Catalog, CatalogSources};
pub use index::{CorpusIndex, IndexedDocument, Item};
pub use query::{vectorize, QueryVector};
pub use rank::{search, ScoredResult, SearchOptions};
pub use similarity::{cosine, jaccard};
pub use tokenizer::{normalize, tokenize};
pub use trigram::{trigrams, TrigramSet};
pub use vector::{IdfTable, SparseVector};
