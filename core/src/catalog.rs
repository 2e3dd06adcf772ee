//! Loading items and bins from their source files.

use crate::index::{non_empty, CorpusIndex, Item};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A disposal bin: display label, badge colours and an optional note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub id: String,
    pub label: String,
    pub hex: String,
    pub text_hex: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Bin {
    pub fn new(id: impl Into<String>, label: impl Into<String>, hex: impl Into<String>, text_hex: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), hex: hex.into(), text_hex: text_hex.into(), notes: None }
    }
}

#[derive(Deserialize)]
struct BinsFile {
    bins: Vec<Bin>,
}

/// Bins keyed by id, iterated in file order.
#[derive(Debug, Clone, Default)]
pub struct BinTable {
    bins: Vec<Bin>,
    by_id: HashMap<String, usize>,
}

impl BinTable {
    pub fn new(bins: Vec<Bin>) -> Self {
        let by_id = bins.iter().enumerate().map(|(pos, b)| (b.id.clone(), pos)).collect();
        Self { bins, by_id }
    }

    /// Parse `{"bins": [...]}`.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: BinsFile = serde_json::from_str(text)?;
        Ok(Self::new(file.bins))
    }

    pub fn get(&self, id: &str) -> Option<&Bin> {
        self.by_id.get(id).map(|&pos| &self.bins[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bin> {
        self.bins.iter()
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Parse the items table: a header row, then one comma-separated row per item.
///
/// Fields are never quoted, so a plain split on `,` is enough. Columns are
/// looked up by header name, cells are trimmed and missing cells read as empty. Without an `id`
/// column (or with an empty cell) the 1-based row number is used.
pub fn parse_items_csv(text: &str) -> Vec<Item> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r')).filter(|l| !l.trim().is_empty());
    let header: Vec<&str> = match lines.next() {
        Some(h) => h.split(',').map(str::trim).collect(),
        None => return Vec::new(),
    };
    let column = |name: &str| header.iter().position(|h| *h == name);
    let (id_col, name_col, aliases_col, notes_col, bin_col) =
        (column("id"), column("name"), column("aliases"), column("notes"), column("bin"));

    lines
        .enumerate()
        .map(|(row, line)| {
            let cells: Vec<&str> = line.split(',').collect();
            let cell = |col: Option<usize>| col.and_then(|c| cells.get(c)).map(|s| s.trim().to_string()).unwrap_or_default();
            let id = non_empty(cell(id_col)).unwrap_or_else(|| (row + 1).to_string());
            Item {
                id,
                name: cell(name_col),
                aliases: non_empty(cell(aliases_col)),
                notes: non_empty(cell(notes_col)),
                bin: cell(bin_col),
            }
        })
        .collect()
}

/// Where a catalog is loaded from.
#[derive(Debug, Clone)]
pub struct CatalogSources {
    pub items: PathBuf,
    pub bins: PathBuf,
}

impl CatalogSources {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(items: P, bins: Q) -> Self {
        Self { items: items.as_ref().to_path_buf(), bins: bins.as_ref().to_path_buf() }
    }
}

/// Everything one load cycle produces: the bin table and the index built over the items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub bins: BinTable,
    pub index: CorpusIndex,
}

impl Catalog {
    pub fn from_parts(items: Vec<Item>, bins: BinTable) -> Self {
        let index = CorpusIndex::build_with_bins(items, &bins);
        Self { bins, index }
    }

    pub fn load(sources: &CatalogSources) -> Result<Self> {
        let csv = fs::read_to_string(&sources.items)
            .with_context(|| format!("reading items from {}", sources.items.display()))?;
        let json = fs::read_to_string(&sources.bins)
            .with_context(|| format!("reading bins from {}", sources.bins.display()))?;
        let bins = BinTable::from_json(&json)
            .with_context(|| format!("parsing bins from {}", sources.bins.display()))?;
        let items = parse_items_csv(&csv);
        let catalog = Self::from_parts(items, bins);
        tracing::info!(
            num_docs = catalog.index.len(),
            num_terms = catalog.index.vocabulary_len(),
            num_bins = catalog.bins.len(),
            unconfigured = catalog.unconfigured().count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Items whose bin id has no entry in the bin table.
    pub fn unconfigured(&self) -> impl Iterator<Item = &Item> {
        self.index.documents().iter().filter(|d| d.bin.is_none()).map(|d| &d.item)
    }
}
