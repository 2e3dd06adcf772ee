use crate::catalog::{Bin, BinTable};
use crate::tokenizer::tokenize;
use crate::trigram::{trigrams, TrigramSet};
use crate::vector::{IdfTable, SparseVector};
use std::collections::{HashMap, HashSet};

/// One row of the source data, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Semicolon-delimited synonyms, as found in the source.
    pub aliases: Option<String>,
    pub notes: Option<String>,
    /// Key into the bin table.
    pub bin: String,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, bin: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), bin: bin.into(), ..Self::default() }
    }

    pub fn with_aliases(mut self, aliases: impl Into<String>) -> Self {
        self.aliases = non_empty(aliases.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = non_empty(notes.into());
        self
    }

    /// Aliases split on `;`, trimmed, blanks dropped.
    pub fn alias_list(&self) -> Vec<&str> {
        self.aliases
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect()
    }

    /// Name, aliases and notes (those present) joined with single spaces.
    pub fn searchable_text(&self) -> String {
        [Some(self.name.as_str()), self.aliases.as_deref(), self.notes.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub(crate) fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

/// An item with everything the ranker needs precomputed.
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub item: Item,
    /// `None` when the item's bin id is not in the bin table.
    pub bin: Option<Bin>,
    pub text: String,
    pub tokens: Vec<String>,
    pub trigrams: TrigramSet,
    pub vector: SparseVector,
}

impl IndexedDocument {
    fn analyze(item: Item, bin: Option<Bin>) -> Self {
        let text = item.searchable_text();
        let tokens = tokenize(&text);
        let trigrams = trigrams(&text);
        Self { item, bin, text, tokens, trigrams, vector: SparseVector::default() }
    }
}

/// Immutable TF-IDF index over one load of the corpus.
///
/// Built once, then only read; a reload builds a new index and replaces the
/// old one wholesale.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    documents: Vec<IndexedDocument>,
    df: HashMap<String, u32>,
    idf: IdfTable,
    by_id: HashMap<String, usize>,
}

impl CorpusIndex {
    /// Index `items` without bin information.
    pub fn build(items: Vec<Item>) -> Self {
        Self::build_with_bins(items, &BinTable::default())
    }

    /// Index `items`, resolving each item's bin through `bins`.
    pub fn build_with_bins(items: Vec<Item>, bins: &BinTable) -> Self {
        let mut documents: Vec<IndexedDocument> = items
            .into_iter()
            .map(|item| {
                let bin = bins.get(&item.bin).cloned();
                if bin.is_none() && !bins.is_empty() {
                    tracing::warn!(item = %item.id, bin = %item.bin, "item references an unknown bin");
                }
                IndexedDocument::analyze(item, bin)
            })
            .collect();

        // Document frequency counts each document once per distinct token.
        let mut df: HashMap<String, u32> = HashMap::new();
        for doc in &documents {
            let unique: HashSet<&str> = doc.tokens.iter().map(String::as_str).collect();
            for token in unique {
                *df.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f32;
        let idf: IdfTable = df
            .iter()
            .map(|(term, &df_t)| (term.clone(), (1.0 + n / (1.0 + df_t as f32)).ln()))
            .collect();

        for doc in documents.iter_mut() {
            doc.vector = SparseVector::from_tokens(&doc.tokens, &idf);
        }

        let mut by_id = HashMap::with_capacity(documents.len());
        for (pos, doc) in documents.iter().enumerate() {
            if by_id.insert(doc.item.id.clone(), pos).is_some() {
                tracing::warn!(item = %doc.item.id, "duplicate item id, lookups return the later row");
            }
        }

        tracing::debug!(num_docs = documents.len(), num_terms = df.len(), "corpus indexed");
        Self { documents, df, idf, by_id }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in corpus order.
    pub fn documents(&self) -> &[IndexedDocument] {
        &self.documents
    }

    pub fn document(&self, id: &str) -> Option<&IndexedDocument> {
        self.by_id.get(id).map(|&pos| &self.documents[pos])
    }

    /// The first `n` documents, shown before anything is typed.
    pub fn featured(&self, n: usize) -> &[IndexedDocument] {
        &self.documents[..n.min(self.documents.len())]
    }

    pub fn idf_table(&self) -> &IdfTable {
        &self.idf
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.idf.get(term).copied()
    }

    pub fn document_frequency(&self, term: &str) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.df.len()
    }

    /// Terms sorted by descending document frequency, ties alphabetical.
    pub fn most_common_terms(&self, n: usize) -> Vec<(&str, u32)> {
        let mut terms: Vec<(&str, u32)> = self.df.iter().map(|(t, &d)| (t.as_str(), d)).collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms.truncate(n);
        terms
    }
}
