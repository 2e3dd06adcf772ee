use sortwise_core::rank::{score_document, substring_bonus, CONFIDENCE_THRESHOLD, MAX_RESULTS, SUBSTRING_BONUS, TRIGRAM_WEIGHT};
use sortwise_core::{cosine, jaccard, search, trigrams, vectorize, Catalog, CatalogSources, CorpusIndex, Item, SearchOptions};

fn ids(results: &[sortwise_core::ScoredResult<'_>]) -> Vec<String> {
    results.iter().map(|r| r.document.item.id.clone()).collect()
}

fn sample_catalog() -> Catalog {
    let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");
    let sources = CatalogSources::new(format!("{root}/wastes.csv"), format!("{root}/bins.config.json"));
    Catalog::load(&sources).expect("sample data loads")
}

#[test]
fn empty_query_returns_nothing() {
    let index = CorpusIndex::build(vec![Item::new("1", "Pot", "verre")]);
    assert!(search("", &index, SearchOptions::default()).is_empty());
    assert!(search("   ", &index, SearchOptions { only_confident: true }).is_empty());
}

#[test]
fn alias_substring_wins() {
    let index = CorpusIndex::build(vec![
        Item::new("1", "Boîte de conserve", "metal").with_aliases("conserve;boite metal"),
        Item::new("2", "Pot de yaourt", "plastique").with_aliases("yaourt"),
    ]);
    let results = search("conserve", &index, SearchOptions::default());
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document.item.id, "1");
    assert!(results[0].score > results[1].score);

    let q = vectorize("conserve", index.idf_table()).unwrap();
    let first = &index.documents()[0];
    let expected = 0.7 * cosine(&q.vector, &first.vector) + 0.3 * jaccard(&q.trigrams, &first.trigrams) + SUBSTRING_BONUS;
    assert!((results[0].score - expected).abs() < 1e-6);
}

#[test]
fn unseen_token_falls_back_to_trigrams() {
    let index = CorpusIndex::build(vec![
        Item::new("1", "Bouteille en verre", "verre"),
        Item::new("2", "Bouteille plastique", "plastique"),
        Item::new("3", "Journal", "papier"),
    ]);
    let q = vectorize("boutellle", index.idf_table()).unwrap();
    assert!(q.vector.is_empty());
    for doc in index.documents() {
        assert_eq!(cosine(&q.vector, &doc.vector), 0.0);
        let expected = TRIGRAM_WEIGHT * jaccard(&q.trigrams, &doc.trigrams);
        assert!((score_document(&q, doc) - expected).abs() < 1e-6);
    }
    let results = search("boutellle", &index, SearchOptions::default());
    assert_eq!(results.last().unwrap().document.item.id, "3");
}

#[test]
fn ties_keep_corpus_order() {
    let index = CorpusIndex::build(vec![
        Item::new("b", "Carton", "papier"),
        Item::new("a", "Carton", "papier"),
        Item::new("c", "Verre", "verre"),
    ]);
    let first = search("carton", &index, SearchOptions::default());
    let second = search("carton", &index, SearchOptions::default());
    assert_eq!(ids(&first), vec!["b", "a", "c"]);
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first[0].score, first[1].score);
}

#[test]
fn confident_results_are_an_ordered_subset() {
    let catalog = sample_catalog();
    for query in ["bouteille", "cafe", "pille", "x", "sac"] {
        let all = search(query, &catalog.index, SearchOptions::default());
        let confident = search(query, &catalog.index, SearchOptions { only_confident: true });
        assert!(confident.iter().all(|r| r.score >= CONFIDENCE_THRESHOLD));
        let all_ids = ids(&all);
        let confident_ids = ids(&confident);
        assert_eq!(confident_ids[..], all_ids[..confident_ids.len()], "query {query:?}");
    }
}

#[test]
fn results_are_capped_to_the_best_twenty() {
    let items: Vec<Item> = (0..50)
        .map(|i| Item::new(i.to_string(), format!("widget {}", "x".repeat(i + 1)), "bin"))
        .collect();
    let index = CorpusIndex::build(items);
    let results = search("widget", &index, SearchOptions { only_confident: true });
    assert_eq!(results.len(), MAX_RESULTS);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));

    let q = vectorize("widget", index.idf_table()).unwrap();
    let all: Vec<f32> = index.documents().iter().map(|d| score_document(&q, d)).collect();
    assert!(all.iter().all(|&s| s >= CONFIDENCE_THRESHOLD));
    let returned: Vec<usize> = results.iter().map(|r| r.document.item.id.parse().unwrap()).collect();
    let cutoff = results.last().unwrap().score;
    for (pos, score) in all.iter().enumerate() {
        if !returned.contains(&pos) {
            assert!(*score <= cutoff);
        }
    }
}

#[test]
fn typos_still_find_the_item() {
    let catalog = sample_catalog();
    let top = |q: &str| search(q, &catalog.index, SearchOptions::default())[0].document.item.name.clone();
    assert_eq!(top("canette"), "Canette");
    assert_eq!(top("yaourt"), "Pot de yaourt");
    assert_eq!(top("journl"), "Journal");
    assert_eq!(top("Épluchures"), "Épluchures de légumes");
}

#[test]
fn sample_catalog_resolves_bins() {
    let catalog = sample_catalog();
    assert_eq!(catalog.index.len(), 21);
    let unconfigured: Vec<&str> = catalog.unconfigured().map(|i| i.name.as_str()).collect();
    assert_eq!(unconfigured, vec!["Capsule de café"]);
    let can = catalog.index.documents().iter().find(|d| d.item.name == "Canette").unwrap();
    assert_eq!(can.bin.as_ref().unwrap().label, "Bac jaune");
}

#[test]
fn trigram_sets_are_precomputed_from_text() {
    let index = CorpusIndex::build(vec![Item::new("1", "Pile", "d").with_aliases("piles;batterie")]);
    let doc = &index.documents()[0];
    assert_eq!(doc.text, "Pile piles;batterie");
    assert_eq!(doc.trigrams, trigrams(&doc.text));
}

#[test]
fn bonus_compares_against_lowercased_not_normalized_text() {
    let index = CorpusIndex::build(vec![
        Item::new("1", "Boîte à chaussures", "papier"),
        Item::new("2", "Conserve", "metal").with_aliases("boite metal"),
    ]);
    let q = vectorize("boite", index.idf_table()).unwrap();
    assert_eq!(substring_bonus(&q.normalized, &index.documents()[0]), 0.0);
    assert_eq!(substring_bonus(&q.normalized, &index.documents()[1]), SUBSTRING_BONUS);

    let accented = vectorize("Boîte", index.idf_table()).unwrap();
    assert_eq!(accented.normalized, "boite");
    assert_eq!(substring_bonus(&accented.normalized, &index.documents()[0]), 0.0);
}
