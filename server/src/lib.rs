use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sortwise_core::{Bin, Catalog, CatalogSources, IndexedDocument, SearchOptions};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod render;

/// Items shown on the card page before anything is typed.
const FEATURED: usize = 5;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// Only keep matches above the confidence threshold.
    #[serde(default)]
    pub confident: bool,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub item: ItemView,
    pub score: f32,
}

#[derive(Serialize)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub notes: Option<String>,
    pub bin: Option<Bin>,
}

impl From<&IndexedDocument> for ItemView {
    fn from(doc: &IndexedDocument) -> Self {
        Self {
            id: doc.item.id.clone(),
            name: doc.item.name.clone(),
            aliases: doc.item.alias_list().into_iter().map(str::to_string).collect(),
            notes: doc.item.notes.clone(),
            bin: doc.bin.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub vocabulary: usize,
    pub num_bins: usize,
    pub unconfigured: usize,
    pub loaded_at: String,
}

/// A catalog together with the time it was loaded.
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub loaded_at: String,
}

impl LoadedCatalog {
    fn load(sources: &CatalogSources) -> Result<Self> {
        let catalog = Catalog::load(sources)?;
        let loaded_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        Ok(Self { catalog, loaded_at })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sources: CatalogSources,
    /// Swapped wholesale on reload; readers clone the inner `Arc` and release the lock.
    pub catalog: Arc<RwLock<Arc<LoadedCatalog>>>,
    pub admin_token: Option<String>,
}

impl AppState {
    fn current(&self) -> Arc<LoadedCatalog> {
        self.catalog.read().clone()
    }
}

/// Build the router, reading the admin token from `ADMIN_TOKEN`.
pub fn build_app(sources: CatalogSources) -> Result<Router> {
    build_app_with_token(sources, std::env::var("ADMIN_TOKEN").ok())
}

pub fn build_app_with_token(sources: CatalogSources, admin_token: Option<String>) -> Result<Router> {
    // Load the catalog at startup
    let loaded = LoadedCatalog::load(&sources)?;
    // an empty token would let header-less requests through
    let admin_token = admin_token.filter(|t| !t.is_empty());
    let app_state = AppState { sources, catalog: Arc::new(RwLock::new(Arc::new(loaded))), admin_token };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/cards", get(cards_handler))
        .route("/items/:id", get(item_handler))
        .route("/bins", get(bins_handler))
        .route("/stats", get(stats_handler))
        .route("/reload", post(reload_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let loaded = state.current();
    let results = loaded
        .catalog
        .index
        .search(&params.q, SearchOptions { only_confident: params.confident });
    let results: Vec<SearchHit> = results
        .iter()
        .map(|r| SearchHit { item: ItemView::from(r.document), score: r.score })
        .collect();
    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits: results.len(), results })
}

pub async fn cards_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Html<String> {
    let loaded = state.current();
    let index = &loaded.catalog.index;
    if params.q.trim().is_empty() {
        return Html(render::render_featured(index.featured(FEATURED)));
    }
    let results = index.search(&params.q, SearchOptions { only_confident: params.confident });
    Html(render::render_results(&params.q, &results))
}

pub async fn item_handler(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ItemView>, (StatusCode, String)> {
    let loaded = state.current();
    match loaded.catalog.index.document(&id) {
        Some(doc) => Ok(Json(ItemView::from(doc))),
        None => Err((StatusCode::NOT_FOUND, format!("no item with id {id}"))),
    }
}

pub async fn bins_handler(State(state): State<AppState>) -> Json<Vec<Bin>> {
    let loaded = state.current();
    Json(loaded.catalog.bins.iter().cloned().collect())
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let loaded = state.current();
    let catalog = &loaded.catalog;
    Json(StatsResponse {
        num_docs: catalog.index.len(),
        vocabulary: catalog.index.vocabulary_len(),
        num_bins: catalog.bins.len(),
        unconfigured: catalog.unconfigured().count(),
        loaded_at: loaded.loaded_at.clone(),
    })
}

/// Re-read the source files and swap in a freshly built catalog.
///
/// On failure the catalog in service is left untouched.
async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let loaded = LoadedCatalog::load(&state.sources).map_err(|e| {
        tracing::warn!(error = %format!("{e:#}"), "reload failed, keeping previous catalog");
        (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
    })?;
    let num_docs = loaded.catalog.index.len();
    let loaded_at = loaded.loaded_at.clone();
    *state.catalog.write() = Arc::new(loaded);
    tracing::info!(num_docs, "catalog reloaded");
    Ok(Json(serde_json::json!({ "num_docs": num_docs, "loaded_at": loaded_at })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) if !t.is_empty() => t,
        _ => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
