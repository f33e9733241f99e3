use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use qboard_core::db::{Database, QuestionStore, SqliteQuestionStore};
use qboard_core::search::{
    find_related, search_page, statistics, suggest_titles, BoardStatistics, RelatedQuestion,
    SearchCriteria, SearchPage, SortMode,
};
use qboard_core::{Question, QuestionId};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;

const DEFAULT_SUGGESTION_LIMIT: usize = 5;
const MAX_SUGGESTION_LIMIT: usize = 20;
const MAX_RELATED_LIMIT: usize = 50;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    database: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, database: Database) -> Self {
        Self {
            config,
            database: Arc::new(Mutex::new(database)),
        }
    }

    /// Run a blocking store operation off the async runtime
    async fn with_store<T, F>(&self, operation: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteQuestionStore<'_>) -> Result<T, AppError> + Send + 'static,
    {
        let database = Arc::clone(&self.database);
        tokio::task::spawn_blocking(move || {
            let database = database
                .lock()
                .map_err(|_| AppError::internal("Database lock poisoned"))?;
            operation(&SqliteQuestionStore::new(database.connection()))
        })
        .await
        .map_err(|error| AppError::internal(format!("Store task failed: {error}")))?
    }

    async fn snapshot(&self) -> Result<Vec<Question>, AppError> {
        self.with_store(|store| Ok(store.snapshot()?)).await
    }
}

pub fn app_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/search", get(search))
        .route("/questions/{id}", get(question))
        .route("/questions/{id}/related", get(related))
        .route("/suggestions", get(suggestions))
        .route("/stats", get(stats));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

/// Lenient integer parsing for query parameters: anything malformed is 0
fn int_param(value: Option<&str>) -> i64 {
    value
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// Positive limit parameter, falling back to `default` and capped at `max`
fn limit_param(value: Option<&str>, default: usize, max: usize) -> usize {
    match usize::try_from(int_param(value)) {
        Ok(0) | Err(_) => default,
        Ok(limit) => limit.min(max),
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    q: Option<String>,
    module: Option<String>,
    user: Option<String>,
    sort: Option<String>,
    page: Option<String>,
}

impl SearchParams {
    fn criteria(&self) -> SearchCriteria {
        SearchCriteria::new(self.q.as_deref().unwrap_or_default().trim())
            .with_module(int_param(self.module.as_deref()))
            .with_author(int_param(self.user.as_deref()))
            .with_sort(SortMode::parse(self.sort.as_deref().unwrap_or_default()))
    }

    fn page(&self) -> i64 {
        self.page.as_deref().map_or(1, |raw| int_param(Some(raw)))
    }
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchPage>, AppError> {
    let criteria = params.criteria();
    let questions = state.snapshot().await?;
    let result = search_page(&questions, &criteria, params.page(), state.config.page_size)?;
    tracing::info!(
        endpoint = "search",
        searched = result.searched,
        total = result.page.total_count,
        page = result.page.current_page,
        "Served search page"
    );
    Ok(Json(result))
}

#[derive(Debug, Serialize)]
struct QuestionDetail {
    #[serde(flatten)]
    question: Question,
    edited: bool,
}

async fn question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<QuestionDetail>, AppError> {
    let id = QuestionId::new(id);
    let question = state
        .with_store(move |store| Ok(store.get(id)?))
        .await?
        .ok_or_else(|| AppError::not_found(format!("question {id}")))?;

    Ok(Json(QuestionDetail {
        edited: question.is_edited(),
        question,
    }))
}

#[derive(Debug, Default, Deserialize)]
struct RelatedParams {
    limit: Option<String>,
}

async fn related(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<Vec<RelatedQuestion>>, AppError> {
    let id = QuestionId::new(id);
    let limit = limit_param(
        params.limit.as_deref(),
        state.config.related_limit,
        MAX_RELATED_LIMIT,
    );

    let questions = state.snapshot().await?;
    let subject = questions
        .iter()
        .find(|question| question.id == id)
        .ok_or_else(|| AppError::not_found(format!("question {id}")))?;

    let related = find_related(&questions, subject, limit)
        .iter()
        .map(RelatedQuestion::from)
        .collect();
    Ok(Json(related))
}

#[derive(Debug, Default, Deserialize)]
struct SuggestionParams {
    q: Option<String>,
    limit: Option<String>,
}

async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<String>>, AppError> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    let limit = limit_param(
        params.limit.as_deref(),
        DEFAULT_SUGGESTION_LIMIT,
        MAX_SUGGESTION_LIMIT,
    );
    let questions = state.snapshot().await?;
    Ok(Json(suggest_titles(&questions, &query, limit)))
}

async fn stats(State(state): State<AppState>) -> Result<Json<BoardStatistics>, AppError> {
    let questions = state.snapshot().await?;
    Ok(Json(statistics(&questions, Utc::now().timestamp_millis())))
}
