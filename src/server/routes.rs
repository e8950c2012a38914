//! API routes
//!
//! Every body is JSON. Successes carry `success: true` plus a `data` payload;
//! failures are rendered by [`ApiError`].

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use super::SharedState;
use super::error::ApiError;
use crate::templates::Bindings;

type ApiResult = Result<Json<Value>, ApiError>;

/// Entries returned by `/api/history` when no limit is given
const DEFAULT_HISTORY_LIMIT: usize = 5;

// ============================================================================
// Health
// ============================================================================

pub fn health_routes() -> Router<SharedState> {
    Router::new().route("/api/health", get(health_check))
}

async fn health_check(State(state): State<SharedState>) -> Json<Value> {
    let assistant = state.assistant.lock().await;
    let mode = assistant.store_mode();

    Json(json!({
        "status": if mode.is_persistent() { "healthy" } else { "degraded" },
        "flags": {
            "persistent_store": mode.is_persistent(),
            "history_file": assistant.history().path().is_some(),
            "store_mode": mode.as_str(),
        },
        "timestamp": Local::now().to_rfc3339(),
        "uptime_seconds": state.start_time.elapsed().as_secs(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ============================================================================
// Quick responses
// ============================================================================

pub fn response_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/responses", get(list_responses))
        .route("/api/search", get(search_responses))
        .route("/api/categories", get(list_categories))
        .route("/api/copy", post(copy_response))
        .route("/api/response/add", post(add_response))
}

async fn list_responses(State(state): State<SharedState>) -> ApiResult {
    let assistant = state.assistant.lock().await;
    let responses = assistant.responses();

    Ok(Json(json!({
        "success": true,
        "data": serde_json::to_value(responses)?,
        "count": responses.len(),
        "mode": assistant.store_mode().as_str(),
    })))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search_responses(
    State(state): State<SharedState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult {
    let Query(params) = params.map_err(|_| ApiError::invalid_query())?;
    let assistant = state.assistant.lock().await;
    let query = params.q.unwrap_or_default();

    if query.is_empty() {
        let responses = assistant.responses();
        return Ok(Json(json!({
            "success": true,
            "data": serde_json::to_value(responses)?,
            "count": responses.len(),
        })));
    }

    let results = assistant.search(&query);
    debug!("Search '{}' matched {} responses", query, results.len());
    Ok(Json(json!({
        "success": true,
        "data": serde_json::to_value(&results)?,
        "count": results.len(),
        "query": query,
    })))
}

async fn list_categories(State(state): State<SharedState>) -> ApiResult {
    let categories = state.assistant.lock().await.categories();
    Ok(Json(json!({
        "success": true,
        "count": categories.len(),
        "data": categories,
    })))
}

#[derive(Debug, Deserialize)]
struct CopyRequest {
    key: Option<String>,
}

async fn copy_response(
    State(state): State<SharedState>,
    payload: Result<Json<CopyRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload.map_err(|_| ApiError::invalid_json())?;
    let key = req
        .key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::bad_request("Chave da resposta não fornecida"))?;

    let mut assistant = state.assistant.lock().await;
    let response = assistant
        .get_response(&key)
        .ok_or_else(|| ApiError::not_found(format!("Resposta \"{}\" não encontrada", key)))?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "message": response.message,
            "key": key,
            "category": response.category,
        },
    })))
}

#[derive(Debug, Deserialize)]
struct AddRequest {
    key: Option<String>,
    message: Option<String>,
    category: Option<String>,
}

async fn add_response(
    State(state): State<SharedState>,
    payload: Result<Json<AddRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload.map_err(|_| ApiError::invalid_json())?;

    let (key, message) = match (req.key, req.message) {
        (Some(key), Some(message)) if !key.trim().is_empty() && !message.trim().is_empty() => {
            (key, message)
        }
        _ => return Err(ApiError::bad_request("Chave e mensagem são obrigatórias")),
    };
    let category = req.category.unwrap_or_default();

    // Duplicate check, insert and persist all happen under this one lock
    let mut assistant = state.assistant.lock().await;
    let added = assistant.add_response(&key, &message, &category)?;
    info!("API added response '{}'", key.trim());

    Ok(Json(json!({
        "success": true,
        "data": {
            "key": key.trim(),
            "message": added.message,
            "category": added.category,
        },
        "message": "Resposta adicionada com sucesso",
    })))
}

// ============================================================================
// Templates
// ============================================================================

pub fn template_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/templates", get(list_templates))
        .route("/api/template/generate", post(generate_template))
}

async fn list_templates(State(state): State<SharedState>) -> ApiResult {
    let assistant = state.assistant.lock().await;
    let templates: Map<String, Value> = assistant
        .templates()
        .templates()
        .iter()
        .map(|t| (t.name().to_string(), Value::String(t.pattern().to_string())))
        .collect();

    Ok(Json(json!({
        "success": true,
        "count": templates.len(),
        "data": templates,
    })))
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    template: Option<String>,
    #[serde(default)]
    fields: HashMap<String, Value>,
}

async fn generate_template(
    State(state): State<SharedState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult {
    let Json(req) = payload.map_err(|_| ApiError::invalid_json())?;
    let name = req
        .template
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Template não fornecido"))?;
    let bindings = bindings_from_json(req.fields);

    let assistant = state.assistant.lock().await;
    let message = assistant.fill_template(&name, &bindings)?;

    Ok(Json(json!({
        "success": true,
        "data": { "template": name, "message": message },
    })))
}

/// Strings bind as-is, other scalars by their JSON text; nulls count as missing
fn bindings_from_json(fields: HashMap<String, Value>) -> Bindings {
    fields
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((name, s)),
            other => Some((name, other.to_string())),
        })
        .collect()
}

// ============================================================================
// History
// ============================================================================

pub fn history_routes() -> Router<SharedState> {
    Router::new().route("/api/history", get(recent_history))
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    limit: Option<usize>,
}

async fn recent_history(
    State(state): State<SharedState>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> ApiResult {
    let Query(params) = params.map_err(|_| ApiError::invalid_query())?;
    let assistant = state.assistant.lock().await;
    let entries = assistant.recent_history(params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT));

    Ok(Json(json!({
        "success": true,
        "count": entries.len(),
        "data": serde_json::to_value(&entries)?,
    })))
}
