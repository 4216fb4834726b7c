//! API routes and handlers for the Rate Service
//!
//! Provides rate set management (list, bulk replace, single fetch/delete)
//! and the interval price lookup endpoint.

#![allow(clippy::disallowed_methods)] // json! macro used in multiple functions

use crate::app::AppState;
use crate::error::RatesrvError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::DateTime;
use rate_rules::{price_for, validate, RateRepr, RawRateInput};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use utoipa::OpenApi;

/// Create all API routes with state
pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Rate set management
        .route("/api/rates", get(list_rates).put(replace_rates))
        .route("/api/rates/{id}", get(get_rate).delete(delete_rate))
        // Price lookup
        .route("/api/price", get(get_price))
        // HTTP request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    paths(list_rates, replace_rates, get_rate, delete_rate, get_price),
    tags(
        (name = "ratesrv", description = "Rate set management and price lookup")
    )
)]
pub struct ApiDoc;

// ============================================================================
// Request Shapes
// ============================================================================

/// Bulk replace request body
#[derive(Debug, Deserialize)]
pub struct RatesBody {
    rates: Vec<RawRateInput>,
}

/// Price lookup query parameters
#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    start_dt: String,
    end_dt: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": state.config.service.name,
        "rates": state.store.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// List all rates in insertion order
#[utoipa::path(
    get,
    path = "/api/rates",
    responses(
        (status = 200, description = "Full rate set", body = serde_json::Value)
    ),
    tag = "ratesrv"
)]
pub async fn list_rates(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let rates: Vec<RateRepr> = state.store.list().iter().map(|rule| rule.repr()).collect();
    Json(json!({ "rates": rates }))
}

/// Replace the current rate set with a new one.
///
/// Every entry is validated before any mutation; a single invalid entry
/// rejects the whole batch and leaves the store unchanged.
#[utoipa::path(
    put,
    path = "/api/rates",
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "New rate set with assigned ids", body = serde_json::Value),
        (status = 400, description = "A batch entry failed validation")
    ),
    tag = "ratesrv"
)]
pub async fn replace_rates(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RatesBody>,
) -> Result<Response, RatesrvError> {
    // Validate all entries before touching the store
    let mut drafts = Vec::with_capacity(body.rates.len());
    for raw in &body.rates {
        match validate(raw) {
            Ok(draft) => drafts.push(draft),
            Err(e) => {
                warn!("Rejecting rate batch: {}", e);
                return Err(e.into());
            }
        }
    }

    let created = state.store.replace_all(drafts);
    info!("Replaced rate set with {} rules", created.len());

    let rates: Vec<RateRepr> = created.iter().map(|rule| rule.repr()).collect();
    Ok((StatusCode::CREATED, Json(json!({ "rates": rates }))).into_response())
}

/// Get a single rate by id
#[utoipa::path(
    get,
    path = "/api/rates/{id}",
    params(("id" = u64, Path, description = "Rate identifier")),
    responses(
        (status = 200, description = "Rate details", body = serde_json::Value),
        (status = 404, description = "No rate with that id")
    ),
    tag = "ratesrv"
)]
pub async fn get_rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<RateRepr>, RatesrvError> {
    match state.store.get(id) {
        Some(rule) => Ok(Json(rule.repr())),
        None => Err(RatesrvError::RateNotFound(id)),
    }
}

/// Delete a rate by id
#[utoipa::path(
    delete,
    path = "/api/rates/{id}",
    params(("id" = u64, Path, description = "Rate identifier")),
    responses(
        (status = 200, description = "Rate deleted", body = serde_json::Value),
        (status = 404, description = "No rate with that id")
    ),
    tag = "ratesrv"
)]
pub async fn delete_rate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, RatesrvError> {
    state
        .store
        .delete(id)
        .map_err(|_| RatesrvError::RateNotFound(id))?;

    info!("Deleted rate: {}", id);
    Ok(Json(json!({ "id": id, "status": "OK" })))
}

/// Price lookup for an absolute time interval.
///
/// Returns the unique applicable price, or 404 "unavailable" when no rule
/// matches, several rules match, or the interval crosses a local calendar
/// day in any rule's timezone.
#[utoipa::path(
    get,
    path = "/api/price",
    params(
        ("start_dt" = String, Query, description = "Interval start, RFC 3339 with offset"),
        ("end_dt" = String, Query, description = "Interval end, RFC 3339 with offset")
    ),
    responses(
        (status = 200, description = "The applicable price", body = serde_json::Value),
        (status = 400, description = "Unparseable timestamp"),
        (status = 404, description = "Price unavailable", body = String)
    ),
    tag = "ratesrv"
)]
pub async fn get_price(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PriceQuery>,
) -> Result<Response, RatesrvError> {
    let start = DateTime::parse_from_rfc3339(&query.start_dt)
        .map_err(|e| RatesrvError::BadRequest(format!("start_dt: {}", e)))?;
    let end = DateTime::parse_from_rfc3339(&query.end_dt)
        .map_err(|e| RatesrvError::BadRequest(format!("end_dt: {}", e)))?;

    let rates = state.store.list();
    match price_for(start, end, &rates) {
        Some(price) => Ok(Json(json!({ "price": price })).into_response()),
        None => {
            debug!("No unique rate for {} -> {}", query.start_dt, query.end_dt);
            Ok((StatusCode::NOT_FOUND, Json(json!("unavailable"))).into_response())
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{body::Body, http::Request};
    use rate_rules::RateStore;
    use tower::util::ServiceExt;

    fn build_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            store: RateStore::new(),
            config: Arc::new(Config::default()),
        })
    }

    fn rate_entry(times: &str, days: &str, tz: &str, price: i64) -> serde_json::Value {
        json!({ "times": times, "days": days, "tz": tz, "price": price })
    }

    async fn put_rates(app: &Router, rates: serde_json::Value) -> axum::http::StatusCode {
        let req = Request::builder()
            .uri("/api/rates")
            .method("PUT")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "rates": rates }).to_string()))
            .unwrap();
        app.clone().oneshot(req).await.unwrap().status()
    }

    async fn get_json(app: &Router, uri: &str) -> (axum::http::StatusCode, serde_json::Value) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 65536).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_ok() {
        let app = create_routes(build_test_state());
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["rates"], 0);
    }

    #[tokio::test]
    async fn test_list_starts_empty() {
        let app = create_routes(build_test_state());
        let (status, body) = get_json(&app, "/api/rates").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rates"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_replace_and_list() {
        let app = create_routes(build_test_state());

        let status = put_rates(
            &app,
            json!([
                rate_entry("0900-2100", "mon,wed", "America/Chicago", 1500),
                rate_entry("0000-2359", "sat,sun,", "UTC", 2000),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = get_json(&app, "/api/rates").await;
        assert_eq!(status, StatusCode::OK);
        let rates = body["rates"].as_array().unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0]["id"], 1);
        assert_eq!(rates[0]["times"], "0900-2100");
        assert_eq!(rates[0]["days"], "mon,wed");
        assert_eq!(rates[0]["tz"], "America/Chicago");
        assert_eq!(rates[1]["id"], 2);
        assert_eq!(rates[1]["days"], "sat,sun"); // trailing comma normalized
    }

    #[tokio::test]
    async fn test_replace_rejects_invalid_batch() {
        let app = create_routes(build_test_state());

        // Seed a valid set first
        let status = put_rates(&app, json!([rate_entry("0900-2100", "mon", "UTC", 100)])).await;
        assert_eq!(status, StatusCode::CREATED);

        // One invalid entry rejects the whole batch
        let status = put_rates(
            &app,
            json!([
                rate_entry("0000-2359", "fri", "UTC", 500),
                rate_entry("0000-2359", "xyz", "UTC", 600),
            ]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Store unchanged: pre-replace set still visible
        let (_, body) = get_json(&app, "/api/rates").await;
        let rates = body["rates"].as_array().unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates[0]["id"], 1);
        assert_eq!(rates[0]["days"], "mon");
    }

    #[tokio::test]
    async fn test_get_and_delete_rate() {
        let app = create_routes(build_test_state());
        put_rates(&app, json!([rate_entry("0900-2100", "mon", "UTC", 100)])).await;

        let (status, body) = get_json(&app, "/api/rates/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 100);

        let (status, _) = get_json(&app, "/api/rates/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let req = Request::builder()
            .uri("/api/rates/1")
            .method("DELETE")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        // Second delete of the same id is a 404
        let req = Request::builder()
            .uri("/api/rates/1")
            .method("DELETE")
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_price_lookup() {
        let app = create_routes(build_test_state());
        put_rates(
            &app,
            json!([rate_entry("0600-1800", "wed", "America/Chicago", 1750)]),
        )
        .await;

        // 2015-07-01 is a Wednesday; 07:00-12:00 UTC-5 is within the window
        let (status, body) = get_json(
            &app,
            "/api/price?start_dt=2015-07-01T07:00:00-05:00&end_dt=2015-07-01T12:00:00-05:00",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 1750);
    }

    #[tokio::test]
    async fn test_price_unavailable_for_day_spanning_interval() {
        let app = create_routes(build_test_state());
        put_rates(&app, json!([rate_entry("0000-2359", "sat,sun", "UTC", 1000)])).await;

        let (status, body) = get_json(
            &app,
            "/api/price?start_dt=2015-07-04T15:00:00Z&end_dt=2015-07-05T20:00:00Z",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!("unavailable"));
    }

    #[tokio::test]
    async fn test_price_unavailable_when_no_rule_matches() {
        let app = create_routes(build_test_state());

        let (status, body) = get_json(
            &app,
            "/api/price?start_dt=2015-07-01T10:00:00Z&end_dt=2015-07-01T11:00:00Z",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!("unavailable"));
    }

    #[tokio::test]
    async fn test_price_bad_timestamp_is_rejected() {
        let app = create_routes(build_test_state());

        let (status, body) = get_json(
            &app,
            "/api/price?start_dt=yesterday&end_dt=2015-07-01T11:00:00Z",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("start_dt"));
    }
}
