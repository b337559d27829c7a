use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::{
    error::AppError,
    extract::ApiJson,
    models::trip::{NewTrip, SortField, SortOrder, Trip, TripPatch, TripStats},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/stats", get(trip_stats))
        .route("/:id", get(get_trip).put(update_trip).delete(delete_trip))
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    sort: Option<String>,
    order: Option<String>,
}

async fn list_trips(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Trip>> {
    debug!("list trips: {query:?}");
    let sort = query.sort.as_deref().and_then(SortField::parse);
    let order = query
        .order
        .as_deref()
        .map(SortOrder::parse)
        .unwrap_or_default();
    Json(state.trips.list(sort, order).await)
}

async fn get_trip(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    let id = parse_trip_id(&raw_id)?;
    Ok(Json(state.trips.get(id).await?))
}

async fn create_trip(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewTrip>,
) -> Result<impl IntoResponse, AppError> {
    let trip = state.trips.create(input).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ApiJson(patch): ApiJson<TripPatch>,
) -> Result<Json<Trip>, AppError> {
    let id = parse_trip_id(&raw_id)?;
    Ok(Json(state.trips.update(id, patch).await?))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_trip_id(&raw_id)?;
    state.trips.delete(id).await?;
    Ok(Json(json!({ "message": "trip deleted" })))
}

async fn trip_stats(State(state): State<AppState>) -> Result<Json<TripStats>, AppError> {
    Ok(Json(state.trips.stats().await?))
}

/// Ids that are not unsigned integers cannot name a trip.
fn parse_trip_id(raw: &str) -> Result<u64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(AppError::NotFound);
    }
    raw.parse().map_err(|_| AppError::NotFound)
}
