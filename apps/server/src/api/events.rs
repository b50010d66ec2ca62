use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{Event, EventUpdate},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

fn to_models(events: Vec<lineup_core::events::Event>) -> Vec<Event> {
    events.into_iter().map(Event::from).collect()
}

#[utoipa::path(get, path="/api/v1/events", responses((status=200, body = [Event])))]
pub(crate) async fn list_events(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Event>>> {
    let events = state.event_service.get_events()?;
    Ok(Json(to_models(events)))
}

#[utoipa::path(
    get,
    path="/api/v1/events/search/{query}",
    params(("query" = String, Path, description = "Case-insensitive fragment of a member name")),
    responses((status=200, body = [Event]))
)]
pub(crate) async fn search_events(
    Path(query): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    let events = state.event_service.get_filtered_events(&query)?;
    Ok(Json(to_models(events)))
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct SearchParams {
    /// Case-insensitive fragment of a member name; empty or absent matches every member.
    #[serde(default)]
    query: String,
}

#[utoipa::path(
    get,
    path="/api/v1/events/search",
    params(SearchParams),
    responses((status=200, body = [Event]))
)]
pub(crate) async fn search_events_by_param(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Event>>> {
    let events = state.event_service.get_filtered_events(&params.query)?;
    Ok(Json(to_models(events)))
}

#[utoipa::path(
    get,
    path="/api/v1/events/{id}",
    params(("id" = i64, Path, description = "Event id")),
    responses((status=200, body = Event), (status=404))
)]
pub(crate) async fn get_event(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Event>> {
    let event = state.event_service.get_event(id)?;
    Ok(Json(Event::from(event)))
}

#[utoipa::path(
    put,
    path="/api/v1/events/{id}",
    params(("id" = i64, Path, description = "Event id")),
    request_body = EventUpdate,
    responses((status=200, body = Event), (status=404))
)]
pub(crate) async fn update_event(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EventUpdate>,
) -> ApiResult<Json<Event>> {
    let updated = state.event_service.update_event(id, payload.into()).await?;
    info!("Updated comment of event {}", id);
    Ok(Json(Event::from(updated)))
}

#[utoipa::path(
    delete,
    path="/api/v1/events/{id}",
    params(("id" = i64, Path, description = "Event id")),
    responses((status=204), (status=404))
)]
pub(crate) async fn delete_event(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.event_service.delete_event(id).await?;
    info!("Deleted event {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/search", get(search_events_by_param))
        .route("/events/search/{query}", get(search_events))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}
