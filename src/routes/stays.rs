use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extractors::{CurrentUser, MaybeUser};
use crate::state::AppState;
use crate::stay::domain::{StayDraft, StayPatch};
use crate::stay::query::StayFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stay", get(list_stays).post(add_stay))
        .route(
            "/api/stay/{id}",
            get(get_stay).put(update_stay).delete(remove_stay),
        )
        .route("/api/stay/{id}/review", post(add_review))
        .route("/api/stay/{id}/review/{review_id}", delete(remove_review))
        .route("/api/stay/{id}/msg", get(get_msgs).post(add_msg))
        .route("/api/stay/{id}/msg/{msg_id}", delete(remove_msg))
}

#[derive(Debug, Deserialize)]
struct TxtBody {
    txt: String,
}

async fn list_stays(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(filter): Query<StayFilter>,
) -> AppResult<impl IntoResponse> {
    let stays = state.stays.list(&filter, viewer.as_ref()).await?;
    Ok(Json(stays))
}

async fn get_stay(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let stay = state.stays.get_by_id(&id).await?;
    Ok(Json(stay))
}

async fn add_stay(
    State(state): State<AppState>,
    CurrentUser(host): CurrentUser,
    Json(draft): Json<StayDraft>,
) -> AppResult<impl IntoResponse> {
    let stay = state.stays.create(draft, &host).await?;
    Ok((StatusCode::CREATED, Json(stay)))
}

async fn update_stay(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUser(actor): CurrentUser,
    Json(patch): Json<StayPatch>,
) -> AppResult<impl IntoResponse> {
    let stay = state.stays.update(&id, patch, &actor).await?;
    Ok(Json(stay))
}

async fn remove_stay(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let removed_id = state.stays.remove(&id, &actor).await?;
    Ok(Json(removed_id))
}

async fn add_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUser(actor): CurrentUser,
    Json(body): Json<TxtBody>,
) -> AppResult<impl IntoResponse> {
    let review = state.stays.add_review(&id, body.txt, &actor).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn remove_review(
    State(state): State<AppState>,
    Path((id, review_id)): Path<(String, String)>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let removed_id = state.stays.remove_review(&id, &review_id, &actor).await?;
    Ok(Json(removed_id))
}

async fn get_msgs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let msgs = state.stays.msgs(&id).await?;
    Ok(Json(msgs))
}

async fn add_msg(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUser(sender): CurrentUser,
    Json(body): Json<TxtBody>,
) -> AppResult<impl IntoResponse> {
    let msg = state.stays.add_msg(&id, body.txt, &sender).await?;
    Ok((StatusCode::CREATED, Json(msg)))
}

async fn remove_msg(
    State(state): State<AppState>,
    Path((id, msg_id)): Path<(String, String)>,
    CurrentUser(sender): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let removed_id = state.stays.remove_msg(&id, &msg_id, &sender).await?;
    Ok(Json(removed_id))
}
