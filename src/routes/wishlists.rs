use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;
use crate::wishlist::domain::{WishlistDraft, WishlistUpdate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/wishlist", get(list_wishlists).post(add_wishlist))
        .route(
            "/api/wishlist/{id}",
            get(get_wishlist).put(update_wishlist).delete(remove_wishlist),
        )
        .route(
            "/api/wishlist/{id}/stay/{stay_id}",
            post(add_stay).delete(remove_stay),
        )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WishlistQuery {
    user_id: Option<String>,
}

async fn list_wishlists(
    State(state): State<AppState>,
    Query(query): Query<WishlistQuery>,
) -> AppResult<impl IntoResponse> {
    let wishlists = state.wishlists.list(query.user_id.as_deref()).await?;
    Ok(Json(wishlists))
}

async fn get_wishlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let wishlist = state.wishlists.get_by_id(&id).await?;
    Ok(Json(wishlist))
}

async fn add_wishlist(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(draft): Json<WishlistDraft>,
) -> AppResult<impl IntoResponse> {
    let wishlist = state.wishlists.create(draft, &actor).await?;
    Ok((StatusCode::CREATED, Json(wishlist)))
}

async fn update_wishlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUser(actor): CurrentUser,
    Json(update): Json<WishlistUpdate>,
) -> AppResult<impl IntoResponse> {
    let wishlist = state.wishlists.update(&id, update, &actor).await?;
    Ok(Json(wishlist))
}

async fn remove_wishlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let removed_id = state.wishlists.remove(&id, &actor).await?;
    Ok(Json(removed_id))
}

async fn add_stay(
    State(state): State<AppState>,
    Path((id, stay_id)): Path<(String, String)>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let wishlist = state.wishlists.add_stay(&id, &stay_id, &actor).await?;
    Ok(Json(wishlist))
}

async fn remove_stay(
    State(state): State<AppState>,
    Path((id, stay_id)): Path<(String, String)>,
    CurrentUser(actor): CurrentUser,
) -> AppResult<impl IntoResponse> {
    let wishlist = state.wishlists.remove_stay(&id, &stay_id, &actor).await?;
    Ok(Json(wishlist))
}
