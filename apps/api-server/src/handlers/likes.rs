//! Like handlers. Likes are immutable: there is no update route.

use actix_web::{HttpResponse, web};

use agora_shared::ApiResponse;
use agora_shared::dto::{LikeRequest, LikeResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/likes
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<LikeRequest>,
) -> AppResult<HttpResponse> {
    let like = state.services.likes.create(body.into_inner().into()).await?;
    tracing::info!(principal = %identity.username, like_id = like.id, "Like created");

    Ok(HttpResponse::Ok().json(LikeResponse::from(like)))
}

/// GET /api/likes
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let likes = state.services.likes.list().await?;
    Ok(HttpResponse::Ok().json(likes.into_iter().map(LikeResponse::from).collect::<Vec<_>>()))
}

/// GET /api/likes/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let like = state.services.likes.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LikeResponse::from(like)))
}

/// DELETE /api/likes/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.services.likes.delete(id).await?;
    tracing::info!(principal = %identity.username, like_id = id, "Like deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::deleted("Like", id)))
}
