//! Hashtag handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use agora_shared::ApiResponse;
use agora_shared::dto::{DiscussionResponse, HashtagRequest, HashtagResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/hashtags
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<HashtagRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let hashtag = state.services.hashtags.create(&req.name).await?;
    tracing::info!(principal = %identity.username, hashtag_id = hashtag.id, "Hashtag created");

    Ok(HttpResponse::Ok().json(HashtagResponse::from(hashtag)))
}

/// GET /api/hashtags
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let hashtags = state.services.hashtags.list().await?;
    Ok(HttpResponse::Ok().json(
        hashtags
            .into_iter()
            .map(HashtagResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/hashtags/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let hashtag = state.services.hashtags.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(HashtagResponse::from(hashtag)))
}

/// PUT /api/hashtags/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<HashtagRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let hashtag = state.services.hashtags.update(id, &req.name).await?;
    tracing::info!(principal = %identity.username, hashtag_id = id, "Hashtag renamed");

    Ok(HttpResponse::Ok().json(HashtagResponse::from(hashtag)))
}

/// DELETE /api/hashtags/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.services.hashtags.delete(id).await?;
    tracing::info!(principal = %identity.username, hashtag_id = id, "Hashtag deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::deleted("Hashtag", id)))
}

/// GET /api/hashtags/{id}/discussions
pub async fn discussions(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let discussions = state
        .services
        .discussions
        .list_by_hashtag(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(
        discussions
            .into_iter()
            .map(DiscussionResponse::from)
            .collect::<Vec<_>>(),
    ))
}
