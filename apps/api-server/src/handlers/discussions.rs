//! Discussion handlers, including hashtag links and per-discussion listings.

use actix_web::{HttpResponse, web};
use validator::Validate;

use agora_shared::ApiResponse;
use agora_shared::dto::{
    CommentResponse, DiscussionDetailResponse, DiscussionRequest, DiscussionResponse,
    HashtagRequest, LikeResponse, UpdateDiscussionRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/discussions
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<DiscussionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let (discussion, hashtags) = req.into_parts();
    let detail = state
        .services
        .discussions
        .create(discussion, &hashtags)
        .await?;
    tracing::info!(
        principal = %identity.username,
        discussion_id = detail.discussion.id,
        "Discussion created"
    );

    Ok(HttpResponse::Ok().json(DiscussionDetailResponse::from(detail)))
}

/// GET /api/discussions
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let discussions = state.services.discussions.list().await?;
    Ok(HttpResponse::Ok().json(
        discussions
            .into_iter()
            .map(DiscussionResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/discussions/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let detail = state
        .services
        .discussions
        .get_detail(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(DiscussionDetailResponse::from(detail)))
}

/// PUT /api/discussions/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<UpdateDiscussionRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let discussion = state.services.discussions.update(id, req.into()).await?;
    tracing::info!(principal = %identity.username, discussion_id = id, "Discussion updated");

    Ok(HttpResponse::Ok().json(DiscussionResponse::from(discussion)))
}

/// DELETE /api/discussions/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.services.discussions.delete(id).await?;
    tracing::info!(principal = %identity.username, discussion_id = id, "Discussion deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::deleted("Discussion", id)))
}

/// GET /api/discussions/{id}/comments
pub async fn comments(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let comments = state
        .services
        .comments
        .list_by_discussion(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(
        comments
            .into_iter()
            .map(CommentResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/discussions/{id}/likes
pub async fn likes(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let likes = state
        .services
        .likes
        .list_by_discussion(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(likes.into_iter().map(LikeResponse::from).collect::<Vec<_>>()))
}

/// POST /api/discussions/{id}/hashtags
pub async fn add_hashtag(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<HashtagRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let detail = state.services.discussions.add_hashtag(id, &req.name).await?;
    tracing::info!(
        principal = %identity.username,
        discussion_id = id,
        hashtag = %req.name,
        "Hashtag attached"
    );

    Ok(HttpResponse::Ok().json(DiscussionDetailResponse::from(detail)))
}

/// DELETE /api/discussions/{id}/hashtags/{hashtag_id}
pub async fn remove_hashtag(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (id, hashtag_id) = path.into_inner();
    state
        .services
        .discussions
        .remove_hashtag(id, hashtag_id)
        .await?;
    tracing::info!(
        principal = %identity.username,
        discussion_id = id,
        hashtag_id,
        "Hashtag detached"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::message(format!(
        "Hashtag {} removed from Discussion {}",
        hashtag_id, id
    ))))
}
