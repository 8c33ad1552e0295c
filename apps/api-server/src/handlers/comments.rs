//! Comment handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use agora_shared::ApiResponse;
use agora_shared::dto::{CommentRequest, CommentResponse, UpdateCommentRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let comment = state.services.comments.create(req.into()).await?;
    tracing::info!(principal = %identity.username, comment_id = comment.id, "Comment created");

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// GET /api/comments
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let comments = state.services.comments.list().await?;
    Ok(HttpResponse::Ok().json(
        comments
            .into_iter()
            .map(CommentResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/comments/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let comment = state.services.comments.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// PUT /api/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let comment = state.services.comments.update(id, req.text).await?;
    tracing::info!(principal = %identity.username, comment_id = id, "Comment updated");

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.services.comments.delete(id).await?;
    tracing::info!(principal = %identity.username, comment_id = id, "Comment deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::deleted("Comment", id)))
}
