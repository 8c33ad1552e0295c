//! User handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use agora_shared::ApiResponse;
use agora_shared::dto::{
    CommentResponse, DiscussionResponse, LikeResponse, SearchQuery, UserRequest, UserResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let user = state.services.users.create(req.into()).await?;
    tracing::info!(principal = %identity.username, user_id = user.id, "User created");

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// GET /api/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.services.users.list().await?;
    Ok(HttpResponse::Ok().json(
        users
            .into_iter()
            .map(UserResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/users/search?name=
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let users = state.services.users.search(&query.name).await?;
    Ok(HttpResponse::Ok().json(
        users
            .into_iter()
            .map(UserResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/users/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let user = state.services.users.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /api/users/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<UserRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    let user = state.services.users.update(id, req.into()).await?;
    tracing::info!(principal = %identity.username, user_id = id, "User updated");

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// DELETE /api/users/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.services.users.delete(id).await?;
    tracing::info!(principal = %identity.username, user_id = id, "User deleted");

    Ok(HttpResponse::Ok().json(ApiResponse::deleted("User", id)))
}

/// GET /api/users/{id}/discussions
pub async fn discussions(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let discussions = state
        .services
        .discussions
        .list_by_user(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(
        discussions
            .into_iter()
            .map(DiscussionResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/users/{id}/comments
pub async fn comments(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let comments = state
        .services
        .comments
        .list_by_user(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(
        comments
            .into_iter()
            .map(CommentResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/users/{id}/likes
pub async fn likes(state: web::Data<AppState>, path: web::Path<i64>) -> AppResult<HttpResponse> {
    let likes = state.services.likes.list_by_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(likes.into_iter().map(LikeResponse::from).collect::<Vec<_>>()))
}
