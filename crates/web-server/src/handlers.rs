use crate::{error::ApiError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

/// The fixed endpoint catalog served at `GET /api`.
static ENDPOINTS_DOC: &str = include_str!("../endpoints.json");

#[derive(Debug, Deserialize)]
pub struct ArticlesQuery {
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VoteUpdate {
    /// Kept as a raw JSON value; the repository decides what counts as a
    /// number.
    pub inc_votes: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
pub struct NewComment {
    #[serde(alias = "author")]
    pub username: Option<String>,
    pub body: Option<String>,
}

/// # GET /api
/// Serves the endpoint catalog verbatim as a fixed JSON document.
pub async fn get_endpoints() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], ENDPOINTS_DOC)
}

/// # GET /api/topics
pub async fn get_topics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JsonValue>, ApiError> {
    let topics = state.repo.list_topics().await?;
    Ok(Json(json!({ "topics": topics })))
}

/// # GET /api/articles/:article_id
pub async fn get_article_by_id(
    Path(article_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<JsonValue>, ApiError> {
    let article = state.repo.article_by_id(&article_id).await?;
    Ok(Json(json!({ "article": article })))
}

/// # GET /api/articles?topic=
pub async fn get_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<JsonValue>, ApiError> {
    let articles = state.repo.list_articles(query.topic.as_deref()).await?;
    Ok(Json(json!({ "articles": articles })))
}

/// # PATCH /api/articles/:article_id
/// Applies the relative vote increment from the `inc_votes` body field.
pub async fn patch_article_votes(
    Path(article_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(update): Json<VoteUpdate>,
) -> Result<Json<JsonValue>, ApiError> {
    let article = state
        .repo
        .adjust_article_votes(&article_id, update.inc_votes.as_ref())
        .await?;
    Ok(Json(json!({ "article": article })))
}

/// # GET /api/articles/:article_id/comments
pub async fn get_article_comments(
    Path(article_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<JsonValue>, ApiError> {
    let comments = state.repo.comments_for_article(&article_id).await?;
    Ok(Json(json!({ "comments": comments })))
}

/// # POST /api/articles/:article_id/comments
pub async fn post_article_comment(
    Path(article_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(new_comment): Json<NewComment>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state
        .repo
        .insert_comment(
            &article_id,
            new_comment.username.as_deref(),
            new_comment.body.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "comment": comment }))))
}

/// # DELETE /api/comments/:comment_id
pub async fn delete_comment(
    Path(comment_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    state.repo.delete_comment(&comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # GET /api/users
pub async fn get_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<JsonValue>, ApiError> {
    let users = state.repo.list_users().await?;
    Ok(Json(json!({ "users": users })))
}

/// Terminal handler for any method/path the router doesn't know.
pub async fn path_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "msg": "Path not found!" })),
    )
}
