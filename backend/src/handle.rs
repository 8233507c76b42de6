use axum::{
    extract::{Path, Query},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use shared::{AddPost, EditPost};

use crate::{
    app::App,
    error::Result,
    utils::timestamp_now,
    viewed_cookie::{viewed_cookie_header, ExtractViewedToken},
};

pub fn api_routes(app: App) -> Router {
    #[rustfmt::skip]
    let router = Router::new()
        .route("/api/ping", get(ping_handler))
        .route("/api/posts", get(list_posts_handler))
        .route("/api/posts/archive", get(archive_handler))
        .route("/api/addpost", post(add_post_handler))
        .route("/api/post/:slug", get(get_post_handler).delete(delete_post_handler))
        .route("/api/post/edit/:slug", post(edit_post_handler))
        .layer(Extension(app));

    router
}

#[allow(clippy::unused_async)]
pub async fn ping_handler() -> Html<&'static str> {
    Html("pong")
}

#[derive(Deserialize, Debug)]
pub struct PageParams {
    pub page: Option<usize>,
}

pub async fn list_posts_handler(
    Extension(app): Extension<App>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse> {
    Ok(Json(app.list_posts(params.page.unwrap_or(1)).await?))
}

pub async fn archive_handler(Extension(app): Extension<App>) -> Result<impl IntoResponse> {
    Ok(Json(app.archive().await?))
}

pub async fn get_post_handler(
    Extension(app): Extension<App>,
    Path(slug): Path<String>,
    ExtractViewedToken(token_id): ExtractViewedToken,
) -> Result<impl IntoResponse> {
    let (post, registered) = app.view_post(&slug, token_id.as_deref()).await?;

    let mut response = Json(post).into_response();

    if registered.counted {
        if let Some(cookie) = viewed_cookie_header(&registered.token, timestamp_now()) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }

    Ok(response)
}

pub async fn add_post_handler(
    Extension(app): Extension<App>,
    Json(payload): Json<AddPost>,
) -> Result<impl IntoResponse> {
    Ok(Json(app.add_post(payload).await?))
}

pub async fn edit_post_handler(
    Extension(app): Extension<App>,
    Path(slug): Path<String>,
    Json(payload): Json<EditPost>,
) -> Result<impl IntoResponse> {
    Ok(Json(app.edit_post(&slug, payload).await?))
}

pub async fn delete_post_handler(
    Extension(app): Extension<App>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse> {
    if app.delete_post(&slug).await? {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}
