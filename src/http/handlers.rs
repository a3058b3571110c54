//! HTTP request handlers for the audioshelf web interface
//!
//! Implements the listing page, the update form target, the JSON
//! listing, the health check and per-directory file downloads.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::core::error::Result;
use crate::core::library::mount_prefix;
use crate::core::services::Services;
use crate::core::types::*;
use crate::http::render;

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Listing page handler
///
/// Re-scans every configured directory and renders the result.
/// Directories that cannot be read show an inline error.
pub async fn index_handler(State(services): State<Arc<Services>>) -> Result<Html<String>> {
    let view = services.library_view().await?;
    Ok(Html(render::library_page(&view)))
}

/// JSON listing handler
///
/// Same data as the listing page, for scripts and other clients.
pub async fn library_handler(
    State(services): State<Arc<Services>>,
) -> Result<Json<LibraryView>> {
    Ok(Json(services.library_view().await?))
}

/// Update form handler
///
/// Adds the submitted directory and/or tunnel domain, then redirects
/// back to the listing with `303 See Other`.
///
/// # Errors
///
/// - `InvalidDirectory`: directory does not exist (400 page)
/// - `ConfigSave`: library could not be written (500 page)
pub async fn update_handler(
    State(services): State<Arc<Services>>,
    Form(form): Form<UpdateForm>,
) -> Result<Redirect> {
    // The tunnel task is detached; its outcome is only logged
    let _outcome = services
        .updates
        .apply(&form.directory, &form.ngrok)
        .await?;

    Ok(Redirect::to("/"))
}

/// File download handler for `/files/:index/*path`
///
/// Serves from the `index`-th configured directory with `ServeDir`,
/// which takes care of percent-decoding, range requests and
/// rejecting `..` traversal.
pub async fn file_handler(
    State(services): State<Arc<Services>>,
    Path((index, _path)): Path<(usize, String)>,
    request: Request<Body>,
) -> Result<Response> {
    let Some(root) = services.directory_root(index)? else {
        return Ok((StatusCode::NOT_FOUND, "Unknown library directory").into_response());
    };

    let (mut parts, body) = request.into_parts();
    let prefix = mount_prefix(index);
    let rest = parts
        .uri
        .path()
        .strip_prefix(prefix.as_str())
        .filter(|rest| rest.starts_with('/'))
        .unwrap_or("/")
        .to_string();

    let Ok(uri) = rest.parse::<Uri>() else {
        return Ok(StatusCode::BAD_REQUEST.into_response());
    };
    parts.uri = uri;

    let response = match ServeDir::new(root)
        .oneshot(Request::from_parts(parts, body))
        .await
    {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    };

    Ok(response)
}
