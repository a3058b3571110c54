//! Conversion of core errors into HTML responses.

use axum::response::{Html, IntoResponse, Response};

use crate::core::error::LibraryError;
use crate::http::render;

/// Implement IntoResponse for automatic error conversion in Axum
impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (title, message) = if self.is_bad_request() {
            ("Invalid directory", self.message())
        } else {
            tracing::error!(error = %self, "Request failed");
            ("Something went wrong", self.message())
        };

        (status, Html(render::error_page(title, &message))).into_response()
    }
}
