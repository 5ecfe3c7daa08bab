//! Redirect-with-notice responses
//!
//! Mutations answer `303 See Other` with a `notice` query parameter on the
//! target, the server-side rendition of flash messages: the landing page
//! reads the parameter and shows it to the user.

use axum::response::{IntoResponse, Redirect, Response};

/// Redirect to `target` carrying a user-visible notice
pub fn notice_redirect(target: &str, notice: &str) -> Response {
    let location = format!("{}?notice={}", target, urlencoding::encode(notice));
    Redirect::to(&location).into_response()
}
