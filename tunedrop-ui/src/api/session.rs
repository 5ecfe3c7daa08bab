//! Session cookie handling and the login gate
//!
//! The cookie holds an opaque UUID token; `require_login` resolves it
//! against the sessions table and injects the authenticated user into
//! request extensions for downstream handlers.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::error;

use crate::api::notice::notice_redirect;
use crate::api::ApiError;
use crate::db::sessions;
use crate::AppState;

/// Session cookie name
pub const SESSION_COOKIE: &str = "tunedrop_session";

/// Authenticated user for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Extract a named cookie value from request headers
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').map(str::trim).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Build the Set-Cookie value establishing a session
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    )
}

/// Build the Set-Cookie value clearing the session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}

/// Redirect to `target` while setting a cookie on the response
pub fn redirect_with_cookie(target: &str, cookie: &str) -> Response {
    let mut response = Redirect::to(target).into_response();
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// Login gate middleware
///
/// Applied to protected routes only. A missing, unknown, or expired session
/// redirects to the login page with a notice.
pub async fn require_login(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = cookie_value(request.headers(), SESSION_COOKIE).map(str::to_owned);

    let Some(token) = token else {
        return notice_redirect("/login", "Please log in first");
    };

    match sessions::lookup_user(&state.db, &token).await {
        Ok(Some((id, username))) => {
            request.extensions_mut().insert(CurrentUser { id, username });
            next.run(request).await
        }
        Ok(None) => notice_redirect("/login", "Please log in first"),
        Err(e) => {
            error!("Session lookup failed: {}", e);
            ApiError::Internal(e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_cookie_value_single() {
        let headers = headers_with_cookie("tunedrop_session=abc123");
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), Some("abc123"));
    }

    #[test]
    fn test_cookie_value_among_others() {
        let headers = headers_with_cookie("theme=dark; tunedrop_session=tok; lang=en");
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), Some("tok"));
    }

    #[test]
    fn test_cookie_value_missing() {
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), None);

        let empty = HeaderMap::new();
        assert_eq!(cookie_value(&empty, SESSION_COOKIE), None);
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        // A prefix of the cookie name must not match
        let headers = headers_with_cookie("tunedrop_session_old=stale");
        assert_eq!(cookie_value(&headers, SESSION_COOKIE), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok", 3600);
        assert!(cookie.starts_with("tunedrop_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));

        let cleared = clear_session_cookie();
        assert!(cleared.contains("Max-Age=0"));
    }
}
