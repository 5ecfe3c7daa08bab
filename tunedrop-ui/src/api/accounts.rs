//! Account registration, login, and logout

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, Response};
use axum::Form;
use serde::Deserialize;
use tracing::{info, warn};
use tunedrop_common::auth;

use crate::api::notice::notice_redirect;
use crate::api::session::{
    clear_session_cookie, cookie_value, redirect_with_cookie, session_cookie, SESSION_COOKIE,
};
use crate::api::ApiError;
use crate::db::{sessions, users};
use crate::AppState;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// GET /, /login, /signup
///
/// Serves the landing page with the login and signup forms. The page shows
/// the `notice` query parameter, if present.
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: String,
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response, ApiError> {
    let username = form.username.trim();
    let password = form.password.trim();
    let email = form.email.trim();

    if username.is_empty() || password.is_empty() || email.is_empty() {
        return Ok(notice_redirect("/signup", "Please fill in all fields"));
    }

    if password.len() < 6 {
        return Ok(notice_redirect(
            "/signup",
            "Password must be at least 6 characters long",
        ));
    }

    if !email.contains('@') {
        return Ok(notice_redirect(
            "/signup",
            "Please enter a valid email address",
        ));
    }

    if users::username_exists(&state.db, username).await? {
        return Ok(notice_redirect("/signup", "Username already exists"));
    }

    if users::email_exists(&state.db, email).await? {
        return Ok(notice_redirect("/signup", "Email already registered"));
    }

    let salt = auth::generate_salt();
    let hash = auth::hash_password(password, &salt);

    match users::insert_user(&state.db, username, email, &hash, &salt).await? {
        Some(id) => {
            info!("Created account '{}' (id {})", username, id);
            Ok(notice_redirect(
                "/login",
                "Account created successfully! Please log in.",
            ))
        }
        // Lost a race against a concurrent signup; the unique constraint
        // rejected the insert after the existence checks passed.
        None => Ok(notice_redirect(
            "/signup",
            "Username or email already registered",
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login
///
/// Unknown username and wrong password answer the same generic notice, so
/// the response never reveals which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let username = form.username.trim();
    let password = form.password.trim();

    if username.is_empty() || password.is_empty() {
        return Ok(notice_redirect("/login", "Please fill in all fields"));
    }

    let Some(creds) = users::find_credentials(&state.db, username).await? else {
        return Ok(notice_redirect("/login", "Invalid username or password"));
    };

    if !auth::verify_password(password, &creds.password_salt, &creds.password_hash) {
        return Ok(notice_redirect("/login", "Invalid username or password"));
    }

    let token = sessions::create_session(&state.db, creds.id, state.session_timeout_secs).await?;
    info!("User '{}' logged in", creds.username);

    let target = format!("/home?notice={}", urlencoding::encode("Welcome back!"));
    Ok(redirect_with_cookie(
        &target,
        &session_cookie(&token, state.session_timeout_secs),
    ))
}

/// GET /logout
///
/// Clears the cookie and drops the session row. Never fails: a missing or
/// stale session still redirects to the login page.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_value(&headers, SESSION_COOKIE) {
        if let Err(e) = sessions::delete_session(&state.db, token).await {
            warn!("Failed to delete session on logout: {}", e);
        }
    }

    let target = format!(
        "/login?notice={}",
        urlencoding::encode("You have been logged out successfully")
    );
    redirect_with_cookie(&target, &clear_session_cookie())
}
