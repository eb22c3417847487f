//! Authentication API endpoints.

use api_types::Message;
use api_types::user::{AuthResponse, Credentials, RegisterNew, UserView};
use axum::{Extension, Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::{
    ServerError,
    server::{AuthUser, ServerState, TOKEN_COOKIE},
};
use engine::SESSION_VALIDITY_DAYS;

fn user_view(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        username: user.username,
        email: user.email,
    }
}

/// Session cookie matching the token validity window.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::days(SESSION_VALIDITY_DAYS))
        .build()
}

/// Handle user registration; sets the session cookie on success.
pub async fn register(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(payload): Json<RegisterNew>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), ServerError> {
    let user = state
        .engine
        .register(&payload.username, &payload.email, &payload.password)
        .await?;
    let token = state.engine.sessions().issue(user.id)?;

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token)),
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: user_view(user),
        }),
    ))
}

/// Handle login; sets the session cookie on success.
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(payload): Json<Credentials>,
) -> Result<(CookieJar, Json<AuthResponse>), ServerError> {
    let user = state
        .engine
        .verify(&payload.email, &payload.password)
        .await?;
    let token = state.engine.sessions().issue(user.id)?;

    Ok((
        jar.add(session_cookie(token)),
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user: user_view(user),
        }),
    ))
}

/// Clears the session cookie. Purely client-facing: an already-issued token
/// stays valid until its natural expiry.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Message>) {
    let jar = jar.remove(Cookie::build((TOKEN_COOKIE, "")).path("/").build());
    (
        jar,
        Json(Message {
            message: "Logout successful".to_string(),
        }),
    )
}

/// Returns the authenticated user's own profile.
pub async fn me(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<UserView> {
    Json(user_view(user))
}
