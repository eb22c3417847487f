use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;

use std::sync::Arc;

use crate::{expense, statistics, user};
use engine::Engine;

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Authenticated user attached to the request by the [`auth`] middleware.
#[derive(Clone, Debug)]
pub struct AuthUser(pub engine::User);

/// Resolves the `token` cookie to a user before any protected handler runs.
///
/// Missing cookie, bad signature, expiry and a stale user id all collapse
/// into the same bare 401; the sub-reason only reaches the logs.
async fn auth(
    jar: CookieJar,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(cookie) = jar.get(TOKEN_COOKIE) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let user_id = match state.engine.sessions().validate(cookie.value()) {
        Ok(user_id) => user_id,
        Err(err) => {
            tracing::debug!("session rejected: {err}");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    let Some(current) = state.engine.user_by_id(user_id).await else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(AuthUser(current));
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/api/auth/me", get(user::me))
        .route("/api/expenses", get(expense::list).post(expense::create))
        .route("/api/expenses/stats", get(statistics::breakdown))
        .route("/api/expenses/trends", get(statistics::trends))
        .route(
            "/api/expenses/{id}",
            get(expense::get).put(expense::update).delete(expense::remove),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/api/auth/register", post(user::register))
        .route("/api/auth/login", post(user::login))
        .route("/api/auth/logout", post(user::logout))
        .merge(protected)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
