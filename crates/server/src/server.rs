use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;

use crate::{
    ExpenseStore, GroupDirectory, MemoryStore, NotificationSink, expenses, groups, settlements,
};
use engine::ParticipantId;

#[derive(Clone)]
pub struct ServerState {
    pub expenses: Arc<dyn ExpenseStore>,
    pub directory: Arc<dyn GroupDirectory>,
    pub notifier: Arc<dyn NotificationSink>,
}

impl ServerState {
    /// Wires both collaborator seams to the bundled in-memory store.
    pub fn in_memory(notifier: Arc<dyn NotificationSink>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            expenses: store.clone(),
            directory: store,
            notifier,
        }
    }
}

/// Authenticated caller identity, inserted by the auth middleware.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub ParticipantId);

/// Resolves the caller from Basic auth.
///
/// Credential verification belongs to the identity provider in front of
/// this service; here the username is taken as the caller's email and only
/// blank credentials are rejected.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth_header) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    request
        .extensions_mut()
        .insert(CurrentUser(ParticipantId::from(auth_header.username())));
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/groups", post(groups::create))
        .route(
            "/groups/{group_id}",
            get(groups::detail)
                .patch(groups::update)
                .delete(groups::delete),
        )
        .route("/groups/{group_id}/members", post(groups::upsert_member))
        .route(
            "/groups/{group_id}/members/{email}",
            axum::routing::delete(groups::remove_member),
        )
        .route("/groups/{group_id}/expenses", post(expenses::create))
        .route("/groups/{group_id}/balances", get(settlements::balances))
        .route("/groups/{group_id}/transfers", get(settlements::transfers))
        .route(
            "/groups/{group_id}/settlement",
            get(settlements::settlement),
        )
        .route("/summary", get(settlements::summary))
        .route_layer(middleware::from_fn(auth))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(state, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
