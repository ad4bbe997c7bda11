//! HTTP server exposing page data for each post

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use crate::content::{PostPage, ResolveError, SlugResolver};
use crate::Blog;

/// Server state
#[derive(Clone)]
struct ServerState {
    resolver: SlugResolver,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

#[derive(Serialize)]
struct PostIndex<'a> {
    posts: Vec<&'a str>,
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        let status = match &self {
            ResolveError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResolveError::Load { .. } => {
                tracing::error!("{}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let payload = ErrorBody {
            error: status.canonical_reason().unwrap_or("error").to_string(),
            message: self.to_string(),
        };
        (status, Json(payload)).into_response()
    }
}

/// Build the router serving `{route}` and `{route}/:slug`
pub fn router(resolver: SlugResolver, route: &str) -> Router {
    let state = ServerState { resolver };

    let index_path = if route.is_empty() { "/" } else { route };
    Router::new()
        .route(index_path, get(index_handler))
        .route(&format!("{}/:slug", route), get(post_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let resolver = blog.resolver()?;
    let route = blog.config.route_base();
    let app = router(resolver, &route);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving posts at http://{}:{}{}/", ip, port, route);
    println!("Server running at http://{}:{}{}/", ip, port, route);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler(State(state): State<ServerState>) -> Response {
    Json(PostIndex {
        posts: state.resolver.slugs(),
    })
    .into_response()
}

async fn post_handler(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> Result<Json<PostPage>, ResolveError> {
    let page = state.resolver.resolve(&slug).await?;
    Ok(Json(page))
}
