//! # HTTP Server
//!
//! Combines the book and health routers behind CORS and request logging.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::books::BookService;
use crate::observability::{log_event_with_fields, Event};

use super::book_routes::{book_routes, BookState};
use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, log_request};

/// HTTP server for the book API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server for `service` with the given configuration
    pub fn new(config: HttpServerConfig, service: BookService) -> Self {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, service: BookService) -> Router {
        let book_state = Arc::new(BookState::new(service));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(book_routes(book_state))
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(log_request))
                    .layer(cors),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` resolves, then finish in-flight requests
    pub async fn start<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?.to_string();
        log_event_with_fields(Event::Serving, &[("addr", &local_addr)]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::books::MemoryBookStore;

    fn service() -> BookService {
        BookService::new(Arc::new(MemoryBookStore::new()))
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::new(HttpServerConfig::with_port(9090), service());
        assert_eq!(server.socket_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_router_builds_with_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::new(config, service()).router();
    }

    #[tokio::test]
    async fn test_invalid_address_is_rejected() {
        let config = HttpServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        let err = HttpServer::new(config, service())
            .start(async {})
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
