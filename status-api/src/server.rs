//! HTTP server with graceful shutdown

use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    config::Config,
    error::Result,
    middleware::{request_id_layer, request_id_propagation_layer, sensitive_headers_layer},
};

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Bind, serve and drain on SIGINT/SIGTERM
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.service.port));

        tracing::info!(service = %self.config.service.name, %addr, "Starting server");
        self.log_middleware_config();

        let app = self.layered(app);
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(%addr, "Server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Wrap the router in the HTTP middleware stack.
    ///
    /// Each `.layer` wraps everything before it, so CORS is innermost and
    /// panic recovery, added last, is outermost.
    pub fn layered(&self, app: Router) -> Router {
        let middleware = &self.config.middleware;
        let body_limit = middleware.body_limit_mb * 1024 * 1024;

        let mut app = app
            .layer(self.build_cors_layer())
            .layer(CompressionLayer::new().gzip(middleware.compression))
            .layer(TimeoutLayer::with_status_code(
                http::StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(self.config.service.timeout_secs),
            ))
            .layer(RequestBodyLimitLayer::new(body_limit))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_response(DefaultOnResponse::new().include_headers(true)),
            );

        if middleware.request_tracking.mask_sensitive_headers {
            app = app.layer(sensitive_headers_layer());
        }

        app.layer(request_id_propagation_layer(&middleware.request_tracking))
            .layer(request_id_layer(&middleware.request_tracking))
            .layer(CatchPanicLayer::new())
    }

    fn log_middleware_config(&self) {
        let middleware = &self.config.middleware;
        tracing::info!(
            body_limit_mb = middleware.body_limit_mb,
            compression = middleware.compression,
            cors_mode = %middleware.cors_mode,
            timeout_secs = self.config.service.timeout_secs,
            request_id_header = %middleware.request_tracking.request_id_header,
            mask_sensitive_headers = middleware.request_tracking.mask_sensitive_headers,
            "Middleware configuration"
        );
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn build_cors_layer(&self) -> CorsLayer {
        match self.config.middleware.cors_mode.as_str() {
            "permissive" => CorsLayer::permissive(),
            "restrictive" => {
                tracing::debug!("Restrictive CORS (default deny)");
                CorsLayer::new()
            }
            other => {
                tracing::warn!(cors_mode = other, "Unknown CORS mode, defaulting to permissive");
                CorsLayer::permissive()
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Draining in-flight requests");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::routing::{get, post};
    use tower::ServiceExt;

    fn echo_app() -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route("/echo", post(|body: String| async move { body }))
            .route("/boom", get(boom))
    }

    async fn boom() -> &'static str {
        panic!("handler failure")
    }

    #[test]
    fn test_server_creation() {
        let config = Config::default();
        let server = Server::new(config.clone());
        assert_eq!(server.config().service.port, config.service.port);
    }

    #[tokio::test]
    async fn test_responses_carry_generated_request_id() {
        let app = Server::new(Config::default()).layered(echo_app());
        let response = app
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let id = response.headers().get("x-request-id").unwrap();
        assert!(id.to_str().unwrap().starts_with("req_"));
    }

    #[tokio::test]
    async fn test_client_request_id_is_kept() {
        let app = Server::new(Config::default()).layered(echo_app());
        let response = app
            .oneshot(
                Request::get("/ping")
                    .header("x-request-id", "req_client")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get("x-request-id").unwrap(), "req_client");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let mut config = Config::default();
        config.middleware.body_limit_mb = 1;
        let app = Server::new(config).layered(echo_app());

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/echo")
                    .header(header::CONTENT_LENGTH, 2 * 1024 * 1024)
                    .body(Body::from(vec![b'x'; 2 * 1024 * 1024]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_panic_is_caught_outside_every_other_layer() {
        let app = Server::new(Config::default()).layered(echo_app());
        let response = app
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Request ids sit inside panic recovery, so the unwound response has none
        assert!(response.headers().get("x-request-id").is_none());
    }
}
