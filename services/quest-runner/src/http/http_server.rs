use crate::application::context::SharedApplicationState;
use crate::http::fallback_controller::FallbackController;
use crate::http::health_check_controller::HealthCheckController;
use crate::http::start_controller::StartController;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::DefaultMakeSpan;
use tower_http::trace::TraceLayer;

pub struct HttpServer {
    port: u16,
}

impl HttpServer {
    const DEFAULT_LISTENER_ADDR: [u8; 4] = [0, 0, 0, 0];

    pub fn new(port: u16) -> Self {
        tracing::debug!("Initializing the HTTP server");

        Self { port }
    }

    pub fn start(&self, application_state: SharedApplicationState) -> Vec<JoinHandle<()>> {
        tracing::info!("Starting the HTTP server on port {}", self.port);

        let port = self.port;

        vec![tokio::spawn(async move {
            if let Err(err) = Self::worker_axum(port, application_state).await {
                tracing::error!("HTTP server stopped with an error: {err:?}");
            }
        })]
    }

    pub fn router(application_state: &SharedApplicationState) -> Router {
        let trace_layer =
            TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().include_headers(true));

        // Construct the routes
        Router::new()
            .route(
                "/health",
                get(HealthCheckController::get_status_endpoint_handler),
            )
            .route("/start", get(StartController::start_endpoint_handler))
            .fallback(FallbackController::fallback_endpoint_handler)
            .layer(trace_layer)
            .with_state(Arc::clone(application_state))
    }

    async fn worker_axum(port: u16, application_state: SharedApplicationState) -> Result<()> {
        let router = Self::router(&application_state);

        let addr = SocketAddr::from((Self::DEFAULT_LISTENER_ADDR, port));
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Starting HTTP Server on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(Self::shutdown_signal())
            .await?;

        tracing::info!("HTTP Server stopped");

        Ok(())
    }

    async fn shutdown_signal() {
        let ctrl_c = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {err}");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(err) => {
                    tracing::error!("Failed to listen for SIGTERM: {err}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
    }
}
