use std::{net::{SocketAddr, TcpListener}, sync::Arc};

use anyhow::Context;
use axum::{Router, body::Bytes, extract::{DefaultBodyLimit, State, rejection::BytesRejection}, http::StatusCode, response::IntoResponse, routing::post};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::log;

use crate::models_api::ingest::IngestedMatch;

pub const INGEST_ACK: &str = "Data ingested successfully";

/// Largest accepted request body, a whole week of NFL games is well below this.
pub const MAX_BATCH_BYTES: usize = 64 * 1024 * 1024;

/// Receives every decoded batch. Nothing is persisted by the default sink.
pub trait IngestSink: Send + Sync {
    fn store(&self, batch: &[IngestedMatch]);
}

pub struct LogSink;

impl IngestSink for LogSink {
    fn store(&self, batch: &[IngestedMatch]) {
        for m in batch {
            log::info!("[INGEST] Received match: {m}");
        }
    }
}

#[derive(Clone)]
pub struct IngestState {
    pub sink: Arc<dyn IngestSink>,
}

pub struct IngestApi;
impl IngestApi {
    pub fn router(sink: Arc<dyn IngestSink>) -> Router {
        Router::new()
            .route("/ingest", post(IngestApi::ingest).fallback(IngestApi::method_not_allowed))
            .with_state(IngestState { sink })
            .layer(ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_BATCH_BYTES))
            )
    }

    pub async fn serve(port: u16, sink: Arc<dyn IngestSink>) -> anyhow::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)
            .with_context(|| format!("Could not bind {addr}"))?;
        IngestApi::serve_on(listener, sink).await
    }

    pub async fn serve_on(listener: TcpListener, sink: Arc<dyn IngestSink>) -> anyhow::Result<()> {
        log::info!("[INGEST] Listening on {}", listener.local_addr()?);
        axum::Server::from_tcp(listener)?
            .serve(IngestApi::router(sink).into_make_service())
            .await?;
        Ok(())
    }

    async fn ingest(State(state): State<IngestState>, body: Result<Bytes, BytesRejection>) -> impl IntoResponse {
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                log::error!("[INGEST] Failed to read request body: {e}");
                return (StatusCode::BAD_REQUEST, "Failed to read request body");
            }
        };

        let batch: Vec<IngestedMatch> = match serde_json::from_slice(&body) {
            Ok(batch) => batch,
            Err(e) => {
                log::error!("[INGEST] Failed to parse JSON: {e}");
                return (StatusCode::BAD_REQUEST, "Failed to parse JSON");
            }
        };

        log::info!("[INGEST] Batch of {} matches", batch.len());
        state.sink.store(&batch);
        (StatusCode::OK, INGEST_ACK)
    }

    async fn method_not_allowed() -> impl IntoResponse {
        (StatusCode::METHOD_NOT_ALLOWED, "Only POST method is allowed")
    }
}
