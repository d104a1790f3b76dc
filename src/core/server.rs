use crate::adapters::chat::{CannedResponder, FallbackResponder, LlmResponder};
use crate::adapters::itinerary::ItineraryStore;
use crate::adapters::mail::{HttpMailSender, LogMailSender};
use crate::adapters::payment::StripeGateway;
use crate::adapters::webhook::HttpWebhookRelay;
use crate::adapters::http_client;
use crate::app::routes;
use crate::config::toml_config::{ChatBackend, MailTransport};
use crate::config::SiteConfig;
use crate::core::session::{SessionLayer, SessionSigner};
use crate::domain::ports::{ChatResponder, MailSender, PaymentGateway, WebhookRelay};
use crate::utils::error::{Result, SiteError};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and the text fields around the resume.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub mailer: Arc<dyn MailSender>,
    pub payments: Arc<dyn PaymentGateway>,
    pub chat: Arc<dyn ChatResponder>,
    pub webhook: Arc<dyn WebhookRelay>,
    pub itinerary: Arc<ItineraryStore>,
    pub sessions: Arc<SessionSigner>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wires the configured adapters. Expects an already validated config.
    pub fn from_config(config: SiteConfig) -> Result<Self> {
        let client = http_client(config.upstream_timeout())?;

        let mailer: Arc<dyn MailSender> = match config.mail.transport {
            MailTransport::Http => Arc::new(HttpMailSender::new(client.clone(), &config.mail)),
            MailTransport::Log => {
                tracing::warn!("⚠️ Mail transport is 'log'; messages will not be delivered");
                Arc::new(LogMailSender::new(&config.mail))
            }
        };

        let chat: Arc<dyn ChatResponder> = match config.chat.backend {
            ChatBackend::Canned => Arc::new(CannedResponder::new(&config.chat)),
            ChatBackend::Llm if config.chat.fallback_to_canned => Arc::new(FallbackResponder::new(
                LlmResponder::new(client.clone(), &config.chat.llm),
                CannedResponder::new(&config.chat),
            )),
            ChatBackend::Llm => Arc::new(LlmResponder::new(client.clone(), &config.chat.llm)),
        };

        let itinerary = match &config.itinerary.path {
            Some(path) => ItineraryStore::from_file(path).map_err(|e| SiteError::ConfigError {
                message: format!("failed to load itinerary from {}: {}", path, e),
            })?,
            None => ItineraryStore::empty(),
        };

        Ok(Self {
            payments: Arc::new(StripeGateway::new(client.clone(), &config.payment)),
            webhook: Arc::new(HttpWebhookRelay::new(client, &config.webhook)),
            sessions: Arc::new(SessionSigner::new(&config.auth.session_secret)),
            itinerary: Arc::new(itinerary),
            config: Arc::new(config),
            mailer,
            chat,
            started_at: Utc::now(),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    let session_layer = SessionLayer::new(state.sessions.clone(), &state.config.auth.cookie_name);
    let upload_limit = state
        .config
        .server
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/pricing", get(routes::checkout::pricing))
        .route(
            "/api/checkout_sessions",
            post(routes::checkout::create_checkout_session).route_layer(session_layer),
        )
        .route("/api/contact", post(routes::contact::contact))
        .route(
            "/api/apply",
            post(routes::apply::apply).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/chat", post(routes::chat::chat))
        .route("/api/entity-enrich", post(routes::enrich::entity_enrich))
        .route("/api/itinerary", get(routes::itinerary::overview))
        .route("/api/itinerary/{day}", get(routes::itinerary::day))
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct SiteServer {
    state: AppState,
}

impl SiteServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Serves until Ctrl-C, then drains in-flight requests.
    pub async fn run(self) -> Result<()> {
        let bind = self.state.config.bind_address().to_string();
        let listener = TcpListener::bind(&bind).await?;
        tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("👋 Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("❌ Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
