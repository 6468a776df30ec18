pub mod auth;
pub mod error;
pub mod handlers;
pub mod ical;
pub mod join;
pub mod models;
pub mod openapi;
pub mod settings;
pub mod source;
pub mod ticker;
pub mod time_status;
pub mod validation;
pub mod view;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use handlers::{
    class_view, countdown, get_ical, healthz_live, healthz_ready, join_class, list_classes, root,
};
use tower_http::LatencyUnit;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ical::ICalExporter;
use crate::openapi::ApiDoc;
use crate::settings::Settings;
use crate::source::ClassSource;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub source: Arc<ClassSource>,
    pub exporter: Arc<ICalExporter>,
    /// Demo class start times are placed relative to this instant.
    pub demo_anchor: DateTime<Utc>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let source = ClassSource::new(
            settings.source_url.clone(),
            settings.source_token.clone(),
            settings.cache_ttl(),
        );
        Self {
            settings,
            source: Arc::new(source),
            exporter: Arc::new(ICalExporter::new()),
            demo_anchor: Utc::now(),
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let state = AppState::new(settings);
    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!(
        source = %state.settings.source_url,
        demo_classes = state.settings.demo_classes,
        "Starting Class Viewer API on {addr}"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/classes", get(list_classes))
        .route("/classes/view", get(class_view))
        .route("/classes/{id}/join", post(join_class))
        .route("/classes/{id}/countdown", get(countdown))
        .route("/classes.ical", get(get_ical))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(CorsLayer::permissive()).layer(trace_layer)
}
