use axum::extract::{Path, Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{Json, http::StatusCode, response::IntoResponse};
use axum_extra::extract::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use chrono::{Local, NaiveDate, Utc};
use futures::{Stream, StreamExt};

use crate::{
    AppState,
    auth::{Viewer, resolve_viewer},
    error::ApiError,
    join::{JoinModal, ModalCountdown, request_join},
    models::ClassRecord,
    source::demo_classes,
    ticker::{TICK_PERIOD, countdown_stream},
    validation::validate_page,
    view::{ClassSummary, ClassView, ClassViewResponse},
};

#[derive(Debug, serde::Deserialize)]
pub struct ClassesQuery {
    pub date: Option<NaiveDate>,
    #[serde(default = "default_page")]
    pub page: u32,
    pub token: Option<String>,
    pub selected: Option<String>,
}

fn default_page() -> u32 {
    1
}

type BearerHeader = Option<TypedHeader<Authorization<Bearer>>>;

fn request_viewer(state: &AppState, auth: BearerHeader, query: &ClassesQuery) -> Viewer {
    let auth_header = auth.map(|TypedHeader(a)| a);
    resolve_viewer(&state.settings, auth_header, query.token.as_deref())
}

async fn load_classes(state: &AppState, query: &ClassesQuery) -> Result<Vec<ClassRecord>, ApiError> {
    let page = validate_page(query.page)?;
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());

    let remote = state.source.fetch_classes(date, page).await;
    let mut classes = if state.settings.demo_classes {
        demo_classes(state.demo_anchor)
    } else {
        Vec::new()
    };
    classes.extend(remote);
    Ok(classes)
}

async fn find_class(state: &AppState, query: &ClassesQuery, id: &str) -> Result<ClassRecord, ApiError> {
    load_classes(state, query)
        .await?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| ApiError::NotFound(format!("Class {id} not found")))
}

#[utoipa::path(get, path = "/", tag = "classes")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Class Viewer API",
        "endpoints": {
            "/classes": "List classes with their live status",
            "/classes/view": "Featured class and similar classes",
            "/classes/{id}/join": "Open the join modal for a class",
            "/classes/{id}/countdown": "Server-sent countdown ticks",
            "/classes.ical": "Download classes as iCal file"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "classes")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "classes")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/classes",
    params(
        ("date" = Option<String>, Query, description = "Schedule date (YYYY-MM-DD), defaults to today"),
        ("page" = Option<u32>, Query, description = "Result page (1-50)")
    ),
    responses(
        (status = 200, description = "Classes with their live status", body = [ClassSummary]),
        (status = 400, description = "Invalid page")
    ),
    tag = "classes"
)]
pub async fn list_classes(
    State(state): State<AppState>,
    Query(query): Query<ClassesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let classes = load_classes(&state, &query).await?;
    let now = Utc::now();
    let summaries: Vec<ClassSummary> = classes.iter().map(|c| ClassSummary::new(c, now)).collect();
    Ok(Json(summaries))
}

#[utoipa::path(
    get,
    path = "/classes/view",
    params(
        ("date" = Option<String>, Query, description = "Schedule date (YYYY-MM-DD), defaults to today"),
        ("page" = Option<u32>, Query, description = "Result page (1-50)"),
        ("selected" = Option<String>, Query, description = "Id of the class to feature"),
        ("token" = Option<String>, Query, description = "Login token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "Featured and similar classes", body = ClassViewResponse),
        (status = 404, description = "No classes available")
    ),
    security((), ("bearer_auth" = []), ("query_token" = [])),
    tag = "classes"
)]
pub async fn class_view(
    State(state): State<AppState>,
    auth: BearerHeader,
    Query(query): Query<ClassesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = request_viewer(&state, auth, &query);
    let classes = load_classes(&state, &query).await?;
    let view = ClassView::select(&classes, query.selected.as_deref())
        .ok_or_else(|| ApiError::NotFound("No classes available.".into()))?;
    Ok(Json(view.render(viewer, Utc::now())))
}

#[utoipa::path(
    post,
    path = "/classes/{id}/join",
    params(
        ("id" = String, Path, description = "Class id"),
        ("date" = Option<String>, Query, description = "Schedule date (YYYY-MM-DD), defaults to today"),
        ("page" = Option<u32>, Query, description = "Result page (1-50)"),
        ("token" = Option<String>, Query, description = "Login token (alternative to Bearer header)")
    ),
    responses(
        (status = 200, description = "Join modal contents", body = JoinModal),
        (status = 401, description = "Login required"),
        (status = 404, description = "Class not found")
    ),
    security(("bearer_auth" = []), ("query_token" = [])),
    tag = "classes"
)]
pub async fn join_class(
    State(state): State<AppState>,
    auth: BearerHeader,
    Path(id): Path<String>,
    Query(query): Query<ClassesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let viewer = request_viewer(&state, auth, &query);
    let class = find_class(&state, &query, &id).await?;
    let modal = request_join(viewer, &class, Utc::now())?;
    Ok(Json(modal))
}

#[utoipa::path(
    get,
    path = "/classes/{id}/countdown",
    params(
        ("id" = String, Path, description = "Class id"),
        ("date" = Option<String>, Query, description = "Schedule date (YYYY-MM-DD), defaults to today"),
        ("page" = Option<u32>, Query, description = "Result page (1-50)")
    ),
    responses(
        (status = 200, description = "Stream of `tick` events, one per second", body = ModalCountdown, content_type = "text/event-stream"),
        (status = 400, description = "Invalid page"),
        (status = 404, description = "Class not found")
    ),
    tag = "classes"
)]
pub async fn countdown(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ClassesQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, ApiError> {
    let class = find_class(&state, &query, &id).await?;
    tracing::debug!(class_id = %class.id, "countdown stream started");

    let schedule = class.schedule();
    let events = countdown_stream(schedule.start_instant, TICK_PERIOD)
        .map(|tick| Event::default().event("tick").json_data(tick));
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

#[utoipa::path(
    get,
    path = "/classes.ical",
    params(
        ("date" = Option<String>, Query, description = "Schedule date (YYYY-MM-DD), defaults to today"),
        ("page" = Option<u32>, Query, description = "Result page (1-50)")
    ),
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 404, description = "No classes available")
    ),
    tag = "classes"
)]
pub async fn get_ical(
    State(state): State<AppState>,
    Query(query): Query<ClassesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let classes = load_classes(&state, &query).await?;
    if classes.is_empty() {
        return Err(ApiError::NotFound("No classes available.".into()));
    }

    let body = state.exporter.generate(&classes);
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            ("content-disposition", "attachment; filename=classes.ics"),
        ],
        body,
    ))
}
