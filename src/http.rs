use crate::backend::SlotBackend;
use crate::configuration::Configuration;
use crate::error::BookingError;
use crate::types::{DaySummary, SlotView, DATE_FORMAT};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::response::Html;
use axum::{extract::State, Json};
use axum::{
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use tokio::fs;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;
use validator::Validate;

lazy_static! {
    static ref DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

#[derive(Clone)]
pub struct AppState<T: SlotBackend, C: Configuration> {
    pub slot_backend: T,
    pub configuration: C,
}

#[derive(Debug, Deserialize, Validate)]
struct SlotsQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(regex(path = *DATE_REGEX, message = "date must be formatted as YYYY-MM-DD"))]
    date: Option<String>,
    #[serde(rename = "userId", default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 1, max = 128))]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct CallerQuery {
    #[serde(rename = "userId", default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 1, max = 128))]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
struct BookingRequest {
    #[serde(rename = "userId", default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 1, max = 128))]
    user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookingResponse {
    ok: bool,
    slot: SlotView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.trim().is_empty()))
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate, BookingError> {
    let date = date.ok_or(BookingError::MissingParameter("date"))?;
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|err| BookingError::InvalidParameter(format!("invalid date '{date}': {err}")))
}

fn required_caller(user_id: Option<String>) -> Result<String, BookingError> {
    user_id.ok_or(BookingError::MissingParameter("userId"))
}

pub fn create_app<T: SlotBackend, C: Configuration>(slot_backend: T, configuration: C) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/slots", get(get_slots::<T, C>))
        .route("/slots/:id/book", post(book_slot::<T, C>))
        .route("/me/bookings", get(get_bookings::<T, C>))
        .route("/days", get(get_days::<T, C>));

    Router::new()
        .route("/", get(get_frontend::<T, C>))
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(AppState {
            slot_backend,
            configuration,
        })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn get_slots<T: SlotBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    query: Result<Query<SlotsQuery>, QueryRejection>,
) -> Result<Json<Vec<SlotView>>, BookingError> {
    let Query(query) = query.map_err(|err| BookingError::InvalidParameter(err.body_text()))?;
    query.validate()?;
    let date = parse_date(query.date.as_deref())?;
    let caller = query.user_id.as_deref();

    let slots = state
        .slot_backend
        .slots_on(date)
        .iter()
        .map(|slot| slot.view_for(caller))
        .collect();
    Ok(Json(slots))
}

async fn book_slot<T: SlotBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Path(id): Path<String>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, BookingError> {
    let Json(booking) = payload.map_err(|err| match err {
        JsonRejection::MissingJsonContentType(_) => BookingError::MissingParameter("userId"),
        err => BookingError::InvalidParameter(err.body_text()),
    })?;
    booking.validate()?;
    let caller = required_caller(booking.user_id)?;

    let slot = state.slot_backend.book_slot(&id, &caller)?;
    Ok(Json(BookingResponse {
        ok: true,
        slot: slot.view_for(Some(&caller)),
    }))
}

async fn get_bookings<T: SlotBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    query: Result<Query<CallerQuery>, QueryRejection>,
) -> Result<Json<Vec<SlotView>>, BookingError> {
    let Query(query) = query.map_err(|err| BookingError::InvalidParameter(err.body_text()))?;
    query.validate()?;
    let caller = required_caller(query.user_id)?;

    let slots = state
        .slot_backend
        .slots_held_by(&caller)
        .iter()
        .map(|slot| slot.view_for(Some(&caller)))
        .collect();
    Ok(Json(slots))
}

async fn get_days<T: SlotBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Json<Vec<DaySummary>> {
    Json(state.slot_backend.days())
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn get_frontend<T: SlotBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Result<Html<String>, BookingError> {
    let path = state.configuration.frontend_path();
    match fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(contents.replace(
            "{{WEBSITE_TITLE}}",
            &state.configuration.website_title(),
        ))),
        Err(err) => {
            error!(?err, path = %path.display(), "Failed to read frontend file");
            Err(BookingError::Frontend(err.to_string()))
        }
    }
}
