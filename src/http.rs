use crate::backend::BookingBackend;
use crate::errors::BookingError;
use crate::export;
use crate::types::{Booking, BookingRequest};
use crate::AppState;
use axum::extract::{Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OptionsResponse {
    labs: Vec<String>,
    locations: Vec<String>,
    timeslots: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AvailabilityParams {
    date: Option<String>,
    location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvailabilityResponse {
    date: String,
    location: String,
    taken: BTreeSet<(String, String)>,
    bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookResponse {
    id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RemoveBookingRequest {
    id: String,
}

pub async fn start_server<B: BookingBackend>(state: AppState<B>) {
    let port = state.configuration.port;
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .unwrap();
    tracing::info!(%port, "listening for booking requests");
    axum::serve(listener, app).await.unwrap();
}

pub fn app<B: BookingBackend>(state: AppState<B>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/options", get(get_options::<B>))
        .route("/availability", get(get_availability::<B>))
        .route("/book", post(book::<B>));

    let admin = Router::new()
        .route("/admin/bookings", get(get_admin_bookings::<B>))
        .route("/admin/remove", post(remove_booking::<B>))
        .route("/admin/export/csv", get(export_csv::<B>))
        .route("/admin/export/pdf", get(export_pdf::<B>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<B>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

async fn admin_auth<B: BookingBackend>(
    State(state): State<AppState<B>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    match request.headers().get("x-admin-password") {
        Some(value) if value.to_str().unwrap_or("") == state.configuration.admin_password => {
            Ok(next.run(request).await)
        }
        Some(_) => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        None => Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
}

async fn get_options<B: BookingBackend>(State(state): State<AppState<B>>) -> impl IntoResponse {
    Json(OptionsResponse {
        labs: state.configuration.labs.clone(),
        locations: state.configuration.locations.clone(),
        timeslots: state.configuration.timeslots.clone(),
    })
}

async fn get_availability<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityResponse>, (StatusCode, String)> {
    let date = params
        .date
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let location = params.location.unwrap_or_else(|| {
        state
            .configuration
            .locations
            .first()
            .cloned()
            .unwrap_or_default()
    });

    let availability = state
        .booking_manager
        .availability(&date, &location)
        .map_err(internal_error)?;
    Ok(Json(AvailabilityResponse {
        date,
        location,
        taken: availability.taken,
        bookings: availability.bookings,
    }))
}

async fn book<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<BookingRequest>,
) -> Result<Json<BookResponse>, (StatusCode, String)> {
    match state.booking_manager.book(request) {
        Ok(id) => Ok(Json(BookResponse { id })),
        Err(BookingError::Conflict) => Err((
            StatusCode::CONFLICT,
            "That lab and timeslot are already booked at this location.".to_string(),
        )),
        Err(BookingError::Store(err)) => Err(internal_error(err)),
    }
}

async fn get_admin_bookings<B: BookingBackend>(
    State(state): State<AppState<B>>,
) -> Result<Json<Vec<Booking>>, (StatusCode, String)> {
    let bookings = state.booking_manager.bookings().map_err(internal_error)?;
    Ok(Json(bookings))
}

async fn remove_booking<B: BookingBackend>(
    State(state): State<AppState<B>>,
    Json(request): Json<RemoveBookingRequest>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    let removed = state
        .booking_manager
        .remove_booking(&request.id)
        .map_err(internal_error)?;
    if removed {
        Ok((StatusCode::OK, "Booking deleted".to_string()))
    } else {
        Err((StatusCode::NOT_FOUND, "Booking not found".to_string()))
    }
}

async fn export_csv<B: BookingBackend>(
    State(state): State<AppState<B>>,
) -> Result<Response, (StatusCode, String)> {
    let bookings = state.booking_manager.bookings().map_err(internal_error)?;
    let body = export::bookings_to_csv(&bookings).map_err(internal_error)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"bookings.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

async fn export_pdf<B: BookingBackend>(
    State(state): State<AppState<B>>,
) -> Result<Response, (StatusCode, String)> {
    let bookings = state.booking_manager.bookings().map_err(internal_error)?;
    let body = export::bookings_to_pdf(&bookings).map_err(internal_error)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"bookings.pdf\"",
            ),
        ],
        body,
    )
        .into_response())
}

fn internal_error(err: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!(error = %err, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
