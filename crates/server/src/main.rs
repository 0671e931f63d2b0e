// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use slotbook_api::{
    ApiError, AppointmentInfo, AppointmentSettingsBody, AvailabilitySettingsResponse,
    CreateAppointmentRequest, CreatePackageRequest, CreateSellerRequest,
    CreateUnavailabilityRequest, ListSlotsRequest, ListSlotsResponse, ListUnavailabilityRequest,
    ListUnavailabilityResponse, PackageInfo, ReplaceAvailabilityRequest, SellerInfo,
    UnavailabilityInfo, ViolationInfo, WeeklyAvailabilityEntry, params,
};
use slotbook_domain::{DEFAULT_SLOT_MINUTES, validate_slot_minutes};
use slotbook_persistence::SqlitePersistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// slotbook server - HTTP front end for the seller appointment slot engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Slot cadence in minutes used when a request omits `slotMinutes`
    #[arg(long, default_value_t = DEFAULT_SLOT_MINUTES)]
    default_slot_minutes: u32,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer. Each request holds the lock for its whole
    /// read or write sequence.
    persistence: Arc<Mutex<SqlitePersistence>>,
    /// Cadence applied when `slotMinutes` is absent.
    default_slot_minutes: u32,
}

/// Raw `/slots` query parameters, parsed by hand so bad values name the parameter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotsQuery {
    seller_id: Option<String>,
    package_id: Option<String>,
    date: Option<String>,
    slot_minutes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UnavailabilityQuery {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityApiRequest {
    availability: Vec<WeeklyAvailabilityEntry>,
    settings: AppointmentSettingsBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreateSellerApiRequest {
    name: String,
    timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePackageApiRequest {
    seller_id: i64,
    name: String,
    duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateUnavailabilityApiRequest {
    start_time: String,
    end_time: String,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAppointmentApiRequest {
    seller_id: i64,
    package_id: i64,
    start_time: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Machine-readable error category.
    error: String,
    /// Error message.
    message: String,
    /// Settings violations, present only for rejected submissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    violations: Option<Vec<ViolationInfo>>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// Error category.
    code: &'static str,
    /// The error message.
    message: String,
    /// Settings violations.
    violations: Option<Vec<ViolationInfo>>,
}

impl HttpError {
    fn new(status: StatusCode, code: &'static str, message: String) -> Self {
        Self {
            status,
            code,
            message,
            violations: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.code.to_string(),
            message: self.message,
            violations: self.violations,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::InvalidInput { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "invalid_input", message)
            }
            ApiError::ValidationFailed { violations } => Self {
                status: StatusCode::BAD_REQUEST,
                code: "validation_failed",
                message,
                violations: Some(violations),
            },
            ApiError::ResourceNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "not_found", message)
            }
            ApiError::DomainRuleViolation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "rule_violation", message)
            }
            ApiError::Conflict { .. } => Self::new(StatusCode::CONFLICT, "conflict", message),
            ApiError::ServiceUnavailable { .. } => {
                warn!(error = %message, "Storage unavailable");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "unavailable", message)
            }
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
            }
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        let message: String = rejection.body_text();
        let violations: Option<Vec<ViolationInfo>> = match &rejection {
            JsonRejection::JsonDataError(_) => Some(vec![body_violation(&message)]),
            _ => None,
        };
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "invalid_input",
            message,
            violations,
        }
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_input", rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_input", rejection.body_text())
    }
}

/// Builds a violation from a JSON data error.
///
/// The rejection text reads `<summary>: <field path>: <reason>`; the path is
/// omitted when the error sits at the document root.
fn body_violation(rejection_text: &str) -> ViolationInfo {
    let detail: &str = rejection_text
        .split_once(": ")
        .map_or(rejection_text, |(_, rest)| rest);
    let (field, reason) = match detail.split_once(": ") {
        Some((path, reason)) if !path.contains(char::is_whitespace) => (path, reason),
        _ => ("body", detail),
    };
    ViolationInfo {
        field: field.to_string(),
        constraint: String::from("invalid_type"),
        message: reason.to_string(),
    }
}

impl From<slotbook_api::ParamError> for HttpError {
    fn from(err: slotbook_api::ParamError) -> Self {
        ApiError::from(err).into()
    }
}

/// Handler for GET `/slots`.
async fn handle_list_slots(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<SlotsQuery>, QueryRejection>,
) -> Result<Json<ListSlotsResponse>, HttpError> {
    let Query(query) = query?;
    let request: ListSlotsRequest = ListSlotsRequest {
        seller_id: params::required_integer("sellerId", query.seller_id.as_deref())?,
        package_id: params::required_integer("packageId", query.package_id.as_deref())?,
        date: params::required_string("date", query.date.as_deref())?,
        slot_minutes: params::optional_integer("slotMinutes", query.slot_minutes.as_deref())?,
    };
    info!(
        seller_id = request.seller_id,
        package_id = request.package_id,
        date = %request.date,
        "Handling list_slots request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ListSlotsResponse = slotbook_api::list_slots(
        &mut persistence,
        &request,
        app_state.default_slot_minutes,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PUT `/sellers/{seller_id}/availability`.
async fn handle_replace_availability(
    AxumState(app_state): AxumState<AppState>,
    seller_id: Result<Path<i64>, PathRejection>,
    req: Result<Json<AvailabilityApiRequest>, JsonRejection>,
) -> Result<Json<AvailabilitySettingsResponse>, HttpError> {
    let Path(seller_id) = seller_id?;
    let Json(req) = req?;
    info!(seller_id, "Handling replace_availability request");

    let request: ReplaceAvailabilityRequest = ReplaceAvailabilityRequest {
        seller_id,
        availability: req.availability,
        settings: req.settings,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AvailabilitySettingsResponse =
        slotbook_api::replace_availability_settings(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/sellers/{seller_id}/availability`.
async fn handle_get_availability(
    AxumState(app_state): AxumState<AppState>,
    seller_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<AvailabilitySettingsResponse>, HttpError> {
    let Path(seller_id) = seller_id?;
    let mut persistence = app_state.persistence.lock().await;
    let response: AvailabilitySettingsResponse =
        slotbook_api::get_availability_settings(&mut persistence, seller_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/sellers`.
async fn handle_create_seller(
    AxumState(app_state): AxumState<AppState>,
    req: Result<Json<CreateSellerApiRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SellerInfo>), HttpError> {
    let Json(req) = req?;
    let request: CreateSellerRequest = CreateSellerRequest {
        name: req.name,
        timezone: req.timezone,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: SellerInfo = slotbook_api::create_seller(&mut persistence, &request)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/sellers/{seller_id}`.
async fn handle_get_seller(
    AxumState(app_state): AxumState<AppState>,
    seller_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SellerInfo>, HttpError> {
    let Path(seller_id) = seller_id?;
    let mut persistence = app_state.persistence.lock().await;
    let response: SellerInfo = slotbook_api::get_seller(&mut persistence, seller_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/packages`.
async fn handle_create_package(
    AxumState(app_state): AxumState<AppState>,
    req: Result<Json<CreatePackageApiRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PackageInfo>), HttpError> {
    let Json(req) = req?;
    let request: CreatePackageRequest = CreatePackageRequest {
        seller_id: req.seller_id,
        name: req.name,
        duration_minutes: req.duration_minutes,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: PackageInfo = slotbook_api::create_package(&mut persistence, &request)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/sellers/{seller_id}/unavailability`.
async fn handle_create_unavailability(
    AxumState(app_state): AxumState<AppState>,
    seller_id: Result<Path<i64>, PathRejection>,
    req: Result<Json<CreateUnavailabilityApiRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UnavailabilityInfo>), HttpError> {
    let Path(seller_id) = seller_id?;
    let Json(req) = req?;
    let request: CreateUnavailabilityRequest = CreateUnavailabilityRequest {
        seller_id,
        start_time: req.start_time,
        end_time: req.end_time,
        reason: req.reason,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: UnavailabilityInfo =
        slotbook_api::create_unavailability(&mut persistence, &request)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/sellers/{seller_id}/unavailability`.
async fn handle_list_unavailability(
    AxumState(app_state): AxumState<AppState>,
    seller_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<UnavailabilityQuery>, QueryRejection>,
) -> Result<Json<ListUnavailabilityResponse>, HttpError> {
    let Path(seller_id) = seller_id?;
    let Query(query) = query?;
    let request: ListUnavailabilityRequest = ListUnavailabilityRequest {
        seller_id,
        from: params::required_string("from", query.from.as_deref())?,
        to: params::required_string("to", query.to.as_deref())?,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ListUnavailabilityResponse =
        slotbook_api::list_unavailability(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/unavailability/{unavailability_id}`.
async fn handle_delete_unavailability(
    AxumState(app_state): AxumState<AppState>,
    unavailability_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, HttpError> {
    let Path(unavailability_id) = unavailability_id?;
    let mut persistence = app_state.persistence.lock().await;
    slotbook_api::delete_unavailability(&mut persistence, unavailability_id)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST `/appointments`.
async fn handle_create_appointment(
    AxumState(app_state): AxumState<AppState>,
    req: Result<Json<CreateAppointmentApiRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AppointmentInfo>), HttpError> {
    let Json(req) = req?;
    info!(
        seller_id = req.seller_id,
        package_id = req.package_id,
        start_time = %req.start_time,
        "Handling create_appointment request"
    );

    let request: CreateAppointmentRequest = CreateAppointmentRequest {
        seller_id: req.seller_id,
        package_id: req.package_id,
        start_time: req.start_time,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AppointmentInfo = slotbook_api::book_appointment(&mut persistence, &request)?;
    drop(persistence);

    info!(
        appointment_id = response.appointment_id,
        "Successfully booked appointment"
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/appointments/{appointment_id}/cancel`.
async fn handle_cancel_appointment(
    AxumState(app_state): AxumState<AppState>,
    appointment_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<AppointmentInfo>, HttpError> {
    let Path(appointment_id) = appointment_id?;
    info!(appointment_id, "Handling cancel_appointment request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AppointmentInfo =
        slotbook_api::cancel_appointment(&mut persistence, appointment_id)?;
    drop(persistence);

    Ok(Json(response))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/slots", get(handle_list_slots))
        .route("/sellers", post(handle_create_seller))
        .route("/sellers/{seller_id}", get(handle_get_seller))
        .route(
            "/sellers/{seller_id}/availability",
            get(handle_get_availability).put(handle_replace_availability),
        )
        .route(
            "/sellers/{seller_id}/unavailability",
            get(handle_list_unavailability).post(handle_create_unavailability),
        )
        .route(
            "/unavailability/{unavailability_id}",
            delete(handle_delete_unavailability),
        )
        .route("/packages", post(handle_create_package))
        .route("/appointments", post(handle_create_appointment))
        .route(
            "/appointments/{appointment_id}/cancel",
            post(handle_cancel_appointment),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing slotbook server");

    let default_slot_minutes: u32 =
        validate_slot_minutes(i64::from(args.default_slot_minutes))?;

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        default_slot_minutes,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(default_slot_minutes, "Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
