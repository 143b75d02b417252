//! # API REST
//!
//! REST API implementation for Patientor.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON extraction, status mapping, CORS)
//!
//! Validation and storage live in `patientor-core`; handlers only translate between HTTP and
//! the core services.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{rejection::JsonRejection, Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use patientor_core::{
    Diagnosis, DiagnosisService, Entry, NewPatient, NonSensitivePatient, Patient, PatientError,
    PatientService, Services,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Plain-text error response: status plus the message sent as the body.
type ApiError = (StatusCode, String);

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    patient_service: PatientService,
    diagnosis_service: DiagnosisService,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        Self {
            patient_service: services.patients,
            diagnosis_service: services.diagnoses,
        }
    }
}

/// Health check response body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_patients,
        get_patient,
        create_patient,
        add_entry,
        list_diagnoses,
        save_diagnosis,
    ),
    components(schemas(HealthRes, NonSensitivePatient, Patient, NewPatient, patientor_core::Gender, Diagnosis))
)]
pub struct ApiDoc;

/// Build the REST application: routes, OpenAPI/Swagger UI and a permissive CORS layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/patients", get(list_patients).post(create_patient))
        .route("/patients/:id", get(get_patient))
        .route("/patients/:id/entries", post(add_entry))
        .route("/diagnoses", get(list_diagnoses).post(save_diagnosis))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Patientor REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "Patients without national ids or entries", body = [NonSensitivePatient]),
        (status = 500, description = "Internal server error")
    )
)]
/// List all patients
///
/// National ids (`ssn`) and entry histories are omitted.
///
/// # Errors
/// Returns `500 Internal Server Error` if the record store is unavailable.
#[axum::debug_handler]
async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<NonSensitivePatient>>, ApiError> {
    state
        .patient_service
        .list_non_sensitive()
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = String, Path, description = "Patient id (32 lowercase hex characters)")),
    responses(
        (status = 200, description = "Zero or one matching patients", body = [Patient]),
        (status = 500, description = "Internal server error")
    )
)]
/// Fetch a full patient record
///
/// Responds with an array holding the matching patient, or an empty array when no patient has
/// the given id.
#[axum::debug_handler]
async fn get_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    state
        .patient_service
        .get_patient(&id)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = NewPatient,
    responses(
        (status = 200, description = "Patient created", body = Patient),
        (status = 400, description = "Validation failure, message as plain text"),
        (status = 500, description = "Internal server error")
    )
)]
/// Create a new patient
///
/// The body is validated field by field; the first invalid field is reported as plain text.
/// The store assigns the id and starts the patient with no entries.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let payload = json_payload(body)?;
    state
        .patient_service
        .add_patient(&payload)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/patients/{id}/entries",
    params(("id" = String, Path, description = "Patient id (32 lowercase hex characters)")),
    request_body = Value,
    responses(
        (status = 200, description = "Entry created: a HealthCheck, Hospital or OccupationalHealthcare entry discriminated by `type`"),
        (status = 400, description = "Validation failure, message as plain text"),
        (status = 404, description = "Patient not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Append a medical entry to a patient
#[axum::debug_handler]
async fn add_entry(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let payload = json_payload(body)?;
    state
        .patient_service
        .add_entry(&id, &payload)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/diagnoses",
    responses(
        (status = 200, description = "Diagnosis reference data", body = [Diagnosis])
    )
)]
/// List diagnosis codes
#[axum::debug_handler]
async fn list_diagnoses(State(state): State<AppState>) -> Json<Vec<Diagnosis>> {
    Json(state.diagnosis_service.list())
}

#[utoipa::path(
    post,
    path = "/diagnoses",
    responses(
        (status = 200, description = "Static acknowledgement; diagnoses are read-only", body = String)
    )
)]
/// Placeholder for diagnosis creation
#[axum::debug_handler]
async fn save_diagnosis(State(_state): State<AppState>) -> &'static str {
    "Saving a diagnosis!"
}

fn json_payload(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => {
            tracing::warn!("rejected request body: {}", rejection.body_text());
            Err((StatusCode::BAD_REQUEST, rejection.body_text()))
        }
    }
}

fn error_response(err: PatientError) -> ApiError {
    let status = match &err {
        PatientError::Validation(_) => StatusCode::BAD_REQUEST,
        PatientError::PatientNotFound(_) => StatusCode::NOT_FOUND,
        _ => {
            tracing::error!("Internal error: {:?}", err);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into());
        }
    };
    (status, err.to_string())
}
