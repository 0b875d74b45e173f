//! # Student Records Backend
//!
//! A small web service for student academic records: CRUD over a single
//! SQLite table plus a derived analytics dashboard.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum handlers, DTO mappers)
//!     ↓
//! Domain Layer (validation, scoring, services)
//!     ↓
//! Storage Layer (SQLite repository)
//! ```
//!
//! The database connection is created once in [`initialize_backend`] and
//! handed to every service through [`AppState`].

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::config::AppConfig;
use crate::domain::{AnalyticsService, StudentService};
use crate::io::rest::{analytics_apis, student_apis};
use crate::storage::{DbConnection, StudentRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub student_service: StudentService,
    pub analytics_service: AnalyticsService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<(AppState, DbConnection)> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let repository = StudentRepository::new(db.clone());
    let app_state = AppState {
        student_service: StudentService::new(repository.clone()),
        analytics_service: AnalyticsService::new(repository),
    };

    Ok((app_state, db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(student_apis::home))
        .route("/students", get(student_apis::list_students))
        .route(
            "/add",
            get(student_apis::show_add_form).post(student_apis::submit_add_form),
        )
        .route(
            "/edit/:id",
            get(student_apis::show_edit_form).post(student_apis::submit_edit_form),
        )
        .route("/delete/:id", post(student_apis::delete_student))
        .route("/student/:id", get(student_apis::student_detail))
        .route("/analytics", get(analytics_apis::get_analytics))
        .layer(cors_layer(cors_allowed_origins))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(app_state)
}

/// CORS for a separately served frontend. Only an explicit `*` allows any
/// origin; an empty list allows none.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }
    if allowed_origins.is_empty() {
        warn!("No CORS origins configured, cross-origin requests will be refused");
        return cors;
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}
