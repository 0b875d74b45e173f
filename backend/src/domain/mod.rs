//! # Domain Module
//!
//! Business rules for student records:
//! - **models** - stored record and derived score types
//! - **validation** - form field rules and roll number matching
//! - **scoring** - derived scores and class analytics
//! - **student_service** - create/update/delete with uniqueness checks
//! - **analytics_service** - read-side views with derived scores

pub mod analytics_service;
pub mod models;
pub mod scoring;
pub mod student_service;
pub mod validation;

pub use analytics_service::AnalyticsService;
pub use student_service::{StudentService, StudentServiceError};
