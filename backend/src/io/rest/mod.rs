//! # REST Interface Layer
//!
//! HTTP handlers for the student records service. This layer only
//! translates between HTTP and the domain services:
//! - form/path extraction
//! - domain errors to status codes (422 form errors, 404 missing records)
//! - domain models to shared DTOs via the mappers

pub mod analytics_apis;
pub mod mappers;
pub mod student_apis;
