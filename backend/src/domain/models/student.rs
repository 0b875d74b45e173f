use chrono::{DateTime, Utc};
use shared::PerformanceLabel;

/// The user-editable part of a student record, already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub name: String,
    pub roll_no: String,
    pub gender: String,
    pub math_score: u8,
    pub reading_score: u8,
    pub writing_score: u8,
    pub attendance: u8,
}

/// A persisted student. `id` and `created_at` never change after insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: i64,
    pub fields: StudentFields,
    pub created_at: DateTime<Utc>,
}

/// Values computed from a record's scores; never stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedScores {
    pub total_score: u32,
    pub avg_score: f64,
    pub performance_label: PerformanceLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredStudent {
    pub record: StudentRecord,
    pub scores: DerivedScores,
}
