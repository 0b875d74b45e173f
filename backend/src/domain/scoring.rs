//! # Scoring & Analytics
//!
//! Pure computations over student records: per-record derived scores and the
//! class-wide dashboard summary. Nothing here touches storage or mutates a
//! record; derived values are returned alongside the record they came from.

use shared::PerformanceLabel;

use crate::domain::models::{DerivedScores, ScoredStudent, StudentRecord};

/// Averages below this are "Needs Improvement"
pub const GOOD_THRESHOLD: f64 = 70.0;
/// Averages at or above this are "Excellent"
pub const EXCELLENT_THRESHOLD: f64 = 85.0;
/// Attendance below this counts towards `below_75`
pub const ATTENDANCE_THRESHOLD: u8 = 75;
pub const TOP_STUDENTS: usize = 5;

/// Round to two decimal places.
///
/// Formatting rounds the exact binary value, so 0.835 (stored as
/// 0.83499999...) becomes 0.83; scaling by 100 first would give 0.84.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

pub fn label_for(avg_score: f64) -> PerformanceLabel {
    if avg_score < GOOD_THRESHOLD {
        PerformanceLabel::NeedsImprovement
    } else if avg_score < EXCELLENT_THRESHOLD {
        PerformanceLabel::Good
    } else {
        PerformanceLabel::Excellent
    }
}

pub fn derive(record: &StudentRecord) -> DerivedScores {
    let fields = &record.fields;
    let total_score =
        u32::from(fields.math_score) + u32::from(fields.reading_score) + u32::from(fields.writing_score);
    let avg_score = round2(f64::from(total_score) / 3.0);

    DerivedScores {
        total_score,
        avg_score,
        performance_label: label_for(avg_score),
    }
}

pub fn score(record: StudentRecord) -> ScoredStudent {
    let scores = derive(&record);
    ScoredStudent { record, scores }
}

/// Dashboard statistics. All values stay zero for an empty class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsSummary {
    pub total_students: usize,
    pub main_marks_avg: f64,
    pub avg_attendance: f64,
    pub excellent: usize,
    pub good: usize,
    pub needs_improvement: usize,
    pub below_75: usize,
    pub above_and_75: usize,
    pub top_students: Vec<ScoredStudent>,
    pub weak_students: Vec<ScoredStudent>,
}

pub fn analyze(records: Vec<StudentRecord>) -> AnalyticsSummary {
    let mut summary = AnalyticsSummary::default();
    if records.is_empty() {
        return summary;
    }

    let scored: Vec<ScoredStudent> = records.into_iter().map(score).collect();
    let mut marks_sum = 0.0;
    let mut attendance_sum = 0.0;

    for student in &scored {
        marks_sum += student.scores.avg_score;
        attendance_sum += f64::from(student.record.fields.attendance);

        match student.scores.performance_label {
            PerformanceLabel::NeedsImprovement => {
                summary.needs_improvement += 1;
                summary.weak_students.push(student.clone());
            }
            PerformanceLabel::Good => summary.good += 1,
            PerformanceLabel::Excellent => summary.excellent += 1,
        }

        if student.record.fields.attendance < ATTENDANCE_THRESHOLD {
            summary.below_75 += 1;
        } else {
            summary.above_and_75 += 1;
        }
    }

    let count = scored.len();
    summary.total_students = count;
    summary.main_marks_avg = round2(marks_sum / count as f64);
    summary.avg_attendance = round2(attendance_sum / count as f64);

    // sort_by is stable: equal averages keep their original order
    let mut ranked = scored;
    ranked.sort_by(|a, b| b.scores.avg_score.total_cmp(&a.scores.avg_score));
    ranked.truncate(TOP_STUDENTS);
    summary.top_students = ranked;

    summary
}
