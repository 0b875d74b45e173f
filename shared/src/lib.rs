use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw student form as submitted by the browser.
///
/// Every field is kept as text so that missing or non-numeric input can be
/// reported per field instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentForm {
    pub name: String,
    pub roll_number: String,
    pub gender: String,
    pub math_score: String,
    pub reading_score: String,
    pub writing_score: String,
    pub attendance: String,
}

/// Field name -> error messages, in a stable order for rendering
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Performance bucket derived from a student's average score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceLabel {
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Good,
    Excellent,
}

impl PerformanceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceLabel::NeedsImprovement => "Needs Improvement",
            PerformanceLabel::Good => "Good",
            PerformanceLabel::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for PerformanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored student record as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub roll_no: String,
    pub gender: String,
    pub math_score: u8,
    pub reading_score: u8,
    pub writing_score: u8,
    pub attendance: u8,
    /// Creation time (RFC 3339)
    pub created_at: String,
}

/// A student together with the fields computed from its scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredStudent {
    #[serde(flatten)]
    pub student: Student,
    pub total_score: u32,
    pub avg_score: f64,
    pub performance_label: PerformanceLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<ScoredStudent>,
}

/// Detail page model; `student` is `None` when the id does not exist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDetailResponse {
    pub student: Option<ScoredStudent>,
}

/// Add/edit page model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormView {
    /// Record being edited, `None` on the add page
    pub id: Option<i64>,
    /// False when editing an id that does not exist
    pub exists: bool,
    pub form: StudentForm,
    pub errors: FieldErrors,
}

impl FormView {
    pub fn empty() -> Self {
        Self {
            id: None,
            exists: true,
            form: StudentForm::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn missing(id: i64) -> Self {
        Self {
            id: Some(id),
            exists: false,
            form: StudentForm::default(),
            errors: FieldErrors::new(),
        }
    }
}

/// Class-wide statistics for the analytics dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub total_students: usize,
    pub main_marks_avg: f64,
    pub avg_attendance: f64,
    pub excellent: usize,
    pub good: usize,
    pub needs_improvement: usize,
    pub below_75: usize,
    pub above_and_75: usize,
    /// At most five students, best average first
    pub top_students: Vec<ScoredStudent>,
    pub weak_students: Vec<ScoredStudent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeResponse {
    pub name: String,
    pub version: String,
    pub routes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
