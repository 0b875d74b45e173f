use tracing::info;

use crate::domain::models::ScoredStudent;
use crate::domain::scoring::{self, AnalyticsSummary};
use crate::domain::student_service::ServiceResult;
use crate::storage::StudentRepository;

/// Read-only views that attach derived scores to stored records
#[derive(Clone)]
pub struct AnalyticsService {
    repository: StudentRepository,
}

impl AnalyticsService {
    pub fn new(repository: StudentRepository) -> Self {
        Self { repository }
    }

    /// Every student with total, average and performance label
    pub async fn scored_students(&self) -> ServiceResult<Vec<ScoredStudent>> {
        let students = self.repository.list_students().await?;
        Ok(students.into_iter().map(scoring::score).collect())
    }

    /// One student with derived scores, or `None` if the id is unknown
    pub async fn scored_student(&self, id: i64) -> ServiceResult<Option<ScoredStudent>> {
        let student = self.repository.get_student(id).await?;
        Ok(student.map(scoring::score))
    }

    pub async fn summary(&self) -> ServiceResult<AnalyticsSummary> {
        let students = self.repository.list_students().await?;
        let summary = scoring::analyze(students);
        info!(
            total_students = summary.total_students,
            main_marks_avg = summary.main_marks_avg,
            "Computed analytics summary"
        );
        Ok(summary)
    }
}
