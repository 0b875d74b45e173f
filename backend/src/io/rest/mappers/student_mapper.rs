use crate::domain::models::{ScoredStudent as DomainScoredStudent, StudentRecord};
use crate::domain::scoring::AnalyticsSummary;
use shared::{AnalyticsResponse, ScoredStudent, Student, StudentDetailResponse, StudentListResponse};

/// Mapper from domain student models to shared DTOs.
pub struct StudentMapper;

impl StudentMapper {
    pub fn to_dto(domain: StudentRecord) -> Student {
        let fields = domain.fields;
        Student {
            id: domain.id,
            name: fields.name,
            roll_no: fields.roll_no,
            gender: fields.gender,
            math_score: fields.math_score,
            reading_score: fields.reading_score,
            writing_score: fields.writing_score,
            attendance: fields.attendance,
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_scored_dto(domain: DomainScoredStudent) -> ScoredStudent {
        ScoredStudent {
            student: Self::to_dto(domain.record),
            total_score: domain.scores.total_score,
            avg_score: domain.scores.avg_score,
            performance_label: domain.scores.performance_label,
        }
    }

    pub fn to_list_dto(students: Vec<DomainScoredStudent>) -> StudentListResponse {
        StudentListResponse {
            students: students.into_iter().map(Self::to_scored_dto).collect(),
        }
    }

    pub fn to_detail_dto(student: Option<DomainScoredStudent>) -> StudentDetailResponse {
        StudentDetailResponse {
            student: student.map(Self::to_scored_dto),
        }
    }

    pub fn to_analytics_dto(summary: AnalyticsSummary) -> AnalyticsResponse {
        AnalyticsResponse {
            total_students: summary.total_students,
            main_marks_avg: summary.main_marks_avg,
            avg_attendance: summary.avg_attendance,
            excellent: summary.excellent,
            good: summary.good,
            needs_improvement: summary.needs_improvement,
            below_75: summary.below_75,
            above_and_75: summary.above_and_75,
            top_students: summary.top_students.into_iter().map(Self::to_scored_dto).collect(),
            weak_students: summary.weak_students.into_iter().map(Self::to_scored_dto).collect(),
        }
    }
}
