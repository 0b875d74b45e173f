use chrono::Utc;
use shared::{FieldErrors, StudentForm};
use tracing::{info, warn};

use crate::domain::models::StudentRecord;
use crate::domain::validation::{self, DUPLICATE_ROLL_NUMBER};
use crate::storage::{StorageError, StudentRepository};

#[derive(Debug, thiserror::Error)]
pub enum StudentServiceError {
    #[error("Invalid student form")]
    Validation(FieldErrors),
    #[error("Roll number already exists")]
    DuplicateRollNumber,
    #[error("Student not found: {0}")]
    NotFound(i64),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl StudentServiceError {
    /// Field errors to show on the form, if this error belongs on the form
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            StudentServiceError::Validation(errors) => Some(errors.clone()),
            StudentServiceError::DuplicateRollNumber => {
                let mut errors = FieldErrors::new();
                validation::push_error(&mut errors, "roll_number", DUPLICATE_ROLL_NUMBER);
                Some(errors)
            }
            _ => None,
        }
    }
}

impl From<StorageError> for StudentServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::DuplicateRollNumber => StudentServiceError::DuplicateRollNumber,
            other => StudentServiceError::Storage(other.into()),
        }
    }
}

pub type ServiceResult<T> = Result<T, StudentServiceError>;

/// Service for creating, editing and removing student records
#[derive(Clone)]
pub struct StudentService {
    repository: StudentRepository,
}

impl StudentService {
    pub fn new(repository: StudentRepository) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> ServiceResult<Vec<StudentRecord>> {
        let students = self.repository.list_students().await?;
        info!(count = students.len(), "Listed students");
        Ok(students)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<StudentRecord> {
        match self.repository.get_student(id).await? {
            Some(student) => Ok(student),
            None => {
                warn!(id, "Student not found");
                Err(StudentServiceError::NotFound(id))
            }
        }
    }

    /// Validate the form, check the roll number is free, then insert
    pub async fn create(&self, form: StudentForm) -> ServiceResult<StudentRecord> {
        let fields = validation::validate_form(&form).map_err(StudentServiceError::Validation)?;

        let existing = self.repository.roll_numbers(None).await?;
        if validation::roll_number_taken(&fields.roll_no, &existing) {
            warn!(roll_no = %fields.roll_no, "Rejected duplicate roll number");
            return Err(StudentServiceError::DuplicateRollNumber);
        }

        // The unique index still guards against a concurrent insert of the same roll number
        let student = self.repository.insert_student(&fields, Utc::now()).await?;
        info!(id = student.id, roll_no = %student.fields.roll_no, "Created student");
        Ok(student)
    }

    /// Replace every editable field of an existing student
    pub async fn update(&self, id: i64, form: StudentForm) -> ServiceResult<StudentRecord> {
        let current = self.get(id).await?;

        let fields = validation::validate_form(&form).map_err(StudentServiceError::Validation)?;

        let others = self.repository.roll_numbers(Some(id)).await?;
        if validation::roll_number_taken(&fields.roll_no, &others) {
            warn!(id, roll_no = %fields.roll_no, "Rejected duplicate roll number");
            return Err(StudentServiceError::DuplicateRollNumber);
        }

        if !self.repository.update_student(id, &fields).await? {
            warn!(id, "Student deleted before update");
            return Err(StudentServiceError::NotFound(id));
        }

        info!(id, roll_no = %fields.roll_no, "Updated student");
        Ok(StudentRecord {
            id,
            fields,
            created_at: current.created_at,
        })
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.repository.delete_student(id).await? {
            warn!(id, "Delete requested for missing student");
            return Err(StudentServiceError::NotFound(id));
        }
        info!(id, "Deleted student");
        Ok(())
    }
}
