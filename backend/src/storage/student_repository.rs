use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{StudentFields, StudentRecord};
use crate::storage::{DbConnection, StorageError};

/// Repository for student records
#[derive(Clone)]
pub struct StudentRepository {
    db: DbConnection,
}

impl StudentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List every student in insertion order
    pub async fn list_students(&self) -> Result<Vec<StudentRecord>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, roll_no, gender, math_score, reading_score, writing_score, attendance, created_at
            FROM students
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Get a student by ID
    pub async fn get_student(&self, id: i64) -> Result<Option<StudentRecord>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, roll_no, gender, math_score, reading_score, writing_score, attendance, created_at
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    /// Insert a new student and return it with its assigned ID
    pub async fn insert_student(
        &self,
        fields: &StudentFields,
        created_at: DateTime<Utc>,
    ) -> Result<StudentRecord, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO students (name, roll_no, gender, math_score, reading_score, writing_score, attendance, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.roll_no)
        .bind(&fields.gender)
        .bind(fields.math_score)
        .bind(fields.reading_score)
        .bind(fields.writing_score)
        .bind(fields.attendance)
        .bind(created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        Ok(StudentRecord {
            id: result.last_insert_rowid(),
            fields: fields.clone(),
            created_at,
        })
    }

    /// Overwrite every mutable column. Returns false if no row has this ID.
    pub async fn update_student(&self, id: i64, fields: &StudentFields) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE students
            SET name = ?, roll_no = ?, gender = ?, math_score = ?, reading_score = ?, writing_score = ?, attendance = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.roll_no)
        .bind(&fields.gender)
        .bind(fields.math_score)
        .bind(fields.reading_score)
        .bind(fields.writing_score)
        .bind(fields.attendance)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a student. Returns false if no row has this ID.
    pub async fn delete_student(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Roll numbers of every student except `excluding`
    pub async fn roll_numbers(&self, excluding: Option<i64>) -> Result<Vec<String>, StorageError> {
        let rows = match excluding {
            Some(id) => {
                sqlx::query("SELECT roll_no FROM students WHERE id != ?")
                    .bind(id)
                    .fetch_all(self.db.pool())
                    .await?
            }
            None => {
                sqlx::query("SELECT roll_no FROM students")
                    .fetch_all(self.db.pool())
                    .await?
            }
        };

        let roll_numbers = rows
            .iter()
            .map(|row| row.try_get("roll_no"))
            .collect::<Result<Vec<String>, sqlx::Error>>()?;
        Ok(roll_numbers)
    }

    fn map_row(row: &SqliteRow) -> Result<StudentRecord, StorageError> {
        let created_at: String = row.try_get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at)?.with_timezone(&Utc);

        Ok(StudentRecord {
            id: row.try_get("id")?,
            fields: StudentFields {
                name: row.try_get("name")?,
                roll_no: row.try_get("roll_no")?,
                gender: row.try_get("gender")?,
                math_score: row.try_get("math_score")?,
                reading_score: row.try_get("reading_score")?,
                writing_score: row.try_get("writing_score")?,
                attendance: row.try_get("attendance")?,
            },
            created_at,
        })
    }
}
