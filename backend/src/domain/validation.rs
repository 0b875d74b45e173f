//! Field rules for the add/edit student form.
//!
//! Rules are applied per field and every failing field is reported, so the
//! form can show all messages at once. Roll number uniqueness is not checked
//! here; it needs the store and only runs once these rules pass.

use shared::{FieldErrors, StudentForm};

use crate::domain::models::StudentFields;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_AN_INTEGER: &str = "Not a valid integer value.";
pub const OUT_OF_RANGE: &str = "Number must be between 0 and 100.";
pub const DUPLICATE_ROLL_NUMBER: &str =
    "Roll number already exists. Please enter a different roll number.";

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_ROLL_NUMBER_LEN: usize = 50;
pub const MAX_GENDER_LEN: usize = 10;

const MIN_SCORE: i64 = 0;
const MAX_SCORE: i64 = 100;

/// Validate a submitted form, producing typed fields or per-field messages
pub fn validate_form(form: &StudentForm) -> Result<StudentFields, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required_text(&mut errors, "name", &form.name, MAX_NAME_LEN);
    let roll_no = required_text(&mut errors, "roll_number", &form.roll_number, MAX_ROLL_NUMBER_LEN);
    let gender = required_text(&mut errors, "gender", &form.gender, MAX_GENDER_LEN);
    let math_score = score(&mut errors, "math_score", &form.math_score);
    let reading_score = score(&mut errors, "reading_score", &form.reading_score);
    let writing_score = score(&mut errors, "writing_score", &form.writing_score);
    let attendance = score(&mut errors, "attendance", &form.attendance);

    match (name, roll_no, gender, math_score, reading_score, writing_score, attendance) {
        (
            Some(name),
            Some(roll_no),
            Some(gender),
            Some(math_score),
            Some(reading_score),
            Some(writing_score),
            Some(attendance),
        ) if errors.is_empty() => Ok(StudentFields {
            name,
            roll_no,
            gender,
            math_score,
            reading_score,
            writing_score,
            attendance,
        }),
        _ => Err(errors),
    }
}

/// Case-insensitive roll number match against existing values
pub fn roll_number_taken<'a, I>(roll_no: &str, existing: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let wanted = roll_no.to_lowercase();
    existing.into_iter().any(|other| other.to_lowercase() == wanted)
}

/// The form as it should be re-displayed for an existing record
pub fn form_from_fields(fields: &StudentFields) -> StudentForm {
    StudentForm {
        name: fields.name.clone(),
        roll_number: fields.roll_no.clone(),
        gender: fields.gender.clone(),
        math_score: fields.math_score.to_string(),
        reading_score: fields.reading_score.to_string(),
        writing_score: fields.writing_score.to_string(),
        attendance: fields.attendance.to_string(),
    }
}

pub fn push_error(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

fn required_text(errors: &mut FieldErrors, field: &str, raw: &str, max_len: usize) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        push_error(errors, field, REQUIRED);
        return None;
    }
    if value.chars().count() > max_len {
        push_error(errors, field, format!("Field cannot be longer than {} characters.", max_len));
        return None;
    }
    Some(value.to_string())
}

fn score(errors: &mut FieldErrors, field: &str, raw: &str) -> Option<u8> {
    let value = raw.trim();
    if value.is_empty() {
        push_error(errors, field, REQUIRED);
        return None;
    }
    let Ok(number) = value.parse::<i64>() else {
        push_error(errors, field, NOT_AN_INTEGER);
        return None;
    };
    if !(MIN_SCORE..=MAX_SCORE).contains(&number) {
        push_error(errors, field, OUT_OF_RANGE);
        return None;
    }
    u8::try_from(number).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> StudentForm {
        StudentForm {
            name: "Asha Rao".to_string(),
            roll_number: "R-1".to_string(),
            gender: "F".to_string(),
            math_score: "90".to_string(),
            reading_score: "85".to_string(),
            writing_score: "80".to_string(),
            attendance: "92".to_string(),
        }
    }

    #[test]
    fn test_valid_form_produces_fields() {
        let fields = validate_form(&valid_form()).expect("Form should be valid");
        assert_eq!(fields.name, "Asha Rao");
        assert_eq!(fields.roll_no, "R-1");
        assert_eq!(fields.math_score, 90);
        assert_eq!(fields.attendance, 92);
    }

    #[test]
    fn test_text_is_trimmed() {
        let mut form = valid_form();
        form.name = "  Asha Rao ".to_string();
        form.roll_number = " r-1 ".to_string();
        let fields = validate_form(&form).unwrap();
        assert_eq!(fields.name, "Asha Rao");
        assert_eq!(fields.roll_no, "r-1");
    }

    #[test]
    fn test_zero_and_hundred_are_valid_bounds() {
        let mut form = valid_form();
        form.math_score = "0".to_string();
        form.attendance = "100".to_string();
        let fields = validate_form(&form).unwrap();
        assert_eq!(fields.math_score, 0);
        assert_eq!(fields.attendance, 100);
    }

    #[test]
    fn test_every_failing_field_is_reported() {
        let form = StudentForm {
            name: "   ".to_string(),
            roll_number: String::new(),
            gender: "F".to_string(),
            math_score: "101".to_string(),
            reading_score: "-1".to_string(),
            writing_score: "eighty".to_string(),
            attendance: String::new(),
        };

        let errors = validate_form(&form).expect_err("Form should be invalid");
        assert_eq!(errors["name"], vec![REQUIRED]);
        assert_eq!(errors["roll_number"], vec![REQUIRED]);
        assert!(!errors.contains_key("gender"));
        assert_eq!(errors["math_score"], vec![OUT_OF_RANGE]);
        assert_eq!(errors["reading_score"], vec![OUT_OF_RANGE]);
        assert_eq!(errors["writing_score"], vec![NOT_AN_INTEGER]);
        assert_eq!(errors["attendance"], vec![REQUIRED]);
    }

    #[test]
    fn test_length_limits() {
        let mut form = valid_form();
        form.gender = "x".repeat(MAX_GENDER_LEN + 1);
        form.roll_number = "r".repeat(MAX_ROLL_NUMBER_LEN);

        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors["gender"],
            vec!["Field cannot be longer than 10 characters.".to_string()]
        );
    }

    #[test]
    fn test_roll_number_taken_ignores_case() {
        let existing = vec!["AB-12".to_string(), "cd-34".to_string()];
        assert!(roll_number_taken("ab-12", &existing));
        assert!(roll_number_taken("CD-34", &existing));
        assert!(!roll_number_taken("ab-13", &existing));
        assert!(!roll_number_taken("ab-12", &Vec::<String>::new()));
    }

    #[test]
    fn test_form_from_fields_round_trips_through_validation() {
        let fields = validate_form(&valid_form()).unwrap();
        assert_eq!(form_from_fields(&fields), valid_form());
    }
}
