//! # Student Record Pages
//!
//! Handlers for listing, viewing, adding, editing and deleting students.
//! Each page responds with the JSON view model a template would render.
//! Successful form posts redirect to the student list. A path id that is not
//! an integer can never name a stored student, so it answers 404 like any
//! other unknown id.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    Form,
};
use shared::{ErrorResponse, FieldErrors, FormView, HomeResponse, StudentForm};
use tracing::{error, info, warn};

use crate::domain::validation;
use crate::domain::StudentServiceError;
use crate::io::rest::mappers::student_mapper::StudentMapper;
use crate::AppState;

pub const STUDENTS_PATH: &str = "/students";

/// Landing page
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        routes: [
            "/students",
            "/add",
            "/edit/{id}",
            "/delete/{id}",
            "/student/{id}",
            "/analytics",
        ]
        .iter()
        .map(|route| route.to_string())
        .collect(),
    })
}

/// List every student with derived scores
pub async fn list_students(State(state): State<AppState>) -> Response {
    info!("GET /students");

    match state.analytics_service.scored_students().await {
        Ok(students) => (StatusCode::OK, Json(StudentMapper::to_list_dto(students))).into_response(),
        Err(e) => internal_error("Error listing students", e),
    }
}

/// Single student detail; unknown ids render an empty detail view
pub async fn student_detail(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return unknown_student(rejection),
    };
    info!("GET /student/{}", id);

    match state.analytics_service.scored_student(id).await {
        Ok(student) => {
            let status = if student.is_some() {
                StatusCode::OK
            } else {
                StatusCode::NOT_FOUND
            };
            (status, Json(StudentMapper::to_detail_dto(student))).into_response()
        }
        Err(e) => internal_error("Error retrieving student", e),
    }
}

/// Blank add form
pub async fn show_add_form() -> Json<FormView> {
    info!("GET /add");
    Json(FormView::empty())
}

pub async fn submit_add_form(State(state): State<AppState>, Form(form): Form<StudentForm>) -> Response {
    info!("POST /add - roll_number: {}", form.roll_number);

    match state.student_service.create(form.clone()).await {
        Ok(_) => Redirect::to(STUDENTS_PATH).into_response(),
        Err(e) => form_failure(None, form, e),
    }
}

/// Edit form pre-filled from the stored record
pub async fn show_edit_form(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return unknown_student(rejection),
    };
    info!("GET /edit/{}", id);

    match state.student_service.get(id).await {
        Ok(student) => {
            let view = FormView {
                id: Some(id),
                exists: true,
                form: validation::form_from_fields(&student.fields),
                errors: FieldErrors::new(),
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(e) => form_failure(Some(id), StudentForm::default(), e),
    }
}

pub async fn submit_edit_form(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    Form(form): Form<StudentForm>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return unknown_student(rejection),
    };
    info!("POST /edit/{} - roll_number: {}", id, form.roll_number);

    match state.student_service.update(id, form.clone()).await {
        Ok(_) => Redirect::to(STUDENTS_PATH).into_response(),
        Err(e) => form_failure(Some(id), form, e),
    }
}

pub async fn delete_student(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return unknown_student(rejection),
    };
    info!("POST /delete/{}", id);

    match state.student_service.delete(id).await {
        Ok(()) => Redirect::to(STUDENTS_PATH).into_response(),
        Err(StudentServiceError::NotFound(id)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Student {} does not exist", id),
            }),
        )
            .into_response(),
        Err(e) => internal_error("Error deleting student", e),
    }
}

/// Re-display the submitted form with its errors, or the not-found view
fn form_failure(id: Option<i64>, form: StudentForm, error: StudentServiceError) -> Response {
    if let Some(errors) = error.field_errors() {
        let view = FormView {
            id,
            exists: true,
            form,
            errors,
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response();
    }

    match error {
        StudentServiceError::NotFound(missing) => {
            (StatusCode::NOT_FOUND, Json(FormView::missing(missing))).into_response()
        }
        other => internal_error("Error saving student", other),
    }
}

fn unknown_student(rejection: PathRejection) -> Response {
    warn!("Rejected student id: {}", rejection.body_text());
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Student does not exist".to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn internal_error(message: &str, e: StudentServiceError) -> Response {
    error!("{}: {:?}", message, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use crate::domain::{AnalyticsService, StudentService};
    use crate::storage::{DbConnection, StudentRepository};
    use crate::{create_router, AppState};
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use shared::{ErrorResponse, FormView, StudentDetailResponse, StudentListResponse};
    use tower::util::ServiceExt; // for `oneshot`

    const VALID_FORM: &str = "name=Asha+Rao&roll_number=R-1&gender=F&math_score=90&reading_score=85&writing_score=80&attendance=92";

    async fn setup_test_app() -> Router {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let repository = StudentRepository::new(db);
        let app_state = AppState {
            student_service: StudentService::new(repository.clone()),
            analytics_service: AnalyticsService::new(repository),
        };
        create_router(app_state, &[])
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap()
    }

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn list(app: &Router) -> StudentListResponse {
        let response = app.clone().oneshot(get("/students")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_home_lists_routes() {
        let app = setup_test_app().await;
        let response = app.oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let home: shared::HomeResponse = json_body(response).await;
        assert!(home.routes.contains(&"/analytics".to_string()));
    }

    #[tokio::test]
    async fn test_add_redirects_and_lists_student() {
        let app = setup_test_app().await;

        let response = app.clone().oneshot(post_form("/add", VALID_FORM)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/students");

        let listing = list(&app).await;
        assert_eq!(listing.students.len(), 1);
        let student = &listing.students[0];
        assert_eq!(student.student.roll_no, "R-1");
        assert_eq!(student.total_score, 255);
        assert_eq!(student.avg_score, 85.0);
        assert_eq!(student.performance_label, shared::PerformanceLabel::Excellent);
    }

    #[tokio::test]
    async fn test_show_add_form_is_blank() {
        let app = setup_test_app().await;
        let response = app.oneshot(get("/add")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let view: FormView = json_body(response).await;
        assert_eq!(view, FormView::empty());
    }

    #[tokio::test]
    async fn test_add_duplicate_roll_number_redisplays_form() {
        let app = setup_test_app().await;
        app.clone().oneshot(post_form("/add", VALID_FORM)).await.unwrap();

        let duplicate = VALID_FORM.replace("roll_number=R-1", "roll_number=r-1");
        let response = app.clone().oneshot(post_form("/add", &duplicate)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let view: FormView = json_body(response).await;
        assert!(view.exists);
        assert_eq!(view.form.roll_number, "r-1");
        assert_eq!(
            view.errors["roll_number"],
            vec!["Roll number already exists. Please enter a different roll number.".to_string()]
        );

        assert_eq!(list(&app).await.students.len(), 1);
    }

    #[tokio::test]
    async fn test_add_invalid_form_reports_field_errors() {
        let app = setup_test_app().await;
        let response = app
            .clone()
            .oneshot(post_form("/add", "name=&roll_number=R-9&math_score=abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let view: FormView = json_body(response).await;
        assert!(view.errors.contains_key("name"));
        assert!(view.errors.contains_key("gender"));
        assert_eq!(view.errors["math_score"], vec!["Not a valid integer value.".to_string()]);
        assert!(!view.errors.contains_key("roll_number"));
        assert!(list(&app).await.students.is_empty());
    }

    #[tokio::test]
    async fn test_edit_round_trip() {
        let app = setup_test_app().await;
        app.clone().oneshot(post_form("/add", VALID_FORM)).await.unwrap();
        let id = list(&app).await.students[0].student.id;

        let response = app.clone().oneshot(get(&format!("/edit/{}", id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let view: FormView = json_body(response).await;
        assert_eq!(view.id, Some(id));
        assert_eq!(view.form.math_score, "90");

        let edited = VALID_FORM.replace("math_score=90", "math_score=60");
        let response = app
            .clone()
            .oneshot(post_form(&format!("/edit/{}", id), &edited))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let listing = list(&app).await;
        assert_eq!(listing.students[0].student.math_score, 60);
        assert_eq!(listing.students[0].performance_label, shared::PerformanceLabel::Good);
    }

    #[tokio::test]
    async fn test_edit_out_of_range_keeps_stored_values() {
        let app = setup_test_app().await;
        app.clone().oneshot(post_form("/add", VALID_FORM)).await.unwrap();
        let id = list(&app).await.students[0].student.id;

        let edited = VALID_FORM.replace("attendance=92", "attendance=101");
        let response = app
            .clone()
            .oneshot(post_form(&format!("/edit/{}", id), &edited))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let view: FormView = json_body(response).await;
        assert_eq!(view.id, Some(id));
        assert_eq!(view.errors["attendance"], vec!["Number must be between 0 and 100.".to_string()]);
        assert_eq!(list(&app).await.students[0].student.attendance, 92);
    }

    #[tokio::test]
    async fn test_edit_unknown_student_is_not_found() {
        let app = setup_test_app().await;

        let response = app.clone().oneshot(get("/edit/41")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let view: FormView = json_body(response).await;
        assert!(!view.exists);

        let response = app.oneshot(post_form("/edit/41", VALID_FORM)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_then_detail_is_not_found() {
        let app = setup_test_app().await;
        app.clone().oneshot(post_form("/add", VALID_FORM)).await.unwrap();
        let id = list(&app).await.students[0].student.id;

        let response = app.clone().oneshot(get(&format!("/student/{}", id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let detail: StudentDetailResponse = json_body(response).await;
        assert_eq!(detail.student.map(|s| s.student.id), Some(id));

        let response = app
            .clone()
            .oneshot(post_form(&format!("/delete/{}", id), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app.clone().oneshot(get(&format!("/student/{}", id))).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let detail: StudentDetailResponse = json_body(response).await;
        assert!(detail.student.is_none());

        let response = app.oneshot(post_form(&format!("/delete/{}", id), "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let app = setup_test_app().await;
        app.clone().oneshot(post_form("/add", VALID_FORM)).await.unwrap();

        let requests = vec![
            get("/student/abc"),
            get("/edit/abc"),
            post_form("/edit/abc", VALID_FORM),
            post_form("/delete/abc", ""),
            get("/student/1.5"),
        ];
        for request in requests {
            let uri = request.uri().to_string();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);

            let body: ErrorResponse = json_body(response).await;
            assert_eq!(body.error, "Student does not exist");
        }

        let listing = list(&app).await;
        assert_eq!(listing.students.len(), 1);
        assert_eq!(listing.students[0].student.math_score, 90);
    }
}
