use crate::api::errors::ApiError;
use crate::constants::{
    STUDENT_CREATED_MESSAGE, STUDENT_REMOVED_MESSAGE, WELCOME_KEY, WELCOME_MESSAGE,
};
// Database and student repository imports
use crate::db::{Database, Gender, NewStudent, Student, StudentChange, StudentRepository};
use crate::errors::Error;
use crate::validation::{self, ValidationError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// Request payload for creating a new student
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
}

/// Request payload for a partial update, absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Kept as a string so it is validated at its turn like the other fields
    pub gender: Option<String>,
}

/// Fields of one student as returned by the listing endpoints
#[derive(Debug, Serialize)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub gender: String,
}

impl From<Student> for StudentFields {
    fn from(student: Student) -> Self {
        StudentFields {
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            gender: student.gender,
        }
    }
}

/// Students keyed by id
pub type StudentMap = BTreeMap<i32, StudentFields>;

/// Response body for successful writes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
            id: None,
        }
    }
}

fn to_student_map(students: Vec<Student>) -> StudentMap {
    students
        .into_iter()
        .map(|student| (student.id, StudentFields::from(student)))
        .collect()
}

/// Greets the caller
pub async fn root() -> Json<HashMap<&'static str, &'static str>> {
    Json(HashMap::from([(WELCOME_KEY, WELCOME_MESSAGE)]))
}

/// Lists every student
///
/// # Returns
/// * `Result<Json<StudentMap>, ApiError>` - All students keyed by id, or error
#[axum::debug_handler]
pub async fn query_students(
    Extension(database): Extension<Database>,
) -> Result<Json<StudentMap>, ApiError> {
    let mut conn = database.get_conn()?;
    let mut repo = StudentRepository::new(&mut conn);

    let students = repo.get_students()?;
    info!("List of all students is fetched from the database");
    Ok(Json(to_student_map(students)))
}

/// Serves `/api/students/{segment}`
///
/// A segment of the form `<offset>,<limit>` returns one page of students
/// ordered by id. Any other segment is a first name matched ignoring case.
///
/// # Errors
/// * 400 when a page segment is malformed
/// * 404 when a name segment contains anything but letters
#[axum::debug_handler]
pub async fn query_students_by_segment(
    Path(segment): Path<String>,
    Extension(database): Extension<Database>,
) -> Result<Json<StudentMap>, ApiError> {
    if segment.contains(',') {
        let range = validation::parse_page_range(&segment)?;
        let mut conn = database.get_conn()?;
        let students =
            StudentRepository::new(&mut conn).get_students_page(range.offset, range.limit)?;
        info!(
            "Page of {} students starting at {} is fetched from the database",
            students.len(),
            range.offset
        );
        return Ok(Json(to_student_map(students)));
    }

    validation::validate_filter_name(&segment)?;
    let mut conn = database.get_conn()?;
    let students = StudentRepository::new(&mut conn).get_students_by_first_name(&segment)?;
    info!(
        "List of students with first name {} is fetched from the database",
        segment
    );
    Ok(Json(to_student_map(students)))
}

/// Creates a new student
///
/// # Arguments
/// * `database` - Database connection pool
/// * `payload` - JSON payload containing the student to create
///
/// # Returns
/// * `Result<(StatusCode, Json<MessageResponse>), ApiError>` - 201 with the new id, or error
#[axum::debug_handler]
pub async fn create_student(
    Extension(database): Extension<Database>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(payload) = payload?;
    validation::validate_new_student(&payload.first_name, &payload.last_name, &payload.email)?;

    let mut conn = database.get_conn()?;
    let mut repo = StudentRepository::new(&mut conn);

    let new_student = NewStudent {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: Some(payload.email),
        gender: payload.gender.to_string(),
    };
    let student_id = repo.insert_student(&new_student)?;

    info!(
        "New student, {} {} is successfully added to our database with id {}",
        new_student.first_name, new_student.last_name, student_id
    );
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: STUDENT_CREATED_MESSAGE.to_string(),
            id: Some(student_id),
        }),
    ))
}

/// Updates the fields present in the payload, one committed write per field
///
/// Fields are handled in the order first name, last name, email, gender.
/// The first invalid field stops the update, and the fields written before
/// it stay persisted.
///
/// # Errors
/// * 404 when no student has this id
/// * 422 for the first field failing validation
#[axum::debug_handler]
pub async fn update_student(
    Path(student_id): Path<i32>,
    Extension(database): Extension<Database>,
    payload: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(payload) = payload?;

    let mut conn = database.get_conn()?;
    let mut repo = StudentRepository::new(&mut conn);

    if repo.get_student_by_id(student_id)?.is_none() {
        return Err(Error::NotFound(student_id).into());
    }

    type Build = fn(String) -> Result<StudentChange, ValidationError>;
    let steps: [(Option<String>, Build); 4] = [
        (payload.first_name, StudentChange::first_name),
        (payload.last_name, StudentChange::last_name),
        (payload.email, StudentChange::email),
        (payload.gender, StudentChange::gender),
    ];

    for (value, build) in steps {
        let Some(value) = value else {
            continue;
        };
        let change = build(value)?;
        if repo.update_student_field(student_id, &change)? == 0 {
            return Err(Error::NotFound(student_id).into());
        }
        debug!("Updated {} of student {}", change.column(), student_id);
    }

    let message = format!("Student with id {} data was successfully modified", student_id);
    info!("{}", message);
    Ok(Json(MessageResponse::new(message)))
}

/// Deletes a student by id
///
/// # Errors
/// * 404 when there was nothing to delete
#[axum::debug_handler]
pub async fn delete_student(
    Path(student_id): Path<i32>,
    Extension(database): Extension<Database>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut conn = database.get_conn()?;
    let mut repo = StudentRepository::new(&mut conn);

    if repo.delete_student_by_id(student_id)? == 0 {
        return Err(Error::NotFound(student_id).into());
    }

    info!("Student {} removed successfully", student_id);
    Ok(Json(MessageResponse::new(STUDENT_REMOVED_MESSAGE)))
}
