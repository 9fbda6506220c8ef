//! API routes configuration module

use crate::api::handlers::{
    create_student, delete_student, query_students, query_students_by_segment, root,
    update_student,
};
use crate::db::Database;
use axum::{
    routing::{delete, get, put},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `database` - Database connection pool to be shared across handlers
///
/// # Returns
/// * `Router` - Configured router with all API endpoints and middleware
pub fn app(database: Database) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/students", get(query_students).post(create_student))
        .route("/api/students/:segment", get(query_students_by_segment))
        .route("/api/students/update/:id", put(update_student))
        .route("/api/students/delete/:id", delete(delete_student))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(database))
}
