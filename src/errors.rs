use crate::validation::ValidationError;
use diesel::r2d2::PoolError;
use diesel::result::Error as DieselError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Diesel error: {0}")]
    DieselError(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    PoolError(#[from] PoolError),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Student with id {0} doesn't exist in our database")]
    NotFound(i32),
    #[error("Invalid name '{0}', only letters are allowed")]
    InvalidName(String),
    #[error("Invalid range '{0}', expected <offset>,<limit> with limit of at least 1")]
    InvalidRange(String),
}
