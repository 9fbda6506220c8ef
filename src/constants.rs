/// Maximum number of characters accepted for a first or last name
pub const NAME_MAX_LEN: usize = 25;

/// DDL for the single table backing the service
///
/// `gender` is NOT NULL, `email` is nullable at the storage level even though
/// the API requires it on creation.
pub const CREATE_STUDENTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    first_name VARCHAR(25) NOT NULL,
    last_name VARCHAR(25) NOT NULL,
    email VARCHAR(50),
    gender TEXT NOT NULL
)";

pub const WELCOME_KEY: &str = "Welcome";
pub const WELCOME_MESSAGE: &str = "to our school API";

pub const STUDENT_CREATED_MESSAGE: &str = "You successfully created a new student";
pub const STUDENT_REMOVED_MESSAGE: &str = "Student removed successfully";

pub const FIRST_NAME_RULE: &str =
    "First name entry must contain only letters and be between 1 and 25 characters long";
pub const LAST_NAME_RULE: &str =
    "Last name entry must contain only letters and be between 1 and 25 characters long";
pub const EMAIL_RULE: &str = "Invalid email format, expected something like name.surname@domain.com";
pub const GENDER_RULE: &str = "Invalid entry, you can only insert two values (male or female)";

/// Name of the rolling log file written under the configured log directory
pub const LOG_FILE_NAME: &str = "school_api.log";
