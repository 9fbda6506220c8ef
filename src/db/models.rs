use crate::schema::students;
use crate::validation::{self, ValidationError};
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a student row in the database
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Student {
    /// Identifier assigned by the store on insert
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Nullable in the table, always set by rows created through the API
    pub email: Option<String>,
    /// Stored as `male` or `female`
    pub gender: String,
}

/// Values for a row that has not been inserted yet
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub gender: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    /// Only the exact lowercase values are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(ValidationError::Gender),
        }
    }
}

/// A single-column change applied to an existing student
///
/// Values are validated by the constructors, so holding a `StudentChange`
/// means the new value is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub enum StudentChange {
    FirstName(String),
    LastName(String),
    Email(String),
    Gender(Gender),
}

impl StudentChange {
    pub fn first_name(value: String) -> Result<Self, ValidationError> {
        validation::validate_first_name(&value)?;
        Ok(StudentChange::FirstName(value))
    }

    pub fn last_name(value: String) -> Result<Self, ValidationError> {
        validation::validate_last_name(&value)?;
        Ok(StudentChange::LastName(value))
    }

    pub fn email(value: String) -> Result<Self, ValidationError> {
        validation::validate_email(&value)?;
        Ok(StudentChange::Email(value))
    }

    pub fn gender(value: String) -> Result<Self, ValidationError> {
        Ok(StudentChange::Gender(value.parse()?))
    }

    /// Name of the column this change writes to
    pub fn column(&self) -> &'static str {
        match self {
            StudentChange::FirstName(_) => "first_name",
            StudentChange::LastName(_) => "last_name",
            StudentChange::Email(_) => "email",
            StudentChange::Gender(_) => "gender",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_is_strict() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        for loose in ["Male", "femalee", "malefemale", "", "other"] {
            assert_eq!(loose.parse::<Gender>(), Err(ValidationError::Gender));
        }
    }

    #[test]
    fn test_gender_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
        assert_eq!(
            serde_json::from_str::<Gender>("\"male\"").unwrap(),
            Gender::Male
        );
        assert!(serde_json::from_str::<Gender>("\"robot\"").is_err());
    }

    #[test]
    fn test_change_constructors_validate() {
        assert_eq!(
            StudentChange::first_name("Ana".into()),
            Ok(StudentChange::FirstName("Ana".into()))
        );
        assert_eq!(
            StudentChange::email("bad".into()),
            Err(ValidationError::Email)
        );
        assert_eq!(
            StudentChange::gender("female".into()).map(|c| c.column()),
            Ok("gender")
        );
    }
}
