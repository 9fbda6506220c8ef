//! Input checks applied before any write reaches the store.

use crate::constants::{EMAIL_RULE, FIRST_NAME_RULE, GENDER_RULE, LAST_NAME_RULE, NAME_MAX_LEN};
use crate::errors::Error;
use once_cell::sync::Lazy;
use regex::Regex;

static ALPHABETIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("alphabetic pattern is valid"));

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9]+[._]?[a-z0-9]+@\w+\.\w{2,3}$").expect("email pattern is valid")
});

/// A single rejected field, carrying the message shown to the client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", FIRST_NAME_RULE)]
    FirstName,
    #[error("{}", LAST_NAME_RULE)]
    LastName,
    #[error("{}", EMAIL_RULE)]
    Email,
    #[error("{}", GENDER_RULE)]
    Gender,
}

/// Skip/take window requested through `/api/students/{offset},{limit}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub offset: i64,
    pub limit: i64,
}

/// Returns true when `value` is made only of ASCII letters and is not empty
pub fn is_alphabetic(value: &str) -> bool {
    ALPHABETIC.is_match(value)
}

fn is_valid_name(value: &str) -> bool {
    is_alphabetic(value) && value.len() <= NAME_MAX_LEN
}

pub fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(ValidationError::FirstName)
    }
}

pub fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(ValidationError::LastName)
    }
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Email)
    }
}

/// Checks a creation payload in order: first name, last name, email.
///
/// The first failing field wins. Gender is already constrained by the
/// payload type.
pub fn validate_new_student(
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Result<(), ValidationError> {
    validate_first_name(first_name)?;
    validate_last_name(last_name)?;
    validate_email(email)
}

/// Checks the name used to filter students by first name
pub fn validate_filter_name(name: &str) -> Result<(), Error> {
    if is_alphabetic(name) {
        Ok(())
    } else {
        Err(Error::InvalidName(name.to_string()))
    }
}

/// Parses an `<offset>,<limit>` path segment
///
/// # Errors
///
/// Returns `Error::InvalidRange` when either side is not a non-negative
/// integer or when the limit is zero.
pub fn parse_page_range(segment: &str) -> Result<PageRange, Error> {
    let invalid = || Error::InvalidRange(segment.to_string());

    let (offset, limit) = segment.split_once(',').ok_or_else(invalid)?;
    let offset: u32 = offset.trim().parse().map_err(|_| invalid())?;
    let limit: u32 = limit.trim().parse().map_err(|_| invalid())?;

    if limit == 0 {
        return Err(invalid());
    }

    Ok(PageRange {
        offset: i64::from(offset),
        limit: i64::from(limit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_must_be_letters_only() {
        assert!(validate_first_name("Ana").is_ok());
        assert_eq!(validate_first_name("123"), Err(ValidationError::FirstName));
        assert_eq!(validate_first_name("Ana Maria"), Err(ValidationError::FirstName));
        assert_eq!(validate_last_name("O'Neil"), Err(ValidationError::LastName));
        assert_eq!(validate_last_name(""), Err(ValidationError::LastName));
    }

    #[test]
    fn test_name_length_limit() {
        let longest = "a".repeat(NAME_MAX_LEN);
        let too_long = "a".repeat(NAME_MAX_LEN + 1);

        assert!(validate_first_name(&longest).is_ok());
        assert_eq!(validate_first_name(&too_long), Err(ValidationError::FirstName));
    }

    #[test]
    fn test_email_format() {
        for valid in ["ana@school.com", "ana.smith@school.rs", "ana_99@mail.org", "Ana.Smith@School.COM"] {
            assert!(validate_email(valid).is_ok(), "{valid} should be accepted");
        }
        for invalid in ["bad-email", "ana@school", "ana@school.info", "a@b.c", "@school.com", "ana..smith@school.com"] {
            assert_eq!(validate_email(invalid), Err(ValidationError::Email), "{invalid} should be rejected");
        }
    }

    #[test]
    fn test_new_student_short_circuits_in_field_order() {
        assert_eq!(
            validate_new_student("123", "456", "bad"),
            Err(ValidationError::FirstName)
        );
        assert_eq!(
            validate_new_student("Ana", "456", "bad"),
            Err(ValidationError::LastName)
        );
        assert_eq!(
            validate_new_student("Ana", "Smith", "bad"),
            Err(ValidationError::Email)
        );
        assert!(validate_new_student("Ana", "Smith", "ana@school.com").is_ok());
    }

    #[test]
    fn test_filter_name() {
        assert!(validate_filter_name("ana").is_ok());
        assert!(matches!(validate_filter_name("abc1"), Err(Error::InvalidName(_))));
        assert!(matches!(validate_filter_name(""), Err(Error::InvalidName(_))));
    }

    #[test]
    fn test_page_range() {
        assert_eq!(
            parse_page_range("5,10").unwrap(),
            PageRange { offset: 5, limit: 10 }
        );
        assert_eq!(
            parse_page_range("0, 1").unwrap(),
            PageRange { offset: 0, limit: 1 }
        );
        for bad in ["5,0", "a,b", "-1,3", "3", "1,2,3", ","] {
            assert!(
                matches!(parse_page_range(bad), Err(Error::InvalidRange(_))),
                "{bad} should be rejected"
            );
        }
    }
}
