use chrono::{NaiveDate, NaiveDateTime};

use super::ApiError;
use super::types::{DATE_FORMAT, DATETIME_FORMAT};

pub fn validate_id(id: i32, what: &str) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {what}: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

pub fn validate_required_text<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(value)
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp from a request body.
pub fn parse_datetime(value: &str, field: &str) -> Result<NaiveDateTime, ApiError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| {
        ApiError::validation(format!(
            "Invalid {field}: expected format {DATETIME_FORMAT}"
        ))
    })
}

/// Parse a `YYYY-MM-DD` date from a request body.
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ApiError::validation(format!("Invalid {field}: expected format {DATE_FORMAT}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1, "utilisateur_id").is_ok());
        assert!(validate_id(12345, "utilisateur_id").is_ok());
        assert!(validate_id(0, "utilisateur_id").is_err());
        assert!(validate_id(-1, "utilisateur_id").is_err());
    }

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("surchauffe", "type_alerte").is_ok());
        assert!(validate_required_text("", "type_alerte").is_err());
        assert!(validate_required_text("   ", "type_alerte").is_err());
    }

    #[test]
    fn test_parse_datetime() {
        assert!(parse_datetime("2024-03-01 08:30:00", "date_debut").is_ok());
        assert!(parse_datetime("2024-03-01T08:30:00", "date_debut").is_err());
        assert!(parse_datetime("not a date", "date_debut").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-03-01", "date").is_ok());
        assert!(parse_date("01/03/2024", "date").is_err());
    }
}
