use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Could not read date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Hour {0}:00 is outside the plannable slots (09:00-17:00)")]
    InvalidHour(u32),
    #[error("Could not read time '{0}', expected HH:MM")]
    InvalidTime(String),
    #[error("Visits start on the hour; '{0}' is not")]
    NotOnTheHour(String),
    #[error("End {end} precedes start {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("No contact with id {0}")]
    ContactNotFound(u32),
    #[error("No schedule loaded for {0}")]
    DateNotLoaded(NaiveDate),
    #[error("No visit at position {index} on {date}")]
    VisitNotFound { date: NaiveDate, index: usize },
    #[error("No visit with id {0}")]
    UnknownVisit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
}

impl PlannerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlannerError::MissingField(_)
            | PlannerError::InvalidDate(_)
            | PlannerError::InvalidHour(_)
            | PlannerError::InvalidTime(_)
            | PlannerError::NotOnTheHour(_)
            | PlannerError::EndBeforeStart { .. } => ErrorKind::Validation,
            PlannerError::ContactNotFound(_)
            | PlannerError::DateNotLoaded(_)
            | PlannerError::VisitNotFound { .. }
            | PlannerError::UnknownVisit(_) => ErrorKind::NotFound,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_a_validation_error() {
        let err = PlannerError::MissingField("date");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.is_validation());
    }

    #[test]
    fn malformed_times_are_validation_errors() {
        assert!(PlannerError::InvalidTime("9:75".to_string()).is_validation());
        assert!(PlannerError::NotOnTheHour("10:30".to_string()).is_validation());
    }

    #[test]
    fn unloaded_date_is_a_not_found_error() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let err = PlannerError::DateNotLoaded(date);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "No schedule loaded for 2024-06-10");
    }
}
