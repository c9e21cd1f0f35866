use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::planner::contact::{demo_roster, Contact};

#[derive(Debug, Error)]
pub enum RosterFileError {
    #[error("Failed to read roster file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse roster: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Duplicate contact id {0} in roster")]
    DuplicateId(u32),
}

/// Parses a JSON array of contacts. Contact ids must be unique.
pub fn parse_roster(content: &str) -> Result<Vec<Contact>, RosterFileError> {
    let contacts: Vec<Contact> = serde_json::from_str(content)?;
    let mut seen = HashSet::new();
    for contact in &contacts {
        if !seen.insert(contact.id) {
            return Err(RosterFileError::DuplicateId(contact.id));
        }
    }
    Ok(contacts)
}

pub fn load_roster(path: &Path) -> Result<Vec<Contact>, RosterFileError> {
    let content = std::fs::read_to_string(path)?;
    let contacts = parse_roster(&content)?;
    tracing::info!("Loaded {} contact(s) from {}", contacts.len(), path.display());
    Ok(contacts)
}

/// The roster at `path`, or the built-in demo roster when no path is configured.
pub fn load_roster_or_demo(path: Option<&Path>) -> Result<Vec<Contact>, RosterFileError> {
    match path {
        Some(path) => load_roster(path),
        None => Ok(demo_roster()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TWO_CONTACTS: &str = r#"[
        {"id": 1, "name": "Dana Lee", "account": "MedCo", "class": "A", "area": "North",
         "frequencyAchieved": "1/2", "lastVisited": "2024-05-01"},
        {"id": 2, "name": "Sam Park", "account": "CareNet", "class": "B", "area": "South",
         "frequencyAchieved": "2/2", "lastVisited": "2024-05-03"}
    ]"#;

    #[test]
    fn parses_contacts_from_json_array() {
        let contacts = parse_roster(TWO_CONTACTS).unwrap();

        assert_eq!(contacts.len(), 2);
        assert!(contacts[1].frequency.is_met());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let duplicated = TWO_CONTACTS.replace("\"id\": 2", "\"id\": 1");

        let err = parse_roster(&duplicated).unwrap_err();

        assert!(matches!(err, RosterFileError::DuplicateId(1)));
    }

    #[test]
    fn rejects_malformed_frequency() {
        let broken = TWO_CONTACTS.replace("\"1/2\"", "\"half\"");
        assert!(matches!(parse_roster(&broken), Err(RosterFileError::ParseError(_))));
    }

    #[test]
    fn loads_roster_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TWO_CONTACTS.as_bytes()).unwrap();

        let contacts = load_roster_or_demo(Some(file.path())).unwrap();

        assert_eq!(contacts[0].name, "Dana Lee");
    }

    #[test]
    fn missing_path_falls_back_to_demo_roster() {
        let contacts = load_roster_or_demo(None).unwrap();
        assert_eq!(contacts.len(), 5);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let result = load_roster(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(RosterFileError::ReadError(_))));
    }
}
