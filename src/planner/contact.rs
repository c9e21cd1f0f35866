use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A healthcare provider in the rep's roster. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    pub account: String,
    pub class: ContactClass,
    pub area: String,
    #[serde(rename = "frequencyAchieved", alias = "frequency_achieved")]
    pub frequency: FrequencyAchieved,
    #[serde(rename = "lastVisited", alias = "last_visited")]
    pub last_visited: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContactClass {
    A,
    B,
    C,
}

impl ContactClass {
    pub const ALL: [ContactClass; 3] = [ContactClass::A, ContactClass::B, ContactClass::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactClass::A => "A",
            ContactClass::B => "B",
            ContactClass::C => "C",
        }
    }
}

impl fmt::Display for ContactClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseContactError {
    #[error("Unknown contact class '{0}' (expected A, B or C)")]
    UnknownClass(String),
    #[error("Invalid frequency '{0}' (expected achieved/target)")]
    InvalidFrequency(String),
}

impl FromStr for ContactClass {
    type Err = ParseContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(ContactClass::A),
            "B" => Ok(ContactClass::B),
            "C" => Ok(ContactClass::C),
            _ => Err(ParseContactError::UnknownClass(s.to_string())),
        }
    }
}

/// Visits completed against visits planned in the current cycle, written `achieved/target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrequencyAchieved {
    pub achieved: u32,
    pub target: u32,
}

impl FrequencyAchieved {
    pub fn new(achieved: u32, target: u32) -> Self {
        Self { achieved, target }
    }

    pub fn is_met(&self) -> bool {
        self.achieved >= self.target
    }
}

impl fmt::Display for FrequencyAchieved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.achieved, self.target)
    }
}

impl FromStr for FrequencyAchieved {
    type Err = ParseContactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseContactError::InvalidFrequency(s.to_string());
        let (achieved, target) = s.trim().split_once('/').ok_or_else(invalid)?;
        let achieved = achieved.trim().parse::<u32>().map_err(|_| invalid())?;
        let target = target.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(Self { achieved, target })
    }
}

impl TryFrom<String> for FrequencyAchieved {
    type Error = ParseContactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrequencyAchieved> for String {
    fn from(value: FrequencyAchieved) -> Self {
        value.to_string()
    }
}

/// The five-contact roster the planner ships with when no roster file is configured.
pub fn demo_roster() -> Vec<Contact> {
    let rows = [
        (1, "John Doe", "Acme Inc", ContactClass::A, "North", (3, 3), (2023, 6, 15)),
        (2, "Jane Smith", "TechCorp", ContactClass::B, "South", (3, 3), (2023, 6, 10)),
        (3, "Bob Johnson", "GlobalTech", ContactClass::A, "East", (1, 4), (2023, 5, 28)),
        (4, "Alice Brown", "InnoSys", ContactClass::C, "West", (1, 3), (2023, 6, 20)),
        (5, "Charlie Davis", "FutureTech", ContactClass::B, "North", (2, 3), (2023, 6, 18)),
    ];

    rows.into_iter()
        .filter_map(|(id, name, account, class, area, (achieved, target), (y, m, d))| {
            Some(Contact {
                id,
                name: name.to_string(),
                account: account.to_string(),
                class,
                area: area.to_string(),
                frequency: FrequencyAchieved::new(achieved, target),
                last_visited: NaiveDate::from_ymd_opt(y, m, d)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_parses_achieved_over_target() {
        let freq: FrequencyAchieved = "2/3".parse().unwrap();
        assert_eq!(freq, FrequencyAchieved::new(2, 3));
    }

    #[test]
    fn frequency_rejects_missing_separator() {
        assert!("23".parse::<FrequencyAchieved>().is_err());
        assert!("a/3".parse::<FrequencyAchieved>().is_err());
    }

    #[test]
    fn frequency_is_met_when_achieved_reaches_target() {
        assert!(FrequencyAchieved::new(3, 3).is_met());
        assert!(!FrequencyAchieved::new(1, 4).is_met());
    }

    #[test]
    fn class_parses_case_insensitively() {
        assert_eq!("b".parse::<ContactClass>().unwrap(), ContactClass::B);
        assert!("D".parse::<ContactClass>().is_err());
    }

    #[test]
    fn demo_roster_has_five_contacts() {
        let roster = demo_roster();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster[4].name, "Charlie Davis");
        assert_eq!(roster[4].frequency.to_string(), "2/3");
    }

    #[test]
    fn contact_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": 7,
            "name": "Dana Lee",
            "account": "MedCo",
            "class": "C",
            "area": "West",
            "frequencyAchieved": "0/2",
            "lastVisited": "2024-05-01"
        }"#;

        let contact: Contact = serde_json::from_str(json).unwrap();

        assert_eq!(contact.frequency, FrequencyAchieved::new(0, 2));
        assert_eq!(contact.class, ContactClass::C);
    }
}
