use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use crate::planner::contact::{Contact, ContactClass, FrequencyAchieved, ParseContactError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDimension {
    Class,
    Account,
    Area,
    Frequency,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 4] = [
        FilterDimension::Class,
        FilterDimension::Account,
        FilterDimension::Area,
        FilterDimension::Frequency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterDimension::Class => "Class",
            FilterDimension::Account => "Account",
            FilterDimension::Area => "Area",
            FilterDimension::Frequency => "Frequency Achieved",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "class" => Ok(FilterDimension::Class),
            "account" => Ok(FilterDimension::Account),
            "area" => Ok(FilterDimension::Area),
            "frequency" | "freq" => Ok(FilterDimension::Frequency),
            other => Err(format!("Unknown filter: {}", other)),
        }
    }
}

/// Equality predicates over the roster; `None` means "no filter" for that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterFilter {
    pub class: Option<ContactClass>,
    pub account: Option<String>,
    pub area: Option<String>,
    pub frequency: Option<FrequencyAchieved>,
}

impl RosterFilter {
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.account.is_none() && self.area.is_none() && self.frequency.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Sets one dimension from user text. An empty value clears it.
    pub fn set(&mut self, dimension: FilterDimension, value: &str) -> Result<(), ParseContactError> {
        let value = value.trim();
        match dimension {
            FilterDimension::Class => {
                self.class = if value.is_empty() { None } else { Some(value.parse()?) };
            }
            FilterDimension::Account => {
                self.account = (!value.is_empty()).then(|| value.to_string());
            }
            FilterDimension::Area => {
                self.area = (!value.is_empty()).then(|| value.to_string());
            }
            FilterDimension::Frequency => {
                self.frequency = if value.is_empty() { None } else { Some(value.parse()?) };
            }
        }
        Ok(())
    }

    pub fn value(&self, dimension: FilterDimension) -> Option<String> {
        match dimension {
            FilterDimension::Class => self.class.map(|c| c.to_string()),
            FilterDimension::Account => self.account.clone(),
            FilterDimension::Area => self.area.clone(),
            FilterDimension::Frequency => self.frequency.map(|f| f.to_string()),
        }
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        self.class.is_none_or(|class| contact.class == class)
            && self.account.as_deref().is_none_or(|account| contact.account == account)
            && self.area.as_deref().is_none_or(|area| contact.area == area)
            && self.frequency.is_none_or(|freq| contact.frequency == freq)
    }
}

fn matches_search(contact: &Contact, needle: &str) -> bool {
    needle.is_empty()
        || contact.name.to_lowercase().contains(needle)
        || contact.account.to_lowercase().contains(needle)
}

/// Contacts passing every active predicate and the search text, most-visited first.
///
/// Ordering is by descending achieved count only; `sort_by_key` is stable so
/// contacts with equal counts keep their roster order.
pub fn filter_roster<'a>(roster: &'a [Contact], filter: &RosterFilter, search: &str) -> Vec<&'a Contact> {
    let needle = search.trim().to_lowercase();
    let mut contacts: Vec<&Contact> = roster
        .iter()
        .filter(|contact| filter.matches(contact))
        .filter(|contact| matches_search(contact, &needle))
        .collect();
    contacts.sort_by_key(|contact| Reverse(contact.frequency.achieved));
    contacts
}

/// Distinct values present in the roster for a dimension, in first-seen order.
pub fn filter_options(roster: &[Contact], dimension: FilterDimension) -> Vec<String> {
    if dimension == FilterDimension::Class {
        return ContactClass::ALL.iter().map(|c| c.to_string()).collect();
    }

    let mut options: Vec<String> = Vec::new();
    for contact in roster {
        let value = match dimension {
            FilterDimension::Account => contact.account.clone(),
            FilterDimension::Area => contact.area.clone(),
            FilterDimension::Frequency => contact.frequency.to_string(),
            FilterDimension::Class => continue,
        };
        if !options.contains(&value) {
            options.push(value);
        }
    }
    options
}

/// Advances a dimension to its next option, wrapping back to "no filter" after the last one.
pub fn cycle_filter(filter: &mut RosterFilter, roster: &[Contact], dimension: FilterDimension) {
    let options = filter_options(roster, dimension);
    let next = match filter.value(dimension) {
        None => options.first().cloned(),
        Some(current) => options
            .iter()
            .position(|o| *o == current)
            .and_then(|idx| options.get(idx + 1).cloned()),
    };
    // Options come from the roster itself, so they always parse.
    let _ = filter.set(dimension, next.as_deref().unwrap_or(""));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::contact::demo_roster;
    use pretty_assertions::assert_eq;

    fn names(contacts: &[&Contact]) -> Vec<String> {
        contacts.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn no_filters_returns_full_roster_by_descending_achieved() {
        let roster = demo_roster();

        let result = filter_roster(&roster, &RosterFilter::default(), "");

        assert_eq!(
            names(&result),
            vec!["John Doe", "Jane Smith", "Charlie Davis", "Bob Johnson", "Alice Brown"]
        );
    }

    #[test]
    fn class_filter_keeps_only_matching_class() {
        let roster = demo_roster();
        let mut filter = RosterFilter::default();
        filter.set(FilterDimension::Class, "A").unwrap();

        let result = filter_roster(&roster, &filter, "");

        assert_eq!(names(&result), vec!["John Doe", "Bob Johnson"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let roster = demo_roster();
        let mut filter = RosterFilter::default();
        filter.set(FilterDimension::Area, "North").unwrap();
        filter.set(FilterDimension::Frequency, "2/3").unwrap();

        let result = filter_roster(&roster, &filter, "");

        assert_eq!(names(&result), vec!["Charlie Davis"]);
    }

    #[test]
    fn search_matches_name_or_account_case_insensitively() {
        let roster = demo_roster();

        let by_name = filter_roster(&roster, &RosterFilter::default(), "JANE");
        let by_account = filter_roster(&roster, &RosterFilter::default(), "tech");

        assert_eq!(names(&by_name), vec!["Jane Smith"]);
        assert_eq!(names(&by_account), vec!["Jane Smith", "Charlie Davis", "Bob Johnson"]);
    }

    #[test]
    fn empty_value_clears_a_dimension() {
        let mut filter = RosterFilter::default();
        filter.set(FilterDimension::Account, "Acme Inc").unwrap();
        filter.set(FilterDimension::Account, "").unwrap();

        assert!(filter.is_empty());
    }

    #[test]
    fn invalid_class_value_is_rejected() {
        let mut filter = RosterFilter::default();
        assert!(filter.set(FilterDimension::Class, "Z").is_err());
        assert!(filter.class.is_none());
    }

    #[test]
    fn options_are_distinct_in_roster_order() {
        let roster = demo_roster();

        let areas = filter_options(&roster, FilterDimension::Area);

        assert_eq!(areas, vec!["North", "South", "East", "West"]);
    }

    #[test]
    fn cycling_wraps_back_to_no_filter() {
        let roster = demo_roster();
        let mut filter = RosterFilter::default();

        for expected in ["A", "B", "C"] {
            cycle_filter(&mut filter, &roster, FilterDimension::Class);
            assert_eq!(filter.value(FilterDimension::Class).as_deref(), Some(expected));
        }
        cycle_filter(&mut filter, &roster, FilterDimension::Class);

        assert_eq!(filter.class, None);
    }

    #[test]
    fn filtering_never_returns_a_non_matching_contact() {
        let roster = demo_roster();
        for dimension in FilterDimension::ALL {
            for option in filter_options(&roster, dimension) {
                let mut filter = RosterFilter::default();
                filter.set(dimension, &option).unwrap();

                let result = filter_roster(&roster, &filter, "");

                assert!(result.iter().all(|c| filter.matches(c)));
            }
        }
    }
}
