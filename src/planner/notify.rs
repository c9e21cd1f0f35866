use std::collections::VecDeque;

use chrono::{Datelike, NaiveDate};

use crate::planner::contact::Contact;
use crate::planner::visit::HourSlot;

const MAX_NOTIFICATIONS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

/// Fire-and-forget sink for user-visible confirmations.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&mut self, title: &str, description: &str);
}

/// Keeps the most recent notifications for the status bar.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, title: &str, description: &str) {
        tracing::info!("{}: {}", title, description);
        if self.entries.len() == MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
        self.entries.push_back(Notification {
            title: title.to_string(),
            description: description.to_string(),
        });
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long form used in confirmations, e.g. `June 10th, 2024`.
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

pub fn announce(notifier: &mut impl Notifier, note: &Notification) {
    notifier.notify(&note.title, &note.description);
}

pub fn plan_confirmation(contact: &Contact, date: NaiveDate, slot: HourSlot) -> Notification {
    Notification {
        title: "Contact Added to Plan".to_string(),
        description: format!(
            "{} from {} has been added to your plan on {} at {}.",
            contact.name,
            contact.account,
            long_date(date),
            slot
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::contact::demo_roster;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn long_date_uses_ordinal_suffixes() {
        assert_eq!(long_date(date(2024, 6, 1)), "June 1st, 2024");
        assert_eq!(long_date(date(2024, 6, 12)), "June 12th, 2024");
        assert_eq!(long_date(date(2024, 6, 22)), "June 22nd, 2024");
        assert_eq!(long_date(date(2024, 6, 23)), "June 23rd, 2024");
    }

    #[test]
    fn confirmation_names_contact_account_date_and_time() {
        let contact = &demo_roster()[0];

        let note = plan_confirmation(contact, date(2024, 6, 10), HourSlot::new(9).unwrap());

        assert_eq!(note.title, "Contact Added to Plan");
        assert_eq!(
            note.description,
            "John Doe from Acme Inc has been added to your plan on June 10th, 2024 at 09:00."
        );
    }

    #[test]
    fn announce_forwards_title_and_description() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|title, description| title.starts_with("Contact Added to Plan") && description.contains("Jane Smith"))
            .times(1)
            .return_const(());
        let contact = &demo_roster()[1];

        announce(&mut notifier, &plan_confirmation(contact, date(2024, 6, 10), HourSlot::first()));
    }

    #[test]
    fn log_keeps_latest_and_drops_oldest_past_capacity() {
        let mut log = NotificationLog::new();
        for i in 0..=MAX_NOTIFICATIONS {
            log.notify("Title", &i.to_string());
        }

        assert_eq!(log.len(), MAX_NOTIFICATIONS);
        assert_eq!(log.latest().map(|n| n.description.as_str()), Some("20"));
        assert_eq!(log.iter().next().map(|n| n.description.as_str()), Some("1"));
    }
}
