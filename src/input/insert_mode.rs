use crossterm::event::KeyCode;

use crate::app::{AppState, TotField, TotForm, VisitField, VisitForm};

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Esc => state.close_forms(),
        KeyCode::Enter if state.visit_form.is_some() => state.submit_visit_form(),
        KeyCode::Enter if state.tot_form.is_some() => state.submit_tot_form(),
        _ => {
            if let Some(form) = state.visit_form.as_mut() {
                edit_visit_form(key, form);
            } else if let Some(form) = state.tot_form.as_mut() {
                edit_tot_form(key, form);
            }
        }
    }
}

fn accepts(field_is_date: bool, c: char) -> bool {
    if field_is_date {
        c.is_ascii_digit() || c == '-' || c == '/'
    } else {
        c.is_ascii_digit() || c == ':'
    }
}

fn edit_visit_form(key: KeyCode, form: &mut VisitForm) {
    match key {
        KeyCode::Tab | KeyCode::BackTab => form.next_field(),
        KeyCode::Backspace => {
            form.active_buffer().pop();
        }
        KeyCode::Char(c) => {
            let is_date = form.active_field == VisitField::Date;
            let buffer = form.active_buffer();
            if accepts(is_date, c) && buffer.len() < 10 {
                buffer.push(c);
            }
        }
        _ => {}
    }
}

fn edit_tot_form(key: KeyCode, form: &mut TotForm) {
    match (key, form.active_field) {
        (KeyCode::Tab, _) => form.next_field(),
        (KeyCode::BackTab, _) => form.prev_field(),
        (KeyCode::Left | KeyCode::Char('h'), TotField::Type) => form.kind = form.kind.prev(),
        (KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' '), TotField::Type) => {
            form.kind = form.kind.next()
        }
        (KeyCode::Char(' ') | KeyCode::Char('x'), TotField::MultiDay) => {
            form.multi_day = !form.multi_day
        }
        (KeyCode::Backspace, _) => {
            if let Some(buffer) = form.active_buffer() {
                buffer.pop();
            }
        }
        (KeyCode::Char(c), TotField::Name) => form.name.push(c),
        (KeyCode::Char(c), field) => {
            let is_date = matches!(field, TotField::StartDate | TotField::EndDate);
            if let Some(buffer) = form.active_buffer()
                && accepts(is_date, c)
                && buffer.len() < 10
            {
                buffer.push(c);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Mode;
    use crate::planner::tot::TotType;
    use crate::planner::visit::HourSlot;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn setup_state_with_visit_form() -> AppState {
        let mut state = AppState::at(date(2025, 1, 15));
        state.open_visit_form();
        state
    }

    fn setup_state_with_tot_form() -> AppState {
        let mut state = AppState::at(date(2025, 1, 15));
        state.open_tot_form();
        state
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(KeyCode::Char(c), state);
        }
    }

    #[test]
    fn tab_switches_between_date_and_time() {
        let mut state = setup_state_with_visit_form();

        handle_key(KeyCode::Tab, &mut state);

        assert_eq!(state.visit_form.as_ref().unwrap().active_field, VisitField::Time);
    }

    #[test]
    fn time_field_accepts_only_digits_and_colon() {
        let mut state = setup_state_with_visit_form();
        handle_key(KeyCode::Tab, &mut state);
        for _ in 0..5 {
            handle_key(KeyCode::Backspace, &mut state);
        }

        type_text(&mut state, "1a3:0x0");

        assert_eq!(state.visit_form.as_ref().unwrap().time_input, "13:00");
    }

    #[test]
    fn enter_submits_visit_form() {
        let mut state = setup_state_with_visit_form();

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.schedule.visits_on(date(2025, 1, 15)).len(), 1);
    }

    #[test]
    fn esc_cancels_without_planning() {
        let mut state = setup_state_with_visit_form();

        handle_key(KeyCode::Esc, &mut state);

        assert!(state.visit_form.is_none());
        assert_eq!(state.schedule.visit_count(), 0);
    }

    #[test]
    fn invalid_date_keeps_form_open() {
        let mut state = setup_state_with_visit_form();
        for _ in 0..3 {
            handle_key(KeyCode::Backspace, &mut state);
        }

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Insert);
        assert!(state.last_error.as_deref().unwrap_or_default().contains("2025-01"));
    }

    #[test]
    fn char_appends_to_tot_name() {
        let mut state = setup_state_with_tot_form();

        type_text(&mut state, "Team Sync");

        assert_eq!(state.tot_form.as_ref().unwrap().name, "Team Sync");
    }

    #[test]
    fn arrows_cycle_tot_type() {
        let mut state = setup_state_with_tot_form();
        handle_key(KeyCode::Tab, &mut state);

        handle_key(KeyCode::Right, &mut state);
        assert_eq!(state.tot_form.as_ref().unwrap().kind, TotType::RoundTable);

        handle_key(KeyCode::Left, &mut state);
        handle_key(KeyCode::Left, &mut state);
        assert_eq!(state.tot_form.as_ref().unwrap().kind, TotType::MaternityLeave);
    }

    #[test]
    fn space_toggles_multi_day() {
        let mut state = setup_state_with_tot_form();
        state.tot_form.as_mut().unwrap().active_field = TotField::MultiDay;

        handle_key(KeyCode::Char(' '), &mut state);

        assert!(state.tot_form.as_ref().unwrap().multi_day);
    }

    #[test]
    fn submitting_multi_day_tot_covers_each_day() {
        let mut state = setup_state_with_tot_form();
        {
            let form = state.tot_form.as_mut().unwrap();
            form.multi_day = true;
            form.end_date_input = "2025-01-17".to_string();
            form.end_time_input = HourSlot::new(17).unwrap().to_string();
        }

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        for day in 15..=17 {
            assert_eq!(state.schedule.tots_on(date(2025, 1, day)).len(), 1);
        }
        assert!(state.schedule.tots_on(date(2025, 1, 18)).is_empty());
    }
}
