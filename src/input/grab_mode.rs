use crossterm::event::KeyCode;

use crate::app::AppState;

/// Keys while a visit is picked up. The cursor is the drop target.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.move_selection_days(-1),
        KeyCode::Char('l') | KeyCode::Right => state.move_selection_days(1),
        KeyCode::Char('j') | KeyCode::Down => state.next_hour(),
        KeyCode::Char('k') | KeyCode::Up => state.prev_hour(),
        KeyCode::Enter => {
            let result = state.drop_grabbed();
            state.report(result);
        }
        KeyCode::Esc => state.cancel_grab(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Mode;
    use crate::planner::visit::HourSlot;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn setup_grabbing_state() -> AppState {
        let mut state = AppState::at(date(2025, 1, 15));
        state
            .add_to_plan(2, Some(date(2025, 1, 15)), Some(HourSlot::first()))
            .unwrap();
        state.begin_grab();
        state
    }

    #[test]
    fn enter_drops_visit_on_cursor_cell() {
        let mut state = setup_grabbing_state();

        handle_key(KeyCode::Char('l'), &mut state);
        handle_key(KeyCode::Char('j'), &mut state);
        handle_key(KeyCode::Char('j'), &mut state);
        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.schedule.visits_on(date(2025, 1, 15)).is_empty());
        let moved = state.schedule.visits_on(date(2025, 1, 16));
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].hour(), 11);
        assert_eq!(moved[0].name, "Jane Smith");
    }

    #[test]
    fn dropping_on_same_cell_changes_nothing() {
        let mut state = setup_grabbing_state();
        let before = state.schedule.visits_on(date(2025, 1, 15)).to_vec();

        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.schedule.visits_on(date(2025, 1, 15)), before.as_slice());
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn esc_cancels_and_keeps_visit_in_place() {
        let mut state = setup_grabbing_state();

        handle_key(KeyCode::Char('l'), &mut state);
        handle_key(KeyCode::Esc, &mut state);

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.grab.is_none());
        assert_eq!(state.schedule.visits_on(date(2025, 1, 15)).len(), 1);
        assert!(state.schedule.visits_on(date(2025, 1, 16)).is_empty());
    }

    #[test]
    fn dragging_past_week_end_scrolls_and_drops_next_week() {
        let mut state = setup_grabbing_state();

        for _ in 0..4 {
            handle_key(KeyCode::Char('l'), &mut state);
        }
        handle_key(KeyCode::Enter, &mut state);

        assert_eq!(state.cursors.week_start, date(2025, 1, 19));
        assert_eq!(state.schedule.visits_on(date(2025, 1, 19)).len(), 1);
        assert_eq!(state.schedule.visit_count(), 1);
    }
}
