use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};

/// Live roster search: every keystroke re-filters.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Esc => {
            state.set_search(String::new());
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => state.mode = Mode::Normal,
        KeyCode::Backspace => {
            let mut query = state.search_query.clone();
            query.pop();
            state.set_search(query);
        }
        KeyCode::Char(c) => {
            let query = format!("{}{}", state.search_query, c);
            state.set_search(query);
        }
        _ => {}
    }
}
