use crossterm::event::KeyCode;

use crate::app::{AppState, Focus, Mode};
use crate::planner::navigation::ViewType;
use crate::planner::roster::FilterDimension;

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    if state.remove_tot_confirmation.is_some() {
        handle_removal_confirmation(key, state);
        return;
    }

    match key {
        KeyCode::Tab => state.toggle_focus(),
        KeyCode::Char('m') => state.switch_view(ViewType::Month),
        KeyCode::Char('w') => state.switch_view(ViewType::Week),
        KeyCode::Char('d') => state.switch_view(ViewType::Day),
        KeyCode::Char('[') => state.shift_period(-1),
        KeyCode::Char(']') => state.shift_period(1),
        KeyCode::Char('t') => state.jump_to_today(),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('/') => enter_search_mode(state),
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Esc => state.last_error = None,
        _ => match state.focus {
            Focus::Plan => handle_plan_key(key, state),
            Focus::Roster => handle_roster_key(key, state),
        },
    }
}

fn handle_plan_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => previous_day(state),
        KeyCode::Char('l') | KeyCode::Right => next_day(state),
        KeyCode::Char('j') | KeyCode::Down => state.next_hour(),
        KeyCode::Char('k') | KeyCode::Up => state.prev_hour(),
        KeyCode::Char('g') => {
            state.begin_grab();
        }
        KeyCode::Char('T') => state.open_tot_form(),
        KeyCode::Char('x') => state.request_tot_removal(),
        KeyCode::Enter => open_selected_day(state),
        _ => {}
    }
}

fn handle_roster_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('j') | KeyCode::Down => state.move_roster_selection_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_roster_selection_up(),
        KeyCode::Char('a') | KeyCode::Enter => {
            state.open_visit_form();
        }
        KeyCode::Char('1') => state.cycle_filter(FilterDimension::Class),
        KeyCode::Char('2') => state.cycle_filter(FilterDimension::Account),
        KeyCode::Char('3') => state.cycle_filter(FilterDimension::Area),
        KeyCode::Char('4') => state.cycle_filter(FilterDimension::Frequency),
        KeyCode::Char('0') => state.clear_filters(),
        _ => {}
    }
}

// In the day view the day cursor itself moves.
fn previous_day(state: &mut AppState) {
    if state.view == ViewType::Day {
        state.shift_period(-1);
    } else {
        state.move_selection_days(-1);
    }
}

fn next_day(state: &mut AppState) {
    if state.view == ViewType::Day {
        state.shift_period(1);
    } else {
        state.move_selection_days(1);
    }
}

fn open_selected_day(state: &mut AppState) {
    if state.view != ViewType::Day {
        let date = state.selected_date;
        state.goto(date);
        state.switch_view(ViewType::Day);
    }
}

fn handle_removal_confirmation(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('y') | KeyCode::Enter => state.confirm_tot_removal(),
        KeyCode::Char('n') | KeyCode::Esc => state.cancel_tot_removal(),
        _ => {}
    }
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}

fn enter_search_mode(state: &mut AppState) {
    state.mode = Mode::Search;
    state.focus = Focus::Roster;
}
