mod calendar_views;
mod dialogs;
mod presentation;
mod session;

pub use session::{build_app_state, run_tui, SessionOptions};
