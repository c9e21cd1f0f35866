pub mod config;
pub mod roster_file;
pub mod source;
