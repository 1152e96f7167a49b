pub mod config;
pub mod logging;
pub mod manifest;
pub mod sanitize;

pub use manifest::{parse_list, parse_list_report, ListEntry, ListError, ListReport};
