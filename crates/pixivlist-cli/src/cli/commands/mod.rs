//! CLI command handlers, one per file.

mod check;
mod completions;
mod parse;

pub use check::run_check;
pub use completions::run_completions;
pub use parse::run_parse;
