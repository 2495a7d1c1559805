//! Output formatting for CLI.

mod json;
mod text;

pub use json::{ActionOutput, JsonFormatter, PageOutput};
pub use text::TextFormatter;
