//! Output formatting

pub mod formatter;

pub use formatter::{formatter_for, ConsoleFormatter, JsonFormatter, MarkdownFormatter, OutputFormatter};
