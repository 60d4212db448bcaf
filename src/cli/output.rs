//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

use crate::domain::{HeadingLevel, Paragraph};
use crate::infrastructure::MemoryParagraph;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark) to stderr, keeping stdout for data
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{} {}", "✓".green(), msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Render one converted paragraph: headings as cyan `H<n>` lines, bold runs bold.
pub fn paragraph(p: &MemoryParagraph) -> String {
    let body: String = p
        .runs()
        .into_iter()
        .map(|run| {
            if run.bold {
                run.text.bold().to_string()
            } else {
                run.text
            }
        })
        .collect();

    match p.heading() {
        HeadingLevel::Normal => body,
        heading => format!(
            "{} {}",
            format!("H{}", heading.level()).cyan().bold(),
            body.cyan().bold()
        ),
    }
}
