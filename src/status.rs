//! Colour-coded status lines for the workflow log
//!
//! Progress goes to stdout, warnings and errors to stderr. Each call prints
//! exactly one line.

use console::style;
use std::fmt::Display;

/// Force ANSI colours on the Actions runner, whose log viewer renders them
/// even though stdout is not a terminal.
pub fn init() {
    if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
        console::set_colors_enabled(true);
        console::set_colors_enabled_stderr(true);
    }
}

pub fn info(msg: impl Display) {
    println!("{} {}", style("info:").cyan().bold(), msg);
}

pub fn success(msg: impl Display) {
    println!("{} {}", style("success:").green().bold(), msg);
}

pub fn warn(msg: impl Display) {
    eprintln!("{} {}", style("warning:").yellow().bold(), msg);
}

pub fn error(msg: impl Display) {
    eprintln!("{} {}", style("error:").red().bold(), msg);
}
