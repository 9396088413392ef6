use std::fmt;
use std::io::{self, Write};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const CLEAR_LINE: &str = "\r\x1b[2K";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";
const FG_MAGENTA: &str = "\x1b[35m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_ROLL: &str = "🎲";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_BLUE, BOLD, ICON_INFO, RESET, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_GREEN, BOLD, ICON_OK, RESET, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}{}{} {}{}", FG_YELLOW, BOLD, ICON_WARN, RESET, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}{}{} {}{}", FG_RED, BOLD, ICON_ERR, RESET, msg);
}

/// Optional: formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}{}====================== {}\n{}",
        FG_BLUE, BOLD, msg, RESET
    );
}

/// Rewrite the current terminal line with the rolling candidate.
pub fn roll_line<T: fmt::Display>(msg: T) {
    print!(
        "{}{}{}{} {}{}",
        CLEAR_LINE, FG_MAGENTA, BOLD, ICON_ROLL, msg, RESET
    );
    io::stdout().flush().ok();
}

/// End the rolling line so the next message starts on a fresh one.
pub fn end_roll_line() {
    println!();
}

/// Print a question without a trailing newline.
pub fn prompt<T: fmt::Display>(question: T) {
    print!("{}{}?{} {} [y/N]: ", FG_YELLOW, BOLD, RESET, question);
    io::stdout().flush().ok();
}
