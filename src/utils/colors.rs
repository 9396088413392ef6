/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";

/// Text progress bar, e.g. `[#####-----]  50%`.
pub fn progress_bar(percent: usize, width: usize) -> String {
    let percent = percent.min(100);
    let filled = percent * width / 100;
    format!(
        "[{GREEN}{}{RESET}{GREY}{}{RESET}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}
