use crate::db::log::{Journal, LogEntry};
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;

/// Max visible width of the "operation (target)" column.
const OP_WIDTH_MAX: usize = 60;

fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Restituisce il colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match op {
        "import" => Colour::Green,
        "sign" => Colour::Cyan,
        "clear" => Colour::Red,
        "export" => Colour::Blue,
        "no_repeat" => Colour::Yellow,
        "init" => Colour::RGB(255, 153, 51), // arancione
        _ => Colour::White,
    }
}

/// "operation (target)" with only the operation coloured, cut to
/// `OP_WIDTH_MAX` visible characters.
fn format_op_target(entry: &LogEntry) -> String {
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.chars().count() > OP_WIDTH_MAX {
        let mut s: String = plain.chars().take(OP_WIDTH_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&entry.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(journal: &Journal) -> AppResult<()> {
        let entries = journal.entries()?;

        if entries.is_empty() {
            info("The activity log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        let rendered: Vec<String> = entries.iter().map(format_op_target).collect();
        let op_w = rendered
            .iter()
            .map(|r| strip_ansi(r).chars().count())
            .max()
            .unwrap_or(10);

        println!("📜 Activity log:\n");

        for (entry, op_target) in entries.iter().zip(&rendered) {
            let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| entry.date.clone());

            // padding calcolato sulle dimensioni reali SENZA ANSI
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(op_target).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                date,
                op_target,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
