//! Interactive roll call.
//!
//! All state lives on this thread. A helper thread only forwards stdin
//! lines; the loop waits on them with a timeout equal to the time left
//! before the next tick or auto sign-in, so timers and commands are
//! handled in order on the same thread.

use crate::cli::parser::Commands;
use crate::cli::render::{roster_table, separator_char, stats_line};
use crate::config::Config;
use crate::core::{Session, SessionEvent, SignOutcome, TickOutcome, ToggleOutcome};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic, default_file_name, is_yes};
use crate::ui::messages::{end_roll_line, error, header, info, prompt, roll_line, success, warning};
use chrono::Local;
use rand::Rng;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

const HELP: &str = "\
Commands:
  <enter> | toggle     start or pause the roll
  start | stop         start / pause the roll
  sign                 mark the displayed (or first selected) student present
  select <n...>        select rows by number (see `list`)
  unselect             clear the selection
  clear all            reset all attendance (asks for confirmation)
  clear selected       reset attendance of the selected rows
  stats                attendance counters
  list                 show the roster
  search <kw>          rows whose id or name contains <kw>
  import <file>        load a new roster
  export [file]        write the roster with attendance (.xlsx/.csv/.json)
  no-repeat on|off     skip students already present
  speed <ms>           roll speed, 10-200 ms
  countdown <secs>     auto sign-in after the roll starts, 0-10 s (0 = off)
  help                 this text
  quit                 leave the session";

enum Flow {
    Continue,
    Quit,
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Session {
        interval,
        countdown,
    } = cmd
    {
        let mut session = Session::from_config(cfg);
        if let Some(ms) = interval {
            session.set_interval(*ms);
        }
        if let Some(secs) = countdown {
            session.set_auto_sign_secs(*secs);
        }

        header("Roll call");
        if session.roster().is_empty() {
            warning("No roster cached. Use `import <file>` to load one.");
        } else {
            info(format!(
                "Loaded {} students from the cache.",
                session.roster().len()
            ));
        }
        info(format!(
            "No-repeat: {} | Speed: {} ms | Auto sign: {}",
            on_off(session.no_repeat()),
            session.interval().as_millis(),
            match session.auto_sign_secs() {
                0 => "off".to_string(),
                s => format!("{s} s"),
            }
        ));
        info("Type `help` for the list of commands.");

        let rx = spawn_stdin_reader();
        let sep = separator_char(&cfg.separator_char);
        run_loop(&mut session, &rx, sep);
    }
    Ok(())
}

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn run_loop<R: Rng>(session: &mut Session<R>, rx: &Receiver<String>, sep: char) {
    loop {
        let received = match session.next_wakeup(Instant::now()) {
            Some(wait) => rx.recv_timeout(wait),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => {
                if session.is_rolling() {
                    end_roll_line();
                }
                match execute(session, &line, rx, sep) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => report_error(&e),
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if session.is_rolling() {
                    session.pause();
                    end_roll_line();
                }
                break;
            }
        }

        for event in session.poll(Instant::now()) {
            report_event(session, event);
        }
    }

    println!("{}", stats_line(&session.stats()));
    info("Session closed.");
}

fn execute<R: Rng>(
    session: &mut Session<R>,
    line: &str,
    rx: &Receiver<String>,
    sep: char,
) -> AppResult<Flow> {
    let line = line.trim();
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (line, ""),
    };

    match cmd.to_lowercase().as_str() {
        "" | "toggle" => toggle(session)?,
        "start" => {
            if session.is_rolling() {
                info("Already rolling.");
            } else {
                toggle(session)?;
            }
        }
        "stop" | "pause" => {
            if session.is_rolling() {
                session.pause();
                show_paused(session);
            }
        }
        "sign" => {
            let out = session.sign()?;
            report_signed(session, &out);
        }
        "select" => {
            let rows = parse_rows(arg)?;
            session.select(&rows)?;
            success(format!("Selected {} row(s).", session.selection().len()));
        }
        "unselect" => {
            session.unselect();
            info("Selection cleared.");
        }
        "clear" => match arg.to_lowercase().as_str() {
            "all" => {
                if session.roster().is_empty() {
                    return Err(AppError::EmptyRoster);
                }
                if ask(rx, "Clear ALL attendance") {
                    session.clear_all()?;
                    success("All cleared.");
                } else {
                    info("Nothing changed.");
                }
            }
            "selected" | "sel" => {
                let n = session.clear_selected()?;
                success(format!("Cleared {} row(s).", n));
            }
            _ => warning("Usage: clear all | clear selected"),
        },
        "stats" => println!("{}", stats_line(&session.stats())),
        "list" => print_rows(session, "", sep)?,
        "search" => print_rows(session, arg, sep)?,
        "import" => {
            if arg.is_empty() {
                warning("Usage: import <file>");
            } else {
                let n = session.import(Path::new(arg))?;
                success(format!("Imported {} students.", n));
                println!("{}", stats_line(&session.stats()));
            }
        }
        "export" => export(session, arg, rx)?,
        "no-repeat" | "norepeat" => match arg.to_lowercase().as_str() {
            "on" => {
                // preference write errors are not fatal here
                session.set_no_repeat(true).ok();
                success("No-repeat enabled.");
            }
            "off" => {
                session.set_no_repeat(false).ok();
                success("No-repeat disabled.");
            }
            _ => info(format!("No-repeat is {}.", on_off(session.no_repeat()))),
        },
        "speed" => {
            let ms = parse_number(arg)?;
            let set = session.set_interval(ms);
            success(format!("Speed set to {} ms.", set));
        }
        "countdown" => {
            let secs = parse_number(arg)?;
            match session.set_auto_sign_secs(secs) {
                0 => success("Auto sign-in disabled."),
                s => success(format!("Auto sign-in after {} s.", s)),
            }
        }
        "help" | "?" => println!("{HELP}"),
        "quit" | "exit" | "q" => return Ok(Flow::Quit),
        other => warning(format!("Unknown command '{}'. Type `help`.", other)),
    }

    Ok(Flow::Continue)
}

fn toggle<R: Rng>(session: &mut Session<R>) -> AppResult<()> {
    match session.toggle_roll(Instant::now())? {
        ToggleOutcome::Started => {
            if let Some(text) = session.last_shown() {
                roll_line(text);
            }
        }
        ToggleOutcome::Paused => show_paused(session),
        ToggleOutcome::AllPresent => success("All students signed."),
    }
    Ok(())
}

fn show_paused<R: Rng>(session: &Session<R>) {
    match session.last_shown() {
        Some(text) => info(format!("Paused on: {}", text)),
        None => info("Paused."),
    }
}

fn report_signed<R: Rng>(session: &Session<R>, out: &SignOutcome) {
    success(format!(
        "Signed: {} {} ✓ ({})",
        out.id,
        out.name,
        out.signed_at.format(crate::models::student::SIGNED_AT_FORMAT)
    ));
    println!("{}", stats_line(&session.stats()));
}

fn report_event<R: Rng>(session: &Session<R>, event: SessionEvent) {
    match event {
        SessionEvent::Tick(TickOutcome::Shown(text)) => roll_line(text),
        SessionEvent::Tick(TickOutcome::Exhausted) => {
            end_roll_line();
            success("All students signed.");
        }
        SessionEvent::Tick(TickOutcome::Idle) => {}
        SessionEvent::AutoSign(Ok(out)) => {
            end_roll_line();
            report_signed(session, &out);
        }
        SessionEvent::AutoSign(Err(e)) => {
            end_roll_line();
            report_error(&e);
        }
    }
}

/// Lookup misses and missing input are warnings, the rest are errors.
fn report_error(e: &AppError) {
    match e {
        AppError::NoSignTarget | AppError::NoSelection | AppError::EmptyRoster => warning(e),
        _ => error(e),
    }
}

fn print_rows<R: Rng>(session: &Session<R>, keyword: &str, sep: char) -> AppResult<()> {
    let roster = session.roster();
    if roster.is_empty() {
        return Err(AppError::EmptyRoster);
    }

    let rows = roster.search(keyword);
    if rows.is_empty() {
        info(format!("No student matches '{}'", keyword));
    } else {
        print!("{}", roster_table(roster, &rows, session.selection(), sep));
    }
    Ok(())
}

fn export<R: Rng>(session: &mut Session<R>, arg: &str, rx: &Receiver<String>) -> AppResult<()> {
    let (path, format) = if arg.is_empty() {
        let format = ExportFormat::default();
        let name = default_file_name(format, Local::now().naive_local());
        (PathBuf::from(name), format)
    } else {
        let path = PathBuf::from(arg);
        let format = ExportFormat::from_path(&path).ok_or_else(|| {
            AppError::Export(format!("unknown export extension: {} (use .xlsx, .csv or .json)", arg))
        })?;
        (path, format)
    };

    if path.exists() && !ask(rx, format!("Overwrite {}", path.display())) {
        info("Export cancelled.");
        return Ok(());
    }

    let written = ExportLogic::export(session.roster(), format, Some(&path))?;
    session.record_export(&written);
    Ok(())
}

/// Ask a yes/no question; the answer is the next input line.
fn ask<T: std::fmt::Display>(rx: &Receiver<String>, question: T) -> bool {
    prompt(question);
    match rx.recv() {
        Ok(answer) => {
            println!();
            is_yes(&answer)
        }
        Err(_) => false,
    }
}

/// 1-based row numbers, separated by spaces or commas → 0-based positions.
fn parse_rows(arg: &str) -> AppResult<Vec<usize>> {
    let rows: Vec<usize> = arg
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(|t| match t.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n - 1),
            _ => Err(AppError::InvalidRow(t.to_string())),
        })
        .collect::<AppResult<_>>()?;

    if rows.is_empty() {
        return Err(AppError::NoSelection);
    }
    Ok(rows)
}

fn parse_number(arg: &str) -> AppResult<u64> {
    arg.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("expected a number, got '{}'", arg)))
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_one_based() {
        assert_eq!(parse_rows("1 3,4").unwrap(), vec![0, 2, 3]);
        assert!(matches!(parse_rows("0"), Err(AppError::InvalidRow(_))));
        assert!(matches!(parse_rows("x"), Err(AppError::InvalidRow(_))));
        assert!(matches!(parse_rows(""), Err(AppError::NoSelection)));
    }

    #[test]
    fn numbers_are_validated() {
        assert_eq!(parse_number(" 120 ").unwrap(), 120);
        assert!(parse_number("fast").is_err());
    }
}
