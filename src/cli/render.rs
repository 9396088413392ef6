//! Terminal views shared by `list` and the interactive session.

use crate::models::{Roster, Stats};
use crate::utils::colors::progress_bar;
use crate::utils::table::{Column, Table};
use std::collections::BTreeSet;

/// Roster rows (0-based positions) as a table. Selected rows carry a `*`.
pub fn roster_table(
    roster: &Roster,
    rows: &[usize],
    selection: &BTreeSet<usize>,
    separator: char,
) -> String {
    let mut table = Table::new(vec![
        Column::new("#"),
        Column::new("id"),
        Column::new("name"),
        Column::new("status"),
        Column::new("signed_at"),
    ])
    .with_separator(separator);

    for &i in rows {
        let Some(rec) = roster.get(i) else { continue };
        let marker = if selection.contains(&i) { "*" } else { "" };
        table.add_row(vec![
            format!("{}{}", i + 1, marker),
            rec.id.clone(),
            rec.name.clone(),
            rec.status_str().to_string(),
            rec.signed_at_str(),
        ]);
    }

    table.render()
}

/// `Total: 2 | Present: 1 | Absent: 1  [#####-----]  50%`
pub fn stats_line(stats: &Stats) -> String {
    format!("{}  {}", stats, progress_bar(stats.percent(), 20))
}

pub fn separator_char(configured: &str) -> char {
    configured.chars().next().unwrap_or('-')
}
