use colored::Colorize;
use filedb::api::{CmdMessage, MessageLevel};
use filedb::config::{FiledbConfig, CONFIG_KEYS};
use filedb::model::{field, Record, Table};
use unicode_width::UnicodeWidthStr;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Aligned `a | b | c` table in the table's header order.
pub(crate) fn print_rows(table: Option<Table>, rows: &[Record]) {
    if rows.is_empty() {
        println!("(no results)");
        return;
    }
    let columns: Vec<&str> = match table {
        Some(t) => t.headers().to_vec(),
        None => rows[0].keys().map(String::as_str).collect(),
    };
    for line in render_table(&columns, rows) {
        println!("{}", line);
    }
}

pub(crate) fn print_problems(problems: &[String]) {
    for problem in problems {
        println!("- {}", problem);
    }
}

pub(crate) fn print_config(config: &FiledbConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn render_table(columns: &[&str], rows: &[Record]) -> Vec<String> {
    let widths: Vec<usize> = columns
        .iter()
        .map(|c| {
            rows.iter()
                .map(|r| field(r, c).width())
                .chain(std::iter::once(c.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_padded(columns.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        lines.push(join_padded(columns.iter().map(|c| field(row, c)), &widths));
    }
    lines
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, w)| format!("{}{}", cell, " ".repeat(w.saturating_sub(cell.width()))))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
