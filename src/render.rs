//! Terminal presentation of the dashboard: totals, the two charts and the
//! recent-transactions table.

use std::fmt::Write;

use colored::Colorize;

use crate::core::{ShareTable, Transaction, ValidationError};
use crate::session::{Dashboard, Notifier, Renderer};

const BAR_WIDTH: usize = 30;
const EMPTY_TABLE: &str = "No transactions yet. Add your first revenue entry above!";

/// Formats `value` with thousands separators and at most two decimals.
pub fn format_amount(currency: &str, value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 && (grouped != "0" || !frac.is_empty()) { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}{}", sign, currency, grouped)
    } else {
        format!("{}{}{}.{}", sign, currency, grouped, frac)
    }
}

/// Horizontal bars scaled against the largest value.
pub fn bar_chart(entries: &[(&str, f64)], currency: &str, width: usize) -> String {
    let label_width = entries.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let max = entries.iter().map(|(_, value)| *value).fold(0.0, f64::max);

    let mut out = String::new();
    for (label, value) in entries {
        let len = if max > 0.0 { ((value / max) * width as f64).round() as usize } else { 0 };
        let _ = writeln!(out, "{:<lw$} | {} {}", label, "█".repeat(len).cyan(),
            format_amount(currency, *value), lw = label_width);
    }
    out
}

/// Table of transactions in the order given.
pub fn transaction_table(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return format!("{}\n", EMPTY_TABLE.dimmed());
    }

    let headers = ["Date", "Activity", "Amount", "Beneficiary", "Individual", "Community"];
    let rows: Vec<[String; 6]> = transactions.iter()
        .map(|t| [
            t.date.to_string(),
            t.activity_type.label().to_owned(),
            format_amount(currency, t.amount),
            t.beneficiary.clone(),
            format_amount(currency, t.individual_share),
            format_amount(currency, t.community_share)
        ])
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().zip(widths)
        .map(|(h, w)| format!("{:<w$}", h, w = w))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end().bold());
    for row in &rows {
        let cells: Vec<String> = row.iter().zip(widths).enumerate()
            .map(|(idx, (cell, w))| {
                let padded = format!("{:<w$}", cell, w = w);
                match idx {
                    4 => padded.green().to_string(),
                    5 => padded.blue().to_string(),
                    _ => padded
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    out
}

pub fn totals_block(dashboard: &Dashboard, currency: &str) -> String {
    let totals = &dashboard.totals;
    let mut out = String::new();
    let _ = writeln!(out, "{}: {}", "Total Revenue".bold(), format_amount(currency, totals.total_revenue));
    let _ = writeln!(out, "{}: {}", "Community Fund".bold(), format_amount(currency, totals.total_community_fund).blue());
    let _ = writeln!(out, "{}: {}", "Individual Earnings".bold(), format_amount(currency, totals.total_individual_earnings).green());
    out
}

pub fn activity_chart(dashboard: &Dashboard, currency: &str) -> String {
    let entries: Vec<(&str, f64)> = dashboard.breakdown.iter()
        .map(|(activity, amount)| (activity.label(), *amount))
        .collect();
    bar_chart(&entries, currency, BAR_WIDTH)
}

pub fn distribution_chart(dashboard: &Dashboard, currency: &str) -> String {
    bar_chart(&dashboard.distribution(), currency, BAR_WIDTH)
}

pub fn share_table(table: &ShareTable) -> String {
    let mut out = String::new();
    for (activity, split) in table.iter() {
        let _ = writeln!(out, "{:<13} {:<13} individual {}%, community {}%",
            activity.key(), activity.label(), split.individual, split.community);
    }
    out
}

/// Full dashboard as printed by the CLI.
pub fn dashboard(dashboard: &Dashboard, currency: &str) -> String {
    let mut out = totals_block(dashboard, currency);
    let _ = write!(out, "\n{}\n", "Revenue by Activity".underline());
    if dashboard.breakdown.is_empty() {
        let _ = writeln!(out, "{}", "-".dimmed());
    } else {
        out.push_str(&activity_chart(dashboard, currency));
    }
    let _ = write!(out, "\n{}\n", "Revenue Distribution".underline());
    out.push_str(&distribution_chart(dashboard, currency));
    let _ = write!(out, "\n{}\n", "Recent Transactions".underline());
    out.push_str(&transaction_table(&dashboard.recent, currency));
    out
}

/// Prints the dashboard to stdout.
pub struct TerminalRenderer {
    currency: String
}

impl TerminalRenderer {
    pub fn new(currency: &str) -> TerminalRenderer {
        TerminalRenderer { currency: currency.to_owned() }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, view: &Dashboard) {
        print!("{}", dashboard(view, &self.currency));
    }
}

/// Prints rejected input to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, error: &ValidationError) {
        eprintln!("{} {}", "error:".bright_red().bold(), error);
    }
}
