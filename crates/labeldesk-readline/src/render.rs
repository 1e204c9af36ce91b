//! Terminal rendering of session views.

use colored::Colorize;
use labeldesk_core::session::{ActivityEntry, ItemStatus};
use labeldesk_core::stats::{Report, SessionStats};
use labeldesk_execution::SessionSnapshot;

pub fn item(snapshot: &SessionSnapshot) {
    let item = &snapshot.current_item;
    let status = match item.status {
        ItemStatus::Pending => item.status.to_string().yellow(),
        ItemStatus::Completed => item.status.to_string().bright_green(),
    };
    println!();
    println!(
        "{} {}  [{}]",
        "Item".bright_magenta().bold(),
        format!("#{}", item.id).bright_magenta().bold(),
        status
    );
    println!("{}", item.text.white());
    println!();

    for selection in &snapshot.draft {
        let values = selection
            .values
            .iter()
            .map(|value| {
                if selection.selected.as_deref() == Some(value.as_str()) {
                    format!("[{}]", value).bright_green().to_string()
                } else {
                    value.bright_black().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {:<12} {}", selection.dimension.cyan(), values);
    }
    println!(
        "{}",
        format!(
            "Progress: {}/{} ({:.0}%)",
            snapshot.progress.completed, snapshot.progress.target, snapshot.progress.percent
        )
        .bright_black()
    );
}

pub fn stats(stats: &SessionStats) {
    println!("{}", "Session statistics".bright_magenta().bold());
    println!("  Total annotated: {}", stats.count);
    println!("  Average time:    {}s", stats.average_time_seconds);
    match &stats.quality {
        Some(quality) => {
            for (name, value) in [
                ("Accuracy", quality.accuracy),
                ("Quality score", quality.quality_score),
                ("Consistency", quality.consistency),
            ] {
                if let Some(value) = value {
                    println!("  {:<16} {:.1}%", format!("{}:", name), value);
                }
            }
        }
        None => println!("{}", "  Quality metrics: not configured".bright_black()),
    }
}

pub fn activity(entries: &[ActivityEntry]) {
    if entries.is_empty() {
        println!("{}", "No activity yet".bright_black());
        return;
    }
    for entry in entries {
        println!(
            "  {}  {}: {}",
            entry.timestamp_display.bright_black(),
            entry.action.to_string().cyan(),
            entry.details
        );
    }
}

pub fn report(report: &Report) {
    for line in report.summary().lines() {
        println!("{}", line.bright_blue());
    }
}

pub fn error(message: impl std::fmt::Display) {
    println!("{}", format!("Error: {}", message).red());
}

pub fn notice(message: impl std::fmt::Display) {
    println!("{}", message.to_string().bright_green());
}
