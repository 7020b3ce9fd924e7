//! Terminal UI utilities

use colored::Colorize;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use pushkit_lib::notification::Category;
use pushkit_lib::StoredNotification;
use std::time::Duration;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print a section header
pub fn header(text: &str) {
    println!("\n{}", text.bold().underline());
}

/// Print a key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Create a spinner progress indicator
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a separator line, capped at the terminal width
pub fn separator() {
    let (_, columns) = Term::stdout().size();
    let width = usize::from(columns).clamp(10, 60);
    println!("{}", "─".repeat(width).dimmed());
}

/// Print JSON prettily
pub fn json(value: &serde_json::Value) {
    if let Ok(pretty) = serde_json::to_string_pretty(value) {
        println!("{}", pretty);
    }
}

/// One-line summary of a notification
pub fn notification_line(notification: &StoredNotification) -> String {
    let record = &notification.record;
    let mut tags = vec![record.kind.clone()];
    if let Some(category) = record.category {
        tags.push(category.as_str().to_string());
    }
    if let Some(priority) = record.priority {
        tags.push(format!("p{}", priority));
    }

    format!(
        "[{}] {} ({})",
        record.timestamp,
        record.title,
        tags.join(", ")
    )
}

/// Print a notification with its body
pub fn notification(notification: &StoredNotification) {
    let line = notification_line(notification);
    let line = match notification.record.category {
        Some(Category::Warning) => line.yellow(),
        Some(Category::Success) => line.green(),
        _ => line.normal(),
    };
    println!("{} {}", "●".blue(), line);
    if !notification.record.body.is_empty() {
        println!("    {}", notification.record.body);
    }
    println!("    {}", notification.id.as_str().dimmed());
}
