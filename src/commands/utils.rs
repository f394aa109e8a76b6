//! Shared utilities for commands

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::io::{self, Write};

use pet_adopt::adopt::model::{AdoptionStatus, RequestStatus};
use pet_adopt::adopt::Store;
use pet_adopt::config::Config;

/// Open the store named by the configuration
pub fn open_store(config: &Config) -> Result<Store> {
    Store::open(&config.db_path)
        .with_context(|| format!("Failed to open store: {}", config.db_path.display()))
}

/// Table with the layout every listing uses
pub fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Capitalized request status, colored by outcome
pub fn status_label(status: RequestStatus) -> String {
    let text = capitalize(status.as_str());
    match status {
        RequestStatus::Pending => text.yellow().to_string(),
        RequestStatus::Approved => text.green().to_string(),
        RequestStatus::Rejected => text.red().to_string(),
    }
}

pub fn adoption_label(status: AdoptionStatus) -> String {
    match status {
        AdoptionStatus::Available => status.green().to_string(),
        AdoptionStatus::Requested => status.yellow().to_string(),
        AdoptionStatus::Adopted => status.red().to_string(),
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

/// First segment of a request id, enough to pass back on the command line
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}

/// Shorten text for table cells
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Ask a yes/no question on stdin; anything but "y" declines
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} (y/N) ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}
