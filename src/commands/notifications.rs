//! Notifications commands

use anyhow::Result;

use pet_adopt::adopt::{notifications, Store};

pub fn list(store: &Store) -> Result<String> {
    let messages = notifications::list(store)?;
    if messages.is_empty() {
        return Ok("No notifications".to_string());
    }

    let mut lines = vec![format!("Notifications ({})", messages.len())];
    lines.extend(messages.iter().map(|m| format!("  • {}", m)));
    Ok(lines.join("\n"))
}

pub fn clear(store: &Store) -> Result<String> {
    let count = notifications::clear(store)?;
    Ok(format!("Cleared {} notification(s).", count))
}
