//! Notification messages shown by the bell

use tracing::debug;

use super::error::Result;
use super::store::{Key, Store};

pub fn list(store: &Store) -> Result<Vec<String>> {
    store.get_list(Key::Notifications)
}

pub fn push(store: &Store, message: impl Into<String>) -> Result<()> {
    let mut messages = list(store)?;
    let message = message.into();
    debug!(%message, "notification added");
    messages.push(message);
    store.set(Key::Notifications, &messages)
}

/// Drop every notification; returns how many were cleared
pub fn clear(store: &Store) -> Result<usize> {
    let count = list(store)?.len();
    store.set(Key::Notifications, &Vec::<String>::new())?;
    Ok(count)
}
