//! Display preferences

use super::error::Result;
use super::model::Theme;
use super::store::{Key, Store};

pub fn theme(store: &Store) -> Result<Theme> {
    let dark = store.get::<bool>(Key::DarkMode)?.unwrap_or(false);
    Ok(if dark { Theme::Dark } else { Theme::Light })
}

pub fn set_theme(store: &Store, theme: Theme) -> Result<()> {
    store.set(Key::DarkMode, &(theme == Theme::Dark))
}

pub fn toggle_theme(store: &Store) -> Result<Theme> {
    let next = match theme(store)? {
        Theme::Light => Theme::Dark,
        Theme::Dark => Theme::Light,
    };
    set_theme(store, next)?;
    Ok(next)
}
