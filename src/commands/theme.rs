//! Theme command - Show, set or toggle the light/dark preference

use anyhow::Result;

use pet_adopt::adopt::model::Theme;
use pet_adopt::adopt::{preferences, Store};

/// `value` is "light", "dark" or "toggle"; none shows the current theme
pub fn execute(store: &Store, value: Option<&str>) -> Result<String> {
    let theme = match value {
        None => return Ok(format!("Theme: {}", preferences::theme(store)?)),
        Some(v) if v.eq_ignore_ascii_case("toggle") => preferences::toggle_theme(store)?,
        Some(v) => {
            let theme = Theme::parse(v)?;
            preferences::set_theme(store, theme)?;
            theme
        }
    };
    Ok(format!("Theme set to {}.", theme))
}
