//! Account commands - Sign up, log in and edit the profile

use anyhow::Result;
use owo_colors::OwoColorize;

use pet_adopt::adopt::accounts::{self, ProfileUpdate, Role};
use pet_adopt::adopt::{requests, Store};
use pet_adopt::config::Config;

use super::utils;

pub fn signup(store: &Store, name: &str, email: &str, password: &str) -> Result<String> {
    let user = accounts::signup(store, name, email, password)?;
    Ok(format!(
        "{} Welcome, {}! You are now signed in as {}.",
        "Sign up successful!".green(),
        user.name,
        user.email
    ))
}

pub fn login(store: &Store, email: &str, password: &str) -> Result<String> {
    let user = accounts::login(store, email, password)?;
    Ok(format!("{} Welcome back, {}.", "Logged in.".green(), user.name))
}

pub fn logout(store: &Store) -> Result<String> {
    if accounts::logout(store)? {
        Ok("Logged out.".to_string())
    } else {
        Ok("Nobody is signed in.".to_string())
    }
}

pub fn whoami(store: &Store, config: &Config) -> Result<String> {
    match accounts::current_user(store)? {
        Some(user) => {
            let role = match accounts::role(&user, &config.admin_email) {
                Role::Admin => "admin",
                Role::Member => "member",
            };
            Ok(format!("{} <{}> ({})", user.name, user.email, role))
        }
        None => Ok("Not signed in.".to_string()),
    }
}

/// Show the profile, or update it when any field is given
pub fn profile(store: &Store, update: ProfileUpdate) -> Result<String> {
    let changing = update.name.is_some()
        || update.email.is_some()
        || update.password.is_some()
        || update.avatar.is_some();

    let user = if changing {
        accounts::update_profile(store, update)?
    } else {
        accounts::require_user(store)?
    };

    let mut lines = vec![];
    if changing {
        lines.push("Profile updated!".green().to_string());
    }
    lines.push(format!("Name: {}", user.name));
    lines.push(format!("Email: {}", user.email));
    if let Some(avatar) = &user.avatar {
        lines.push(format!("Avatar: {}", avatar));
    }

    let mine = requests::for_requester(store, &user.email)?;
    lines.push(String::new());
    if mine.is_empty() {
        lines.push("No adoption requests yet.".to_string());
    } else {
        lines.push("Adoption requests:".to_string());
        for request in &mine {
            lines.push(format!(
                "  {} {} ({})",
                request.pet,
                utils::status_label(request.status),
                utils::format_date(&request.date)
            ));
        }
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_signup_login_whoami() {
        let store = Store::open_in_memory().unwrap();
        let config = Config::with_db(PathBuf::from(":memory:"));

        assert_eq!(whoami(&store, &config).unwrap(), "Not signed in.");
        signup(&store, "Ann", "ann@example.com", "pw").unwrap();
        assert_eq!(
            whoami(&store, &config).unwrap(),
            "Ann <ann@example.com> (member)"
        );

        assert_eq!(logout(&store).unwrap(), "Logged out.");
        assert!(login(&store, "ann@example.com", "nope").is_err());
        assert!(login(&store, "ann@example.com", "pw").is_ok());
    }

    #[test]
    fn test_profile_requires_sign_in() {
        let store = Store::open_in_memory().unwrap();
        assert!(profile(&store, ProfileUpdate::default()).is_err());
    }

    #[test]
    fn test_profile_update() {
        let store = Store::open_in_memory().unwrap();
        signup(&store, "Ann", "ann@example.com", "pw").unwrap();
        let output = profile(
            &store,
            ProfileUpdate {
                name: Some("Annie".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(output.contains("Name: Annie"));
        assert!(output.contains("No adoption requests yet."));
    }
}
