//! Sign-up, sign-in and profile management
//!
//! Credentials are compared as plaintext; the session is the email stored
//! under `currentUser`.

use tracing::info;

use super::error::{require, Error, Result};
use super::model::User;
use super::store::{Key, Store};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

/// Emails are compared exactly, like every other account lookup
pub fn role(user: &User, admin_email: &str) -> Role {
    if user.email == admin_email {
        Role::Admin
    } else {
        Role::Member
    }
}

pub fn load_users(store: &Store) -> Result<Vec<User>> {
    store.get_list(Key::Users)
}

/// Register a new account and sign it in
pub fn signup(store: &Store, name: &str, email: &str, password: &str) -> Result<User> {
    require("name", name)?;
    require("email", email)?;
    require("password", password)?;

    let email = email.trim();
    let user = User {
        name: name.trim().to_string(),
        email: email.to_string(),
        password: password.to_string(),
        avatar: None,
    };

    store.transaction(|s| {
        let mut users = load_users(s)?;
        if users.iter().any(|u| u.email == email) {
            return Err(Error::EmailTaken(email.to_string()));
        }
        users.push(user.clone());
        s.set(Key::Users, &users)?;
        s.set(Key::CurrentUser, email)
    })?;

    info!(email, "user signed up");
    Ok(user)
}

/// Sign in with an exact email and password match
pub fn login(store: &Store, email: &str, password: &str) -> Result<User> {
    let email = email.trim();
    let user = load_users(store)?
        .into_iter()
        .find(|u| u.email == email && u.password == password)
        .ok_or(Error::InvalidCredentials)?;

    store.set(Key::CurrentUser, &user.email)?;
    info!(email, "user logged in");
    Ok(user)
}

/// Clear the session; returns whether someone was signed in
pub fn logout(store: &Store) -> Result<bool> {
    let removed = store.remove(Key::CurrentUser)?;
    if removed {
        info!("user logged out");
    }
    Ok(removed)
}

/// The signed-in user, if the session still points at an existing account
pub fn current_user(store: &Store) -> Result<Option<User>> {
    let Some(email) = store.get::<String>(Key::CurrentUser)? else {
        return Ok(None);
    };
    Ok(load_users(store)?.into_iter().find(|u| u.email == email))
}

pub fn require_user(store: &Store) -> Result<User> {
    current_user(store)?.ok_or(Error::NotSignedIn)
}

pub fn require_admin(store: &Store, admin_email: &str) -> Result<User> {
    match current_user(store)? {
        Some(user) if role(&user, admin_email) == Role::Admin => Ok(user),
        _ => Err(Error::AdminOnly(admin_email.to_string())),
    }
}

/// Profile fields to change; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

/// Update the signed-in user's profile, moving the session to a new email if changed
pub fn update_profile(store: &Store, update: ProfileUpdate) -> Result<User> {
    let current = require_user(store)?;

    let updated = User {
        name: update.name.unwrap_or_else(|| current.name.clone()),
        email: update
            .email
            .map(|e| e.trim().to_string())
            .unwrap_or_else(|| current.email.clone()),
        password: update.password.unwrap_or_else(|| current.password.clone()),
        avatar: update.avatar.or_else(|| current.avatar.clone()),
    };
    require("name", &updated.name)?;
    require("email", &updated.email)?;
    require("password", &updated.password)?;

    store.transaction(|s| {
        let mut users = load_users(s)?;
        if updated.email != current.email && users.iter().any(|u| u.email == updated.email) {
            return Err(Error::EmailTaken(updated.email.clone()));
        }
        for user in users.iter_mut().filter(|u| u.email == current.email) {
            *user = updated.clone();
        }
        s.set(Key::Users, &users)?;
        s.set(Key::CurrentUser, &updated.email)
    })?;

    info!(email = %updated.email, "profile updated");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ADMIN_EMAIL;

    #[test]
    fn test_signup_signs_in() {
        let store = Store::open_in_memory().unwrap();
        let user = signup(&store, "Ann", "ann@example.com", "pw").unwrap();
        assert_eq!(current_user(&store).unwrap(), Some(user));
    }

    #[test]
    fn test_signup_rejects_duplicate_email() {
        let store = Store::open_in_memory().unwrap();
        signup(&store, "Ann", "ann@example.com", "pw").unwrap();
        let err = signup(&store, "Other", "ann@example.com", "x").unwrap_err();
        assert!(matches!(err, Error::EmailTaken(_)));
        assert_eq!(load_users(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_signup_requires_fields() {
        let store = Store::open_in_memory().unwrap();
        let err = signup(&store, "Ann", "", "pw").unwrap_err();
        assert!(matches!(err, Error::MissingField("email")));
    }

    #[test]
    fn test_login_and_logout() {
        let store = Store::open_in_memory().unwrap();
        signup(&store, "Ann", "ann@example.com", "pw").unwrap();
        assert!(logout(&store).unwrap());
        assert!(current_user(&store).unwrap().is_none());
        assert!(!logout(&store).unwrap());

        assert!(matches!(
            login(&store, "ann@example.com", "wrong"),
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            login(&store, "nobody@example.com", "pw"),
            Err(Error::InvalidCredentials)
        ));

        let user = login(&store, "ann@example.com", "pw").unwrap();
        assert_eq!(user.name, "Ann");
        assert_eq!(require_user(&store).unwrap().email, "ann@example.com");
    }

    #[test]
    fn test_roles() {
        let store = Store::open_in_memory().unwrap();
        signup(&store, "Ann", "ann@example.com", "pw").unwrap();
        assert!(matches!(
            require_admin(&store, DEFAULT_ADMIN_EMAIL),
            Err(Error::AdminOnly(_))
        ));

        let admin = signup(&store, "Admin", DEFAULT_ADMIN_EMAIL, "admin").unwrap();
        assert_eq!(role(&admin, DEFAULT_ADMIN_EMAIL), Role::Admin);
        assert!(require_admin(&store, DEFAULT_ADMIN_EMAIL).is_ok());
    }

    #[test]
    fn test_mixed_case_admin_email_is_a_member() {
        let store = Store::open_in_memory().unwrap();
        signup(&store, "Admin", DEFAULT_ADMIN_EMAIL, "admin").unwrap();
        logout(&store).unwrap();

        let upper = DEFAULT_ADMIN_EMAIL.to_uppercase();
        let user = signup(&store, "Mallory", &upper, "mine").unwrap();
        assert_eq!(role(&user, DEFAULT_ADMIN_EMAIL), Role::Member);
        assert!(matches!(
            require_admin(&store, DEFAULT_ADMIN_EMAIL),
            Err(Error::AdminOnly(_))
        ));
    }

    #[test]
    fn test_require_user_when_signed_out() {
        let store = Store::open_in_memory().unwrap();
        assert!(matches!(require_user(&store), Err(Error::NotSignedIn)));
    }

    #[test]
    fn test_update_profile_moves_session() {
        let store = Store::open_in_memory().unwrap();
        signup(&store, "Ann", "ann@example.com", "pw").unwrap();

        let updated = update_profile(
            &store,
            ProfileUpdate {
                email: Some("ann@new.org".into()),
                avatar: Some("ann.png".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.name, "Ann");
        assert_eq!(updated.avatar.as_deref(), Some("ann.png"));

        let current = current_user(&store).unwrap().unwrap();
        assert_eq!(current.email, "ann@new.org");
        assert_eq!(load_users(&store).unwrap().len(), 1);
        assert!(login(&store, "ann@new.org", "pw").is_ok());
    }

    #[test]
    fn test_update_profile_rejects_taken_email() {
        let store = Store::open_in_memory().unwrap();
        signup(&store, "Bob", "bob@example.com", "pw").unwrap();
        signup(&store, "Ann", "ann@example.com", "pw").unwrap();

        let err = update_profile(
            &store,
            ProfileUpdate {
                email: Some("bob@example.com".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::EmailTaken(_)));
        assert_eq!(require_user(&store).unwrap().email, "ann@example.com");
    }

    #[test]
    fn test_update_profile_rejects_blank_password() {
        let store = Store::open_in_memory().unwrap();
        signup(&store, "Ann", "ann@example.com", "pw").unwrap();
        let err = update_profile(
            &store,
            ProfileUpdate {
                password: Some(String::new()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingField("password")));
    }
}
