//! CLI commands

pub mod auth;
pub mod dashboard;
pub mod favorites;
pub mod notifications;
pub mod pets;
pub mod requests;
pub mod theme;
pub mod utils;
