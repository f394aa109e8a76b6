//! Pet catalog and adoption request management

pub mod accounts;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod favorites;
pub mod model;
pub mod notifications;
pub mod preferences;
pub mod requests;
pub mod seed;
pub mod store;

pub use error::{Error, Result};
pub use store::{Key, Store};
