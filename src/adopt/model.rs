//! Records persisted in the store and the enums describing them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::Error;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    /// Acts as the identifier
    pub email: String,
    /// Stored and compared as plaintext
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Size class of a pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetSize {
    Small,
    Medium,
    Large,
}

impl PetSize {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            _ => Err(Error::InvalidValue {
                field: "size",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => write!(f, "Small"),
            Self::Medium => write!(f, "Medium"),
            Self::Large => write!(f, "Large"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(Error::InvalidValue {
                field: "gender",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: u64,
    pub name: String,
    /// Species label such as "Dog" or "Cat"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub breed: String,
    /// Free text, e.g. "2 years" or "6 months"
    pub age: String,
    pub size: PetSize,
    pub gender: Gender,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub adopted: bool,
}

/// Lifecycle of an adoption request
///
/// `Pending` is the only state with outgoing transitions; both others are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(Error::InvalidValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's request to adopt one pet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionRequest {
    pub id: String,
    pub pet_id: u64,
    /// Pet name at submission time
    pub pet: String,
    /// Requester name
    pub name: String,
    /// Requester email
    pub email: String,
    #[serde(default)]
    pub status: RequestStatus,
    pub date: DateTime<Utc>,
}

/// Adoption state of a pet as shown on its detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdoptionStatus {
    Available,
    /// A request is waiting for review
    Requested,
    Adopted,
}

impl fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Requested => write!(f, "Requested"),
            Self::Adopted => write!(f, "Adopted"),
        }
    }
}

/// Catalog status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingStatus {
    Available,
    Adopted,
}

impl ListingStatus {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "adopted" => Ok(Self::Adopted),
            _ => Err(Error::InvalidValue {
                field: "status",
                value: s.to_string(),
            }),
        }
    }

    pub fn of(pet: &Pet) -> Self {
        if pet.adopted {
            Self::Adopted
        } else {
            Self::Available
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeCategory {
    PuppyKitten,
    YoungAdult,
    Adult,
    Senior,
}

impl AgeCategory {
    pub fn parse(s: &str) -> Result<Self, Error> {
        let normalized: String = s
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match normalized.as_str() {
            "puppykitten" | "puppy" | "kitten" => Ok(Self::PuppyKitten),
            "youngadult" | "young" => Ok(Self::YoungAdult),
            "adult" => Ok(Self::Adult),
            "senior" => Ok(Self::Senior),
            _ => Err(Error::InvalidValue {
                field: "age",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PuppyKitten => write!(f, "Puppy/Kitten"),
            Self::YoungAdult => write!(f, "Young Adult"),
            Self::Adult => write!(f, "Adult"),
            Self::Senior => write!(f, "Senior"),
        }
    }
}

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(Error::InvalidValue {
                field: "theme",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}
