//! Aggregated views over requests and pets for the two dashboards

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};

use super::catalog::load_pets;
use super::error::Result;
use super::model::{AdoptionRequest, Pet, RequestStatus, User};
use super::requests::load_requests;
use super::store::Store;

/// A pet joined with the approved request that adopted it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptedPet {
    pub pet: Pet,
    pub adopted_by: String,
    pub adopted_by_email: String,
    pub adopted_on: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserDashboard {
    pub requests: Vec<AdoptionRequest>,
    pub adopted: Vec<AdoptedPet>,
}

#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    pub total_pets: usize,
    pub status_counts: BTreeMap<RequestStatus, usize>,
    /// Distinct requester emails
    pub requesters: usize,
    /// Approved requests per submission day
    pub approvals_by_date: BTreeMap<NaiveDate, usize>,
    /// Breed of the latest approved adoption, "Unknown" once its pet is deleted
    pub most_recent_breed: Option<String>,
    pub adopted: Vec<AdoptedPet>,
    pub requests: Vec<AdoptionRequest>,
}

impl AdminDashboard {
    pub fn count(&self, status: RequestStatus) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}

/// Join approved requests with the pets they refer to; deleted pets are skipped
fn adopted_pets<'a>(
    requests: impl IntoIterator<Item = &'a AdoptionRequest>,
    pets: &[Pet],
) -> Vec<AdoptedPet> {
    requests
        .into_iter()
        .filter(|r| r.status == RequestStatus::Approved)
        .filter_map(|r| {
            pets.iter().find(|p| p.id == r.pet_id).map(|pet| AdoptedPet {
                pet: pet.clone(),
                adopted_by: r.name.clone(),
                adopted_by_email: r.email.clone(),
                adopted_on: r.date,
            })
        })
        .collect()
}

/// Requests visible to `user` (everything for the admin) and the pets they adopted
pub fn user_dashboard(store: &Store, user: &User, is_admin: bool) -> Result<UserDashboard> {
    let requests: Vec<AdoptionRequest> = load_requests(store)?
        .into_iter()
        .filter(|r| is_admin || r.email == user.email)
        .collect();
    let pets = load_pets(store)?;
    let adopted = adopted_pets(&requests, &pets);
    Ok(UserDashboard { requests, adopted })
}

pub fn admin_dashboard(store: &Store) -> Result<AdminDashboard> {
    let requests = load_requests(store)?;
    let pets = load_pets(store)?;

    let mut status_counts = BTreeMap::new();
    for request in &requests {
        *status_counts.entry(request.status).or_insert(0) += 1;
    }

    let requesters = requests
        .iter()
        .map(|r| r.email.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    let approved: Vec<&AdoptionRequest> = requests
        .iter()
        .filter(|r| r.status == RequestStatus::Approved)
        .collect();

    let mut approvals_by_date = BTreeMap::new();
    for request in &approved {
        *approvals_by_date.entry(request.date.date_naive()).or_insert(0) += 1;
    }

    let most_recent_breed = approved.iter().max_by_key(|r| r.date).map(|r| {
        pets.iter()
            .find(|p| p.id == r.pet_id)
            .map(|p| p.breed.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    });

    let adopted = adopted_pets(approved, &pets);

    Ok(AdminDashboard {
        total_pets: pets.len(),
        status_counts,
        requesters,
        approvals_by_date,
        most_recent_breed,
        adopted,
        requests,
    })
}
