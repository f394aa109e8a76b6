//! Adoption requests and their review
//!
//! A request starts `pending` and moves once, to `approved` or `rejected`.
//! Approval is the only place a pet becomes adopted: it flags the pet and
//! rejects every other pending request for that pet in the same transaction.
//! Deleting a pet rejects whatever is still pending for it.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::catalog::{load_pets, save_pets};
use super::error::{require, Error, Result};
use super::model::{AdoptionRequest, AdoptionStatus, Pet, RequestStatus};
use super::notifications;
use super::store::{Key, Store};

pub fn load_requests(store: &Store) -> Result<Vec<AdoptionRequest>> {
    store.get_list(Key::Adoptions)
}

fn save_requests(store: &Store, requests: &[AdoptionRequest]) -> Result<()> {
    store.set(Key::Adoptions, requests)
}

/// Detail-page status: a pending request wins over the adopted flag
pub fn adoption_status(pet: &Pet, requests: &[AdoptionRequest]) -> AdoptionStatus {
    let pending = requests
        .iter()
        .any(|r| r.pet_id == pet.id && r.status == RequestStatus::Pending);
    if pending {
        AdoptionStatus::Requested
    } else if pet.adopted {
        AdoptionStatus::Adopted
    } else {
        AdoptionStatus::Available
    }
}

/// Adoption form contents
#[derive(Debug, Clone)]
pub struct RequestForm {
    pub pet_id: u64,
    pub name: String,
    pub email: String,
}

/// File a pending request for an available pet
pub fn submit(store: &Store, form: RequestForm) -> Result<AdoptionRequest> {
    submit_at(store, form, Utc::now())
}

pub(crate) fn submit_at(
    store: &Store,
    form: RequestForm,
    now: DateTime<Utc>,
) -> Result<AdoptionRequest> {
    require("name", &form.name)?;
    require("email", &form.email)?;

    store.transaction(|s| {
        let pet = load_pets(s)?
            .into_iter()
            .find(|p| p.id == form.pet_id)
            .ok_or(Error::PetNotFound(form.pet_id))?;
        let mut requests = load_requests(s)?;

        match adoption_status(&pet, &requests) {
            AdoptionStatus::Adopted => return Err(Error::PetAlreadyAdopted(pet.name)),
            AdoptionStatus::Requested => return Err(Error::RequestAlreadyPending(pet.name)),
            AdoptionStatus::Available => {}
        }

        let request = AdoptionRequest {
            id: Uuid::new_v4().to_string(),
            pet_id: pet.id,
            pet: pet.name.clone(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            status: RequestStatus::Pending,
            date: now,
        };
        requests.push(request.clone());
        save_requests(s, &requests)?;
        notifications::push(
            s,
            format!(
                "New adoption request for {} from {}.",
                request.pet, request.name
            ),
        )?;

        info!(id = %request.id, pet = %request.pet, email = %request.email, "request submitted");
        Ok(request)
    })
}

/// Find a request by full id or unique id prefix
pub fn resolve<'a>(requests: &'a [AdoptionRequest], id: &str) -> Result<&'a AdoptionRequest> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::RequestNotFound(id.to_string()));
    }
    if let Some(exact) = requests.iter().find(|r| r.id == id) {
        return Ok(exact);
    }

    let mut matches = requests.iter().filter(|r| r.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(found), None) => Ok(found),
        (Some(_), Some(_)) => Err(Error::AmbiguousRequest(id.to_string())),
        (None, _) => Err(Error::RequestNotFound(id.to_string())),
    }
}

/// Approve a pending request, adopt its pet and turn down competing requests
pub fn approve(store: &Store, id: &str) -> Result<AdoptionRequest> {
    store.transaction(|s| {
        let mut requests = load_requests(s)?;
        let target = pending(&requests, id)?;

        let mut pets = load_pets(s)?;
        let pet = pets
            .iter_mut()
            .find(|p| p.id == target.pet_id)
            .ok_or(Error::PetNotFound(target.pet_id))?;
        if pet.adopted {
            return Err(Error::PetAlreadyAdopted(pet.name.clone()));
        }
        pet.adopted = true;
        save_pets(s, &pets)?;

        let mut approved = None;
        for request in requests.iter_mut().filter(|r| r.id == target.id) {
            request.status = RequestStatus::Approved;
            approved = Some(request.clone());
        }
        save_requests(s, &requests)?;
        let declined = reject_pending_for_pet(s, target.pet_id)?;

        let approved = approved.ok_or_else(|| Error::RequestNotFound(id.to_string()))?;
        notifications::push(
            s,
            format!(
                "Adoption request for {} by {} was approved.",
                approved.pet, approved.name
            ),
        )?;

        info!(id = %approved.id, pet = %approved.pet, declined, "request approved");
        Ok(approved)
    })
}

/// Reject every pending request for `pet_id`, notifying each; returns how many
pub(crate) fn reject_pending_for_pet(store: &Store, pet_id: u64) -> Result<usize> {
    let mut requests = load_requests(store)?;
    let mut declined = 0;
    for request in requests
        .iter_mut()
        .filter(|r| r.pet_id == pet_id && r.status == RequestStatus::Pending)
    {
        request.status = RequestStatus::Rejected;
        declined += 1;
        notifications::push(
            store,
            format!(
                "Adoption request for {} by {} was rejected.",
                request.pet, request.name
            ),
        )?;
    }
    if declined > 0 {
        save_requests(store, &requests)?;
    }
    Ok(declined)
}

/// Reject a pending request; the pet's adopted flag is not touched
pub fn reject(store: &Store, id: &str) -> Result<AdoptionRequest> {
    store.transaction(|s| {
        let mut requests = load_requests(s)?;
        let target_id = pending(&requests, id)?.id;

        let mut rejected = None;
        for request in requests.iter_mut().filter(|r| r.id == target_id) {
            request.status = RequestStatus::Rejected;
            rejected = Some(request.clone());
        }
        save_requests(s, &requests)?;

        let rejected = rejected.ok_or_else(|| Error::RequestNotFound(id.to_string()))?;
        notifications::push(
            s,
            format!(
                "Adoption request for {} by {} was rejected.",
                rejected.pet, rejected.name
            ),
        )?;

        info!(id = %rejected.id, pet = %rejected.pet, "request rejected");
        Ok(rejected)
    })
}

/// Delete a request regardless of status
pub fn remove(store: &Store, id: &str) -> Result<AdoptionRequest> {
    let mut requests = load_requests(store)?;
    let target_id = resolve(&requests, id)?.id.clone();
    let index = requests
        .iter()
        .position(|r| r.id == target_id)
        .ok_or_else(|| Error::RequestNotFound(id.to_string()))?;
    let removed = requests.remove(index);
    save_requests(store, &requests)?;

    info!(id = %removed.id, "request removed");
    Ok(removed)
}

/// Resolve `id` and insist the request is still pending
fn pending(requests: &[AdoptionRequest], id: &str) -> Result<AdoptionRequest> {
    let request = resolve(requests, id)?;
    if request.status != RequestStatus::Pending {
        return Err(Error::InvalidTransition {
            id: request.id.clone(),
            status: request.status.to_string(),
        });
    }
    Ok(request.clone())
}

/// Requests filed with `email`, oldest first
pub fn for_requester(store: &Store, email: &str) -> Result<Vec<AdoptionRequest>> {
    Ok(load_requests(store)?
        .into_iter()
        .filter(|r| r.email == email)
        .collect())
}

/// All requests, optionally restricted to one status
pub fn list(store: &Store, status: Option<RequestStatus>) -> Result<Vec<AdoptionRequest>> {
    Ok(load_requests(store)?
        .into_iter()
        .filter(|r| match status {
            Some(status) => r.status == status,
            None => true,
        })
        .collect())
}
