//! Favorite pets, shared by everyone using the same store

use tracing::info;

use super::catalog::{find_pet, load_pets};
use super::error::Result;
use super::model::Pet;
use super::store::{Key, Store};

pub fn list_ids(store: &Store) -> Result<Vec<u64>> {
    store.get_list(Key::Favorites)
}

pub fn is_favorite(store: &Store, pet_id: u64) -> Result<bool> {
    Ok(list_ids(store)?.contains(&pet_id))
}

/// Add or remove a pet; returns `true` when it is now a favorite
pub fn toggle(store: &Store, pet_id: u64) -> Result<bool> {
    let pet = find_pet(store, pet_id)?;
    let mut ids = list_ids(store)?;

    let now_favorite = if let Some(pos) = ids.iter().position(|&id| id == pet_id) {
        ids.remove(pos);
        false
    } else {
        ids.push(pet_id);
        true
    };
    store.set(Key::Favorites, &ids)?;

    info!(pet_id, name = %pet.name, favorite = now_favorite, "favorite toggled");
    Ok(now_favorite)
}

/// Favorite pets in catalog order; ids of deleted pets are skipped
pub fn favorite_pets(store: &Store) -> Result<Vec<Pet>> {
    let ids = list_ids(store)?;
    Ok(load_pets(store)?
        .into_iter()
        .filter(|p| ids.contains(&p.id))
        .collect())
}
