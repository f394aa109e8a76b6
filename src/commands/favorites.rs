//! Favorites commands - Star pets and list the starred ones

use anyhow::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;

use super::utils;
use pet_adopt::adopt::{catalog, favorites, Store};

pub fn list(store: &Store) -> Result<String> {
    let pets = favorites::favorite_pets(store)?;
    if pets.is_empty() {
        return Ok("No favorites yet.".to_string());
    }

    let mut table = utils::new_table();
    table.set_header(vec!["ID", "Name", "Type", "Breed", "Age", "Description"]);
    for pet in &pets {
        table.add_row(vec![
            Cell::new(pet.id),
            Cell::new(&pet.name),
            Cell::new(&pet.kind),
            Cell::new(&pet.breed),
            Cell::new(&pet.age),
            Cell::new(utils::truncate(&pet.description, 40)),
        ]);
    }
    Ok(table.to_string())
}

pub fn toggle(store: &Store, pet_id: u64) -> Result<String> {
    let starred = favorites::toggle(store, pet_id)?;
    let pet = catalog::find_pet(store, pet_id)?;
    if starred {
        Ok(format!("{} {} added to favorites.", "★".yellow(), pet.name))
    } else {
        Ok(format!("{} removed from favorites.", pet.name))
    }
}
