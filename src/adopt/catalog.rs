//! Pet catalog: loading, filtering, pagination and catalog edits

use tracing::{debug, info};

use super::error::{require, Error, Result};
use super::model::{AgeCategory, Gender, ListingStatus, Pet, PetSize, RequestStatus};
use super::requests::{load_requests, reject_pending_for_pet};
use super::seed::seed_pets;
use super::store::{Key, Store};

/// Load the catalog, falling back to the seed catalog when nothing is stored
pub fn load_pets(store: &Store) -> Result<Vec<Pet>> {
    let stored: Vec<Pet> = store.get_list(Key::Pets)?;
    if stored.is_empty() {
        debug!("no pets stored, serving seed catalog");
        return Ok(seed_pets());
    }
    debug!(count = stored.len(), "loaded pets");
    Ok(stored)
}

pub fn save_pets(store: &Store, pets: &[Pet]) -> Result<()> {
    store.set(Key::Pets, pets)
}

pub fn find_pet(store: &Store, id: u64) -> Result<Pet> {
    load_pets(store)?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or(Error::PetNotFound(id))
}

/// Bucket a free-text age such as "2 years" or "6 months"
///
/// Any mention of months is a puppy/kitten. Otherwise the first number is read
/// as years: up to 2 is a young adult, 3 to 5 an adult, anything older (or text
/// without a number) a senior. Empty text has no category.
pub fn age_category(age: &str) -> Option<AgeCategory> {
    let age = age.trim().to_lowercase();
    if age.is_empty() {
        return None;
    }
    if age.contains("month") {
        return Some(AgeCategory::PuppyKitten);
    }

    let years = age
        .split(|c: char| !c.is_ascii_digit())
        .find(|s| !s.is_empty())
        .and_then(|s| s.parse::<u32>().ok());

    Some(match years {
        Some(0..=2) => AgeCategory::YoungAdult,
        Some(3..=5) => AgeCategory::Adult,
        _ => AgeCategory::Senior,
    })
}

/// Catalog filter; every empty field means "All"
#[derive(Debug, Clone, Default)]
pub struct PetFilter {
    /// Case-insensitive substring over name, type and breed
    pub search: Option<String>,
    pub kind: Option<String>,
    /// Any of these breeds
    pub breeds: Vec<String>,
    /// Any of these sizes
    pub sizes: Vec<PetSize>,
    pub age: Option<AgeCategory>,
    pub gender: Option<Gender>,
    pub status: Option<ListingStatus>,
}

impl PetFilter {
    pub fn matches(&self, pet: &Pet) -> bool {
        if let Some(kind) = &self.kind {
            if !pet.kind.eq_ignore_ascii_case(kind) {
                return false;
            }
        }
        if !self.breeds.is_empty()
            && !self.breeds.iter().any(|b| pet.breed.eq_ignore_ascii_case(b))
        {
            return false;
        }
        if !self.sizes.is_empty() && !self.sizes.contains(&pet.size) {
            return false;
        }
        if let Some(age) = self.age {
            if age_category(&pet.age) != Some(age) {
                return false;
            }
        }
        if self.gender.is_some_and(|g| g != pet.gender) {
            return false;
        }
        if self.status.is_some_and(|s| s != ListingStatus::of(pet)) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                pet.name.to_lowercase().contains(&term)
                    || pet.kind.to_lowercase().contains(&term)
                    || pet.breed.to_lowercase().contains(&term)
            }
        }
    }
}

/// Pets matching `filter`, in catalog order
pub fn filter_pets<'a>(pets: &'a [Pet], filter: &PetFilter) -> Vec<&'a Pet> {
    pets.iter().filter(|p| filter.matches(p)).collect()
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into 1-based pages of `per_page`
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}

/// Distinct values offered by the catalog filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub types: Vec<String>,
    pub breeds: Vec<String>,
    pub sizes: Vec<PetSize>,
}

/// Collect filter values in first-appearance order
pub fn filter_options(pets: &[Pet]) -> FilterOptions {
    let mut options = FilterOptions::default();
    for pet in pets {
        if !options.types.contains(&pet.kind) {
            options.types.push(pet.kind.clone());
        }
        if !pet.breed.is_empty() && !options.breeds.contains(&pet.breed) {
            options.breeds.push(pet.breed.clone());
        }
        if !options.sizes.contains(&pet.size) {
            options.sizes.push(pet.size);
        }
    }
    options
}

/// Fields for a new catalog entry
#[derive(Debug, Clone, Default)]
pub struct NewPet {
    pub name: String,
    pub kind: String,
    pub breed: String,
    pub age: String,
    pub size: Option<PetSize>,
    pub gender: Option<Gender>,
    pub description: String,
    pub image: String,
}

/// Add a pet to the catalog, available, with an id no pet or request has used
pub fn add_pet(store: &Store, new: NewPet) -> Result<Pet> {
    require("name", &new.name)?;
    require("type", &new.kind)?;
    require("description", &new.description)?;
    require("image", &new.image)?;
    require("age", &new.age)?;
    let size = new.size.ok_or(Error::MissingField("size"))?;
    let gender = new.gender.ok_or(Error::MissingField("gender"))?;

    let mut pets = load_pets(store)?;
    let requested = load_requests(store)?;
    let id = pets
        .iter()
        .map(|p| p.id)
        .chain(requested.iter().map(|r| r.pet_id))
        .max()
        .unwrap_or(0)
        + 1;

    let pet = Pet {
        id,
        name: new.name.trim().to_string(),
        kind: new.kind.trim().to_string(),
        breed: new.breed.trim().to_string(),
        age: new.age.trim().to_string(),
        size,
        gender,
        description: new.description.trim().to_string(),
        image: new.image.trim().to_string(),
        adopted: false,
    };
    pets.push(pet.clone());
    save_pets(store, &pets)?;

    info!(id, name = %pet.name, "pet added");
    Ok(pet)
}

/// Partial edit of a catalog entry; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct PetUpdate {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub size: Option<PetSize>,
    pub gender: Option<Gender>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl PetUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.kind.is_none()
            && self.breed.is_none()
            && self.age.is_none()
            && self.size.is_none()
            && self.gender.is_none()
            && self.description.is_none()
            && self.image.is_none()
    }
}

pub fn update_pet(store: &Store, id: u64, update: PetUpdate) -> Result<Pet> {
    let mut pets = load_pets(store)?;
    let pet = pets
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(Error::PetNotFound(id))?;

    if let Some(name) = update.name {
        require("name", &name)?;
        pet.name = name.trim().to_string();
    }
    if let Some(kind) = update.kind {
        require("type", &kind)?;
        pet.kind = kind.trim().to_string();
    }
    if let Some(breed) = update.breed {
        pet.breed = breed.trim().to_string();
    }
    if let Some(age) = update.age {
        require("age", &age)?;
        pet.age = age.trim().to_string();
    }
    if let Some(description) = update.description {
        require("description", &description)?;
        pet.description = description.trim().to_string();
    }
    if let Some(image) = update.image {
        require("image", &image)?;
        pet.image = image.trim().to_string();
    }
    if let Some(size) = update.size {
        pet.size = size;
    }
    if let Some(gender) = update.gender {
        pet.gender = gender;
    }

    let updated = pet.clone();
    save_pets(store, &pets)?;

    info!(id, "pet updated");
    Ok(updated)
}

/// Remove a pet and reject its pending requests in the same transaction
pub fn delete_pet(store: &Store, id: u64) -> Result<Pet> {
    store.transaction(|s| {
        let mut pets = load_pets(s)?;
        let index = pets
            .iter()
            .position(|p| p.id == id)
            .ok_or(Error::PetNotFound(id))?;
        let removed = pets.remove(index);
        save_pets(s, &pets)?;
        let declined = reject_pending_for_pet(s, id)?;

        info!(id, name = %removed.name, declined, "pet deleted");
        Ok(removed)
    })
}

/// Restore the seed catalog; a seed pet is adopted only when an approved request names it
pub fn reset_catalog(store: &Store) -> Result<usize> {
    let requests = load_requests(store)?;
    let pets: Vec<Pet> = seed_pets()
        .into_iter()
        .map(|mut pet| {
            pet.adopted = requests
                .iter()
                .any(|r| r.pet_id == pet.id && r.status == RequestStatus::Approved);
            pet
        })
        .collect();
    save_pets(store, &pets)?;

    info!(count = pets.len(), "catalog reset");
    Ok(pets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adopt::requests::{approve, submit, RequestForm};

    fn request_form(pet_id: u64) -> RequestForm {
        RequestForm {
            pet_id,
            name: "Ann".into(),
            email: "ann@example.com".into(),
        }
    }

    fn sample(id: u64, name: &str, kind: &str, breed: &str, age: &str, size: PetSize) -> Pet {
        Pet {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            breed: breed.to_string(),
            age: age.to_string(),
            size,
            gender: Gender::Female,
            description: String::new(),
            image: String::new(),
            adopted: false,
        }
    }

    fn catalog() -> Vec<Pet> {
        let mut pets = vec![
            sample(1, "Buddy", "Dog", "Golden Retriever", "2 years", PetSize::Large),
            sample(2, "Luna", "Cat", "Persian", "1 year", PetSize::Small),
            sample(3, "Goldie", "Fish", "", "4 months", PetSize::Small),
            sample(4, "Rex", "Dog", "Boxer", "11 years", PetSize::Medium),
        ];
        pets[3].adopted = true;
        pets[3].gender = Gender::Male;
        pets
    }

    fn names(pets: &[&Pet]) -> Vec<String> {
        pets.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_age_category() {
        assert_eq!(age_category("6 months"), Some(AgeCategory::PuppyKitten));
        assert_eq!(age_category("1 month"), Some(AgeCategory::PuppyKitten));
        assert_eq!(age_category("1 year"), Some(AgeCategory::YoungAdult));
        assert_eq!(age_category("2 years"), Some(AgeCategory::YoungAdult));
        assert_eq!(age_category("3 years"), Some(AgeCategory::Adult));
        assert_eq!(age_category("5 years"), Some(AgeCategory::Adult));
        assert_eq!(age_category("6 years"), Some(AgeCategory::Senior));
        assert_eq!(age_category("11 years"), Some(AgeCategory::Senior));
        assert_eq!(age_category("unknown"), Some(AgeCategory::Senior));
        assert_eq!(age_category("  "), None);
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let pets = catalog();
        let result = filter_pets(&pets, &PetFilter::default());
        assert_eq!(names(&result), vec!["Buddy", "Luna", "Goldie", "Rex"]);
    }

    #[test]
    fn test_search_matches_name_type_and_breed() {
        let pets = catalog();
        let by_name = PetFilter {
            search: Some("lun".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter_pets(&pets, &by_name)), vec!["Luna"]);

        // "gold" hits Buddy's breed and Goldie's name
        let by_breed = PetFilter {
            search: Some("GOLD".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter_pets(&pets, &by_breed)), vec!["Buddy", "Goldie"]);

        let by_type = PetFilter {
            search: Some("dog".into()),
            ..Default::default()
        };
        assert_eq!(names(&filter_pets(&pets, &by_type)), vec!["Buddy", "Rex"]);
    }

    #[test]
    fn test_combined_filters() {
        let pets = catalog();
        let filter = PetFilter {
            kind: Some("dog".into()),
            status: Some(ListingStatus::Available),
            ..Default::default()
        };
        assert_eq!(names(&filter_pets(&pets, &filter)), vec!["Buddy"]);

        let filter = PetFilter {
            sizes: vec![PetSize::Small, PetSize::Medium],
            gender: Some(Gender::Female),
            ..Default::default()
        };
        assert_eq!(names(&filter_pets(&pets, &filter)), vec!["Luna", "Goldie"]);

        let filter = PetFilter {
            breeds: vec!["boxer".into(), "Persian".into()],
            ..Default::default()
        };
        assert_eq!(names(&filter_pets(&pets, &filter)), vec!["Luna", "Rex"]);

        let filter = PetFilter {
            age: Some(AgeCategory::Senior),
            status: Some(ListingStatus::Adopted),
            ..Default::default()
        };
        assert_eq!(names(&filter_pets(&pets, &filter)), vec!["Rex"]);
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=25).collect();

        let first = paginate(&items, 1, 12);
        assert_eq!(first.items, (1..=12).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 25);

        let last = paginate(&items, 3, 12);
        assert_eq!(last.items, vec![25]);

        let past_end = paginate(&items, 4, 12);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_pages, 3);

        let zero = paginate(&items, 0, 12);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items.len(), 12);

        let empty: Page<u32> = paginate(&[], 1, 12);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_filter_options_first_appearance_order() {
        let options = filter_options(&catalog());
        assert_eq!(options.types, vec!["Dog", "Cat", "Fish"]);
        assert_eq!(options.breeds, vec!["Golden Retriever", "Persian", "Boxer"]);
        assert_eq!(
            options.sizes,
            vec![PetSize::Large, PetSize::Small, PetSize::Medium]
        );
    }

    #[test]
    fn test_load_pets_falls_back_to_seed() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(load_pets(&store).unwrap(), seed_pets());

        store.set(Key::Pets, &Vec::<Pet>::new()).unwrap();
        assert_eq!(load_pets(&store).unwrap().len(), seed_pets().len());
    }

    #[test]
    fn test_add_pet_assigns_next_id() {
        let store = Store::open_in_memory().unwrap();
        let pet = add_pet(
            &store,
            NewPet {
                name: "Nemo".into(),
                kind: "Fish".into(),
                age: "3 months".into(),
                size: Some(PetSize::Small),
                gender: Some(Gender::Male),
                description: "Orange".into(),
                image: "nemo.jpg".into(),
                ..Default::default()
            },
        )
        .unwrap();

        let max_seed = seed_pets().iter().map(|p| p.id).max().unwrap();
        assert_eq!(pet.id, max_seed + 1);
        assert_eq!(find_pet(&store, pet.id).unwrap().name, "Nemo");
        assert_eq!(load_pets(&store).unwrap().len(), seed_pets().len() + 1);
    }

    #[test]
    fn test_add_pet_requires_fields() {
        let store = Store::open_in_memory().unwrap();
        let err = add_pet(
            &store,
            NewPet {
                name: "Nemo".into(),
                kind: "Fish".into(),
                age: "3 months".into(),
                size: Some(PetSize::Small),
                gender: Some(Gender::Male),
                description: "Orange".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingField("image")));

        let err = add_pet(
            &store,
            NewPet {
                name: "Nemo".into(),
                kind: "Fish".into(),
                age: "3 months".into(),
                description: "Orange".into(),
                image: "nemo.jpg".into(),
                gender: Some(Gender::Male),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingField("size")));
    }

    #[test]
    fn test_update_and_delete() {
        let store = Store::open_in_memory().unwrap();
        let updated = update_pet(
            &store,
            1,
            PetUpdate {
                name: Some("Buddy II".into()),
                size: Some(PetSize::Medium),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.name, "Buddy II");
        assert_eq!(find_pet(&store, 1).unwrap().size, PetSize::Medium);

        let err = update_pet(
            &store,
            1,
            PetUpdate {
                name: Some(" ".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::MissingField("name")));

        let removed = delete_pet(&store, 1).unwrap();
        assert_eq!(removed.name, "Buddy II");
        assert!(matches!(find_pet(&store, 1), Err(Error::PetNotFound(1))));
        assert!(matches!(delete_pet(&store, 999), Err(Error::PetNotFound(999))));
    }

    fn nemo() -> NewPet {
        NewPet {
            name: "Nemo".into(),
            kind: "Fish".into(),
            age: "3 months".into(),
            size: Some(PetSize::Small),
            gender: Some(Gender::Male),
            description: "Orange".into(),
            image: "nemo.jpg".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_reset_catalog_keeps_approved_adoptions() {
        let store = Store::open_in_memory().unwrap();
        let buddy = submit(&store, request_form(1)).unwrap();
        approve(&store, &buddy.id).unwrap();
        let mut pets = load_pets(&store).unwrap();
        pets[2].adopted = true;
        save_pets(&store, &pets).unwrap();
        delete_pet(&store, 2).unwrap();

        let count = reset_catalog(&store).unwrap();
        assert_eq!(count, seed_pets().len());
        let adopted: Vec<u64> = load_pets(&store)
            .unwrap()
            .iter()
            .filter(|p| p.adopted)
            .map(|p| p.id)
            .collect();
        assert_eq!(adopted, vec![1]);
        assert!(find_pet(&store, 2).is_ok());
    }

    #[test]
    fn test_deleted_pet_id_is_not_reused() {
        let store = Store::open_in_memory().unwrap();
        let last = seed_pets().iter().map(|p| p.id).max().unwrap();
        submit(&store, request_form(last)).unwrap();
        delete_pet(&store, last).unwrap();

        let pet = add_pet(&store, nemo()).unwrap();
        assert_eq!(pet.id, last + 1);
        assert!(!pet.adopted);
        assert!(submit(&store, request_form(pet.id)).is_ok());
    }

    #[test]
    fn test_delete_pet_rejects_pending_requests() {
        let store = Store::open_in_memory().unwrap();
        submit(&store, request_form(3)).unwrap();
        let other = submit(&store, request_form(4)).unwrap();
        delete_pet(&store, 3).unwrap();

        let requests = load_requests(&store).unwrap();
        assert_eq!(requests[0].status, RequestStatus::Rejected);
        assert_eq!(requests[1].id, other.id);
        assert_eq!(requests[1].status, RequestStatus::Pending);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(PetUpdate::default().is_empty());
        assert!(!PetUpdate {
            breed: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }
}
