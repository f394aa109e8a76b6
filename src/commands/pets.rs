//! Pets commands - Browse the catalog and manage it as admin

use anyhow::{bail, Result};
use comfy_table::Cell;
use owo_colors::OwoColorize;

use super::utils;
use pet_adopt::adopt::catalog::{self, NewPet, PetFilter, PetUpdate};
use pet_adopt::adopt::model::{AgeCategory, Gender, ListingStatus, PetSize};
use pet_adopt::adopt::{accounts, favorites, requests, Store};
use pet_adopt::config::Config;

/// Options for the list command, as typed on the command line
#[derive(Debug, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub kind: Option<String>,
    pub breeds: Vec<String>,
    pub sizes: Vec<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub page: usize,
    pub per_page: Option<usize>,
}

impl ListOptions {
    /// Convert raw arguments into a typed filter; "all" disables a field
    fn filter(&self) -> Result<PetFilter> {
        fn given(value: &Option<String>) -> Option<&str> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        }

        let sizes = self
            .sizes
            .iter()
            .filter(|s| !s.eq_ignore_ascii_case("all"))
            .map(|s| PetSize::parse(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PetFilter {
            search: self.search.clone(),
            kind: given(&self.kind).map(str::to_string),
            breeds: self
                .breeds
                .iter()
                .filter(|b| !b.eq_ignore_ascii_case("all"))
                .cloned()
                .collect(),
            sizes,
            age: given(&self.age).map(AgeCategory::parse).transpose()?,
            gender: given(&self.gender).map(Gender::parse).transpose()?,
            status: given(&self.status).map(ListingStatus::parse).transpose()?,
        })
    }
}

/// Execute the list command and return formatted output
pub fn list(store: &Store, config: &Config, options: ListOptions) -> Result<String> {
    let filter = options.filter()?;
    let pets = catalog::load_pets(store)?;
    let favorite_ids = favorites::list_ids(store)?;

    let matching: Vec<_> = catalog::filter_pets(&pets, &filter)
        .into_iter()
        .cloned()
        .collect();
    let per_page = options.per_page.unwrap_or(config.page_size);
    let page = catalog::paginate(&matching, options.page, per_page);

    if page.total_items == 0 {
        return Ok("No pets match these filters.".to_string());
    }
    if page.items.is_empty() {
        return Ok(format!(
            "Page {} is past the end ({} page(s)).",
            page.page, page.total_pages
        ));
    }

    let mut table = utils::new_table();
    table.set_header(vec![
        "ID", "", "Name", "Type", "Breed", "Age", "Size", "Gender", "Status",
    ]);

    for pet in &page.items {
        let star = if favorite_ids.contains(&pet.id) { "★" } else { "" };
        let status = if pet.adopted {
            "Adopted".red().to_string()
        } else {
            "Available".green().to_string()
        };
        table.add_row(vec![
            Cell::new(pet.id),
            Cell::new(star),
            Cell::new(&pet.name),
            Cell::new(&pet.kind),
            Cell::new(&pet.breed),
            Cell::new(&pet.age),
            Cell::new(pet.size),
            Cell::new(pet.gender),
            Cell::new(status),
        ]);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\nPage {} of {} ({} pets found)",
        page.page, page.total_pages, page.total_items
    ));

    Ok(output)
}

/// Show one pet with its derived adoption status
pub fn show(store: &Store, id: u64) -> Result<String> {
    let pet = catalog::find_pet(store, id)?;
    let all_requests = requests::load_requests(store)?;
    let status = requests::adoption_status(&pet, &all_requests);
    let favorite = favorites::is_favorite(store, id)?;
    let category = catalog::age_category(&pet.age)
        .map(|c| c.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut lines = vec![];
    let title = if favorite {
        format!("{} ★", pet.name)
    } else {
        pet.name.clone()
    };
    lines.push(title.bold().to_string());
    lines.push(format!("ID: {}", pet.id));
    lines.push(format!("Type: {}", pet.kind));
    if !pet.breed.is_empty() {
        lines.push(format!("Breed: {}", pet.breed));
    }
    lines.push(format!("Age: {} ({})", pet.age, category));
    lines.push(format!("Size: {}", pet.size));
    lines.push(format!("Gender: {}", pet.gender));
    lines.push(format!("Image: {}", pet.image));
    lines.push(format!("Status: {}", utils::adoption_label(status)));
    lines.push(String::new());
    lines.push(pet.description.clone());

    Ok(lines.join("\n"))
}

/// Values available to the catalog filters
pub fn options(store: &Store) -> Result<String> {
    let pets = catalog::load_pets(store)?;
    let options = catalog::filter_options(&pets);

    let sizes: Vec<String> = options.sizes.iter().map(|s| s.to_string()).collect();
    let lines = [
        format!("Types: All, {}", options.types.join(", ")),
        format!("Breeds: All, {}", options.breeds.join(", ")),
        format!("Sizes: All, {}", sizes.join(", ")),
        "Ages: All, Puppy/Kitten, Young Adult, Adult, Senior".to_string(),
        "Genders: All, Male, Female".to_string(),
        "Status: All, Available, Adopted".to_string(),
    ];
    Ok(lines.join("\n"))
}

/// Raw fields for `pets add` and `pets edit`
#[derive(Debug, Default)]
pub struct PetFields {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub size: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

pub fn add(store: &Store, config: &Config, fields: PetFields) -> Result<String> {
    accounts::require_admin(store, &config.admin_email)?;

    let new = NewPet {
        size: fields.size.as_deref().map(PetSize::parse).transpose()?,
        gender: fields.gender.as_deref().map(Gender::parse).transpose()?,
        name: fields.name.unwrap_or_default(),
        kind: fields.kind.unwrap_or_default(),
        breed: fields.breed.unwrap_or_default(),
        age: fields.age.unwrap_or_default(),
        description: fields.description.unwrap_or_default(),
        image: fields.image.unwrap_or_default(),
    };
    let pet = catalog::add_pet(store, new)?;
    Ok(format!("{} {} (id {})", "Added:".green(), pet.name, pet.id))
}

pub fn edit(store: &Store, config: &Config, id: u64, fields: PetFields) -> Result<String> {
    accounts::require_admin(store, &config.admin_email)?;

    let update = PetUpdate {
        size: fields.size.as_deref().map(PetSize::parse).transpose()?,
        gender: fields.gender.as_deref().map(Gender::parse).transpose()?,
        name: fields.name,
        kind: fields.kind,
        breed: fields.breed,
        age: fields.age,
        description: fields.description,
        image: fields.image,
    };
    if update.is_empty() {
        bail!("Nothing to change. Pass at least one field, e.g. --name");
    }
    let pet = catalog::update_pet(store, id, update)?;
    Ok(format!("{} {} (id {})", "Updated:".green(), pet.name, pet.id))
}

pub fn delete(store: &Store, config: &Config, id: u64) -> Result<String> {
    accounts::require_admin(store, &config.admin_email)?;
    let pet = catalog::delete_pet(store, id)?;
    Ok(format!("{} {} (id {})", "Deleted:".green(), pet.name, pet.id))
}

/// Restore the default catalog; adoption requests are kept
pub fn reset(store: &Store, config: &Config, yes: bool) -> Result<String> {
    accounts::require_admin(store, &config.admin_email)?;

    if !yes && !utils::confirm("Replace the catalog with the default pets?")? {
        return Ok("Aborted.".to_string());
    }
    let count = catalog::reset_catalog(store)?;
    Ok(format!("{} {} pets available", "Restored:".green(), count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pet_adopt::config::DEFAULT_ADMIN_EMAIL;
    use std::path::PathBuf;

    fn setup() -> (Store, Config) {
        (
            Store::open_in_memory().unwrap(),
            Config::with_db(PathBuf::from(":memory:")),
        )
    }

    #[test]
    fn test_list_filter_parsing() {
        let options = ListOptions {
            sizes: vec!["small".into(), "All".into()],
            gender: Some("All".into()),
            status: Some("available".into()),
            age: Some("senior".into()),
            ..Default::default()
        };
        let filter = options.filter().unwrap();
        assert_eq!(filter.sizes, vec![PetSize::Small]);
        assert!(filter.gender.is_none());
        assert_eq!(filter.status, Some(ListingStatus::Available));
        assert_eq!(filter.age, Some(AgeCategory::Senior));
    }

    #[test]
    fn test_list_rejects_bad_values() {
        let options = ListOptions {
            sizes: vec!["gigantic".into()],
            ..Default::default()
        };
        assert!(options.filter().is_err());
    }

    #[test]
    fn test_list_pages() {
        let (store, config) = setup();
        let output = list(
            &store,
            &config,
            ListOptions {
                page: 2,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(output.contains("Page 2 of 2"));

        let output = list(
            &store,
            &config,
            ListOptions {
                search: Some("zzz".into()),
                page: 1,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(output, "No pets match these filters.");
    }

    #[test]
    fn test_show_includes_status() {
        let (store, _) = setup();
        let output = show(&store, 1).unwrap();
        assert!(output.contains("Buddy"));
        assert!(output.contains("Available"));
        assert!(output.contains("Young Adult"));
    }

    #[test]
    fn test_admin_commands_require_admin() {
        let (store, config) = setup();
        assert!(delete(&store, &config, 1).is_err());

        accounts::signup(&store, "Admin", DEFAULT_ADMIN_EMAIL, "admin").unwrap();
        let output = add(
            &store,
            &config,
            PetFields {
                name: Some("Nemo".into()),
                kind: Some("Fish".into()),
                age: Some("2 months".into()),
                size: Some("small".into()),
                gender: Some("male".into()),
                description: Some("Orange".into()),
                image: Some("nemo.jpg".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(output.contains("Nemo"));

        assert!(edit(&store, &config, 1, PetFields::default()).is_err());
        let output = edit(
            &store,
            &config,
            1,
            PetFields {
                breed: Some("Golden Retriever Mix".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(output.contains("Buddy"));
        assert_eq!(
            catalog::find_pet(&store, 1).unwrap().breed,
            "Golden Retriever Mix"
        );

        assert!(reset(&store, &config, true).unwrap().contains("Restored"));
        assert_eq!(catalog::find_pet(&store, 1).unwrap().breed, "Golden Retriever");
    }
}
