//! Request commands - Submit adoption requests and review them

use anyhow::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;

use super::utils;
use pet_adopt::adopt::model::{AdoptionRequest, RequestStatus};
use pet_adopt::adopt::requests::{self, RequestForm};
use pet_adopt::adopt::{accounts, Store};
use pet_adopt::config::Config;

/// Submit an adoption request; name and email default to the signed-in user
pub fn submit(
    store: &Store,
    pet_id: u64,
    name: Option<String>,
    email: Option<String>,
) -> Result<String> {
    let user = accounts::current_user(store)?;
    let form = RequestForm {
        pet_id,
        name: name
            .or_else(|| user.as_ref().map(|u| u.name.clone()))
            .unwrap_or_default(),
        email: email
            .or_else(|| user.as_ref().map(|u| u.email.clone()))
            .unwrap_or_default(),
    };

    let request = requests::submit(store, form)?;
    Ok(format!(
        "{} Request {} for {} is pending review.",
        "Adoption request submitted!".green(),
        utils::short_id(&request.id),
        request.pet
    ))
}

/// Render requests as a table
pub fn render(requests: &[AdoptionRequest], with_requester: bool) -> String {
    let mut table = utils::new_table();
    let mut header = vec!["ID", "Pet"];
    if with_requester {
        header.push("Requester");
        header.push("Email");
    }
    header.push("Status");
    header.push("Submitted");
    table.set_header(header);

    for request in requests {
        let mut row = vec![
            Cell::new(utils::short_id(&request.id)),
            Cell::new(&request.pet),
        ];
        if with_requester {
            row.push(Cell::new(&request.name));
            row.push(Cell::new(&request.email));
        }
        row.push(Cell::new(utils::status_label(request.status)));
        row.push(Cell::new(utils::format_date(&request.date)));
        table.add_row(row);
    }

    table.to_string()
}

/// Requests filed by the signed-in user
pub fn mine(store: &Store) -> Result<String> {
    let user = accounts::require_user(store)?;
    let mine = requests::for_requester(store, &user.email)?;
    if mine.is_empty() {
        return Ok("You have not requested any pets yet.".to_string());
    }
    Ok(render(&mine, false))
}

/// All requests, optionally by status (admin)
pub fn list(store: &Store, config: &Config, status: Option<&str>) -> Result<String> {
    accounts::require_admin(store, &config.admin_email)?;
    let status = status.map(RequestStatus::parse).transpose()?;
    let all = requests::list(store, status)?;
    if all.is_empty() {
        return Ok(match status {
            Some(RequestStatus::Pending) => "No pending requests.".to_string(),
            _ => "No adoption requests found.".to_string(),
        });
    }
    let mut output = render(&all, true);
    output.push_str(&format!("\n\n{} request(s)", all.len()));
    Ok(output)
}

pub fn approve(store: &Store, config: &Config, id: &str) -> Result<String> {
    accounts::require_admin(store, &config.admin_email)?;
    let request = requests::approve(store, id)?;
    Ok(format!(
        "{} {} is adopted by {}.",
        "Approved:".green(),
        request.pet,
        request.name
    ))
}

pub fn reject(store: &Store, config: &Config, id: &str) -> Result<String> {
    accounts::require_admin(store, &config.admin_email)?;
    let request = requests::reject(store, id)?;
    Ok(format!(
        "{} request for {} by {}.",
        "Rejected:".red(),
        request.pet,
        request.name
    ))
}

pub fn remove(store: &Store, config: &Config, id: &str) -> Result<String> {
    accounts::require_admin(store, &config.admin_email)?;
    let request = requests::remove(store, id)?;
    Ok(format!(
        "{} request {} for {}.",
        "Removed:".green(),
        utils::short_id(&request.id),
        request.pet
    ))
}
