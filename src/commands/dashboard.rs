//! Dashboard command - Adoption overview for members and the admin

use anyhow::Result;
use owo_colors::OwoColorize;

use super::{requests as request_cmd, utils};
use pet_adopt::adopt::accounts::{self, Role};
use pet_adopt::adopt::dashboard::{self, AdminDashboard, AdoptedPet, UserDashboard};
use pet_adopt::adopt::model::RequestStatus;
use pet_adopt::adopt::Store;
use pet_adopt::config::Config;

/// Show the admin dashboard to the admin and the member dashboard to everyone else
pub fn execute(store: &Store, config: &Config) -> Result<String> {
    let user = accounts::require_user(store)?;
    match accounts::role(&user, &config.admin_email) {
        Role::Admin => Ok(format_admin(&dashboard::admin_dashboard(store)?)),
        Role::Member => Ok(format_user(
            &user.name,
            &dashboard::user_dashboard(store, &user, false)?,
        )),
    }
}

fn adopted_lines(adopted: &[AdoptedPet], with_adopter: bool) -> Vec<String> {
    adopted
        .iter()
        .map(|a| {
            let mut line = format!("  {} ({}, {})", a.pet.name, a.pet.kind, a.pet.breed);
            if with_adopter {
                line.push_str(&format!(" by {} <{}>", a.adopted_by, a.adopted_by_email));
            }
            line.push_str(&format!(" on {}", utils::format_date(&a.adopted_on)));
            line
        })
        .collect()
}

/// Format a member dashboard for display
pub fn format_user(name: &str, dash: &UserDashboard) -> String {
    let mut lines = vec![format!("Welcome, {}!", name).bold().to_string()];
    lines.push(String::new());

    if dash.requests.is_empty() {
        lines.push("You have not requested any pets yet.".to_string());
    } else {
        lines.push(format!("Your requests ({}):", dash.requests.len()));
        lines.push(request_cmd::render(&dash.requests, false));
    }

    lines.push(String::new());
    if dash.adopted.is_empty() {
        lines.push("Adopted pets: none yet".to_string());
    } else {
        lines.push(format!("Adopted pets ({}):", dash.adopted.len()));
        lines.extend(adopted_lines(&dash.adopted, false));
    }

    lines.join("\n")
}

/// Format the admin dashboard for display
pub fn format_admin(dash: &AdminDashboard) -> String {
    let mut lines = vec!["Admin Dashboard".bold().to_string()];
    lines.push(String::new());

    lines.push(format!("Total Pets: {}", dash.total_pets));
    lines.push(format!(
        "Pending Requests: {}",
        dash.count(RequestStatus::Pending)
    ));
    lines.push(format!(
        "Approved Adoptions: {}",
        dash.count(RequestStatus::Approved)
    ));
    lines.push(format!(
        "Rejected Requests: {}",
        dash.count(RequestStatus::Rejected)
    ));
    lines.push(format!("Unique Requesters: {}", dash.requesters));
    lines.push(format!(
        "Most Recent Adopted Breed: {}",
        dash.most_recent_breed.as_deref().unwrap_or("N/A")
    ));

    lines.push(String::new());
    if dash.approvals_by_date.is_empty() {
        lines.push("Adoptions over time: none".to_string());
    } else {
        lines.push("Adoptions over time:".to_string());
        for (day, count) in &dash.approvals_by_date {
            lines.push(format!("  {}  {}", day, "█".repeat(*count)));
        }
    }

    lines.push(String::new());
    if dash.adopted.is_empty() {
        lines.push("Adopted pets: none yet".to_string());
    } else {
        lines.push(format!("Adopted pets ({}):", dash.adopted.len()));
        lines.extend(adopted_lines(&dash.adopted, true));
    }

    lines.join("\n")
}
