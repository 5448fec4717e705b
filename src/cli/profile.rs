//! `profile show` / `profile edit` commands

use clap::Subcommand;

use crate::api::types::ProfileUpdate;
use crate::error::Result;

use super::{api_client, require_session};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show account information
    Show,
    /// Edit full name and/or email (the username cannot be changed)
    Edit {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

pub fn execute(action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => show(),
        ProfileAction::Edit { full_name, email } => edit(full_name, email),
    }
}

fn show() -> Result<()> {
    let api = api_client();
    let session = require_session(&api);
    let user = session.user().expect("require_session guarantees a user");

    println!("Username:   {}", user.username);
    println!("Full name:  {}", user.full_name.as_deref().unwrap_or("-"));
    println!("Email:      {}", user.email);
    println!(
        "Status:     {}",
        if user.is_active { "Active" } else { "Inactive" }
    );
    println!("Created:    {}", user.created_at.format("%Y-%m-%d"));
    Ok(())
}

fn edit(full_name: Option<String>, email: Option<String>) -> Result<()> {
    if full_name.is_none() && email.is_none() {
        println!("Nothing to update. Pass --full-name and/or --email.");
        return Ok(());
    }

    let api = api_client();
    let mut session = require_session(&api);

    let update = ProfileUpdate { full_name, email };
    let outcome = session.update_profile(&update);
    if outcome.is_success() {
        println!("Profile updated.");
        Ok(())
    } else {
        eprintln!(
            "{}",
            outcome.message().unwrap_or("Failed to update profile")
        );
        std::process::exit(1);
    }
}
