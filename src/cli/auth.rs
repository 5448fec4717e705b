//! `login` / `signup` / `logout` / `whoami` / `status` commands

use crate::api::types::SignupRequest;
use crate::api::TaskApi;
use crate::error::Result;
use crate::session::AuthOutcome;
use crate::storage::{self, credentials::CredentialStore};

use super::{api_client, prompt, require_session, restored_session};

pub fn login(username: Option<String>) -> Result<()> {
    let api = api_client();
    let mut session = restored_session(&api);

    if let Some(user) = session.user() {
        println!("Already signed in as {}. Sign out first.", user.username);
        return Ok(());
    }

    let username = match username {
        Some(u) => u,
        None => prompt("Username: ")?,
    };
    let password = rpassword::prompt_password("Password: ")?;

    match session.login(&username, &password) {
        AuthOutcome::Success => {
            // login only succeeds with a user record present
            let name = session
                .user()
                .map(|u| u.display_name())
                .unwrap_or(username.as_str());
            println!("Signed in as {}.", name);
            Ok(())
        }
        outcome => {
            eprintln!("{}", outcome.message().unwrap_or("Login failed"));
            std::process::exit(1);
        }
    }
}

pub fn signup() -> Result<()> {
    let api = api_client();
    let mut session = restored_session(&api);

    if session.is_authenticated() {
        println!("Already signed in. Sign out before creating another account.");
        return Ok(());
    }

    let username = prompt("Username: ")?;
    let email = prompt("Email: ")?;
    let full_name = prompt("Full name (optional): ")?;
    let password = rpassword::prompt_password("Password: ")?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != confirm {
        eprintln!("Passwords do not match.");
        std::process::exit(1);
    }

    let payload = SignupRequest {
        username,
        email,
        password,
        full_name: (!full_name.is_empty()).then_some(full_name),
    };

    match session.signup(&payload) {
        AuthOutcome::Success => {
            println!(
                "Welcome, {}! Your account is ready.",
                session.user().map(|u| u.display_name()).unwrap_or_default()
            );
            Ok(())
        }
        AuthOutcome::CreatedButLoginFailed(msg) => {
            eprintln!("Account created, but automatic sign-in failed: {}", msg);
            eprintln!("Please run `primetask login`.");
            std::process::exit(1);
        }
        AuthOutcome::Failure(msg) => {
            eprintln!("{}", msg);
            std::process::exit(1);
        }
    }
}

pub fn logout() -> Result<()> {
    let api = api_client();
    // No restore needed: logout is unconditional and never fails.
    let mut session = crate::session::SessionStore::new(&api, CredentialStore::open());
    session.logout();
    println!("Signed out.");
    Ok(())
}

pub fn whoami() -> Result<()> {
    let api = api_client();
    let session = require_session(&api);

    // require_session guarantees a user
    if let Some(user) = session.user() {
        println!("{} <{}>", user.display_name(), user.email);
        println!("Username: {}", user.username);
    }
    Ok(())
}

pub fn status() -> Result<()> {
    let config = storage::config::load_config();
    let api = api_client();

    match api.health() {
        Ok(()) => println!("API {} is reachable.", config.api.base_url),
        Err(e) => println!("API {} is unreachable: {}", config.api.base_url, e),
    }

    let session = restored_session(&api);
    match session.user() {
        Some(user) => println!("Signed in as {}.", user.username),
        None => println!("Not signed in."),
    }
    Ok(())
}
