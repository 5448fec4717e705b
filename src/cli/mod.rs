//! CLI 模块

pub mod auth;
pub mod config;
pub mod profile;
pub mod tasks;

use std::io::{self, Write};

use clap::{Parser, Subcommand};

use crate::api::http::HttpApi;
use crate::session::SessionStore;
use crate::storage::{self, credentials::CredentialStore};

#[derive(Parser)]
#[command(name = "primetask")]
#[command(version)]
#[command(about = "Terminal client for the PrimeTask task-management API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Username (prompted when omitted)
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Create an account, then sign in with it
    Signup,
    /// Sign out and remove the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Show API reachability and session state
    Status,
    /// Show or edit the account profile
    Profile {
        #[command(subcommand)]
        action: profile::ProfileAction,
    },
    /// List, filter, create, edit and delete tasks
    Tasks {
        #[command(subcommand)]
        action: tasks::TaskAction,
    },
    /// Show or change the client configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
}

/// Build the HTTP client from the persisted config.
pub fn api_client() -> HttpApi {
    let config = storage::config::load_config();
    HttpApi::new(&config.api)
}

/// Session bound to `~/.primetask/`, restored from disk.
pub fn restored_session(api: &HttpApi) -> SessionStore<'_, HttpApi> {
    let mut session = SessionStore::new(api, CredentialStore::open());
    session.restore();
    session
}

/// Session required: print the sign-in hint and exit when anonymous.
pub fn require_session(api: &HttpApi) -> SessionStore<'_, HttpApi> {
    let session = restored_session(api);
    if !session.is_authenticated() {
        eprintln!("Not signed in. Run `primetask login` first.");
        std::process::exit(1);
    }
    session
}

/// 读取一行用户输入（trim 后返回）
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// y/N 确认提示，默认 No
pub fn confirm(question: &str) -> io::Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}
