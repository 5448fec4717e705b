//! `config show` / `config set-url` commands

use clap::Subcommand;

use crate::error::Result;
use crate::storage::config::{load_config, save_config};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective client configuration
    Show,
    /// Set the API base URL
    SetUrl { url: String },
}

pub fn execute(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config();
            println!("base_url:     {}", config.api.base_url);
            println!("timeout_secs: {}", config.api.timeout_secs);
        }
        ConfigAction::SetUrl { url } => {
            let mut config = load_config();
            config.api.base_url = url.trim_end_matches('/').to_string();
            save_config(&config)?;
            println!("API base URL set to {}.", config.api.base_url);
        }
    }
    Ok(())
}
