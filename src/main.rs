mod api;
mod cli;
mod error;
mod session;
mod storage;
mod tasks;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    // stderr logger; PRIMETASK_LOG / RUST_LOG override the level
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .and_then(|logger| logger.start())
        .ok();

    // 解析命令行参数
    let cli = Cli::parse();

    // 统一调度
    let result = match cli.command {
        Commands::Login { username } => cli::auth::login(username),
        Commands::Signup => cli::auth::signup(),
        Commands::Logout => cli::auth::logout(),
        Commands::Whoami => cli::auth::whoami(),
        Commands::Status => cli::auth::status(),
        Commands::Profile { action } => cli::profile::execute(action),
        Commands::Tasks { action } => cli::tasks::execute(action),
        Commands::Config { action } => cli::config::execute(action),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
