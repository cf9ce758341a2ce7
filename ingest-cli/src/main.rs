mod cli;
mod config;
mod ingest;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => cli::commands::run::handler::handle_run_command(args).await,
        Commands::Jobs => cli::commands::jobs::handler::handle_jobs_command(),
    }
}
