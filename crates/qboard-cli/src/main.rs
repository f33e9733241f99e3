//! qboard CLI - search and browse the student question board from the terminal

mod cli;
mod commands;
mod error;
#[cfg(test)]
mod tests;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_db_path;
use crate::commands::import::run_import;
use crate::commands::recent::run_recent;
use crate::commands::related::run_related;
use crate::commands::search::{run_search, run_simple_search, SearchArgs};
use crate::commands::show::run_show;
use crate::commands::stats::run_stats;
use crate::commands::suggest::run_suggest;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "qboard=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path)?;

    match cli.command {
        Commands::Search {
            query,
            module,
            user,
            sort,
            page,
            simple,
            json,
        } => {
            let args = SearchArgs {
                query: query.as_deref(),
                module: module.as_deref(),
                user: user.as_deref(),
                sort: &sort,
                page,
            };
            if simple {
                run_simple_search(query.as_deref().unwrap_or_default(), json, &db_path)?;
            } else {
                run_search(&args, json, &db_path)?;
            }
        }
        Commands::Related { id, limit, json } => run_related(&id, limit, json, &db_path)?,
        Commands::Show { id } => run_show(&id, &db_path)?,
        Commands::Recent { limit, json } => run_recent(limit, json, &db_path)?,
        Commands::Suggest { query, limit } => run_suggest(&query, limit, &db_path)?,
        Commands::Stats { json } => run_stats(json, &db_path)?,
        Commands::Import { path } => run_import(&path, &db_path)?,
    }

    Ok(())
}
