use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qboard")]
#[command(about = "Search and browse the student question board")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search questions by keyword, module and author
    Search {
        /// Search query (omit to browse by filters only)
        query: Option<String>,
        /// Only questions in this module (ID or code)
        #[arg(short, long)]
        module: Option<String>,
        /// Only questions by this author (ID or username)
        #[arg(short, long)]
        user: Option<String>,
        /// Sort order: newest, oldest, relevance, title
        #[arg(short, long, default_value = "newest")]
        sort: String,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        page: i64,
        /// Plain substring match on title and body, newest first, unpaged
        #[arg(long, conflicts_with_all = ["module", "user", "sort", "page"])]
        simple: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show questions related to a question
    Related {
        /// Question ID
        id: String,
        /// Number of related questions to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single question
    Show {
        /// Question ID
        id: String,
    },
    /// List recent questions
    Recent {
        /// Number of questions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest question titles for a partial query
    Suggest {
        /// Partial query
        query: String,
        /// Number of suggestions to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
    /// Show board statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import modules, users and questions from a JSON seed file
    Import {
        /// Path to the seed file
        path: PathBuf,
    },
}
