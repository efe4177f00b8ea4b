//! # Learn-Ease CLI
//!
//! Command-line front end for the Learn-Ease backend. Each command drives
//! the same page controllers a graphical front end would use, so local
//! validation, session handling and error messages are identical.
//!
//! ## Usage
//!
//! ```bash
//! learnease login --email ada@example.com --password 'Str0ng!Pass'
//! learnease books upload ./calculus.pdf --title Calculus
//! learnease ai summarize --book <BOOK_ID>
//! ```
//!
//! Configuration comes from `LEARNEASE_API_URL`, `LEARNEASE_TIMEOUT_SECS`
//! and `LEARNEASE_SESSION_FILE` (or a `.env` file); flags override them.

mod commands;
mod render;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "learnease", version, about = "Learn-Ease study platform client")]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, env = "LEARNEASE_API_URL")]
    api_url: Option<String>,

    /// File holding the session token.
    #[arg(long, global = true, env = "LEARNEASE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account.
    Signup(SignupArgs),

    /// Log in and store the session token.
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "LEARNEASE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token.
    Logout,

    /// Show or edit your profile.
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Change your password.
    Password {
        #[arg(long)]
        current: String,

        #[arg(long = "new")]
        new_password: String,

        #[arg(long)]
        confirm: String,
    },

    /// Manage uploaded books.
    #[command(subcommand)]
    Books(BooksCommand),

    /// Manage categories.
    #[command(subcommand)]
    Categories(CategoriesCommand),

    /// Generate study material from text.
    #[command(subcommand)]
    Ai(AiCommand),
}

#[derive(Args, Debug)]
pub struct SignupArgs {
    #[arg(long)]
    email: String,

    #[arg(long)]
    firstname: String,

    #[arg(long)]
    lastname: String,

    #[arg(long)]
    age: String,

    #[arg(long)]
    university: String,

    #[arg(long, env = "LEARNEASE_PASSWORD", hide_env_values = true)]
    password: String,

    /// Repeat the password.
    #[arg(long)]
    confirm_password: String,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Print the current profile.
    Show,

    /// Update the given fields; others are left untouched.
    Update {
        #[arg(long)]
        firstname: Option<String>,

        #[arg(long)]
        lastname: Option<String>,

        #[arg(long)]
        age: Option<String>,

        #[arg(long)]
        university: Option<String>,

        /// Profile picture URL.
        #[arg(long)]
        image: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BooksCommand {
    /// List books, optionally filtered by category.
    List {
        /// Only books in this category.
        #[arg(long, conflicts_with = "uncategorized")]
        category: Option<String>,

        /// Only books without a category.
        #[arg(long)]
        uncategorized: bool,
    },

    /// Upload a PDF.
    Upload {
        file: PathBuf,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Show a book's details and page count.
    Show { id: String },

    /// Save a book's PDF to a file.
    Download {
        id: String,

        #[arg(long, short)]
        output: PathBuf,
    },

    /// Print the text extracted from a book.
    Text { id: String },

    /// Move a book into a category, or out of any.
    Category {
        id: String,

        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        set: Option<String>,

        #[arg(long)]
        clear: bool,
    },

    /// Delete a book.
    Delete {
        id: String,

        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    /// List categories by name.
    List,

    /// Create a category.
    Create { name: String },

    /// Rename a category.
    Rename { id: String, name: String },

    /// Delete a category; its books become uncategorized.
    Delete { id: String },
}

/// Where the text for an AI action comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TextSource {
    /// Text passed directly.
    #[arg(long)]
    text: Option<String>,

    /// Read the text from a file.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Use the text extracted from a book.
    #[arg(long)]
    book: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AiCommand {
    /// Summarize text.
    Summarize(TextSource),

    /// Generate flashcards.
    Flashcards(TextSource),

    /// Generate study notes.
    Notes(TextSource),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    tracing::debug!("Learn-Ease CLI v{}", env!("CARGO_PKG_VERSION"));

    commands::run(cli).await
}

/// Logs go to stderr so command output stays clean
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "learnease=info".into());

    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false) {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
