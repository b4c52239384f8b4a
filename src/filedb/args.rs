use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "filedb")]
#[command(version = env!("FILEDB_LONG_VERSION"))]
#[command(about = "Naive file-based library database (CSV)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory containing the CSV files [env: FILEDB_DATA_DIR, default: ./data]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Use the per-user data directory instead of ./data
    #[arg(short, long, global = true, conflicts_with = "data_dir")]
    pub global: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory and empty tables
    Init,

    /// Add a new book
    AddBook {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, allow_negative_numbers = true)]
        year: i32,
        #[arg(long)]
        isbn: String,
    },

    /// Find books by title substring
    FindBook {
        #[arg(long)]
        title: String,
    },

    /// List all books
    #[command(alias = "books")]
    ListBooks,

    /// Add a new member
    AddMember {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },

    /// List all members
    #[command(alias = "members")]
    ListMembers,

    /// Rename a member
    RenameMember {
        #[arg(long)]
        member_id: u64,
        #[arg(long)]
        name: String,
    },

    /// Suspend a member (blocks checkouts when enforced)
    SuspendMember {
        #[arg(long)]
        member_id: u64,
    },

    /// Reactivate a suspended member
    ReactivateMember {
        #[arg(long)]
        member_id: u64,
    },

    /// Checkout a book to a member
    Checkout {
        #[arg(long)]
        book_id: u64,
        #[arg(long)]
        member_id: u64,
    },

    /// Return a loan
    Return {
        #[arg(long)]
        loan_id: u64,
    },

    /// List loans for a member
    MemberLoans {
        #[arg(long)]
        member_id: u64,
        #[arg(long)]
        include_returned: bool,
    },

    /// List overdue loans
    Overdue {
        /// Days after which an open loan is overdue (defaults to config overdue_days)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Run integrity checks
    Validate,

    /// Recompute book status from the loan ledger
    Reconcile,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., overdue_days)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
