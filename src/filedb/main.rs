use clap::Parser;
use directories::ProjectDirs;
use filedb::api::{CmdResult, ConfigAction, FiledbApi, MessageLevel};
use filedb::error::{FiledbError, Result};
use filedb::model::MemberStatus;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
mod print;

use args::{Cli, Commands};
use print::{print_config, print_messages, print_problems, print_rows};

const DATA_DIR_ENV: &str = "FILEDB_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "./data";

/// Exit code when `validate` finds problems, distinct from command failure.
const EXIT_PROBLEMS: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "filedb=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if cli.global {
        let dirs = ProjectDirs::from("com", "filedb", "filedb").ok_or_else(|| {
            FiledbError::Store("Could not determine the user data directory".to_string())
        })?;
        return Ok(dirs.data_dir().to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    Ok(PathBuf::from(DEFAULT_DATA_DIR))
}

fn run(cli: Cli) -> Result<ExitCode> {
    let data_dir = resolve_data_dir(&cli)?;
    let mut api = FiledbApi::open(data_dir)?;

    let result = match cli.command {
        Commands::Init => api.init()?,
        Commands::AddBook {
            title,
            author,
            year,
            isbn,
        } => api.add_book(&title, &author, year, &isbn)?,
        Commands::FindBook { title } => api.find_books(&title)?,
        Commands::ListBooks => api.list_books()?,
        Commands::AddMember { name, email } => api.add_member(&name, &email)?,
        Commands::ListMembers => api.list_members()?,
        Commands::RenameMember { member_id, name } => api.rename_member(member_id, &name)?,
        Commands::SuspendMember { member_id } => {
            api.set_member_status(member_id, MemberStatus::Suspended)?
        }
        Commands::ReactivateMember { member_id } => {
            api.set_member_status(member_id, MemberStatus::Active)?
        }
        Commands::Checkout { book_id, member_id } => api.checkout(book_id, member_id)?,
        Commands::Return { loan_id } => api.return_loan(loan_id)?,
        Commands::MemberLoans {
            member_id,
            include_returned,
        } => api.member_loans(member_id, include_returned)?,
        Commands::Overdue { days } => api.overdue(days)?,
        Commands::Validate => api.validate()?,
        Commands::Reconcile => api.reconcile()?,
        Commands::Config { key, value } => {
            let action = match (key, value) {
                (None, _) => ConfigAction::ShowAll,
                (Some(key), None) => ConfigAction::ShowKey(key),
                (Some(key), Some(value)) => ConfigAction::Set(key, value),
            };
            api.config(action)?
        }
    };

    Ok(render(&result))
}

fn render(result: &CmdResult) -> ExitCode {
    if result.table.is_some() {
        print_rows(result.table, &result.rows);
    }
    print_messages(&result.messages);
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print_config(config);
    }

    if !result.problems.is_empty() {
        print_problems(&result.problems);
        return ExitCode::from(EXIT_PROBLEMS);
    }
    if result
        .messages
        .iter()
        .any(|m| m.level == MessageLevel::Error)
    {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
