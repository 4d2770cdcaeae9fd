//! Student Portal CLI - interactive and one-shot access to student records

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use student_portal::config;
use student_portal::shell::ShellOptions;
use student_portal::{commands, shell, ui, OutputMode, StudentStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "student-portal")]
#[command(version)]
#[command(about = "Student Portal - manage student records stored in SQLite")]
#[command(long_about = r#"
Student Portal keeps a small list of students (name, age) in a SQLite file.

Run without a command for the interactive menu, or use a subcommand:
  student-portal add Alice 20
  student-portal list
  student-portal search Alice
  student-portal delete Alice
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (default: students.db)
    #[arg(short, long, global = true, env = "STUDENT_PORTAL_DB")]
    database: Option<PathBuf>,

    /// Path to the config file (default: student-portal.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Shell,

    /// Save a student
    Add {
        /// Student name
        name: String,

        /// Student age
        #[arg(allow_negative_numbers = true)]
        age: i64,
    },

    /// List all students in insertion order
    List,

    /// Find the first student with an exact name
    Search {
        /// Name to look up
        name: String,
    },

    /// Delete every student with an exact name
    Delete {
        /// Name to delete
        name: String,
    },

    /// Show statistics about the database
    Stats,

    /// Write a config file for the resolved database path
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so the menu on stdout stays readable
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Nothing left to report to if stderr itself is gone
            let _ = ui::error(&mut std::io::stderr(), ui::theme(), &format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database_path(cli.database.as_deref(), file_config.as_ref());
    let mode = OutputMode::from_json_flag(cli.json);
    let theme = ui::theme();
    tracing::debug!("Using database {}", database.display());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            drop(out);
            let options = file_config.unwrap_or_default().shell_options();
            run_shell(&database, options)?;
        }

        Commands::Add { name, age } => {
            let store = open_store(&database)?;
            commands::run_add(&mut out, theme, mode, &store, &name, age)?;
        }

        Commands::List => {
            let store = open_store(&database)?;
            commands::run_list(&mut out, theme, mode, &store)?;
        }

        Commands::Search { name } => {
            let store = open_store(&database)?;
            commands::run_search(&mut out, theme, mode, &store, &name)?;
        }

        Commands::Delete { name } => {
            let store = open_store(&database)?;
            commands::run_delete(&mut out, theme, mode, &store, &name)?;
        }

        Commands::Stats => {
            let store = open_store(&database)?;
            commands::run_stats(&mut out, theme, mode, &store, &database)?;
        }

        Commands::Init { force } => {
            let config_path = cli.config.unwrap_or_else(config::default_config_path);
            commands::run_init(&mut out, theme, mode, &config_path, &database, force)?;
        }
    }

    Ok(())
}

fn open_store(database: &Path) -> anyhow::Result<StudentStore> {
    config::ensure_db_dir(database)?;
    Ok(StudentStore::open(database)?)
}

fn run_shell(database: &Path, mut options: ShellOptions) -> anyhow::Result<()> {
    let store = open_store(database)?;
    ui::success(&mut std::io::stdout(), ui::theme(), "Database initialized.")?;

    if !console::Term::stdout().is_term() {
        options.clear_screen = false;
    }
    shell::run_stdio(&store, options)?;
    store.close();
    Ok(())
}
