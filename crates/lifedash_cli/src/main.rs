//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive `lifedash_core` against a store file without a UI shell.
//! - Keep output plain and line-oriented for quick local checks.

use clap::{Parser, Subcommand};
use lifedash_core::db::open_db;
use lifedash_core::model::time::format_timestamp;
use lifedash_core::{
    AuthService, DashboardService, RecordId, ServiceError, SqliteStore, TaskDraft, TaskService,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lifedash", version, about = "LifeDash core smoke CLI")]
struct Cli {
    /// Store file; created and migrated on first use.
    #[arg(long, env = "LIFEDASH_DB_PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print core linkage info.
    Ping,
    /// Show the signed-in user.
    Whoami,
    Register {
        email: String,
        password: String,
        name: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    /// Task commands for the signed-in user.
    #[command(subcommand)]
    Task(TaskCommand),
    /// Summary counts for the signed-in user.
    Dashboard,
}

#[derive(Subcommand)]
enum TaskCommand {
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    List,
    /// Flip completion of one task.
    Toggle { id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Command::Ping = cli.command {
        println!("lifedash_core ping={}", lifedash_core::ping());
        println!("lifedash_core version={}", lifedash_core::core_version());
        return Ok(());
    }

    let path = cli
        .db
        .unwrap_or_else(|| std::env::temp_dir().join("lifedash_store.sqlite3"));
    let conn =
        open_db(&path).map_err(|err| format!("failed to open `{}`: {err}", path.display()))?;
    let store = SqliteStore::new(&conn);
    let auth = AuthService::new(&store);

    match cli.command {
        Command::Ping => {}
        Command::Whoami => match auth.current_user().map_err(describe)? {
            Some(user) => println!("{} <{}> id={}", user.name, user.email, user.id),
            None => println!("anonymous"),
        },
        Command::Register {
            email,
            password,
            name,
        } => {
            let user = auth.register(&email, &password, &name).map_err(describe)?;
            println!("registered id={}", user.id);
        }
        Command::Login { email, password } => {
            let user = auth.login(&email, &password).map_err(describe)?;
            println!("signed in as {}", user.name);
        }
        Command::Logout => {
            auth.logout().map_err(describe)?;
            println!("signed out");
        }
        Command::Task(command) => {
            let owner = signed_in_owner(&auth)?;
            let tasks = TaskService::new(&store);
            match command {
                TaskCommand::Add { title, description } => {
                    let task = tasks
                        .create(&owner, TaskDraft { title, description })
                        .map_err(describe)?;
                    println!("created id={}", task.id);
                }
                TaskCommand::List => {
                    for task in tasks.list(&owner).map_err(describe)? {
                        let mark = if task.completed { "x" } else { " " };
                        println!(
                            "[{mark}] {} {} ({})",
                            task.id,
                            task.title,
                            format_timestamp(task.created_at)
                        );
                    }
                }
                TaskCommand::Toggle { id } => {
                    let task = tasks
                        .toggle(&owner, &RecordId::new(id))
                        .map_err(describe)?;
                    println!("id={} completed={}", task.id, task.completed);
                }
            }
        }
        Command::Dashboard => {
            let owner = signed_in_owner(&auth)?;
            let metrics = DashboardService::new(&store)
                .metrics(&owner)
                .map_err(describe)?;
            println!(
                "tasks={} completed={} notes={} meals={} workouts={}",
                metrics.total_tasks,
                metrics.completed_tasks,
                metrics.total_notes,
                metrics.total_meals,
                metrics.total_workouts
            );
        }
    }
    Ok(())
}

fn signed_in_owner(auth: &AuthService<&SqliteStore<'_>>) -> Result<RecordId, String> {
    auth.current_user()
        .map_err(describe)?
        .map(|user| user.id)
        .ok_or_else(|| "not signed in; run `lifedash login` first".to_string())
}

fn describe(err: ServiceError) -> String {
    err.to_string()
}
