//! Command-line front end over the local compendium database.
//!
//! # Responsibility
//! - Inspect and edit the locally cached snapshot.
//! - Push/pull the snapshot to/from the SQLite row store for one user.

use clap::{Parser, Subcommand};
use compendium_core::db::open_db;
use compendium_core::{
    core_version, init_from_config, CompendiumConfig, CompendiumContext, CompendiumSync,
    InitOutcome, LoadOutcome, LocalCache, Note, SqliteKeyValueStore, SqliteUserDataStore,
    StaticAuthClient, UserIdentity,
};
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const PREVIEW_CHARS: usize = 40;

#[derive(Debug, Parser)]
#[command(name = "compendium", version, about = "Notes, appointments and goals")]
struct Cli {
    /// TOML config file; environment variables override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show collection sizes of the local cache.
    Status,
    /// List appointments from today onward.
    Upcoming,
    /// Append a note to the local cache.
    AddNote {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Upload the local cache as the user's remote snapshot.
    Push {
        #[arg(long)]
        user_id: String,
    },
    /// Replace the local cache with the user's remote snapshot.
    Pull {
        #[arg(long)]
        user_id: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = CompendiumConfig::load(cli.config.as_deref()).map_err(|err| err.to_string())?;
    if let Err(err) = init_from_config(&config) {
        eprintln!("warning: file logging disabled: {err}");
    }
    info!(
        "event=config_load module=cli status=ok source={} log_level={} db_path={}",
        if cli.config.is_some() { "file" } else { "default" },
        config.log_level,
        config.db_path.display()
    );

    let conn = open_db(&config.db_path)
        .map_err(|err| format!("cannot open `{}`: {err}", config.db_path.display()))?;
    let cache = LocalCache::new(SqliteKeyValueStore::new(&conn));
    let mut ctx = CompendiumContext::new();
    ctx.store.restore_local(cache.load_snapshot());

    match cli.command {
        Command::Status => {
            println!("compendium_core version={}", core_version());
            println!("db_path={}", config.db_path.display());
            println!("notes={}", ctx.store.all_notes().len());
            println!("appointments={}", ctx.store.all_appointments().len());
            println!("goals={}", ctx.store.all_goals().len());
        }
        Command::Upcoming => {
            for appointment in ctx.store.upcoming_appointments() {
                println!(
                    "{} {} {}",
                    appointment.date, appointment.time, appointment.title
                );
            }
        }
        Command::AddNote { title, content } => {
            let note = Note::new(title, content);
            println!("{} {}", note.id, note.preview(PREVIEW_CHARS));
            ctx.store.add_note(note);
            persist(&cache, &ctx)?;
        }
        Command::Push { user_id } => {
            let sync = remote_sync(&config, &user_id)?;
            let synced_at = sync
                .save_user_data(&mut ctx)
                .await
                .map_err(|err| err.to_string())?;
            println!("pushed user={user_id} at={synced_at}");
        }
        Command::Pull { user_id } => {
            let sync = remote_sync(&config, &user_id)?;
            match sync.init_sync(&mut ctx).await.map_err(|err| err.to_string())? {
                InitOutcome::SignedIn(LoadOutcome::Loaded) => {
                    persist(&cache, &ctx)?;
                    println!("pulled user={user_id}");
                }
                InitOutcome::SignedIn(LoadOutcome::NoRemoteData) => {
                    println!("no remote data for user={user_id}");
                }
                InitOutcome::SignedOut => {
                    warn!("event=cli_pull module=cli status=signed_out");
                    return Err("no session for user".to_string());
                }
            }
        }
    }

    Ok(())
}

fn remote_sync(config: &CompendiumConfig, user_id: &str) -> Result<CompendiumSync, String> {
    let data = SqliteUserDataStore::open(&config.db_path).map_err(|err| err.to_string())?;
    let auth = StaticAuthClient::signed_in(UserIdentity::new(user_id));
    Ok(CompendiumSync::new(Arc::new(data), Arc::new(auth)))
}

fn persist(
    cache: &LocalCache<SqliteKeyValueStore<'_>>,
    ctx: &CompendiumContext,
) -> Result<(), String> {
    if cache.save_snapshot(&ctx.store.get_data_for_save()) {
        Ok(())
    } else {
        Err("failed to write local cache".to_string())
    }
}
