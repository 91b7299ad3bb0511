//! CLI interface for Serama.
//!
//! Each subcommand is non-interactive: arguments in, structured output out.
//!
//! - `serama classify` — run the classifier on trait values; needs no user.
//! - `serama record ...` and `serama stats` — work on one user's collection,
//!   chosen with `--as`, `SERAMA_USER`, or the config file.
//!
//! Record references take a full UUID or an unambiguous prefix.

mod classify;
mod format;
mod record;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::config::Config;
use crate::herd::HerdStats;
use crate::identity;
use crate::model::BirdRecord;
use crate::storage::Storage;

use classify::ClassifyArgs;
use record::RecordCommand;

/// Serama — breeding records and conformation classification.
#[derive(Debug, Parser)]
#[command(name = "serama", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// User whose collection to work on.
    #[arg(long = "as", global = true)]
    user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: logging a bird
  1. serama --as ana record add --name SS-101 --sex Cockerel --weight 11.5 --status Growout
     → prints the record ID (quick log, no classification)
  2. serama --as ana record edit 3fa --name SS-101 --sex Cockerel --weight 11.5 --status Growout \
       --classify --body-carriage Upright --back-length Short --feather-type Normal \
       --color-pattern "Solid Black"
  3. serama --as ana record photo 3fa ./ss-101.jpg
  4. serama --as ana record list --sort age --desc

Classify without saving:
  serama classify --body-carriage Forward --back-length Long --feather-type Frizzled \
    --color-pattern "Solid Black" --weight 10"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a bird from its traits and print the result as JSON.
    ///
    /// Pure: reads and writes nothing.
    Classify(ClassifyArgs),

    /// Manage bird records: add, edit, list, show, delete, attach photos.
    Record {
        #[command(subcommand)]
        command: RecordCommand,
    },

    /// Show flock totals by class type and status.
    Stats,
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Classify(args) => classify::cmd_classify(&args),
        Command::Record { command } => {
            let (storage, user) = open_collection(config, cli.user.as_deref())?;
            record::run(&storage, &user, command)
        }
        Command::Stats => {
            let (storage, user) = open_collection(config, cli.user.as_deref())?;
            cmd_stats(&storage, &user)
        }
    }
}

/// Resolve the acting user and open the storage root.
fn open_collection(config: &Config, explicit: Option<&str>) -> Result<(Storage, String), String> {
    let user = identity::resolve_user(explicit, config)?;
    let root = config
        .storage_root()
        .ok_or("could not determine home directory")?;
    let storage =
        Storage::new(root).map_err(|e| format!("failed to initialize storage: {e}"))?;
    Ok((storage, user))
}

fn cmd_stats(storage: &Storage, user: &str) -> Result<(), String> {
    let records = storage
        .list_records(user)
        .map_err(|e| format!("failed to list records: {e}"))?;

    let stats = HerdStats::from_records(&records);
    print!("{}", format::format_stats(&stats));
    Ok(())
}

/// Resolve a record reference (full UUID or unambiguous prefix) to a record.
fn resolve_record(storage: &Storage, user: &str, reference: &str) -> Result<BirdRecord, String> {
    // Try full UUID first.
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_record(user, id)
            .map_err(|e| e.to_string());
    }

    // Try as a prefix match against all records. UUIDs display lower-case.
    let prefix = reference.to_ascii_lowercase();
    let records = storage
        .list_records(user)
        .map_err(|e| format!("failed to list records: {e}"))?;

    let matches: Vec<&BirdRecord> = records
        .iter()
        .filter(|r| r.id.to_string().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(format!("no record matching '{reference}'")),
        1 => Ok(matches[0].clone()),
        n => {
            let ids: Vec<String> = matches
                .iter()
                .map(|r| format!("{} ({})", r.short_id(), r.name))
                .collect();
            Err(format!(
                "'{reference}' is ambiguous — matches {n} records: {}",
                ids.join(", ")
            ))
        }
    }
}
