//! Record commands: add, edit, list, show, delete, photo.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use jiff::{Timestamp, Zoned};
use uuid::Uuid;

use crate::classify::classify;
use crate::herd::{self, SortField};
use crate::model::{BirdRecord, Mode, Status, StatusCategory, Traits};
use crate::storage::Storage;

use super::classify::ClassTraitArgs;
use super::format::{format_classification, format_record_line};
use super::resolve_record;

#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    /// Add a bird. Prints the record ID.
    ///
    /// Without `--classify` this is a quick log: traits are not recorded
    /// and no classification is stored.
    Add(BirdArgs),

    /// Re-enter a bird's details, keeping its ID and photo.
    Edit {
        /// Record ID: full UUID or unambiguous prefix.
        record: String,

        #[command(flatten)]
        bird: BirdArgs,
    },

    /// List records, one per line.
    List {
        /// Column to sort by.
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,

        /// Sort descending.
        #[arg(long)]
        desc: bool,
    },

    /// Print a record as JSON.
    Show {
        /// Record ID: full UUID or unambiguous prefix.
        record: String,
    },

    /// Delete a record and its photo.
    Delete {
        /// Record ID: full UUID or unambiguous prefix.
        record: String,
    },

    /// Attach a photo to a record, replacing any previous one.
    Photo {
        /// Record ID: full UUID or unambiguous prefix.
        record: String,

        /// Image file (JPEG, PNG, GIF or WebP).
        path: PathBuf,
    },
}

/// Everything the entry form asks for.
#[derive(Debug, Args)]
pub struct BirdArgs {
    /// The bird's ID or name. Must be unique within your records.
    #[arg(long)]
    name: String,

    #[arg(long)]
    sex: String,

    /// Weight in ounces.
    #[arg(long)]
    weight: f64,

    /// Breeder, Growout, Chick, "Brood Hen", Exhibition, Active, Sold, Deceased,
    /// "Pet Quality", "For Sale", Retired, "Inactive Chick", "Inactive Growout",
    /// Undecided, or Other (with `--other-status`).
    #[arg(long)]
    status: String,

    /// Custom status text when `--status Other`.
    #[arg(long)]
    other_status: Option<String>,

    /// Whether a custom status counts as active (default: inactive).
    #[arg(long, value_enum)]
    other_category: Option<CategoryArg>,

    /// Hatch date (YYYY-MM-DD).
    #[arg(long)]
    date_of_birth: Option<Date>,

    /// Breeding project identifier.
    #[arg(long)]
    project: Option<String>,

    /// Record traits and run a full classification.
    #[arg(long)]
    classify: bool,

    #[command(flatten)]
    traits: ClassTraitArgs,

    #[arg(long, default_value = "")]
    tail_carriage: String,

    #[arg(long, default_value = "")]
    wing_position: String,

    #[arg(long, default_value = "")]
    comb: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Active,
    Inactive,
}

/// CLI-facing sort column, mapped to the domain `SortField`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Name,
    Sex,
    Weight,
    Status,
    ClassType,
    Project,
    Age,
    Saved,
}

impl SortArg {
    fn to_domain(self) -> SortField {
        match self {
            Self::Name => SortField::Name,
            Self::Sex => SortField::Sex,
            Self::Weight => SortField::Weight,
            Self::Status => SortField::Status,
            Self::ClassType => SortField::ClassType,
            Self::Project => SortField::Project,
            Self::Age => SortField::Age,
            Self::Saved => SortField::SavedAt,
        }
    }
}

pub(super) fn run(storage: &Storage, user: &str, command: RecordCommand) -> Result<(), String> {
    match command {
        RecordCommand::Add(bird) => cmd_add(storage, user, &bird),
        RecordCommand::Edit { record, bird } => {
            let existing = resolve_record(storage, user, &record)?;
            cmd_edit(storage, user, &existing, &bird)
        }
        RecordCommand::List { sort, desc } => cmd_list(storage, user, sort.to_domain(), desc),
        RecordCommand::Show { record } => {
            let record = resolve_record(storage, user, &record)?;
            cmd_show(&record)
        }
        RecordCommand::Delete { record } => {
            let record = resolve_record(storage, user, &record)?;
            cmd_delete(storage, user, &record)
        }
        RecordCommand::Photo { record, path } => {
            let record = resolve_record(storage, user, &record)?;
            cmd_photo(storage, user, &record, &path)
        }
    }
}

fn cmd_add(storage: &Storage, user: &str, bird: &BirdArgs) -> Result<(), String> {
    let existing = storage
        .list_records(user)
        .map_err(|e| format!("failed to list records: {e}"))?;
    if let Some(taken) = herd::find_by_name(&existing, &bird.name) {
        return Err(format!(
            "a bird with ID \"{}\" already exists ({}); use a unique ID",
            bird.name,
            taken.short_id()
        ));
    }

    let record = build_record(Uuid::new_v4(), bird)?;
    save(storage, user, &record)
}

fn cmd_edit(
    storage: &Storage,
    user: &str,
    existing: &BirdRecord,
    bird: &BirdArgs,
) -> Result<(), String> {
    let mut record = build_record(existing.id, bird)?;
    record.photo.clone_from(&existing.photo);
    save(storage, user, &record)
}

fn save(storage: &Storage, user: &str, record: &BirdRecord) -> Result<(), String> {
    storage
        .save_record(user, record)
        .map_err(|e| format!("failed to save record: {e}"))?;

    println!("{}", record.id);
    match &record.classification {
        Some(c) => {
            eprintln!("{}", format_classification(c));
            for w in &c.warnings {
                eprintln!("warning: {w}");
            }
        }
        None => eprintln!("Saved {} (quick log, not classified)", record.name),
    }
    Ok(())
}

fn cmd_list(storage: &Storage, user: &str, sort: SortField, desc: bool) -> Result<(), String> {
    let mut records = storage
        .list_records(user)
        .map_err(|e| format!("failed to list records: {e}"))?;

    if records.is_empty() {
        println!("No records");
        return Ok(());
    }

    let today = Zoned::now().date();
    herd::sort_records(&mut records, sort, desc, today);
    let duplicates = herd::duplicate_names(&records);

    for r in &records {
        let duplicate = duplicates.contains(&herd::normalize_name(&r.name));
        println!("{}", format_record_line(r, today, duplicate));
    }

    if !duplicates.is_empty() {
        let names: Vec<&str> = duplicates.iter().map(String::as_str).collect();
        eprintln!(
            "Found {} duplicate ID(s): {}",
            duplicates.len(),
            names.join(", ")
        );
    }

    Ok(())
}

fn cmd_show(record: &BirdRecord) -> Result<(), String> {
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| format!("failed to serialize record: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_delete(storage: &Storage, user: &str, record: &BirdRecord) -> Result<(), String> {
    storage
        .delete_record(user, record.id)
        .map_err(|e| format!("failed to delete record: {e}"))?;
    eprintln!("Deleted {} ({})", record.name, record.short_id());
    Ok(())
}

fn cmd_photo(
    storage: &Storage,
    user: &str,
    record: &BirdRecord,
    path: &Path,
) -> Result<(), String> {
    let bytes = fs::read(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "photo".to_string(), |n| n.to_string_lossy().into_owned());

    storage
        .update_record_photo(user, record.id, &file_name, &bytes)
        .map_err(|e| format!("failed to update photo: {e}"))?;
    eprintln!("Photo updated for {} → {file_name}", record.name);
    Ok(())
}

/// Builds a record from the entry form, classifying it when asked.
fn build_record(id: Uuid, bird: &BirdArgs) -> Result<BirdRecord, String> {
    if bird.name.trim().is_empty() {
        return Err("--name must not be empty".to_string());
    }
    if bird.sex.trim().is_empty() {
        return Err("--sex must not be empty".to_string());
    }
    if !bird.weight.is_finite() || bird.weight <= 0.0 {
        return Err(format!("weight must be greater than 0, got {}", bird.weight));
    }
    let status = parse_status(
        &bird.status,
        bird.other_status.as_deref(),
        bird.other_category,
    )?;

    let (traits, classification) = if bird.classify {
        let traits = Traits {
            tail_carriage: bird.tail_carriage.clone(),
            wing_position: bird.wing_position.clone(),
            comb: bird.comb.clone(),
            ..bird.traits.to_traits()
        };
        let missing = traits.missing_for_classification();
        if !missing.is_empty() {
            return Err(format!(
                "full classification needs: {}",
                missing.join(", ")
            ));
        }
        let classification = classify(&traits.observation(bird.weight, Mode::Detailed));
        (traits, Some(classification))
    } else {
        (Traits::default(), None)
    };

    Ok(BirdRecord {
        id,
        name: bird.name.trim().to_string(),
        sex: bird.sex.trim().to_string(),
        weight: bird.weight,
        date_of_birth: bird.date_of_birth,
        status,
        project_id: bird.project.clone().filter(|p| !p.trim().is_empty()),
        traits,
        classification,
        photo: None,
        saved_at: Timestamp::now(),
    })
}

fn parse_status(
    status: &str,
    other_status: Option<&str>,
    other_category: Option<CategoryArg>,
) -> Result<Status, String> {
    if status.trim().eq_ignore_ascii_case("other") {
        let label = other_status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or("--status Other needs --other-status")?;
        let category = match other_category {
            Some(CategoryArg::Active) => StatusCategory::Active,
            Some(CategoryArg::Inactive) | None => StatusCategory::Inactive,
        };
        return Ok(Status::Other {
            label: label.to_string(),
            category,
        });
    }

    Status::named(status).ok_or_else(|| {
        let named = Status::NAMED;
        let known: Vec<&str> = named.iter().map(Status::label).collect();
        format!(
            "unknown status '{status}'; expected one of: {}, Other",
            known.join(", ")
        )
    })
}
