//! Views over a breeder's whole collection: duplicate IDs, flock stats,
//! bird age, and listing order.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use jiff::civil::Date;
use serde::Serialize;

use crate::model::{BirdRecord, ClassType, Status};

/// Average month length used for bird age.
const DAYS_PER_MONTH: f64 = 30.44;

/// Key used when comparing bird names for uniqueness.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Finds a record whose name matches, ignoring case and surrounding whitespace.
pub fn find_by_name<'a>(records: &'a [BirdRecord], name: &str) -> Option<&'a BirdRecord> {
    let wanted = normalize_name(name);
    if wanted.is_empty() {
        return None;
    }
    records.iter().find(|r| normalize_name(&r.name) == wanted)
}

/// Normalized names that appear on more than one record.
pub fn duplicate_names(records: &[BirdRecord]) -> BTreeSet<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in records {
        let name = normalize_name(&r.name);
        if !name.is_empty() {
            *counts.entry(name).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name)
        .collect()
}

/// Whole months since hatch, or `None` if unknown or in the future.
pub fn age_in_months(date_of_birth: Option<Date>, today: Date) -> Option<i64> {
    let dob = date_of_birth?;
    let days = today.since(dob).ok()?.get_days();
    if days < 0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let months = (f64::from(days) / DAYS_PER_MONTH).floor() as i64;
    Some(months)
}

/// Flock totals shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HerdStats {
    pub total_birds: usize,

    pub traditional: usize,
    pub ayam: usize,
    pub modern: usize,
    /// Includes birds that were quick-logged without classification.
    pub undetermined: usize,

    pub chicks: usize,
    pub growouts: usize,
    pub breeders: usize,
    pub brood_hens: usize,
    pub exhibition: usize,
    /// Plain "Active" plus custom statuses filed as active.
    pub active_other: usize,

    pub active_total: usize,
    pub inactive: usize,
}

impl HerdStats {
    pub fn from_records(records: &[BirdRecord]) -> Self {
        let mut stats = Self {
            total_birds: records.len(),
            ..Self::default()
        };

        for r in records {
            match r.classification.as_ref().map(|c| c.class_type) {
                Some(ClassType::TraditionalAmerican) => stats.traditional += 1,
                Some(ClassType::AyamMalaysian) => stats.ayam += 1,
                Some(ClassType::ModernMalaysian) => stats.modern += 1,
                Some(ClassType::Undetermined) | None => stats.undetermined += 1,
            }

            match &r.status {
                Status::Chick => stats.chicks += 1,
                Status::Growout => stats.growouts += 1,
                Status::Breeder => stats.breeders += 1,
                Status::BroodHen => stats.brood_hens += 1,
                Status::Exhibition => stats.exhibition += 1,
                Status::Active => stats.active_other += 1,
                s @ Status::Other { .. } if s.is_active() => stats.active_other += 1,
                _ => {}
            }

            if r.status.is_active() {
                stats.active_total += 1;
            } else {
                stats.inactive += 1;
            }
        }

        stats
    }
}

/// Column a record listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Sex,
    Weight,
    Status,
    ClassType,
    Project,
    Age,
    SavedAt,
}

/// Sorts records in place. Ties keep their existing order.
pub fn sort_records(records: &mut [BirdRecord], field: SortField, descending: bool, today: Date) {
    records.sort_by(|a, b| {
        let ord = compare(a, b, field, today);
        if descending { ord.reverse() } else { ord }
    });
}

fn compare(a: &BirdRecord, b: &BirdRecord, field: SortField, today: Date) -> Ordering {
    match field {
        SortField::Name => text_key(&a.name).cmp(&text_key(&b.name)),
        SortField::Sex => text_key(&a.sex).cmp(&text_key(&b.sex)),
        SortField::Weight => a.weight.total_cmp(&b.weight),
        SortField::Status => text_key(a.status.label()).cmp(&text_key(b.status.label())),
        SortField::ClassType => class_type_key(a).cmp(&class_type_key(b)),
        SortField::Project => project_key(a).cmp(&project_key(b)),
        SortField::Age => age_key(a, today).cmp(&age_key(b, today)),
        SortField::SavedAt => a.saved_at.cmp(&b.saved_at),
    }
}

fn text_key(s: &str) -> String {
    s.to_lowercase()
}

fn class_type_key(r: &BirdRecord) -> String {
    r.classification
        .as_ref()
        .map(|c| text_key(c.class_type.as_str()))
        .unwrap_or_default()
}

fn project_key(r: &BirdRecord) -> String {
    r.project_id.as_deref().map(text_key).unwrap_or_default()
}

fn age_key(r: &BirdRecord, today: Date) -> i64 {
    age_in_months(r.date_of_birth, today).unwrap_or(-1)
}
