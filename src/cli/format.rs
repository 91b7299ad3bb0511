//! Output formatting for CLI display.

use std::fmt::Write;

use jiff::civil::Date;

use crate::herd::{HerdStats, age_in_months};
use crate::model::{BirdRecord, Classification};

/// One-line summary of a classification.
pub(super) fn format_classification(c: &Classification) -> String {
    format!(
        "CT: {}  PT: {}  CV: {}",
        c.class_type, c.plumage_type, c.color_variety
    )
}

/// Shown for records that belong to no breeding project.
const GENERAL_PROJECT: &str = "General";

/// One line of `record list`.
pub(super) fn format_record_line(r: &BirdRecord, today: Date, duplicate: bool) -> String {
    let age = age_in_months(r.date_of_birth, today)
        .map_or_else(|| "?".to_string(), |m| format!("{m}mo"));
    let class_type = r
        .classification
        .as_ref()
        .map_or("-", |c| c.class_type.as_str());
    let project = r.project_id.as_deref().unwrap_or(GENERAL_PROJECT);
    let photo = if r.photo.is_some() { "  [photo]" } else { "" };
    let duplicate = if duplicate { "  (duplicate ID)" } else { "" };

    format!(
        "{}  {:<12} {:<10} {:>5.1}oz {:>5}  [{}]  {project}  {class_type}{photo}{duplicate}",
        r.short_id(),
        r.name,
        r.sex,
        r.weight,
        age,
        r.status.label(),
    )
}

pub(super) fn format_stats(s: &HerdStats) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: usize| {
        let _ = writeln!(out, "{label:<22}{value}");
    };

    line("Total birds", s.total_birds);
    line("  Traditional/American", s.traditional);
    line("  Ayam (Malaysian)", s.ayam);
    line("  Modern Malaysian", s.modern);
    line("  Undetermined", s.undetermined);
    line("Active birds", s.active_total);
    line("  Chicks", s.chicks);
    line("  Growouts", s.growouts);
    line("  Breeders", s.breeders);
    line("  Brood hens", s.brood_hens);
    line("  Exhibition", s.exhibition);
    line("  Active other", s.active_other);
    line("Inactive birds", s.inactive);
    out
}
