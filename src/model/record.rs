//! Bird records: what gets saved to a breeder's collection.

use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::classification::Classification;
use super::observation::{Mode, Observation};

/// One bird in a breeder's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirdRecord {
    pub id: Uuid,

    /// The breeder's identifier for the bird. Unique per user, ignoring case.
    pub name: String,

    pub sex: String,

    /// Ounces; 0 when unknown.
    pub weight: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Date>,

    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default)]
    pub traits: Traits,

    /// Absent for quick-logged birds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoRef>,

    pub saved_at: Timestamp,
}

impl BirdRecord {
    /// Short form of the id used in listings.
    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }
}

/// Physical traits as entered. Empty strings mean "not recorded".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Traits {
    pub body_carriage: String,
    pub back_length: String,
    pub tail_carriage: String,
    pub wing_position: String,
    pub comb: String,
    pub feather_type: String,
    pub color_pattern: String,
}

impl Traits {
    /// Builds the classifier input from these traits.
    pub fn observation(&self, weight: f64, mode: Mode) -> Observation {
        Observation {
            body_carriage: self.body_carriage.clone(),
            back_length: self.back_length.clone(),
            feather_type: self.feather_type.clone(),
            color_pattern: self.color_pattern.clone(),
            weight,
            mode,
        }
    }

    /// The four traits the classifier reads, by display name, when blank.
    pub fn missing_for_classification(&self) -> Vec<&'static str> {
        [
            ("body carriage", &self.body_carriage),
            ("back length", &self.back_length),
            ("feather type", &self.feather_type),
            ("color pattern", &self.color_pattern),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// A stored photo: content hash of the original bytes plus the uploaded file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    pub sha256: String,
    pub file_name: String,
}

/// Where a bird stands in the breeding program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Breeder,
    Growout,
    Chick,
    #[serde(rename = "Brood Hen")]
    BroodHen,
    Exhibition,
    Active,

    Sold,
    Deceased,
    #[serde(rename = "Pet Quality")]
    PetQuality,
    #[serde(rename = "For Sale")]
    ForSale,
    Retired,
    #[serde(rename = "Inactive Chick")]
    InactiveChick,
    #[serde(rename = "Inactive Growout")]
    InactiveGrowout,
    Undecided,

    /// A breeder-defined status, filed as active or inactive.
    Other {
        label: String,
        #[serde(default)]
        category: StatusCategory,
    },
}

/// Whether a custom status counts the bird as part of the active flock.
/// Unfiled custom statuses are inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Active,
    #[default]
    Inactive,
}

impl Status {
    /// The fixed statuses, in the order the entry form offers them.
    pub const NAMED: [Self; 14] = [
        Self::Breeder,
        Self::Growout,
        Self::Chick,
        Self::BroodHen,
        Self::Exhibition,
        Self::Active,
        Self::Sold,
        Self::Deceased,
        Self::PetQuality,
        Self::ForSale,
        Self::Retired,
        Self::InactiveChick,
        Self::InactiveGrowout,
        Self::Undecided,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::Breeder => "Breeder",
            Self::Growout => "Growout",
            Self::Chick => "Chick",
            Self::BroodHen => "Brood Hen",
            Self::Exhibition => "Exhibition",
            Self::Active => "Active",
            Self::Sold => "Sold",
            Self::Deceased => "Deceased",
            Self::PetQuality => "Pet Quality",
            Self::ForSale => "For Sale",
            Self::Retired => "Retired",
            Self::InactiveChick => "Inactive Chick",
            Self::InactiveGrowout => "Inactive Growout",
            Self::Undecided => "Undecided",
            Self::Other { label, .. } => label,
        }
    }

    /// Looks up a fixed status by name, ignoring case.
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::NAMED
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(name))
    }

    /// Breeder, growout, chick, brood hen, exhibition, active, or a custom active status.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Breeder
            | Self::Growout
            | Self::Chick
            | Self::BroodHen
            | Self::Exhibition
            | Self::Active => true,
            Self::Other { category, .. } => *category == StatusCategory::Active,
            _ => false,
        }
    }
}
