//! Classification: what the rule engine concluded about a bird.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::observation::Mode;

/// Breed conformation category, from body carriage and back length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassType {
    #[serde(rename = "Traditional/American")]
    TraditionalAmerican,

    #[serde(rename = "Ayam (Malaysian)", alias = "Ayam")]
    AyamMalaysian,

    #[serde(rename = "Modern Malaysian", alias = "Modern")]
    ModernMalaysian,

    /// The carriage/length combination is not a standard one.
    Undetermined,
}

impl ClassType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TraditionalAmerican => "Traditional/American",
            Self::AyamMalaysian => "Ayam (Malaysian)",
            Self::ModernMalaysian => "Modern Malaysian",
            Self::Undetermined => "Undetermined",
        }
    }
}

/// Feather structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlumageType {
    Smooth,
    Frizzled,
    Silkied,
}

impl PlumageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Smooth => "Smooth",
            Self::Frizzled => "Frizzled",
            Self::Silkied => "Silkied",
        }
    }
}

/// Plumage color classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorVariety {
    Black,
    White,
    Red,
    Exchequer,
    Other,
}

impl ColorVariety {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "Black",
            Self::White => "White",
            Self::Red => "Red",
            Self::Exchequer => "Exchequer",
            Self::Other => "Other",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

display_as_str!(ClassType, PlumageType, ColorVariety);

/// An advisory note attached to a classification.
///
/// Serialized as its message text so stored records stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Warning {
    UnrecognizedCombination,
    BodyCarriageRequired,
    BackLengthRequired,
    WeightAboveRange,
    WeightBelowRange,
}

impl Warning {
    const ALL: [Self; 5] = [
        Self::UnrecognizedCombination,
        Self::BodyCarriageRequired,
        Self::BackLengthRequired,
        Self::WeightAboveRange,
        Self::WeightBelowRange,
    ];

    pub fn message(self) -> &'static str {
        match self {
            Self::UnrecognizedCombination => {
                "Body carriage and back length combination does not match standard classifications"
            }
            Self::BodyCarriageRequired => "Body carriage is required for classification",
            Self::BackLengthRequired => "Back length is required for classification",
            Self::WeightAboveRange => "Weight exceeds typical Serama range",
            Self::WeightBelowRange => "Weight below typical Serama range",
        }
    }

    /// True for the two weight checks, which run in every mode.
    pub fn is_weight(self) -> bool {
        matches!(self, Self::WeightAboveRange | Self::WeightBelowRange)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<Warning> for String {
    fn from(warning: Warning) -> Self {
        warning.message().to_string()
    }
}

impl TryFrom<String> for Warning {
    type Error = String;

    fn try_from(message: String) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|w| w.message() == message)
            .ok_or_else(|| format!("unknown warning: {message}"))
    }
}

/// The classifier's answer for one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(rename = "ct")]
    pub class_type: ClassType,

    #[serde(rename = "pt")]
    pub plumage_type: PlumageType,

    #[serde(rename = "cv")]
    pub color_variety: ColorVariety,

    /// In the order they were raised; empty when nothing applies.
    pub warnings: Vec<Warning>,

    /// Echo of the input mode.
    pub mode: Mode,
}
