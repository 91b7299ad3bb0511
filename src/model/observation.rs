//! Observation: the trait values a breeder recorded for one bird.

use serde::{Deserialize, Serialize};

/// How much of the trait form was filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Quick entry: missing traits take standard defaults, only weight is checked.
    Basic,

    /// Full classification: missing or non-standard traits are reported.
    Detailed,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Detailed => "detailed",
        }
    }
}

/// Input to the classifier.
///
/// Categorical fields are kept as the raw strings the breeder chose.
/// An empty string means "not given"; values outside the known option
/// lists are accepted and simply miss the lookup tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(default)]
    pub body_carriage: String,

    #[serde(default)]
    pub back_length: String,

    #[serde(default)]
    pub feather_type: String,

    #[serde(default)]
    pub color_pattern: String,

    /// Weight in ounces, 0 when unknown.
    #[serde(default)]
    pub weight: f64,

    pub mode: Mode,
}
