//! Lookup tables for the Serama standard.
//!
//! Keys are matched exactly: no trimming, no case folding.

use crate::model::{ClassType, ColorVariety, PlumageType};

/// `"<body carriage>|<back length>"` → class type.
pub const CLASS_TYPES: &[(&str, ClassType)] = &[
    ("Upright|Short", ClassType::TraditionalAmerican),
    ("Upright|Medium", ClassType::TraditionalAmerican),
    ("Forward|Medium", ClassType::AyamMalaysian),
    ("Forward|Long", ClassType::AyamMalaysian),
    ("Moderate|Long", ClassType::ModernMalaysian),
    ("Moderate|Medium", ClassType::ModernMalaysian),
];

/// Feather type → plumage type. Anything else is smooth.
pub const PLUMAGE_TYPES: &[(&str, PlumageType)] = &[
    ("Frizzled", PlumageType::Frizzled),
    ("Silkied", PlumageType::Silkied),
];

/// Color pattern → color variety. Anything else is "Other".
pub const COLOR_VARIETIES: &[(&str, ColorVariety)] = &[
    ("Solid Black", ColorVariety::Black),
    ("Solid White", ColorVariety::White),
    ("Red/Gold", ColorVariety::Red),
    ("Mixed Colors", ColorVariety::Exchequer),
];

/// Typical Serama weight range in ounces. Both bounds are inside the range.
pub const WEIGHT_MIN: f64 = 7.0;
pub const WEIGHT_MAX: f64 = 14.0;

// Basic-mode substitutes for traits left blank.
pub const DEFAULT_BODY_CARRIAGE: &str = "Upright";
pub const DEFAULT_BACK_LENGTH: &str = "Short";
pub const DEFAULT_FEATHER_TYPE: &str = "Normal";
pub const DEFAULT_COLOR_PATTERN: &str = "Other";

/// Exact-match lookup in one of the tables above.
pub fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
