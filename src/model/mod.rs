//! Core data model for Serama records.
//!
//! Observations go into the classifier, classifications come out,
//! and both end up on a bird record.

mod classification;
mod observation;
mod record;

pub use classification::{ClassType, Classification, ColorVariety, PlumageType, Warning};
pub use observation::{Mode, Observation};
pub use record::{BirdRecord, PhotoRef, Status, StatusCategory, Traits};
