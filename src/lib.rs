//! Serama breeding records.
//!
//! The heart of the crate is [`classify::classify`], a pure rule engine that
//! maps a bird's body carriage, back length, feather type, color pattern and
//! weight to a class type, plumage type and color variety, plus advisory
//! warnings. Around it sit a per-user record store, flock views, and the
//! `serama` command line.

pub mod classify;
pub mod cli;
pub mod config;
pub mod herd;
pub mod identity;
pub mod model;
pub mod storage;
