//! Classify command and the trait flags it shares with `record`.

use clap::{Args, ValueEnum};

use crate::classify::classify;
use crate::model::{Mode, Traits};

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// How strictly to treat missing traits.
    #[arg(long, value_enum, default_value_t = ModeArg::Detailed)]
    mode: ModeArg,

    #[command(flatten)]
    traits: ClassTraitArgs,

    /// Weight in ounces.
    #[arg(long, default_value_t = 0.0)]
    weight: f64,
}

/// CLI-facing mode, mapped to the domain `Mode`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Fill blank traits with standard defaults; only check weight.
    #[value(alias = "quick")]
    Basic,
    /// Take traits as given and report gaps.
    #[value(alias = "classification")]
    Detailed,
}

impl ModeArg {
    fn to_domain(self) -> Mode {
        match self {
            Self::Basic => Mode::Basic,
            Self::Detailed => Mode::Detailed,
        }
    }
}

/// The four traits the classifier reads.
#[derive(Debug, Clone, Default, Args)]
pub struct ClassTraitArgs {
    /// Body carriage (e.g. Upright, Forward, Moderate).
    #[arg(long, default_value = "")]
    pub body_carriage: String,

    /// Back length (e.g. Short, Medium, Long).
    #[arg(long, default_value = "")]
    pub back_length: String,

    /// Feather type (e.g. Normal, Frizzled, Silkied).
    #[arg(long, default_value = "")]
    pub feather_type: String,

    /// Color pattern (e.g. "Solid Black", "Solid White", "Red/Gold", "Mixed Colors").
    #[arg(long, default_value = "")]
    pub color_pattern: String,
}

impl ClassTraitArgs {
    pub fn to_traits(&self) -> Traits {
        Traits {
            body_carriage: self.body_carriage.clone(),
            back_length: self.back_length.clone(),
            feather_type: self.feather_type.clone(),
            color_pattern: self.color_pattern.clone(),
            ..Traits::default()
        }
    }
}

pub(super) fn cmd_classify(args: &ClassifyArgs) -> Result<(), String> {
    let observation = args
        .traits
        .to_traits()
        .observation(args.weight, args.mode.to_domain());
    let classification = classify(&observation);

    let json = serde_json::to_string_pretty(&classification)
        .map_err(|e| format!("failed to serialize classification: {e}"))?;
    println!("{json}");
    Ok(())
}
