//! The trait classification engine.
//!
//! A pure function from an [`Observation`] to a [`Classification`].
//! It never fails: blank or unknown traits fall back to defaults or to
//! `Undetermined`, and anything questionable is reported as a [`Warning`]
//! rather than rejected, so incomplete field notes can still be saved.

pub mod tables;

use crate::model::{
    ClassType, Classification, ColorVariety, Mode, Observation, PlumageType, Warning,
};

use tables::{
    CLASS_TYPES, COLOR_VARIETIES, DEFAULT_BACK_LENGTH, DEFAULT_BODY_CARRIAGE,
    DEFAULT_COLOR_PATTERN, DEFAULT_FEATHER_TYPE, PLUMAGE_TYPES, WEIGHT_MAX, WEIGHT_MIN, lookup,
};

/// Classify one bird.
pub fn classify(obs: &Observation) -> Classification {
    let classification = match obs.mode {
        Mode::Basic => classify_basic(obs),
        Mode::Detailed => classify_detailed(obs),
    };
    if !classification.warnings.is_empty() {
        tracing::debug!(
            mode = obs.mode.as_str(),
            warnings = classification.warnings.len(),
            "classification raised warnings"
        );
    }
    classification
}

/// Blank traits take the standard defaults; only weight is checked.
fn classify_basic(obs: &Observation) -> Classification {
    let body = or_default(&obs.body_carriage, DEFAULT_BODY_CARRIAGE);
    let back = or_default(&obs.back_length, DEFAULT_BACK_LENGTH);
    let feather = or_default(&obs.feather_type, DEFAULT_FEATHER_TYPE);
    let color = or_default(&obs.color_pattern, DEFAULT_COLOR_PATTERN);

    // The defaults always hit the table; the fallback only guards odd input.
    let class_type = lookup(CLASS_TYPES, &composite_key(body, back))
        .unwrap_or(ClassType::TraditionalAmerican);

    let mut warnings = Vec::new();
    check_weight(obs.weight, &mut warnings);

    Classification {
        class_type,
        plumage_type: plumage_type(feather),
        color_variety: color_variety(color),
        warnings,
        mode: Mode::Basic,
    }
}

/// Traits are taken as given; gaps and unknown combinations are reported.
fn classify_detailed(obs: &Observation) -> Classification {
    let class_type = lookup(
        CLASS_TYPES,
        &composite_key(&obs.body_carriage, &obs.back_length),
    );

    let mut warnings = Vec::new();
    if class_type.is_none() {
        warnings.push(Warning::UnrecognizedCombination);
    }
    if obs.body_carriage.is_empty() {
        warnings.push(Warning::BodyCarriageRequired);
    }
    if obs.back_length.is_empty() {
        warnings.push(Warning::BackLengthRequired);
    }
    check_weight(obs.weight, &mut warnings);

    Classification {
        class_type: class_type.unwrap_or(ClassType::Undetermined),
        plumage_type: plumage_type(&obs.feather_type),
        color_variety: color_variety(&obs.color_pattern),
        warnings,
        mode: Mode::Detailed,
    }
}

fn check_weight(weight: f64, warnings: &mut Vec<Warning>) {
    if weight > WEIGHT_MAX {
        warnings.push(Warning::WeightAboveRange);
    }
    if weight < WEIGHT_MIN {
        warnings.push(Warning::WeightBelowRange);
    }
}

fn composite_key(body_carriage: &str, back_length: &str) -> String {
    format!("{body_carriage}|{back_length}")
}

fn plumage_type(feather_type: &str) -> PlumageType {
    lookup(PLUMAGE_TYPES, feather_type).unwrap_or(PlumageType::Smooth)
}

fn color_variety(color_pattern: &str) -> ColorVariety {
    lookup(COLOR_VARIETIES, color_pattern).unwrap_or(ColorVariety::Other)
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(body: &str, back: &str, feather: &str, color: &str, weight: f64, mode: Mode) -> Observation {
        Observation {
            body_carriage: body.into(),
            back_length: back.into(),
            feather_type: feather.into(),
            color_pattern: color.into(),
            weight,
            mode,
        }
    }

    fn weight_warnings(c: &Classification) -> Vec<Warning> {
        c.warnings.iter().copied().filter(|w| w.is_weight()).collect()
    }

    #[test]
    fn basic_mode_with_blank_traits_is_silent() {
        let c = classify(&obs("", "", "", "", 10.0, Mode::Basic));

        assert_eq!(c.class_type, ClassType::TraditionalAmerican);
        assert_eq!(c.plumage_type, PlumageType::Smooth);
        assert_eq!(c.color_variety, ColorVariety::Other);
        assert!(c.warnings.is_empty());
        assert_eq!(c.mode, Mode::Basic);
    }

    #[test]
    fn detailed_mode_reports_missing_traits_in_order() {
        let c = classify(&obs("", "", "Normal", "Other", 10.0, Mode::Detailed));

        assert_eq!(c.class_type, ClassType::Undetermined);
        assert_eq!(
            c.warnings,
            vec![
                Warning::UnrecognizedCombination,
                Warning::BodyCarriageRequired,
                Warning::BackLengthRequired,
            ]
        );
        let messages: Vec<String> = c.warnings.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            [
                "Body carriage and back length combination does not match standard classifications",
                "Body carriage is required for classification",
                "Back length is required for classification",
            ]
        );
    }

    #[test]
    fn known_combination_classifies_cleanly() {
        let c = classify(&obs("Forward", "Long", "Frizzled", "Solid Black", 10.0, Mode::Detailed));

        assert_eq!(c.class_type, ClassType::AyamMalaysian);
        assert_eq!(c.plumage_type, PlumageType::Frizzled);
        assert_eq!(c.color_variety, ColorVariety::Black);
        assert!(c.warnings.is_empty());
        assert_eq!(c.mode, Mode::Detailed);
    }

    #[test]
    fn unknown_feather_and_color_fall_through() {
        let c = classify(&obs("Upright", "Short", "Fluffy", "Speckled", 10.0, Mode::Detailed));

        assert_eq!(c.class_type, ClassType::TraditionalAmerican);
        assert_eq!(c.plumage_type, PlumageType::Smooth);
        assert_eq!(c.color_variety, ColorVariety::Other);
        assert!(c.warnings.is_empty());
    }

    #[test]
    fn every_class_type_entry_is_reachable() {
        let cases = [
            ("Upright", "Short", ClassType::TraditionalAmerican),
            ("Upright", "Medium", ClassType::TraditionalAmerican),
            ("Forward", "Medium", ClassType::AyamMalaysian),
            ("Forward", "Long", ClassType::AyamMalaysian),
            ("Moderate", "Long", ClassType::ModernMalaysian),
            ("Moderate", "Medium", ClassType::ModernMalaysian),
        ];
        for (body, back, expected) in cases {
            let c = classify(&obs(body, back, "", "", 10.0, Mode::Detailed));
            assert_eq!(c.class_type, expected, "{body}|{back}");
        }
    }

    #[test]
    fn color_table() {
        let cases = [
            ("Solid Black", ColorVariety::Black),
            ("Solid White", ColorVariety::White),
            ("Red/Gold", ColorVariety::Red),
            ("Mixed Colors", ColorVariety::Exchequer),
            ("Other", ColorVariety::Other),
            ("", ColorVariety::Other),
        ];
        for (pattern, expected) in cases {
            let c = classify(&obs("Upright", "Short", "", pattern, 10.0, Mode::Detailed));
            assert_eq!(c.color_variety, expected, "{pattern:?}");
        }
    }

    #[test]
    fn silkied_plumage() {
        let c = classify(&obs("Upright", "Short", "Silkied", "", 10.0, Mode::Basic));
        assert_eq!(c.plumage_type, PlumageType::Silkied);
    }

    #[test]
    fn weight_bounds_are_exclusive() {
        for mode in [Mode::Basic, Mode::Detailed] {
            let at_min = classify(&obs("Upright", "Short", "", "", 7.0, mode));
            let at_max = classify(&obs("Upright", "Short", "", "", 14.0, mode));
            assert!(weight_warnings(&at_min).is_empty());
            assert!(weight_warnings(&at_max).is_empty());

            let under = classify(&obs("Upright", "Short", "", "", 6.99, mode));
            assert_eq!(weight_warnings(&under), vec![Warning::WeightBelowRange]);

            let over = classify(&obs("Upright", "Short", "", "", 14.01, mode));
            assert_eq!(weight_warnings(&over), vec![Warning::WeightAboveRange]);
        }
    }

    #[test]
    fn basic_mode_still_checks_weight() {
        let c = classify(&obs("", "", "", "", 0.0, Mode::Basic));
        assert_eq!(c.warnings, vec![Warning::WeightBelowRange]);
    }

    #[test]
    fn warnings_accumulate_with_weight_last() {
        let c = classify(&obs("Forward", "", "", "", 20.0, Mode::Detailed));
        assert_eq!(
            c.warnings,
            vec![
                Warning::UnrecognizedCombination,
                Warning::BackLengthRequired,
                Warning::WeightAboveRange,
            ]
        );
    }

    #[test]
    fn lookup_is_exact_match() {
        for (body, back) in [("upright", "Short"), ("Upright ", "Short"), ("Upright", " Short")] {
            let c = classify(&obs(body, back, "", "", 10.0, Mode::Detailed));
            assert_eq!(c.class_type, ClassType::Undetermined, "{body:?}|{back:?}");
            assert_eq!(c.warnings, vec![Warning::UnrecognizedCombination]);
        }
        let c = classify(&obs("Upright", "Short", "frizzled", "solid black", 10.0, Mode::Detailed));
        assert_eq!(c.plumage_type, PlumageType::Smooth);
        assert_eq!(c.color_variety, ColorVariety::Other);
    }

    #[test]
    fn basic_mode_unknown_combination_falls_back_quietly() {
        let c = classify(&obs("Sideways", "Long", "", "", 10.0, Mode::Basic));
        assert_eq!(c.class_type, ClassType::TraditionalAmerican);
        assert!(c.warnings.is_empty());
    }

    #[test]
    fn nan_weight_raises_no_weight_warning() {
        let c = classify(&obs("Upright", "Short", "", "", f64::NAN, Mode::Detailed));
        assert!(c.warnings.is_empty());
    }

    #[test]
    fn classification_is_deterministic_and_total() {
        let bodies = ["", "Upright", "Forward", "Moderate", "Sideways"];
        let backs = ["", "Short", "Medium", "Long"];
        for mode in [Mode::Basic, Mode::Detailed] {
            for body in bodies {
                for back in backs {
                    let o = obs(body, back, "", "", 0.0, mode);
                    let first = classify(&o);
                    assert_eq!(first, classify(&o));
                    assert!(!first.class_type.as_str().is_empty());
                    assert!(!first.plumage_type.as_str().is_empty());
                    assert!(!first.color_variety.as_str().is_empty());
                    assert_eq!(first.mode, mode);
                }
            }
        }
    }
}
