//! Extractors: raw record slices in, rectangular feature tables out.
//!
//! Every extractor follows the same per-record policy: a record without an
//! identifier is skipped with a warning, everything else yields exactly one
//! row with missing fields defaulted. Whether an absent sub-document yields
//! a defaulted row or no row at all differs between the candidate and job
//! sides; see the module docs of [`candidates`] and [`jobs`].

pub mod candidates;
pub mod jobs;

pub use candidates::{
    extract_certifications, extract_languages, extract_location_preferences,
    extract_specialties, extract_user_features, extract_working_experience,
};
pub use jobs::{extract_job_languages, extract_job_locations, extract_job_specialties};

use std::collections::HashMap;

use crate::clean::{fluency_level, is_common_language};
use crate::columns;
use crate::records::LanguageSkill;

/// Upper clip for overall years of experience.
pub const MAX_EXPERIENCE_YEARS: f64 = 50.0;
/// Upper clip for per-specialty years, bounding outlier influence.
pub const MAX_SPECIALTY_YEARS: f64 = 10.0;
/// One-hot license-country columns with a mean below this are pruned.
pub const SPARSE_COLUMN_MIN_MEAN: f64 = 0.05;

/// Encodes a list of language skills the same way on both sides: common
/// languages get a dedicated ordinal column, everything else folds into the
/// aggregate `OthersLanguages` column at its maximum level.
pub(crate) fn language_row<'a>(
    languages: impl Iterator<Item = &'a LanguageSkill>,
) -> HashMap<String, f64> {
    let mut row = HashMap::new();
    for language in languages {
        let name = match &language.name {
            Some(name) => name,
            None => continue,
        };
        let level = language.level.as_deref().map(fluency_level).unwrap_or(0.0);
        if is_common_language(name) {
            row.insert(columns::language(name), level);
        } else {
            let aggregate = row
                .entry(columns::OTHER_LANGUAGES.to_string())
                .or_insert(0.0);
            if level > *aggregate {
                *aggregate = level;
            }
        }
    }
    row
}

pub(crate) fn bool_flag(value: Option<bool>) -> f64 {
    if value.unwrap_or(false) {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn clip(value: f64, max: f64) -> f64 {
    value.clamp(0.0, max)
}

/// Normalized value-frequency scores: each present value is mapped to its
/// share of all present values. Rows with `None` score 0.
pub(crate) fn popularity_scores(values: &[Option<String>]) -> Vec<f64> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut total = 0usize;
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
        total += 1;
    }
    values
        .iter()
        .map(|value| match value {
            Some(value) => counts[value.as_str()] as f64 / total as f64,
            None => 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popularity_is_the_normalized_value_frequency() {
        let values = vec![
            Some("toronto".to_string()),
            Some("toronto".to_string()),
            Some("ottawa".to_string()),
            None,
        ];
        let scores = popularity_scores(&values);
        assert_eq!(scores, vec![2.0 / 3.0, 2.0 / 3.0, 1.0 / 3.0, 0.0]);
    }

    #[test]
    fn clip_bounds_both_ends() {
        assert_eq!(clip(-2.0, 10.0), 0.0);
        assert_eq!(clip(4.5, 10.0), 4.5);
        assert_eq!(clip(25.0, 10.0), 10.0);
    }
}
