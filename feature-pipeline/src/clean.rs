//! Fixed data-cleaning rules applied before encoding.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::columns::normalize_token;

lazy_static! {
    /// Misspellings observed in stored location preferences. Corrected
    /// before one-hot encoding so the variants collapse into one column.
    static ref CITY_CORRECTIONS: HashMap<&'static str, &'static str> = HashMap::from([
        ("missisauga", "mississauga"),
        ("scarbrough", "scarborough"),
        ("otawa", "ottawa"),
    ]);
}

/// Languages tracked as dedicated feature columns. Everything else folds
/// into the aggregate `OthersLanguages` column.
pub const COMMON_LANGUAGES: [&str; 2] = ["english", "french"];

pub fn is_common_language(name: &str) -> bool {
    COMMON_LANGUAGES.contains(&normalize_token(name).as_str())
}

/// Normalizes a city value and fixes known misspellings.
pub fn correct_city(raw: &str) -> String {
    let token = normalize_token(raw);
    match CITY_CORRECTIONS.get(token.as_str()) {
        Some(fixed) => (*fixed).to_string(),
        None => token,
    }
}

/// Fluency scale shared by candidate language skills and job language
/// requirements. Matching is case-insensitive; unmapped values are 0.
pub fn fluency_level(raw: &str) -> f64 {
    match normalize_token(raw).as_str() {
        "basic" => 1.0,
        "intermediate" => 2.0,
        "fluent" => 3.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_misspellings_are_corrected() {
        assert_eq!(correct_city("Missisauga"), "mississauga");
        assert_eq!(correct_city(" Otawa "), "ottawa");
    }

    #[test]
    fn unknown_cities_pass_through_normalized() {
        assert_eq!(correct_city("  Toronto "), "toronto");
    }

    #[test]
    fn fluency_matching_is_case_insensitive() {
        assert_eq!(fluency_level("Fluent"), 3.0);
        assert_eq!(fluency_level("INTERMEDIATE"), 2.0);
        assert_eq!(fluency_level("basic"), 1.0);
    }

    #[test]
    fn unmapped_levels_default_to_zero() {
        assert_eq!(fluency_level("None"), 0.0);
        assert_eq!(fluency_level("native-ish"), 0.0);
        assert_eq!(fluency_level(""), 0.0);
    }
}
