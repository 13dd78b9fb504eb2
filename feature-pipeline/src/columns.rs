//! Shared feature-column naming contract.
//!
//! Both the candidate and the job extractors build their column names
//! through these helpers. Similarity is computed over the intersection of
//! the two column sets, so a dimension only participates in scoring when
//! both sides produce the exact same name for it.

pub const SPECIALTY_PREFIX: &str = "specialties_";
pub const LANGUAGE_PREFIX: &str = "language_";
pub const PROVINCE_PREFIX: &str = "interestedProvince_";
pub const CITY_PREFIX: &str = "interestedCity_";
pub const LICENSE_COUNTRY_PREFIX: &str = "licenseCountry_";
pub const CERTIFICATION_PREFIX: &str = "certification_";
pub const AVAILABILITY_PREFIX: &str = "availability_";

pub const VERIFIED: &str = "isVerified";
pub const SUBSCRIBED: &str = "hasSubscription";
pub const YEARS_OF_EXPERIENCE: &str = "yearsOfExperience";
pub const HAS_LICENSE: &str = "hasLicense";
pub const RELOCATION: &str = "availableToRelocate";
pub const CITY_POPULARITY: &str = "cityPopularity";
pub const OTHER_LANGUAGES: &str = "OthersLanguages";

/// Category values are embedded into column names in trimmed lowercase so
/// that case or whitespace differences between collections cannot split a
/// dimension in two.
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn specialty(name: &str) -> String {
    format!("{}{}", SPECIALTY_PREFIX, normalize_token(name))
}

pub fn language(name: &str) -> String {
    format!("{}{}", LANGUAGE_PREFIX, normalize_token(name))
}

pub fn province(name: &str) -> String {
    format!("{}{}", PROVINCE_PREFIX, normalize_token(name))
}

pub fn city(name: &str) -> String {
    format!("{}{}", CITY_PREFIX, normalize_token(name))
}

pub fn license_country(name: &str) -> String {
    format!("{}{}", LICENSE_COUNTRY_PREFIX, normalize_token(name))
}

pub fn certification(name: &str) -> String {
    format!("{}{}", CERTIFICATION_PREFIX, normalize_token(name))
}

pub fn availability(day: &str) -> String {
    format!("{}{}", AVAILABILITY_PREFIX, normalize_token(day))
}
