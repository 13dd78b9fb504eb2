//! Candidate-side extractors, one per raw data source.
//!
//! Each extractor is keyed by the applicant id. An application whose
//! relevant sub-document is absent produces no row here, which makes the
//! composer's inner join drop that candidate entirely: candidates are only
//! recommendable once every part of their application exists.

use std::collections::HashMap;

use crate::clean::correct_city;
use crate::columns;
use crate::extract::{
    bool_flag, clip, language_row, popularity_scores, MAX_EXPERIENCE_YEARS, MAX_SPECIALTY_YEARS,
    SPARSE_COLUMN_MIN_MEAN,
};
use crate::records::{Application, User};
use crate::table::{FeatureTable, TableBuilder};

/// Account flags and weekly availability indicators.
pub fn extract_user_features(users: &[User]) -> FeatureTable {
    let mut builder = TableBuilder::new();
    for user in users {
        let id = match user.id_string() {
            Some(id) => id,
            None => {
                log::warn!("skipping user record without an id");
                continue;
            }
        };
        let mut row = HashMap::new();
        row.insert(columns::VERIFIED.to_string(), bool_flag(user.is_verified));
        row.insert(
            columns::SUBSCRIBED.to_string(),
            bool_flag(user.has_subscription),
        );
        for day in user.availability.iter().flatten() {
            row.insert(columns::availability(day), 1.0);
        }
        builder.push_row(id, row);
    }
    builder.build()
}

/// Overall experience and licensing. License-country indicator columns that
/// stay below [`SPARSE_COLUMN_MIN_MEAN`] are pruned; that heuristic applies
/// to these columns only.
pub fn extract_working_experience(applications: &[Application]) -> FeatureTable {
    let mut builder = TableBuilder::new();
    for application in applications {
        let id = match application.candidate_id() {
            Some(id) => id,
            None => {
                log::warn!("skipping application record without a user id");
                continue;
            }
        };
        let experience = match &application.working_experience {
            Some(experience) => experience,
            None => continue,
        };
        let mut row = HashMap::new();
        row.insert(
            columns::YEARS_OF_EXPERIENCE.to_string(),
            clip(
                experience.years_of_experience.unwrap_or(0.0),
                MAX_EXPERIENCE_YEARS,
            ),
        );
        row.insert(
            columns::HAS_LICENSE.to_string(),
            bool_flag(experience.has_license),
        );
        for country in experience.active_license_countries.iter().flatten() {
            row.insert(columns::license_country(country), 1.0);
        }
        builder.push_row(id, row);
    }
    let mut table = builder.build();
    table.prune_sparse(columns::LICENSE_COUNTRY_PREFIX, SPARSE_COLUMN_MIN_MEAN);
    table
}

/// Province/city one-hots, a relocation flag, and a city popularity score
/// computed over each candidate's primary (first) city preference.
pub fn extract_location_preferences(applications: &[Application]) -> FeatureTable {
    let mut rows = Vec::new();
    let mut primary_cities = Vec::new();
    for application in applications {
        let id = match application.candidate_id() {
            Some(id) => id,
            None => {
                log::warn!("skipping application record without a user id");
                continue;
            }
        };
        let preferences = match &application.location_preferences {
            Some(preferences) => preferences,
            None => continue,
        };
        let mut row = HashMap::new();
        let mut primary_city = None;
        for preference in preferences {
            if let Some(province) = &preference.province {
                row.insert(columns::province(province), 1.0);
            }
            if let Some(city) = &preference.city {
                let city = correct_city(city);
                row.insert(columns::city(&city), 1.0);
                if primary_city.is_none() {
                    primary_city = Some(city);
                }
            }
            if preference.available_to_relocate.unwrap_or(false) {
                row.insert(columns::RELOCATION.to_string(), 1.0);
            }
        }
        row.entry(columns::RELOCATION.to_string()).or_insert(0.0);
        primary_cities.push(primary_city);
        rows.push((id, row));
    }

    let scores = popularity_scores(&primary_cities);
    let mut builder = TableBuilder::new();
    for ((id, mut row), score) in rows.into_iter().zip(scores) {
        row.insert(columns::CITY_POPULARITY.to_string(), score);
        builder.push_row(id, row);
    }
    builder.build()
}

/// Per-specialty years of experience, clipped to [`MAX_SPECIALTY_YEARS`].
pub fn extract_specialties(applications: &[Application]) -> FeatureTable {
    let mut builder = TableBuilder::new();
    for application in applications {
        let id = match application.candidate_id() {
            Some(id) => id,
            None => {
                log::warn!("skipping application record without a user id");
                continue;
            }
        };
        let specialties = match &application.specialties_requirements {
            Some(specialties) => specialties,
            None => continue,
        };
        let mut row = HashMap::new();
        for specialty in specialties {
            let name = match &specialty.name {
                Some(name) => name,
                None => continue,
            };
            row.insert(
                columns::specialty(name),
                clip(specialty.years.unwrap_or(0.0), MAX_SPECIALTY_YEARS),
            );
        }
        builder.push_row(id, row);
    }
    builder.build()
}

/// Ordinal fluency per common language; all other languages fold into the
/// aggregate `OthersLanguages` column at their maximum level.
pub fn extract_languages(applications: &[Application]) -> FeatureTable {
    let mut builder = TableBuilder::new();
    for application in applications {
        let id = match application.candidate_id() {
            Some(id) => id,
            None => {
                log::warn!("skipping application record without a user id");
                continue;
            }
        };
        let languages = match &application.languages {
            Some(languages) => languages,
            None => continue,
        };
        builder.push_row(id, language_row(languages.iter()));
    }
    builder.build()
}

/// Certification indicators collected across all education entries.
pub fn extract_certifications(applications: &[Application]) -> FeatureTable {
    let mut builder = TableBuilder::new();
    for application in applications {
        let id = match application.candidate_id() {
            Some(id) => id,
            None => {
                log::warn!("skipping application record without a user id");
                continue;
            }
        };
        let education = match &application.education {
            Some(education) => education,
            None => continue,
        };
        let mut row = HashMap::new();
        for entry in education {
            for certification in entry.certifications.iter().flatten() {
                row.insert(columns::certification(certification), 1.0);
            }
        }
        builder.push_row(id, row);
    }
    builder.build()
}
