//! Job-side extractors, one per comparable aspect of a job posting.
//!
//! Unlike the candidate side, every job with an id yields a row in every
//! aspect table; a missing sub-list just means "nothing required" and
//! defaults to zeros. The three tables scan the same slice in the same
//! order, so the composer can merge them by row position.

use std::collections::HashMap;

use crate::clean::correct_city;
use crate::columns;
use crate::extract::{bool_flag, clip, language_row, MAX_SPECIALTY_YEARS};
use crate::records::Job;
use crate::table::{FeatureTable, TableBuilder};

/// Required years per specialty, with `otherSpecialties` folded in.
pub fn extract_job_specialties(jobs: &[Job]) -> FeatureTable {
    let mut builder = TableBuilder::new();
    for job in jobs {
        let id = match job.id_string() {
            Some(id) => id,
            None => {
                log::warn!("skipping job record without an id");
                continue;
            }
        };
        let mut row = HashMap::new();
        let specialties = job
            .specialties
            .iter()
            .flatten()
            .chain(job.other_specialties.iter().flatten());
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

/// Required fluency per common language; rare required languages aggregate
/// into `OthersLanguages`, mirroring the candidate encoding.
pub fn extract_job_languages(jobs: &[Job]) -> FeatureTable {
    let mut builder = TableBuilder::new();
    for job in jobs {
        let id = match job.id_string() {
            Some(id) => id,
            None => {
                log::warn!("skipping job record without an id");
                continue;
            }
        };
        builder.push_row(id, language_row(job.required_language.iter().flatten()));
    }
    builder.build()
}

/// Province/city one-hots and the relocation-availability flag.
pub fn extract_job_locations(jobs: &[Job]) -> FeatureTable {
    let mut builder = TableBuilder::new();
    for job in jobs {
        let id = match job.id_string() {
            Some(id) => id,
            None => {
                log::warn!("skipping job record without an id");
                continue;
            }
        };
        let mut row = HashMap::new();
        if let Some(province) = &job.province {
            row.insert(columns::province(province), 1.0);
        }
        if let Some(city) = &job.city {
            row.insert(columns::city(&correct_city(city)), 1.0);
        }
        row.insert(
            columns::RELOCATION.to_string(),
            bool_flag(job.available_to_relocate),
        );
        builder.push_row(id, row);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{LanguageSkill, SpecialtyExperience};
    use mongodb::bson::oid::ObjectId;

    fn job(id: Option<ObjectId>) -> Job {
        Job {
            id,
            title: Some("Registered Nurse".into()),
            slug: None,
            company_name: None,
            company_logo: None,
            salary_range: None,
            job_type: None,
            experience_years: None,
            city: None,
            location: None,
            province: None,
            owner: None,
            status: None,
            available_to_relocate: None,
            specialties: None,
            other_specialties: None,
            required_language: None,
        }
    }

    #[test]
    fn other_specialties_fold_into_the_same_prefix() {
        let mut posting = job(Some(ObjectId::new()));
        posting.specialties = Some(vec![SpecialtyExperience {
            name: Some("ICU".into()),
            years: Some(2.0),
        }]);
        posting.other_specialties = Some(vec![SpecialtyExperience {
            name: Some("Dialysis".into()),
            years: Some(30.0),
        }]);

        let table = extract_job_specialties(&[posting]);
        assert_eq!(table.column("specialties_icu"), Some(&[2.0][..]));
        assert_eq!(
            table.column("specialties_dialysis"),
            Some(&[MAX_SPECIALTY_YEARS][..])
        );
    }

    #[test]
    fn jobs_without_requirements_still_yield_rows() {
        let table = extract_job_specialties(&[job(Some(ObjectId::new()))]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn id_less_jobs_are_skipped_in_every_aspect_table() {
        let jobs = vec![job(None), job(Some(ObjectId::new()))];
        assert_eq!(extract_job_specialties(&jobs).len(), 1);
        assert_eq!(extract_job_languages(&jobs).len(), 1);
        assert_eq!(extract_job_locations(&jobs).len(), 1);
    }

    #[test]
    fn required_languages_use_the_candidate_encoding() {
        let mut posting = job(Some(ObjectId::new()));
        posting.required_language = Some(vec![
            LanguageSkill {
                name: Some("French".into()),
                level: Some("Intermediate".into()),
            },
            LanguageSkill {
                name: Some("Mandarin".into()),
                level: Some("Fluent".into()),
            },
        ]);

        let table = extract_job_languages(&[posting]);
        assert_eq!(table.column("language_french"), Some(&[2.0][..]));
        assert_eq!(table.column(columns::OTHER_LANGUAGES), Some(&[3.0][..]));
    }

    #[test]
    fn locations_one_hot_with_typo_correction() {
        let mut posting = job(Some(ObjectId::new()));
        posting.province = Some("Ontario".into());
        posting.city = Some("Missisauga".into());
        posting.available_to_relocate = Some(true);

        let table = extract_job_locations(&[posting]);
        assert_eq!(table.column("interestedProvince_ontario"), Some(&[1.0][..]));
        assert_eq!(table.column("interestedCity_mississauga"), Some(&[1.0][..]));
        assert_eq!(table.column(columns::RELOCATION), Some(&[1.0][..]));
    }
}
