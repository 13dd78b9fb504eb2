//! Merges per-source extractor outputs into the two unified feature tables.

use crate::extract::{
    extract_certifications, extract_job_languages, extract_job_locations,
    extract_job_specialties, extract_languages, extract_location_preferences,
    extract_specialties, extract_user_features, extract_working_experience,
};
use crate::records::{Application, Job, User};
use crate::table::FeatureTable;
use crate::PipelineError;

/// Builds the unified candidate table through sequential inner joins on the
/// candidate id. A candidate missing any sub-table (no user record, no
/// working experience, no location preferences, no specialties, no
/// languages, no education) is excluded entirely. Zero surviving rows
/// abort the batch.
pub fn compose_candidate_table(
    users: &[User],
    applications: &[Application],
) -> Result<FeatureTable, PipelineError> {
    let user_features = extract_user_features(users);
    log::info!("extracted features for {} users", user_features.len());

    let table = user_features
        .inner_join(&extract_working_experience(applications))?
        .inner_join(&extract_location_preferences(applications))?
        .inner_join(&extract_specialties(applications))?
        .inner_join(&extract_languages(applications))?
        .inner_join(&extract_certifications(applications))?;

    if table.is_empty() {
        return Err(PipelineError::NoUsableRows("candidate"));
    }
    log::info!(
        "composed candidate table: {} rows, {} columns",
        table.len(),
        table.column_count()
    );
    Ok(table)
}

/// Builds the unified job table by positionally merging the per-aspect
/// tables, which all scan the same job slice in the same order.
pub fn compose_job_table(jobs: &[Job]) -> Result<FeatureTable, PipelineError> {
    let table = extract_job_specialties(jobs)
        .merge_by_position(&extract_job_languages(jobs))?
        .merge_by_position(&extract_job_locations(jobs))?;

    if table.is_empty() {
        return Err(PipelineError::NoUsableRows("job"));
    }
    log::info!(
        "composed job table: {} rows, {} columns",
        table.len(),
        table.column_count()
    );
    Ok(table)
}
