//! The query layer: ranked recommendations from the latest stored matrix.

use std::collections::HashMap;
use std::error::Error;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::artifact::SimilarityArtifact;
use crate::ranking::top_n_indices;
use crate::store::{JobCatalog, SimilarityStore};

#[derive(Debug, ThisError)]
pub enum RecommendError {
    #[error("candidate id not found: '{0}'")]
    CandidateNotFound(String),
    #[error("job id not found: '{0}'")]
    JobNotFound(String),
    #[error("no similarity data has been computed yet")]
    NoSimilarityData,
    #[error("storage failure: {0}")]
    Storage(#[source] Box<dyn Error + Send + Sync>),
}

impl RecommendError {
    fn storage<E: Error + Send + Sync + 'static>(source: E) -> Self {
        Self::Storage(Box::new(source))
    }
}

/// Display fields for a recommended job, fetched from the raw job store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: String,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub salary_range: Option<(u32, u32)>,
    pub job_type: Option<String>,
    pub experience_years: Option<f64>,
    pub city: Option<String>,
    pub location: Option<String>,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendedJob {
    pub job: JobSummary,
    pub score: f64,
}

/// Read-only queries against the latest persisted similarity version.
/// Recomputation is a separate batch concern; nothing here ever writes.
pub struct JobRecommender<S, C> {
    store: S,
    catalog: C,
}

impl<S, C> JobRecommender<S, C>
where
    S: SimilarityStore + Sync,
    C: JobCatalog + Sync,
{
    pub fn new(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    async fn latest(&self) -> Result<SimilarityArtifact, RecommendError> {
        self.store
            .load_latest()
            .await
            .map_err(RecommendError::storage)?
            .ok_or(RecommendError::NoSimilarityData)
    }

    /// Ranked job summaries for one candidate. Jobs present in the
    /// similarity index but no longer in the raw store are dropped from
    /// the result instead of failing the request.
    pub async fn recommend_jobs_for_candidate(
        &self,
        candidate_id: &str,
        top_n: usize,
    ) -> Result<Vec<RecommendedJob>, RecommendError> {
        let artifact = self.latest().await?;
        let column = artifact
            .candidate_index(candidate_id)
            .ok_or_else(|| RecommendError::CandidateNotFound(candidate_id.to_string()))?;

        let scores = artifact.candidate_scores(column);
        let ranked = top_n_indices(&scores, top_n);
        let ids: Vec<String> = ranked
            .iter()
            .map(|&(row, _)| artifact.job_ids()[row].clone())
            .collect();

        let summaries = self
            .catalog
            .job_summaries(&ids)
            .await
            .map_err(RecommendError::storage)?;
        let by_id: HashMap<&str, &JobSummary> =
            summaries.iter().map(|summary| (summary.id.as_str(), summary)).collect();

        let mut results = Vec::with_capacity(ranked.len());
        for ((_, score), id) in ranked.iter().zip(&ids) {
            match by_id.get(id.as_str()) {
                Some(summary) => results.push(RecommendedJob {
                    job: (*summary).clone(),
                    score: *score,
                }),
                None => log::warn!(
                    "job {} is in the similarity index but missing from the job store, dropping it",
                    id
                ),
            }
        }
        Ok(results)
    }

    /// Ranked (candidate id, score) pairs for one job.
    pub async fn recommend_candidates_for_job(
        &self,
        job_id: &str,
        top_n: usize,
    ) -> Result<Vec<(String, f64)>, RecommendError> {
        let artifact = self.latest().await?;
        let row = artifact
            .job_index(job_id)
            .ok_or_else(|| RecommendError::JobNotFound(job_id.to_string()))?;

        let scores = artifact.job_scores(row);
        Ok(top_n_indices(&scores, top_n)
            .into_iter()
            .map(|(column, score)| (artifact.candidate_ids()[column].clone(), score))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use ndarray::array;
    use std::convert::Infallible;

    struct FixedStore(Option<SimilarityArtifact>);

    #[async_trait]
    impl SimilarityStore for FixedStore {
        type E = Infallible;

        async fn save(&self, _artifact: &SimilarityArtifact) -> Result<DateTime<Utc>, Infallible> {
            Ok(Utc::now())
        }

        async fn load_latest(&self) -> Result<Option<SimilarityArtifact>, Infallible> {
            Ok(self.0.clone())
        }
    }

    struct FixedCatalog(Vec<JobSummary>);

    #[async_trait]
    impl JobCatalog for FixedCatalog {
        type E = Infallible;

        async fn job_summaries(&self, ids: &[String]) -> Result<Vec<JobSummary>, Infallible> {
            Ok(self
                .0
                .iter()
                .filter(|summary| ids.contains(&summary.id))
                .cloned()
                .collect())
        }
    }

    fn summary(id: &str, title: &str) -> JobSummary {
        JobSummary {
            id: id.to_string(),
            title: Some(title.to_string()),
            slug: None,
            company_name: None,
            company_logo: None,
            salary_range: None,
            job_type: None,
            experience_years: None,
            city: None,
            location: None,
            owner: None,
        }
    }

    /// J1=[1,1], J2=[1,0], J3=[0,1] vs C1=[1,1], C2=[1,0].
    fn reference_artifact() -> SimilarityArtifact {
        let root_half = 1.0 / 2.0_f64.sqrt();
        SimilarityArtifact::new(
            array![[1.0, root_half], [root_half, 1.0], [root_half, 0.0]],
            vec!["j1".into(), "j2".into(), "j3".into()],
            vec!["c1".into(), "c2".into()],
        )
        .unwrap()
    }

    fn recommender(
        artifact: Option<SimilarityArtifact>,
        catalog: Vec<JobSummary>,
    ) -> JobRecommender<FixedStore, FixedCatalog> {
        JobRecommender::new(FixedStore(artifact), FixedCatalog(catalog))
    }

    fn full_catalog() -> Vec<JobSummary> {
        vec![
            summary("j1", "ICU Nurse"),
            summary("j2", "Dialysis Nurse"),
            summary("j3", "Travel Nurse"),
        ]
    }

    #[tokio::test]
    async fn the_best_job_for_the_reference_candidate_is_j1() {
        let recommender = recommender(Some(reference_artifact()), full_catalog());
        let results = recommender
            .recommend_jobs_for_candidate("c1", 1)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job.id, "j1");
        assert!((results[0].score - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn scores_come_back_sorted_descending() {
        let recommender = recommender(Some(reference_artifact()), full_catalog());
        let results = recommender
            .recommend_jobs_for_candidate("c1", 3)
            .await
            .unwrap();

        let scores: Vec<f64> = results.iter().map(|r| r.score).collect();
        assert_eq!(results[0].job.id, "j1");
        assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[tokio::test]
    async fn both_query_directions_agree_on_a_pair() {
        let recommender = recommender(Some(reference_artifact()), full_catalog());

        let jobs = recommender
            .recommend_jobs_for_candidate("c1", 3)
            .await
            .unwrap();
        let from_candidate_side = jobs
            .iter()
            .find(|r| r.job.id == "j2")
            .map(|r| r.score)
            .unwrap();

        let candidates = recommender
            .recommend_candidates_for_job("j2", 2)
            .await
            .unwrap();
        let from_job_side = candidates
            .iter()
            .find(|(id, _)| id == "c1")
            .map(|(_, score)| *score)
            .unwrap();

        assert_eq!(from_candidate_side, from_job_side);
    }

    #[tokio::test]
    async fn unknown_ids_surface_the_distinct_not_found_error() {
        let recommender = recommender(Some(reference_artifact()), full_catalog());

        let candidate = recommender
            .recommend_jobs_for_candidate("nobody", 3)
            .await;
        assert!(matches!(
            candidate,
            Err(RecommendError::CandidateNotFound(id)) if id == "nobody"
        ));

        let job = recommender.recommend_candidates_for_job("nothing", 3).await;
        assert!(matches!(
            job,
            Err(RecommendError::JobNotFound(id)) if id == "nothing"
        ));
    }

    #[tokio::test]
    async fn an_empty_store_is_not_a_not_found_condition() {
        let recommender = recommender(None, full_catalog());
        let result = recommender.recommend_jobs_for_candidate("c1", 3).await;
        assert!(matches!(result, Err(RecommendError::NoSimilarityData)));
    }

    #[tokio::test]
    async fn jobs_missing_from_the_catalog_are_omitted_not_fatal() {
        let partial_catalog = vec![summary("j1", "ICU Nurse"), summary("j3", "Travel Nurse")];
        let recommender = recommender(Some(reference_artifact()), partial_catalog);

        let results = recommender
            .recommend_jobs_for_candidate("c1", 3)
            .await
            .unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.job.id.as_str()).collect();
        assert_eq!(ids, vec!["j1", "j3"]);
    }

    #[tokio::test]
    async fn candidate_ranking_for_a_job_is_ordered() {
        let recommender = recommender(Some(reference_artifact()), full_catalog());
        let results = recommender
            .recommend_candidates_for_job("j2", 2)
            .await
            .unwrap();

        assert_eq!(results[0].0, "c2");
        assert!(results[0].1 >= results[1].1);
    }
}
