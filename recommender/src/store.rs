//! Trait seams between the query layer and its collaborators.

use std::error::Error;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::artifact::SimilarityArtifact;
use crate::recommend::JobSummary;

/// Versioned persistence for computed similarity artifacts.
///
/// Implementations append a new version per save and never mutate an
/// existing one, so `load_latest` always observes a fully written version
/// or none at all.
#[async_trait]
pub trait SimilarityStore {
    type E: Error + Send + Sync + 'static;

    /// Persists a new version and returns its creation timestamp.
    async fn save(&self, artifact: &SimilarityArtifact) -> Result<DateTime<Utc>, Self::E>;

    /// The version with the greatest creation timestamp, or `None` when
    /// nothing has been computed yet.
    async fn load_latest(&self) -> Result<Option<SimilarityArtifact>, Self::E>;
}

/// Keyed lookup of display data for recommended jobs.
#[async_trait]
pub trait JobCatalog {
    type E: Error + Send + Sync + 'static;

    /// Fetches summaries for the given job ids. Ids unknown to the catalog
    /// are simply absent from the result.
    async fn job_summaries(&self, ids: &[String]) -> Result<Vec<JobSummary>, Self::E>;
}
