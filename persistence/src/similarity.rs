//! Versioned MongoDB persistence for similarity artifacts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::spec::BinarySubtype;
use mongodb::bson::{doc, oid::ObjectId, Binary};
use mongodb::options::{FindOneOptions, FindOptions};
use mongodb::Database;
use recommender::artifact::ArtifactError;
use recommender::codec::{decode_matrix, encode_matrix, CodecError};
use recommender::{SimilarityArtifact, SimilarityStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SIMILARITY_COLLECTION: &str = "similarity-matrices";

/// One computed similarity version. Documents are append-only: each batch
/// run inserts a new one and nothing ever mutates or deletes old versions,
/// so a reader sees either the previous latest or the new one in full.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityMatrixRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    matrix: Binary,
    job_ids: Vec<String>,
    candidate_ids: Vec<String>,
}

/// Lean projection used when only the version key is needed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionStamp {
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("stored matrix blob is invalid: {0}")]
    Codec(#[from] CodecError),
    #[error("stored artifact is inconsistent: {0}")]
    Artifact(#[from] ArtifactError),
    #[error("no similarity version created at {0}")]
    VersionNotFound(DateTime<Utc>),
}

pub struct MongoSimilarityStore {
    collection: mongodb::Collection<SimilarityMatrixRecord>,
}

impl MongoSimilarityStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(SIMILARITY_COLLECTION),
        }
    }

    /// Creation timestamps of every retained version, newest first.
    pub async fn list_versions(&self) -> Result<Vec<DateTime<Utc>>, StoreError> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .projection(doc! { "createdAt": 1 })
            .build();
        let stamps: Vec<VersionStamp> = self
            .collection
            .clone_with_type::<VersionStamp>()
            .find(None, options)
            .await?
            .try_collect()
            .await?;
        Ok(stamps.into_iter().map(|stamp| stamp.created_at).collect())
    }

    /// Loads one retained version by its creation timestamp.
    pub async fn load_version(
        &self,
        created_at: DateTime<Utc>,
    ) -> Result<SimilarityArtifact, StoreError> {
        let filter = doc! { "createdAt": mongodb::bson::DateTime::from_chrono(created_at) };
        let record = self
            .collection
            .find_one(filter, None)
            .await?
            .ok_or(StoreError::VersionNotFound(created_at))?;
        decode_record(record)
    }
}

fn decode_record(record: SimilarityMatrixRecord) -> Result<SimilarityArtifact, StoreError> {
    let matrix = decode_matrix(&record.matrix.bytes)?;
    Ok(SimilarityArtifact::new(
        matrix,
        record.job_ids,
        record.candidate_ids,
    )?)
}

#[async_trait]
impl SimilarityStore for MongoSimilarityStore {
    type E = StoreError;

    async fn save(&self, artifact: &SimilarityArtifact) -> Result<DateTime<Utc>, StoreError> {
        // bson datetimes are millisecond precision; stamping through bson
        // keeps the returned value equal to what a later load will read
        let created_at = mongodb::bson::DateTime::now().to_chrono();
        let record = SimilarityMatrixRecord {
            id: None,
            created_at,
            matrix: Binary {
                subtype: BinarySubtype::Generic,
                bytes: encode_matrix(artifact.matrix()),
            },
            job_ids: artifact.job_ids().to_vec(),
            candidate_ids: artifact.candidate_ids().to_vec(),
        };
        self.collection.insert_one(&record, None).await?;
        log::info!(
            "persisted similarity version {} ({} jobs x {} candidates)",
            created_at,
            artifact.job_ids().len(),
            artifact.candidate_ids().len()
        );
        Ok(created_at)
    }

    async fn load_latest(&self) -> Result<Option<SimilarityArtifact>, StoreError> {
        let options = FindOneOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .build();
        match self.collection.find_one(None, options).await? {
            Some(record) => Ok(Some(decode_record(record)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;
    use ndarray::array;

    fn record() -> SimilarityMatrixRecord {
        let artifact = SimilarityArtifact::new(
            array![[1.0, 0.5], [0.0, 0.25]],
            vec!["j1".into(), "j2".into()],
            vec!["c1".into(), "c2".into()],
        )
        .unwrap();
        SimilarityMatrixRecord {
            id: None,
            created_at: mongodb::bson::DateTime::now().to_chrono(),
            matrix: Binary {
                subtype: BinarySubtype::Generic,
                bytes: encode_matrix(artifact.matrix()),
            },
            job_ids: artifact.job_ids().to_vec(),
            candidate_ids: artifact.candidate_ids().to_vec(),
        }
    }

    #[test]
    fn records_serialize_with_bson_native_types() {
        let document = mongodb::bson::to_document(&record()).unwrap();
        assert!(matches!(document.get("createdAt"), Some(Bson::DateTime(_))));
        assert!(matches!(document.get("matrix"), Some(Bson::Binary(_))));
        assert!(document.get("_id").is_none());
    }

    #[test]
    fn stored_records_decode_back_into_an_aligned_artifact() {
        let document = mongodb::bson::to_document(&record()).unwrap();
        let roundtripped: SimilarityMatrixRecord =
            mongodb::bson::from_document(document).unwrap();

        let artifact = decode_record(roundtripped).unwrap();
        assert_eq!(artifact.job_ids(), &["j1".to_string(), "j2".to_string()]);
        assert_eq!(artifact.matrix()[[0, 1]], 0.5);
    }

    #[test]
    fn corrupt_blobs_surface_codec_errors_not_panics() {
        let mut bad = record();
        bad.matrix.bytes.truncate(10);
        assert!(matches!(decode_record(bad), Err(StoreError::Codec(_))));
    }
}
