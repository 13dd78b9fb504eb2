//! The batch entry point: raw collections in, a new similarity version out.
//!
//! Any failure aborts before the save, so a broken run never becomes the
//! latest version. Re-running is always safe: each run appends.

use std::error::Error;

use feature_pipeline::{compose_candidate_table, compose_job_table};
use persistence::{MongoSimilarityStore, RecordSource};
use recommender::{compute_similarity, SimilarityStore};

pub async fn run(db: mongodb::Database) -> Result<(), Box<dyn Error>> {
    let source = RecordSource::new(db.clone());
    let users = source.load_users().await?;
    log::info!("loaded {} users", users.len());
    let applications = source.load_applications().await?;
    log::info!("loaded {} applications", applications.len());
    let jobs = source.load_jobs().await?;
    log::info!("loaded {} jobs", jobs.len());

    let candidate_table = compose_candidate_table(&users, &applications)?;
    let job_table = compose_job_table(&jobs)?;
    let artifact = compute_similarity(&job_table, &candidate_table)?;

    let store = MongoSimilarityStore::new(&db);
    let created_at = store.save(&artifact).await?;
    log::info!("new similarity version: {}", created_at);
    Ok(())
}
