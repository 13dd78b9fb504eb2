//! Query commands: read the latest similarity version, print JSON.

use std::error::Error;

use persistence::{MongoSimilarityStore, RecordSource};
use recommender::JobRecommender;

fn recommender(
    db: mongodb::Database,
) -> JobRecommender<MongoSimilarityStore, RecordSource> {
    JobRecommender::new(MongoSimilarityStore::new(&db), RecordSource::new(db))
}

pub async fn jobs(
    db: mongodb::Database,
    candidate_id: &str,
    top_n: usize,
) -> Result<(), Box<dyn Error>> {
    let results = recommender(db)
        .recommend_jobs_for_candidate(candidate_id, top_n)
        .await?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

pub async fn candidates(
    db: mongodb::Database,
    job_id: &str,
    top_n: usize,
) -> Result<(), Box<dyn Error>> {
    let results = recommender(db)
        .recommend_candidates_for_job(job_id, top_n)
        .await?;
    // serde_json keeps insertion order here, so the map prints ranked
    let ranked: serde_json::Map<String, serde_json::Value> = results
        .into_iter()
        .map(|(id, score)| (id, score.into()))
        .collect();
    println!("{}", serde_json::to_string_pretty(&ranked)?);
    Ok(())
}

pub async fn versions(db: mongodb::Database) -> Result<(), Box<dyn Error>> {
    let store = MongoSimilarityStore::new(&db);
    let versions = store.list_versions().await?;
    if versions.is_empty() {
        log::warn!("no similarity versions have been computed yet");
    }
    for created_at in versions {
        println!("{}", created_at);
    }
    Ok(())
}
