pub mod similarity;
pub mod source;

pub use similarity::{MongoSimilarityStore, SimilarityMatrixRecord, StoreError};
pub use source::RecordSource;

pub async fn connect(
    mongodb_connection_url: &str,
    database_name: &str,
) -> Result<mongodb::Database, mongodb::error::Error> {
    let client = mongodb::Client::with_uri_str(mongodb_connection_url).await?;
    Ok(client.database(database_name))
}
