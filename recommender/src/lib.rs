pub mod artifact;
pub mod codec;
pub mod ranking;
pub mod recommend;
pub mod similarity;
pub mod store;

pub use artifact::SimilarityArtifact;
pub use recommend::{JobRecommender, JobSummary, RecommendError, RecommendedJob};
pub use similarity::compute_similarity;
pub use store::{JobCatalog, SimilarityStore};
