//! Read-only access to the raw record collections.

use async_trait::async_trait;
use feature_pipeline::records::{Application, Job, User};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Database;
use recommender::{JobCatalog, JobSummary};

pub const USERS_COLLECTION: &str = "users";
pub const APPLICATIONS_COLLECTION: &str = "applications";
pub const JOBS_COLLECTION: &str = "jobs";

/// Full-scan reader over the three raw collections plus keyed job lookup.
/// The pipeline never writes back to any of them.
#[derive(Clone)]
pub struct RecordSource {
    db: Database,
}

impl RecordSource {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn load_users(&self) -> Result<Vec<User>, mongodb::error::Error> {
        self.db
            .collection::<User>(USERS_COLLECTION)
            .find(None, None)
            .await?
            .try_collect()
            .await
    }

    pub async fn load_applications(&self) -> Result<Vec<Application>, mongodb::error::Error> {
        self.db
            .collection::<Application>(APPLICATIONS_COLLECTION)
            .find(None, None)
            .await?
            .try_collect()
            .await
    }

    pub async fn load_jobs(&self) -> Result<Vec<Job>, mongodb::error::Error> {
        self.db
            .collection::<Job>(JOBS_COLLECTION)
            .find(None, None)
            .await?
            .try_collect()
            .await
    }
}

#[async_trait]
impl JobCatalog for RecordSource {
    type E = mongodb::error::Error;

    async fn job_summaries(&self, ids: &[String]) -> Result<Vec<JobSummary>, Self::E> {
        // ids that do not parse back into object ids cannot exist in the
        // collection; they fall under the same missing-from-catalog policy
        let object_ids: Vec<ObjectId> = ids
            .iter()
            .filter_map(|id| ObjectId::parse_str(id).ok())
            .collect();
        let jobs: Vec<Job> = self
            .db
            .collection::<Job>(JOBS_COLLECTION)
            .find(doc! { "_id": { "$in": object_ids } }, None)
            .await?
            .try_collect()
            .await?;
        Ok(jobs.into_iter().filter_map(job_summary).collect())
    }
}

fn job_summary(job: Job) -> Option<JobSummary> {
    let id = job.id?.to_hex();
    Some(JobSummary {
        id,
        title: job.title,
        slug: job.slug,
        company_name: job.company_name,
        company_logo: job.company_logo,
        salary_range: job.salary_range,
        job_type: job.job_type,
        experience_years: job.experience_years,
        city: job.city,
        location: job.location,
        owner: job.owner.as_ref().map(|o| o.to_hex()),
    })
}
