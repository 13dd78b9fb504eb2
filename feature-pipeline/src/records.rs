//! Raw document schemas for the three source collections.
//!
//! Source documents are sparse: any key can be missing. Every field is
//! therefore `Option`al and defaulting happens in the extractors, never
//! during deserialization.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub is_verified: Option<bool>,
    pub has_subscription: Option<bool>,
    /// Weekday names the applicant marked themselves available on.
    pub availability: Option<Vec<String>>,
}

impl User {
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|o| o.to_hex())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// The applicant this application belongs to. Candidate feature rows
    /// are keyed by this id, not by the application id.
    pub user_id: Option<ObjectId>,
    pub working_experience: Option<WorkingExperience>,
    pub location_preferences: Option<Vec<LocationPreference>>,
    pub specialties_requirements: Option<Vec<SpecialtyExperience>>,
    pub languages: Option<Vec<LanguageSkill>>,
    pub education: Option<Vec<Education>>,
}

impl Application {
    pub fn candidate_id(&self) -> Option<String> {
        self.user_id.as_ref().map(|o| o.to_hex())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingExperience {
    pub years_of_experience: Option<f64>,
    pub has_license: Option<bool>,
    pub active_license_countries: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPreference {
    pub province: Option<String>,
    pub city: Option<String>,
    pub available_to_relocate: Option<bool>,
}

/// Shared shape for "<name> with a number of years" entries, used both for
/// a candidate's experience per specialty and a job's required years.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyExperience {
    pub name: Option<String>,
    pub years: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    pub name: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: Option<String>,
    pub certifications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub salary_range: Option<(u32, u32)>,
    pub job_type: Option<String>,
    pub experience_years: Option<f64>,
    pub city: Option<String>,
    pub location: Option<String>,
    pub province: Option<String>,
    pub owner: Option<ObjectId>,
    pub status: Option<String>,
    pub available_to_relocate: Option<bool>,
    pub specialties: Option<Vec<SpecialtyExperience>>,
    pub other_specialties: Option<Vec<SpecialtyExperience>>,
    pub required_language: Option<Vec<LanguageSkill>>,
}

impl Job {
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|o| o.to_hex())
    }
}
