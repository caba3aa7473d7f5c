use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A phone-verified user of the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    // ---
    pub id: Uuid,
    pub name: String,

    /// E.164 phone number, unique across users
    pub phone_number: String,

    /// Flips to true once, after the user's analysis completes
    pub has_used_service: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    // ---
    pub fn new(name: String, phone_number: String) -> Self {
        // ---
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            phone_number,
            has_used_service: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One stored analysis in a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    // ---
    pub id: Uuid,
    pub user_id: Uuid,

    /// Client-supplied reference to the analysed image (URL or data URL)
    pub image_ref: String,

    /// Serialized `SkinAnalysisData` JSON
    pub analysis_data: String,

    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    // ---
    pub fn new(user_id: Uuid, image_ref: String, analysis_data: String) -> Self {
        // ---
        Self {
            id: Uuid::new_v4(),
            user_id,
            image_ref,
            analysis_data,
            created_at: Utc::now(),
        }
    }
}
