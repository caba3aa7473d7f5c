mod inference;
mod kv_store;
mod metrics;
mod models;
mod repository;
mod scorer;
mod skin;
mod sms;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Persistence abstractions and the records they hold
pub use kv_store::{KeyValueStore, KeyValueStorePtr};
pub use models::{AnalysisRecord, User};
pub use repository::{MarkUsed, Repository, RepositoryPtr};

// External collaborators
pub use inference::{
    BoundingBox, ImageClassification, InferenceClient, InferencePtr, ObjectDetection,
};
pub use sms::{SmsSender, SmsSenderPtr};

// Skin analysis vocabulary
pub use scorer::{ConditionScorer, ConditionScorerPtr, Signals};
pub use skin::{
    Condition, FaceArea, Recommendation, RecommendationKind, SkinAnalysisData, SkinConcern,
    SkinRegion, SkinType,
};
