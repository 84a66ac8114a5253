//! PlantCare AI Common Library
//!
//! Types and utilities shared between the CLI and the backend proxy

pub mod error;
pub mod parser;
pub mod schema;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use parser::extract_json;
pub use schema::{
    decode, FieldKind, ResultSchema, CAPTION_SCHEMA, CROP_INSIGHT_SCHEMA, DIAGNOSIS_SCHEMA,
    ENCYCLOPEDIA_SCHEMA, FARMING_ADVICE_SCHEMA,
};
pub use store::{CappedList, HasId, MAX_COMMUNITY_POSTS, MAX_SCAN_HISTORY};
pub use types::{
    CaptionResult, CommunityPost, Coordinates, CropInsight, EncyclopediaEntry, FarmingAdvice,
    PlantDiagnosis, ScanRecord, StatusTag, TranscriptCorrection, WeatherData,
};
