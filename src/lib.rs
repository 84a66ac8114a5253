//! PlantCare AI
//!
//! Thin client over generative AI and weather services: photo diagnosis,
//! plant encyclopedia, crop insights, farming advice and a small community
//! feed, with a capped local history store.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod pexels;
pub mod store;
pub mod translate;
pub mod weather;
pub mod youtube;

pub use config::Config;
pub use error::{PlantCareError, Result};
pub use gemini::GeminiClient;
pub use store::LocalStore;
pub use weather::WeatherClient;
