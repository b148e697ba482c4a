//! Request bodies for the prompt-driven travel-planner endpoints. The
//! frontend owns the prompts; these models just carry them.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ContinentGenerationRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryGenerationRequest {
    pub continent: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityGenerationRequest {
    pub country: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaGenerationRequest {
    pub city: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryGenerationRequest {
    pub destination_id: String,
    #[serde(default)]
    pub preferences: Value,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationRequest {
    pub destination_id: String,
    pub user_photo_url: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsGenerationRequest {
    #[serde(default)]
    pub preferences: Value,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationFilterRequest {
    #[serde(default)]
    pub criteria: Value,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationImagesRequest {
    pub destinations: Vec<Value>,
    pub prompt: String,
}

fn default_duration() -> String {
    "7 days".to_string()
}

fn default_budget_level() -> String {
    "mid-range".to_string()
}

fn default_travelers() -> u32 {
    2
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailedItineraryRequest {
    pub destination: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default = "default_budget_level")]
    pub budget_level: String,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
}
