use serde::Deserialize;

pub const AGE_GROUPS: [&str; 5] = ["18-25", "26-35", "36-50", "51-65", "65+"];
pub const GROUP_SIZES: [&str; 5] = ["solo", "couple", "family", "friends", "large-group"];
pub const TRIP_DURATIONS: [&str; 5] = ["weekend", "week", "two-weeks", "month", "long-term"];
pub const INTERESTS: [&str; 12] = [
    "romantic",
    "adventure",
    "culture",
    "relaxation",
    "food",
    "history",
    "nature",
    "shopping",
    "nightlife",
    "photography",
    "sports",
    "luxury",
];

pub const MIN_BUDGET: u32 = 500;
pub const MAX_BUDGET: u32 = 10_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    pub age_group: String,
    pub group_size: String,
    pub budget_range: u32,
    pub trip_duration: String,
    pub interests: Vec<String>,
    pub country: Option<String>,
    pub additional_notes: Option<String>,
}

impl RecommendationsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !AGE_GROUPS.contains(&self.age_group.as_str()) {
            return Err("Invalid age group".to_string());
        }
        if !GROUP_SIZES.contains(&self.group_size.as_str()) {
            return Err("Invalid group size".to_string());
        }
        if self.budget_range < MIN_BUDGET || self.budget_range > MAX_BUDGET {
            return Err("Budget must be between $500 and $10,000".to_string());
        }
        if !TRIP_DURATIONS.contains(&self.trip_duration.as_str()) {
            return Err("Invalid trip duration".to_string());
        }
        if self.interests.is_empty() {
            return Err("At least one interest must be selected".to_string());
        }
        for interest in &self.interests {
            if !INTERESTS.contains(&interest.as_str()) {
                return Err(format!("Invalid interest: {}", interest));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecommendationsRequest {
        RecommendationsRequest {
            age_group: "26-35".to_string(),
            group_size: "couple".to_string(),
            budget_range: 2500,
            trip_duration: "week".to_string(),
            interests: vec!["culture".to_string(), "food".to_string()],
            country: Some("Japan".to_string()),
            additional_notes: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_budget() {
        let mut req = request();
        req.budget_range = 400;
        assert!(req.validate().is_err());
        req.budget_range = 10_001;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_unknown_interest() {
        let mut req = request();
        req.interests = vec!["spelunking".to_string()];
        assert_eq!(
            req.validate().unwrap_err(),
            "Invalid interest: spelunking"
        );
    }

    #[test]
    fn rejects_empty_interests() {
        let mut req = request();
        req.interests.clear();
        assert_eq!(
            req.validate().unwrap_err(),
            "At least one interest must be selected"
        );
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let req: RecommendationsRequest = serde_json::from_value(serde_json::json!({
            "ageGroup": "18-25",
            "groupSize": "solo",
            "budgetRange": 800,
            "tripDuration": "weekend",
            "interests": ["adventure"],
            "additionalNotes": "first trip",
        }))
        .unwrap();
        assert_eq!(req.age_group, "18-25");
        assert_eq!(req.additional_notes.as_deref(), Some("first trip"));
    }
}
