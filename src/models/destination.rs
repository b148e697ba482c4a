use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

pub const DEFAULT_RATING: f64 = 4.5;
pub const DEFAULT_PRICE: &str = "$$";
pub const DEFAULT_BEST_TIME: &str = "Year-round";
pub const DEFAULT_HIGHLIGHTS: [&str; 4] = [
    "Local Attractions",
    "Cultural Sites",
    "Natural Beauty",
    "Local Cuisine",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub city: String,
    pub continent: String,
    pub description: String,
    pub image_url: String,
    pub rating: f64,
    pub price: String,
    #[serde(rename = "bestTime")]
    pub best_time: String,
    pub highlights: Vec<String>,
}

/// Backfill the fields the frontend requires on a provider-generated
/// destination object. Missing or non-HTTP image URLs are replaced with a
/// stock image picked deterministically from the destination name.
pub fn backfill(dest: &mut Value) {
    let name = dest
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("travel")
        .to_string();

    let obj = match dest.as_object_mut() {
        Some(obj) => obj,
        None => return,
    };

    let has_id = obj
        .get("id")
        .and_then(Value::as_str)
        .map(|id| !id.is_empty())
        .unwrap_or(false);
    if !has_id {
        obj.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
    }

    let has_image = obj
        .get("image_url")
        .and_then(Value::as_str)
        .map(|url| url.starts_with("http"))
        .unwrap_or(false);
    if !has_image {
        obj.insert(
            "image_url".to_string(),
            json!(crate::services::mock_data::destination_image_for(&name)),
        );
    }

    if !obj.contains_key("rating") {
        obj.insert("rating".to_string(), json!(DEFAULT_RATING));
    }
    if !obj.contains_key("price") {
        obj.insert("price".to_string(), json!(DEFAULT_PRICE));
    }
    if !obj.contains_key("bestTime") {
        obj.insert("bestTime".to_string(), json!(DEFAULT_BEST_TIME));
    }
    if !obj.contains_key("highlights") {
        obj.insert("highlights".to_string(), json!(DEFAULT_HIGHLIGHTS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backfill_fills_missing_fields() {
        let mut dest = json!({"name": "Lisbon"});
        backfill(&mut dest);

        assert!(!dest["id"].as_str().unwrap().is_empty());
        assert!(dest["image_url"].as_str().unwrap().starts_with("http"));
        assert_eq!(dest["rating"], json!(DEFAULT_RATING));
        assert_eq!(dest["price"], json!(DEFAULT_PRICE));
        assert_eq!(dest["bestTime"], json!(DEFAULT_BEST_TIME));
        assert_eq!(dest["highlights"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn backfill_keeps_existing_fields() {
        let mut dest = json!({
            "id": "abc",
            "name": "Kyoto",
            "image_url": "https://images.unsplash.com/photo-1545569341?w=800",
            "rating": 4.9,
        });
        backfill(&mut dest);

        assert_eq!(dest["id"], json!("abc"));
        assert_eq!(dest["rating"], json!(4.9));
        assert_eq!(
            dest["image_url"],
            json!("https://images.unsplash.com/photo-1545569341?w=800")
        );
    }

    #[test]
    fn backfill_replaces_non_http_image() {
        let mut dest = json!({"name": "Petra", "image_url": "image.jpg"});
        backfill(&mut dest);
        assert!(dest["image_url"].as_str().unwrap().starts_with("http"));
    }

    #[test]
    fn backfill_is_deterministic_per_name() {
        let mut first = json!({"name": "Marrakesh"});
        let mut second = json!({"name": "Marrakesh"});
        backfill(&mut first);
        backfill(&mut second);
        assert_eq!(first["image_url"], second["image_url"]);
    }
}
