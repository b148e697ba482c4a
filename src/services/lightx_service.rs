use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::env;

use crate::services::fallback::ProviderError;

const LIGHTX_BASE_URL: &str = "https://api.lightxeditor.com";

// LightX error codes worth distinguishing.
const CODE_INVALID_HUMAN_PORTRAIT: i64 = 5047;
const CODE_GENERIC_FAILURE: i64 = 1000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackgroundGeneratorRequest<'a> {
    image_url: &'a str,
    style_image_url: &'a str,
    text_prompt: &'a str,
}

/// Client for the image-enhancement provider's background-generator
/// endpoint. `LIGHTX_DEMO_MODE=true` keeps the endpoint responsive without
/// spending credits; callers check [`demo_mode`](Self::demo_mode).
#[derive(Clone)]
pub struct LightXService {
    client: Client,
    api_key: String,
    demo_mode: bool,
}

impl LightXService {
    pub fn new() -> Result<Self, ProviderError> {
        let api_key = env::var("LIGHTX_API_KEY")
            .map_err(|_| ProviderError::Unavailable("LIGHTX_API_KEY not set".to_string()))?;
        let demo_mode = env::var("LIGHTX_DEMO_MODE")
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            client: Client::new(),
            api_key,
            demo_mode,
        })
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Restyle `image_url` according to `prompt`, using `style_image_url`
    /// as the style reference. Returns the generated image URLs.
    pub async fn generate_background(
        &self,
        image_url: &str,
        style_image_url: &str,
        prompt: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let request = BackgroundGeneratorRequest {
            image_url,
            style_image_url,
            text_prompt: prompt,
        };

        let response = self
            .client
            .post(format!(
                "{}/external/api/v1/background-generator",
                LIGHTX_BASE_URL
            ))
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: Value = response.json().await?;

        if result.get("status").and_then(Value::as_str) == Some("FAIL") {
            let code = result.get("statusCode").and_then(Value::as_i64);
            let description = result
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string();
            return Err(match code {
                Some(CODE_INVALID_HUMAN_PORTRAIT) => ProviderError::Fatal(
                    "No face detected in the image. The enhancer works best with human portraits."
                        .to_string(),
                ),
                Some(CODE_GENERIC_FAILURE) => ProviderError::Empty(format!(
                    "image enhancer could not process this image: {}",
                    description
                )),
                _ => ProviderError::Empty(format!("image enhancer error: {}", description)),
            });
        }

        let urls = extract_image_urls(&result);
        if urls.is_empty() {
            return Err(ProviderError::Empty(
                "no image URLs in enhancer response".to_string(),
            ));
        }
        Ok(urls)
    }
}

// The response layout varies between `images`, `data.images` and a bare
// `imageUrl` field.
fn extract_image_urls(result: &Value) -> Vec<String> {
    let images = result
        .get("images")
        .or_else(|| result.get("data").and_then(|data| data.get("images")));

    if let Some(items) = images.and_then(Value::as_array) {
        return items
            .iter()
            .filter_map(|item| {
                item.get("url")
                    .or_else(|| item.get("imageUrl"))
                    .and_then(Value::as_str)
            })
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();
    }

    result
        .get("imageUrl")
        .or_else(|| result.get("url"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(|url| vec![url.to_string()])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_urls_from_images_array() {
        let result = json!({"images": [{"url": "https://a"}, {"imageUrl": "https://b"}]});
        assert_eq!(extract_image_urls(&result), vec!["https://a", "https://b"]);
    }

    #[test]
    fn extracts_urls_from_nested_data() {
        let result = json!({"data": {"images": [{"url": "https://c"}]}});
        assert_eq!(extract_image_urls(&result), vec!["https://c"]);
    }

    #[test]
    fn extracts_single_image_url_field() {
        let result = json!({"imageUrl": "https://d"});
        assert_eq!(extract_image_urls(&result), vec!["https://d"]);
    }

    #[test]
    fn empty_when_no_urls_present() {
        let result = json!({"status": "OK"});
        assert!(extract_image_urls(&result).is_empty());
    }
}
