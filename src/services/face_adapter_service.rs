use reqwest::Client;
use serde_json::{json, Value};
use std::env;

use crate::services::fallback::ProviderError;

const FACE_ADAPTER_SPACE_URL: &str = "https://multimodalart-ip-adapter-faceid.hf.space";

const NFAA_NEGATIVE_PROMPT: &str =
    "naked, bikini, skimpy, scanty, bare skin, lingerie, swimsuit, exposed, see-through";

const FACE_STRENGTH: f64 = 1.3;
const LIKENESS_STRENGTH: f64 = 1.0;

/// Client for the hosted face-adapter space. The selfie is passed by URL;
/// the space fetches it and returns a gallery of generated images.
#[derive(Clone)]
pub struct FaceAdapterService {
    client: Client,
    token: String,
}

impl FaceAdapterService {
    pub fn new() -> Result<Self, ProviderError> {
        let token = env::var("HUGGINGFACE_TOKEN")
            .map_err(|_| ProviderError::Unavailable("HUGGINGFACE_TOKEN not set".to_string()))?;
        if token.trim().is_empty() || token.starts_with("your_") {
            return Err(ProviderError::Unavailable(
                "Hugging Face token not properly configured".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            token,
        })
    }

    /// Place the person from `selfie_url` into the scene described by
    /// `prompt`, preserving face structure.
    pub async fn generate_images(
        &self,
        selfie_url: &str,
        prompt: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let prompt = if prompt.trim().is_empty() {
            "A person enjoying a beautiful travel destination"
        } else {
            prompt
        };

        let payload = json!({
            "data": [
                [{"image": {"url": selfie_url}}],
                prompt,
                "",
                true,
                FACE_STRENGTH,
                LIKENESS_STRENGTH,
                NFAA_NEGATIVE_PROMPT,
            ]
        });

        let response = self
            .client
            .post(format!("{}/run/generate_image", FACE_ADAPTER_SPACE_URL))
            .bearer_auth(&self.token)
            .json(&payload)
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
        let urls = gallery_urls(&result);
        if urls.is_empty() {
            return Err(ProviderError::Empty(
                "no image returned from face adapter".to_string(),
            ));
        }
        Ok(urls)
    }
}

// The space returns `{"data": [[{"image": {"url": ...}}, ...]]}`; older
// deployments return `{"image": "<url>"}` entries.
fn gallery_urls(result: &Value) -> Vec<String> {
    let gallery = match result.pointer("/data/0").and_then(Value::as_array) {
        Some(items) => items,
        None => return Vec::new(),
    };

    gallery
        .iter()
        .filter_map(|item| {
            let image = item.get("image")?;
            match image {
                Value::String(url) => Some(url.clone()),
                Value::Object(_) => image
                    .get("url")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            }
        })
        .filter(|url| !url.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_gallery_with_nested_urls() {
        let result = json!({"data": [[
            {"image": {"url": "https://space/a.webp"}},
            {"image": {"url": "https://space/b.webp"}},
        ]]});
        assert_eq!(
            gallery_urls(&result),
            vec!["https://space/a.webp", "https://space/b.webp"]
        );
    }

    #[test]
    fn reads_gallery_with_plain_paths() {
        let result = json!({"data": [[{"image": "https://space/c.webp"}]]});
        assert_eq!(gallery_urls(&result), vec!["https://space/c.webp"]);
    }

    #[test]
    fn empty_gallery_yields_no_urls() {
        assert!(gallery_urls(&json!({"data": [[]]})).is_empty());
        assert!(gallery_urls(&json!({})).is_empty());
    }
}
