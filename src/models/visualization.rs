use serde::Deserialize;
use url::Url;

pub const STYLES: [&str; 5] = ["artistic", "cartoon", "photographic", "painting", "sketch"];

#[derive(Debug, Clone, Deserialize)]
pub struct VisualizationRequest {
    pub user_photo_url: String,
    pub destination_id: Option<String>,
    pub prompt: Option<String>,
}

impl VisualizationRequest {
    pub fn validate(&self) -> Result<(), String> {
        let parsed = Url::parse(self.user_photo_url.trim())
            .map_err(|_| "Invalid photo URL".to_string())?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("Invalid photo URL".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextToImageRequest {
    pub prompt: String,
    pub style: Option<String>,
}

impl TextToImageRequest {
    pub fn validate(&self) -> Result<(), String> {
        let prompt = self.prompt.trim();
        if prompt.len() < 10 {
            return Err("Prompt must be at least 10 characters long".to_string());
        }
        if prompt.len() > 500 {
            return Err("Prompt must be less than 500 characters".to_string());
        }
        if let Some(style) = &self.style {
            if !STYLES.contains(&style.as_str()) {
                return Err("Invalid style".to_string());
            }
        }
        Ok(())
    }

    /// Prompt with the requested style folded in.
    pub fn styled_prompt(&self) -> String {
        let prompt = self.prompt.trim();
        match self.style.as_deref() {
            Some("artistic") => format!("{} in an artistic style", prompt),
            Some("cartoon") => format!("{} in a cartoon style", prompt),
            Some("photographic") => format!("{} in a realistic photographic style", prompt),
            Some("painting") => format!("{} in a painting style", prompt),
            Some("sketch") => format!("{} in a sketch style", prompt),
            _ => prompt.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StylizedImageRequest {
    pub prompt: String,
    /// Optional base64-encoded source image.
    pub image: Option<String>,
}

impl StylizedImageRequest {
    pub fn validate(&self) -> Result<(), String> {
        let prompt = self.prompt.trim();
        if prompt.len() < 5 {
            return Err("Prompt must be at least 5 characters long".to_string());
        }
        if prompt.len() > 500 {
            return Err("Prompt must be less than 500 characters".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_url_must_be_http() {
        let request = VisualizationRequest {
            user_photo_url: "ftp://example.com/me.jpg".to_string(),
            destination_id: None,
            prompt: None,
        };
        assert!(request.validate().is_err());

        let request = VisualizationRequest {
            user_photo_url: "https://example.com/me.jpg".to_string(),
            destination_id: None,
            prompt: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn text_to_image_prompt_bounds() {
        let request = TextToImageRequest {
            prompt: "too short".to_string(),
            style: None,
        };
        assert!(request.validate().is_err());

        let request = TextToImageRequest {
            prompt: "a".repeat(501),
            style: None,
        };
        assert!(request.validate().is_err());

        let request = TextToImageRequest {
            prompt: "A sunrise over the Dolomites".to_string(),
            style: Some("painting".to_string()),
        };
        assert!(request.validate().is_ok());
        assert_eq!(
            request.styled_prompt(),
            "A sunrise over the Dolomites in a painting style"
        );
    }

    #[test]
    fn unknown_style_is_rejected() {
        let request = TextToImageRequest {
            prompt: "A sunrise over the Dolomites".to_string(),
            style: Some("vaporwave".to_string()),
        };
        assert_eq!(request.validate().unwrap_err(), "Invalid style");
    }

    #[test]
    fn stylized_prompt_bounds() {
        let request = StylizedImageRequest {
            prompt: "hey".to_string(),
            image: None,
        };
        assert!(request.validate().is_err());

        let request = StylizedImageRequest {
            prompt: "Golden hour portrait".to_string(),
            image: None,
        };
        assert!(request.validate().is_ok());
    }
}
