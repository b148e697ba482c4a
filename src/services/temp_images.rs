use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use base64::{engine::general_purpose, Engine as _};
use uuid::Uuid;

const DEFAULT_CAPACITY: usize = 256;
const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug)]
pub enum TempImageError {
    InvalidBase64(String),
}

impl fmt::Display for TempImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempImageError::InvalidBase64(err) => write!(f, "Invalid base64 image data: {}", err),
        }
    }
}

impl Error for TempImageError {}

struct StoredImage {
    data: Vec<u8>,
    inserted_at: Instant,
}

/// Bounded in-memory store for images that must be reachable by URL for the
/// duration of one provider round-trip. Entries expire after a fixed TTL and
/// the oldest entry is evicted once the store is full.
pub struct TempImageStore {
    capacity: usize,
    ttl: Duration,
    images: Mutex<HashMap<String, StoredImage>>,
}

impl TempImageStore {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            capacity,
            ttl,
            images: Mutex::new(HashMap::new()),
        }
    }

    /// Store a base64 payload (with or without a `data:image/...` prefix)
    /// and return the id it is served under at `/temp-image/{id}`.
    pub fn insert_base64(&self, base64_data: &str) -> Result<String, TempImageError> {
        let payload = if base64_data.starts_with("data:image") {
            base64_data.split(',').nth(1).ok_or_else(|| {
                TempImageError::InvalidBase64("missing payload after data URL prefix".to_string())
            })?
        } else {
            base64_data
        };

        let data = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|err| TempImageError::InvalidBase64(err.to_string()))?;

        Ok(self.insert_bytes(data))
    }

    /// Store raw image bytes and return the generated id.
    pub fn insert_bytes(&self, data: Vec<u8>) -> String {
        let id = Uuid::new_v4().to_string();
        let now = Instant::now();

        let mut images = self.images.lock().unwrap();
        images.retain(|_, image| now.duration_since(image.inserted_at) < self.ttl);
        while images.len() >= self.capacity {
            let oldest = images
                .iter()
                .min_by_key(|(_, image)| image.inserted_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => images.remove(&key),
                None => break,
            };
        }
        images.insert(
            id.clone(),
            StoredImage {
                data,
                inserted_at: now,
            },
        );
        id
    }

    pub fn get(&self, id: &str) -> Option<Vec<u8>> {
        let images = self.images.lock().unwrap();
        let image = images.get(id)?;
        if image.inserted_at.elapsed() >= self.ttl {
            return None;
        }
        Some(image.data.clone())
    }
}

impl Default for TempImageStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

/// Public URL for a stored temp image, e.g. for providers that fetch inputs
/// over HTTP.
pub fn public_url(id: &str) -> String {
    let base_url =
        std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    format!("{}/temp-image/{}", base_url.trim_end_matches('/'), id)
}
