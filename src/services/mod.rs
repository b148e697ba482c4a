pub mod amadeus_service;
pub mod face_adapter_service;
pub mod fallback;
pub mod json_extract;
pub mod lightx_service;
pub mod mock_data;
pub mod openai_service;
pub mod temp_images;

use crate::db::supabase::SupabaseService;
use amadeus_service::AmadeusService;
use face_adapter_service::FaceAdapterService;
use lightx_service::LightXService;
use openai_service::OpenAiService;

/// Provider registry handed to every request handler. A slot is `None` when
/// its credentials are absent; the affected endpoints then fall back to
/// mock data.
pub struct AppState {
    pub openai: Option<OpenAiService>,
    pub amadeus: Option<AmadeusService>,
    pub lightx: Option<LightXService>,
    pub face_adapter: Option<FaceAdapterService>,
    pub supabase: Option<SupabaseService>,
}

impl AppState {
    pub fn from_env() -> Self {
        Self {
            openai: init("Language model", OpenAiService::new()),
            amadeus: init("Flight/hotel aggregator", AmadeusService::new()),
            lightx: init("Image enhancer", LightXService::new()),
            face_adapter: init("Face adapter", FaceAdapterService::new()),
            supabase: init("Database", SupabaseService::new()),
        }
    }

    /// A state with every provider slot empty; tests use this so endpoints
    /// exercise their fallback chains without any network traffic.
    pub fn unconfigured() -> Self {
        Self {
            openai: None,
            amadeus: None,
            lightx: None,
            face_adapter: None,
            supabase: None,
        }
    }
}

fn init<T>(name: &str, service: Result<T, fallback::ProviderError>) -> Option<T> {
    match service {
        Ok(service) => {
            log::info!("{} client initialized", name);
            Some(service)
        }
        Err(err) => {
            log::warn!("{} client not available: {}", name, err);
            None
        }
    }
}
