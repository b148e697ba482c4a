use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::env;

use crate::services::AppState;

#[derive(Serialize)]
struct DebugStatus {
    environment: HashMap<String, String>,
    services: HashMap<String, ServiceStatus>,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    configured: bool,
    initialized: bool,
}

pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Travelviz API v1.0",
        "status": "running",
        "timestamp": Utc::now().to_rfc3339(),
        "version": "1.0.0",
    }))
}

pub async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

/// Which credentials are present and which provider clients came up.
/// Presence booleans only, never values.
pub async fn debug_info(state: web::Data<AppState>) -> impl Responder {
    let mut environment = HashMap::new();
    environment.insert(
        "host".to_string(),
        env::var("HOST").unwrap_or_else(|_| "Not Set".to_string()),
    );
    environment.insert(
        "port".to_string(),
        env::var("PORT").unwrap_or_else(|_| "Not Set".to_string()),
    );

    let mut services = HashMap::new();
    services.insert(
        "openai".to_string(),
        ServiceStatus {
            configured: env::var("OPENAI_API_KEY").is_ok(),
            initialized: state.openai.is_some(),
        },
    );
    services.insert(
        "amadeus".to_string(),
        ServiceStatus {
            configured: env::var("AMADEUS_CLIENT_ID").is_ok()
                && env::var("AMADEUS_CLIENT_SECRET").is_ok(),
            initialized: state.amadeus.is_some(),
        },
    );
    services.insert(
        "lightx".to_string(),
        ServiceStatus {
            configured: env::var("LIGHTX_API_KEY").is_ok(),
            initialized: state.lightx.is_some(),
        },
    );
    services.insert(
        "face_adapter".to_string(),
        ServiceStatus {
            configured: env::var("HUGGINGFACE_TOKEN").is_ok(),
            initialized: state.face_adapter.is_some(),
        },
    );
    services.insert(
        "supabase".to_string(),
        ServiceStatus {
            configured: env::var("SUPABASE_URL").is_ok() && env::var("SUPABASE_KEY").is_ok(),
            initialized: state.supabase.is_some(),
        },
    );

    HttpResponse::Ok().json(DebugStatus {
        environment,
        services,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
