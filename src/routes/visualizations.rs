use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::supabase::SupabaseService;
use crate::middleware::rate_limit::RateLimiter;
use crate::models::error::ErrorResponse;
use crate::models::visualization::VisualizationRequest;
use crate::routes::{check_rate_limit, provider_error_response};
use crate::services::face_adapter_service::FaceAdapterService;
use crate::services::fallback::{ProviderError, ResilientCall};
use crate::services::mock_data;
use crate::services::openai_service::OpenAiService;
use crate::services::AppState;

const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct VisualizationsQuery {
    pub limit: Option<usize>,
}

/*
    POST /api/generate-visualization
    Chain: face adapter -> image model -> placeholder image.
*/
pub async fn generate_visualization(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<VisualizationRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let input = input.into_inner();
    if let Err(detail) = input.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail));
    }
    log::info!("Visualization generation request for {}", input.user_photo_url);

    let prompt = match resolve_prompt(&state, &input).await {
        Ok(prompt) => prompt,
        Err(response) => return response,
    };

    let resolved = ResilientCall::new(
        "face_adapter",
        swap_face(
            state.face_adapter.as_ref(),
            input.user_photo_url.clone(),
            prompt.clone(),
        ),
    )
    .or_else(
        "openai",
        render_scene(state.openai.as_ref(), prompt.clone()),
    )
    .run(
        "placeholder",
        mock_data::PLACEHOLDER_IMAGE_URL.to_string(),
    )
    .await;

    let resolved = match resolved {
        Ok(resolved) => resolved,
        Err(err) => return provider_error_response(err),
    };

    // Write-once record; losing it must not fail the request.
    if let Some(supabase) = &state.supabase {
        let record = json!({
            "destination_id": input.destination_id,
            "user_photo_url": input.user_photo_url,
            "generated_image_url": resolved.value,
            "prompt": prompt,
            "created_at": Utc::now().to_rfc3339(),
        });
        if let Err(err) = supabase.insert("user_visualizations", &record).await {
            log::warn!("Failed to save visualization record: {}", err);
        }
    }

    log::info!("Visualization generated via '{}'", resolved.source);
    HttpResponse::Ok().json(json!({
        "success": true,
        "visualization_url": resolved.value,
        "prompt": prompt,
        "provider": resolved.source,
        "generated_at": Utc::now().to_rfc3339(),
    }))
}

/// The scene prompt: the caller's own prompt when present, otherwise one
/// derived from the referenced destination.
async fn resolve_prompt(
    state: &AppState,
    input: &VisualizationRequest,
) -> Result<String, HttpResponse> {
    if let Some(prompt) = input.prompt.as_deref() {
        let prompt = prompt.trim();
        if !prompt.is_empty() {
            return Ok(prompt.to_string());
        }
    }

    let destination_id = match input.destination_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => {
            return Err(HttpResponse::BadRequest().json(ErrorResponse::bad_request(
                "Either prompt or destination_id must be provided. Please enter a description of \
                 your desired scene or select a destination.",
            )))
        }
    };

    let mut destination: Option<Value> = None;
    if let Some(supabase) = &state.supabase {
        match supabase
            .select(
                "destinations",
                &[
                    ("select", "*".to_string()),
                    ("id", format!("eq.{}", destination_id)),
                ],
            )
            .await
        {
            Ok(mut rows) if !rows.is_empty() => destination = Some(rows.remove(0)),
            Ok(_) => {}
            Err(err) => log::warn!("Database query failed: {}", err),
        }
    }

    let destination = destination.or_else(|| {
        mock_data::find_mock_destination(destination_id)
            .and_then(|dest| serde_json::to_value(dest).ok())
    });

    match destination {
        Some(dest) => {
            let name = dest.get("name").and_then(Value::as_str).unwrap_or("");
            let country = dest.get("country").and_then(Value::as_str).unwrap_or("");
            Ok(format!(
                "A person standing in {}, {}, with a beautiful travel photo. The scene should be \
                 realistic and show the person enjoying the destination.",
                name, country
            ))
        }
        None => Err(HttpResponse::NotFound()
            .json(ErrorResponse::not_found("Destination not found"))),
    }
}

async fn swap_face(
    face_adapter: Option<&FaceAdapterService>,
    selfie_url: String,
    prompt: String,
) -> Result<String, ProviderError> {
    let face_adapter = face_adapter
        .ok_or_else(|| ProviderError::Unavailable("face adapter not configured".to_string()))?;
    let urls = face_adapter.generate_images(&selfie_url, &prompt).await?;
    urls.into_iter()
        .next()
        .ok_or_else(|| ProviderError::Empty("no image returned from face adapter".to_string()))
}

async fn render_scene(
    openai: Option<&OpenAiService>,
    prompt: String,
) -> Result<String, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;
    openai.generate_image(&prompt).await
}

/*
    GET /api/visualizations
*/
pub async fn get_visualizations(
    state: web::Data<AppState>,
    query: web::Query<VisualizationsQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let resolved = ResilientCall::new(
        "database",
        fetch_visualizations(state.supabase.as_ref(), limit),
    )
    .run("mock", mock_data::mock_visualizations())
    .await;

    let resolved = match resolved {
        Ok(resolved) => resolved,
        Err(err) => return provider_error_response(err),
    };

    HttpResponse::Ok().json(json!({
        "success": true,
        "data": resolved.value,
        "count": resolved.value.len(),
        "limit": limit,
        "source": resolved.source,
    }))
}

async fn fetch_visualizations(
    supabase: Option<&SupabaseService>,
    limit: usize,
) -> Result<Vec<Value>, ProviderError> {
    let supabase = supabase
        .ok_or_else(|| ProviderError::Unavailable("database not configured".to_string()))?;

    let rows = supabase
        .select(
            "user_visualizations",
            &[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await?;
    if rows.is_empty() {
        return Err(ProviderError::Empty(
            "no visualizations in database".to_string(),
        ));
    }
    Ok(rows)
}
