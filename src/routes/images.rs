use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use futures::StreamExt;
use serde_json::json;
use uuid::Uuid;

use crate::db::supabase::SupabaseService;
use crate::middleware::rate_limit::RateLimiter;
use crate::models::error::ErrorResponse;
use crate::models::visualization::{StylizedImageRequest, TextToImageRequest};
use crate::routes::{check_rate_limit, provider_error_response};
use crate::services::face_adapter_service::FaceAdapterService;
use crate::services::fallback::{ProviderError, ResilientCall};
use crate::services::lightx_service::LightXService;
use crate::services::mock_data;
use crate::services::openai_service::{OpenAiService, CHAT_MODEL};
use crate::services::temp_images::{self, TempImageStore};
use crate::services::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ENHANCE_SYSTEM_PROMPT: &str = "You are an expert at creating prompts for AI face swap \
     image generation. Rewrite the user's prompt to focus on the PERSON and their FACE being in \
     the scene, while keeping the travel destination as background context. Use phrases like 'a \
     person with their face clearly visible' or 'showing the person's face'. Keep it under 200 \
     words and focus on the person first, then the location.";

/*
    POST /api/upload-photo (multipart: `file`)
    Invalid uploads are fatal; storage problems fall back to a placeholder
    URL.
*/
pub async fn upload_photo(state: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    log::info!("Photo upload request received");

    let mut content: Option<Vec<u8>> = None;
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(err) => {
                return HttpResponse::BadRequest()
                    .json(ErrorResponse::bad_request(format!("Invalid upload: {}", err)))
            }
        };
        if field.name() != Some("file") {
            continue;
        }

        let is_image = field
            .content_type()
            .map(|mime| mime.essence_str().starts_with("image/"))
            .unwrap_or(false);
        if !is_image {
            return HttpResponse::BadRequest().json(ErrorResponse::bad_request(
                "File must be an image (JPEG, PNG, WebP)",
            ));
        }

        match read_field_bytes(&mut field).await {
            Ok(bytes) => content = Some(bytes),
            Err(response) => return response,
        }
    }

    let content = match content {
        Some(content) if !content.is_empty() => content,
        _ => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("No file field in upload"))
        }
    };

    if sniff_image(&content).is_none() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Invalid image file"));
    }

    let filename = format!("user_{}.jpg", Uuid::new_v4());
    let size = content.len();

    let resolved = ResilientCall::new(
        "supabase",
        store_photo(state.supabase.as_ref(), filename.clone(), content),
    )
    .run(
        "mock",
        "https://via.placeholder.com/400x400/FF6B6B/FFFFFF?text=Uploaded+Photo".to_string(),
    )
    .await;

    let resolved = match resolved {
        Ok(resolved) => resolved,
        Err(err) => return provider_error_response(err),
    };

    log::info!("Photo processed successfully ({}): {}", resolved.source, filename);
    HttpResponse::Ok().json(json!({
        "success": true,
        "photo_url": resolved.value,
        "filename": filename,
        "size": size,
        "uploaded_at": Utc::now().to_rfc3339(),
        "storage": resolved.source,
    }))
}

async fn store_photo(
    supabase: Option<&SupabaseService>,
    filename: String,
    content: Vec<u8>,
) -> Result<String, ProviderError> {
    let supabase = supabase
        .ok_or_else(|| ProviderError::Unavailable("database not configured".to_string()))?;
    supabase
        .upload_object("user-photos", &filename, content, "image/jpeg")
        .await
}

async fn read_field_bytes(
    field: &mut actix_multipart::Field,
) -> Result<Vec<u8>, HttpResponse> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                return Err(HttpResponse::BadRequest()
                    .json(ErrorResponse::bad_request(format!("Invalid upload: {}", err))))
            }
        };
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("File too large (max 10MB)")));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn sniff_image(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else if data.starts_with(b"GIF8") {
        Some("image/gif")
    } else {
        None
    }
}

/*
    POST /api/generate-text-to-image
    Chain: image model -> image enhancer -> placeholder URL.
*/
pub async fn generate_text_to_image(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<TextToImageRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let input = input.into_inner();
    if let Err(detail) = input.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail));
    }
    log::info!("Generating image from text: {:.50}...", input.prompt);

    let prompt = input.styled_prompt();
    let resolved = ResilientCall::new(
        "openai",
        render_prompt(state.openai.as_ref(), prompt.clone()),
    )
    .or_else(
        "lightx",
        enhance_stock_image(state.lightx.as_ref(), prompt.clone()),
    )
    .run("placeholder", mock_data::PLACEHOLDER_IMAGE_URL.to_string())
    .await;

    let resolved = match resolved {
        Ok(resolved) => resolved,
        Err(err) => return provider_error_response(err),
    };

    let mut body = json!({
        "success": true,
        "image_url": resolved.value,
        "provider": resolved.source,
        "generated_at": Utc::now().to_rfc3339(),
    });
    if resolved.source == "placeholder" {
        body["note"] = json!("Using placeholder image due to API issues");
    }
    HttpResponse::Ok().json(body)
}

async fn render_prompt(
    openai: Option<&OpenAiService>,
    prompt: String,
) -> Result<String, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;
    openai.generate_image(&prompt).await
}

async fn enhance_stock_image(
    lightx: Option<&LightXService>,
    prompt: String,
) -> Result<String, ProviderError> {
    let lightx = lightx
        .ok_or_else(|| ProviderError::Unavailable("image enhancer not configured".to_string()))?;
    let urls = lightx
        .generate_background(
            mock_data::PLACEHOLDER_IMAGE_URL,
            mock_data::PLACEHOLDER_IMAGE_URL,
            &prompt,
        )
        .await?;
    urls.into_iter()
        .next()
        .ok_or_else(|| ProviderError::Empty("no image URL from enhancer".to_string()))
}

/*
    POST /api/generate-stylized-image
    Optional base64 input image goes through the temp store so the enhancer
    can fetch it by URL.
*/
pub async fn generate_stylized_image(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    temp_store: web::Data<TempImageStore>,
    req: HttpRequest,
    input: web::Json<StylizedImageRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let input = input.into_inner();
    if let Err(detail) = input.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail));
    }
    log::info!("Stylized image request: {:.50}...", input.prompt);

    let lightx = match &state.lightx {
        Some(lightx) if !lightx.demo_mode() => lightx,
        Some(_) => {
            log::info!("Image enhancer demo mode enabled, returning demo response");
            return demo_stylized_response(&input.prompt);
        }
        None => {
            log::warn!("Image enhancer not available, returning demo response");
            return demo_stylized_response(&input.prompt);
        }
    };

    let image_url = match &input.image {
        Some(image) => match temp_store.insert_base64(image) {
            Ok(id) => temp_images::public_url(&id),
            Err(err) => {
                return HttpResponse::BadRequest()
                    .json(ErrorResponse::bad_request(err.to_string()))
            }
        },
        None => mock_data::PLACEHOLDER_IMAGE_URL.to_string(),
    };

    match lightx
        .generate_background(&image_url, &image_url, &input.prompt)
        .await
    {
        Ok(urls) => {
            let timestamp = Utc::now().to_rfc3339();
            let images: Vec<_> = urls
                .into_iter()
                .map(|url| {
                    json!({
                        "url": url,
                        "prompt": input.prompt,
                        "provider": "lightx",
                        "timestamp": timestamp,
                    })
                })
                .collect();
            HttpResponse::Ok().json(json!({
                "success": true,
                "images": images,
                "provider": "lightx",
                "prompt": input.prompt,
            }))
        }
        Err(err) if err.is_fatal() => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(err.to_string()))
        }
        Err(err) => {
            log::error!("Image enhancer request failed: {}", err);
            demo_stylized_response(&input.prompt)
        }
    }
}

fn demo_stylized_response(prompt: &str) -> HttpResponse {
    let demo_image = mock_data::demo_image_for_prompt();
    HttpResponse::Ok().json(json!({
        "success": true,
        "images": [{
            "url": demo_image,
            "prompt": prompt,
            "provider": "lightx_demo",
            "timestamp": Utc::now().to_rfc3339(),
        }],
        "provider": "lightx_demo",
        "prompt": prompt,
        "note": "Demo mode - image enhancement simulation",
    }))
}

/*
    GET /temp-image/{image_id}
*/
pub async fn get_temp_image(
    temp_store: web::Data<TempImageStore>,
    path: web::Path<String>,
) -> impl Responder {
    let image_id = path.into_inner();
    match temp_store.get(&image_id) {
        Some(data) => HttpResponse::Ok().content_type("image/jpeg").body(data),
        None => HttpResponse::NotFound().json(ErrorResponse::not_found("Image not found")),
    }
}

/*
    POST /api/generate-photo-app-image (multipart: `selfie` file, `prompt`)
    Chain: face adapter -> image model -> stock travel images.
*/
pub async fn generate_photo_app_image(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    temp_store: web::Data<TempImageStore>,
    req: HttpRequest,
    mut payload: Multipart,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let mut selfie: Option<Vec<u8>> = None;
    let mut prompt = String::new();
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(err) => {
                return HttpResponse::BadRequest()
                    .json(ErrorResponse::bad_request(format!("Invalid upload: {}", err)))
            }
        };
        match field.name() {
            Some("selfie") => match read_field_bytes(&mut field).await {
                Ok(bytes) => selfie = Some(bytes),
                Err(response) => return response,
            },
            Some("prompt") => match read_field_bytes(&mut field).await {
                Ok(bytes) => prompt = String::from_utf8_lossy(&bytes).trim().to_string(),
                Err(response) => return response,
            },
            _ => continue,
        }
    }

    let selfie = match selfie {
        Some(selfie) if !selfie.is_empty() => selfie,
        _ => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::bad_request("A selfie file is required"))
        }
    };
    if sniff_image(&selfie).is_none() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request("Invalid image file"));
    }

    let selfie_url = temp_images::public_url(&temp_store.insert_bytes(selfie));
    let enhanced_prompt = enhance_prompt(state.openai.as_ref(), &prompt).await;

    let resolved = ResilientCall::new(
        "face_adapter",
        adapt_face(
            state.face_adapter.as_ref(),
            selfie_url,
            enhanced_prompt.clone(),
        ),
    )
    .or_else(
        "openai",
        render_travel_scene(state.openai.as_ref(), enhanced_prompt.clone()),
    )
    .run(
        "mock",
        mock_data::STOCK_TRAVEL_IMAGES
            .iter()
            .map(|url| url.to_string())
            .collect(),
    )
    .await;

    match resolved {
        Ok(resolved) => {
            log::info!("Generated {} images via '{}'", resolved.value.len(), resolved.source);
            HttpResponse::Ok().json(json!({
                "success": true,
                "image_urls": resolved.value,
                "provider": resolved.source,
            }))
        }
        Err(err) => provider_error_response(err),
    }
}

/// Rewrite the prompt for face-first generation; keep the caller's prompt
/// when the model is unavailable or fails.
async fn enhance_prompt(openai: Option<&OpenAiService>, user_prompt: &str) -> String {
    let openai = match openai {
        Some(openai) => openai,
        None => return user_prompt.to_string(),
    };
    match openai
        .chat_completion(CHAT_MODEL, Some(ENHANCE_SYSTEM_PROMPT), user_prompt, 150, 0.7)
        .await
    {
        Ok(enhanced) => {
            log::info!("Enhanced prompt: {}", enhanced);
            enhanced
        }
        Err(err) => {
            log::error!("Prompt enhancement failed: {}", err);
            user_prompt.to_string()
        }
    }
}

async fn adapt_face(
    face_adapter: Option<&FaceAdapterService>,
    selfie_url: String,
    prompt: String,
) -> Result<Vec<String>, ProviderError> {
    let face_adapter = face_adapter
        .ok_or_else(|| ProviderError::Unavailable("face adapter not configured".to_string()))?;
    face_adapter.generate_images(&selfie_url, &prompt).await
}

async fn render_travel_scene(
    openai: Option<&OpenAiService>,
    prompt: String,
) -> Result<Vec<String>, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;
    let prompt = if prompt.trim().is_empty() {
        "A person enjoying a beautiful travel destination, high quality, photorealistic"
            .to_string()
    } else {
        format!(
            "A person enjoying {}, high quality, photorealistic, travel photography",
            prompt
        )
    };
    let url = openai.generate_image(&prompt).await?;
    Ok(vec![url])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_image_formats() {
        assert_eq!(sniff_image(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(
            sniff_image(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]),
            Some("image/png")
        );
        assert_eq!(
            sniff_image(b"RIFF\x00\x00\x00\x00WEBPVP8 "),
            Some("image/webp")
        );
        assert_eq!(sniff_image(b"GIF89a"), Some("image/gif"));
    }

    #[test]
    fn rejects_non_image_payloads() {
        assert!(sniff_image(b"plain text pretending to be a photo").is_none());
        assert!(sniff_image(b"").is_none());
    }
}
