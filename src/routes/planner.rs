//! Prompt-driven travel-planner endpoints. Each one sends the client's
//! prompt to the language model, extracts the JSON object it asked for and
//! falls back to a static table when the model misbehaves.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::middleware::rate_limit::RateLimiter;
use crate::models::planner::{
    AreaGenerationRequest, CityGenerationRequest, ContinentGenerationRequest,
    CountryGenerationRequest, DestinationImagesRequest, DetailedItineraryRequest,
    ImageGenerationRequest, ItineraryGenerationRequest,
};
use crate::routes::{check_rate_limit, provider_error_response};
use crate::services::fallback::{ProviderError, ResilientCall};
use crate::services::json_extract::{extract_json, JsonShape};
use crate::services::mock_data;
use crate::services::openai_service::{OpenAiService, CHAT_MODEL, PLANNER_CHAT_MODEL};
use crate::services::AppState;

const MAX_DESTINATION_IMAGES: usize = 5;

/// One planner round-trip: prompt in, named array out of the extracted
/// object.
async fn generate_collection(
    openai: Option<&OpenAiService>,
    system: &str,
    prompt: String,
    key: &str,
    max_tokens: u32,
) -> Result<Vec<Value>, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;

    let content = openai
        .chat_completion(PLANNER_CHAT_MODEL, Some(system), &prompt, max_tokens, 0.7)
        .await?;
    let value = extract_json(&content, JsonShape::Object)?;
    let items = value
        .get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if items.is_empty() {
        return Err(ProviderError::Empty(format!(
            "no '{}' in model response",
            key
        )));
    }
    Ok(items)
}

/*
    POST /api/generate-continents
*/
pub async fn generate_continents(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<ContinentGenerationRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let resolved = ResilientCall::new(
        "openai",
        generate_collection(
            state.openai.as_ref(),
            "You are a travel expert. Generate detailed continent information in JSON format.",
            input.prompt.clone(),
            "continents",
            2000,
        ),
    )
    .run("static", mock_data::fallback_continents())
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "success": true,
            "continents": resolved.value,
            "message": format!("Generated {} continents", resolved.value.len()),
        })),
        Err(err) => provider_error_response(err),
    }
}

/*
    POST /api/generate-countries
*/
pub async fn generate_countries(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<CountryGenerationRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let resolved = ResilientCall::new(
        "openai",
        generate_collection(
            state.openai.as_ref(),
            "You are a travel expert. Generate detailed country information in JSON format.",
            input.prompt.clone(),
            "countries",
            3000,
        ),
    )
    .run("static", mock_data::fallback_countries(&input.continent))
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "success": true,
            "countries": resolved.value,
            "message": format!(
                "Generated {} countries for {}",
                resolved.value.len(),
                input.continent
            ),
        })),
        Err(err) => provider_error_response(err),
    }
}

/*
    POST /api/generate-cities
*/
pub async fn generate_cities(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<CityGenerationRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let resolved = ResilientCall::new(
        "openai",
        generate_collection(
            state.openai.as_ref(),
            "You are a travel expert. Generate detailed city information in JSON format.",
            input.prompt.clone(),
            "cities",
            3000,
        ),
    )
    .run("static", mock_data::fallback_cities(&input.country))
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "success": true,
            "cities": resolved.value,
            "message": format!(
                "Generated {} cities for {}",
                resolved.value.len(),
                input.country
            ),
        })),
        Err(err) => provider_error_response(err),
    }
}

/*
    POST /api/generate-areas
*/
pub async fn generate_areas(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<AreaGenerationRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let resolved = ResilientCall::new(
        "openai",
        generate_collection(
            state.openai.as_ref(),
            "You are a travel expert. Generate detailed area information in JSON format.",
            input.prompt.clone(),
            "areas",
            3000,
        ),
    )
    .run("static", mock_data::fallback_areas(&input.city))
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "success": true,
            "areas": resolved.value,
            "message": format!(
                "Generated {} areas for {}",
                resolved.value.len(),
                input.city
            ),
        })),
        Err(err) => provider_error_response(err),
    }
}

/*
    POST /api/generate-itinerary
*/
pub async fn generate_itinerary(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<ItineraryGenerationRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }
    let input = input.into_inner();

    let prompt = match input.prompt.as_deref().map(str::trim) {
        Some(prompt) if !prompt.is_empty() => prompt.to_string(),
        _ => {
            let prefs = preferences_summary(&input.preferences);
            format!(
                "Generate a detailed itinerary for a trip to {}. User preferences: {}. Include \
                 daily activities and a budget breakdown. Format as JSON with 'itinerary' \
                 containing 'days' and 'budgetBreakdown'.",
                input.destination_id, prefs
            )
        }
    };

    let resolved = ResilientCall::new(
        "openai",
        model_itinerary(state.openai.as_ref(), prompt),
    )
    .run("static", mock_data::fallback_itinerary(&input.destination_id))
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "success": true,
            "itinerary": resolved.value,
            "message": format!("Generated itinerary for {}", input.destination_id),
        })),
        Err(err) => provider_error_response(err),
    }
}

fn preferences_summary(preferences: &Value) -> String {
    match preferences.as_object() {
        Some(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join(", "),
        None => String::new(),
    }
}

async fn model_itinerary(
    openai: Option<&OpenAiService>,
    prompt: String,
) -> Result<Value, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;

    let content = openai
        .chat_completion(
            PLANNER_CHAT_MODEL,
            Some("You are a travel expert. Generate detailed itineraries in JSON format."),
            &prompt,
            4000,
            0.7,
        )
        .await?;
    let value = extract_json(&content, JsonShape::Object)?;
    match value.get("itinerary") {
        Some(itinerary) if !itinerary.is_null() => Ok(itinerary.clone()),
        _ => Ok(value),
    }
}

/*
    POST /api/generate-detailed-itinerary
    The long-form response is where malformed model JSON shows up most, so
    this path leans on the extractor's repair passes.
*/
pub async fn generate_detailed_itinerary(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<DetailedItineraryRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }
    let input = input.into_inner();
    log::info!(
        "Generating detailed itinerary for {}, {}, {} budget",
        input.destination,
        input.duration,
        input.budget_level
    );

    let prompt = format!(
        "Generate a comprehensive travel itinerary for {} for {} with {} travelers on a {} \
         budget.\n\n\
         Respond with a single JSON object containing: tripOverview (title, destination, \
         duration, travelers, bestTime, weather, summary), dailyItinerary (array of days with \
         morning/afternoon/evening activity arrays, accommodation, meals, transportation), \
         budgetBreakdown (accommodation, meals, activities, transportation, miscellaneous, \
         totalTripCost, costPerPerson, currency), travelTips (array of {{category, tips}}), \
         accommodations and restaurants arrays.\n\n\
         GUIDELINES: make all prices realistic for the destination; 'budget' means 60% of normal \
         prices, 'mid-range' normal, 'luxury' 150%; adjust for the number of travelers; all costs \
         in USD.",
        input.destination, input.duration, input.travelers, input.budget_level,
    );

    let resolved = ResilientCall::new(
        "openai",
        model_detailed_itinerary(state.openai.as_ref(), prompt),
    )
    .run(
        "static",
        mock_data::fallback_detailed_itinerary(
            &input.destination,
            &input.duration,
            input.travelers,
        ),
    )
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": resolved.value,
            "source": resolved.source,
            "generated_at": Utc::now().to_rfc3339(),
        })),
        Err(err) => provider_error_response(err),
    }
}

async fn model_detailed_itinerary(
    openai: Option<&OpenAiService>,
    prompt: String,
) -> Result<Value, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;

    let content = openai
        .chat_completion(
            CHAT_MODEL,
            Some(
                "You are an expert travel planner with deep knowledge of destinations worldwide. \
                 Provide accurate, realistic pricing and detailed itineraries.",
            ),
            &prompt,
            3000,
            0.7,
        )
        .await?;
    Ok(extract_json(&content, JsonShape::Object)?)
}

/*
    POST /api/generate-image
*/
pub async fn generate_image(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<ImageGenerationRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }
    let input = input.into_inner();

    let resolved = ResilientCall::new(
        "openai",
        model_image(state.openai.as_ref(), input.prompt.clone()),
    )
    .run(
        "placeholder",
        mock_data::destination_image_for(&input.destination_id).to_string(),
    )
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "success": true,
            "image": {
                "url": resolved.value,
                "prompt": input.prompt,
            },
            "provider": resolved.source,
            "message": "Generated AI travel photo",
        })),
        Err(err) => provider_error_response(err),
    }
}

async fn model_image(
    openai: Option<&OpenAiService>,
    prompt: String,
) -> Result<String, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;
    openai.generate_image(&prompt).await
}

/*
    POST /api/generate-destination-images
    Per-destination fallback to a stock URL; capped to keep provider usage
    bounded.
*/
pub async fn generate_destination_images(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<DestinationImagesRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }
    let input = input.into_inner();

    let mut images = Map::new();
    for destination in input.destinations.iter().take(MAX_DESTINATION_IMAGES) {
        let name = destination
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        let prompt = format!("Beautiful travel photo of {} - {}", name, input.prompt);
        let resolved = ResilientCall::new(
            "openai",
            model_image(state.openai.as_ref(), prompt),
        )
        .run(
            "stock",
            format!("https://source.unsplash.com/400x200/?{}", name),
        )
        .await;

        match resolved {
            Ok(resolved) => {
                images.insert(name, json!(resolved.value));
            }
            Err(err) => return provider_error_response(err),
        }
    }

    HttpResponse::Ok().json(json!({
        "success": true,
        "images": images,
        "message": format!("Generated images for {} destinations", images.len()),
    }))
}
