use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use serde_json::{json, Value};

use crate::middleware::rate_limit::RateLimiter;
use crate::models::destination;
use crate::models::error::ErrorResponse;
use crate::models::planner::RecommendationsGenerationRequest;
use crate::models::recommendation::RecommendationsRequest;
use crate::routes::{check_rate_limit, provider_error_response};
use crate::services::fallback::{ProviderError, ResilientCall};
use crate::services::json_extract::{extract_json, JsonShape};
use crate::services::mock_data;
use crate::services::openai_service::{OpenAiService, CHAT_MODEL, PLANNER_CHAT_MODEL};
use crate::services::AppState;

const REQUIRED_KEYS: [&str; 4] = ["destinations", "itinerary", "travelTips", "budgetBreakdown"];

const SYSTEM_PROMPT: &str = "You are an expert travel consultant specializing in personalized \
     travel recommendations. Provide detailed, realistic, and exciting travel suggestions \
     tailored to specific user preferences.";

/*
    POST /api/generate-personalized-recommendations
*/
pub async fn generate_personalized_recommendations(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<RecommendationsRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let input = input.into_inner();
    if let Err(detail) = input.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail));
    }
    log::info!(
        "Generating personalized recommendations for {} {} group with ${} budget",
        input.age_group,
        input.group_size,
        input.budget_range
    );

    let resolved = ResilientCall::new(
        "openai",
        personalized_recommendations(state.openai.as_ref(), &input),
    )
    .run("mock", mock_data::mock_recommendations(&input))
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

async fn personalized_recommendations(
    openai: Option<&OpenAiService>,
    input: &RecommendationsRequest,
) -> Result<Value, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;

    let interests = input.interests.join(", ");
    let country = input
        .country
        .as_deref()
        .map(|c| format!(" The user's selected country is: {}.", c))
        .unwrap_or_default();
    let notes = input
        .additional_notes
        .as_deref()
        .map(|n| format!(" Additional notes: {}", n))
        .unwrap_or_default();

    let prompt = format!(
        "Generate personalized travel recommendations for a {} age group traveling as {} with a \
         budget of ${} for a {} trip. The user's selected interests are: {}.{}{}\n\n\
         IMPORTANT: Tailor the recommended destinations, activities, and itinerary to match the \
         user's interests and country as closely as possible.\n\n\
         Provide 10 recommended destinations, a custom itinerary for the trip duration, travel \
         tips, and a budget breakdown.\n\n\
         Format the response as a valid JSON object with this exact structure:\n\
         {{\n    \"destinations\": [ ... ],\n    \"itinerary\": [ ... ],\n    \"travelTips\": \
         [ ... ],\n    \"budgetBreakdown\": {{ ... }}\n}}\n\n\
         For each destination include: id, name, country, description (2-3 sentences), image_url \
         (high-quality Unsplash URL), rating (4.0-5.0), price ($, $$, or $$$), and highlights \
         (array of 4 key attractions).",
        input.age_group,
        input.group_size,
        input.budget_range,
        input.trip_duration,
        interests,
        country,
        notes,
    );

    let content = openai
        .chat_completion(CHAT_MODEL, Some(SYSTEM_PROMPT), &prompt, 2500, 0.7)
        .await?;

    let mut recommendations = extract_json(&content, JsonShape::Object)?;
    for key in REQUIRED_KEYS {
        if recommendations.get(key).is_none() {
            return Err(ProviderError::Empty(format!(
                "recommendations missing required key: {}",
                key
            )));
        }
    }

    if let Some(destinations) = recommendations
        .get_mut("destinations")
        .and_then(Value::as_array_mut)
    {
        for dest in destinations {
            destination::backfill(dest);
        }
    }
    Ok(recommendations)
}

/*
    POST /api/generate-recommendations
    Prompt comes from the client; shape of the response is its business.
*/
pub async fn generate_recommendations(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<RecommendationsGenerationRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }
    let input = input.into_inner();

    let resolved = ResilientCall::new(
        "openai",
        prompted_recommendations(state.openai.as_ref(), input.prompt.clone()),
    )
    .run("static", mock_data::fallback_recommendations())
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "success": true,
            "recommendations": resolved.value,
            "message": "Generated personalized recommendations",
        })),
        Err(err) => provider_error_response(err),
    }
}

async fn prompted_recommendations(
    openai: Option<&OpenAiService>,
    prompt: String,
) -> Result<Value, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;

    let content = openai
        .chat_completion(
            PLANNER_CHAT_MODEL,
            Some("You are a travel expert. Generate personalized travel recommendations in JSON format."),
            &prompt,
            4000,
            0.7,
        )
        .await?;
    Ok(extract_json(&content, JsonShape::Object)?)
}
