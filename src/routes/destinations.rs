use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::supabase::SupabaseService;
use crate::middleware::rate_limit::RateLimiter;
use crate::models::destination;
use crate::models::error::ErrorResponse;
use crate::models::planner::DestinationFilterRequest;
use crate::routes::{check_rate_limit, provider_error_response};
use crate::services::fallback::{ProviderError, ResilientCall};
use crate::services::json_extract::{extract_json, JsonShape};
use crate::services::mock_data;
use crate::services::openai_service::{OpenAiService, CHAT_MODEL, PLANNER_CHAT_MODEL};
use crate::services::AppState;

const DEFAULT_LIMIT: usize = 50;
const MAX_SUGGESTIONS: usize = 12;

const DESTINATIONS_SYSTEM_PROMPT: &str = "You are a travel expert. Generate realistic, exciting \
     travel destinations with detailed information.";

#[derive(Debug, Deserialize)]
pub struct DestinationsQuery {
    pub continent: Option<String>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub randomize: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    pub query: String,
}

/*
    GET /api/destinations
    Chain: language model -> database -> static mock list.
*/
pub async fn get_destinations(
    state: web::Data<AppState>,
    query: web::Query<DestinationsQuery>,
) -> impl Responder {
    let continent = query.continent.clone();
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let resolved = ResilientCall::new(
        "openai",
        generate_destinations(state.openai.as_ref(), continent.clone(), limit),
    )
    .or_else(
        "database",
        fetch_destinations(state.supabase.as_ref(), continent.clone(), limit),
    )
    .run(
        "mock",
        mock_data::mock_destination_values(continent.as_deref(), limit),
    )
    .await;

    let resolved = match resolved {
        Ok(resolved) => resolved,
        Err(err) => return provider_error_response(err),
    };

    log::info!(
        "Returning {} destinations from source '{}'",
        resolved.value.len(),
        resolved.source
    );
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": resolved.value,
        "count": resolved.value.len(),
        "continent": continent,
        "limit": limit,
        "source": resolved.source,
        "generated_at": Utc::now().to_rfc3339(),
    }))
}

async fn generate_destinations(
    openai: Option<&OpenAiService>,
    continent: Option<String>,
    limit: usize,
) -> Result<Vec<Value>, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;

    let continent_filter = continent
        .as_deref()
        .map(|c| format!(" from {}", c))
        .unwrap_or_default();
    let prompt = format!(
        "Generate {limit} diverse and exciting travel destinations from around the \
         world{continent_filter}. Include destinations from different continents, countries, and \
         cultures.\n\n\
         Format as a valid JSON array of objects with these exact fields: id (UUID format), name, \
         country, city, continent, description (2-3 sentences), image_url (use Unsplash URLs \
         like: https://images.unsplash.com/photo-[ID]?w=800&h=600&fit=crop), rating (4.0-5.0), \
         price ($, $$, or $$$), bestTime, highlights (array of 4 strings).\n\n\
         Make destinations diverse, exciting, and realistic. Include popular spots and hidden \
         gems from all continents. Ensure the JSON is properly formatted with no trailing commas.\n\n\
         IMPORTANT: Generate exactly {limit} destinations.",
    );

    let content = openai
        .chat_completion(CHAT_MODEL, Some(DESTINATIONS_SYSTEM_PROMPT), &prompt, 2000, 0.7)
        .await?;
    log::info!("Generated destinations response: {:.200}...", content);

    let value = extract_json(&content, JsonShape::Array)?;
    let mut destinations = match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    if destinations.is_empty() {
        return Err(ProviderError::Empty(
            "no destinations in model response".to_string(),
        ));
    }

    for dest in &mut destinations {
        destination::backfill(dest);
    }
    Ok(destinations)
}

async fn fetch_destinations(
    supabase: Option<&SupabaseService>,
    continent: Option<String>,
    limit: usize,
) -> Result<Vec<Value>, ProviderError> {
    let supabase = supabase
        .ok_or_else(|| ProviderError::Unavailable("database not configured".to_string()))?;

    let mut query: Vec<(&str, String)> = vec![
        ("select", "*".to_string()),
        ("limit", limit.to_string()),
        ("order", "name".to_string()),
    ];
    if let Some(continent) = &continent {
        query.push(("continent", format!("eq.{}", continent)));
    }

    let mut rows = supabase.select("destinations", &query).await?;
    if rows.is_empty() {
        return Err(ProviderError::Empty(
            "no destinations in database".to_string(),
        ));
    }

    for row in &mut rows {
        destination::backfill(row);
    }
    Ok(rows)
}

/*
    GET /api/continents
*/
pub async fn get_continents(state: web::Data<AppState>) -> impl Responder {
    let resolved = ResilientCall::new("database", fetch_continents(state.supabase.as_ref()))
        .run("mock", mock_data::mock_continents())
        .await;

    let resolved = match resolved {
        Ok(resolved) => resolved,
        Err(err) => return provider_error_response(err),
    };

    HttpResponse::Ok().json(json!({
        "success": true,
        "data": resolved.value,
        "source": resolved.source,
    }))
}

async fn fetch_continents(supabase: Option<&SupabaseService>) -> Result<Vec<Value>, ProviderError> {
    let supabase = supabase
        .ok_or_else(|| ProviderError::Unavailable("database not configured".to_string()))?;

    let rows = supabase
        .select("destinations", &[("select", "continent".to_string())])
        .await?;

    // One query, counted client-side.
    let mut counts: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
    for row in &rows {
        if let Some(continent) = row.get("continent").and_then(Value::as_str) {
            if !continent.is_empty() {
                *counts.entry(continent.to_string()).or_insert(0) += 1;
            }
        }
    }
    if counts.is_empty() {
        return Err(ProviderError::Empty(
            "no continents in database".to_string(),
        ));
    }

    Ok(counts
        .into_iter()
        .map(|(name, count)| json!({"name": name, "count": count}))
        .collect())
}

/*
    GET /api/destination-suggestions?query=
*/
pub async fn get_destination_suggestions(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    query: web::Query<SuggestionsQuery>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let query = query.query.trim().to_string();
    if query.len() < 2 {
        return HttpResponse::Ok().json(json!({"suggestions": []}));
    }
    log::info!("Getting destination suggestions for: {}", query);

    let resolved = ResilientCall::new(
        "openai",
        suggest_destinations(state.openai.as_ref(), query.clone()),
    )
    .run("static", mock_data::static_suggestions(&query))
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "suggestions": resolved.value.into_iter().take(MAX_SUGGESTIONS).collect::<Vec<_>>(),
        })),
        Err(err) => provider_error_response(err),
    }
}

async fn suggest_destinations(
    openai: Option<&OpenAiService>,
    query: String,
) -> Result<Vec<String>, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;

    let prompt = format!(
        "Given the user input \"{query}\", suggest 12 popular travel destinations (cities, \
         countries, regions, landmarks, or natural wonders) that match or are related to this \
         query.\n\n\
         Return only a JSON array of strings with destination names in this exact format:\n\
         [\"Destination 1\", \"Destination 2\", \"Destination 3\", ...]\n\n\
         Include a mix of major cities, popular tourist destinations, natural wonders, beach \
         destinations, cultural sites, and adventure destinations. Focus on popular, well-known \
         destinations that travelers would actually search for.",
    );

    let content = openai
        .chat_completion(CHAT_MODEL, None, &prompt, 300, 0.8)
        .await?;
    let suggestions: Vec<String> =
        crate::services::json_extract::extract_as(&content, JsonShape::Array)?;
    if suggestions.is_empty() {
        return Err(ProviderError::Empty(
            "no suggestions in model response".to_string(),
        ));
    }
    Ok(suggestions)
}

/*
    POST /api/filter-destinations
*/
pub async fn filter_destinations(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<DestinationFilterRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }
    let input = input.into_inner();
    if input.prompt.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Prompt must not be empty"));
    }

    let resolved = ResilientCall::new(
        "openai",
        filter_with_model(state.openai.as_ref(), input.prompt.clone()),
    )
    .run("static", Vec::new())
    .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "success": true,
            "destinations": resolved.value,
            "message": "Filtered destinations based on criteria",
        })),
        Err(err) => provider_error_response(err),
    }
}

async fn filter_with_model(
    openai: Option<&OpenAiService>,
    prompt: String,
) -> Result<Vec<Value>, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;

    let content = openai
        .chat_completion(
            PLANNER_CHAT_MODEL,
            Some("You are a travel expert. Filter destinations based on criteria in JSON format."),
            &prompt,
            3000,
            0.7,
        )
        .await?;

    let value = extract_json(&content, JsonShape::Object)?;
    let destinations = value
        .get("destinations")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if destinations.is_empty() {
        return Err(ProviderError::Empty(
            "no destinations in filter response".to_string(),
        ));
    }
    Ok(destinations)
}
