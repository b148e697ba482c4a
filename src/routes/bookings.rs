use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::{json, Value};

use crate::middleware::rate_limit::RateLimiter;
use crate::models::booking::{Booking, BookingRequest, BookingSearchRequest};
use crate::models::error::ErrorResponse;
use crate::routes::{check_rate_limit, provider_error_response};
use crate::services::fallback::{ProviderError, ResilientCall};
use crate::services::json_extract::{extract_json, JsonShape};
use crate::services::mock_data;
use crate::services::openai_service::{OpenAiService, CHAT_MODEL};
use crate::services::AppState;

/*
    POST /api/book
*/
pub async fn create_booking(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<BookingRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let input = input.into_inner();
    log::info!("Booking request received: {}", input.booking_type);
    if let Err(detail) = input.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail));
    }

    let booking = Booking::from_request(&input);

    // Persist best-effort; the confirmation does not depend on it.
    if let Some(supabase) = &state.supabase {
        match serde_json::to_value(&booking) {
            Ok(record) => {
                if let Err(err) = supabase.insert("bookings", &record).await {
                    log::error!("Failed to save booking to database: {}", err);
                } else {
                    log::info!("Booking saved to database: {}", booking.id);
                }
            }
            Err(err) => log::error!("Failed to serialize booking: {}", err),
        }
    } else {
        log::warn!("Database not available, booking kept in response only");
    }

    log::info!("Booking created successfully: {}", booking.id);
    HttpResponse::Ok().json(json!({
        "success": true,
        "booking_id": booking.id,
        "message": "Booking confirmed successfully!",
        "booking": booking,
        "next_steps": [
            "Check your email for booking confirmation",
            "Review your booking details",
            "Contact us if you need any changes",
        ],
    }))
}

/*
    POST /api/search-bookings
    Chain: language model -> deterministic mock results.
*/
pub async fn search_bookings(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<BookingSearchRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let input = input.into_inner();
    if let Err(detail) = input.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail));
    }
    log::info!(
        "Searching {} for: {:?} to {:?}",
        input.search_type,
        input.from_location,
        input.to_location
    );

    let resolved = ResilientCall::new("openai", model_offers(state.openai.as_ref(), &input))
        .run("mock", mock_data::mock_booking_results(&input))
        .await;

    match resolved {
        Ok(resolved) => HttpResponse::Ok().json(json!({
            "results": resolved.value,
            "provider": resolved.source,
        })),
        Err(err) => provider_error_response(err),
    }
}

async fn model_offers(
    openai: Option<&OpenAiService>,
    search: &BookingSearchRequest,
) -> Result<Vec<Value>, ProviderError> {
    let openai = openai.ok_or_else(|| {
        ProviderError::Unavailable("language model not configured".to_string())
    })?;

    let content = openai
        .chat_completion(CHAT_MODEL, None, &offer_prompt(search), 1000, 0.7)
        .await?;

    let value = extract_json(&content, JsonShape::Array)?;
    let results = match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    if results.is_empty() {
        return Err(ProviderError::Empty(
            "no offers in model response".to_string(),
        ));
    }
    log::info!("Model produced {} {} offers", results.len(), search.search_type);
    Ok(results)
}

fn offer_prompt(search: &BookingSearchRequest) -> String {
    let from = search.from_location.as_deref().unwrap_or("any major city");
    let to = search.to_location.as_deref().unwrap_or("any major city");

    match search.search_type.as_str() {
        "flights" => format!(
            "Generate 6 realistic flight options from {from} to {to} for {} passenger(s) in {} \
             class. Use real airline names, realistic prices, durations and departure times.\n\n\
             Return as a JSON array of objects with these exact fields: id, airline, \
             flightNumber, from, to, departureTime (HH:MM AM/PM), departureDate (YYYY-MM-DD), \
             duration (Xh Ym), price (number), aircraft, stops (number), class.",
            search.passengers, search.class_type,
        ),
        "hotels" => format!(
            "Generate 6 realistic hotel options in {to} for {} guest(s). Use real hotel chains \
             and boutique hotels with realistic prices, ratings (4.0-5.0) and amenities.\n\n\
             Return as a JSON array of objects with these exact fields: id, name, location, \
             rating, price (number), amenities (array), description, image (Unsplash URL), \
             distance.",
            search.passengers,
        ),
        "activities" => format!(
            "Generate 6 realistic activity options in {to} for {} participant(s). Use popular \
             tourist activities with realistic prices, durations and ratings.\n\n\
             Return as a JSON array of objects with these exact fields: id, name, location, \
             rating, price (number), duration, description, image (Unsplash URL), category.",
            search.passengers,
        ),
        _ => format!(
            "Generate 6 realistic travel package options from {from} to {to} for {} \
             traveler(s). Consider all-inclusive packages with realistic prices, durations and \
             inclusions.\n\n\
             Return as a JSON array of objects with these exact fields: id, name, from, to, \
             duration, price (number), description, inclusions (array), image (Unsplash URL).",
            search.passengers,
        ),
    }
}
