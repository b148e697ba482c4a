use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::middleware::rate_limit::RateLimiter;
use crate::models::error::ErrorResponse;
use crate::models::flight::FlightSearchRequest;
use crate::routes::check_rate_limit;
use crate::services::mock_data;
use crate::services::AppState;

const IATA_CODE_LEN: usize = 3;

/*
    POST /api/search-flights
    Aggregator problems never surface: every failure path answers with mock
    offers and a provider label naming the reason.
*/
pub async fn search_flights(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<FlightSearchRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let search = input.into_inner().normalized();
    if let Err(detail) = search.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail));
    }
    log::info!(
        "Flight search request: {} -> {} on {}",
        search.origin,
        search.destination,
        search.departure_date
    );

    let amadeus = match &state.amadeus {
        Some(amadeus) => amadeus,
        None => {
            log::warn!("Amadeus client not available, returning mock data");
            return mock_flight_response(&search, "Amadeus unavailable");
        }
    };

    if search.origin.len() != IATA_CODE_LEN || search.destination.len() != IATA_CODE_LEN {
        log::warn!(
            "Invalid airport codes: {} -> {}",
            search.origin,
            search.destination
        );
        return mock_flight_response(&search, "Invalid airport codes");
    }

    if let Err(reason) = search.validate_dates() {
        log::warn!("Flight date validation failed: {}", reason);
        return mock_flight_response(&search, reason);
    }

    match amadeus.search_flight_offers(&search).await {
        Ok(flights) => {
            log::info!("Found {} flights from Amadeus API", flights.len());
            HttpResponse::Ok().json(json!({
                "success": true,
                "flights": flights,
                "count": flights.len(),
                "provider": "Amadeus API",
            }))
        }
        Err(err) => {
            log::error!("Amadeus API error: {}", err);
            mock_flight_response(&search, "Amadeus API error")
        }
    }
}

fn mock_flight_response(search: &FlightSearchRequest, reason: &str) -> HttpResponse {
    let flights = mock_data::mock_flight_offers(&search.origin, &search.destination);
    HttpResponse::Ok().json(json!({
        "success": true,
        "flights": flights,
        "count": flights.len(),
        "provider": format!("Mock Data ({})", reason),
    }))
}
