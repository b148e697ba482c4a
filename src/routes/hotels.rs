use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;

use crate::middleware::rate_limit::RateLimiter;
use crate::models::error::ErrorResponse;
use crate::models::hotel::HotelSearchRequest;
use crate::routes::check_rate_limit;
use crate::services::mock_data;
use crate::services::AppState;

/*
    POST /api/search-hotels
    An unavailable or failing aggregator falls back to mock hotels; only
    malformed input is an error.
*/
pub async fn search_hotels(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    req: HttpRequest,
    input: web::Json<HotelSearchRequest>,
) -> impl Responder {
    if let Some(rejection) = check_rate_limit(&limiter, &req) {
        return rejection;
    }

    let search = input.into_inner().normalized();
    if let Err(detail) = search.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::bad_request(detail));
    }
    log::info!("Hotel search request for {}", search.city_code);

    let amadeus = match &state.amadeus {
        Some(amadeus) => amadeus,
        None => {
            log::warn!("Amadeus client not available, returning mock hotels");
            return mock_hotel_response(&search, "Amadeus unavailable");
        }
    };

    match amadeus.search_hotels(&search).await {
        Ok(hotels) => HttpResponse::Ok().json(json!({
            "success": true,
            "hotels": hotels,
            "count": hotels.len(),
            "provider": "Amadeus API",
        })),
        Err(err) => {
            log::error!("Amadeus API error: {}", err);
            mock_hotel_response(&search, "Amadeus API error")
        }
    }
}

fn mock_hotel_response(search: &HotelSearchRequest, reason: &str) -> HttpResponse {
    let hotels = mock_data::mock_hotels(&search.city_code);
    HttpResponse::Ok().json(json!({
        "success": true,
        "hotels": hotels,
        "count": hotels.len(),
        "provider": format!("Mock Data ({})", reason),
    }))
}
