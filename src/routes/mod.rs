pub mod bookings;
pub mod destinations;
pub mod flights;
pub mod health;
pub mod hotels;
pub mod images;
pub mod planner;
pub mod recommendations;
pub mod visualizations;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::middleware::rate_limit::{client_ip, RateLimiter};
use crate::models::error::ErrorResponse;
use crate::services::fallback::ProviderError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root))
        .route("/debug", web::get().to(health::debug_info))
        .route("/temp-image/{image_id}", web::get().to(images::get_temp_image))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::api_health))
                .route("/destinations", web::get().to(destinations::get_destinations))
                .route("/continents", web::get().to(destinations::get_continents))
                .route(
                    "/destination-suggestions",
                    web::get().to(destinations::get_destination_suggestions),
                )
                .route(
                    "/filter-destinations",
                    web::post().to(destinations::filter_destinations),
                )
                .route(
                    "/generate-visualization",
                    web::post().to(visualizations::generate_visualization),
                )
                .route("/visualizations", web::get().to(visualizations::get_visualizations))
                .route(
                    "/generate-personalized-recommendations",
                    web::post().to(recommendations::generate_personalized_recommendations),
                )
                .route(
                    "/generate-recommendations",
                    web::post().to(recommendations::generate_recommendations),
                )
                .route("/upload-photo", web::post().to(images::upload_photo))
                .route(
                    "/generate-text-to-image",
                    web::post().to(images::generate_text_to_image),
                )
                .route(
                    "/generate-stylized-image",
                    web::post().to(images::generate_stylized_image),
                )
                .route(
                    "/generate-photo-app-image",
                    web::post().to(images::generate_photo_app_image),
                )
                .route("/book", web::post().to(bookings::create_booking))
                .route("/search-bookings", web::post().to(bookings::search_bookings))
                .route("/search-flights", web::post().to(flights::search_flights))
                .route("/search-hotels", web::post().to(hotels::search_hotels))
                .route("/generate-continents", web::post().to(planner::generate_continents))
                .route("/generate-countries", web::post().to(planner::generate_countries))
                .route("/generate-cities", web::post().to(planner::generate_cities))
                .route("/generate-areas", web::post().to(planner::generate_areas))
                .route("/generate-itinerary", web::post().to(planner::generate_itinerary))
                .route(
                    "/generate-detailed-itinerary",
                    web::post().to(planner::generate_detailed_itinerary),
                )
                .route("/generate-image", web::post().to(planner::generate_image))
                .route(
                    "/generate-destination-images",
                    web::post().to(planner::generate_destination_images),
                ),
        );
}

/// 429 guard shared by the prompt-driven endpoints.
pub(crate) fn check_rate_limit(limiter: &RateLimiter, req: &HttpRequest) -> Option<HttpResponse> {
    let key = client_ip(req);
    if limiter.allow(&key) {
        None
    } else {
        log::warn!("Rate limit exceeded for {}", key);
        Some(HttpResponse::TooManyRequests().json(ErrorResponse::too_many_requests()))
    }
}

/// Map an escaped provider error to a response. Only fatal (input) errors
/// reach this from a fallback chain; everything else was absorbed.
pub(crate) fn provider_error_response(err: ProviderError) -> HttpResponse {
    if err.is_fatal() {
        HttpResponse::BadRequest().json(ErrorResponse::bad_request(err.to_string()))
    } else {
        log::error!("Unhandled provider error: {}", err);
        HttpResponse::InternalServerError().json(ErrorResponse::internal())
    }
}
