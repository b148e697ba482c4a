use std::env;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::flight::FlightSearchRequest;
use crate::models::hotel::HotelSearchRequest;
use crate::services::fallback::ProviderError;

const AMADEUS_BASE_URL: &str = "https://test.api.amadeus.com";

// Refresh the OAuth token slightly before the provider expires it.
const TOKEN_EXPIRY_SLACK: Duration = Duration::from_secs(60);

const MAX_FLIGHT_OFFERS: u32 = 50;
const MAX_HOTELS_PER_SEARCH: usize = 10;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope {
    #[serde(default)]
    data: Vec<Value>,
}

struct CachedToken {
    token: String,
    acquired_at: Instant,
    lifetime: Duration,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.acquired_at.elapsed() + TOKEN_EXPIRY_SLACK < self.lifetime
    }
}

/// Client for the flight/hotel aggregator. Holds a cached OAuth2
/// client-credentials token behind a mutex; a stale token is refreshed on
/// the next call.
#[derive(Clone)]
pub struct AmadeusService {
    client: Client,
    client_id: String,
    client_secret: String,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl AmadeusService {
    pub fn new() -> Result<Self, ProviderError> {
        let client_id = env::var("AMADEUS_CLIENT_ID")
            .map_err(|_| ProviderError::Unavailable("AMADEUS_CLIENT_ID not set".to_string()))?;
        let client_secret = env::var("AMADEUS_CLIENT_SECRET")
            .map_err(|_| ProviderError::Unavailable("AMADEUS_CLIENT_SECRET not set".to_string()))?;

        // Guard against committed sample configs.
        if client_id.trim().is_empty()
            || client_secret.trim().is_empty()
            || client_id.starts_with("your_")
            || client_secret.starts_with("your_")
        {
            return Err(ProviderError::Unavailable(
                "Amadeus credentials not properly configured".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            client_id,
            client_secret,
            token: Arc::new(Mutex::new(None)),
        })
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        {
            let cached = self.token.lock().unwrap();
            if let Some(token) = cached.as_ref() {
                if token.is_fresh() {
                    return Ok(token.token.clone());
                }
            }
        }

        let response = self
            .client
            .post(format!("{}/v1/security/oauth2/token", AMADEUS_BASE_URL))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        let access_token = token.access_token.clone();
        *self.token.lock().unwrap() = Some(CachedToken {
            token: token.access_token,
            acquired_at: Instant::now(),
            lifetime: Duration::from_secs(token.expires_in),
        });
        Ok(access_token)
    }

    async fn get_data(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Value>, ProviderError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .get(format!("{}{}", AMADEUS_BASE_URL, path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: DataEnvelope = response.json().await?;
        Ok(envelope.data)
    }

    /// Flight-offers search. Returns offers reduced to the fields the
    /// frontend consumes.
    pub async fn search_flight_offers(
        &self,
        search: &FlightSearchRequest,
    ) -> Result<Vec<Value>, ProviderError> {
        let mut query: Vec<(&str, String)> = vec![
            ("originLocationCode", search.origin.clone()),
            ("destinationLocationCode", search.destination.clone()),
            ("departureDate", search.departure_date.clone()),
            ("adults", search.adults.to_string()),
            ("children", search.children.to_string()),
            ("infants", search.infants.to_string()),
            ("travelClass", search.travel_class.clone()),
            ("currencyCode", search.currency_code.clone()),
            ("max", MAX_FLIGHT_OFFERS.to_string()),
        ];
        if let Some(return_date) = &search.return_date {
            query.push(("returnDate", return_date.clone()));
        }

        let offers = self.get_data("/v2/shopping/flight-offers", &query).await?;
        if offers.is_empty() {
            return Err(ProviderError::Empty(
                "no flight offers returned".to_string(),
            ));
        }
        Ok(offers.iter().map(reshape_flight_offer).collect())
    }

    /// Hotels for a city, with a best-rate offer per hotel. Hotels without
    /// an available offer get deterministic fallback pricing rather than
    /// being dropped.
    pub async fn search_hotels(
        &self,
        search: &HotelSearchRequest,
    ) -> Result<Vec<Value>, ProviderError> {
        let hotel_list = self
            .get_data(
                "/v1/reference-data/locations/hotels/by-city",
                &[("cityCode", search.city_code.clone())],
            )
            .await?;

        if hotel_list.is_empty() {
            return Err(ProviderError::Empty(format!(
                "no hotels found for city code {}",
                search.city_code
            )));
        }

        let mut hotels = Vec::new();
        for (index, hotel_info) in hotel_list.iter().take(MAX_HOTELS_PER_SEARCH).enumerate() {
            let hotel_id = match hotel_info.get("hotelId").and_then(Value::as_str) {
                Some(id) => id,
                None => continue,
            };

            match self.hotel_offer(hotel_id, search).await {
                Ok(Some(offer)) => hotels.push(reshape_hotel(hotel_info, &offer)),
                Ok(None) => hotels.push(fallback_priced_hotel(hotel_info, index, search)),
                Err(err) => {
                    log::warn!("Error getting offers for hotel {}: {}", hotel_id, err);
                    continue;
                }
            }
        }

        if hotels.is_empty() {
            return Err(ProviderError::Empty(
                "no hotel offers could be assembled".to_string(),
            ));
        }
        Ok(hotels)
    }

    async fn hotel_offer(
        &self,
        hotel_id: &str,
        search: &HotelSearchRequest,
    ) -> Result<Option<Value>, ProviderError> {
        let query: Vec<(&str, String)> = vec![
            ("hotelIds", hotel_id.to_string()),
            ("checkInDate", search.check_in_date.clone()),
            ("checkOutDate", search.check_out_date.clone()),
            ("adults", search.adults.to_string()),
            ("roomQuantity", search.room_quantity.to_string()),
            ("currencyCode", search.currency_code.clone()),
            ("bestRateOnly", "true".to_string()),
        ];

        let mut offers = self.get_data("/v3/shopping/hotel-offers", &query).await?;
        if offers.is_empty() {
            return Ok(None);
        }
        Ok(Some(offers.remove(0)))
    }
}

fn reshape_flight_offer(offer: &Value) -> Value {
    json!({
        "id": offer.get("id").cloned().unwrap_or(Value::Null),
        "price": {
            "total": offer.pointer("/price/total").cloned().unwrap_or(Value::Null),
            "currency": offer.pointer("/price/currency").cloned().unwrap_or(Value::Null),
        },
        "itineraries": offer.get("itineraries").cloned().unwrap_or_else(|| json!([])),
        "numberOfBookableSeats": offer
            .get("numberOfBookableSeats")
            .cloned()
            .unwrap_or_else(|| json!("N/A")),
        "travelerPricings": offer.get("travelerPricings").cloned().unwrap_or_else(|| json!([])),
    })
}

fn reshape_hotel(hotel_info: &Value, offer: &Value) -> Value {
    let first_offer = offer.pointer("/offers/0");
    json!({
        "id": offer.get("id").cloned().unwrap_or(Value::Null),
        "name": hotel_info.get("name").cloned().unwrap_or_else(|| json!("Hotel")),
        "rating": hotel_info.get("rating").cloned().unwrap_or_else(|| json!(4.0)),
        "location": hotel_location(hotel_info),
        "amenities": hotel_info.get("amenities").cloned().unwrap_or_else(|| json!([])),
        "price": {
            "total": first_offer
                .and_then(|o| o.pointer("/price/total"))
                .cloned()
                .unwrap_or(Value::Null),
            "currency": first_offer
                .and_then(|o| o.pointer("/price/currency"))
                .cloned()
                .unwrap_or(Value::Null),
        },
        "room": first_offer
            .and_then(|o| o.get("room"))
            .cloned()
            .unwrap_or_else(|| json!({"description": "Standard Room"})),
        "boardType": first_offer
            .and_then(|o| o.get("boardType"))
            .cloned()
            .unwrap_or_else(|| json!("ROOM_ONLY")),
        "image_url": crate::services::mock_data::stock_hotel_image(0),
    })
}

fn fallback_priced_hotel(hotel_info: &Value, index: usize, search: &HotelSearchRequest) -> Value {
    let hotel_id = hotel_info
        .get("hotelId")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    json!({
        "id": format!("hotel_{}", hotel_id),
        "name": hotel_info.get("name").cloned().unwrap_or_else(|| json!("Hotel")),
        "rating": hotel_info.get("rating").cloned().unwrap_or_else(|| json!(4.0)),
        "location": hotel_location(hotel_info),
        "amenities": hotel_info.get("amenities").cloned().unwrap_or_else(|| json!([])),
        "price": {
            "total": (150 + index * 50).to_string(),
            "currency": search.currency_code,
        },
        "room": {"description": "Standard Room"},
        "boardType": "ROOM_ONLY",
        "image_url": crate::services::mock_data::stock_hotel_image(index),
    })
}

fn hotel_location(hotel_info: &Value) -> Value {
    json!({
        "latitude": hotel_info.pointer("/geoCode/latitude").cloned().unwrap_or(Value::Null),
        "longitude": hotel_info.pointer("/geoCode/longitude").cloned().unwrap_or(Value::Null),
        "address": {
            "cityName": hotel_info.pointer("/address/cityName").cloned().unwrap_or(Value::Null),
            "countryCode": hotel_info.pointer("/address/countryCode").cloned().unwrap_or(Value::Null),
        },
    })
}
