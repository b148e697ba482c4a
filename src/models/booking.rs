use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BOOKING_TYPES: [&str; 5] = ["flights", "hotels", "activities", "packages", "agents"];
pub const CLASS_TYPES: [&str; 4] = ["economy", "premium", "business", "first"];
pub const SEARCH_TYPES: [&str; 4] = ["flights", "hotels", "activities", "packages"];

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

fn default_passengers() -> u32 {
    1
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_class_type() -> String {
    "economy".to_string()
}

fn default_search_type() -> String {
    "flights".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub booking_type: String,
    pub item_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub travel_date: String,
    pub return_date: Option<String>,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    pub special_requests: Option<String>,
    pub total_price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !BOOKING_TYPES.contains(&self.booking_type.as_str()) {
            return Err("Invalid booking type".to_string());
        }

        let email_pattern = Regex::new(EMAIL_PATTERN).unwrap();
        if !email_pattern.is_match(&self.customer_email) {
            return Err("Invalid email format".to_string());
        }

        let travel_date = NaiveDate::parse_from_str(&self.travel_date, "%Y-%m-%d")
            .map_err(|_| "Invalid date format. Use YYYY-MM-DD".to_string())?;
        if travel_date < Utc::now().date_naive() {
            return Err("Travel date must be in the future".to_string());
        }

        if let Some(return_date) = &self.return_date {
            let return_date = NaiveDate::parse_from_str(return_date, "%Y-%m-%d")
                .map_err(|_| "Invalid return date format. Use YYYY-MM-DD".to_string())?;
            if return_date <= travel_date {
                return Err("Return date must be after travel date".to_string());
            }
        }

        if self.passengers < 1 || self.passengers > 10 {
            return Err("Passengers must be between 1 and 10".to_string());
        }
        if self.total_price <= 0.0 {
            return Err("Total price must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// A confirmed booking. Status is set once at creation; there is no state
/// machine behind it.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub booking_type: String,
    pub item_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub travel_date: String,
    pub return_date: Option<String>,
    pub passengers: u32,
    pub special_requests: Option<String>,
    pub total_price: f64,
    pub currency: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Booking {
    pub fn from_request(request: &BookingRequest) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            id: format!(
                "BK{}",
                Uuid::new_v4().simple().to_string()[..8].to_uppercase()
            ),
            booking_type: request.booking_type.clone(),
            item_id: request.item_id.clone(),
            customer_name: request.customer_name.clone(),
            customer_email: request.customer_email.clone(),
            customer_phone: request.customer_phone.clone(),
            travel_date: request.travel_date.clone(),
            return_date: request.return_date.clone(),
            passengers: request.passengers,
            special_requests: request.special_requests.clone(),
            total_price: request.total_price,
            currency: request.currency.clone(),
            status: "confirmed".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingSearchRequest {
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default = "default_class_type")]
    pub class_type: String,
    #[serde(default = "default_search_type")]
    pub search_type: String,
}

impl BookingSearchRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.passengers < 1 || self.passengers > 9 {
            return Err("Passengers must be between 1 and 9".to_string());
        }
        if !CLASS_TYPES.contains(&self.class_type.as_str()) {
            return Err("Invalid class type".to_string());
        }
        if !SEARCH_TYPES.contains(&self.search_type.as_str()) {
            return Err("Invalid search type".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> BookingRequest {
        BookingRequest {
            booking_type: "flights".to_string(),
            item_id: "flight_1".to_string(),
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_phone: None,
            travel_date: (Utc::now().date_naive() + chrono::Duration::days(30))
                .format("%Y-%m-%d")
                .to_string(),
            return_date: None,
            passengers: 2,
            special_requests: None,
            total_price: 450.0,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn rejects_unknown_booking_type() {
        let mut request = valid_request();
        request.booking_type = "cruises".to_string();
        assert_eq!(request.validate().unwrap_err(), "Invalid booking type");
    }

    #[test]
    fn rejects_malformed_email() {
        let mut request = valid_request();
        request.customer_email = "not-an-email".to_string();
        assert_eq!(request.validate().unwrap_err(), "Invalid email format");
    }

    #[test]
    fn rejects_past_travel_date() {
        let mut request = valid_request();
        request.travel_date = "2020-01-01".to_string();
        assert_eq!(
            request.validate().unwrap_err(),
            "Travel date must be in the future"
        );
    }

    #[test]
    fn rejects_return_before_travel() {
        let mut request = valid_request();
        request.return_date = Some(request.travel_date.clone());
        assert_eq!(
            request.validate().unwrap_err(),
            "Return date must be after travel date"
        );
    }

    #[test]
    fn rejects_bad_passenger_counts_and_price() {
        let mut request = valid_request();
        request.passengers = 0;
        assert!(request.validate().is_err());

        let mut request = valid_request();
        request.passengers = 11;
        assert!(request.validate().is_err());

        let mut request = valid_request();
        request.total_price = 0.0;
        assert!(request.validate().is_err());
    }

    #[test]
    fn booking_gets_id_and_confirmed_status() {
        let booking = Booking::from_request(&valid_request());
        assert!(booking.id.starts_with("BK"));
        assert_eq!(booking.id.len(), 10);
        assert_eq!(booking.status, "confirmed");
    }

    #[test]
    fn search_request_validation() {
        let search = BookingSearchRequest {
            from_location: None,
            to_location: None,
            departure_date: None,
            return_date: None,
            passengers: 10,
            class_type: "economy".to_string(),
            search_type: "flights".to_string(),
        };
        assert!(search.validate().is_err());

        let search = BookingSearchRequest {
            passengers: 2,
            search_type: "cruises".to_string(),
            ..search
        };
        assert_eq!(search.validate().unwrap_err(), "Invalid search type");
    }
}
