use chrono::NaiveDate;
use serde::Deserialize;

fn default_adults() -> u32 {
    1
}

fn default_room_quantity() -> u32 {
    1
}

fn default_currency_code() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotelSearchRequest {
    pub city_code: String,
    pub check_in_date: String,
    pub check_out_date: String,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default = "default_room_quantity")]
    pub room_quantity: u32,
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    pub price_range: Option<String>,
    pub ratings: Option<String>,
}

impl HotelSearchRequest {
    pub fn normalized(mut self) -> Self {
        self.city_code = self.city_code.trim().to_uppercase();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.city_code.len() < 2 {
            return Err("City code must be at least 2 characters".to_string());
        }

        let check_in = NaiveDate::parse_from_str(&self.check_in_date, "%Y-%m-%d")
            .map_err(|_| "Check-in date must be in YYYY-MM-DD format".to_string())?;
        let check_out = NaiveDate::parse_from_str(&self.check_out_date, "%Y-%m-%d")
            .map_err(|_| "Check-out date must be in YYYY-MM-DD format".to_string())?;
        if check_out <= check_in {
            return Err("Check-out date must be after check-in date".to_string());
        }

        if self.adults < 1 || self.adults > 9 {
            return Err("Number of adults must be between 1 and 9".to_string());
        }
        if self.room_quantity < 1 || self.room_quantity > 9 {
            return Err("Number of rooms must be between 1 and 9".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HotelSearchRequest {
        HotelSearchRequest {
            city_code: "nyc".to_string(),
            check_in_date: "2030-06-15".to_string(),
            check_out_date: "2030-06-18".to_string(),
            adults: 2,
            children: 0,
            room_quantity: 1,
            currency_code: default_currency_code(),
            price_range: None,
            ratings: None,
        }
    }

    #[test]
    fn normalizes_city_code() {
        assert_eq!(request().normalized().city_code, "NYC");
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn rejects_checkout_not_after_checkin() {
        let mut search = request();
        search.check_out_date = search.check_in_date.clone();
        assert_eq!(
            search.validate().unwrap_err(),
            "Check-out date must be after check-in date"
        );
    }

    #[test]
    fn rejects_bad_counts() {
        let mut search = request();
        search.adults = 0;
        assert!(search.validate().is_err());

        let mut search = request();
        search.room_quantity = 10;
        assert!(search.validate().is_err());
    }
}
