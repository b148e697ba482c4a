use chrono::NaiveDate;
use serde::Deserialize;

fn default_adults() -> u32 {
    1
}

fn default_travel_class() -> String {
    "ECONOMY".to_string()
}

fn default_currency_code() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlightSearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    #[serde(default = "default_travel_class")]
    pub travel_class: String,
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
}

impl FlightSearchRequest {
    /// Trim and uppercase the airport codes the way travel sites submit
    /// them.
    pub fn normalized(mut self) -> Self {
        self.origin = self.origin.trim().to_uppercase();
        self.destination = self.destination.trim().to_uppercase();
        self
    }

    /// Hard input errors that warrant a 400 rather than a fallback.
    pub fn validate(&self) -> Result<(), String> {
        if self.origin.len() < 2 {
            return Err("Origin must be at least 2 characters".to_string());
        }
        if self.destination.len() < 2 {
            return Err("Destination must be at least 2 characters".to_string());
        }
        Ok(())
    }

    /// Soft date problems route the search to mock data instead of
    /// failing; the returned label names the reason.
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        let departure = NaiveDate::parse_from_str(&self.departure_date, "%Y-%m-%d")
            .map_err(|_| "Invalid date format")?;
        if let Some(return_date) = &self.return_date {
            let return_date = NaiveDate::parse_from_str(return_date, "%Y-%m-%d")
                .map_err(|_| "Invalid date format")?;
            if return_date <= departure {
                return Err("Invalid dates");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(origin: &str, destination: &str) -> FlightSearchRequest {
        FlightSearchRequest {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: "2030-06-15".to_string(),
            return_date: None,
            adults: 1,
            children: 0,
            infants: 0,
            travel_class: default_travel_class(),
            currency_code: default_currency_code(),
        }
    }

    #[test]
    fn normalizes_airport_codes() {
        let search = request(" jfk ", "lhr").normalized();
        assert_eq!(search.origin, "JFK");
        assert_eq!(search.destination, "LHR");
    }

    #[test]
    fn rejects_too_short_codes() {
        assert!(request("J", "LHR").validate().is_err());
        assert!(request("JFK", "L").validate().is_err());
        assert!(request("NY", "LO").validate().is_ok());
    }

    #[test]
    fn date_checks_name_the_failure() {
        let mut search = request("JFK", "LHR");
        search.departure_date = "June 15".to_string();
        assert_eq!(search.validate_dates().unwrap_err(), "Invalid date format");

        let mut search = request("JFK", "LHR");
        search.return_date = Some("2030-06-15".to_string());
        assert_eq!(search.validate_dates().unwrap_err(), "Invalid dates");

        let mut search = request("JFK", "LHR");
        search.return_date = Some("2030-06-22".to_string());
        assert!(search.validate_dates().is_ok());
    }
}
