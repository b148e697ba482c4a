//! Deterministic placeholder data returned when no provider succeeds.
//!
//! Every terminal fallback in the request handlers comes from here, so a
//! fully unconfigured process still answers every endpoint.

use chrono::{Duration, Timelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};

use crate::models::booking::BookingSearchRequest;
use crate::models::destination::Destination;
use crate::models::recommendation::RecommendationsRequest;

pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=800&h=600&fit=crop";

pub const DEMO_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400&h=400&fit=crop",
];

pub const STOCK_TRAVEL_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1469474968028-56623f02e42e?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&h=600&fit=crop&q=80",
];

const DESTINATION_IMAGES: [&str; 10] = [
    "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1469474968028-56623f02e42e?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1545569341-9eb8b30979d9?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1499856871958-5b9627545d1a?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1523906834658-6e24ef2386f9?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1516483638261-f4dbaf036963?w=800&h=600&fit=crop&q=80",
    "https://images.unsplash.com/photo-1587595431973-160d0d94add1?w=800&h=600&fit=crop&q=80",
];

/// Stock image chosen deterministically from a destination name, so the
/// same destination always renders with the same picture.
pub fn destination_image_for(name: &str) -> &'static str {
    let hash: usize = name.bytes().map(usize::from).sum();
    DESTINATION_IMAGES[hash % DESTINATION_IMAGES.len()]
}

pub fn stock_hotel_image(index: usize) -> String {
    format!(
        "https://images.unsplash.com/photo-{}?w=800&h=600&fit=crop&q=80",
        1_550_000_000usize + index * 100_000
    )
}

pub fn demo_image_for_prompt() -> &'static str {
    DEMO_IMAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEMO_IMAGES[0])
}

fn destination(
    id: &str,
    name: &str,
    country: &str,
    city: &str,
    continent: &str,
    description: &str,
    image_url: &str,
    rating: f64,
    price: &str,
    best_time: &str,
    highlights: [&str; 4],
) -> Destination {
    Destination {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        city: city.to_string(),
        continent: continent.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        rating,
        price: price.to_string(),
        best_time: best_time.to_string(),
        highlights: highlights.iter().map(|h| h.to_string()).collect(),
    }
}

pub fn mock_destinations() -> Vec<Destination> {
    vec![
        destination(
            "550e8400-e29b-41d4-a716-446655440001",
            "Santorini, Greece",
            "Greece",
            "Santorini",
            "Europe",
            "Famous for its stunning sunsets, white-washed buildings, and crystal-clear waters. Perfect for romantic getaways and photography enthusiasts.",
            "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff?w=800&h=600&fit=crop",
            4.8,
            "$$$",
            "May-October",
            ["Oia Sunset", "Blue Domes", "Wine Tasting", "Beach Hopping"],
        ),
        destination(
            "550e8400-e29b-41d4-a716-446655440002",
            "Kyoto, Japan",
            "Japan",
            "Kyoto",
            "Asia",
            "Ancient capital with traditional temples, beautiful gardens, and cherry blossoms. A perfect blend of history and natural beauty.",
            "https://images.unsplash.com/photo-1545569341-9eb8b30979d9?w=800&h=600&fit=crop",
            4.7,
            "$$",
            "March-May, October-November",
            ["Cherry Blossoms", "Temples", "Tea Ceremony", "Bamboo Forest"],
        ),
        destination(
            "550e8400-e29b-41d4-a716-446655440003",
            "Banff National Park",
            "Canada",
            "Banff",
            "North America",
            "Stunning mountain landscapes, turquoise lakes, and abundant wildlife. A paradise for nature lovers and outdoor enthusiasts.",
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800&h=600&fit=crop",
            4.9,
            "$$",
            "June-September",
            ["Lake Louise", "Hiking", "Wildlife", "Hot Springs"],
        ),
        destination(
            "550e8400-e29b-41d4-a716-446655440004",
            "Machu Picchu",
            "Peru",
            "Cusco",
            "South America",
            "Ancient Incan citadel set high in the Andes Mountains. One of the most impressive archaeological sites in the world.",
            "https://images.unsplash.com/photo-1587595431973-160d0d94add1?w=800&h=600&fit=crop",
            4.8,
            "$$",
            "April-October",
            ["Inca Trail", "Sun Gate", "Temple of the Sun", "Huayna Picchu"],
        ),
        destination(
            "550e8400-e29b-41d4-a716-446655440005",
            "Safari in Serengeti",
            "Tanzania",
            "Serengeti",
            "Africa",
            "Experience the wild beauty of Africa with incredible wildlife viewing, including the Great Migration.",
            "https://images.unsplash.com/photo-1549366021-9f761d450615?w=800&h=600&fit=crop",
            4.9,
            "$$$",
            "June-October",
            ["Wildlife Safari", "Great Migration", "Lion Spotting", "Sunset Drives"],
        ),
        destination(
            "550e8400-e29b-41d4-a716-446655440006",
            "Sydney Opera House",
            "Australia",
            "Sydney",
            "Oceania",
            "Iconic performing arts center with stunning harbor views. A masterpiece of modern architecture.",
            "https://images.unsplash.com/photo-1506973035872-a4ec16b8e8d9?w=800&h=600&fit=crop",
            4.6,
            "$$",
            "September-May",
            ["Opera Performances", "Harbor Bridge", "Bondi Beach", "Royal Botanic Garden"],
        ),
    ]
}

/// The static destination list filtered and serialized the way the
/// `/api/destinations` endpoint returns provider data.
pub fn mock_destination_values(continent: Option<&str>, limit: usize) -> Vec<Value> {
    mock_destinations()
        .into_iter()
        .filter(|dest| match continent {
            Some(continent) => dest.continent.eq_ignore_ascii_case(continent),
            None => true,
        })
        .take(limit)
        .filter_map(|dest| serde_json::to_value(dest).ok())
        .collect()
}

pub fn find_mock_destination(id: &str) -> Option<Destination> {
    mock_destinations().into_iter().find(|dest| dest.id == id)
}

pub fn mock_continents() -> Vec<Value> {
    [
        "Africa",
        "Asia",
        "Europe",
        "North America",
        "Oceania",
        "South America",
    ]
    .iter()
    .map(|name| json!({"name": name, "count": 1}))
    .collect()
}

pub fn mock_visualizations() -> Vec<Value> {
    vec![
        json!({
            "id": "550e8400-e29b-41d4-a716-446655440007",
            "title": "Santorini Sunset Analysis",
            "location": "Oia, Greece",
            "date": "2024-01-15",
            "image": "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff?w=400&h=300&fit=crop",
            "type": "sunset",
            "confidence": 0.95,
            "recommendations": ["Best viewing spots", "Optimal timing", "Photography tips"],
        }),
        json!({
            "id": "550e8400-e29b-41d4-a716-446655440008",
            "title": "Kyoto Temple Architecture",
            "location": "Kyoto, Japan",
            "date": "2024-01-10",
            "image": "https://images.unsplash.com/photo-1545569341-9eb8b30979d9?w=400&h=300&fit=crop",
            "type": "architecture",
            "confidence": 0.92,
            "recommendations": ["Historical significance", "Cultural context", "Visit timing"],
        }),
    ]
}

const AIRLINES: [(&str, &str); 20] = [
    ("American Airlines", "AA"),
    ("Delta Air Lines", "DL"),
    ("United Airlines", "UA"),
    ("Southwest Airlines", "WN"),
    ("JetBlue Airways", "B6"),
    ("Alaska Airlines", "AS"),
    ("Emirates", "EK"),
    ("Lufthansa", "LH"),
    ("British Airways", "BA"),
    ("Air France", "AF"),
    ("KLM Royal Dutch Airlines", "KL"),
    ("Singapore Airlines", "SQ"),
    ("Qatar Airways", "QR"),
    ("Turkish Airlines", "TK"),
    ("Cathay Pacific", "CX"),
    ("Japan Airlines", "JL"),
    ("All Nippon Airways", "NH"),
    ("Korean Air", "KE"),
    ("Air Canada", "AC"),
    ("WestJet", "WS"),
];

const AIRCRAFT: [(&str, &str); 10] = [
    ("738", "Boeing 737-800"),
    ("739", "Boeing 737-900"),
    ("320", "Airbus A320"),
    ("321", "Airbus A321"),
    ("777", "Boeing 777"),
    ("787", "Boeing 787 Dreamliner"),
    ("350", "Airbus A350"),
    ("380", "Airbus A380"),
    ("330", "Airbus A330"),
    ("767", "Boeing 767"),
];

/// Six aggregator-shaped mock flight offers between the given airports.
pub fn mock_flight_offers(origin: &str, destination: &str) -> Vec<Value> {
    let mut rng = rand::thread_rng();
    let mut flights = Vec::with_capacity(6);

    for i in 0..6 {
        let (_, airline_code) = AIRLINES[rng.gen_range(0..AIRLINES.len())];
        let (aircraft_code, _) = AIRCRAFT[rng.gen_range(0..AIRCRAFT.len())];

        let departure_hour = rng.gen_range(6..=22);
        let departure_minute = *[0u32, 15, 30, 45].choose(&mut rng).unwrap_or(&0);

        let route_distance: i64 = rng.gen_range(500..=3000);
        let duration_hours = (route_distance / 500).max(1);
        let duration_minutes: i64 = rng.gen_range(0..60);

        let base_price = (route_distance as f64 * rng.gen_range(0.15..0.25)) as i64;
        let price = (base_price + rng.gen_range(-50..=100)).max(150);

        let flight_number = format!("{}{}", airline_code, rng.gen_range(1000..=9999));

        let departure_time = Utc::now()
            .with_hour(departure_hour)
            .and_then(|t| t.with_minute(departure_minute))
            .and_then(|t| t.with_second(0))
            .unwrap_or_else(Utc::now);
        let arrival_time =
            departure_time + Duration::hours(duration_hours) + Duration::minutes(duration_minutes);

        let stops = if rng.gen_bool(0.3) { 1 } else { 0 };

        flights.push(json!({
            "id": format!("mock_flight_{}", i + 1),
            "price": {
                "total": price.to_string(),
                "currency": "USD",
            },
            "itineraries": [{
                "segments": [{
                    "departure": {
                        "iataCode": origin,
                        "at": departure_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    },
                    "arrival": {
                        "iataCode": destination,
                        "at": arrival_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    },
                    "carrierCode": airline_code,
                    "number": flight_number,
                    "aircraft": {"code": aircraft_code},
                    "operating": {"carrierCode": airline_code},
                    "duration": format!("PT{}H{}M", duration_hours, duration_minutes),
                    "id": format!("segment_{}", i + 1),
                    "numberOfStops": stops,
                    "blacklistedInEU": false,
                }],
            }],
            "numberOfBookableSeats": rng.gen_range(1..=50),
            "travelerPricings": [{
                "travelerId": "1",
                "fareOption": "STANDARD",
                "pricingOptions": {"fareType": ["PUBLISHED"]},
                "price": {
                    "currency": "USD",
                    "total": price.to_string(),
                    "base": ((price as f64 * 0.8) as i64).to_string(),
                },
            }],
        }));
    }

    flights
}

const HOTEL_CHAINS: [&str; 10] = [
    "Marriott",
    "Hilton",
    "Hyatt",
    "InterContinental",
    "Four Seasons",
    "Ritz-Carlton",
    "W Hotels",
    "Sheraton",
    "Westin",
    "Renaissance",
];

const HOTEL_AMENITIES: [&[&str]; 5] = [
    &["WiFi", "Pool", "Spa"],
    &["WiFi", "Gym", "Restaurant"],
    &["WiFi", "Pool", "Gym", "Spa"],
    &["WiFi", "Restaurant", "Bar"],
    &["WiFi", "Pool", "Gym", "Restaurant", "Spa"],
];

/// Six aggregator-shaped mock hotels for a city.
pub fn mock_hotels(city_code: &str) -> Vec<Value> {
    (0..6)
        .map(|i| {
            let base_price = 150 + i * 75;
            json!({
                "id": format!("mock_hotel_{}", i + 1),
                "name": format!("{} {}", HOTEL_CHAINS[i % HOTEL_CHAINS.len()], city_code),
                "rating": 4.0 + (i as f64) * 0.1,
                "location": {
                    "latitude": 40.7128 + (i as f64) * 0.01,
                    "longitude": -74.0060 + (i as f64) * 0.01,
                    "address": {
                        "cityName": city_code,
                        "countryCode": "US",
                    },
                },
                "amenities": HOTEL_AMENITIES[i % HOTEL_AMENITIES.len()],
                "price": {
                    "total": base_price.to_string(),
                    "currency": "USD",
                },
                "room": {"description": "Standard Room"},
                "boardType": "ROOM_ONLY",
                "image_url": stock_hotel_image(i),
            })
        })
        .collect()
}

/// Frontend-shaped mock results for the generic booking search, keyed by
/// search type.
pub fn mock_booking_results(search: &BookingSearchRequest) -> Vec<Value> {
    let from = search.from_location.as_deref().unwrap_or("New York");
    let to = search.to_location.as_deref().unwrap_or("London");
    let passengers = search.passengers as i64;

    match search.search_type.as_str() {
        "flights" => {
            let airlines = [
                "Delta",
                "United",
                "American",
                "Emirates",
                "Lufthansa",
                "British Airways",
                "Air France",
                "KLM",
                "Singapore Airlines",
                "Qatar Airways",
            ];
            let aircraft = [
                "Boeing 737",
                "Airbus A320",
                "Boeing 787",
                "Airbus A350",
                "Boeing 777",
                "Airbus A380",
            ];
            (0..6)
                .map(|i| {
                    let mut base_price = (200 + i * 50) as f64;
                    base_price *= match search.class_type.as_str() {
                        "premium" => 1.5,
                        "business" => 2.5,
                        "first" => 4.0,
                        _ => 1.0,
                    };
                    let duration_hours = 2 + (i % 4);
                    let duration_minutes = (i * 15) % 60;
                    let hour = 8 + (i * 2) % 12;
                    json!({
                        "id": format!("flight_{}", i + 1),
                        "airline": airlines[i % airlines.len()],
                        "flightNumber": format!("{}{}", &airlines[i % airlines.len()][..2].to_uppercase(), 1000 + i),
                        "from": from,
                        "to": to,
                        "departureTime": format!("{}:{:02} {}", hour, 30 + (i * 15) % 30, if hour < 12 { "AM" } else { "PM" }),
                        "departureDate": Utc::now().format("%Y-%m-%d").to_string(),
                        "duration": format!("{}h {}m", duration_hours, duration_minutes),
                        "price": (base_price as i64) * passengers,
                        "aircraft": aircraft[i % aircraft.len()],
                        "stops": i % 2,
                        "class": search.class_type,
                    })
                })
                .collect()
        }
        "hotels" => (0..6)
            .map(|i| {
                let base_price = (150 + i * 75) as i64;
                json!({
                    "id": format!("hotel_{}", i + 1),
                    "name": format!("{} {}", HOTEL_CHAINS[i % HOTEL_CHAINS.len()], to),
                    "location": to,
                    "rating": 4.0 + (i as f64) * 0.1,
                    "price": base_price * passengers,
                    "amenities": HOTEL_AMENITIES[i % HOTEL_AMENITIES.len()],
                    "description": format!(
                        "Luxurious {} property in the heart of {}",
                        HOTEL_CHAINS[i % HOTEL_CHAINS.len()], to
                    ),
                    "image": format!(
                        "https://images.unsplash.com/photo-{}?w=400&h=300&fit=crop",
                        1_550_000_000usize + i * 100_000
                    ),
                    "distance": format!("{:.1} km from center", 0.5 + (i as f64) * 0.3),
                })
            })
            .collect(),
        "activities" => {
            let activities = [
                "City Tour",
                "Museum Visit",
                "Adventure Hike",
                "Cooking Class",
                "Wine Tasting",
                "Boat Cruise",
                "Photography Tour",
                "Historical Walk",
                "Food Tour",
                "Spa Treatment",
            ];
            let categories = ["Culture", "Adventure", "Food", "Nature", "Wellness", "History"];
            (0..6)
                .map(|i| {
                    let base_price = (50 + i * 25) as i64;
                    json!({
                        "id": format!("activity_{}", i + 1),
                        "name": activities[i % activities.len()],
                        "location": to,
                        "rating": 4.0 + (i as f64) * 0.1,
                        "price": base_price * passengers,
                        "duration": format!("{} hours", 2 + (i % 4)),
                        "description": format!(
                            "Experience the best {} in {}",
                            activities[i % activities.len()].to_lowercase(), to
                        ),
                        "image": format!(
                            "https://images.unsplash.com/photo-{}?w=400&h=300&fit=crop",
                            1_560_000_000usize + i * 100_000
                        ),
                        "category": categories[i % categories.len()],
                    })
                })
                .collect()
        }
        _ => {
            let package_types = [
                "All-Inclusive Beach",
                "City Break",
                "Adventure Tour",
                "Cultural Experience",
                "Luxury Escape",
                "Family Fun",
            ];
            (0..6)
                .map(|i| {
                    let base_price = (800 + i * 200) as i64;
                    json!({
                        "id": format!("package_{}", i + 1),
                        "name": format!("{} Package", package_types[i % package_types.len()]),
                        "from": from,
                        "to": to,
                        "duration": format!("{} days", 5 + (i % 7)),
                        "price": base_price * passengers,
                        "description": format!(
                            "Complete {} experience from {} to {}",
                            package_types[i % package_types.len()].to_lowercase(), from, to
                        ),
                        "inclusions": ["Flight", "Hotel", "Transfers", "Some Meals", "Guided Tours"],
                        "image": format!(
                            "https://images.unsplash.com/photo-{}?w=400&h=300&fit=crop",
                            1_570_000_000usize + i * 100_000
                        ),
                    })
                })
                .collect()
        }
    }
}

const SUGGESTION_PREFIXES: [(&str, [&str; 6]); 12] = [
    ("par", ["Paris, France", "Barcelona, Spain", "Milan, Italy", "Bangkok, Thailand", "Park City, USA", "Paros, Greece"]),
    ("tok", ["Tokyo, Japan", "Toronto, Canada", "Stockholm, Sweden", "Istanbul, Turkey", "Toulouse, France", "Toledo, Spain"]),
    ("lon", ["London, UK", "Los Angeles, USA", "Lyon, France", "Lima, Peru", "Long Beach, USA", "Lombok, Indonesia"]),
    ("new", ["New York, USA", "New Delhi, India", "Newcastle, UK", "New Orleans, USA", "New Zealand", "Newfoundland, Canada"]),
    ("san", ["San Francisco, USA", "Santorini, Greece", "Santiago, Chile", "San Diego, USA", "San Antonio, USA", "San Jose, Costa Rica"]),
    ("dub", ["Dubai, UAE", "Dublin, Ireland", "Dubrovnik, Croatia", "Durban, South Africa", "Dubai Marina", "Dublin Castle"]),
    ("bea", ["Beach destinations", "Bali, Indonesia", "Barcelona, Spain", "Bangkok, Thailand", "Berlin, Germany", "Beirut, Lebanon"]),
    ("rom", ["Rome, Italy", "Roma, Italy", "Romania", "Romantic destinations", "Rome, Georgia", "Roman Colosseum"]),
    ("sea", ["Seattle, USA", "Seoul, South Korea", "Seville, Spain", "Seaside destinations", "Serengeti, Tanzania", "Seychelles"]),
    ("chi", ["Chicago, USA", "China", "Chile", "Chiang Mai, Thailand", "Chichen Itza, Mexico", "Chamonix, France"]),
    ("mou", ["Mount Fuji, Japan", "Mount Everest", "Mountain destinations", "Moscow, Russia", "Mumbai, India", "Munich, Germany"]),
    ("is", ["Istanbul, Turkey", "Island destinations", "Israel", "Isle of Skye, Scotland", "Isla Mujeres, Mexico", "Ischia, Italy"]),
];

const POPULAR_DESTINATIONS: [&str; 24] = [
    "Paris, France",
    "Tokyo, Japan",
    "New York, USA",
    "London, UK",
    "Barcelona, Spain",
    "Rome, Italy",
    "Bali, Indonesia",
    "Dubai, UAE",
    "Singapore",
    "Sydney, Australia",
    "Amsterdam, Netherlands",
    "Prague, Czech Republic",
    "Machu Picchu, Peru",
    "Petra, Jordan",
    "Angkor Wat, Cambodia",
    "Taj Mahal, India",
    "Grand Canyon, USA",
    "Niagara Falls",
    "Mount Fuji, Japan",
    "Swiss Alps",
    "Maldives",
    "Hawaii, USA",
    "Santorini, Greece",
    "Phuket, Thailand",
];

/// Prefix-table suggestions with a popular-destination substring match as
/// the last resort.
pub fn static_suggestions(query: &str) -> Vec<String> {
    let query_lower = query.to_lowercase();

    for (prefix, values) in SUGGESTION_PREFIXES.iter() {
        if query_lower.starts_with(prefix) {
            return values.iter().map(|s| s.to_string()).collect();
        }
    }

    POPULAR_DESTINATIONS
        .iter()
        .filter(|dest| dest.to_lowercase().contains(&query_lower))
        .take(12)
        .map(|s| s.to_string())
        .collect()
}

/// Deterministic recommendation block shaped like the LLM output the
/// personalized-recommendations endpoint promises.
pub fn mock_recommendations(request: &RecommendationsRequest) -> Value {
    let destinations: Vec<Value> = mock_destinations()
        .into_iter()
        .map(|dest| {
            json!({
                "id": dest.id,
                "name": dest.name,
                "country": dest.country,
                "description": dest.description,
                "image_url": dest.image_url,
                "rating": dest.rating,
                "price": dest.price,
                "highlights": dest.highlights,
            })
        })
        .collect();

    let budget = request.budget_range as f64;
    json!({
        "destinations": destinations,
        "itinerary": [
            {
                "title": "Day 1: Arrival and Orientation",
                "activities": [
                    "Check into hotel",
                    "Explore the local area",
                    "Visit a local restaurant for dinner",
                ],
            },
            {
                "title": "Day 2: Main Attractions",
                "activities": [
                    "Visit the main landmarks",
                    "Explore cultural sites",
                    "Try local cuisine",
                ],
            },
        ],
        "travelTips": [
            "Book accommodation early for better rates",
            "Check visa requirements before departure",
            "Pack for the local climate",
        ],
        "budgetBreakdown": {
            "accommodation": (budget * 0.4) as i64,
            "food": (budget * 0.25) as i64,
            "activities": (budget * 0.2) as i64,
            "transportation": (budget * 0.15) as i64,
            "currency": "USD",
        },
    })
}

pub fn fallback_recommendations() -> Value {
    json!({
        "destinations": [
            {
                "id": "tokyo",
                "name": "Tokyo",
                "country": "Japan",
                "continent": "Asia",
                "description": "Perfect for your interests and budget",
                "rating": 4.8,
                "price": "$$$",
            },
        ],
        "itinerary": [
            {
                "title": "Day 1: Arrival",
                "activities": ["Check in", "Explore local area"],
            },
        ],
    })
}

pub fn fallback_continents() -> Vec<Value> {
    vec![
        json!({"name": "Asia", "count": 48, "description": "Largest continent with diverse cultures, ancient civilizations, and modern cities", "visual_theme": "diverse landscapes and cultures"}),
        json!({"name": "Europe", "count": 44, "description": "Historic continent with rich culture, art, and architecture", "visual_theme": "historic cities and cultural heritage"}),
        json!({"name": "North America", "count": 23, "description": "Vast continent with diverse landscapes from Arctic to tropical", "visual_theme": "natural wonders and modern cities"}),
        json!({"name": "Africa", "count": 54, "description": "Continent of incredible wildlife, ancient history, and diverse cultures", "visual_theme": "wildlife and natural beauty"}),
        json!({"name": "Oceania", "count": 14, "description": "Island continent with stunning beaches and unique wildlife", "visual_theme": "island paradise and marine life"}),
        json!({"name": "South America", "count": 12, "description": "Continent of Amazon rainforest, Andes mountains, and vibrant cultures", "visual_theme": "rainforest and mountain landscapes"}),
        json!({"name": "Antarctica", "count": 0, "description": "Frozen continent of pristine wilderness and scientific research", "visual_theme": "ice and snow landscapes"}),
    ]
}

pub fn fallback_countries(continent: &str) -> Vec<Value> {
    match continent {
        "Asia" => vec![
            json!({"name": "Japan", "description": "Land of the rising sun with ancient traditions and modern technology", "cities": ["Tokyo", "Kyoto", "Osaka"]}),
            json!({"name": "Thailand", "description": "Land of smiles with beautiful beaches and rich culture", "cities": ["Bangkok", "Phuket", "Chiang Mai"]}),
            json!({"name": "India", "description": "Incredible diversity with ancient history and vibrant culture", "cities": ["Mumbai", "Delhi", "Jaipur"]}),
            json!({"name": "Vietnam", "description": "Stunning landscapes and delicious cuisine", "cities": ["Ho Chi Minh City", "Hanoi", "Da Nang"]}),
            json!({"name": "South Korea", "description": "Modern cities and traditional culture", "cities": ["Seoul", "Busan", "Jeju"]}),
        ],
        "Europe" => vec![
            json!({"name": "France", "description": "Art, culture, and culinary excellence", "cities": ["Paris", "Lyon", "Nice"]}),
            json!({"name": "Italy", "description": "Ancient history, art, and delicious food", "cities": ["Rome", "Florence", "Venice"]}),
            json!({"name": "Spain", "description": "Vibrant culture, beaches, and architecture", "cities": ["Madrid", "Barcelona", "Seville"]}),
            json!({"name": "Germany", "description": "Efficient cities and beautiful countryside", "cities": ["Berlin", "Munich", "Hamburg"]}),
            json!({"name": "Netherlands", "description": "Windmills, tulips, and cycling culture", "cities": ["Amsterdam", "Rotterdam", "The Hague"]}),
        ],
        _ => Vec::new(),
    }
}

pub fn fallback_cities(country: &str) -> Vec<Value> {
    match country {
        "Japan" => vec![
            json!({"id": "tokyo", "name": "Tokyo", "description": "Modern metropolis with ancient traditions", "areas": ["Shibuya", "Shinjuku", "Harajuku"]}),
            json!({"id": "kyoto", "name": "Kyoto", "description": "Ancient capital with temples and gardens", "areas": ["Gion", "Arashiyama", "Higashiyama"]}),
            json!({"id": "osaka", "name": "Osaka", "description": "Food capital with vibrant nightlife", "areas": ["Dotonbori", "Namba", "Umeda"]}),
        ],
        "France" => vec![
            json!({"id": "paris", "name": "Paris", "description": "City of light with art and romance", "areas": ["Eiffel Tower", "Louvre", "Montmartre"]}),
            json!({"id": "lyon", "name": "Lyon", "description": "Gastronomic capital of France", "areas": ["Vieux Lyon", "Presqu'ile", "Croix-Rousse"]}),
            json!({"id": "nice", "name": "Nice", "description": "Beautiful coastal city on the French Riviera", "areas": ["Promenade des Anglais", "Old Town", "Cimiez"]}),
        ],
        _ => Vec::new(),
    }
}

pub fn fallback_areas(city: &str) -> Vec<Value> {
    match city {
        "Tokyo" => vec![
            json!({"id": "shibuya", "name": "Shibuya", "description": "Fashion and youth culture district", "activities": ["Shopping", "People watching", "Nightlife"]}),
            json!({"id": "shinjuku", "name": "Shinjuku", "description": "Business and entertainment district", "activities": ["Skyscrapers", "Golden Gai", "Shinjuku Gyoen"]}),
            json!({"id": "harajuku", "name": "Harajuku", "description": "Fashion and street culture", "activities": ["Takeshita Street", "Meiji Shrine", "Yoyogi Park"]}),
        ],
        "Paris" => vec![
            json!({"id": "eiffel", "name": "Eiffel Tower Area", "description": "Iconic landmark and surrounding gardens", "activities": ["Eiffel Tower", "Champ de Mars", "Trocadero"]}),
            json!({"id": "louvre", "name": "Louvre District", "description": "Art and culture center", "activities": ["Louvre Museum", "Tuileries Garden", "Palais Royal"]}),
            json!({"id": "montmartre", "name": "Montmartre", "description": "Artistic hilltop neighborhood", "activities": ["Sacre-Coeur", "Place du Tertre", "Moulin Rouge"]}),
        ],
        _ => Vec::new(),
    }
}

pub fn fallback_itinerary(destination: &str) -> Value {
    json!({
        "destination": destination,
        "days": [
            {
                "title": "Day 1: Arrival and Orientation",
                "activities": [
                    "Check into hotel",
                    "Explore the local area",
                    "Visit a local restaurant for dinner",
                    "Rest and prepare for tomorrow",
                ],
            },
            {
                "title": "Day 2: Main Attractions",
                "activities": [
                    "Visit the main landmarks",
                    "Explore cultural sites",
                    "Try local cuisine",
                    "Evening entertainment",
                ],
            },
        ],
    })
}

pub fn fallback_detailed_itinerary(destination: &str, duration: &str, travelers: u32) -> Value {
    json!({
        "tripOverview": {
            "title": format!("{} Adventure", destination),
            "destination": destination,
            "duration": duration,
            "travelers": travelers,
            "bestTime": "Year-round",
            "weather": "Tropical",
            "summary": format!("An amazing {} adventure in {}!", duration, destination),
        },
        "dailyItinerary": [
            {
                "day": 1,
                "title": "Arrival and Exploration",
                "morning": ["Check into hotel", "Explore local area"],
                "afternoon": ["Visit main attractions", "Local lunch"],
                "evening": ["Dinner at local restaurant", "Evening stroll"],
                "accommodation": "3-star hotel",
                "meals": ["Breakfast", "Lunch", "Dinner"],
                "transportation": "Local transport",
            },
        ],
        "budgetBreakdown": {
            "accommodation": {"total": 350, "perNight": 50, "type": "3-star hotel"},
            "meals": {"total": 210, "perDay": 30},
            "activities": {"total": 180},
            "transportation": {"total": 120},
            "miscellaneous": {"total": 50},
            "totalTripCost": 910,
            "costPerPerson": 455,
            "currency": "USD",
        },
        "travelTips": [
            {"category": "Packing", "tips": ["Pack light", "Bring sunscreen", "Comfortable shoes"]},
            {"category": "Local Customs", "tips": ["Respect local culture", "Learn basic phrases", "Dress appropriately"]},
        ],
        "accommodations": [
            {"name": "Local Hotel", "type": "3-star", "location": "City center", "price": "50/night"},
        ],
        "restaurants": [
            {"name": "Local Restaurant", "cuisine": "Local", "priceRange": "$$"},
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingSearchRequest;

    #[test]
    fn destinations_filter_by_continent_case_insensitive() {
        let europe = mock_destination_values(Some("europe"), 50);
        assert_eq!(europe.len(), 1);
        assert_eq!(europe[0]["continent"], "Europe");
    }

    #[test]
    fn destinations_respect_limit() {
        assert_eq!(mock_destination_values(None, 3).len(), 3);
        assert_eq!(mock_destination_values(None, 50).len(), 6);
    }

    #[test]
    fn flight_offers_are_aggregator_shaped() {
        let flights = mock_flight_offers("JFK", "LHR");
        assert_eq!(flights.len(), 6);
        for flight in &flights {
            assert_eq!(
                flight.pointer("/itineraries/0/segments/0/departure/iataCode"),
                Some(&serde_json::json!("JFK"))
            );
            let total = flight.pointer("/price/total").unwrap().as_str().unwrap();
            assert!(total.parse::<i64>().unwrap() >= 150);
        }
    }

    #[test]
    fn booking_results_scale_with_passengers_and_class() {
        let economy = BookingSearchRequest {
            from_location: None,
            to_location: None,
            departure_date: None,
            return_date: None,
            passengers: 1,
            class_type: "economy".to_string(),
            search_type: "flights".to_string(),
        };
        let first = BookingSearchRequest {
            class_type: "first".to_string(),
            ..economy.clone()
        };

        let economy_price = mock_booking_results(&economy)[0]["price"].as_i64().unwrap();
        let first_price = mock_booking_results(&first)[0]["price"].as_i64().unwrap();
        assert_eq!(first_price, economy_price * 4);
    }

    #[test]
    fn suggestions_prefix_table_then_substring() {
        assert_eq!(static_suggestions("paris")[0], "Paris, France");
        let maldives = static_suggestions("mald");
        assert_eq!(maldives, vec!["Maldives".to_string()]);
        assert!(static_suggestions("zzzz").is_empty());
    }

    #[test]
    fn destination_image_is_stable() {
        assert_eq!(
            destination_image_for("Kyoto, Japan"),
            destination_image_for("Kyoto, Japan")
        );
    }

    #[test]
    fn mock_recommendations_has_required_keys() {
        let request = RecommendationsRequest {
            age_group: "26-35".to_string(),
            group_size: "couple".to_string(),
            budget_range: 2000,
            trip_duration: "week".to_string(),
            interests: vec!["culture".to_string()],
            country: None,
            additional_notes: None,
        };
        let recommendations = mock_recommendations(&request);
        for key in ["destinations", "itinerary", "travelTips", "budgetBreakdown"] {
            assert!(recommendations.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(recommendations["budgetBreakdown"]["accommodation"], 800);
    }
}
