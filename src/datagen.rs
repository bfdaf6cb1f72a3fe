// Mock flight-record generator standing in for a live fare feed. Prices
// follow distance, season, day of week and a randomized competition
// factor so that downstream trend analysis has realistic structure.
use chrono::{Datelike, Duration, Utc, Weekday};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value;
use tracing::debug;

use crate::model::RawFlightRecord;

struct AirlineProfile {
    code: &'static str,
    weight: f64,
    seats: (u32, u32),
}

const AIRLINES: [AirlineProfile; 5] = [
    AirlineProfile {
        code: "QF",
        weight: 0.30,
        seats: (180, 350),
    },
    AirlineProfile {
        code: "JQ",
        weight: 0.25,
        seats: (150, 200),
    },
    AirlineProfile {
        code: "VA",
        weight: 0.25,
        seats: (150, 200),
    },
    AirlineProfile {
        code: "TT",
        weight: 0.15,
        seats: (150, 200),
    },
    AirlineProfile {
        code: "3K",
        weight: 0.05,
        seats: (150, 200),
    },
];

fn route_distance_km(origin: &str, destination: &str) -> f64 {
    match (origin, destination) {
        ("SYD", "MEL") | ("MEL", "SYD") => 713.0,
        ("SYD", "BNE") | ("BNE", "SYD") => 736.0,
        ("SYD", "PER") | ("PER", "SYD") => 3278.0,
        ("MEL", "BNE") | ("BNE", "MEL") => 1374.0,
        ("MEL", "PER") | ("PER", "MEL") => 2721.0,
        ("BNE", "PER") | ("PER", "BNE") => 3604.0,
        ("SYD", "ADL") | ("ADL", "SYD") => 1166.0,
        ("MEL", "ADL") | ("ADL", "MEL") => 654.0,
        _ => 1500.0,
    }
}

fn seasonal_multiplier(month: u32) -> f64 {
    match month {
        12 | 1 | 2 => 1.4,
        6 | 7 | 8 => 1.25,
        9 | 10 | 11 => 1.15,
        _ => 1.1,
    }
}

fn weekday_multiplier(day: Weekday) -> f64 {
    match day {
        Weekday::Fri | Weekday::Sat | Weekday::Sun => 1.2,
        Weekday::Mon | Weekday::Tue => 0.9,
        _ => 1.0,
    }
}

/// Generates `days` worth of raw records for one route, ending today.
/// Weekends carry more flights than weekdays.
pub fn generate_route_records(origin: &str, destination: &str, days: i64) -> Vec<RawFlightRecord> {
    let mut rng = rand::rng();
    let mut records = Vec::new();
    let today = Utc::now().date_naive();
    let distance = route_distance_km(origin, destination);
    let base_price = (distance * 0.25).max(200.0);

    for offset in 0..days {
        let date = today - Duration::days(days - 1 - offset);
        let weekday = date.weekday();
        let is_weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
        let daily_flights = if is_weekend { 12 } else { 8 } + rng.random_range(0..8);

        for _ in 0..daily_flights {
            let profile = match AIRLINES.choose_weighted(&mut rng, |a| a.weight) {
                Ok(p) => p,
                Err(_) => &AIRLINES[0],
            };
            let capacity = rng.random_range(profile.seats.0..=profile.seats.1);
            let load_factor = rng.random_range(0.6..0.9);
            let bookings = (capacity as f64 * load_factor) as u32;

            let price = base_price
                * seasonal_multiplier(date.month())
                * weekday_multiplier(weekday)
                * rng.random_range(0.85..1.25)
                * rng.random_range(0.8..1.1);

            records.push(RawFlightRecord {
                date: Some(date.format("%Y-%m-%d").to_string()),
                origin: Some(origin.to_string()),
                destination: Some(destination.to_string()),
                price: Some(Value::from((price * 100.0).round() / 100.0)),
                airline: Some(profile.code.to_string()),
                bookings: Some(Value::from(bookings)),
                capacity: Some(Value::from(capacity)),
                hour: Some(rng.random_range(6..23)),
            });
        }
    }

    debug!(
        "Generated {} mock records for {origin}-{destination}",
        records.len()
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_records_for_every_day() {
        let records = generate_route_records("SYD", "MEL", 7);
        // At least 8 flights per day, at most 12 + 7 extras.
        assert!(records.len() >= 7 * 8);
        assert!(records.len() <= 7 * 19);
        let mut dates: Vec<_> = records.iter().filter_map(|r| r.date.clone()).collect();
        dates.sort();
        dates.dedup();
        assert_eq!(dates.len(), 7);
    }

    #[test]
    fn prices_stay_in_a_plausible_band() {
        for record in generate_route_records("SYD", "PER", 3) {
            let price = record
                .price
                .as_ref()
                .and_then(|v| v.as_f64())
                .unwrap_or_default();
            // Base 819.5 swung by at most 1.4 * 1.2 * 1.25 * 1.1.
            assert!(price > 200.0 && price < 2500.0, "price {price} out of band");
        }
    }

    #[test]
    fn bookings_never_exceed_capacity() {
        for record in generate_route_records("MEL", "ADL", 5) {
            let bookings = record
                .bookings
                .as_ref()
                .and_then(|v| v.as_u64())
                .unwrap_or_default();
            let capacity = record
                .capacity
                .as_ref()
                .and_then(|v| v.as_u64())
                .unwrap_or_default();
            assert!(bookings <= capacity);
            assert!(capacity >= 150 && capacity <= 350);
        }
    }

    #[test]
    fn unknown_route_falls_back_to_default_distance() {
        assert_eq!(route_distance_km("SYD", "CNS"), 1500.0);
        assert_eq!(route_distance_km("MEL", "SYD"), 713.0);
    }

    #[test]
    fn summer_months_carry_the_highest_multiplier() {
        assert_eq!(seasonal_multiplier(1), 1.4);
        assert_eq!(seasonal_multiplier(7), 1.25);
        assert_eq!(seasonal_multiplier(4), 1.1);
        assert_eq!(seasonal_multiplier(10), 1.15);
    }
}
