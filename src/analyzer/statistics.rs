// Scalar summary statistics and the qualitative market-health score.
use std::collections::BTreeSet;

use super::defaults;
use super::report::{DateRange, Statistics};
use crate::model::FlightRecord;
use crate::utils::{mean, round2, round3, std_dev};

pub struct StatisticsSummarizer;

impl StatisticsSummarizer {
    pub fn summarize(records: &[FlightRecord]) -> Statistics {
        if records.is_empty() {
            return defaults::statistics();
        }

        let mut prices: Vec<f64> = records.iter().map(|r| r.price).collect();
        prices.sort_by(|a, b| a.total_cmp(b));
        let avg_price = mean(&prices);

        let bookings: Vec<f64> = records
            .iter()
            .filter_map(|r| r.bookings.map(f64::from))
            .collect();
        let total_capacity: u64 = records
            .iter()
            .filter_map(|r| r.capacity.map(u64::from))
            .sum();
        let load_factors: Vec<f64> = records.iter().filter_map(|r| r.load_factor).collect();

        let routes: BTreeSet<(&str, &str)> = records
            .iter()
            .map(|r| (r.origin.as_str(), r.destination.as_str()))
            .collect();
        let unique_routes = routes.len();

        let start = records.iter().map(|r| r.date).min().unwrap_or_default();
        let end = records.iter().map(|r| r.date).max().unwrap_or_default();

        let cv = if avg_price > 0.0 {
            std_dev(&prices) / avg_price
        } else {
            0.0
        };
        let avg_load_factor = if load_factors.is_empty() {
            None
        } else {
            Some(mean(&load_factors))
        };
        let score = health_score(cv, avg_load_factor, unique_routes);

        Statistics {
            total_flights: records.len(),
            avg_price: avg_price as i64,
            median_price: median(&prices) as i64,
            price_std: round2(std_dev(&prices)),
            min_price: prices.first().copied().unwrap_or(0.0) as i64,
            max_price: prices.last().copied().unwrap_or(0.0) as i64,
            total_bookings: bookings.iter().sum::<f64>() as u64,
            avg_bookings: mean(&bookings) as i64,
            total_capacity,
            avg_load_factor: round3(avg_load_factor.unwrap_or(0.0)),
            unique_routes,
            demand_score: demand_score(records),
            price_change: price_change(records),
            date_range: DateRange {
                start: start.format("%Y-%m-%d").to_string(),
                end: end.format("%Y-%m-%d").to_string(),
                days: (end - start).num_days(),
            },
            market_health: health_label(score).into(),
        }
    }
}

/// Median over a sorted slice; even lengths average the middle pair.
fn median(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Mean price of the chronologically later half versus the earlier half,
/// as a signed percentage string.
pub fn price_change(records: &[FlightRecord]) -> String {
    let half = records.len() / 2;
    if half == 0 {
        return "0.0%".into();
    }
    let mut sorted: Vec<&FlightRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);
    let first: Vec<f64> = sorted[..half].iter().map(|r| r.price).collect();
    let last: Vec<f64> = sorted[sorted.len() - half..].iter().map(|r| r.price).collect();
    let first_mean = mean(&first);
    if first_mean == 0.0 {
        return "0.0%".into();
    }
    let change = (mean(&last) - first_mean) / first_mean * 100.0;
    format!("{change:+.1}%")
}

/// Mean bookings over mean capacity, percent, across rows carrying both;
/// 50 when no such rows exist.
pub fn demand_score(records: &[FlightRecord]) -> u32 {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|r| match (r.bookings, r.capacity) {
            (Some(b), Some(c)) => Some((f64::from(b), f64::from(c))),
            _ => None,
        })
        .collect();
    if pairs.is_empty() {
        return 50;
    }
    let mean_bookings = mean(&pairs.iter().map(|(b, _)| *b).collect::<Vec<f64>>());
    let mean_capacity = mean(&pairs.iter().map(|(_, c)| *c).collect::<Vec<f64>>());
    if mean_capacity == 0.0 {
        return 50;
    }
    (mean_bookings / mean_capacity * 100.0) as u32
}

/// 0-6 point rubric: price stability, load factor, route diversity.
pub fn health_score(price_cv: f64, avg_load_factor: Option<f64>, unique_routes: usize) -> u32 {
    let mut score = 0;
    if price_cv < 0.2 {
        score += 2;
    } else if price_cv < 0.3 {
        score += 1;
    }
    if let Some(lf) = avg_load_factor {
        if lf > 0.8 {
            score += 2;
        } else if lf > 0.7 {
            score += 1;
        }
    }
    if unique_routes > 10 {
        score += 2;
    } else if unique_routes > 5 {
        score += 1;
    }
    score
}

pub fn health_label(score: u32) -> &'static str {
    match score {
        5.. => "Excellent",
        3..=4 => "Good",
        1..=2 => "Fair",
        _ => "Poor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, NaiveDate, Weekday};

    fn record(date: NaiveDate, price: f64) -> FlightRecord {
        FlightRecord {
            date,
            origin: "SYD".into(),
            destination: "MEL".into(),
            price,
            airline: None,
            bookings: Some(150),
            capacity: Some(200),
            hour: None,
            load_factor: Some(0.75),
            day_of_week: date.weekday(),
            month: date.month(),
            week: date.iso_week().week(),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }

    #[test]
    fn price_change_formats_signed_percentage() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut records = Vec::new();
        for i in 0..4 {
            records.push(record(start + Duration::days(i), 400.0));
        }
        for i in 4..8 {
            records.push(record(start + Duration::days(i), 460.0));
        }
        assert_eq!(price_change(&records), "+15.0%");
    }

    #[test]
    fn price_change_of_single_record_is_flat() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(price_change(&[record(start, 400.0)]), "0.0%");
    }

    #[test]
    fn falling_prices_get_negative_sign() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let records = vec![record(start, 500.0), record(start + Duration::days(1), 450.0)];
        assert_eq!(price_change(&records), "-10.0%");
    }

    #[test]
    fn healthy_market_scores_excellent() {
        let score = health_score(0.15, Some(0.85), 12);
        assert_eq!(score, 6);
        assert_eq!(health_label(score), "Excellent");
    }

    #[test]
    fn degraded_market_scores_poor() {
        let score = health_score(0.5, Some(0.5), 2);
        assert_eq!(score, 0);
        assert_eq!(health_label(score), "Poor");
    }

    #[test]
    fn demand_score_reflects_load() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let records = vec![record(start, 400.0), record(start, 420.0)];
        assert_eq!(demand_score(&records), 75);
    }

    #[test]
    fn demand_score_defaults_without_capacity() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut rec = record(start, 400.0);
        rec.bookings = None;
        rec.capacity = None;
        assert_eq!(demand_score(&[rec]), 50);
    }

    #[test]
    fn summarize_counts_routes_and_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut records: Vec<FlightRecord> =
            (0..10).map(|i| record(start + Duration::days(i), 400.0 + i as f64)).collect();
        records[3].destination = "BNE".into();
        let stats = StatisticsSummarizer::summarize(&records);
        assert_eq!(stats.total_flights, 10);
        assert_eq!(stats.unique_routes, 2);
        assert_eq!(stats.date_range.days, 9);
        assert_eq!(stats.date_range.start, "2024-03-01");
        assert_eq!(stats.date_range.end, "2024-03-10");
    }
}
