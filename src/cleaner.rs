use chrono::{Datelike, NaiveDate, Weekday};
use serde_json::Value;
use tracing::debug;

use crate::model::{FlightRecord, RawFlightRecord};

/// Hard floor and ceiling for plausible fares, in currency units. The IQR
/// bounds are clamped into this window before filtering.
const PRICE_FLOOR: f64 = 50.0;
const PRICE_CEILING: f64 = 2000.0;

pub struct RecordCleaner;

impl RecordCleaner {
    /// Validates and normalizes a raw record table. Rows that cannot be
    /// salvaged are dropped; the function itself is total and never fails.
    ///
    /// Steps: parse dates, coerce numeric columns, drop rows missing date
    /// or price, filter price outliers by clamped IQR bounds, derive
    /// load factor and calendar fields.
    pub fn clean(raw: &[RawFlightRecord]) -> Vec<FlightRecord> {
        let mut records: Vec<FlightRecord> = raw.iter().filter_map(Self::coerce_row).collect();

        let dropped = raw.len() - records.len();
        if dropped > 0 {
            debug!("Dropped {} unparseable rows during cleaning", dropped);
        }

        let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
        if let Some((lower, upper)) = outlier_bounds(&prices) {
            let before = records.len();
            records.retain(|r| r.price >= lower && r.price <= upper);
            if records.len() < before {
                debug!(
                    "Outlier filter [{:.0}, {:.0}] removed {} rows",
                    lower,
                    upper,
                    before - records.len()
                );
            }
        }

        records
    }

    fn coerce_row(raw: &RawFlightRecord) -> Option<FlightRecord> {
        let date = raw
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())?;
        let price = raw.price.as_ref().and_then(coerce_f64)?;
        if !price.is_finite() || price <= 0.0 {
            return None;
        }
        let origin = raw.origin.clone()?;
        let destination = raw.destination.clone()?;

        let bookings = raw.bookings.as_ref().and_then(coerce_u32);
        let capacity = raw.capacity.as_ref().and_then(coerce_u32);
        let load_factor = match (bookings, capacity) {
            (Some(b), Some(c)) if c > 0 => Some((f64::from(b) / f64::from(c)).clamp(0.0, 1.0)),
            _ => None,
        };

        let day_of_week = date.weekday();
        Some(FlightRecord {
            date,
            origin,
            destination,
            price,
            airline: raw.airline.clone(),
            bookings,
            capacity,
            hour: raw.hour,
            load_factor,
            day_of_week,
            month: date.month(),
            week: date.iso_week().week(),
            is_weekend: matches!(day_of_week, Weekday::Sat | Weekday::Sun),
        })
    }
}

/// Numeric columns may arrive as JSON numbers or numeric strings.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_u32(value: &Value) -> Option<u32> {
    coerce_f64(value).filter(|v| *v >= 0.0).map(|v| v as u32)
}

/// IQR outlier bounds clamped into the plausible fare window. None when
/// there are no prices to rank.
fn outlier_bounds(prices: &[f64]) -> Option<(f64, f64)> {
    if prices.is_empty() {
        return None;
    }
    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    Some((
        (q1 - 1.5 * iqr).max(PRICE_FLOOR),
        (q3 + 1.5 * iqr).min(PRICE_CEILING),
    ))
}

/// Linear-interpolated quantile over a sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(date: &str, price: Value) -> RawFlightRecord {
        RawFlightRecord {
            date: Some(date.into()),
            origin: Some("SYD".into()),
            destination: Some("MEL".into()),
            price: Some(price),
            ..RawFlightRecord::default()
        }
    }

    #[test]
    fn drops_rows_with_bad_dates_or_prices() {
        let rows = vec![
            raw("2024-03-01", json!(400)),
            raw("not-a-date", json!(400)),
            raw("2024-03-02", json!("oops")),
            RawFlightRecord::default(),
        ];
        let cleaned = RecordCleaner::clean(&rows);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].price, 400.0);
    }

    #[test]
    fn coerces_numeric_strings() {
        let rows = vec![raw("2024-03-01", json!("415.5"))];
        let cleaned = RecordCleaner::clean(&rows);
        assert_eq!(cleaned[0].price, 415.5);
    }

    #[test]
    fn filters_price_outliers() {
        let mut rows: Vec<RawFlightRecord> = (0..20)
            .map(|i| raw("2024-03-01", json!(400 + i)))
            .collect();
        rows.push(raw("2024-03-02", json!(5000)));
        let cleaned = RecordCleaner::clean(&rows);
        assert_eq!(cleaned.len(), 20);
        assert!(cleaned.iter().all(|r| r.price < 2000.0));
    }

    #[test]
    fn load_factor_is_clamped_to_unit_interval() {
        let mut row = raw("2024-03-01", json!(400));
        row.bookings = Some(json!(250));
        row.capacity = Some(json!(200));
        let cleaned = RecordCleaner::clean(&[row]);
        assert_eq!(cleaned[0].load_factor, Some(1.0));
    }

    #[test]
    fn zero_capacity_yields_no_load_factor() {
        let mut row = raw("2024-03-01", json!(400));
        row.bookings = Some(json!(100));
        row.capacity = Some(json!(0));
        let cleaned = RecordCleaner::clean(&[row]);
        assert_eq!(cleaned[0].load_factor, None);
    }

    #[test]
    fn derives_calendar_fields() {
        // 2024-03-02 is a Saturday in ISO week 9.
        let cleaned = RecordCleaner::clean(&[raw("2024-03-02", json!(400))]);
        let rec = &cleaned[0];
        assert_eq!(rec.day_of_week, Weekday::Sat);
        assert!(rec.is_weekend);
        assert_eq!(rec.month, 3);
        assert_eq!(rec.week, 9);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(RecordCleaner::clean(&[]).is_empty());
    }
}
