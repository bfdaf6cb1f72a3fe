// Core records exchanged between the pipeline stages.
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::analyzer::report::MarketAnalysis;

/// One row of the raw flight-record table as supplied by the acquisition
/// layer. Fields are loosely typed: numeric columns may arrive as numbers
/// or numeric strings and are coerced during cleaning.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFlightRecord {
    pub date: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub price: Option<Value>,
    pub airline: Option<String>,
    pub bookings: Option<Value>,
    pub capacity: Option<Value>,
    pub hour: Option<u32>,
}

/// A validated flight record with derived calendar fields.
#[derive(Debug, Clone)]
pub struct FlightRecord {
    pub date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub price: f64,
    pub airline: Option<String>,
    pub bookings: Option<u32>,
    pub capacity: Option<u32>,
    pub hour: Option<u32>,
    /// bookings / capacity, clamped to [0, 1]. Present only when both
    /// bookings and a nonzero capacity are present.
    pub load_factor: Option<f64>,
    pub day_of_week: Weekday,
    pub month: u32,
    pub week: u32,
    pub is_weekend: bool,
}

impl FlightRecord {
    pub fn route(&self) -> String {
        format!("{}-{}", self.origin, self.destination)
    }
}

/// A single generated insight, regardless of which tier produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub title: String,
    pub content: String,
}

/// Full per-request result returned to the request-handling layer.
/// Serializes directly to the response JSON.
#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub analysis: MarketAnalysis,
    pub insights: Vec<Insight>,
    pub sentiment: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("remote backend not configured")]
    NotConfigured,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rate limited (HTTP 429)")]
    RateLimited,
    #[error("API returned status {0}")]
    Status(u16),
    #[error("response contained no usable insights")]
    EmptyResponse,
}
