use chrono::{Datelike, Utc};
use tracing::{info, warn};

use super::defaults;
use super::report::MarketAnalysis;
use super::statistics::StatisticsSummarizer;
use super::trends::TrendEngine;
use crate::cleaner::RecordCleaner;
use crate::model::{FlightRecord, RawFlightRecord};

/// Orchestrates clean -> aggregate -> summarize into one analysis object.
///
/// The pipeline is total: an empty or fully unusable input table yields the
/// canonical default analysis, never a partial or null result.
pub struct MarketAnalysisAssembler {
    cleaned: Option<Vec<FlightRecord>>,
}

impl MarketAnalysisAssembler {
    pub fn new() -> Self {
        Self { cleaned: None }
    }

    pub fn analyze(&mut self, raw: &[RawFlightRecord]) -> MarketAnalysis {
        if raw.is_empty() {
            warn!("Empty record table; returning default analysis");
            return defaults::default_analysis();
        }

        let records = RecordCleaner::clean(raw);
        if records.is_empty() {
            warn!(
                "All {} raw rows were dropped during cleaning; returning default analysis",
                raw.len()
            );
            return defaults::default_analysis();
        }
        info!("Analyzing {} cleaned records ({} raw)", records.len(), raw.len());

        let current_month = Utc::now().month();
        let analysis = MarketAnalysis {
            price_trends: TrendEngine::price_trends(&records),
            demand_patterns: TrendEngine::demand_patterns(&records),
            popular_routes: TrendEngine::popular_routes(&records),
            seasonal_trends: TrendEngine::seasonal_trends(&records),
            airline_performance: TrendEngine::airline_performance(&records),
            capacity_utilization: TrendEngine::capacity_utilization(&records),
            statistics: StatisticsSummarizer::summarize(&records),
            forecasting: TrendEngine::forecast(&records, current_month),
            market_insights: TrendEngine::market_insights(&records),
        };

        // Retained for potential reuse within the same request.
        self.cleaned = Some(records);
        analysis
    }

    pub fn cleaned_records(&self) -> Option<&[FlightRecord]> {
        self.cleaned.as_deref()
    }
}

impl Default for MarketAnalysisAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_row(date: &str, price: i64, bookings: i64, capacity: i64) -> RawFlightRecord {
        RawFlightRecord {
            date: Some(date.into()),
            origin: Some("SYD".into()),
            destination: Some("MEL".into()),
            price: Some(json!(price)),
            airline: Some("QF".into()),
            bookings: Some(json!(bookings)),
            capacity: Some(json!(capacity)),
            hour: None,
        }
    }

    #[test]
    fn empty_table_yields_full_default_analysis() {
        let mut assembler = MarketAnalysisAssembler::new();
        let analysis = assembler.analyze(&[]);
        assert_eq!(analysis.statistics.avg_price, 485);
        assert_eq!(analysis.demand_patterns.daily_patterns.labels.len(), 7);
        assert_eq!(analysis.seasonal_trends.monthly_trends.labels.len(), 12);
        assert!(!analysis.market_insights.is_empty());
        assert!(assembler.cleaned_records().is_none());
    }

    #[test]
    fn unusable_rows_yield_default_analysis() {
        let junk = vec![RawFlightRecord::default(), RawFlightRecord::default()];
        let mut assembler = MarketAnalysisAssembler::new();
        let analysis = assembler.analyze(&junk);
        assert_eq!(analysis.statistics.market_health, "Good");
    }

    #[test]
    fn real_rows_flow_through_all_sections() {
        let rows: Vec<RawFlightRecord> = (1..=20)
            .map(|i| raw_row(&format!("2024-03-{i:02}"), 400 + i, 150, 200))
            .collect();
        let mut assembler = MarketAnalysisAssembler::new();
        let analysis = assembler.analyze(&rows);

        assert_eq!(analysis.statistics.total_flights, 20);
        assert_eq!(analysis.statistics.unique_routes, 1);
        assert_eq!(analysis.popular_routes.route_analysis.top_route, "SYD-MEL");
        assert_eq!(analysis.airline_performance.market_share.labels[0], "Qantas");
        assert_eq!(analysis.capacity_utilization.overall_utilization, 75.0);
        assert_eq!(assembler.cleaned_records().map(|r| r.len()), Some(20));

        // Serializes cleanly for the response layer.
        let json = serde_json::to_value(&analysis).unwrap();
        assert!(json.get("forecasting").is_some());
        assert!(json.get("statistics").unwrap().get("price_change").is_some());
    }
}
