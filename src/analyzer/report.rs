// Typed sub-sections of the market analysis object. Every labels vector is
// kept the same length as its value vectors by the producing code; the
// constructors below assert that pairing in debug builds.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            TrendDirection::Increasing
        } else if slope < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyPriceTrends {
    pub labels: Vec<String>,
    pub avg_prices: Vec<f64>,
    pub min_prices: Vec<f64>,
    pub max_prices: Vec<f64>,
    pub price_std: Vec<f64>,
}

impl WeeklyPriceTrends {
    pub fn new(
        labels: Vec<String>,
        avg_prices: Vec<f64>,
        min_prices: Vec<f64>,
        max_prices: Vec<f64>,
        price_std: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(labels.len(), avg_prices.len());
        debug_assert_eq!(labels.len(), min_prices.len());
        debug_assert_eq!(labels.len(), max_prices.len());
        debug_assert_eq!(labels.len(), price_std.len());
        Self {
            labels,
            avg_prices,
            min_prices,
            max_prices,
            price_std,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyPriceTrends {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    pub direction: TrendDirection,
    pub volatility: f64,
    pub trend_strength: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceTrends {
    pub weekly_trends: WeeklyPriceTrends,
    pub daily_trends: DailyPriceTrends,
    pub trend_analysis: TrendAnalysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyDemand {
    /// Always the 7 canonical weekday names, Monday first.
    pub labels: Vec<String>,
    pub bookings: Vec<f64>,
    pub avg_prices: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyDemand {
    /// Always 12 entries, "Month 1" through "Month 12".
    pub labels: Vec<String>,
    pub bookings: Vec<f64>,
    pub avg_prices: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekendSplit {
    pub weekday_bookings: f64,
    pub weekend_bookings: f64,
    pub weekday_price: f64,
    pub weekend_price: f64,
    pub weekday_load_factor: f64,
    pub weekend_load_factor: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeakPeriods {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off_peak_hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_demand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_demand: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemandPatterns {
    pub daily_patterns: DailyDemand,
    pub monthly_patterns: MonthlyDemand,
    pub weekend_analysis: WeekendSplit,
    pub peak_periods: PeakPeriods,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopRoutes {
    pub labels: Vec<String>,
    pub bookings: Vec<f64>,
    pub avg_prices: Vec<f64>,
    pub market_share: Vec<f64>,
}

impl TopRoutes {
    pub fn new(
        labels: Vec<String>,
        bookings: Vec<f64>,
        avg_prices: Vec<f64>,
        market_share: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(labels.len(), bookings.len());
        debug_assert_eq!(labels.len(), avg_prices.len());
        debug_assert_eq!(labels.len(), market_share.len());
        Self {
            labels,
            bookings,
            avg_prices,
            market_share,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteAnalysis {
    pub total_routes: usize,
    pub top_route: String,
    pub avg_load_factor: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopularRoutes {
    pub top_routes: TopRoutes,
    pub route_analysis: RouteAnalysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySeasonal {
    /// Always 12 entries, Jan through Dec.
    pub labels: Vec<String>,
    pub bookings: Vec<f64>,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonalAnalysis {
    pub peak_season: String,
    pub low_season: String,
    pub price_variation: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonalTrends {
    pub monthly_trends: MonthlySeasonal,
    pub seasonal_analysis: SeasonalAnalysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct AirlineShare {
    pub labels: Vec<String>,
    pub shares: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AirlineMetrics {
    pub airlines: Vec<String>,
    pub avg_prices: Vec<f64>,
    pub load_factors: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AirlinePerformance {
    pub market_share: AirlineShare,
    pub performance_metrics: AirlineMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyUtilization {
    pub dates: Vec<String>,
    pub utilization: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteUtilization {
    pub routes: Vec<String>,
    pub utilization: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CapacityUtilization {
    pub overall_utilization: f64,
    pub daily_utilization: DailyUtilization,
    pub route_utilization: RouteUtilization,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
    pub days: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub total_flights: usize,
    pub avg_price: i64,
    pub median_price: i64,
    pub price_std: f64,
    pub min_price: i64,
    pub max_price: i64,
    pub total_bookings: u64,
    pub avg_bookings: i64,
    pub total_capacity: u64,
    pub avg_load_factor: f64,
    pub unique_routes: usize,
    pub demand_score: u32,
    /// Signed percentage string, e.g. "+12.3%".
    pub price_change: String,
    pub date_range: DateRange,
    pub market_health: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceForecast {
    pub next_week: i64,
    pub confidence: String,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemandForecast {
    pub next_week: String,
    pub seasonal_factor: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Forecasting {
    pub price_forecast: PriceForecast,
    pub demand_forecast: DemandForecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Info,
    Warning,
    Opportunity,
}

/// Data-driven observation included in the analysis object itself, as
/// opposed to the generated prose insights.
#[derive(Debug, Clone, Serialize)]
pub struct MarketInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub content: String,
}

/// The unified, immutable analysis object assembled once per request.
#[derive(Debug, Clone, Serialize)]
pub struct MarketAnalysis {
    pub price_trends: PriceTrends,
    pub demand_patterns: DemandPatterns,
    pub popular_routes: PopularRoutes,
    pub seasonal_trends: SeasonalTrends,
    pub airline_performance: AirlinePerformance,
    pub capacity_utilization: CapacityUtilization,
    pub statistics: Statistics,
    pub forecasting: Forecasting,
    pub market_insights: Vec<MarketInsight>,
}
