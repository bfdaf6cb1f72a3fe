// Canonical default analysis used on every soft-failure path. Each
// sub-section default is defined exactly once so the empty-input analysis
// and the per-aggregate substitutes can never drift apart.
use chrono::{Duration, Utc};

use super::report::*;

/// ISO date strings for the trailing `n` days, oldest first, ending yesterday.
fn recent_dates(n: i64) -> Vec<String> {
    let today = Utc::now().date_naive();
    (1..=n)
        .rev()
        .map(|i| (today - Duration::days(i)).format("%Y-%m-%d").to_string())
        .collect()
}

pub fn price_trends() -> PriceTrends {
    PriceTrends {
        weekly_trends: WeeklyPriceTrends::new(
            (1..=6).map(|w| format!("Week {w}")).collect(),
            vec![420.0, 465.0, 485.0, 510.0, 495.0, 485.0],
            vec![380.0, 420.0, 440.0, 460.0, 450.0, 440.0],
            vec![480.0, 520.0, 540.0, 580.0, 560.0, 540.0],
            vec![25.0, 28.0, 27.0, 31.0, 29.0, 26.0],
        ),
        daily_trends: DailyPriceTrends {
            dates: recent_dates(7),
            prices: vec![450.0, 460.0, 470.0, 480.0, 475.0, 485.0, 490.0],
        },
        trend_analysis: TrendAnalysis {
            direction: TrendDirection::Increasing,
            volatility: 25.5,
            trend_strength: 0.3,
        },
    }
}

pub fn demand_patterns() -> DemandPatterns {
    DemandPatterns {
        daily_patterns: DailyDemand {
            labels: crate::utils::DAY_ORDER
                .iter()
                .map(|d| crate::utils::day_name(*d).to_string())
                .collect(),
            bookings: vec![650.0, 590.0, 800.0, 810.0, 1200.0, 1350.0, 1100.0],
            avg_prices: vec![420.0, 410.0, 400.0, 430.0, 480.0, 520.0, 500.0],
        },
        monthly_patterns: MonthlyDemand {
            labels: (1..=12).map(|m| format!("Month {m}")).collect(),
            bookings: vec![
                2500.0, 2200.0, 2800.0, 2400.0, 2300.0, 2100.0, 2600.0, 2500.0, 2250.0, 2350.0,
                2550.0, 2750.0,
            ],
            avg_prices: vec![
                450.0, 420.0, 470.0, 440.0, 430.0, 410.0, 455.0, 460.0, 435.0, 445.0, 475.0,
                505.0,
            ],
        },
        weekend_analysis: WeekendSplit {
            weekday_bookings: 750.0,
            weekend_bookings: 1200.0,
            weekday_price: 430.0,
            weekend_price: 480.0,
            weekday_load_factor: 0.74,
            weekend_load_factor: 0.82,
        },
        peak_periods: PeakPeriods {
            peak_hour: None,
            off_peak_hour: None,
            peak_day: None,
            high_demand: Some("Friday-Sunday".into()),
            low_demand: Some("Tuesday-Wednesday".into()),
        },
    }
}

pub fn popular_routes() -> PopularRoutes {
    PopularRoutes {
        top_routes: TopRoutes::new(
            ["SYD-MEL", "MEL-SYD", "SYD-BNE", "BNE-SYD", "SYD-PER", "PER-SYD"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec![2850.0, 2640.0, 2280.0, 2160.0, 2040.0, 1950.0],
            vec![320.0, 325.0, 380.0, 375.0, 650.0, 645.0],
            vec![18.5, 17.2, 14.8, 14.0, 13.2, 12.7],
        ),
        route_analysis: RouteAnalysis {
            total_routes: 24,
            top_route: "SYD-MEL".into(),
            avg_load_factor: 0.78,
        },
    }
}

pub fn seasonal_trends() -> SeasonalTrends {
    SeasonalTrends {
        monthly_trends: MonthlySeasonal {
            labels: crate::utils::MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
            bookings: vec![
                2550.0, 2340.0, 2460.0, 2250.0, 2100.0, 1950.0, 2700.0, 2550.0, 2250.0, 2400.0,
                2640.0, 2850.0,
            ],
            prices: vec![
                520.0, 480.0, 460.0, 440.0, 420.0, 400.0, 450.0, 460.0, 440.0, 460.0, 500.0,
                540.0,
            ],
        },
        seasonal_analysis: SeasonalAnalysis {
            peak_season: "Summer".into(),
            low_season: "Winter".into(),
            price_variation: 45.2,
        },
    }
}

pub fn airline_performance() -> AirlinePerformance {
    AirlinePerformance {
        market_share: AirlineShare {
            labels: ["Qantas", "Jetstar", "Virgin Australia", "Tigerair"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            shares: vec![32.5, 28.3, 24.7, 14.5],
        },
        performance_metrics: AirlineMetrics {
            airlines: ["Qantas", "Jetstar", "Virgin Australia", "Tigerair"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            avg_prices: vec![520.0, 380.0, 450.0, 350.0],
            load_factors: vec![0.82, 0.78, 0.75, 0.73],
        },
    }
}

pub fn capacity_utilization() -> CapacityUtilization {
    CapacityUtilization {
        overall_utilization: 78.5,
        daily_utilization: DailyUtilization {
            dates: recent_dates(7),
            utilization: vec![75.2, 78.5, 82.1, 79.8, 85.3, 88.7, 83.2],
        },
        route_utilization: RouteUtilization {
            routes: ["SYD-MEL", "MEL-SYD", "SYD-BNE", "BNE-SYD"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            utilization: vec![85.5, 83.2, 79.8, 77.3],
        },
    }
}

pub fn statistics() -> Statistics {
    let today = Utc::now().date_naive();
    Statistics {
        total_flights: 450,
        avg_price: 485,
        median_price: 470,
        price_std: 95.5,
        min_price: 280,
        max_price: 850,
        total_bookings: 15_000,
        avg_bookings: 125,
        total_capacity: 19_500,
        avg_load_factor: 0.769,
        unique_routes: 24,
        demand_score: 78,
        price_change: "+12.3%".into(),
        date_range: DateRange {
            start: (today - Duration::days(30)).format("%Y-%m-%d").to_string(),
            end: today.format("%Y-%m-%d").to_string(),
            days: 30,
        },
        market_health: "Good".into(),
    }
}

pub fn forecasting() -> Forecasting {
    Forecasting {
        price_forecast: PriceForecast {
            next_week: 495,
            confidence: "Medium".into(),
            trend: TrendDirection::Stable,
        },
        demand_forecast: DemandForecast {
            next_week: "Medium".into(),
            seasonal_factor: 1.0,
        },
    }
}

pub fn market_insights() -> Vec<MarketInsight> {
    vec![
        MarketInsight {
            kind: InsightKind::Info,
            title: "Market Stability".into(),
            content: "Market shows stable pricing patterns with normal seasonal variations."
                .into(),
        },
        MarketInsight {
            kind: InsightKind::Opportunity,
            title: "Weekend Premium".into(),
            content: "Weekend flights show 15% premium pricing opportunity.".into(),
        },
    ]
}

/// The fully-populated placeholder analysis returned whenever the input
/// table is empty or unusable. Downstream consumers never see a partial
/// or null result.
pub fn default_analysis() -> MarketAnalysis {
    MarketAnalysis {
        price_trends: price_trends(),
        demand_patterns: demand_patterns(),
        popular_routes: popular_routes(),
        seasonal_trends: seasonal_trends(),
        airline_performance: airline_performance(),
        capacity_utilization: capacity_utilization(),
        statistics: statistics(),
        forecasting: forecasting(),
        market_insights: market_insights(),
    }
}
