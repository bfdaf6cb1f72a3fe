// Aggregation engine: turns cleaned records into the trend-oriented
// sub-sections of the analysis. Every public function is total — when a
// group is empty or a column is absent it falls back to the canonical
// default for that sub-section instead of failing the whole analysis.
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::defaults;
use super::report::*;
use crate::model::FlightRecord;
use crate::utils::{self, day_name, mean, round1, round2, std_dev, DAY_ORDER, MONTH_NAMES};

/// Month-indexed multipliers applied to the price forecast,
/// Southern-Hemisphere holiday calendar.
const SEASONAL_FACTORS: [f64; 12] = [1.2, 1.1, 1.0, 0.9, 0.9, 0.8, 0.9, 0.9, 0.9, 1.0, 1.1, 1.3];

/// High-demand months for the qualitative demand forecast.
const PEAK_MONTHS: [u32; 4] = [12, 1, 6, 7];

pub struct TrendEngine;

impl TrendEngine {
    /// Weekly and daily price aggregates plus the linear trend estimate.
    pub fn price_trends(records: &[FlightRecord]) -> PriceTrends {
        if records.is_empty() {
            return defaults::price_trends();
        }

        let mut by_week: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for rec in records {
            by_week.entry(rec.week).or_default().push(rec.price);
        }

        let mut labels = Vec::new();
        let mut avg_prices = Vec::new();
        let mut min_prices = Vec::new();
        let mut max_prices = Vec::new();
        let mut price_std = Vec::new();
        for (week, prices) in by_week.iter().take(8) {
            labels.push(format!("Week {week}"));
            avg_prices.push(mean(prices).round());
            min_prices.push(prices.iter().copied().fold(f64::INFINITY, f64::min).round());
            max_prices.push(prices.iter().copied().fold(f64::NEG_INFINITY, f64::max).round());
            price_std.push(round2(std_dev(prices)));
        }

        let daily = daily_mean_prices(records);
        let daily_means: Vec<f64> = daily.values().copied().collect();
        let slope = if daily_means.len() > 1 {
            linear_slope(&daily_means)
        } else {
            0.0
        };

        let last14: Vec<(&NaiveDate, &f64)> = daily.iter().collect();
        let tail = last14.len().saturating_sub(14);

        PriceTrends {
            weekly_trends: WeeklyPriceTrends::new(
                labels, avg_prices, min_prices, max_prices, price_std,
            ),
            daily_trends: DailyPriceTrends {
                dates: last14[tail..]
                    .iter()
                    .map(|(d, _)| d.format("%Y-%m-%d").to_string())
                    .collect(),
                prices: last14[tail..].iter().map(|(_, p)| p.round()).collect(),
            },
            trend_analysis: TrendAnalysis {
                direction: TrendDirection::from_slope(slope),
                volatility: round2(std_dev(&daily_means)),
                trend_strength: slope.abs(),
            },
        }
    }

    /// Booking demand by weekday, month and weekend split, with peak-period
    /// detection. Weekday and month axes are always fully populated.
    pub fn demand_patterns(records: &[FlightRecord]) -> DemandPatterns {
        if records.is_empty() || records.iter().all(|r| r.bookings.is_none()) {
            return defaults::demand_patterns();
        }

        let mut day_bookings = [0.0f64; 7];
        let mut day_prices: [Vec<f64>; 7] = Default::default();
        let mut month_bookings = [0.0f64; 12];
        let mut month_prices: Vec<Vec<f64>> = vec![Vec::new(); 12];
        for rec in records {
            let day_idx = rec.day_of_week.num_days_from_monday() as usize;
            let month_idx = (rec.month - 1) as usize;
            if let Some(b) = rec.bookings {
                day_bookings[day_idx] += f64::from(b);
                month_bookings[month_idx] += f64::from(b);
            }
            day_prices[day_idx].push(rec.price);
            month_prices[month_idx].push(rec.price);
        }

        let (weekend, weekday): (Vec<&FlightRecord>, Vec<&FlightRecord>) =
            records.iter().partition(|r| r.is_weekend);

        DemandPatterns {
            daily_patterns: DailyDemand {
                labels: DAY_ORDER.iter().map(|d| day_name(*d).to_string()).collect(),
                bookings: day_bookings.to_vec(),
                avg_prices: day_prices.iter().map(|p| mean(p).round()).collect(),
            },
            monthly_patterns: MonthlyDemand {
                labels: (1..=12).map(|m| format!("Month {m}")).collect(),
                bookings: month_bookings.to_vec(),
                avg_prices: month_prices.iter().map(|p| mean(p).round()).collect(),
            },
            weekend_analysis: WeekendSplit {
                weekday_bookings: mean_of(&weekday, |r| r.bookings.map(f64::from)),
                weekend_bookings: mean_of(&weekend, |r| r.bookings.map(f64::from)),
                weekday_price: mean_of(&weekday, |r| Some(r.price)),
                weekend_price: mean_of(&weekend, |r| Some(r.price)),
                weekday_load_factor: mean_of(&weekday, |r| r.load_factor),
                weekend_load_factor: mean_of(&weekend, |r| r.load_factor),
            },
            peak_periods: peak_periods(records),
        }
    }

    /// Routes ranked by total bookings with market share, top 10.
    pub fn popular_routes(records: &[FlightRecord]) -> PopularRoutes {
        if records.is_empty() {
            return defaults::popular_routes();
        }

        let groups = group_by_route(records);
        let mut stats: Vec<RouteStats> = groups
            .into_iter()
            .map(|(route, rows)| RouteStats::from_rows(route, &rows))
            .collect();
        stats.sort_by(|a, b| b.bookings.total_cmp(&a.bookings));

        let total_routes = stats.len();
        let total_bookings: f64 = stats.iter().map(|s| s.bookings).sum();
        let top_route = stats
            .first()
            .map(|s| s.route.clone())
            .unwrap_or_else(|| "N/A".into());
        let load_factors: Vec<f64> = stats.iter().filter_map(|s| s.load_factor).collect();
        let avg_load_factor = if load_factors.is_empty() {
            0.75
        } else {
            mean(&load_factors)
        };

        let top: Vec<&RouteStats> = stats.iter().take(10).collect();
        PopularRoutes {
            top_routes: TopRoutes::new(
                top.iter().map(|s| s.route.clone()).collect(),
                top.iter().map(|s| s.bookings).collect(),
                top.iter().map(|s| s.avg_price.round()).collect(),
                top.iter()
                    .map(|s| {
                        if total_bookings > 0.0 {
                            round1(s.bookings / total_bookings * 100.0)
                        } else {
                            0.0
                        }
                    })
                    .collect(),
            ),
            route_analysis: RouteAnalysis {
                total_routes,
                top_route,
                avg_load_factor,
            },
        }
    }

    /// Month-of-year demand and pricing with a fixed 4-season grouping
    /// (Southern-Hemisphere convention).
    pub fn seasonal_trends(records: &[FlightRecord]) -> SeasonalTrends {
        if records.is_empty() {
            return defaults::seasonal_trends();
        }

        // Per-month aggregates over the months actually present.
        let mut month_bookings: BTreeMap<u32, f64> = BTreeMap::new();
        let mut month_prices: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for rec in records {
            if let Some(b) = rec.bookings {
                *month_bookings.entry(rec.month).or_default() += f64::from(b);
            }
            month_prices.entry(rec.month).or_default().push(rec.price);
        }
        let monthly_price_means: BTreeMap<u32, f64> = month_prices
            .iter()
            .map(|(m, p)| (*m, mean(p)))
            .collect();

        // Season-level means of the monthly aggregates.
        let mut season_bookings: BTreeMap<&'static str, Vec<f64>> = BTreeMap::new();
        for (month, bookings) in &month_bookings {
            season_bookings
                .entry(season_of(*month))
                .or_default()
                .push(*bookings);
        }
        let season_means: Vec<(&'static str, f64)> = season_bookings
            .iter()
            .map(|(season, values)| (*season, mean(values)))
            .collect();
        let peak_season = season_means
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s.to_string())
            .unwrap_or_else(|| "Summer".into());
        let low_season = season_means
            .iter()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s.to_string())
            .unwrap_or_else(|| "Winter".into());

        // Reindex over the full year: missing bookings are zero-filled,
        // missing prices take the overall mean of the present months.
        let fill_price = mean(&monthly_price_means.values().copied().collect::<Vec<f64>>());
        let bookings: Vec<f64> = (1..=12)
            .map(|m| month_bookings.get(&m).copied().unwrap_or(0.0))
            .collect();
        let prices: Vec<f64> = (1..=12)
            .map(|m| monthly_price_means.get(&m).copied().unwrap_or(fill_price).round())
            .collect();
        let price_variation = round2(std_dev(&prices));

        SeasonalTrends {
            monthly_trends: MonthlySeasonal {
                labels: MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
                bookings,
                prices,
            },
            seasonal_analysis: SeasonalAnalysis {
                peak_season,
                low_season,
                price_variation,
            },
        }
    }

    /// Per-airline booking share and performance, top 6 carriers.
    pub fn airline_performance(records: &[FlightRecord]) -> AirlinePerformance {
        let with_airline: Vec<&FlightRecord> =
            records.iter().filter(|r| r.airline.is_some()).collect();
        if with_airline.is_empty() {
            debug!("No airline column present; using default airline performance");
            return defaults::airline_performance();
        }

        let mut groups: BTreeMap<String, Vec<&FlightRecord>> = BTreeMap::new();
        for rec in with_airline {
            groups
                .entry(rec.airline.clone().unwrap_or_default())
                .or_default()
                .push(rec);
        }

        struct AirlineStats {
            name: String,
            bookings: f64,
            avg_price: f64,
            load_factor: f64,
        }
        let mut stats: Vec<AirlineStats> = groups
            .into_iter()
            .map(|(code, rows)| AirlineStats {
                name: airline_name(&code),
                bookings: rows
                    .iter()
                    .filter_map(|r| r.bookings.map(f64::from))
                    .sum(),
                avg_price: mean(&rows.iter().map(|r| r.price).collect::<Vec<f64>>()),
                load_factor: mean_of(&rows, |r| r.load_factor),
            })
            .collect();
        stats.sort_by(|a, b| b.bookings.total_cmp(&a.bookings));

        let total_bookings: f64 = stats.iter().map(|s| s.bookings).sum();
        let top: Vec<&AirlineStats> = stats.iter().take(6).collect();
        AirlinePerformance {
            market_share: AirlineShare {
                labels: top.iter().map(|s| s.name.clone()).collect(),
                shares: top
                    .iter()
                    .map(|s| {
                        if total_bookings > 0.0 {
                            round1(s.bookings / total_bookings * 100.0)
                        } else {
                            0.0
                        }
                    })
                    .collect(),
            },
            performance_metrics: AirlineMetrics {
                airlines: top.iter().map(|s| s.name.clone()).collect(),
                avg_prices: top.iter().map(|s| s.avg_price.round()).collect(),
                load_factors: top.iter().map(|s| round2(s.load_factor)).collect(),
            },
        }
    }

    /// Seat utilization overall, per day (last 14 dates) and per route.
    pub fn capacity_utilization(records: &[FlightRecord]) -> CapacityUtilization {
        let usable: Vec<&FlightRecord> = records
            .iter()
            .filter(|r| r.bookings.is_some() && r.capacity.is_some())
            .collect();
        if usable.is_empty() {
            debug!("No capacity data present; using default capacity utilization");
            return defaults::capacity_utilization();
        }

        let total_bookings: f64 = usable.iter().filter_map(|r| r.bookings.map(f64::from)).sum();
        let total_capacity: f64 = usable.iter().filter_map(|r| r.capacity.map(f64::from)).sum();
        let overall = if total_capacity > 0.0 {
            round1(total_bookings / total_capacity * 100.0)
        } else {
            0.0
        };

        let mut by_date: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for rec in &usable {
            let entry = by_date.entry(rec.date).or_default();
            entry.0 += rec.bookings.map(f64::from).unwrap_or(0.0);
            entry.1 += rec.capacity.map(f64::from).unwrap_or(0.0);
        }
        let daily: Vec<(&NaiveDate, &(f64, f64))> = by_date.iter().collect();
        let tail = daily.len().saturating_sub(14);

        let mut by_route: BTreeMap<String, (f64, f64)> = BTreeMap::new();
        for rec in &usable {
            let entry = by_route.entry(rec.route()).or_default();
            entry.0 += rec.bookings.map(f64::from).unwrap_or(0.0);
            entry.1 += rec.capacity.map(f64::from).unwrap_or(0.0);
        }
        let mut route_util: Vec<(String, f64)> = by_route
            .into_iter()
            .map(|(route, (b, c))| (route, if c > 0.0 { round1(b / c * 100.0) } else { 0.0 }))
            .collect();
        route_util.sort_by(|a, b| b.1.total_cmp(&a.1));
        route_util.truncate(10);

        CapacityUtilization {
            overall_utilization: overall,
            daily_utilization: DailyUtilization {
                dates: daily[tail..]
                    .iter()
                    .map(|(d, _)| d.format("%Y-%m-%d").to_string())
                    .collect(),
                utilization: daily[tail..]
                    .iter()
                    .map(|(_, (b, c))| if *c > 0.0 { round1(b / c * 100.0) } else { 0.0 })
                    .collect(),
            },
            route_utilization: RouteUtilization {
                routes: route_util.iter().map(|(r, _)| r.clone()).collect(),
                utilization: route_util.iter().map(|(_, u)| *u).collect(),
            },
        }
    }

    /// Next-period price forecast: mean of the last 7 prices, adjusted by
    /// the linear trend when enough history exists, then scaled by the
    /// month factor. Slope is taken over index position, not elapsed time,
    /// so unevenly spaced dates bias it; kept as a known approximation.
    pub fn forecast(records: &[FlightRecord], current_month: u32) -> Forecasting {
        if records.is_empty() {
            return defaults::forecasting();
        }

        let mut sorted: Vec<&FlightRecord> = records.iter().collect();
        sorted.sort_by_key(|r| r.date);
        let prices: Vec<f64> = sorted.iter().map(|r| r.price).collect();

        let recent = &prices[prices.len().saturating_sub(7)..];
        let mut forecast_price = mean(recent);
        let slope = linear_slope(&prices);
        if prices.len() > 7 {
            forecast_price += slope * 7.0;
        }

        let factor = SEASONAL_FACTORS
            .get((current_month as usize).saturating_sub(1))
            .copied()
            .unwrap_or(1.0);
        forecast_price *= factor;

        Forecasting {
            price_forecast: PriceForecast {
                next_week: forecast_price as i64,
                confidence: "Medium".into(),
                trend: TrendDirection::from_slope(slope),
            },
            demand_forecast: DemandForecast {
                next_week: if PEAK_MONTHS.contains(&current_month) {
                    "High".into()
                } else {
                    "Medium".into()
                },
                seasonal_factor: factor,
            },
        }
    }

    /// Data-driven observations embedded in the analysis object.
    pub fn market_insights(records: &[FlightRecord]) -> Vec<MarketInsight> {
        if records.is_empty() {
            return defaults::market_insights();
        }
        let mut insights = Vec::new();

        let prices: Vec<f64> = records.iter().map(|r| r.price).collect();
        let price_std = std_dev(&prices);
        if price_std > 100.0 {
            insights.push(MarketInsight {
                kind: InsightKind::Warning,
                title: "High Price Volatility".into(),
                content: format!(
                    "Price volatility is high (${price_std:.0}), indicating market uncertainty."
                ),
            });
        }

        let load_factors: Vec<f64> = records.iter().filter_map(|r| r.load_factor).collect();
        if !load_factors.is_empty() {
            let avg_lf = mean(&load_factors);
            if avg_lf > 0.85 {
                insights.push(MarketInsight {
                    kind: InsightKind::Opportunity,
                    title: "High Demand Opportunity".into(),
                    content: format!(
                        "Average load factor is {:.1}%, suggesting capacity constraints.",
                        avg_lf * 100.0
                    ),
                });
            }
        }

        let (weekend, weekday): (Vec<&FlightRecord>, Vec<&FlightRecord>) =
            records.iter().partition(|r| r.is_weekend);
        if !weekend.is_empty() && !weekday.is_empty() {
            let weekday_price = mean_of(&weekday, |r| Some(r.price));
            if weekday_price > 0.0 {
                let premium = mean_of(&weekend, |r| Some(r.price)) / weekday_price - 1.0;
                if premium > 0.1 {
                    insights.push(MarketInsight {
                        kind: InsightKind::Info,
                        title: "Weekend Premium".into(),
                        content: format!(
                            "Weekend flights cost {:.1}% more than weekday flights.",
                            premium * 100.0
                        ),
                    });
                }
            }
        }

        let mut route_counts: BTreeMap<String, usize> = BTreeMap::new();
        for rec in records {
            *route_counts.entry(rec.route()).or_default() += 1;
        }
        if let Some(max_count) = route_counts.values().max() {
            let top_share = *max_count as f64 / records.len() as f64;
            if top_share > 0.3 {
                insights.push(MarketInsight {
                    kind: InsightKind::Info,
                    title: "Route Concentration".into(),
                    content: format!(
                        "Top route accounts for {:.1}% of all flights.",
                        top_share * 100.0
                    ),
                });
            }
        }

        insights
    }
}

/// Least-squares slope of `values` over their index positions.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean_x = (nf - 1.0) / 2.0;
    let mean_y = utils::mean(values);
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    if den == 0.0 { 0.0 } else { num / den }
}

pub fn season_of(month: u32) -> &'static str {
    match month {
        12 | 1 | 2 => "Summer",
        3 | 4 | 5 => "Autumn",
        6 | 7 | 8 => "Winter",
        _ => "Spring",
    }
}

fn airline_name(code: &str) -> String {
    match code {
        "QF" => "Qantas".into(),
        "JQ" => "Jetstar".into(),
        "VA" => "Virgin Australia".into(),
        "TT" => "Tigerair".into(),
        "3K" => "Jetstar Asia".into(),
        "SQ" => "Singapore Airlines".into(),
        other => other.to_string(),
    }
}

fn daily_mean_prices(records: &[FlightRecord]) -> BTreeMap<NaiveDate, f64> {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for rec in records {
        by_date.entry(rec.date).or_default().push(rec.price);
    }
    by_date.into_iter().map(|(d, p)| (d, mean(&p))).collect()
}

/// Mean of an optional per-record value over the rows that carry it.
fn mean_of<F>(rows: &[&FlightRecord], f: F) -> f64
where
    F: Fn(&FlightRecord) -> Option<f64>,
{
    let values: Vec<f64> = rows.iter().filter_map(|r| f(r)).collect();
    mean(&values)
}

fn peak_periods(records: &[FlightRecord]) -> PeakPeriods {
    // Hour-level signal takes precedence when present.
    let mut hourly: BTreeMap<u32, f64> = BTreeMap::new();
    for rec in records {
        if let (Some(hour), Some(bookings)) = (rec.hour, rec.bookings) {
            *hourly.entry(hour).or_default() += f64::from(bookings);
        }
    }
    if !hourly.is_empty() {
        let peak = hourly.iter().max_by(|a, b| a.1.total_cmp(b.1)).map(|(h, _)| *h);
        let off_peak = hourly.iter().min_by(|a, b| a.1.total_cmp(b.1)).map(|(h, _)| *h);
        return PeakPeriods {
            peak_hour: peak.map(|h| format!("{h}:00")),
            off_peak_hour: off_peak.map(|h| format!("{h}:00")),
            peak_day: None,
            high_demand: None,
            low_demand: None,
        };
    }

    // Otherwise fall back to the busiest date, with fixed heuristic ranges
    // since daily data cannot localize peaks precisely.
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for rec in records {
        if let Some(b) = rec.bookings {
            *daily.entry(rec.date).or_default() += f64::from(b);
        }
    }
    let peak_day = daily
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(d, _)| day_name(d.weekday()).to_string());
    PeakPeriods {
        peak_hour: None,
        off_peak_hour: None,
        peak_day,
        high_demand: Some("Friday-Sunday".into()),
        low_demand: Some("Tuesday-Wednesday".into()),
    }
}

fn group_by_route(records: &[FlightRecord]) -> BTreeMap<String, Vec<&FlightRecord>> {
    let mut groups: BTreeMap<String, Vec<&FlightRecord>> = BTreeMap::new();
    for rec in records {
        groups.entry(rec.route()).or_default().push(rec);
    }
    groups
}

struct RouteStats {
    route: String,
    bookings: f64,
    avg_price: f64,
    load_factor: Option<f64>,
}

impl RouteStats {
    fn from_rows(route: String, rows: &[&FlightRecord]) -> Self {
        let load_factors: Vec<f64> = rows.iter().filter_map(|r| r.load_factor).collect();
        Self {
            route,
            bookings: rows.iter().filter_map(|r| r.bookings.map(f64::from)).sum(),
            avg_price: mean(&rows.iter().map(|r| r.price).collect::<Vec<f64>>()),
            load_factor: if load_factors.is_empty() {
                None
            } else {
                Some(mean(&load_factors))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, Weekday};

    fn record(date: NaiveDate, origin: &str, dest: &str, price: f64, bookings: u32) -> FlightRecord {
        let capacity = 200;
        FlightRecord {
            date,
            origin: origin.into(),
            destination: dest.into(),
            price,
            airline: Some("QF".into()),
            bookings: Some(bookings),
            capacity: Some(capacity),
            hour: None,
            load_factor: Some(f64::from(bookings) / f64::from(capacity)),
            day_of_week: date.weekday(),
            month: date.month(),
            week: date.iso_week().week(),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }

    fn sample_records() -> Vec<FlightRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        (0..30)
            .map(|i| {
                let date = start + Duration::days(i);
                record(date, "SYD", "MEL", 400.0 + i as f64 * 2.0, 120 + i as u32)
            })
            .collect()
    }

    #[test]
    fn weekday_series_always_has_seven_entries() {
        let patterns = TrendEngine::demand_patterns(&sample_records());
        assert_eq!(patterns.daily_patterns.labels.len(), 7);
        assert_eq!(patterns.daily_patterns.bookings.len(), 7);
        assert_eq!(patterns.daily_patterns.labels[0], "Monday");
        assert_eq!(patterns.daily_patterns.labels[6], "Sunday");
    }

    #[test]
    fn monthly_series_always_has_twelve_entries() {
        let patterns = TrendEngine::demand_patterns(&sample_records());
        assert_eq!(patterns.monthly_patterns.labels.len(), 12);
        // Sample data only covers March; other months are zero-filled.
        assert!(patterns.monthly_patterns.bookings[0] == 0.0);
        assert!(patterns.monthly_patterns.bookings[2] > 0.0);
    }

    #[test]
    fn rising_prices_yield_increasing_trend() {
        let trends = TrendEngine::price_trends(&sample_records());
        assert_eq!(
            trends.trend_analysis.direction,
            TrendDirection::Increasing
        );
        assert!(trends.trend_analysis.trend_strength > 0.0);
    }

    #[test]
    fn daily_trend_window_is_capped_at_fourteen() {
        let trends = TrendEngine::price_trends(&sample_records());
        assert_eq!(trends.daily_trends.dates.len(), 14);
        assert_eq!(trends.daily_trends.prices.len(), 14);
    }

    #[test]
    fn market_share_sums_to_at_most_hundred() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut records = Vec::new();
        for (i, (o, d)) in [("SYD", "MEL"), ("MEL", "SYD"), ("SYD", "BNE")]
            .iter()
            .enumerate()
        {
            records.push(record(start, o, d, 400.0, 100 + i as u32 * 50));
        }
        let routes = TrendEngine::popular_routes(&records);
        let total: f64 = routes.top_routes.market_share.iter().sum();
        assert!(total <= 100.0 + 1e-9);
        assert!((total - 100.0).abs() < 0.5);
        assert_eq!(routes.route_analysis.top_route, "SYD-BNE");
    }

    #[test]
    fn season_mapping_is_southern_hemisphere() {
        assert_eq!(season_of(1), "Summer");
        assert_eq!(season_of(4), "Autumn");
        assert_eq!(season_of(7), "Winter");
        assert_eq!(season_of(10), "Spring");
        assert_eq!(season_of(12), "Summer");
    }

    #[test]
    fn seasonal_series_fills_missing_months_with_mean_price() {
        let trends = TrendEngine::seasonal_trends(&sample_records());
        assert_eq!(trends.monthly_trends.prices.len(), 12);
        // March mean price equals the fill value since only March is present.
        assert_eq!(trends.monthly_trends.prices[0], trends.monthly_trends.prices[2]);
        assert_eq!(trends.monthly_trends.bookings[5], 0.0);
    }

    #[test]
    fn linear_slope_of_line_is_exact() {
        let values: Vec<f64> = (0..10).map(|i| 3.0 + 2.0 * i as f64).collect();
        assert!((linear_slope(&values) - 2.0).abs() < 1e-9);
        assert_eq!(linear_slope(&[5.0]), 0.0);
    }

    #[test]
    fn forecast_applies_seasonal_factor() {
        let records = sample_records();
        let june = TrendEngine::forecast(&records, 6);
        let december = TrendEngine::forecast(&records, 12);
        assert_eq!(june.demand_forecast.seasonal_factor, 0.8);
        assert_eq!(december.demand_forecast.seasonal_factor, 1.3);
        assert_eq!(june.demand_forecast.next_week, "High");
        assert_eq!(TrendEngine::forecast(&records, 3).demand_forecast.next_week, "Medium");
        assert!(december.price_forecast.next_week > june.price_forecast.next_week);
        assert_eq!(june.price_forecast.confidence, "Medium");
    }

    #[test]
    fn capacity_utilization_is_bounded() {
        let util = TrendEngine::capacity_utilization(&sample_records());
        assert!(util.overall_utilization > 0.0 && util.overall_utilization <= 100.0);
        assert_eq!(
            util.daily_utilization.dates.len(),
            util.daily_utilization.utilization.len()
        );
        assert!(util.daily_utilization.dates.len() <= 14);
    }

    #[test]
    fn missing_capacity_column_falls_back_to_default() {
        let mut records = sample_records();
        for rec in &mut records {
            rec.capacity = None;
            rec.load_factor = None;
        }
        let util = TrendEngine::capacity_utilization(&records);
        assert_eq!(util.overall_utilization, 78.5);
    }

    #[test]
    fn peak_periods_prefer_hourly_signal() {
        let mut records = sample_records();
        for (i, rec) in records.iter_mut().enumerate() {
            rec.hour = Some((6 + i % 3) as u32);
        }
        let patterns = TrendEngine::demand_patterns(&records);
        assert!(patterns.peak_periods.peak_hour.is_some());
        assert!(patterns.peak_periods.peak_day.is_none());
    }

    #[test]
    fn peak_periods_without_hours_report_heuristic_ranges() {
        let patterns = TrendEngine::demand_patterns(&sample_records());
        assert!(patterns.peak_periods.peak_hour.is_none());
        assert!(patterns.peak_periods.peak_day.is_some());
        assert_eq!(
            patterns.peak_periods.high_demand.as_deref(),
            Some("Friday-Sunday")
        );
    }

    #[test]
    fn volatile_prices_produce_volatility_warning() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let records: Vec<FlightRecord> = (0..20)
            .map(|i| {
                let price = if i % 2 == 0 { 300.0 } else { 700.0 };
                record(start + Duration::days(i), "SYD", "MEL", price, 120)
            })
            .collect();
        let insights = TrendEngine::market_insights(&records);
        assert!(insights
            .iter()
            .any(|i| i.title == "High Price Volatility" && i.kind == InsightKind::Warning));
    }
}
