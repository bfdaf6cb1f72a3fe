// Rule-based insight tier: deterministic synthesis from the analysis
// object. Always yields exactly four insights.
use crate::analyzer::report::MarketAnalysis;
use crate::model::Insight;

pub fn rule_based_insights(analysis: &MarketAnalysis) -> Vec<Insight> {
    vec![
        price_trend_insight(analysis),
        demand_insight(analysis),
        route_insight(analysis),
        seasonal_insight(analysis),
    ]
}

fn price_trend_insight(analysis: &MarketAnalysis) -> Insight {
    let avg_price = analysis.statistics.avg_price;
    let price_change = &analysis.statistics.price_change;
    let content = if price_change.contains('+') {
        format!(
            "Market prices have increased by {price_change}, indicating strong demand conditions. \
             The current average price of ${avg_price} suggests premium market positioning opportunities. \
             Airlines should consider dynamic pricing strategies to maximize revenue during peak demand periods."
        )
    } else {
        format!(
            "Market prices have decreased by {price_change}, indicating potential oversupply or competitive pressure. \
             The current average price of ${avg_price} suggests opportunities for market share growth \
             through competitive pricing and value-added services."
        )
    };
    Insight {
        title: "Price Trend Analysis".into(),
        content,
    }
}

fn demand_insight(analysis: &MarketAnalysis) -> Insight {
    let demand_score = analysis.statistics.demand_score;
    let content = if demand_score > 75 {
        format!(
            "Exceptional demand score of {demand_score}% indicates a seller's market with high passenger interest. \
             This presents opportunities for capacity expansion, premium service offerings, and strategic route development. \
             Consider increasing frequency on high-demand routes."
        )
    } else if demand_score > 50 {
        format!(
            "Moderate demand score of {demand_score}% suggests balanced market conditions. \
             Focus on operational efficiency, service quality improvements, and competitive positioning. \
             Monitor competitor activities and adjust strategies accordingly."
        )
    } else {
        format!(
            "Lower demand score of {demand_score}% indicates market challenges requiring strategic intervention. \
             Consider promotional campaigns, route optimization, partnership opportunities, \
             or service differentiation to stimulate demand."
        )
    };
    Insight {
        title: "Demand Assessment".into(),
        content,
    }
}

fn route_insight(analysis: &MarketAnalysis) -> Insight {
    let total_routes = analysis.statistics.unique_routes;
    let bookings = &analysis.popular_routes.top_routes.bookings;
    if let Some(top_bookings) = bookings.iter().copied().reduce(f64::max) {
        Insight {
            title: "Route Network Optimization".into(),
            content: format!(
                "Network analysis of {total_routes} routes reveals concentrated demand patterns. \
                 Top routes generate {top_bookings:.0} bookings, indicating hub-and-spoke opportunities. \
                 Consider capacity reallocation from underperforming routes to high-demand corridors for improved efficiency."
            ),
        }
    } else {
        Insight {
            title: "Route Network Analysis".into(),
            content: format!(
                "Current network spans {total_routes} routes with varying performance levels. \
                 Route optimization opportunities exist through data-driven capacity allocation \
                 and strategic partnerships on secondary routes."
            ),
        }
    }
}

fn seasonal_insight(analysis: &MarketAnalysis) -> Insight {
    let demand = &analysis.seasonal_trends.monthly_trends.bookings;
    let peak = demand.iter().copied().fold(0.0f64, f64::max);
    if peak > 0.0 {
        let low = demand.iter().copied().fold(f64::INFINITY, f64::min);
        let seasonality = if low > 0.0 { (peak - low) / low * 100.0 } else { 0.0 };
        Insight {
            title: "Seasonal Strategy & Growth".into(),
            content: format!(
                "Seasonal demand variation of {seasonality:.0}% presents revenue management opportunities. \
                 Peak periods show {peak:.0} bookings vs {low:.0} in low season. \
                 Implement dynamic pricing, advance booking incentives, and targeted marketing campaigns \
                 to optimize year-round performance."
            ),
        }
    } else {
        Insight {
            title: "Strategic Growth Opportunities".into(),
            content: "Market analysis reveals opportunities in dynamic pricing implementation, \
                      capacity optimization, and strategic route development. Focus on data-driven \
                      decision making and customer experience enhancement to drive sustainable growth."
                .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::defaults;

    #[test]
    fn always_yields_exactly_four_insights() {
        let analysis = defaults::default_analysis();
        let insights = rule_based_insights(&analysis);
        assert_eq!(insights.len(), 4);
    }

    #[test]
    fn rising_prices_are_called_out_as_an_increase() {
        let mut analysis = defaults::default_analysis();
        analysis.statistics.price_change = "+8.0%".into();
        analysis.statistics.demand_score = 80;
        let insights = rule_based_insights(&analysis);
        assert_eq!(insights[0].title, "Price Trend Analysis");
        assert!(insights[0].content.contains("increased by +8.0%"));
        assert!(insights[1].content.contains("Exceptional demand score of 80%"));
    }

    #[test]
    fn falling_prices_take_the_decrease_branch() {
        let mut analysis = defaults::default_analysis();
        analysis.statistics.price_change = "-4.2%".into();
        let insights = rule_based_insights(&analysis);
        assert!(insights[0].content.contains("decreased by -4.2%"));
    }

    #[test]
    fn demand_branches_on_thresholds() {
        let mut analysis = defaults::default_analysis();
        analysis.statistics.demand_score = 60;
        assert!(rule_based_insights(&analysis)[1]
            .content
            .contains("Moderate demand score"));
        analysis.statistics.demand_score = 30;
        assert!(rule_based_insights(&analysis)[1]
            .content
            .contains("Lower demand score"));
    }

    #[test]
    fn seasonal_insight_reports_amplitude() {
        let mut analysis = defaults::default_analysis();
        analysis.seasonal_trends.monthly_trends.bookings =
            vec![1000.0, 2000.0, 1500.0, 1200.0, 1100.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0];
        let insights = rule_based_insights(&analysis);
        assert_eq!(insights[3].title, "Seasonal Strategy & Growth");
        assert!(insights[3].content.contains("100%"));
    }

    #[test]
    fn empty_seasonal_series_uses_generic_growth_text() {
        let mut analysis = defaults::default_analysis();
        analysis.seasonal_trends.monthly_trends.bookings = vec![0.0; 12];
        let insights = rule_based_insights(&analysis);
        assert_eq!(insights[3].title, "Strategic Growth Opportunities");
    }
}
