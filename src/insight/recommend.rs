// Stateless recommendation derivation from cross-cutting themes detected
// in the generated insight contents.
use crate::model::Insight;

const MAX_RECOMMENDATIONS: usize = 5;

const GENERAL_RECOMMENDATIONS: [&str; 3] = [
    "Monitor competitor pricing and adjust strategies accordingly",
    "Invest in customer experience improvements to drive loyalty and premium pricing",
    "Leverage data analytics for better demand forecasting and inventory management",
];

/// Scans insight contents for theme keywords and emits one fixed
/// recommendation per detected theme in fixed order, followed by the
/// general recommendations, capped at five total.
pub fn derive_recommendations(insights: &[Insight]) -> Vec<String> {
    let mut pricing = false;
    let mut demand = false;
    let mut network = false;
    let mut seasonal = false;
    for insight in insights {
        let content = insight.content.to_lowercase();
        pricing |= content.contains("price") || content.contains("pricing");
        demand |= content.contains("demand");
        network |= content.contains("route") || content.contains("network");
        seasonal |= content.contains("seasonal");
    }

    let mut recommendations = Vec::new();
    if pricing {
        recommendations.push(
            "Implement dynamic pricing algorithms to optimize revenue based on demand patterns"
                .to_string(),
        );
    }
    if demand {
        recommendations.push(
            "Develop targeted marketing campaigns for underperforming routes and time periods"
                .to_string(),
        );
    }
    if network {
        recommendations.push(
            "Conduct comprehensive route profitability analysis and consider network optimization"
                .to_string(),
        );
    }
    if seasonal {
        recommendations.push(
            "Create seasonal capacity plans and advance booking incentive programs".to_string(),
        );
    }

    recommendations.extend(GENERAL_RECOMMENDATIONS.iter().map(|r| r.to_string()));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(content: &str) -> Insight {
        Insight {
            title: "t".into(),
            content: content.into(),
        }
    }

    #[test]
    fn never_exceeds_five_entries() {
        let insights = vec![insight(
            "Pricing pressure, demand shifts, route network churn and seasonal swings all at once.",
        )];
        let recs = derive_recommendations(&insights);
        assert_eq!(recs.len(), 5);
        // All four themes fire, so only the first general recommendation fits.
        assert!(recs[4].contains("competitor pricing"));
    }

    #[test]
    fn few_themes_leave_room_for_all_general_recommendations() {
        let insights = vec![insight("Demand is holding steady this quarter.")];
        let recs = derive_recommendations(&insights);
        assert_eq!(recs.len(), 4);
        for general in GENERAL_RECOMMENDATIONS {
            assert!(recs.iter().any(|r| r == general));
        }
    }

    #[test]
    fn themes_appear_in_fixed_order() {
        let insights = vec![insight("Seasonal swings affect pricing across the network.")];
        let recs = derive_recommendations(&insights);
        assert!(recs[0].contains("dynamic pricing"));
        assert!(recs[1].contains("route profitability"));
        assert!(recs[2].contains("seasonal capacity"));
    }

    #[test]
    fn no_insights_still_yield_general_advice() {
        let recs = derive_recommendations(&[]);
        assert_eq!(recs.len(), 3);
    }

    #[test]
    fn detection_is_case_insensitive() {
        let insights = vec![insight("DEMAND conditions remain SEASONAL.")];
        let recs = derive_recommendations(&insights);
        assert!(recs[0].contains("targeted marketing"));
    }
}
