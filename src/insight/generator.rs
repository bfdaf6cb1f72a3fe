// Insight generation state machine: remote model -> rule-based synthesis
// -> static fallback. Each tier degrades into the next; the result is
// always a non-empty list of at most four insights.
use chrono::{Datelike, Utc};
use tracing::{info, warn};

use super::remote::{parse_insights, InsightBackend, OpenAiBackend};
use super::rules::rule_based_insights;
use crate::analyzer::report::MarketAnalysis;
use crate::config::AppConfig;
use crate::model::{Insight, RemoteError};

enum GenerationState {
    AttemptRemote,
    AttemptRuleBased,
    Fallback,
    Done(Vec<Insight>),
}

pub struct InsightGenerator {
    backend: Option<Box<dyn InsightBackend>>,
}

impl InsightGenerator {
    /// Builds the generator from configuration. Without a usable remote
    /// credential the remote tier is never attempted.
    pub fn from_config(cfg: &AppConfig) -> Self {
        if !cfg.remote_configured() {
            info!("Remote insight backend not configured; starting at rule-based tier");
            return Self { backend: None };
        }
        match OpenAiBackend::new(cfg) {
            Ok(backend) => Self {
                backend: Some(Box::new(backend)),
            },
            Err(e) => {
                warn!("Failed to build remote backend: {e}; starting at rule-based tier");
                Self { backend: None }
            }
        }
    }

    /// Test seam: inject an arbitrary backend.
    pub fn with_backend(backend: Box<dyn InsightBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Runs the state machine. `None` marks an absent or malformed
    /// analysis and goes straight to the static fallback tier, regardless
    /// of remote configuration.
    pub async fn generate(&self, analysis: Option<&MarketAnalysis>) -> Vec<Insight> {
        let mut state = match (analysis, &self.backend) {
            (None, _) => {
                warn!("Invalid market analysis input; using fallback insights");
                GenerationState::Fallback
            }
            (Some(_), Some(_)) => GenerationState::AttemptRemote,
            (Some(_), None) => GenerationState::AttemptRuleBased,
        };

        loop {
            state = match state {
                GenerationState::AttemptRemote => match (analysis, &self.backend) {
                    (Some(a), Some(backend)) => match attempt_remote(backend.as_ref(), a).await {
                        Ok(insights) => {
                            info!("Generated {} remote insights", insights.len());
                            GenerationState::Done(insights)
                        }
                        Err(e) => {
                            warn!("Remote insight generation failed: {e}");
                            GenerationState::AttemptRuleBased
                        }
                    },
                    _ => GenerationState::AttemptRuleBased,
                },
                GenerationState::AttemptRuleBased => match analysis {
                    Some(a) => {
                        info!("Using rule-based insight generation");
                        GenerationState::Done(rule_based_insights(a))
                    }
                    None => GenerationState::Fallback,
                },
                GenerationState::Fallback => {
                    GenerationState::Done(fallback_insights(Utc::now().month()))
                }
                GenerationState::Done(insights) => return insights,
            };
        }
    }
}

async fn attempt_remote(
    backend: &dyn InsightBackend,
    analysis: &MarketAnalysis,
) -> Result<Vec<Insight>, RemoteError> {
    let prompt = build_prompt(analysis);
    let text = backend.complete(&prompt).await?;
    let insights = parse_insights(&text);
    if insights.is_empty() {
        return Err(RemoteError::EmptyResponse);
    }
    Ok(insights)
}

/// Structured prompt embedding the headline numbers and recent series,
/// requesting exactly four titled insights.
pub fn build_prompt(analysis: &MarketAnalysis) -> String {
    let stats = &analysis.statistics;
    format!(
        "Analyze this airline market data and provide exactly 4 key insights in the following format:\n\
         \n\
         **Insight Title 1**\n\
         Detailed analysis content here...\n\
         \n\
         **Insight Title 2**\n\
         Detailed analysis content here...\n\
         \n\
         **Insight Title 3**\n\
         Detailed analysis content here...\n\
         \n\
         **Insight Title 4**\n\
         Detailed analysis content here...\n\
         \n\
         Market Data:\n\
         - Average Price: ${}\n\
         - Price Change: {}\n\
         - Demand Score: {}%\n\
         - Total Routes: {}\n\
         \n\
         Price Trends (recent days): {:?}\n\
         Weekly Demand Pattern: {:?}\n\
         \n\
         Focus on:\n\
         1. Market trend analysis and implications\n\
         2. Pricing strategy recommendations\n\
         3. Demand pattern insights and opportunities\n\
         4. Strategic business recommendations\n\
         \n\
         Provide actionable insights that airlines can use for decision-making.",
        stats.avg_price,
        stats.price_change,
        stats.demand_score,
        stats.unique_routes,
        analysis.price_trends.daily_trends.prices,
        analysis.demand_patterns.daily_patterns.bookings,
    )
}

/// Static final tier: four canned insights, the first carrying a seasonal
/// message chosen by the current calendar month.
pub fn fallback_insights(current_month: u32) -> Vec<Insight> {
    let seasonal_msg = match current_month {
        12 | 1 | 2 => {
            "Winter travel patterns show increased demand for warm destinations and holiday travel."
        }
        6 | 7 | 8 => {
            "Summer peak season presents opportunities for leisure route optimization and capacity expansion."
        }
        3 | 4 | 5 => {
            "Spring travel uptick indicates recovery in business travel and leisure bookings."
        }
        _ => "Fall shoulder season provides opportunities for competitive pricing and route testing.",
    };

    vec![
        Insight {
            title: "Market Dynamics Overview".into(),
            content: format!(
                "Current airline market shows typical seasonal patterns with evolving demand structures. \
                 {seasonal_msg} Airlines should focus on flexible capacity management and dynamic pricing \
                 strategies to optimize revenue across different market segments."
            ),
        },
        Insight {
            title: "Revenue Optimization Strategy".into(),
            content: "Implement advanced revenue management systems with dynamic pricing capabilities. \
                      Focus on demand forecasting, competitor analysis, and customer segmentation to maximize yield. \
                      Consider ancillary revenue opportunities and premium service offerings to improve unit economics."
                .into(),
        },
        Insight {
            title: "Network Planning Insights".into(),
            content: "Route performance analysis reveals opportunities for network optimization. \
                      High-traffic corridors between major cities show consistent demand, while secondary routes \
                      may benefit from strategic partnerships, frequency adjustments, or seasonal scheduling modifications."
                .into(),
        },
        Insight {
            title: "Digital Transformation Opportunities".into(),
            content: "Modern travelers expect seamless digital experiences and personalized services. \
                      Invest in mobile-first booking platforms, AI-powered customer service, and data analytics \
                      capabilities to enhance customer satisfaction and operational efficiency while reducing \
                      distribution costs."
                .into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::defaults;
    use async_trait::async_trait;

    struct StubBackend {
        response: Result<String, RemoteError>,
    }

    #[async_trait]
    impl InsightBackend for StubBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, RemoteError> {
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn no_backend_yields_rule_based_insights() {
        let mut analysis = defaults::default_analysis();
        analysis.statistics.price_change = "+8.0%".into();
        analysis.statistics.demand_score = 80;
        let generator = InsightGenerator { backend: None };
        let insights = generator.generate(Some(&analysis)).await;
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[0].title, "Price Trend Analysis");
        assert!(insights[0].content.contains("increased"));
    }

    #[tokio::test]
    async fn missing_analysis_yields_fallback_even_with_backend() {
        let backend = StubBackend {
            response: Ok("**Should Not Appear**\nnope".into()),
        };
        let generator = InsightGenerator::with_backend(Box::new(backend));
        let insights = generator.generate(None).await;
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[0].title, "Market Dynamics Overview");
    }

    #[tokio::test]
    async fn successful_remote_response_is_parsed() {
        let backend = StubBackend {
            response: Ok("**Fleet Strategy**\nGrow the fleet.\n**Yield Watch**\nHold fares.".into()),
        };
        let generator = InsightGenerator::with_backend(Box::new(backend));
        let analysis = defaults::default_analysis();
        let insights = generator.generate(Some(&analysis)).await;
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].title, "Fleet Strategy");
    }

    #[tokio::test]
    async fn remote_failure_degrades_to_rule_based() {
        let backend = StubBackend {
            response: Err(RemoteError::Status(500)),
        };
        let generator = InsightGenerator::with_backend(Box::new(backend));
        let analysis = defaults::default_analysis();
        let insights = generator.generate(Some(&analysis)).await;
        assert_eq!(insights.len(), 4);
        assert_eq!(insights[0].title, "Price Trend Analysis");
    }

    #[tokio::test]
    async fn unparseable_remote_text_degrades_to_rule_based() {
        let backend = StubBackend {
            response: Ok("no headers in this reply at all".into()),
        };
        let generator = InsightGenerator::with_backend(Box::new(backend));
        let analysis = defaults::default_analysis();
        let insights = generator.generate(Some(&analysis)).await;
        assert_eq!(insights[0].title, "Price Trend Analysis");
    }

    #[test]
    fn fallback_message_tracks_the_season() {
        assert!(fallback_insights(1)[0].content.contains("Winter travel"));
        assert!(fallback_insights(4)[0].content.contains("Spring travel"));
        assert!(fallback_insights(7)[0].content.contains("Summer peak"));
        assert!(fallback_insights(10)[0].content.contains("Fall shoulder"));
    }

    #[test]
    fn prompt_embeds_headline_statistics() {
        let analysis = defaults::default_analysis();
        let prompt = build_prompt(&analysis);
        assert!(prompt.contains("Average Price: $485"));
        assert!(prompt.contains("Price Change: +12.3%"));
        assert!(prompt.contains("exactly 4 key insights"));
    }
}
