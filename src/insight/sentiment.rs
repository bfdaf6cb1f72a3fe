// Coarse market-sentiment label derived from the summary statistics.
use std::fmt;

use crate::analyzer::report::Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Bullish,
    Optimistic,
    Bearish,
    Cautious,
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Optimistic => "Optimistic",
            Sentiment::Bearish => "Bearish",
            Sentiment::Cautious => "Cautious",
            Sentiment::Neutral => "Neutral",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "Strong demand with rising prices",
            Sentiment::Optimistic => "Stable demand with controlled pricing",
            Sentiment::Bearish => "Weak demand with falling prices",
            Sentiment::Cautious => "Below-average demand conditions",
            Sentiment::Neutral => "Balanced market conditions",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.description())
    }
}

#[derive(PartialEq, Eq)]
enum PriceDirection {
    Rising,
    Falling,
    Flat,
}

/// Ordered threshold checks over demand score and the sign of the
/// price-change string. Total: anything unclassified is Neutral.
pub fn classify(demand_score: u32, price_change: &str) -> Sentiment {
    let direction = if price_change.contains('+') {
        PriceDirection::Rising
    } else if price_change.contains('-') {
        PriceDirection::Falling
    } else {
        PriceDirection::Flat
    };

    if demand_score > 70 && direction == PriceDirection::Rising {
        Sentiment::Bullish
    } else if demand_score > 60 && direction == PriceDirection::Flat {
        Sentiment::Optimistic
    } else if demand_score < 40 && direction == PriceDirection::Falling {
        Sentiment::Bearish
    } else if demand_score < 50 {
        Sentiment::Cautious
    } else {
        Sentiment::Neutral
    }
}

pub fn classify_statistics(stats: &Statistics) -> Sentiment {
    classify(stats.demand_score, &stats.price_change)
}
