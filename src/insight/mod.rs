// Insight layer: remote model tier, rule-based tier and static fallback,
// plus sentiment and recommendation derivation.

pub mod generator;
pub mod recommend;
pub mod remote;
pub mod rules;
pub mod sentiment;

pub use generator::InsightGenerator;
