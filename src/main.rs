mod analyzer;
mod cleaner;
mod config;
mod datagen;
mod insight;
mod model;
mod utils;

use analyzer::MarketAnalysisAssembler;
use config::AppConfig;
use futures::future::join_all;
use insight::recommend::derive_recommendations;
use insight::sentiment;
use insight::InsightGenerator;
use model::MarketReport;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber;

const HISTORY_DAYS: i64 = 60;

const ROUTES: [(&str, &str); 4] = [
    ("SYD", "MEL"),
    ("SYD", "BNE"),
    ("MEL", "BNE"),
    ("SYD", "PER"),
];

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config = Arc::new(AppConfig::from_env());
    if config.remote_configured() {
        info!("Remote insight backend configured (model: {})", config.openai_model);
    } else {
        info!("No remote credential; rule-based insight tier will be used");
    }

    info!("Routes to analyze: {}", ROUTES.len());
    let tasks: Vec<_> = ROUTES
        .iter()
        .map(|&(origin, destination)| analyze_route(origin, destination, config.clone()))
        .collect();
    join_all(tasks).await;
    info!("All routes analyzed.");
}

/// Runs the full pipeline for one route: mock acquisition, cleaning and
/// analysis, insight generation, sentiment and recommendations, then
/// prints the assembled report as JSON.
async fn analyze_route(origin: &str, destination: &str, config: Arc<AppConfig>) {
    info!("Processing route: {origin}-{destination}");

    let raw = datagen::generate_route_records(origin, destination, HISTORY_DAYS);
    info!("Fetched {} raw records", raw.len());

    let mut assembler = MarketAnalysisAssembler::new();
    let analysis = assembler.analyze(&raw);
    info!(
        "Base stats: avg = {}, change = {}, health = {}",
        analysis.statistics.avg_price,
        analysis.statistics.price_change,
        analysis.statistics.market_health
    );

    let generator = InsightGenerator::from_config(&config);
    let insights = generator.generate(Some(&analysis)).await;
    info!("Generated {} insights", insights.len());

    let sentiment = sentiment::classify_statistics(&analysis.statistics);
    let recommendations = derive_recommendations(&insights);

    let report = MarketReport {
        analysis,
        insights,
        sentiment: sentiment.to_string(),
        recommendations,
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("Report serialization failed: {e}"),
    }

    info!("Finished route: {origin}-{destination}");
}
