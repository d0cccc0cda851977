// Smoke-test harness for the classification pipeline: classify URLs given
// as CLI arguments against the configured providers and print verdicts.
// Chat frontends embed the library instead of shelling out to this.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishguard_core::{
    normalize_candidate, InMemoryReportStore, ReputationEngine, CONFIG,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phishguard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: phishguard <url> [url...]");
        std::process::exit(2);
    }

    let store = Arc::new(InMemoryReportStore::new());
    let engine = ReputationEngine::from_config(&CONFIG, store);
    info!("classifying {} candidate URL(s)", args.len());

    for raw in &args {
        match normalize_candidate(raw) {
            Some(url) => {
                let result = engine.classify(&url).await;
                println!("{} -> {} (source: {})", url, result.verdict, result.source);
            },
            None => {
                println!("{} -> skipped (not a valid URL)", raw);
            },
        }
    }

    Ok(())
}
