use collector::{Collector, Pipeline, DEFAULT_TARGET_COUNT};
use tracing_subscriber::EnvFilter;
use tweet_store::TweetStore;
use tweetpulse_core::{AppConfig, CoreError, ErrorReporter, SearchParams};
use twitter_client::TwitterApiClient;

const DEFAULT_LOG_FILTER: &str = "tweetpulse=info,collector=info,twitter_client=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    tracing::info!("Starting tweetpulse - service delivery tweet collector");

    run().await.map_err(|e| {
        let reporter = ErrorReporter::new();
        reporter.report_error(&e);
        eprintln!("{}", reporter.summary(&e));
        e
    })
}

async fn run() -> Result<(), CoreError> {
    let config = AppConfig::from_env()?;
    let client = TwitterApiClient::new(&config)?;
    let pipeline = Pipeline::new(
        Collector::new(DEFAULT_TARGET_COUNT),
        TweetStore::new(&config.data_path),
    );

    let mut cursor = client.search(
        SearchParams::service_delivery_johannesburg(),
        DEFAULT_TARGET_COUNT,
    );
    let summary = pipeline.run(&mut cursor).await?;

    println!("{}", summary.collected_line());
    println!("{}", summary.hashtags_line());
    println!("{}", summary.sample_line());

    let metrics = client.get_metrics().await;
    tracing::info!(
        "Finished after {} API requests ({} rate limited)",
        metrics.total_requests,
        metrics.rate_limited_requests
    );
    for (endpoint, stats) in &metrics.requests_by_endpoint {
        tracing::info!(
            "  {}: {} requests, {} errors, avg {:?}, max {:?}",
            endpoint,
            stats.request_count,
            stats.error_count,
            stats.average_response_time(),
            stats.max_response_time
        );
    }
    Ok(())
}
