use wiki_harvest::config::CrawlConfig;
use wiki_harvest::crawler::CrawlSession;
use wiki_harvest::render::WebDriverRenderer;
use wiki_harvest::storage::S3Store;

// Configuration settings
const START_URL: &str = "https://stardewvalleywiki.com/";
const BASE_URL: &str = "https://stardewvalleywiki.com/";
const S3_BUCKET: &str = "stardew-rag-data";
const S3_PREFIX: &str = "stardew_wiki_data/";
const AWS_PROFILE: &str = "sleepingbeo";
const WEBDRIVER_URL: &str = "http://localhost:4444";

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let config = CrawlConfig::new(START_URL, BASE_URL, S3_BUCKET, S3_PREFIX)
        .with_profile(AWS_PROFILE)
        .with_webdriver_url(WEBDRIVER_URL);

    ::log::info!("Starting wiki crawl from {}", config.start_url);

    let store = S3Store::connect(&config.bucket, config.profile.as_deref()).await;

    let renderer = match WebDriverRenderer::connect(&config.webdriver_url).await {
        Ok(renderer) => renderer,
        Err(e) => {
            ::log::error!("Failed to start rendering session: {}", e);
            return;
        }
    };

    let start_time = std::time::Instant::now();
    let stats = CrawlSession::new(config, renderer, store).run().await;

    ::log::info!(
        "Crawl complete - processed {} pages ({} uploaded, {} images skipped, {} fetch failures, {} upload failures) in {:.2} seconds",
        stats.pages_processed,
        stats.pages_uploaded,
        stats.images_skipped,
        stats.fetch_failures,
        stats.upload_failures,
        start_time.elapsed().as_secs_f64()
    );
}
