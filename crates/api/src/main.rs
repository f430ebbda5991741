use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use convo_guard_api::services::{
    ChatPlatformClient, DispatchCoordinator, RemoteScorer, ScreeningPipeline, WebhookNotifier,
};
use convo_guard_api::{app, config, middleware};
use domain::services::{LexiconScorer, Scorer};
use persistence::TenantConfigStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging
    middleware::logging::init_logging(&config.logging);

    info!("Starting Convo Guard v{}", env!("CARGO_PKG_VERSION"));

    // Settings storage
    let store = TenantConfigStore::new(&config.storage.data_dir);
    store
        .ensure_data_dir()
        .await
        .context("Failed to create tenant settings directory")?;

    // Scoring backend; the remote classifier is warmed up before the
    // server binds so the first webhook never pays the model load cost.
    let scorer: Arc<dyn Scorer> = match config.screening.scorer.as_str() {
        "remote" => {
            let remote = RemoteScorer::new(&config.screening.scorer_url)?;
            info!(url = %config.screening.scorer_url, "Warming up remote scorer");
            remote
                .warm_up()
                .await
                .context("Remote scorer warm-up failed")?;
            Arc::new(remote)
        }
        _ => {
            let valences = config
                .screening
                .load_valences()
                .context("Failed to load sentiment lexicon")?;
            Arc::new(LexiconScorer::with_valences(valences))
        }
    };

    let word_list = config
        .screening
        .load_word_list()
        .context("Failed to load moderation word list")?;
    info!(
        scorer = %config.screening.scorer,
        word_list_len = word_list.len(),
        "Screening configured"
    );

    // Outbound services and the screening pipeline
    let chat_client = Arc::new(ChatPlatformClient::new(&config.chat_api)?);
    let notifier = Arc::new(WebhookNotifier::new()?);
    let dispatcher = DispatchCoordinator::new(chat_client, notifier);
    let pipeline = Arc::new(ScreeningPipeline::new(
        store.clone(),
        scorer,
        dispatcher,
        word_list,
        config.screening.toxicity_threshold,
        config.chat_api.inbox_base_url.clone(),
    ));

    // Build application
    let addr = config.socket_addr();
    let app = app::create_app(config, store, pipeline);

    // Start server
    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
