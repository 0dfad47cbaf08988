use clap::Parser;
use shortest_core::Shortener;
use shortest_gateway::cli::{GeneratorArg, CLI};
use shortest_gateway::{telemetry, App, AppState};
use shortest_generator::{RandomGenerator, RandomGeneratorSettings, SeqGenerator};
use shortest_shortener::{ShortenerService, ShortenerSettings};
use shortest_storage::InMemoryRepository;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;
    telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        generator = %config.generator,
        code_space = config.code_space,
        max_attempts = config.max_attempts,
        "starting shortest gateway"
    );

    let settings = ShortenerSettings::builder()
        .base_url(config.base_url)
        .max_attempts(config.max_attempts)
        .build();
    let repository = InMemoryRepository::new();

    let shortener: Arc<dyn Shortener> = match config.generator {
        GeneratorArg::Random => {
            let generator = RandomGenerator::new(
                RandomGeneratorSettings::builder()
                    .upper_bound(config.code_space)
                    .build(),
            )?;
            Arc::new(ShortenerService::new(repository, generator, settings))
        }
        GeneratorArg::Seq => Arc::new(ShortenerService::new(
            repository,
            SeqGenerator::new(),
            settings,
        )),
    };

    let app = App::router(AppState::new(shortener, config.fallback_url));

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
}
