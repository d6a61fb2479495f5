use clap::Parser;
use knot_admin::AdminService;
use knot_core::Repository;
use knot_gateway::app::App;
use knot_gateway::cli::{StorageBackendArg, CLI};
use knot_gateway::state::AppState;
use knot_generator::RandomGenerator;
use knot_redirector::RedirectorService;
use knot_shortener::ShortenerService;
use knot_storage::{InMemoryRepository, JsonFileRepository};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CLI::parse();

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        code_length = config.code_length,
        "starting knot gateway"
    );

    match config.storage {
        StorageBackendArg::JsonFile => {
            let repository = JsonFileRepository::open(&config.data_file).await?;
            run_server(repository, config).await
        }
        StorageBackendArg::InMemory => run_server(InMemoryRepository::new(), config).await,
    }
}

async fn run_server<R>(repository: R, config: CLI) -> anyhow::Result<()>
where
    R: Repository + Clone,
{
    // All three services share the one authoritative store handle.
    let generator = RandomGenerator::new(config.code_length);
    let shortener = Arc::new(ShortenerService::new(repository.clone(), generator));
    let redirector = Arc::new(RedirectorService::new(repository.clone()));
    let admin = Arc::new(AdminService::new(repository));

    let state = AppState::new(shortener, redirector, admin, config.base_url);
    let app = App::router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
