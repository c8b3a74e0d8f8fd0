pub mod api;
pub mod config;
pub mod host;
pub mod logic;
pub mod model;
pub mod parser;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export pipeline stages
pub use logic::{
    CatalogueEntryResolver, EvolutionBranchBuilder, InterfaceEntryResolver, ResolvedCatalogue,
    ResolvedInterface, SpecEvolutionBuilder, SpecEvolutionConfigResolver,
    SpecEvolutionDataExtractor, SpecEvolutionPipeline, SpecEvolutionSummaryMapper,
};

// Export all model types
pub use model::*;

// Export host types
pub use host::{GithubHost, HostClient, InMemoryHost};

// Function for integration testing
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level only (suppress DEBUG logs)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    // Load configuration
    let config = crate::config::AppConfig::load()?;

    let github = crate::host::GithubHost::new(config.github.api_base.clone(), config.github_token());
    let host = Arc::new(github);

    // Create router with state
    let app = crate::api::routes::create_router().with_state(host);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;

    serve(listener, app).await?;

    Ok(())
}
