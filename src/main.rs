use axum::serve;
use spec_catalogue::api::routes::create_router;
use spec_catalogue::config::AppConfig;
use spec_catalogue::host::GithubHost;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging; reqwest connection chatter stays at warn
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Warn)
        .init();

    println!("spec-catalogue: interface catalogue and spec evolution server");

    // Load configuration
    let config = AppConfig::load()?;
    println!(
        "Configuration loaded: server={}:{}",
        config.server.host, config.server.port
    );

    let github = GithubHost::new(config.github.api_base.clone(), config.github_token());
    let host = Arc::new(github);

    run_server(create_router().with_state(host), &config).await?;

    Ok(())
}

async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    println!(
        "spec-catalogue server running on http://{}",
        bind_address
    );

    serve(listener, app).await?;

    Ok(())
}
