use status_api::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Installs the JSON subscriber before anything else logs
    let state = AppState::builder().config(config.clone()).build().await?;

    tracing::info!(
        seed_demo = config.storage.seed_demo,
        auth = state.auth().is_some(),
        "Application state ready"
    );

    Server::new(config).serve(router(state)).await
}
