//! The binary entry point for Form Gate's backend web server.

use formgate::{api, config::Config, AppState};
use tokio::net::TcpListener;

/// # Errors
///
/// See implementation.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let address = dotenvy::var("ADDRESS")?;
    let config = Config::from_env()?;

    let app = api::routes::router(AppState::new(config)?);

    println!("Listening to {address}...");

    let listener = TcpListener::bind(address).await?;

    println!("Ready!");

    axum::serve(listener, app).await?;

    Ok(())
}
