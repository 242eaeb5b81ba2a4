use std::{env, net::SocketAddr, sync::Arc};
use tokio::{fs, signal, task};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use workout_map::{router, AppState, FileBlobStore, Tracker, resolve_data_dir};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = resolve_data_dir();
    fs::create_dir_all(&data_dir).await?;
    info!(dir = %data_dir.display(), "using data directory");

    let storage = Arc::new(FileBlobStore::new(data_dir));
    let tracker = task::spawn_blocking(move || Tracker::new(storage)).await?;
    let state = AppState::new(tracker);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
