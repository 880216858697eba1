//! To-do board server entry point.

use anyhow::Context;
use log::{info, warn};
use tokio::net::TcpListener;
use todo_core::db::open_db;
use todo_web::{router, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing `.env` is normal in production; real variables still apply.
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::from_env()?;
    todo_core::init_logging(config.log_level, config.log_dir.as_deref())
        .map_err(anyhow::Error::msg)?;
    if let Err(err) = dotenv {
        if !err.not_found() {
            warn!("event=config_load module=web status=error error={err}");
        }
    }

    let conn = open_db(&config.database_path).with_context(|| {
        format!(
            "failed to open database `{}`",
            config.database_path.display()
        )
    })?;
    let app = router(AppState::new(conn), &config.static_dir);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        "event=server_start module=web status=ok addr=http://{addr} static_dir={}",
        config.static_dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=web status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_stop module=web status=error error={err}");
    }
}
