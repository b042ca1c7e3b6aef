//! `annals serve`: the JSON API over HTTP.

use std::sync::Arc;

use annals_api::AppState;
use annals_sync::GistClient;
use anyhow::Context as _;
use tokio::net::TcpListener;

use super::Ctx;

pub async fn run(ctx: Ctx) -> anyhow::Result<()> {
  let remote = GistClient::new(&ctx.config.remote_config())?;
  let state = AppState::new(
    Arc::new(ctx.store),
    ctx.page,
    remote,
    ctx.config.export_dir.clone(),
  );

  let app = annals_api::router(state);
  let address = format!("{}:{}", ctx.config.host, ctx.config.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
