//! # Example: services
//!
//! A service supervisor whose watch loop fails after a few seconds. The failure is recorded as
//! the run's error, the workload observes hold-on and exits, and `run` returns the watch error.
//!
//! ## Run
//! ```bash
//! cargo run --example services
//! ```

use std::sync::Arc;
use std::time::Duration;

use appctl::{
    AppConfig, AppError, Application, BoxError, Context, Latch, LogWriter, Services, Subscribe,
};
use async_trait::async_trait;

struct Backends;

#[async_trait]
impl Services for Backends {
    async fn init(&self, ctx: Arc<dyn Context>) -> Result<(), BoxError> {
        tracing::info!(deadline = ?ctx.deadline(), "connecting backends");
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(())
    }

    async fn watch(&self, ctx: Arc<dyn Context>) -> Result<(), BoxError> {
        tokio::select! {
            _ = ctx.done().closed() => Ok(()),
            _ = tokio::time::sleep(Duration::from_secs(3)) => Err("cache backend lost".into()),
        }
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appctl=debug,services=info".into()),
        )
        .init();

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let app = Application::builder(AppConfig::default())
        .with_subscribers(subs)
        .with_services(Arc::new(Backends))
        .with_main_fn(|_ctx: Arc<dyn Context>, hold_on: Latch| async move {
            hold_on.closed().await;
            tracing::info!("draining in-flight work");
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, BoxError>(())
        })
        .build();

    match app.run().await {
        Err(AppError::Watch(e)) => tracing::warn!(err = %e, "services failed"),
        Err(e) => return Err(e.into()),
        Ok(()) => tracing::info!("stopped gracefully"),
    }
    Ok(())
}
