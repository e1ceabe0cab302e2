//! # Example: basic
//!
//! A ticker workload that stops taking new work on hold-on and exits on done.
//!
//! ## Flow
//! ```text
//! main()
//!   └─► Application::run()
//!         ├─► workload ticks every 500ms
//!         ├─► Ctrl-C / SIGTERM ─► hold_on: workload finishes the current tick and returns
//!         └─► workload exit ─► shutdown ─► run() returns Ok
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::sync::Arc;
use std::time::Duration;

use appctl::{AppConfig, Application, BoxError, Context, Latch, LogWriter, Subscribe};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appctl=debug,basic=info".into()),
        )
        .init();

    let cfg = AppConfig {
        termination_timeout: Duration::from_secs(3),
        ..AppConfig::default()
    };
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];

    let app = Application::builder(cfg)
        .with_subscribers(subs)
        .with_main_fn(|ctx: Arc<dyn Context>, hold_on: Latch| async move {
            let mut n = 0u64;
            loop {
                tokio::select! {
                    _ = hold_on.closed() => {
                        tracing::info!(ticks = n, "hold-on: finishing up");
                        return Ok::<_, BoxError>(());
                    }
                    _ = ctx.done().closed() => return Ok(()),
                    _ = tokio::time::sleep(Duration::from_millis(500)) => {
                        n += 1;
                        tracing::info!(tick = n, "tick");
                    }
                }
            }
        })
        .build();

    match app.run().await {
        Ok(()) => tracing::info!("stopped gracefully"),
        Err(e) => tracing::error!(err = %e, label = e.as_label(), "stopped with error"),
    }
    Ok(())
}
