//! # Counter Runtime
//!
//! Reads one JSON `SignedRequest` per line from stdin and writes one JSON
//! `RequestOutcome` per line to stdout. State lives in an in-memory ledger
//! for the lifetime of the process.
//!
//! ```text
//! COUNTER_PROGRAM_ID=<64 hex> counter-runtime < requests.jsonl
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use counter_accounts::{CounterService, InMemoryLedger, SystemClock};
use counter_runtime::{init_logging, RequestProcessor, RuntimeConfig, TracingEventSink};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("loading configuration")?;
    init_logging(&config).context("initializing logging")?;
    config.validate().context("validating configuration")?;

    let service = CounterService::new(
        config.counter.clone(),
        Arc::new(InMemoryLedger::new()),
        SystemClock,
        TracingEventSink,
    )
    .context("starting counter service")?;
    let service = Arc::new(service);
    let processor = RequestProcessor::new(Arc::clone(&service), config.counter.program_id);

    info!("Counter runtime reading requests from stdin. Press Ctrl+C to stop.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("reading stdin")?,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted");
                break;
            }
        };

        let Some(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }

        let outcome = processor.process_line(&line);
        let mut encoded = serde_json::to_vec(&outcome).context("encoding outcome")?;
        encoded.push(b'\n');
        stdout.write_all(&encoded).await.context("writing stdout")?;
        stdout.flush().await.context("flushing stdout")?;
    }

    let stats = service.stats();
    info!(
        initialized = stats.initialized,
        incremented = stats.incremented,
        reset = stats.reset,
        rejected = stats.rejected,
        "Counter runtime stopped"
    );
    Ok(())
}
