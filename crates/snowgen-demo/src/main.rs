mod config;
mod telemetry;

use std::{collections::HashSet, thread, time::Instant};

use anyhow::{Context, bail};
use clap::Parser;
use config::{CliArgs, DemoConfig};
use snowgen::{SnowflakeGenerator, SnowflakeId, timestamp_usage_ratio};
use telemetry::init_tracing;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = DemoConfig::try_from(args)?;

    init_tracing();
    log_startup_info(&config);

    let generator = SnowflakeGenerator::new(config.datacenter_id, config.worker_id)?;

    for _ in 0..config.count {
        let id = generator.next_val()?;
        tracing::info!(%id, gen_time = %id.gen_time(), "generated");
    }

    if config.load > 0 {
        load_test(&generator, config.load, config.threads)?;
    }

    tracing::info!(
        "timestamp space used: {:.4}%",
        timestamp_usage_ratio() * 100.0
    );

    let id = generator.next_val()?;
    log_encodings(id)?;

    Ok(())
}

fn log_startup_info(config: &DemoConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting snowgen demo with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Starting snowgen demo as datacenter {} worker {}",
            config.datacenter_id,
            config.worker_id
        );
    }
}

/// Generates `total` IDs from `threads` threads sharing one generator and
/// fails on the first duplicate.
fn load_test(generator: &SnowflakeGenerator, total: usize, threads: usize) -> anyhow::Result<()> {
    let threads = threads.min(total);
    let start = Instant::now();

    let batches = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                // Spread the remainder over the first threads
                let quota = total / threads + usize::from(i < total % threads);
                s.spawn(move || {
                    (0..quota)
                        .map(|_| generator.next_val())
                        .collect::<snowgen::Result<Vec<_>>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(batch) => batch.context("load test generation failed"),
                Err(_) => bail!("load test thread panicked"),
            })
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    let elapsed = start.elapsed();
    let mut seen = HashSet::with_capacity(total);
    for id in batches.into_iter().flatten() {
        if !seen.insert(id) {
            bail!("duplicate id {} ({:?})", id, id);
        }
    }

    tracing::info!(
        ids = seen.len(),
        threads,
        elapsed_ms = elapsed.as_millis() as u64,
        "load test passed: all ids unique"
    );
    Ok(())
}

fn log_encodings(id: SnowflakeId) -> anyhow::Result<()> {
    tracing::info!("id layout:\n{:?}", id);
    tracing::info!(
        timestamp = id.timestamp(),
        datacenter_id = id.datacenter_id(),
        worker_id = id.worker_id(),
        sequence = id.sequence(),
        gen_timestamp = id.gen_timestamp(),
        gen_time = %id.gen_time(),
        "fields"
    );
    tracing::info!(
        decimal = %id,
        base2 = %id.base2(),
        base32 = %id.base32(),
        base36 = %id.base36(),
        base58 = %id.base58(),
        base64 = %id.base64(),
        json = %id.marshal_json(),
        int_bytes = ?id.int_bytes(),
        "encodings"
    );

    let decoded = [
        SnowflakeId::parse_string(&id.to_string())?,
        SnowflakeId::parse_base2(&id.base2())?,
        SnowflakeId::parse_base32(id.base32())?,
        SnowflakeId::parse_base36(&id.base36())?,
        SnowflakeId::parse_base58(id.base58())?,
        SnowflakeId::parse_base64(&id.base64())?,
        SnowflakeId::parse_bytes(id.bytes())?,
        SnowflakeId::parse_int_bytes(id.int_bytes()),
        SnowflakeId::unmarshal_json(id.marshal_json())?,
    ];
    if let Some(bad) = decoded.iter().find(|&&d| d != id) {
        bail!("codec round trip returned {} for {}", bad, id);
    }
    tracing::info!("all encodings decode back to {}", id);
    Ok(())
}
