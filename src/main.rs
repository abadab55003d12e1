use anyhow::Context;
use dotenvy::dotenv;
use tracing::{Instrument, info};
use tracing_appender::rolling;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use uuid::Uuid;

use hrm_seeder::dispatch::{ReqwestTransport, TokioDelay};
use hrm_seeder::utils::facts::FactGenerator;
use hrm_seeder::{Config, Dispatcher, Pipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;

    // Rolling daily log next to the console stream
    let file_appender = rolling::daily(&config.log_dir, "seeder.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let level = LevelFilter::from_level(config.log_level);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false) // removes module path
                .with_filter(level),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_filter(level),
        )
        .init();

    let run_id = Uuid::new_v4();
    seed(config)
        .instrument(tracing::info_span!("seed", %run_id))
        .await
}

async fn seed(config: Config) -> anyhow::Result<()> {
    info!(
        api = %config.api_base,
        employees = config.total_employees,
        year = config.year,
        concurrency = config.concurrency,
        "Seeder starting..."
    );

    let transport = ReqwestTransport::new(config.request_timeout)?;
    let dispatcher = Dispatcher::new(
        config.api_base.clone(),
        Box::new(transport),
        Box::new(TokioDelay),
        config.retry_policy(),
    );
    let pipeline = Pipeline::new(
        dispatcher,
        FactGenerator::new(config.rng_seed),
        config.total_employees,
        config.year,
        config.concurrency,
    );

    // the pipeline logs its own abort notice or summary
    pipeline.run().await;

    Ok(())
}
