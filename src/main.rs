use anyhow::Context;
use chrono::Utc;
use tracing::info;

use rental_data::{
    config::AppConfig,
    db::{connection, dao::DaoContext},
    logging::init_tracing,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("rental_data failed: {err:?}");
        eprintln!("rental_data failed: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env()?;
    init_tracing(&cfg.logging.rust_log)?;

    let database = cfg
        .database
        .as_ref()
        .context("database config is required (set APP_DATABASE__URL)")?;
    let db = connection::connect(database).await?;
    let daos = DaoContext::new(&db);

    let now = Utc::now().fixed_offset();
    let otps = daos.otp().purge_expired(now).await?;
    let sessions = daos.session().purge_expired(now).await?;
    info!(
        otps,
        sessions,
        otp_ttl_minutes = cfg.lifecycle.otp_ttl_minutes,
        session_ttl_days = cfg.lifecycle.session_ttl_days,
        "expiry sweep finished"
    );
    Ok(())
}
