use std::sync::Arc;

use crate::config::Config;
use lineup_core::events::{EventService, EventServiceTrait};
use lineup_storage_sqlite::{
    db::{self, write_actor},
    events::EventRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub event_service: Arc<dyn EventServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("LINEUP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let event_repo = Arc::new(EventRepository::new(pool, writer));
    let event_service = Arc::new(EventService::new(event_repo));

    Ok(Arc::new(AppState { event_service }))
}
