use std::sync::Arc;

use actix_web::{App, HttpServer};
use opentelemetry::global;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::runtime::TokioCurrentThread;
use paperclip::actix::{web, OpenApiExt};
use tracing_actix_web::TracingLogger;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use hotelservice_bookings::app_config::config_app;
use hotelservice_bookings::guests_repository::{
    GuestsRepository, InMemoryGuestsRepository, PostgresGuestsRepository,
};
use hotelservice_bookings::listing::ListingService;
use hotelservice_bookings::reservations_repository::{
    InMemoryReservationsRepository, PostgresReservationsRepository, ReservationsRepository,
};
use hotelservice_bookings::settings::Settings;
use hotelservice_bookings::storage::{InMemoryStorage, PostgresStorage};

// Based on https://github.com/LukeMathWalker/tracing-actix-web/blob/main/examples/opentelemetry/src/main.rs#L15
fn init_telemetry() {
    let app_name = "hotelservice_bookings";

    // Spans are exported to Jaeger in batches
    global::set_text_map_propagator(TraceContextPropagator::new());
    #[allow(deprecated)]
    let tracer = opentelemetry_jaeger::new_agent_pipeline()
        .with_service_name(app_name)
        .install_batch(TokioCurrentThread)
        .expect("Failed to install OpenTelemetry tracer.");

    // Tunable via `RUST_LOG` env variable
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info"));
    let telemetry = tracing_opentelemetry::layer().with_tracer(tracer);
    let formatting_layer = BunyanFormattingLayer::new(app_name.into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(telemetry)
        .with(JsonStorageLayer)
        .with(formatting_layer);
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to install `tracing` subscriber.")
}

async fn init_repositories(
    settings: &Settings,
) -> anyhow::Result<(Arc<dyn GuestsRepository>, Arc<dyn ReservationsRepository>)> {
    if settings.use_in_memory_db {
        tracing::info!("Using in-memory storage");
        let storage = Arc::new(InMemoryStorage::default());
        Ok((
            Arc::new(InMemoryGuestsRepository::new(storage.clone())),
            Arc::new(InMemoryReservationsRepository::new(storage)),
        ))
    } else {
        let storage = Arc::new(PostgresStorage::init(settings.postgres_config()).await?);
        Ok((
            Arc::new(PostgresGuestsRepository::new(storage.clone())),
            Arc::new(PostgresReservationsRepository::new(storage)),
        ))
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry();

    let settings = Settings::load()?;
    let (guests_repository, reservations_repository) = init_repositories(&settings).await?;
    let listing = ListingService::new(guests_repository.clone(), reservations_repository.clone());

    tracing::info!("starting HTTP server at http://0.0.0.0:{}", settings.http_port);

    HttpServer::new(move || {
        App::new()
            .wrap_api()
            .app_data(web::Data::new(guests_repository.clone()))
            .app_data(web::Data::new(reservations_repository.clone()))
            .app_data(web::Data::new(listing.clone()))
            .wrap(TracingLogger::default())
            .configure(config_app)
            .with_json_spec_at("/apispec/v2")
            .build()
    })
    .bind(("0.0.0.0", settings.http_port))?
    .run()
    .await?;

    Ok(())
}
