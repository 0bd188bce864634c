use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tripdesk::{
    api,
    config::Settings,
    mail::Mailer,
    repository,
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripdesk=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!(
        "Starting TripDesk server on {}:{}",
        settings.server.host,
        settings.server.port
    );

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    // Initialize repositories
    let booking_repo = Arc::new(repository::SqliteBookingRepository::new(db_pool.clone()));
    let lead_repo = Arc::new(repository::SqliteLeadRepository::new(db_pool.clone()));
    let package_repo = Arc::new(repository::SqlitePackageRepository::new(db_pool.clone()));
    let catalog_repo = Arc::new(repository::SqliteCatalogRepository::new(db_pool.clone()));
    let content_repo = Arc::new(repository::SqliteContentRepository::new(db_pool.clone()));
    let employee_repo = Arc::new(repository::SqliteEmployeeRepository::new(db_pool.clone()));

    // Initialize mailer if configured
    let mailer = match Mailer::new(&settings.mail, &settings.agency) {
        Some(mailer) => {
            tracing::info!("Transactional mail enabled");
            Some(Arc::new(mailer))
        }
        None => {
            tracing::info!("Transactional mail disabled");
            None
        }
    };

    if settings.auth.api_token.is_none() {
        tracing::warn!("No API token configured; back-office routes are unguarded");
    }

    // Create service context
    let service_context = Arc::new(ServiceContext::new(
        booking_repo,
        lead_repo,
        package_repo,
        catalog_repo,
        content_repo,
        employee_repo,
        mailer,
    ));

    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        settings.server.host, settings.server.port
    ))
    .await?;

    tracing::info!(
        "Server listening on http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
