use std::sync::Arc;

use auth::Authenticator;
use shop_service::config::Config;
use shop_service::domain::user::service::AuthService;
use shop_service::inbound::http::router::create_router;
use shop_service::outbound::mail::MailchimpMailingList;
use shop_service::outbound::mail::MailgunMailer;
use shop_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_DB_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shop_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "shop-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        app = %config.app.name,
        environment = config.server.environment.as_str(),
        port = config.server.port,
        client_url = %config.app.client_url,
        mailgun = config.mailgun.is_configured(),
        mailchimp = config.mailchimp.is_configured(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(config.database.url.expose())
        .await?;
    tracing::info!(
        max_connections = MAX_DB_CONNECTIONS,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.expose().as_bytes(),
        config.jwt.token_lifetime()?,
    ));

    let http_client = reqwest::Client::new();
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let mailer = Arc::new(MailgunMailer::new(http_client.clone(), &config.mailgun));
    let mailing_list = Arc::new(MailchimpMailingList::new(http_client, &config.mailchimp));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        mailer,
        mailing_list,
        Arc::clone(&authenticator),
        config.app.client_url.clone(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
