use sea_orm::Database;
use tracing::info;

use snooze_api::config::ApiConfig;
use snooze_api::infra::sms::TwilioSmsSender;
use snooze_api::router::build_router;
use snooze_api::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let sms = config.twilio.clone().map(TwilioSmsSender::new);
    if sms.is_none() {
        info!("twilio not configured; account recovery endpoints disabled");
    }

    let state = AppState { db, sms };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
