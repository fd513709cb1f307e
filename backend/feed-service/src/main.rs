use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_service::config::Config;
use feed_service::gateways::{PoemSourceClient, SocialGraphClient};
use feed_service::handlers::{get_feed, health, FeedHandlerState};
use feed_service::FeedService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json().with_target(true))
        .init();

    let config = Config::from_env().map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("config error: {}", e))
    })?;

    let timeout = Duration::from_secs(config.gateways.timeout_secs);
    let graph = SocialGraphClient::new(&config.gateways.social_graph_url, timeout)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let poems = PoemSourceClient::new(&config.gateways.poem_source_url, timeout)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let feed = Arc::new(FeedService::new(Arc::new(graph), Arc::new(poems)));

    let bind_addr = ("0.0.0.0", config.app.port);
    info!(
        "feed-service listening on {}:{} (env: {})",
        bind_addr.0, bind_addr.1, config.app.env
    );

    HttpServer::new(move || {
        let state = FeedHandlerState { feed: feed.clone() };
        App::new()
            .app_data(web::Data::new(state))
            .service(health)
            .service(web::scope("/api/v1/feed").service(get_feed))
    })
    .bind(bind_addr)?
    .run()
    .await
}
