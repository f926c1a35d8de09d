use std::sync::Arc;

use actix_web::HttpServer;

use aigc_gateway::app::create_app;
use aigc_gateway::config;
use aigc_gateway::service::GatewayService;
use aigc_gateway::upstream::{UpstreamClient, build_http_client};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    log::info!("Initializing gateway...");

    let config = match config::load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            log::error!("failed to load config: {e}");
            std::process::exit(1);
        }
    };

    let http_client = build_http_client(&config).map_err(std::io::Error::other)?;
    let upstream = Arc::new(UpstreamClient::new(http_client, config.clone()));
    let gateway_service = Arc::new(GatewayService::new(upstream, config.clone()));

    let port = config.port;
    log::info!("server running on port {port}");
    log::info!("upstream: {}", config.upstream_url);

    HttpServer::new(move || create_app(gateway_service.clone(), config.clone()))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}
