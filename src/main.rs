use actix_web::{web, App, HttpServer};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use multisrc_scraper::app_state::AppState;
use multisrc_scraper::config::Config;
use multisrc_scraper::routes;
use std::path::Path;
use std::sync::Arc;

fn init_logging() {
    if Path::new("log4rs.yml").exists() {
        match log4rs::init_file("log4rs.yml", Default::default()) {
            Ok(()) => return,
            Err(e) => eprintln!("Failed to load log4rs.yml ({}), logging to stdout", e),
        }
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));
    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("Failed to initialize logging: {}", e);
            }
        }
        Err(e) => eprintln!("Invalid logging configuration: {}", e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let cfg = Config::load();

    let client = cfg
        .http
        .create_http_client()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    log::info!("HTTP client initialized:");
    log::info!("  Max retries: {}", cfg.http.max_retries);
    log::info!("  Timeout: {}s", cfg.http.timeout_secs);

    let addr = (cfg.server.bind.as_str(), cfg.server.port);
    let state = AppState::new(&cfg, Arc::new(client))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    for source in state.registry.list() {
        log::info!("  {} ({}) -> {}", source.name, source.language, source.base_url);
    }
    let data = web::Data::new(state);

    log::info!("Listening on {}:{}", addr.0, addr.1);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(routes::configure))
        .bind(addr)?
        .run()
        .await
}
