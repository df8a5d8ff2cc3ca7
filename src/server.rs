use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::info;
use std::time::Instant;

use crate::config::Config;
use crate::handlers;
use crate::services::{ImageTextExtractor, JsonFileThemeStore, ThemeResolver};

pub async fn run(config: Config) -> std::io::Result<()> {
    let host = config.host.clone();
    let port = config.port;

    print_banner(&host, port);
    info!("Server running at http://{}:{}/", host, port);

    let extractor = web::Data::new(ImageTextExtractor::new(config.ocr.clone()));
    if !extractor.is_configured() {
        log::warn!("GROQ_API_KEY not set, OCR requests will be refused");
    }
    let store = JsonFileThemeStore::new(config.theme_store_path.clone());
    info!("Theme record: {:?}", store.path());
    let resolver = web::Data::new(ThemeResolver::new(store));

    let startup_time = Instant::now();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(extractor.clone())
            .app_data(resolver.clone())
            .configure(configure_routes)
    })
    .bind((host, port))?
    .run()
    .await?;

    info!("Server stopped. Uptime: {:?}", startup_time.elapsed());
    Ok(())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handlers::json_error_handler))
        .route("/api/ocr", web::post().to(handlers::perform_ocr))
        .route("/api/ocr/validate", web::post().to(handlers::validate_upload))
        .route("/api/theme", web::get().to(handlers::get_theme))
        .route("/api/theme/toggle", web::post().to(handlers::toggle_theme_mode))
        .route(
            "/api/theme/color-scheme",
            web::put().to(handlers::update_color_scheme),
        )
        .route("/api/theme/font-size", web::put().to(handlers::update_font_size))
        .route("/api/theme/reset", web::post().to(handlers::reset_theme))
        .route("/theme.css", web::get().to(handlers::theme_stylesheet))
        .route("/healthz", web::get().to(|| async { "OK" }));
}

fn print_banner(host: &str, port: u16) {
    let banner = r#"
 ____       _           _
/ ___|  ___| |__   ___ | | __ _ _ __
\___ \ / __| '_ \ / _ \| |/ _` | '__|
 ___) | (__| | | | (_) | | (_| | |
|____/ \___|_| |_|\___/|_|\__,_|_|
"#;
    println!("{}", banner);
    println!("         Scholar desk started at: http://{}:{}\n", host, port);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcrSettings;
    use crate::services::ocr::mock::MockTransport;
    use crate::services::MemoryThemeStore;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;

    #[actix_web::test]
    async fn test_routes_wire_both_services() {
        let transport = MockTransport::completion("Chapter 1");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ImageTextExtractor::with_transport(
                    OcrSettings::with_api_key("gsk_test"),
                    transport.clone(),
                )))
                .app_data(web::Data::new(ThemeResolver::new(MemoryThemeStore::new())))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/healthz").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/theme").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        // Larger than actix's default 256 KiB extractor limit
        let req = test::TestRequest::post()
            .uri("/api/ocr")
            .insert_header((header::CONTENT_TYPE, "image/png"))
            .set_payload(vec![0u8; 512 * 1024])
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["extractedText"], "Chapter 1");
        assert_eq!(transport.call_count(), 1);
    }
}
