use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::{AppError, AppResult};
use crate::models::{ColorScheme, ColorSchemeRequest, FontSize, FontSizeRequest, ThemeResponse};
use crate::services::{CssVariables, ThemeResolver};

/// Malformed theme bodies answer with the same `{ error }` shape as bad values.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected theme request body: {}", err);
    AppError::BadRequest(err.to_string()).into()
}

pub async fn get_theme(resolver: web::Data<ThemeResolver>) -> AppResult<HttpResponse> {
    let config = resolver.get_theme_config();
    Ok(HttpResponse::Ok().json(ThemeResponse::from(config)))
}

pub async fn toggle_theme_mode(resolver: web::Data<ThemeResolver>) -> AppResult<HttpResponse> {
    let config = resolver.toggle_mode()?;
    Ok(HttpResponse::Ok().json(ThemeResponse::from(config)))
}

pub async fn update_color_scheme(
    body: web::Json<ColorSchemeRequest>,
    resolver: web::Data<ThemeResolver>,
) -> AppResult<HttpResponse> {
    let scheme: ColorScheme = body.color_scheme.parse()?;
    let config = resolver.update_color_scheme(scheme)?;
    Ok(HttpResponse::Ok().json(ThemeResponse::from(config)))
}

pub async fn update_font_size(
    body: web::Json<FontSizeRequest>,
    resolver: web::Data<ThemeResolver>,
) -> AppResult<HttpResponse> {
    let size: FontSize = body.font_size.parse()?;
    let config = resolver.update_font_size(size)?;
    Ok(HttpResponse::Ok().json(ThemeResponse::from(config)))
}

pub async fn reset_theme(resolver: web::Data<ThemeResolver>) -> AppResult<HttpResponse> {
    let config = resolver.reset_to_default()?;
    Ok(HttpResponse::Ok().json(ThemeResponse::from(config)))
}

/// Current theme as a stylesheet of CSS custom properties
pub async fn theme_stylesheet(resolver: web::Data<ThemeResolver>) -> AppResult<HttpResponse> {
    let config = resolver.get_theme_config();
    let mut surface = CssVariables::new();
    resolver.apply_theme(&config, &mut surface);
    Ok(HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(surface.to_css()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ThemeConfig;
    use crate::server::configure_routes;
    use crate::services::MemoryThemeStore;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    fn resolver() -> web::Data<ThemeResolver> {
        web::Data::new(ThemeResolver::new(MemoryThemeStore::new()))
    }

    #[actix_web::test]
    async fn test_get_theme_returns_default_with_colors() {
        let app = test::init_service(
            App::new().app_data(resolver()).configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/theme").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["config"]["mode"], "light");
        assert_eq!(body["config"]["colorScheme"], "default");
        assert_eq!(body["config"]["fontSize"], "medium");
        assert_eq!(body["colors"]["primary"], "#4f46e5");
        assert_eq!(body["colors"]["textPrimary"], "#0f172a");
    }

    #[actix_web::test]
    async fn test_mutations_persist_between_requests() {
        let data = resolver();
        let app = test::init_service(
            App::new().app_data(data.clone()).configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/theme/toggle").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["config"]["mode"], "dark");

        let req = test::TestRequest::put()
            .uri("/api/theme/color-scheme")
            .set_json(serde_json::json!({ "colorScheme": "green" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["config"]["colorScheme"], "green");
        assert_eq!(body["colors"]["primary"], "#34d399");

        let req = test::TestRequest::put()
            .uri("/api/theme/font-size")
            .set_json(serde_json::json!({ "fontSize": "large" }))
            .to_request();
        test::call_service(&app, req).await;

        let stored = data.get_theme_config();
        assert_eq!(stored.mode.as_str(), "dark");
        assert_eq!(stored.color_scheme, ColorScheme::Green);
        assert_eq!(stored.font_size, FontSize::Large);

        let req = test::TestRequest::post().uri("/api/theme/reset").to_request();
        test::call_service(&app, req).await;
        assert_eq!(data.get_theme_config(), ThemeConfig::default());
    }

    #[actix_web::test]
    async fn test_unknown_scheme_is_rejected() {
        let data = resolver();
        let app = test::init_service(
            App::new().app_data(data.clone()).configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/theme/color-scheme")
            .set_json(serde_json::json!({ "colorScheme": "neon" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(data.get_theme_config().color_scheme, ColorScheme::Default);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let data = resolver();
        let app = test::init_service(
            App::new().app_data(data.clone()).configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/theme/font-size")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"size\": \"large\"}")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("Bad request:"));
        assert_eq!(data.get_theme_config().font_size, FontSize::Medium);
    }

    #[actix_web::test]
    async fn test_stylesheet_endpoint() {
        let app = test::init_service(
            App::new().app_data(resolver()).configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/theme.css").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "text/css; charset=utf-8"
        );

        let body = test::read_body(resp).await;
        let css = std::str::from_utf8(&body).unwrap();
        assert!(css.contains("--color-background: #f8fafc;"));
    }
}
