//! JSON HTTP surface over the source registry.

use crate::app_state::AppState;
use crate::error::ScrapeError;
use crate::models::FilterState;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: u32,
}

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: String,
}

fn first_page() -> u32 {
    1
}

pub fn error_response(e: &ScrapeError) -> HttpResponse {
    let body = serde_json::json!({"error": e.to_string(), "kind": e.kind()});
    match e {
        ScrapeError::FetchFailed { .. } => HttpResponse::BadGateway().json(body),
        ScrapeError::MalformedDocument(_) => HttpResponse::UnprocessableEntity().json(body),
        ScrapeError::UnknownSource(_) => HttpResponse::NotFound().json(body),
        ScrapeError::InvalidUrl(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn respond<T: serde::Serialize>(source: &str, result: Result<T, ScrapeError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => {
            log::error!("[{}] {}", source, e);
            error_response(&e)
        }
    }
}

/// `q`, repeated `genre` and `page` from a raw query string.
pub fn parse_search_query(query: &str) -> (FilterState, u32) {
    let mut text = String::new();
    let mut genres = Vec::new();
    let mut page = 1;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "q" => text = value.into_owned(),
            "genre" => genres.push(value.into_owned()),
            "page" => page = value.parse().unwrap_or(1),
            _ => {}
        }
    }
    (FilterState::new(text, genres), page)
}

#[get("/sources")]
async fn list_sources(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.registry.list())
}

#[get("/sources/{id}/popular")]
async fn source_popular(
    data: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let result = match data.registry.get(&id) {
        Ok(adapter) => adapter.browse_popular(query.page).await,
        Err(e) => Err(e),
    };
    respond(&id, result)
}

#[get("/sources/{id}/latest")]
async fn source_latest(
    data: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let result = match data.registry.get(&id) {
        Ok(adapter) => adapter.browse_latest(query.page).await,
        Err(e) => Err(e),
    };
    respond(&id, result)
}

#[get("/sources/{id}/search")]
async fn source_search(data: web::Data<AppState>, id: web::Path<String>, req: HttpRequest) -> impl Responder {
    let (filters, page) = parse_search_query(req.query_string());
    let result = match data.registry.get(&id) {
        Ok(adapter) => adapter.search("", &filters, page).await,
        Err(e) => Err(e),
    };
    respond(&id, result)
}

#[get("/sources/{id}/filters")]
async fn source_filters(data: web::Data<AppState>, id: web::Path<String>) -> impl Responder {
    match data.registry.get(&id) {
        Ok(adapter) => HttpResponse::Ok().json(adapter.filters().await),
        Err(e) => error_response(&e),
    }
}

#[get("/sources/{id}/details")]
async fn source_details(
    data: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<UrlQuery>,
) -> impl Responder {
    let result = match data.registry.get(&id) {
        Ok(adapter) => adapter.fetch_detail(&query.url).await,
        Err(e) => Err(e),
    };
    respond(&id, result)
}

#[get("/sources/{id}/chapters")]
async fn source_chapters(
    data: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<UrlQuery>,
) -> impl Responder {
    let result = match data.registry.get(&id) {
        Ok(adapter) => adapter.fetch_chapters(&query.url).await,
        Err(e) => Err(e),
    };
    respond(&id, result)
}

#[get("/sources/{id}/pages")]
async fn source_pages(
    data: web::Data<AppState>,
    id: web::Path<String>,
    query: web::Query<UrlQuery>,
) -> impl Responder {
    let result = match data.registry.get(&id) {
        Ok(adapter) => adapter.fetch_pages(&query.url).await,
        Err(e) => Err(e),
    };
    respond(&id, result)
}

#[get("/metrics")]
async fn get_metrics(data: web::Data<AppState>) -> impl Responder {
    let all_metrics = data.metrics.get_all_metrics();

    let metrics_json: Vec<serde_json::Value> = all_metrics
        .iter()
        .map(|m| {
            serde_json::json!({
                "source_name": m.source_name,
                "success_rate": format!("{:.2}%", m.success_rate()),
                "total_requests": m.total_requests,
                "successful_requests": m.successful_requests,
                "failed_requests": m.failed_requests,
                "average_response_time_ms": format!("{:.2}", m.average_response_time_ms),
                "fetch_failures": m.fetch_failures,
                "malformed_documents": m.malformed_documents,
                "last_success": m.last_success,
                "last_failure": m.last_failure,
                "last_error": m.last_error,
            })
        })
        .collect();

    HttpResponse::Ok().json(serde_json::json!({
        "metrics": metrics_json,
        "total_sources_tracked": all_metrics.len()
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_sources)
        .service(source_popular)
        .service(source_latest)
        .service(source_search)
        .service(source_filters)
        .service(source_details)
        .service(source_chapters)
        .service(source_pages)
        .service(get_metrics);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_query_repeats_genres() {
        let (filters, page) = parse_search_query("q=solo+leveling&genre=action&genre=fantasy&page=2");
        assert_eq!(filters.text_query, "solo leveling");
        assert_eq!(filters.selected_genre_ids.len(), 2);
        assert!(filters.selected_genre_ids.contains("fantasy"));
        assert_eq!(page, 2);
    }

    #[test]
    fn test_parse_search_query_defaults() {
        let (filters, page) = parse_search_query("");
        assert_eq!(filters, FilterState::default());
        assert_eq!(page, 1);
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_response(&ScrapeError::fetch_failed("https://x", "timeout")).status(),
            502
        );
        assert_eq!(error_response(&ScrapeError::malformed("x")).status(), 422);
        assert_eq!(
            error_response(&ScrapeError::UnknownSource("x".into())).status(),
            404
        );
    }
}
