//! HTTP server setup and routing

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

use crate::error::AppError;
use crate::site::{Page, Site};

pub type SharedSite = Arc<Site>;

const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Turns a page outcome into a response; template failures become a bare 500.
fn page_response(site: &Site, outcome: Result<Page, AppError>) -> Response {
    match outcome {
        Ok(Page::Html(html)) => Html(html).into_response(),
        Ok(Page::NotFound) => not_found_response(site),
        Ok(Page::Unavailable { retry }) => match site.unavailable_html(&retry) {
            Ok(html) => (StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response(),
            Err(err) => internal_error(&err),
        },
        Err(err) => internal_error(&err),
    }
}

fn not_found_response(site: &Site) -> Response {
    match site.not_found_html() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(err) => internal_error(&err),
    }
}

fn internal_error(err: &AppError) -> Response {
    log::error!("Request failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        "Sunucu hatası",
    )
        .into_response()
}

fn feed_response(kind: &str, outcome: Result<String, AppError>) -> Response {
    match outcome {
        Ok(xml) => ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response(),
        Err(err) => {
            log::error!("Could not build {}: {}", kind, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
                format!("{} oluşturulurken bir hata oluştu", kind),
            )
                .into_response()
        }
    }
}

async fn home(State(site): State<SharedSite>) -> Response {
    page_response(&site, site.home().await)
}

async fn blog(State(site): State<SharedSite>) -> Response {
    page_response(&site, site.blog().await)
}

async fn blog_tag(State(site): State<SharedSite>, Path(tag): Path<String>) -> Response {
    page_response(&site, site.blog_tag(&tag).await)
}

async fn blog_post(
    State(site): State<SharedSite>,
    Path((tag, slug)): Path<(String, String)>,
) -> Response {
    page_response(&site, site.post(&tag, &slug).await)
}

async fn names(State(site): State<SharedSite>) -> Response {
    page_response(&site, site.names().await)
}

async fn name(State(site): State<SharedSite>, Path(slug): Path<String>) -> Response {
    page_response(&site, site.name(&slug).await)
}

async fn letters(State(site): State<SharedSite>) -> Response {
    page_response(&site, site.letters_index().await)
}

async fn letter(State(site): State<SharedSite>, Path(harf): Path<String>) -> Response {
    page_response(&site, site.letter(&harf).await)
}

async fn sitemap(State(site): State<SharedSite>) -> Response {
    feed_response("Site haritası", site.sitemap().await)
}

async fn rss(State(site): State<SharedSite>) -> Response {
    feed_response("RSS", site.rss().await)
}

async fn robots(State(site): State<SharedSite>) -> Response {
    ([(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)], site.robots()).into_response()
}

async fn fallback(State(site): State<SharedSite>) -> Response {
    not_found_response(&site)
}

/// Build the axum router
pub fn router(site: SharedSite) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/blog", get(blog))
        .route("/blog/{tag}", get(blog_tag))
        .route("/blog/{tag}/{slug}", get(blog_post))
        .route("/isim", get(names))
        .route("/isim/{slug}", get(name))
        .route("/listeler", get(letters))
        .route("/listeler/{harf}", get(letter))
        .route("/sitemap.xml", get(sitemap))
        .route("/rss", get(rss))
        .route("/robots.txt", get(robots))
        .fallback(fallback)
        .with_state(site)
}

/// Run the site server.
///
/// This function blocks until the server is shut down.
pub async fn serve(site: Site, host: &str, port: u16) -> Result<(), AppError> {
    let router = router(Arc::new(site));

    let listener = TcpListener::bind((host, port)).await?;
    log::info!("Listening on http://{}:{}", host, port);

    axum::serve(listener, router).await?;
    Ok(())
}
