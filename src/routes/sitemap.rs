use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use chrono::{DateTime, Utc};

use crate::state::AppState;

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn url_entry(loc: &str, lastmod: &DateTime<Utc>, priority: &str) -> String {
    format!(
        "  <url>\n\
         \x20   <loc>{}</loc>\n\
         \x20   <lastmod>{}</lastmod>\n\
         \x20   <changefreq>monthly</changefreq>\n\
         \x20   <priority>{}</priority>\n\
         \x20 </url>\n",
        escape_xml(loc),
        lastmod.format("%Y-%m-%d"),
        priority,
    )
}

/// Sitemap body: home, about, then one entry per project slug.
pub fn render(site_url: &str, slugs: &[String], now: &DateTime<Utc>) -> String {
    let mut urls = String::new();
    urls.push_str(&url_entry(site_url, now, "1.0"));
    urls.push_str(&url_entry(&format!("{}/about", site_url), now, "0.8"));
    for slug in slugs {
        urls.push_str(&url_entry(&format!("{}/work/{}", site_url, slug), now, "0.7"));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
         {}</urlset>\n",
        urls
    )
}

/// GET /sitemap.xml
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let slugs = state.content.project_slugs().await;
    let xml = render(&state.config.site_url, &slugs, &Utc::now());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/xml; charset=utf-8")
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(xml))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to build sitemap response");
            Response::new(Body::empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::static_data;
    use crate::state::tests::memory_state;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use chrono::TimeZone;
    use tower::ServiceExt;

    #[test]
    fn test_render_lists_pages_with_priorities() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let xml = render("https://example.com", &["a-film".to_string()], &now);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://example.com</loc>"));
        assert!(xml.contains("<loc>https://example.com/about</loc>"));
        assert!(xml.contains("<loc>https://example.com/work/a-film</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert!(xml.contains("<lastmod>2026-01-15</lastmod>"));
        assert_eq!(xml.matches("<changefreq>monthly</changefreq>").count(), 3);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }

    #[tokio::test]
    async fn test_sitemap_uses_bundled_slugs_without_store() {
        let app = Router::new()
            .route("/sitemap.xml", get(sitemap))
            .with_state(memory_state(Vec::new()));
        let res = app
            .oneshot(Request::get("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()[header::CONTENT_TYPE],
            "application/xml; charset=utf-8"
        );
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let xml = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(xml.matches("<url>").count(), 2 + static_data::projects().len());
    }
}
