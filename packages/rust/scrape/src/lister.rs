//! Career Lister: extract the distinct career entries advertised on the
//! site root.

use std::collections::HashSet;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, instrument};
use url::Url;

use careerguide_shared::{CareerSummary, Result};

use crate::fetch_html;

/// Path marker identifying career index links (locale + path segment).
const CAREER_PATH_MARKER: &str = "/pt-BR/path/";

/// Fetch the site root and return the careers advertised there, in the
/// order their links appear in the document.
///
/// May be empty if the page has no matching links. Issues exactly one
/// outbound read.
#[instrument(skip_all, fields(url = %base_url))]
pub async fn list_careers(client: &Client, base_url: &Url) -> Result<Vec<CareerSummary>> {
    let body = fetch_html(client, base_url.as_str()).await?;
    let careers = careers_from_html(&body, base_url);

    info!(count = careers.len(), "career listing extracted");
    Ok(careers)
}

/// Extract career entries from listing-page markup.
///
/// A link qualifies when its raw href contains [`CAREER_PATH_MARKER`] and
/// ends with a trailing path separator (the heuristic for "career index
/// page, not a sub-resource"). The link's visible text becomes the name;
/// entries with empty text are skipped. Duplicate `(name, url)` pairs keep
/// their first-seen position only.
pub fn careers_from_html(html: &str, base_url: &Url) -> Vec<CareerSummary> {
    let doc = Html::parse_document(html);
    let link_sel = Selector::parse("a[href]").expect("link selector");

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut careers: Vec<CareerSummary> = Vec::new();

    for el in doc.select(&link_sel) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };

        if !href.contains(CAREER_PATH_MARKER) || !href.ends_with('/') {
            continue;
        }

        let name = el.text().collect::<String>().trim().to_string();
        if name.is_empty() {
            continue;
        }

        let Ok(url) = base_url.join(href) else {
            continue;
        };
        let url = url.to_string();

        if seen.insert((name.clone(), url.clone())) {
            careers.push(CareerSummary { name, url });
        }
    }

    careers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://techguide.sh").unwrap()
    }

    #[test]
    fn no_matching_links_yields_empty() {
        let html = r#"<html><body>
            <a href="/pt-BR/about/">Sobre</a>
            <a href="/en-US/path/data/">Data</a>
            <a href="https://alura.com.br/">Alura</a>
        </body></html>"#;

        assert!(careers_from_html(html, &base()).is_empty());
    }

    #[test]
    fn duplicate_links_kept_once_in_first_seen_order() {
        let html = r#"<html><body>
            <a href="/pt-BR/path/data-science/">Data Science</a>
            <a href="/pt-BR/path/devops/">DevOps</a>
            <a href="/pt-BR/path/data-science/">Data Science</a>
        </body></html>"#;

        let careers = careers_from_html(html, &base());
        assert_eq!(careers.len(), 2);
        assert_eq!(careers[0].name, "Data Science");
        assert_eq!(careers[0].url, "https://techguide.sh/pt-BR/path/data-science/");
        assert_eq!(careers[1].name, "DevOps");
    }

    #[test]
    fn same_url_different_text_kept_separately() {
        // A card and a footer link to the same career under different labels
        let html = r#"<html><body>
            <a href="/pt-BR/path/front-end/">Front-end</a>
            <a href="/pt-BR/path/front-end/">Ver guia de Front-end</a>
        </body></html>"#;

        let careers = careers_from_html(html, &base());
        assert_eq!(careers.len(), 2);
    }

    #[test]
    fn links_without_trailing_slash_skipped() {
        let html = r#"<html><body>
            <a href="/pt-BR/path/data-science/certificado">Certificado</a>
            <a href="/pt-BR/path/data-science/">Data Science</a>
        </body></html>"#;

        let careers = careers_from_html(html, &base());
        assert_eq!(careers.len(), 1);
        assert_eq!(careers[0].name, "Data Science");
    }

    #[test]
    fn empty_link_text_skipped() {
        let html = r#"<html><body>
            <a href="/pt-BR/path/data-science/"><img src="/icon.svg"></a>
            <a href="/pt-BR/path/data-science/">  Data Science  </a>
        </body></html>"#;

        let careers = careers_from_html(html, &base());
        assert_eq!(careers.len(), 1);
        assert_eq!(careers[0].name, "Data Science");
    }

    #[test]
    fn listing_order_matches_document_order() {
        let fixture = std::fs::read_to_string("../../../fixtures/html/careers-index.html")
            .expect("read fixture");
        let careers = careers_from_html(&fixture, &base());

        let names: Vec<&str> = careers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["Data Science", "DevOps", "Front-end", "Mobile iOS"]
        );
        assert_eq!(careers[3].url, "https://techguide.sh/pt-BR/path/ios/");
    }

    #[tokio::test]
    async fn list_careers_end_to_end() {
        let server = wiremock::MockServer::start().await;

        let fixture = std::fs::read_to_string("../../../fixtures/html/careers-index.html")
            .expect("read fixture");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(&fixture))
            .mount(&server)
            .await;

        let client = crate::build_client(10).unwrap();
        let base = Url::parse(&server.uri()).unwrap();
        let careers = list_careers(&client, &base).await.unwrap();

        assert_eq!(careers.len(), 4);
        assert_eq!(careers[0].name, "Data Science");
        assert!(careers[0].url.starts_with(&server.uri()));
    }

    #[tokio::test]
    async fn list_careers_propagates_fetch_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = crate::build_client(10).unwrap();
        let base = Url::parse(&server.uri()).unwrap();
        assert!(list_careers(&client, &base).await.is_err());
    }
}
