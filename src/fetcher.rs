use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::error::ScraperError;

/// Status and body of a single GET request
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status_code: u16,
    /// Only read when the server answered 200
    pub body: Option<String>,
}

impl FetchedPage {
    pub fn is_ok(&self) -> bool {
        self.status_code == StatusCode::OK.as_u16()
    }
}

/// HTTP GET with a fixed header set applied to every request
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(headers: HeaderMap, timeout: Option<Duration>) -> Result<Self, ScraperError> {
        let mut client_builder = reqwest::Client::builder().default_headers(headers);

        if let Some(timeout) = timeout {
            log::debug!("Using request timeout of {:?}", timeout);
            client_builder = client_builder.timeout(timeout);
        }

        Ok(Self {
            client: client_builder.build()?,
        })
    }

    /// Connection-level failures are returned as errors; HTTP statuses are not.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        log::debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();

        let body = if response.status() == StatusCode::OK {
            Some(response.text().await?)
        } else {
            None
        };

        Ok(FetchedPage { status_code, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, USER_AGENT};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_configured_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "wiki-test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("wiki-test"));
        let fetcher = Fetcher::new(headers, None).unwrap();

        let page = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap();
        assert!(page.is_ok());
        assert_eq!(page.body.as_deref(), Some("<html></html>"));
    }

    #[tokio::test]
    async fn non_200_status_has_no_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(HeaderMap::new(), None).unwrap();
        let page = fetcher.fetch(&format!("{}/missing", server.uri())).await.unwrap();

        assert_eq!(page.status_code, 404);
        assert!(!page.is_ok());
        assert!(page.body.is_none());
    }

    #[tokio::test]
    async fn connection_failure_is_an_error() {
        let fetcher = Fetcher::new(HeaderMap::new(), Some(Duration::from_secs(2))).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, ScraperError::HttpError(_)));
    }
}
