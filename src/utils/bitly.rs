//! Link shortening through the Bitly v4 API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const BITLY_API: &str = "https://api-ssl.bitly.com";

#[derive(Error, Debug)]
pub enum BitlyError {
    #[error("That is not a valid url.")]
    InvalidUrl,

    #[error("API communication failure: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Bitly API returned a bad response ({0}). Please try again later.")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Serialize)]
struct ShortenRequest<'a> {
    long_url: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub link: String,
}

/// Accepts only absolute http(s) urls with a host.
pub fn validate_url(raw: &str) -> Result<Url, BitlyError> {
    let url = Url::parse(raw.trim()).map_err(|_| BitlyError::InvalidUrl)?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(BitlyError::InvalidUrl),
    }
}

/// Shortens `long_url`, returning the short link.
pub async fn shorten(
    client: &Client,
    base_url: &str,
    token: &str,
    long_url: &str,
) -> Result<String, BitlyError> {
    let long_url = validate_url(long_url)?;

    let response = client
        .post(format!("{base_url}/v4/shorten"))
        .bearer_auth(token)
        .json(&ShortenRequest {
            long_url: long_url.as_str(),
        })
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(BitlyError::Status(response.status()));
    }

    let body: ShortenResponse = response.json().await?;
    Ok(body.link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://www.rust-lang.org/learn").is_ok());
        assert!(validate_url("http://example.com").is_ok());
        assert_matches!(validate_url("ftp://example.com"), Err(BitlyError::InvalidUrl));
        assert_matches!(validate_url("not a url"), Err(BitlyError::InvalidUrl));
        assert_matches!(validate_url("mailto:someone@example.com"), Err(BitlyError::InvalidUrl));
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v4/shorten"))
            .and(header("Authorization", "Bearer secret"))
            .and(body_json(serde_json::json!({ "long_url": "https://example.com/a/long/path" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "link": "https://bit.ly/abc" })),
            )
            .mount(&server)
            .await;

        let link = shorten(
            &Client::new(),
            &server.uri(),
            "secret",
            "https://example.com/a/long/path",
        )
        .await
        .unwrap();
        assert_eq!(link, "https://bit.ly/abc");
    }

    #[tokio::test]
    async fn test_shorten_bad_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v4/shorten"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let result = shorten(&Client::new(), &server.uri(), "bad", "https://example.com").await;
        assert_matches!(result, Err(BitlyError::Status(status)) if status.as_u16() == 403);
    }

    #[tokio::test]
    async fn test_invalid_url_never_hits_the_api() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = shorten(&Client::new(), &server.uri(), "secret", "example").await;
        assert_matches!(result, Err(BitlyError::InvalidUrl));
    }
}
