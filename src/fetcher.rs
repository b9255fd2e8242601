//! Transport boundary between the extraction pipeline and the network.
//!
//! The pipeline only builds [`Request`] values and reads [`Response`] values;
//! anything that can execute a request (the retrying reqwest client, a rate
//! limited wrapper, a canned test stub) implements [`DocumentFetcher`].

use crate::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// Already form-encoded body for POST requests.
    pub body: Option<String>,
}

impl Request {
    pub fn get(url: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            headers,
            body: None,
        }
    }

    /// POST with an `application/x-www-form-urlencoded` body.
    ///
    /// Content-Type and Content-Length are set from the encoded body.
    pub fn post_form(url: impl Into<String>, mut headers: HeaderMap, fields: &[(&str, &str)]) -> Self {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter())
            .finish();

        headers.insert(
            reqwest::header::CONTENT_LENGTH,
            HeaderValue::from(body.len() as u64),
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        Self {
            method: Method::POST,
            url: url.into(),
            headers,
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers
            .insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        self
    }

    /// All values of a form field, in body order.
    pub fn form_values(&self, key: &str) -> Vec<String> {
        self.body
            .as_deref()
            .map(|body| {
                url::form_urlencoded::parse(body.as_bytes())
                    .filter(|(k, _)| k == key)
                    .map(|(_, v)| v.into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn form_value(&self, key: &str) -> Option<String> {
        self.form_values(key).into_iter().next()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, or `FetchFailed` for non-2xx responses.
    pub fn into_text(self, url: &str) -> Result<String> {
        if !self.is_success() {
            return Err(ScrapeError::fetch_failed(
                url,
                format!("HTTP status {}", self.status),
            ));
        }
        String::from_utf8(self.body).map_err(|e| ScrapeError::fetch_failed(url, e))
    }
}

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Execute one request. Transport errors surface as `FetchFailed`;
    /// non-2xx statuses are returned as-is for the caller to judge.
    async fn execute(&self, request: &Request) -> Result<Response>;
}
