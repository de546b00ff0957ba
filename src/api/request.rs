// src/api/request.rs
//! Composes outbound requests: origin + path, query, headers and JSON body.

use super::transport::HttpRequest;
use crate::constants::{MAX_PAGE_SIZE, NOTION_VERSION, NOTION_VERSION_HEADER};
use crate::types::{ApiKey, ValidationError};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use url::Url;

/// Cursor and page size for list endpoints.
///
/// Defaults send nothing: an absent cursor and a zero page size are both
/// omitted, leaving the server defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationQuery {
    pub start_cursor: Option<String>,
    pub page_size: u32,
}

impl PaginationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Query-string entries for the non-default fields.
    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(cursor) = self.start_cursor.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("start_cursor", cursor.to_string()));
        }
        if self.page_size > 0 {
            pairs.push(("page_size", self.page_size.to_string()));
        }
        pairs
    }

    /// Same as [`to_pairs`](Self::to_pairs) with the page size capped at
    /// [`MAX_PAGE_SIZE`].
    pub(crate) fn to_clamped_pairs(&self) -> Vec<(&'static str, String)> {
        Self {
            start_cursor: self.start_cursor.clone(),
            page_size: self.page_size.min(MAX_PAGE_SIZE),
        }
        .to_pairs()
    }
}

/// One request on its way to the transport.
///
/// The path is kept as segments so that each one is percent-encoded on its
/// own: an ID can never add segments or a query to the URL.
pub(crate) struct RequestBuilder {
    method: Method,
    segments: Vec<String>,
    query: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::GET, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::POST, segments)
    }

    pub fn patch<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::PATCH, segments)
    }

    pub fn query(mut self, pairs: Vec<(&'static str, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Encode `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ValidationError> {
        let bytes = serde_json::to_vec(body).map_err(ValidationError::BodyEncoding)?;
        self.body = Some(bytes);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The unencoded path, for logging.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    /// Produce the transport request. Auth, version and user agent are always
    /// set; the content type only when there is a body.
    pub fn build(
        self,
        base_url: &str,
        api_key: &ApiKey,
        user_agent: &str,
    ) -> Result<HttpRequest, ValidationError> {
        let mut url = Url::parse(base_url).map_err(|e| ValidationError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|()| ValidationError::InvalidUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }

        let mut headers = HeaderMap::new();
        let mut auth = header_value("Authorization", &api_key.bearer())?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(NOTION_VERSION_HEADER, HeaderValue::from_static(NOTION_VERSION));
        headers.insert(header::USER_AGENT, header_value("User-Agent", user_agent)?);
        if self.body.is_some() {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        log::debug!("{} {}", self.method, url);
        if let Some(body) = &self.body {
            log::trace!("Request body: {}", String::from_utf8_lossy(body));
        }

        Ok(HttpRequest {
            method: self.method,
            url,
            headers,
            body: self.body,
        })
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ValidationError> {
    HeaderValue::from_str(value).map_err(|e| ValidationError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}
