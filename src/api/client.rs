// src/api/client.rs
//! The Notion API client.
//!
//! Every endpoint is parameter validation, a path and optional body, and one
//! call into [`NotionClient::send`], which builds the request, runs it through
//! the transport and decodes the answer.

use super::params::{
    AppendBlockChildren, CreatePageParams, DatabaseQuery, SearchOpts, UpdatePageParams,
};
use super::request::{PaginationQuery, RequestBuilder};
use super::response::{self, ApiResponse};
use super::transport::{ReqwestTransport, Transport};
use crate::constants::{API_BASE_URL, USER_AGENT};
use crate::error::{Error, Result};
use crate::model::{Block, Database, Page, PaginatedList, SearchResult, User};
use crate::types::{ApiKey, BlockId, DatabaseId, PageId, UserId, ValidationError};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Optional overrides for [`NotionClient::with_options`].
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Transport to send requests through; a fresh [`ReqwestTransport`] otherwise.
    pub transport: Option<Arc<dyn Transport>>,
    /// API origin including the version prefix, e.g. `https://api.notion.com/v1`.
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientOptions {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("transport", &self.transport.as_ref().map(|_| "custom"))
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// A handle on the Notion API for one integration token.
///
/// Cheap to clone; clones share the transport. Holds no mutable state, so
/// it can be used from many tasks at once.
#[derive(Clone)]
pub struct NotionClient {
    api_key: ApiKey,
    transport: Arc<dyn Transport>,
    base_url: String,
    user_agent: String,
}

impl fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl NotionClient {
    /// A client talking to the public API through a default reqwest transport.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            transport: Arc::new(ReqwestTransport::new()),
            base_url: API_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    pub fn with_options(api_key: ApiKey, options: ClientOptions) -> Result<Self, ValidationError> {
        let base_url = match options.base_url {
            Some(base_url) => {
                Url::parse(&base_url).map_err(|e| ValidationError::InvalidUrl {
                    url: base_url.clone(),
                    reason: e.to_string(),
                })?;
                base_url.trim_end_matches('/').to_string()
            }
            None => API_BASE_URL.to_string(),
        };
        Ok(Self {
            api_key,
            transport: options
                .transport
                .unwrap_or_else(|| Arc::new(ReqwestTransport::new())),
            base_url,
            user_agent: options.user_agent.unwrap_or_else(|| USER_AGENT.to_string()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build, execute and decode one request.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiResponse<T>> {
        let operation = format!("{} {}", request.method(), request.path());
        let request = request.build(&self.base_url, &self.api_key, &self.user_agent)?;
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|source| Error::Transport { source })?;
        log::debug!("{} -> {}", operation, response.status);
        response::decode_response(response)
    }

    /// Fetch a database and its property schema.
    pub async fn get_database(&self, id: &DatabaseId) -> Result<ApiResponse<Database>> {
        self.send(RequestBuilder::get(["databases", id.to_dashed().as_str()]))
            .await
    }

    /// Query the pages of a database.
    pub async fn query_database(
        &self,
        id: &DatabaseId,
        query: &DatabaseQuery,
    ) -> Result<ApiResponse<PaginatedList<Page>>> {
        query.validate()?;
        let request =
            RequestBuilder::post(["databases", id.to_dashed().as_str(), "query"]).json(query)?;
        self.send(request).await
    }

    pub async fn get_page(&self, id: &PageId) -> Result<ApiResponse<Page>> {
        self.send(RequestBuilder::get(["pages", id.to_dashed().as_str()]))
            .await
    }

    /// Create a page under a page or in a database.
    pub async fn create_page(&self, params: &CreatePageParams) -> Result<ApiResponse<Page>> {
        let body = params.to_body()?;
        self.send(RequestBuilder::post(["pages"]).json(&body)?).await
    }

    /// Write property values on a page, or archive/restore it.
    pub async fn update_page_properties(
        &self,
        id: &PageId,
        params: &UpdatePageParams,
    ) -> Result<ApiResponse<Page>> {
        params.validate()?;
        let request = RequestBuilder::patch(["pages", id.to_dashed().as_str()]).json(params)?;
        self.send(request).await
    }

    pub async fn get_block_children(
        &self,
        id: &BlockId,
        pagination: &PaginationQuery,
    ) -> Result<ApiResponse<PaginatedList<Block>>> {
        let request = RequestBuilder::get(["blocks", id.to_dashed().as_str(), "children"])
            .query(pagination.to_pairs());
        self.send(request).await
    }

    /// Append blocks to the end of a block's (or page's) children.
    ///
    /// Returns the parent block as it is after the append.
    pub async fn append_block_children(
        &self,
        id: &BlockId,
        children: &[Block],
    ) -> Result<ApiResponse<Block>> {
        let body = AppendBlockChildren::new(children)?;
        let request =
            RequestBuilder::patch(["blocks", id.to_dashed().as_str(), "children"]).json(&body)?;
        self.send(request).await
    }

    pub async fn get_user(&self, id: &UserId) -> Result<ApiResponse<User>> {
        self.send(RequestBuilder::get(["users", id.to_dashed().as_str()]))
            .await
    }

    /// List workspace users. Page sizes above 100 are clamped to 100.
    pub async fn list_users(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<ApiResponse<PaginatedList<User>>> {
        let request = RequestBuilder::get(["users"]).query(pagination.to_clamped_pairs());
        self.send(request).await
    }

    /// Search pages and databases shared with the integration.
    pub async fn search(&self, opts: &SearchOpts) -> Result<ApiResponse<PaginatedList<SearchResult>>> {
        self.send(RequestBuilder::post(["search"]).json(opts)?).await
    }
}
