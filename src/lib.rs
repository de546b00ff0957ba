// src/lib.rs
//! notion-rest: a typed client for the Notion REST API.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Client**: `NotionClient`, `ClientOptions`, one async method per endpoint
//! - **Parameters**: `CreatePageParams`, `UpdatePageParams`, `DatabaseQuery`, `SearchOpts`, `PaginationQuery`
//! - **Results**: `ApiResponse<T>` (decoded data plus raw body), `PaginatedList<T>`
//! - **Domain model**: `Page`, `Database`, `Block`, `User`, `RichText`, property schemas and values
//! - **Domain types**: `PageId`, `DatabaseId`, `BlockId`, `UserId`, `ApiKey`, `NotionTime`, `Color`
//! - **Errors**: `Error`, `ApiErrorCode`, `ValidationError`
//! - **Transport**: the `Transport` trait and the default `ReqwestTransport`
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use notion_rest::{ApiKey, NotionClient, PageId};
//!
//! let client = NotionClient::new(ApiKey::new(std::env::var("NOTION_API_KEY")?)?);
//! let page = client
//!     .get_page(&PageId::parse("0367c2db381a4f8b9ce360f388a6b2e3")?)
//!     .await?;
//! println!("{} ({} bytes)", page.title(), page.raw().len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod constants;
pub mod error;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{ApiErrorCode, BoxError, Error, Result};
pub use crate::types::{TimeFormatError, ValidationError};

// --- Client ---
pub use crate::api::{
    collect_all, ApiResponse, ClientOptions, CreatePageParams, DatabaseQuery, HttpRequest,
    HttpResponse, NotionClient, PaginationQuery, ReqwestTransport, SearchFilter,
    SearchObjectType, SearchOpts, SearchSort, SortDirection, SortTimestamp, Transport,
    UpdatePageParams,
};

// --- Domain Model ---
pub use crate::model::rich_text::to_plain_text;
pub use crate::model::{
    Annotations, Block, BlockKind, Database, DateRange, FormulaValue, HeadingLevel, Page,
    PageProperties, PaginatedList, Parent, PropertySchema, PropertySchemaKind, PropertyValue,
    PropertyValueKind, RichText, RichTextKind, RollupValue, SearchResult, SelectOption, User,
    UserKind,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, BlockId, Color, DatabaseId, Id, NotionTime, PageId, UserId};
