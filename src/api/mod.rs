// src/api/mod.rs
//! Talking to the Notion API: request building, transport, response decoding
//! and the endpoint operations on top of them.

pub mod client;
pub mod pagination;
pub mod params;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{ClientOptions, NotionClient};
pub use pagination::collect_all;
pub use params::{
    CreatePageParams, DatabaseQuery, SearchFilter, SearchObjectType, SearchOpts, SearchSort,
    SortDirection, SortTimestamp, UpdatePageParams,
};
pub use request::PaginationQuery;
pub use response::ApiResponse;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
