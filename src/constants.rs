// src/constants.rs
//! Protocol constants that pin down how this client talks to the Notion API.
//!
//! Reading these tells you the shape of every request on the wire: where it
//! goes, which API revision it speaks, and how large a page of results may be.

// ---------------------------------------------------------------------------
// Wire protocol
// ---------------------------------------------------------------------------

/// The API origin every endpoint path is appended to.
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

/// The API revision sent in the `Notion-Version` header.
///
/// Payload shapes in `model` (e.g. the `text` field of block payloads)
/// follow this revision.
pub const NOTION_VERSION: &str = "2021-05-13";

/// Header name carrying [`NOTION_VERSION`].
pub const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// Sent as the `User-Agent` of every request.
pub const USER_AGENT: &str = concat!("notion-rest/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Largest `page_size` the server honours for list endpoints.
///
/// Only the user listing clamps to this before sending; other paginated
/// endpoints pass the caller's value through and let the server reject it.
pub const MAX_PAGE_SIZE: u32 = 100;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Maximum characters of a response body shown in log previews.
pub const BODY_PREVIEW_LENGTH: usize = 200;
