// src/api/pagination.rs
//! Draining cursor-paginated endpoints.

use super::response::ApiResponse;
use crate::error::Result;
use crate::model::PaginatedList;
use std::future::Future;

/// Call `fetch` with each successive cursor until the server reports no more
/// results, and collect every item.
///
/// The first call gets `None`. The client never paginates on its own; this is
/// the loop callers would otherwise write by hand.
///
/// ```no_run
/// # async fn demo(client: notion_rest::NotionClient) -> notion_rest::Result<()> {
/// use notion_rest::{collect_all, PaginationQuery};
///
/// let users = collect_all(|cursor| {
///     let client = client.clone();
///     async move {
///         let mut query = PaginationQuery::new().with_page_size(100);
///         query.start_cursor = cursor;
///         client.list_users(&query).await
///     }
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn collect_all<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ApiResponse<PaginatedList<T>>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0u32;

    loop {
        let page = fetch(cursor.take()).await?.into_inner();
        pages += 1;
        let next = page.next_cursor().map(str::to_string);
        let has_more = page.has_more;
        items.extend(page.results);

        match next {
            Some(next) if has_more => cursor = Some(next),
            _ => break,
        }
    }

    log::debug!("Collected {} items over {} pages", items.len(), pages);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_follows_cursors_until_exhausted() {
        let seen = Mutex::new(Vec::new());
        let items = collect_all(|cursor: Option<String>| {
            seen.lock().unwrap().push(cursor.clone());
            async move {
                let list = match cursor.as_deref() {
                    None => PaginatedList::new(vec![1, 2], Some("c1".to_string())),
                    Some("c1") => PaginatedList::new(vec![3], Some("c2".to_string())),
                    _ => PaginatedList::new(vec![4], None),
                };
                Ok(ApiResponse::new(list, 200, Vec::new()))
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_stops_on_first_error() {
        let result: Result<Vec<u8>> = collect_all(|_| async {
            Err(crate::error::Error::InvalidRequest(
                crate::types::ValidationError::EmptyField("children"),
            ))
        })
        .await;
        assert!(result.is_err());
    }
}
