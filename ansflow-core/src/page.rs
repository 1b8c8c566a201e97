//! Pagination envelope
//!
//! List endpoints answer with either a raw JSON array, a Django REST
//! Framework page (`{count, next, previous, results}`) or a `{data: [...]}`
//! wrapper. [`ListResponse`] accepts all three so callers always get a `Vec`.

use serde::{Deserialize, Serialize};

/// A paginated page as produced by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Whether the backend reported a further page
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Any of the shapes a list endpoint may return
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// `{count, next, previous, results}`
    Paginated(Page<T>),
    /// `{data: [...]}`
    Wrapped { data: Vec<T> },
    /// `[...]`
    Raw(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Unwrap the items regardless of the envelope shape
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(page) => page.results,
            ListResponse::Wrapped { data } => data,
            ListResponse::Raw(items) => items,
        }
    }

    /// Convert into a [`Page`], synthesizing the counters for unpaginated shapes
    pub fn into_page(self) -> Page<T> {
        match self {
            ListResponse::Paginated(page) => page,
            ListResponse::Wrapped { data: items } | ListResponse::Raw(items) => Page {
                count: Some(items.len() as u64),
                next: None,
                previous: None,
                results: items,
            },
        }
    }
}

impl<T> From<ListResponse<T>> for Vec<T> {
    fn from(response: ListResponse<T>) -> Self {
        response.into_items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        id: i64,
        name: String,
    }

    fn items() -> serde_json::Value {
        json!([{ "id": 1, "name": "web" }, { "id": 2, "name": "db" }])
    }

    #[test]
    fn test_raw_and_paginated_yield_same_items() {
        let raw: ListResponse<Item> = serde_json::from_value(items()).unwrap();
        let paged: ListResponse<Item> = serde_json::from_value(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": items(),
        }))
        .unwrap();

        assert_eq!(raw.into_items(), paged.into_items());
    }

    #[test]
    fn test_data_wrapper() {
        let wrapped: ListResponse<Item> =
            serde_json::from_value(json!({ "data": items() })).unwrap();
        let items = wrapped.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "db");
    }

    #[test]
    fn test_page_keeps_counters() {
        let paged: ListResponse<Item> = serde_json::from_value(json!({
            "count": 40,
            "next": "http://localhost/api/v1/x/?page=2",
            "previous": null,
            "results": items(),
        }))
        .unwrap();

        let page = paged.into_page();
        assert_eq!(page.count, Some(40));
        assert!(page.has_next());
        assert_eq!(page.results.len(), 2);
    }

    #[test]
    fn test_raw_into_page_synthesizes_count() {
        let raw: ListResponse<Item> = serde_json::from_value(items()).unwrap();
        let page = raw.into_page();
        assert_eq!(page.count, Some(2));
        assert!(!page.has_next());
    }

    #[test]
    fn test_object_without_results_is_rejected() {
        let result: Result<ListResponse<Item>, _> =
            serde_json::from_value(json!({ "detail": "nope" }));
        assert!(result.is_err());
    }
}
