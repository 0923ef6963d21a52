// src/catalog/pagination.rs
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total_count: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl Pagination {
    /// `limit` must already be validated (>= 1).
    pub fn new(total_count: i64, page: i64, limit: i64) -> Self {
        let total_count = total_count.max(0);
        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + limit - 1) / limit
        };

        let has_next = page < total_pages;
        let has_prev = page > 1;

        Self {
            page,
            limit,
            total_count,
            total_pages,
            has_next,
            has_prev,
            next_page: has_next.then_some(page + 1),
            prev_page: has_prev.then_some(page - 1),
        }
    }
}
