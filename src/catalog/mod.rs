//! Product listing core: parameter validation, query construction and
//! pagination shared by the global and department-scoped listings.

pub mod filters;
pub mod pagination;
pub mod query;

pub use filters::{parse_id, ListParams, ProductFilters, SortField, SortOrder};
pub use pagination::Pagination;
pub use query::{fetch_page, find_product, ListingScope};
