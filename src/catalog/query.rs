// src/catalog/query.rs
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::filters::{ProductFilters, SortField};
use super::pagination::Pagination;
use crate::models::product::ProductRow;

const PRODUCT_COLUMNS: &str = "p.id,
        CAST(p.cost AS REAL)         AS cost,
        p.category, p.name, p.brand,
        CAST(p.retail_price AS REAL) AS retail_price,
        p.department, p.department_id, p.sku, p.distribution_center_id, p.created_at,
        d.name        AS department_name,
        d.description AS department_description";

/// Which products a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    /// Every product; products without a resolved department are kept.
    All,
    /// Products of one department, whose existence is already confirmed.
    Department(i64),
}

impl ListingScope {
    fn join(&self) -> &'static str {
        match self {
            ListingScope::All => "LEFT JOIN",
            ListingScope::Department(_) => "JOIN",
        }
    }
}

/// Builds the COUNT and SELECT statements of one listing from the same
/// predicates, so the reported total always matches the pages.
pub struct ProductQuery<'a> {
    filters: &'a ProductFilters,
    scope: ListingScope,
}

impl<'a> ProductQuery<'a> {
    pub fn new(filters: &'a ProductFilters, scope: ListingScope) -> Self {
        Self { filters, scope }
    }

    pub fn count(&self) -> QueryBuilder<'a, Sqlite> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*)");
        self.push_source(&mut qb);
        qb
    }

    pub fn select(&self) -> QueryBuilder<'a, Sqlite> {
        let filters = self.filters;
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(PRODUCT_COLUMNS);
        self.push_source(&mut qb);

        qb.push(" ORDER BY ")
            .push(filters.sort_by.column())
            .push(" ")
            .push(filters.sort_order.keyword());
        if filters.sort_by != SortField::Id {
            qb.push(", p.id ASC");
        }

        qb.push(" LIMIT ")
            .push_bind(filters.limit)
            .push(" OFFSET ")
            .push_bind(filters.offset());
        qb
    }

    fn push_source(&self, qb: &mut QueryBuilder<'a, Sqlite>) {
        let filters: &'a ProductFilters = self.filters;

        qb.push(" FROM products p ")
            .push(self.scope.join())
            .push(" departments d ON p.department_id = d.id");

        let mut has_where = false;
        let mut predicate = |qb: &mut QueryBuilder<'a, Sqlite>| {
            qb.push(if has_where { " AND " } else { " WHERE " });
            has_where = true;
        };

        if let ListingScope::Department(department_id) = self.scope {
            predicate(qb);
            qb.push("p.department_id = ").push_bind(department_id);
        }
        if let Some(category) = filters.category.as_deref() {
            predicate(qb);
            qb.push("p.category = ").push_bind(category);
        }
        if let Some(department) = filters.department.as_deref() {
            predicate(qb);
            qb.push("p.department = ").push_bind(department);
        }
        if let Some(brand) = filters.brand.as_deref() {
            predicate(qb);
            qb.push("p.brand = ").push_bind(brand);
        }
        if let Some(min_price) = filters.min_price {
            predicate(qb);
            qb.push("p.retail_price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filters.max_price {
            predicate(qb);
            qb.push("p.retail_price <= ").push_bind(max_price);
        }
        if let Some(search) = filters.search.as_deref() {
            predicate(qb);
            qb.push("p.name GLOB ").push_bind(glob_pattern(search));
        }
    }
}

/// Case-sensitive "contains" pattern; `*`, `?` and `[` in the input match literally.
fn glob_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('*');
    for c in search.chars() {
        match c {
            '*' | '?' | '[' => {
                pattern.push('[');
                pattern.push(c);
                pattern.push(']');
            }
            _ => pattern.push(c),
        }
    }
    pattern.push('*');
    pattern
}

#[derive(Debug)]
pub struct ProductPage {
    pub products: Vec<ProductRow>,
    pub pagination: Pagination,
}

pub async fn fetch_page(
    pool: &SqlitePool,
    filters: &ProductFilters,
    scope: ListingScope,
) -> Result<ProductPage, sqlx::Error> {
    let query = ProductQuery::new(filters, scope);

    let mut count = query.count();
    let total_count: i64 = count.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut select = query.select();
    let products = select.build_query_as::<ProductRow>().fetch_all(pool).await?;

    tracing::debug!(
        total_count,
        returned = products.len(),
        page = filters.page,
        "Fetched product page"
    );

    Ok(ProductPage {
        products,
        pagination: Pagination::new(total_count, filters.page, filters.limit),
    })
}

pub async fn find_product(pool: &SqlitePool, id: i64) -> Result<Option<ProductRow>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT ");
    qb.push(PRODUCT_COLUMNS)
        .push(" FROM products p LEFT JOIN departments d ON p.department_id = d.id WHERE p.id = ")
        .push_bind(id);

    qb.build_query_as::<ProductRow>().fetch_optional(pool).await
}
