// src/handlers/product.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{error, instrument};

use crate::catalog::{self, parse_id, ListParams, ListingScope, ProductFilters};
use crate::dtos::product::{
    FiltersResponse, ProductDetailResponse, ProductListResponse, ProductResponse,
    ProductStatsResponse,
};
use crate::error::AppError;
use crate::models::product::{DepartmentBreakdown, DistributionCenterCount, GroupCount, OverallStats};
use crate::state::AppState;

// GET /api/products - Paginated, filterable product listing
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductListResponse>, AppError> {
    let filters = ProductFilters::from_params(params)?;

    let page = catalog::fetch_page(&state.db_pool, &filters, ListingScope::All)
        .await
        .inspect_err(|e| error!(?e, "Failed to fetch products"))?;

    Ok(Json(ProductListResponse {
        products: page.products.into_iter().map(ProductResponse::from).collect(),
        pagination: page.pagination,
        filters: FiltersResponse::with_department(&filters),
    }))
}

// GET /api/products/{product_id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let id = parse_id(&product_id, "product")?;

    let product = catalog::find_product(&state.db_pool, id)
        .await
        .inspect_err(|e| error!(?e, product_id = id, "Failed to fetch product"))?
        .ok_or_else(|| AppError::not_found("product", id))?;

    Ok(Json(ProductDetailResponse {
        product: ProductResponse::from(product),
    }))
}

// GET /api/products/stats - Aggregates over the whole catalog
#[instrument(skip_all)]
pub async fn get_product_stats(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<ProductStatsResponse>, AppError> {
    let stats = load_stats(&db_pool)
        .await
        .inspect_err(|e| error!(?e, "Failed to compute product stats"))?;

    Ok(Json(stats))
}

async fn load_stats(db_pool: &SqlitePool) -> Result<ProductStatsResponse, sqlx::Error> {
    let overall = sqlx::query_as::<_, OverallStats>(
        "SELECT COUNT(*)                        AS total_products,
                CAST(MIN(retail_price) AS REAL) AS min_price,
                CAST(MAX(retail_price) AS REAL) AS max_price,
                CAST(AVG(retail_price) AS REAL) AS avg_price,
                CAST(MIN(cost) AS REAL)         AS min_cost,
                CAST(MAX(cost) AS REAL)         AS max_cost,
                CAST(AVG(cost) AS REAL)         AS avg_cost
         FROM products",
    )
    .fetch_one(db_pool)
    .await?;

    let by_department = sqlx::query_as::<_, DepartmentBreakdown>(
        "SELECT d.name AS department, d.description,
                COUNT(p.id)                       AS count,
                CAST(AVG(p.retail_price) AS REAL) AS avg_price
         FROM departments d
         LEFT JOIN products p ON d.id = p.department_id
         GROUP BY d.id, d.name, d.description
         ORDER BY count DESC, d.name ASC",
    )
    .fetch_all(db_pool)
    .await?;

    let top_categories = sqlx::query_as::<_, GroupCount>(
        "SELECT category AS label, COUNT(*) AS count,
                CAST(AVG(retail_price) AS REAL) AS avg_price
         FROM products
         GROUP BY category
         ORDER BY count DESC, category ASC
         LIMIT 10",
    )
    .fetch_all(db_pool)
    .await?;

    let top_brands = sqlx::query_as::<_, GroupCount>(
        "SELECT brand AS label, COUNT(*) AS count,
                CAST(AVG(retail_price) AS REAL) AS avg_price
         FROM products
         GROUP BY brand
         ORDER BY count DESC, brand ASC
         LIMIT 10",
    )
    .fetch_all(db_pool)
    .await?;

    let distribution_centers = sqlx::query_as::<_, DistributionCenterCount>(
        "SELECT distribution_center_id, COUNT(*) AS count
         FROM products
         GROUP BY distribution_center_id
         ORDER BY distribution_center_id",
    )
    .fetch_all(db_pool)
    .await?;

    Ok(ProductStatsResponse {
        overall: overall.into(),
        by_department: by_department.into_iter().map(Into::into).collect(),
        top_categories: top_categories.into_iter().map(Into::into).collect(),
        top_brands: top_brands.into_iter().map(Into::into).collect(),
        distribution_centers: distribution_centers.into_iter().map(Into::into).collect(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
