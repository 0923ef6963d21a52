// src/handlers/department.rs
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{error, instrument};

use crate::catalog::{self, parse_id, ListParams, ListingScope, ProductFilters};
use crate::dtos::department::{
    DepartmentDetailBody, DepartmentDetailResponse, DepartmentListResponse,
    DepartmentProductsResponse, DepartmentResponse,
};
use crate::dtos::product::{FiltersResponse, ProductResponse};
use crate::error::AppError;
use crate::models::department::{DepartmentDetail, DepartmentSummary};
use crate::models::product::GroupCount;
use crate::state::AppState;

const TOP_GROUPS_PER_DEPARTMENT: i64 = 5;

// GET /api/departments - All departments with product statistics
#[instrument(skip(state))]
pub async fn list_departments(
    State(state): State<AppState>,
) -> Result<Json<DepartmentListResponse>, AppError> {
    let departments = sqlx::query_as::<_, DepartmentSummary>(
        "SELECT d.id, d.name, d.description, d.created_at,
                COUNT(p.id)                       AS product_count,
                CAST(AVG(p.retail_price) AS REAL) AS avg_price,
                CAST(MIN(p.retail_price) AS REAL) AS min_price,
                CAST(MAX(p.retail_price) AS REAL) AS max_price
         FROM departments d
         LEFT JOIN products p ON d.id = p.department_id
         GROUP BY d.id, d.name, d.description, d.created_at
         ORDER BY product_count DESC, d.id ASC",
    )
    .fetch_all(&state.db_pool)
    .await
    .inspect_err(|e| error!(?e, "Failed to fetch departments"))?;

    let departments: Vec<DepartmentResponse> = departments.into_iter().map(Into::into).collect();

    Ok(Json(DepartmentListResponse {
        total_departments: departments.len(),
        departments,
        timestamp: Utc::now().to_rfc3339(),
    }))
}

async fn top_groups(
    db_pool: &SqlitePool,
    department_id: i64,
    column: GroupColumn,
) -> Result<Vec<GroupCount>, sqlx::Error> {
    let sql = format!(
        "SELECT p.{col} AS label, COUNT(*) AS count,
                CAST(AVG(p.retail_price) AS REAL) AS avg_price
         FROM products p
         JOIN departments d ON p.department_id = d.id
         WHERE d.id = ?
         GROUP BY p.{col}
         ORDER BY count DESC, p.{col} ASC
         LIMIT ?",
        col = column.as_str()
    );

    sqlx::query_as::<_, GroupCount>(&sql)
        .bind(department_id)
        .bind(TOP_GROUPS_PER_DEPARTMENT)
        .fetch_all(db_pool)
        .await
}

#[derive(Debug, Clone, Copy)]
enum GroupColumn {
    Category,
    Brand,
}

impl GroupColumn {
    fn as_str(&self) -> &'static str {
        match self {
            GroupColumn::Category => "category",
            GroupColumn::Brand => "brand",
        }
    }
}

// GET /api/departments/{department_id} - Department details with top categories and brands
#[instrument(skip(state))]
pub async fn get_department(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
) -> Result<Json<DepartmentDetailResponse>, AppError> {
    let id = parse_id(&department_id, "department")?;

    let department = sqlx::query_as::<_, DepartmentDetail>(
        "SELECT d.id, d.name, d.description, d.created_at,
                COUNT(p.id)                       AS product_count,
                CAST(AVG(p.retail_price) AS REAL) AS avg_price,
                CAST(MIN(p.retail_price) AS REAL) AS min_price,
                CAST(MAX(p.retail_price) AS REAL) AS max_price,
                CAST(AVG(p.cost) AS REAL)         AS avg_cost
         FROM departments d
         LEFT JOIN products p ON d.id = p.department_id
         WHERE d.id = ?
         GROUP BY d.id, d.name, d.description, d.created_at",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await
    .inspect_err(|e| error!(?e, department_id = id, "Failed to fetch department"))?
    .ok_or_else(|| AppError::not_found("department", id))?;

    let top_categories = top_groups(&state.db_pool, id, GroupColumn::Category)
        .await
        .inspect_err(|e| error!(?e, department_id = id, "Failed to fetch top categories"))?;
    let top_brands = top_groups(&state.db_pool, id, GroupColumn::Brand)
        .await
        .inspect_err(|e| error!(?e, department_id = id, "Failed to fetch top brands"))?;

    Ok(Json(DepartmentDetailResponse {
        department: DepartmentDetailBody::new(
            department,
            top_categories.into_iter().map(Into::into).collect(),
            top_brands.into_iter().map(Into::into).collect(),
        ),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

// GET /api/departments/{department_id}/products - Paginated listing within one department
#[instrument(skip(state))]
pub async fn list_department_products(
    State(state): State<AppState>,
    Path(department_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<DepartmentProductsResponse>, AppError> {
    let id = parse_id(&department_id, "department")?;

    let department_name = sqlx::query_scalar::<_, String>("SELECT name FROM departments WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.db_pool)
        .await
        .inspect_err(|e| error!(?e, department_id = id, "Failed to fetch department"))?
        .ok_or_else(|| AppError::not_found("department", id))?;

    // Department comes from the path, not the label filter
    let filters = ProductFilters {
        department: None,
        ..ProductFilters::from_params(params)?
    };

    let page = catalog::fetch_page(&state.db_pool, &filters, ListingScope::Department(id))
        .await
        .inspect_err(|e| error!(?e, department_id = id, "Failed to fetch department products"))?;

    Ok(Json(DepartmentProductsResponse {
        department_id: id,
        department_name,
        products: page.products.into_iter().map(ProductResponse::from).collect(),
        pagination: page.pagination,
        filters: FiltersResponse::without_department(&filters),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{get_json, seed_catalog, test_app};
    use http::StatusCode;

    #[tokio::test]
    async fn lists_departments_by_product_count() {
        let (app, pool) = test_app().await;
        seed_catalog(&pool).await;

        let (status, body) = get_json(&app, "/api/departments").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_departments"], 3);
        let departments = body["departments"].as_array().unwrap();
        assert_eq!(departments[0]["name"], "Men");
        assert_eq!(departments[0]["product_count"], 5);
        assert_eq!(departments[0]["max_price"], 89.99);
        assert_eq!(departments[1]["name"], "Women");
        assert_eq!(departments[2]["product_count"], 0);
        assert!(departments[2]["min_price"].is_null());
    }

    #[tokio::test]
    async fn department_detail_has_top_groups() {
        let (app, pool) = test_app().await;
        seed_catalog(&pool).await;

        let (status, body) = get_json(&app, "/api/departments/1").await;

        assert_eq!(status, StatusCode::OK);
        let department = &body["department"];
        assert_eq!(department["name"], "Men");
        assert_eq!(department["product_count"], 5);
        assert_eq!(department["top_categories"][0]["category"], "Jeans");
        assert_eq!(department["top_categories"][0]["count"], 2);
        assert_eq!(department["top_brands"][0]["brand"], "Hanes");
        assert_eq!(department["top_brands"][0]["count"], 2);
        assert!(department["avg_cost"].is_number());
    }

    #[tokio::test]
    async fn unknown_department_is_404() {
        let (app, pool) = test_app().await;
        seed_catalog(&pool).await;

        for uri in ["/api/departments/42", "/api/departments/42/products"] {
            let (status, body) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body["department_id"], 42);
        }
    }

    #[tokio::test]
    async fn invalid_department_id_is_400() {
        let (app, _pool) = test_app().await;

        for uri in ["/api/departments/0", "/api/departments/x/products"] {
            let (status, _) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn department_products_are_scoped_and_filtered() {
        let (app, pool) = test_app().await;
        seed_catalog(&pool).await;

        let (status, body) = get_json(
            &app,
            "/api/departments/1/products?category=Jeans&department=Women&sort_by=retail_price&sort_order=desc",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["department_id"], 1);
        assert_eq!(body["department_name"], "Men");
        assert!(body["filters"].get("department").is_none());

        let ids: Vec<_> = body["products"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(body["pagination"]["total_count"], 2);
    }

    #[tokio::test]
    async fn empty_department_lists_nothing() {
        let (app, pool) = test_app().await;
        seed_catalog(&pool).await;

        let (status, body) = get_json(&app, "/api/departments/3/products").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["department_name"], "Accessories");
        assert_eq!(body["pagination"]["total_pages"], 0);
        assert_eq!(body["pagination"]["has_next"], false);
    }

    #[tokio::test]
    async fn department_name_agrees_with_product_lookup() {
        let (app, pool) = test_app().await;
        seed_catalog(&pool).await;

        let (_, listing) = get_json(&app, "/api/departments/2/products").await;
        for product in listing["products"].as_array().unwrap() {
            let id = product["id"].as_i64().unwrap();
            let (_, single) = get_json(&app, &format!("/api/products/{id}")).await;
            assert_eq!(single["product"]["department_name"], listing["department_name"]);
            assert_eq!(single["product"]["department_name"], product["department_name"]);
        }
    }
}
