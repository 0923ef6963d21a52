// src/dtos/product.rs
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::catalog::{Pagination, ProductFilters, SortField, SortOrder};
use crate::models::product::{
    DepartmentBreakdown, DistributionCenterCount, GroupCount, OverallStats, ProductRow,
};

pub(crate) fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub cost: f64,
    pub category: String,
    pub name: String,
    pub brand: String,
    pub retail_price: f64,
    /// Original free-text label, kept next to the normalized reference.
    pub department: String,
    pub department_id: Option<i64>,
    pub sku: String,
    pub distribution_center_id: i64,
    pub created_at: Option<String>,
    pub department_name: Option<String>,
    pub department_description: Option<String>,
}

// Convert from joined row to Response DTO
impl From<ProductRow> for ProductResponse {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            cost: row.cost,
            category: row.category,
            name: row.name,
            brand: row.brand,
            retail_price: row.retail_price,
            department: row.department,
            department_id: row.department_id,
            sku: row.sku,
            distribution_center_id: row.distribution_center_id,
            created_at: row.created_at.map(format_timestamp),
            department_name: row.department_name,
            department_description: row.department_description,
        }
    }
}

/// Applied filters, echoed back in listing responses.
#[derive(Debug, Serialize)]
pub struct FiltersResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Option<String>>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl FiltersResponse {
    /// Echo including the department label filter.
    pub fn with_department(filters: &ProductFilters) -> Self {
        Self {
            department: Some(filters.department.clone()),
            ..Self::without_department(filters)
        }
    }

    pub fn without_department(filters: &ProductFilters) -> Self {
        Self {
            department: None,
            category: filters.category.clone(),
            brand: filters.brand.clone(),
            min_price: filters.min_price,
            max_price: filters.max_price,
            search: filters.search.clone(),
            sort_by: filters.sort_by,
            sort_order: filters.sort_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub pagination: Pagination,
    pub filters: FiltersResponse,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
}

#[derive(Debug, Serialize)]
pub struct OverallStatsResponse {
    pub total_products: i64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub avg_price: Option<f64>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
    pub avg_cost: Option<f64>,
}

impl From<OverallStats> for OverallStatsResponse {
    fn from(s: OverallStats) -> Self {
        Self {
            total_products: s.total_products,
            min_price: s.min_price,
            max_price: s.max_price,
            avg_price: s.avg_price,
            min_cost: s.min_cost,
            max_cost: s.max_cost,
            avg_cost: s.avg_cost,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DepartmentStatsResponse {
    pub department: String,
    pub description: Option<String>,
    pub count: i64,
    pub avg_price: Option<f64>,
}

impl From<DepartmentBreakdown> for DepartmentStatsResponse {
    fn from(d: DepartmentBreakdown) -> Self {
        Self {
            department: d.department,
            description: d.description,
            count: d.count,
            avg_price: d.avg_price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryStatsResponse {
    pub category: String,
    pub count: i64,
    pub avg_price: Option<f64>,
}

impl From<GroupCount> for CategoryStatsResponse {
    fn from(g: GroupCount) -> Self {
        Self { category: g.label, count: g.count, avg_price: g.avg_price }
    }
}

#[derive(Debug, Serialize)]
pub struct BrandStatsResponse {
    pub brand: String,
    pub count: i64,
    pub avg_price: Option<f64>,
}

impl From<GroupCount> for BrandStatsResponse {
    fn from(g: GroupCount) -> Self {
        Self { brand: g.label, count: g.count, avg_price: g.avg_price }
    }
}

#[derive(Debug, Serialize)]
pub struct DistributionCenterStatsResponse {
    pub distribution_center_id: i64,
    pub count: i64,
}

impl From<DistributionCenterCount> for DistributionCenterStatsResponse {
    fn from(d: DistributionCenterCount) -> Self {
        Self { distribution_center_id: d.distribution_center_id, count: d.count }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductStatsResponse {
    pub overall: OverallStatsResponse,
    pub by_department: Vec<DepartmentStatsResponse>,
    pub top_categories: Vec<CategoryStatsResponse>,
    pub top_brands: Vec<BrandStatsResponse>,
    pub distribution_centers: Vec<DistributionCenterStatsResponse>,
    pub timestamp: String,
}
