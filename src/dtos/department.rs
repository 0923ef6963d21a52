// src/dtos/department.rs
use serde::Serialize;

use super::product::{
    format_timestamp, BrandStatsResponse, CategoryStatsResponse, FiltersResponse, ProductResponse,
};
use crate::catalog::Pagination;
use crate::models::department::{DepartmentDetail, DepartmentSummary};

#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub product_count: i64,
    pub avg_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl From<DepartmentSummary> for DepartmentResponse {
    fn from(d: DepartmentSummary) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            created_at: d.created_at.map(format_timestamp),
            product_count: d.product_count,
            avg_price: d.avg_price,
            min_price: d.min_price,
            max_price: d.max_price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DepartmentListResponse {
    pub departments: Vec<DepartmentResponse>,
    pub total_departments: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct DepartmentDetailBody {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub product_count: i64,
    pub avg_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub avg_cost: Option<f64>,
    pub top_categories: Vec<CategoryStatsResponse>,
    pub top_brands: Vec<BrandStatsResponse>,
}

impl DepartmentDetailBody {
    pub fn new(
        d: DepartmentDetail,
        top_categories: Vec<CategoryStatsResponse>,
        top_brands: Vec<BrandStatsResponse>,
    ) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            created_at: d.created_at.map(format_timestamp),
            product_count: d.product_count,
            avg_price: d.avg_price,
            min_price: d.min_price,
            max_price: d.max_price,
            avg_cost: d.avg_cost,
            top_categories,
            top_brands,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DepartmentDetailResponse {
    pub department: DepartmentDetailBody,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct DepartmentProductsResponse {
    pub department_id: i64,
    pub department_name: String,
    pub products: Vec<ProductResponse>,
    pub pagination: Pagination,
    pub filters: FiltersResponse,
    pub timestamp: String,
}
