use chrono::NaiveDateTime;
use sqlx::FromRow;

/// One products row joined with its (optional) department.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub cost: f64,
    pub category: String,
    pub name: String,
    pub brand: String,
    pub retail_price: f64,
    pub department: String,
    pub department_id: Option<i64>,
    pub sku: String,
    pub distribution_center_id: i64,
    pub created_at: Option<NaiveDateTime>,
    pub department_name: Option<String>,
    pub department_description: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct OverallStats {
    pub total_products: i64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub avg_price: Option<f64>,
    pub min_cost: Option<f64>,
    pub max_cost: Option<f64>,
    pub avg_cost: Option<f64>,
}

#[derive(Debug, FromRow)]
pub struct DepartmentBreakdown {
    pub department: String,
    pub description: Option<String>,
    pub count: i64,
    pub avg_price: Option<f64>,
}

/// Count and average price for one category or brand.
#[derive(Debug, FromRow)]
pub struct GroupCount {
    pub label: String,
    pub count: i64,
    pub avg_price: Option<f64>,
}

#[derive(Debug, FromRow)]
pub struct DistributionCenterCount {
    pub distribution_center_id: i64,
    pub count: i64,
}
