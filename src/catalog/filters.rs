// src/catalog/filters.rs
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

/// Raw listing query string. Every field stays text so that malformed
/// numbers can fall back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Id,
    Name,
    RetailPrice,
    Cost,
    Brand,
    Category,
}

impl SortField {
    /// Unknown names yield `None`; callers fall back to `Id`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "id" => Some(SortField::Id),
            "name" => Some(SortField::Name),
            "retail_price" => Some(SortField::RetailPrice),
            "cost" => Some(SortField::Cost),
            "brand" => Some(SortField::Brand),
            "category" => Some(SortField::Category),
            _ => None,
        }
    }

    /// Qualified column token for ORDER BY.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "p.id",
            SortField::Name => "p.name",
            SortField::RetailPrice => "p.retail_price",
            SortField::Cost => "p.cost",
            SortField::Brand => "p.brand",
            SortField::Category => "p.category",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Validated filter set for one listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilters {
    pub page: i64,
    pub limit: i64,
    pub category: Option<String>,
    pub department: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for ProductFilters {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category: None,
            department: None,
            brand: None,
            min_price: None,
            max_price: None,
            search: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

fn parse_price(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

impl ProductFilters {
    /// | param        | missing / unparseable | out of range       |
    /// |--------------|-----------------------|--------------------|
    /// | page         | 1                     | < 1 is rejected    |
    /// | limit        | 20                    | clamped to 1..=100 |
    /// | min/max      | no bound              | not cross-checked  |
    /// | sort_by      | id                    | -                  |
    /// | sort_order   | asc                   | -                  |
    pub fn from_params(params: ListParams) -> Result<Self, AppError> {
        let page = parse_int(params.page.as_deref()).unwrap_or(DEFAULT_PAGE);
        if page < 1 {
            return Err(AppError::invalid_parameter(format!(
                "page must be a positive integer, got {page}"
            )));
        }

        let limit = parse_int(params.limit.as_deref())
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);

        let sort_by = params
            .sort_by
            .as_deref()
            .and_then(SortField::parse)
            .unwrap_or_default();
        let sort_order = params
            .sort_order
            .as_deref()
            .and_then(SortOrder::parse)
            .unwrap_or_default();

        Ok(Self {
            page,
            limit,
            category: non_empty(params.category),
            department: non_empty(params.department),
            brand: non_empty(params.brand),
            min_price: parse_price(params.min_price.as_deref()),
            max_price: parse_price(params.max_price.as_deref()),
            search: non_empty(params.search),
            sort_by,
            sort_order,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Parses a path identifier; only positive integers are accepted.
pub fn parse_id(raw: &str, entity: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_parameter(format!(
            "{entity}_id must be a positive integer, got '{raw}'"
        ))),
    }
}
