// Fixture data and request helpers for tests that run against an in-memory database.
use axum::{body::Body, Router};
use http::{Request, StatusCode};
use sqlx::SqlitePool;
use tower::Service;

use crate::database::create_test_pool;
use crate::routes::build_app;
use crate::state::AppState;

/// Router over a fresh, migrated, empty database; the pool is returned for seeding.
pub async fn test_app() -> (Router, SqlitePool) {
    let pool = create_test_pool().await;
    let app = build_app(AppState::new(pool.clone()), None);
    (app, pool)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().into_service().call(req).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

struct Fixture {
    id: i64,
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    department: &'static str,
    cost: f64,
    retail_price: f64,
    distribution_center_id: i64,
}

const CATALOG: &[Fixture] = &[
    Fixture { id: 1, name: "Slim Fit Jeans", brand: "Levi's", category: "Jeans", department: "Men", cost: 20.0, retail_price: 49.99, distribution_center_id: 1 },
    Fixture { id: 2, name: "Relaxed Jeans", brand: "Levi's", category: "Jeans", department: "Women", cost: 18.5, retail_price: 45.0, distribution_center_id: 1 },
    Fixture { id: 3, name: "Classic Tee", brand: "Hanes", category: "Tops & Tees", department: "Men", cost: 4.0, retail_price: 12.0, distribution_center_id: 2 },
    Fixture { id: 4, name: "Bootcut Jeans", brand: "Wrangler", category: "Jeans", department: "Men", cost: 15.0, retail_price: 39.5, distribution_center_id: 2 },
    Fixture { id: 5, name: "Wool Sweater", brand: "Patagonia", category: "Sweaters", department: "Women", cost: 40.0, retail_price: 129.0, distribution_center_id: 3 },
    Fixture { id: 6, name: "Denim Jacket", brand: "Levi's", category: "Outerwear", department: "Men", cost: 35.0, retail_price: 89.99, distribution_center_id: 3 },
    // No "Kids" department exists, so department_id stays NULL
    Fixture { id: 7, name: "Kids Hoodie", brand: "Hanes", category: "Tops & Tees", department: "Kids", cost: 8.0, retail_price: 5.0, distribution_center_id: 1 },
    Fixture { id: 8, name: "slim socks", brand: "Hanes", category: "Socks", department: "Men", cost: 1.0, retail_price: 3.0, distribution_center_id: 2 },
];

async fn seed_departments(pool: &SqlitePool) {
    for (name, description) in [
        ("Men", "Men's clothing and accessories"),
        ("Women", "Women's clothing and accessories"),
        ("Accessories", "Accessories department products"),
    ] {
        sqlx::query("INSERT INTO departments (name, description) VALUES (?, ?)")
            .bind(name)
            .bind(description)
            .execute(pool)
            .await
            .unwrap();
    }
}

async fn insert_product(pool: &SqlitePool, f: &Fixture) {
    sqlx::query(
        "INSERT INTO products
            (id, cost, category, name, brand, retail_price, department, sku,
             distribution_center_id, department_id)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, (SELECT id FROM departments WHERE name = ?))",
    )
    .bind(f.id)
    .bind(f.cost)
    .bind(f.category)
    .bind(f.name)
    .bind(f.brand)
    .bind(f.retail_price)
    .bind(f.department)
    .bind(format!("SKU-{:06}", f.id))
    .bind(f.distribution_center_id)
    .bind(f.department)
    .execute(pool)
    .await
    .unwrap();
}

/// Departments Men (1), Women (2), Accessories (3, empty) and eight products.
pub async fn seed_catalog(pool: &SqlitePool) {
    seed_departments(pool).await;
    for fixture in CATALOG {
        insert_product(pool, fixture).await;
    }
}

/// `count` generated products alternating between Men and Women.
pub async fn seed_bulk(pool: &SqlitePool, count: i64) {
    const BRANDS: [&str; 3] = ["Levi's", "Hanes", "Wrangler"];
    const CATEGORIES: [&str; 4] = ["Jeans", "Tops & Tees", "Socks", "Outerwear"];

    seed_departments(pool).await;
    for id in 1..=count {
        let idx = id as usize;
        let fixture = Fixture {
            id,
            name: "Generated Product",
            brand: BRANDS[idx % BRANDS.len()],
            category: CATEGORIES[idx % CATEGORIES.len()],
            department: if id % 2 == 0 { "Women" } else { "Men" },
            cost: id as f64,
            retail_price: id as f64 * 2.5,
            distribution_center_id: id % 5 + 1,
        };
        insert_product(pool, &fixture).await;
    }
}
