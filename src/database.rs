// src/database.rs
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true))
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(connect_options(database_url)?)
        .await?;

    prepare_schema(&pool).await?;

    Ok(pool)
}

/// Applies the embedded migrations, then links products to departments.
pub async fn prepare_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations applied");

    link_departments(pool).await
}

/// Adds `products.department_id` and derives departments from the product
/// labels, once. Stores that already carry the column are left untouched.
async fn link_departments(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let has_column = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM pragma_table_info('products') WHERE name = 'department_id'",
    )
    .fetch_one(pool)
    .await?
        > 0;

    if has_column {
        tracing::debug!("department_id column already exists");
    } else {
        let mut tx = pool.begin().await?;

        sqlx::query("ALTER TABLE products ADD COLUMN department_id INTEGER REFERENCES departments (id)")
            .execute(&mut *tx)
            .await?;

        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO departments (name, description)
             SELECT DISTINCT department,
                    CASE department
                        WHEN 'Men' THEN 'Men''s clothing and accessories'
                        WHEN 'Women' THEN 'Women''s clothing and accessories'
                        ELSE department || ' department products'
                    END
             FROM products
             WHERE department IS NOT NULL
             ORDER BY department",
        )
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let linked = sqlx::query(
            "UPDATE products
             SET department_id = (SELECT d.id FROM departments d WHERE d.name = products.department)
             WHERE department_id IS NULL",
        )
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        tracing::info!(departments = inserted, products = linked, "Linked products to departments");
    }

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_department_id ON products (department_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Single-connection in-memory pool; every connection to `:memory:` is its own database.
#[cfg(test)]
async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(connect_options("sqlite::memory:").unwrap())
        .await
        .unwrap()
}

#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = memory_pool().await;
    prepare_schema(&pool).await.unwrap();
    pool
}
