//! Planning output persistence: delivered orders and the flight log.
//!
//! Each run replaces the previous contents of both tables.

use anyhow::Result;
use skydrop_core::Route;
use sqlx::SqlitePool;

/// A delivered order.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Delivery {
    pub order_no: String,
    pub delivered_to: String,
    pub cost_in_pence: i64,
}

/// Replace the deliveries table with `deliveries`.
pub async fn write_deliveries(pool: &SqlitePool, deliveries: &[Delivery]) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM deliveries").execute(&mut *tx).await?;

    for delivery in deliveries {
        sqlx::query(
            "INSERT INTO deliveries (order_no, delivered_to, cost_in_pence) VALUES (?1, ?2, ?3)",
        )
        .bind(&delivery.order_no)
        .bind(&delivery.delivered_to)
        .bind(delivery.cost_in_pence)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Replace the flightpath table with one row per move of `route`.
pub async fn write_flightpath(pool: &SqlitePool, route: &Route) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM flightpath").execute(&mut *tx).await?;

    for record in route.records() {
        sqlx::query(
            r#"
            INSERT INTO flightpath
                (order_no, from_longitude, from_latitude, angle, to_longitude, to_latitude)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(record.tag.to_string())
        .bind(record.from.longitude)
        .bind(record.from.latitude)
        .bind(record.heading.as_degrees())
        .bind(record.to.longitude)
        .bind(record.to.latitude)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
