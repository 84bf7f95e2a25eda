//! Order persistence operations.

use anyhow::Result;
use chrono::NaiveDate;
use skydrop_client::OrderRecord;
use sqlx::SqlitePool;

/// Format used for `orders.delivery_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_no: String,
    customer: String,
    deliver_to: String,
}

/// Load every order for `date`, in insertion order, with its items.
pub async fn load_orders(pool: &SqlitePool, date: NaiveDate) -> Result<Vec<OrderRecord>> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT order_no, customer, deliver_to FROM orders WHERE delivery_date = ?1 ORDER BY rowid",
    )
    .bind(date.format(DATE_FORMAT).to_string())
    .fetch_all(pool)
    .await?;

    let mut orders = Vec::with_capacity(rows.len());
    for row in rows {
        let items: Vec<(String,)> =
            sqlx::query_as("SELECT item FROM order_details WHERE order_no = ?1 ORDER BY rowid")
                .bind(&row.order_no)
                .fetch_all(pool)
                .await?;

        orders.push(OrderRecord {
            order_no: row.order_no,
            customer: row.customer,
            deliver_to: row.deliver_to,
            items: items.into_iter().map(|(item,)| item).collect(),
        });
    }

    Ok(orders)
}
