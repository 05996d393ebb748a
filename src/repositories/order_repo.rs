//! Orders and their lines.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{CreatedOrder, OrderLine, OrderSummary};

/// Order status written once the payment provider confirms a charge.
pub const ORDER_STATUS_PAID: i32 = 1;

#[derive(Clone)]
pub struct OrderRepository {
    pool: AsyncDbPool,
}

impl OrderRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        use crate::schema::orders::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(orders.filter(order_id.eq(id))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Turns the buy-now lines of a cart into an order.
    ///
    /// Pricing and emptying the cart happen inside `shopping_cart_create_order`
    /// in a single statement.
    pub async fn create_from_cart(
        &self,
        cart_id: &str,
        customer_id: i32,
        shipping_id: i32,
        tax_id: i32,
    ) -> Result<CreatedOrder, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM shopping_cart_create_order($1, $2, $3, $4)")
            .bind::<Text, _>(cart_id)
            .bind::<Integer, _>(customer_id)
            .bind::<Integer, _>(shipping_id)
            .bind::<Integer, _>(tax_id)
            .get_result::<CreatedOrder>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn lines(&self, id: i32) -> Result<Vec<OrderLine>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM orders_get_order_details($1)")
            .bind::<Integer, _>(id)
            .load::<OrderLine>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn short_details(&self, id: i32) -> Result<Option<OrderSummary>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM orders_get_order_short_details($1)")
            .bind::<Integer, _>(id)
            .get_result::<OrderSummary>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn by_customer(&self, customer_id: i32) -> Result<Vec<OrderSummary>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM orders_get_by_customer_id($1)")
            .bind::<Integer, _>(customer_id)
            .load::<OrderSummary>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn update_status(&self, id: i32, status: i32) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT orders_update_status($1, $2)")
            .bind::<Integer, _>(id)
            .bind::<Integer, _>(status)
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
