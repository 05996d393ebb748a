//! Orders placed from shopping carts.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{CreatedOrder, OrderLine, OrderSummary};
use crate::repositories::{ORDER_STATUS_PAID, OrderRepository};

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
}

impl OrderService {
    pub fn new(repo: OrderRepository) -> Self {
        Self { repo }
    }

    /// Turns the cart into an order for the customer and empties the cart.
    pub async fn create(
        &self,
        cart_id: &str,
        customer_id: i32,
        shipping_id: i32,
        tax_id: i32,
    ) -> AppResult<CreatedOrder> {
        let order = self
            .repo
            .create_from_cart(cart_id, customer_id, shipping_id, tax_id)
            .await?;
        tracing::info!(order_id = order.order_id, customer_id, "Order created");
        Ok(order)
    }

    /// Fails with `ORD_01` unless the order exists.
    pub async fn ensure_exists(&self, id: i32) -> AppResult<()> {
        if self.repo.exists(id).await? {
            Ok(())
        } else {
            Err(order_not_found(id))
        }
    }

    pub async fn lines(&self, id: i32) -> AppResult<Vec<OrderLine>> {
        self.ensure_exists(id).await?;
        self.repo.lines(id).await
    }

    pub async fn short_details(&self, id: i32) -> AppResult<OrderSummary> {
        self.repo
            .short_details(id)
            .await?
            .ok_or_else(|| order_not_found(id))
    }

    pub async fn by_customer(&self, customer_id: i32) -> AppResult<Vec<OrderSummary>> {
        self.repo.by_customer(customer_id).await
    }

    /// Records a successful payment.
    pub async fn mark_paid(&self, id: i32) -> AppResult<()> {
        self.repo.update_status(id, ORDER_STATUS_PAID).await?;
        tracing::info!(order_id = id, "Order marked as paid");
        Ok(())
    }
}

fn order_not_found(id: i32) -> AppError {
    AppError::not_found(ErrorCode::OrderNotFound, "id", id)
}
