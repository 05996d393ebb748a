//! Shipping regions, shipping options and tax rates.

use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{ShippingOption, ShippingRegion, Tax};

#[derive(Clone)]
pub struct ShippingRepository {
    pool: AsyncDbPool,
}

impl ShippingRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn regions(&self) -> Result<Vec<ShippingRegion>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM customer_get_shipping_regions()")
            .load::<ShippingRegion>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Shipping options offered in one region.
    pub async fn options_in_region(&self, region_id: i32) -> Result<Vec<ShippingOption>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM orders_get_shipping_info($1)")
            .bind::<Integer, _>(region_id)
            .load::<ShippingOption>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_taxes(&self) -> Result<Vec<Tax>, AppError> {
        use crate::schema::tax::dsl::*;
        let mut conn = self.pool.get().await?;

        tax.order(tax_id.asc())
            .select(Tax::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_tax(&self, id: i32) -> Result<Option<Tax>, AppError> {
        use crate::schema::tax::dsl::*;
        let mut conn = self.pool.get().await?;

        tax.filter(tax_id.eq(id))
            .select(Tax::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }
}
