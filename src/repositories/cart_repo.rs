//! Shopping carts and their lines.
//!
//! A cart is a row in `cart` keyed by a 32 character id handed out to the
//! client; its lines live in `shopping_cart` and are edited by the
//! `shopping_cart_*` routines.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Text, Varchar};
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{CartItem, CartLine, CartTotal, NewCart, SavedItem};

#[derive(Clone)]
pub struct CartRepository {
    pool: AsyncDbPool,
}

impl CartRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, id: &str) -> Result<(), AppError> {
        use crate::schema::cart::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(cart)
            .values(&NewCart {
                cart_id: id.to_string(),
            })
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    pub async fn exists(&self, id: &str) -> Result<bool, AppError> {
        use crate::schema::cart::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(cart.filter(cart_id.eq(id))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// The line with `item_id`, whichever cart it belongs to.
    pub async fn find_line(&self, id: i32) -> Result<Option<CartLine>, AppError> {
        use crate::schema::shopping_cart::dsl::*;
        let mut conn = self.pool.get().await?;

        shopping_cart
            .filter(item_id.eq(id))
            .select(CartLine::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn add_product(
        &self,
        cart_id: &str,
        product_id: i32,
        attributes: &str,
    ) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT shopping_cart_add_product($1, $2, $3)")
            .bind::<Text, _>(cart_id)
            .bind::<Integer, _>(product_id)
            .bind::<Varchar, _>(attributes)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    /// Sets the quantity of a line; zero or less removes it.
    pub async fn update_quantity(&self, item_id: i32, quantity: i32) -> Result<(), AppError> {
        self.call_on_item("SELECT shopping_cart_update($1, $2)", item_id, Some(quantity))
            .await
    }

    pub async fn remove_product(&self, item_id: i32) -> Result<(), AppError> {
        self.call_on_item("SELECT shopping_cart_remove_product($1)", item_id, None)
            .await
    }

    pub async fn save_for_later(&self, item_id: i32) -> Result<(), AppError> {
        self.call_on_item("SELECT shopping_cart_save_product_for_later($1)", item_id, None)
            .await
    }

    pub async fn move_to_cart(&self, item_id: i32) -> Result<(), AppError> {
        self.call_on_item("SELECT shopping_cart_move_product_to_cart($1)", item_id, None)
            .await
    }

    pub async fn items(&self, cart_id: &str) -> Result<Vec<CartItem>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM shopping_cart_get_products($1)")
            .bind::<Text, _>(cart_id)
            .load::<CartItem>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn saved_items(&self, cart_id: &str) -> Result<Vec<SavedItem>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM shopping_cart_get_saved_products($1)")
            .bind::<Text, _>(cart_id)
            .load::<SavedItem>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn total_amount(&self, cart_id: &str) -> Result<CartTotal, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM shopping_cart_get_total_amount($1)")
            .bind::<Text, _>(cart_id)
            .get_result::<CartTotal>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn empty(&self, cart_id: &str) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT shopping_cart_empty($1)")
            .bind::<Text, _>(cart_id)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn call_on_item(
        &self,
        statement: &'static str,
        item_id: i32,
        quantity: Option<i32>,
    ) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;
        let query = diesel::sql_query(statement).bind::<Integer, _>(item_id);

        match quantity {
            Some(quantity) => query.bind::<Integer, _>(quantity).execute(&mut conn).await?,
            None => query.execute(&mut conn).await?,
        };
        Ok(())
    }
}
