//! Product listings, search and reviews.

use diesel::prelude::*;
use diesel::sql_types::{Integer, SmallInt, Text, Varchar};
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{
    ProductDetails, ProductInfo, ProductLocation, ProductReview, ProductSummary, RowCount,
};

/// Page window shared by every listing routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub description_length: i32,
    pub limit: i32,
    pub offset: i32,
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: AsyncDbPool,
}

impl ProductRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn exists(&self, id: i32) -> Result<bool, AppError> {
        use crate::schema::product::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::select(diesel::dsl::exists(product.filter(product_id.eq(id))))
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let mut conn = self.pool.get().await?;

        let row = diesel::sql_query(
            "SELECT products_on_catalog_count AS count FROM catalog_count_products_on_catalog()",
        )
        .get_result::<RowCount>(&mut conn)
        .await?;
        Ok(row.count)
    }

    /// Whole catalog, most prominent products first.
    pub async fn list_all(&self, window: ListWindow) -> Result<Vec<ProductSummary>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query(
            "SELECT product_id, name, \
                    catalog_short_description(description, $1) AS description, \
                    price, discounted_price, thumbnail \
             FROM product \
             ORDER BY display DESC, product_id \
             LIMIT $2 OFFSET $3",
        )
        .bind::<Integer, _>(window.description_length)
        .bind::<Integer, _>(window.limit)
        .bind::<Integer, _>(window.offset)
        .load::<ProductSummary>(&mut conn)
        .await
        .map_err(AppError::from)
    }

    pub async fn list_in_category(
        &self,
        category_id: i32,
        window: ListWindow,
    ) -> Result<Vec<ProductSummary>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_products_in_category($1, $2, $3, $4)")
            .bind::<Integer, _>(category_id)
            .bind::<Integer, _>(window.description_length)
            .bind::<Integer, _>(window.limit)
            .bind::<Integer, _>(window.offset)
            .load::<ProductSummary>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_on_department(
        &self,
        department_id: i32,
        window: ListWindow,
    ) -> Result<Vec<ProductSummary>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_products_on_department($1, $2, $3, $4)")
            .bind::<Integer, _>(department_id)
            .bind::<Integer, _>(window.description_length)
            .bind::<Integer, _>(window.limit)
            .bind::<Integer, _>(window.offset)
            .load::<ProductSummary>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Number of full text matches, `all_words` is `on` or `off`.
    pub async fn count_search(&self, query: &str, all_words: &str) -> Result<i64, AppError> {
        let mut conn = self.pool.get().await?;

        let row = diesel::sql_query("SELECT count FROM catalog_count_search_result($1, $2)")
            .bind::<Varchar, _>(query)
            .bind::<Varchar, _>(all_words)
            .get_result::<RowCount>(&mut conn)
            .await?;
        Ok(row.count)
    }

    pub async fn search(
        &self,
        query: &str,
        all_words: &str,
        window: ListWindow,
    ) -> Result<Vec<ProductSummary>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_search($1, $2, $3, $4, $5)")
            .bind::<Varchar, _>(query)
            .bind::<Varchar, _>(all_words)
            .bind::<Integer, _>(window.description_length)
            .bind::<Integer, _>(window.limit)
            .bind::<Integer, _>(window.offset)
            .load::<ProductSummary>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn info(&self, id: i32) -> Result<Option<ProductInfo>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_product_info($1)")
            .bind::<Integer, _>(id)
            .get_result::<ProductInfo>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn details(&self, id: i32) -> Result<Option<ProductDetails>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_product_details($1)")
            .bind::<Integer, _>(id)
            .get_result::<ProductDetails>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn locations(&self, id: i32) -> Result<Option<ProductLocation>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_product_locations($1)")
            .bind::<Integer, _>(id)
            .get_result::<ProductLocation>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn reviews(&self, id: i32) -> Result<Vec<ProductReview>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_product_reviews($1)")
            .bind::<Integer, _>(id)
            .load::<ProductReview>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn create_review(
        &self,
        customer_id: i32,
        product_id: i32,
        review: &str,
        rating: i16,
    ) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT catalog_create_product_review($1, $2, $3, $4)")
            .bind::<Integer, _>(customer_id)
            .bind::<Integer, _>(product_id)
            .bind::<Text, _>(review)
            .bind::<SmallInt, _>(rating)
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}
