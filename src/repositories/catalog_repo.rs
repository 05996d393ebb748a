//! Departments, categories and attributes.
//!
//! Plain lookups go through the table DSL, everything the shop front shows
//! goes through the `catalog_*` routines.

use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{
    Attribute, AttributeValue, Category, Department, DepartmentDetails, ProductAttribute,
    ProductCategory, RowCount,
};

/// Read access to the browsing structure of the catalog.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: AsyncDbPool,
}

impl CatalogRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// All departments as returned by `catalog_get_departments`.
    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_departments()")
            .load::<Department>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_department(&self, id: i32) -> Result<Option<Department>, AppError> {
        use crate::schema::department::dsl::*;
        let mut conn = self.pool.get().await?;

        department
            .filter(department_id.eq(id))
            .select(Department::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Name and description of one department, `None` when it does not exist.
    pub async fn department_details(&self, id: i32) -> Result<Option<DepartmentDetails>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_department_details($1)")
            .bind::<Integer, _>(id)
            .get_result::<DepartmentDetails>(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn count_categories(&self) -> Result<i64, AppError> {
        use crate::schema::category::dsl::*;
        let mut conn = self.pool.get().await?;

        category.count().get_result(&mut conn).await.map_err(AppError::from)
    }

    /// One page of categories sorted by id.
    ///
    /// # Arguments
    /// * `descending` - Sort direction of `category_id`
    /// * `offset` - Number of rows to skip
    /// * `limit` - Page size
    pub async fn list_categories(
        &self,
        descending: bool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Category>, AppError> {
        use crate::schema::category::dsl::*;
        let mut conn = self.pool.get().await?;

        let query = category
            .select(Category::as_select())
            .limit(limit)
            .offset(offset)
            .into_boxed::<diesel::pg::Pg>();
        let query = if descending {
            query.order(category_id.desc())
        } else {
            query.order(category_id.asc())
        };

        query.load(&mut conn).await.map_err(AppError::from)
    }

    pub async fn find_category(&self, id: i32) -> Result<Option<Category>, AppError> {
        use crate::schema::category::dsl::*;
        let mut conn = self.pool.get().await?;

        category
            .filter(category_id.eq(id))
            .select(Category::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn categories_in_department(&self, id: i32) -> Result<Vec<Category>, AppError> {
        use crate::schema::category::dsl::*;
        let mut conn = self.pool.get().await?;

        category
            .filter(department_id.eq(id))
            .order(category_id.asc())
            .select(Category::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn categories_for_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductCategory>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_categories_for_product($1)")
            .bind::<Integer, _>(product_id)
            .load::<ProductCategory>(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn count_products_in_category(&self, category_id: i32) -> Result<i64, AppError> {
        let mut conn = self.pool.get().await?;

        let row = diesel::sql_query(
            "SELECT categories_count AS count FROM catalog_count_products_in_category($1)",
        )
        .bind::<Integer, _>(category_id)
        .get_result::<RowCount>(&mut conn)
        .await?;
        Ok(row.count)
    }

    pub async fn count_products_on_department(&self, department_id: i32) -> Result<i64, AppError> {
        let mut conn = self.pool.get().await?;

        let row = diesel::sql_query(
            "SELECT products_on_department_count AS count \
             FROM catalog_count_products_on_department($1)",
        )
        .bind::<Integer, _>(department_id)
        .get_result::<RowCount>(&mut conn)
        .await?;
        Ok(row.count)
    }

    pub async fn list_attributes(&self) -> Result<Vec<Attribute>, AppError> {
        use crate::schema::attribute::dsl::*;
        let mut conn = self.pool.get().await?;

        attribute
            .order(attribute_id.asc())
            .select(Attribute::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_attribute(&self, id: i32) -> Result<Option<Attribute>, AppError> {
        use crate::schema::attribute::dsl::*;
        let mut conn = self.pool.get().await?;

        attribute
            .filter(attribute_id.eq(id))
            .select(Attribute::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn attribute_values(&self, id: i32) -> Result<Vec<AttributeValue>, AppError> {
        use crate::schema::attribute_value::dsl::*;
        let mut conn = self.pool.get().await?;

        attribute_value
            .filter(attribute_id.eq(id))
            .order(attribute_value_id.asc())
            .select(AttributeValue::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn product_attributes(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductAttribute>, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::sql_query("SELECT * FROM catalog_get_product_attributes($1)")
            .bind::<Integer, _>(product_id)
            .load::<ProductAttribute>(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
