//! Product listings, search and reviews.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{ProductDetails, ProductInfo, ProductLocation, ProductReview, ProductSummary};
use crate::repositories::{CatalogRepository, ListWindow, ProductRepository};

/// Listing page requested by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based
    pub page: i64,
    pub limit: i64,
    pub description_length: i64,
}

impl PageRequest {
    fn window(&self) -> ListWindow {
        let limit = clamp_i32(self.limit);
        ListWindow {
            description_length: clamp_i32(self.description_length),
            limit,
            offset: clamp_i32((self.page - 1).max(0).saturating_mul(self.limit)),
        }
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(0, i64::from(i32::MAX)) as i32
}

/// A page of products and the number of products matching overall.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub count: i64,
    pub rows: Vec<ProductSummary>,
}

#[derive(Clone)]
pub struct ProductService {
    repo: ProductRepository,
    catalog: CatalogRepository,
}

impl ProductService {
    pub fn new(repo: ProductRepository, catalog: CatalogRepository) -> Self {
        Self { repo, catalog }
    }

    /// Fails with `PRO_01` unless the product exists.
    pub async fn ensure_exists(&self, id: i32) -> AppResult<()> {
        if self.repo.exists(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(ErrorCode::ProductNotFound, "id", id))
        }
    }

    pub async fn list(&self, page: PageRequest) -> AppResult<ProductPage> {
        let count = self.repo.count_all().await?;
        let rows = self.repo.list_all(page.window()).await?;
        Ok(ProductPage { count, rows })
    }

    /// Full text search over names and descriptions.
    ///
    /// # Arguments
    /// * `query` - Words to look for
    /// * `all_words` - `on` requires every word, `off` any of them
    pub async fn search(
        &self,
        query: &str,
        all_words: &str,
        page: PageRequest,
    ) -> AppResult<ProductPage> {
        let count = self.repo.count_search(query, all_words).await?;
        let rows = self.repo.search(query, all_words, page.window()).await?;
        Ok(ProductPage { count, rows })
    }

    pub async fn in_category(&self, category_id: i32, page: PageRequest) -> AppResult<ProductPage> {
        let count = self.catalog.count_products_in_category(category_id).await?;
        let rows = self.repo.list_in_category(category_id, page.window()).await?;
        Ok(ProductPage { count, rows })
    }

    /// Products displayed on the department page.
    pub async fn on_department(
        &self,
        department_id: i32,
        page: PageRequest,
    ) -> AppResult<ProductPage> {
        let count = self
            .catalog
            .count_products_on_department(department_id)
            .await?;
        let rows = self
            .repo
            .list_on_department(department_id, page.window())
            .await?;
        Ok(ProductPage { count, rows })
    }

    pub async fn product(&self, id: i32) -> AppResult<ProductInfo> {
        self.repo
            .info(id)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::ProductNotFound, "id", id))
    }

    pub async fn details(&self, id: i32) -> AppResult<ProductDetails> {
        self.repo
            .details(id)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::ProductNotFound, "id", id))
    }

    /// Category and department the product is shown in.
    pub async fn location(&self, id: i32) -> AppResult<Option<ProductLocation>> {
        self.repo.locations(id).await
    }

    pub async fn reviews(&self, id: i32) -> AppResult<Vec<ProductReview>> {
        self.repo.reviews(id).await
    }

    pub async fn add_review(
        &self,
        customer_id: i32,
        product_id: i32,
        review: &str,
        rating: i64,
    ) -> AppResult<()> {
        let rating = i16::try_from(rating).map_err(|_| {
            AppError::validation(ErrorCode::InvalidField, "rating", "Invalid rating")
        })?;
        self.repo
            .create_review(customer_id, product_id, review, rating)
            .await?;
        tracing::info!(customer_id, product_id, rating, "Product review created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_offsets_by_page() {
        let page = PageRequest {
            page: 3,
            limit: 20,
            description_length: 200,
        };
        assert_eq!(
            page.window(),
            ListWindow {
                description_length: 200,
                limit: 20,
                offset: 40
            }
        );
    }

    #[test]
    fn test_window_clamps_out_of_range_values() {
        let page = PageRequest {
            page: 0,
            limit: i64::MAX,
            description_length: -5,
        };
        let window = page.window();
        assert_eq!(window.offset, 0);
        assert_eq!(window.limit, i32::MAX);
        assert_eq!(window.description_length, 0);
    }
}
