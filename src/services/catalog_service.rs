//! Departments, categories and attributes.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{
    Attribute, AttributeValue, Category, DepartmentDetails, Department, ProductAttribute,
    ProductCategory,
};
use crate::repositories::CatalogRepository;

/// A slice of a sorted listing together with the total row count.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub count: i64,
    pub rows: Vec<T>,
    pub limit: i64,
    pub page: i64,
}

/// Which rows of a category listing to return, and what to echo back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageWindow {
    offset: i64,
    limit: i64,
    page: i64,
    /// Pages below 1 select nothing
    empty: bool,
}

impl PageWindow {
    /// A zero or absent limit means every row. Page 0 is echoed as page 1.
    fn new(count: i64, page: i64, limit: Option<i64>) -> Self {
        let limit = limit.filter(|limit| *limit > 0).unwrap_or(count);
        Self {
            offset: (page - 1).max(0).saturating_mul(limit),
            limit,
            page: page.max(1),
            empty: page < 1 || limit <= 0,
        }
    }
}

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn departments(&self) -> AppResult<Vec<Department>> {
        self.repo.list_departments().await
    }

    /// Gets one department.
    ///
    /// # Returns
    /// The department, or `DEP_02` when the id is unknown
    pub async fn department(&self, id: i32) -> AppResult<Department> {
        let DepartmentDetails { name, description } = self
            .repo
            .department_details(id)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::DepartmentNotFound, "id", id))?;

        Ok(Department {
            department_id: id,
            name,
            description,
        })
    }

    /// Fails with `DEP_02` unless the department exists.
    pub async fn ensure_department(&self, id: i32) -> AppResult<()> {
        match self.repo.find_department(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(ErrorCode::DepartmentNotFound, "id", id)),
        }
    }

    /// Lists categories by id.
    ///
    /// # Arguments
    /// * `descending` - Sort by `category_id` descending
    /// * `page` - 1-based page number
    /// * `limit` - Page size, every category when `None` or 0
    pub async fn categories(
        &self,
        descending: bool,
        page: i64,
        limit: Option<i64>,
    ) -> AppResult<Paged<Category>> {
        let count = self.repo.count_categories().await?;
        let window = PageWindow::new(count, page, limit);

        let rows = if window.empty {
            Vec::new()
        } else {
            self.repo
                .list_categories(descending, window.offset, window.limit)
                .await?
        };

        Ok(Paged {
            count,
            rows,
            limit: window.limit,
            page: window.page,
        })
    }

    pub async fn category(&self, id: i32) -> AppResult<Category> {
        self.repo
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::CategoryNotFound, "id", id))
    }

    /// The category a product is filed under, as a one element list.
    pub async fn categories_of_product(&self, product_id: i32) -> AppResult<Vec<ProductCategory>> {
        let mut rows = self.repo.categories_for_product(product_id).await?;
        rows.truncate(1);
        Ok(rows)
    }

    pub async fn categories_in_department(&self, department_id: i32) -> AppResult<Vec<Category>> {
        self.repo.categories_in_department(department_id).await
    }

    pub async fn attributes(&self) -> AppResult<Vec<Attribute>> {
        self.repo.list_attributes().await
    }

    pub async fn attribute(&self, id: i32) -> AppResult<Attribute> {
        self.repo
            .find_attribute(id)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::AttributeNotFound, "attribute_id", id))
    }

    pub async fn attribute_values(&self, attribute_id: i32) -> AppResult<Vec<AttributeValue>> {
        self.repo.attribute_values(attribute_id).await
    }

    pub async fn product_attributes(&self, product_id: i32) -> AppResult<Vec<ProductAttribute>> {
        self.repo.product_attributes(product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window() {
        let window = PageWindow::new(7, 2, Some(3));
        assert_eq!((window.offset, window.limit, window.page, window.empty), (3, 3, 2, false));

        let zero_limit = PageWindow::new(7, 1, Some(0));
        assert_eq!((zero_limit.limit, zero_limit.empty), (7, false));

        let zero_page = PageWindow::new(7, 0, Some(3));
        assert_eq!((zero_page.page, zero_page.empty), (1, true));

        assert!(PageWindow::new(0, 1, None).empty);
    }
}
